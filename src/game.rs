//! The score of a single tennis game, as announced by the umpire.
//!
//! A [`Game`] folds [`PlayerOneScored`][Event::PlayerOneScored] and
//! [`PlayerTwoScored`][Event::PlayerTwoScored] events into [`Points`],
//! and announces the resulting [`Score`] to its subscribers after every
//! point.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use eventually_tennis::{Event, Game};
//!
//! let announced = Rc::new(RefCell::new(String::new()));
//! let mut game = Game::new();
//!
//! let score = Rc::clone(&announced);
//! game.subscribe_to_score(move |s| *score.borrow_mut() = s.to_owned());
//! assert_eq!("love all", *announced.borrow());
//!
//! game.when(&Event::PlayerOneScored);
//! game.when(&Event::PlayerTwoScored);
//! game.when(&Event::PlayerTwoScored);
//! assert_eq!("15-30", *announced.borrow());
//! ```

use std::fmt;

use crate::event::Event;
use crate::player::Player;
use crate::projection::Projection;

/// A step of the points ladder of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Point {
    /// No points.
    Love,
    /// One point.
    Fifteen,
    /// Two points.
    Thirty,
    /// Three points.
    Forty,
}

impl Point {
    // Only called with counts below four: past that, the score is
    // either deuce, advantage or game.
    fn from_count(count: u32) -> Self {
        match count {
            0 => Point::Love,
            1 => Point::Fifteen,
            2 => Point::Thirty,
            _ => Point::Forty,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Love => f.write_str("love"),
            Point::Fifteen => f.write_str("15"),
            Point::Thirty => f.write_str("30"),
            Point::Forty => f.write_str("40"),
        }
    }
}

/// The score of a game, as the umpire would call it.
///
/// The [`Display`](fmt::Display) implementation produces the announced
/// label, e.g. `"love all"`, `"40-15"`, `"deuce"`, `"advantage player two"`
/// or `"Game player one"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Neither deuce nor a finished game: player one's points first.
    Points(Point, Point),
    /// Both players won at least three points, and they are tied.
    Deuce,
    /// Both players won at least three points, and one leads by one.
    Advantage(Player),
    /// The game is over.
    Game(Player),
}

impl Score {
    /// Returns the winner of the game, if the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            Score::Game(player) => Some(*player),
            _ => None,
        }
    }
}

impl From<Points> for Score {
    fn from(points: Points) -> Self {
        let Points {
            player_one: a,
            player_two: b,
        } = points;

        if a >= 3 && b >= 3 {
            return match (a.abs_diff(b), a > b) {
                (0, _) => Score::Deuce,
                (1, true) => Score::Advantage(Player::One),
                (1, false) => Score::Advantage(Player::Two),
                (_, true) => Score::Game(Player::One),
                (_, false) => Score::Game(Player::Two),
            };
        }

        // At most one player reached 40 here, so four points
        // always means a lead of at least two.
        if a >= 4 {
            return Score::Game(Player::One);
        }

        if b >= 4 {
            return Score::Game(Player::Two);
        }

        Score::Points(Point::from_count(a), Point::from_count(b))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Points(Point::Love, Point::Love) => f.write_str("love all"),
            Score::Points(a, b) if a == b => write!(f, "{a}-all"),
            Score::Points(a, b) => write!(f, "{a}-{b}"),
            Score::Deuce => f.write_str("deuce"),
            Score::Advantage(player) => write!(f, "advantage {player}"),
            Score::Game(player) => write!(f, "Game {player}"),
        }
    }
}

/// Number of points won by each player in the current game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Points {
    /// Points won by player one.
    pub player_one: u32,
    /// Points won by player two.
    pub player_two: u32,
}

impl Points {
    /// Returns the [`Score`] for these points.
    #[must_use]
    pub fn score(self) -> Score {
        Score::from(self)
    }

    #[must_use]
    fn won_by(self, player: Player) -> Self {
        // A new point after a finished game opens the next game.
        let mut points = if self.score().winner().is_some() {
            Points::default()
        } else {
            self
        };

        match player {
            Player::One => points.player_one += 1,
            Player::Two => points.player_two += 1,
        }

        points
    }
}

type Subscriber = Box<dyn FnMut(&str)>;

/// A tennis game, which scores points and announces the score.
///
/// The game is a repeatable state machine: after a player wins the game,
/// the following point starts a new one from `"love all"`.
#[derive(Default)]
pub struct Game {
    points: Points,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("points", &self.points)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Projection for Game {
    type State = Points;
    type Event = Event;

    fn apply(state: Self::State, event: &Self::Event) -> Self::State {
        match event {
            Event::PlayerOneScored => state.won_by(Player::One),
            Event::PlayerTwoScored => state.won_by(Player::Two),
            Event::SetPlayerOne(_)
            | Event::SetPlayerTwo(_)
            | Event::GameScoreAnnounced(_)
            | Event::SetScoreAnnounced(_)
            | Event::MatchPlayerOne
            | Event::MatchPlayerTwo => state,
        }
    }
}

impl Game {
    /// Creates a new game, with no points scored yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game by replaying a sequence of recorded events.
    ///
    /// No subscriber is notified, as none can be registered yet.
    #[must_use]
    pub fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        Self {
            points: <Self as Projection>::replay(events),
            subscribers: Vec::new(),
        }
    }

    /// Returns the points scored so far in the current game.
    #[must_use]
    pub fn points(&self) -> Points {
        self.points
    }

    /// Returns the current score of the game.
    #[must_use]
    pub fn score(&self) -> Score {
        self.points.score()
    }

    /// Registers a listener for the announced score.
    ///
    /// The listener is called right away with the current score, and then
    /// after every point, in the same order the points happen. Listeners are
    /// called in the order they have been registered.
    pub fn subscribe_to_score<F>(&mut self, mut subscriber: F)
    where
        F: FnMut(&str) + 'static,
    {
        subscriber(&self.score().to_string());
        self.subscribers.push(Box::new(subscriber));
    }

    /// Applies a new Domain Event to the game, announcing the new score
    /// if a point has been scored.
    ///
    /// Events that are not points are ignored.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn when(&mut self, event: &Event) {
        if !matches!(event, Event::PlayerOneScored | Event::PlayerTwoScored) {
            return;
        }

        self.points = Self::apply(self.points, event);

        let announced = self.score().to_string();

        #[cfg(feature = "tracing")]
        tracing::trace!(score = %announced, "Game score announced");

        for subscriber in &mut self.subscribers {
            subscriber(&announced);
        }
    }

    /// Returns the [`GameScoreAnnounced`](Event::GameScoreAnnounced) event
    /// for the current score.
    #[must_use]
    pub fn announcement(&self) -> Event {
        Event::GameScoreAnnounced(self.score().to_string())
    }
}
