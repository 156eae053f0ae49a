//! The games score of a tennis set.
//!
//! A [`Set`] reads the points of a single set from an [`EventStream`],
//! scores every game with the same rules used by a [`Game`], and
//! announces the games score back on the stream.
//!
//! A set is won by the first player to win six games with a lead of at
//! least two games. Tie-breaks are not played: at six games all, the set
//! goes on until a player leads by two.

use crate::event::{Event, EventStream};
use crate::game::{Game, Points};
use crate::player::Player;
use crate::projection::Projection;

/// Games needed to win a set, provided the lead is at least two games.
pub const GAMES_TO_WIN: u32 = 6;

/// Games won by each player, the points of the game being played, and
/// the winner of the set, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Games {
    /// Games won by player one.
    pub player_one: u32,
    /// Games won by player two.
    pub player_two: u32,
    /// Points of the game being played.
    pub current: Points,
    /// The winner of the set, once decided.
    pub winner: Option<Player>,
    /// Whether the winner has already been recorded in the Event Stream.
    pub recorded: bool,
}

impl Games {
    fn won(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    #[must_use]
    fn game_won_by(mut self, player: Player) -> Self {
        match player {
            Player::One => self.player_one += 1,
            Player::Two => self.player_two += 1,
        }

        let (won, lost) = (self.won(player), self.won(player.opponent()));

        if won >= GAMES_TO_WIN && won >= lost + 2 {
            self.winner = Some(player);
        }

        self
    }

    #[must_use]
    fn recorded_for(mut self, player: Player) -> Self {
        self.winner = self.winner.or(Some(player));
        self.recorded = true;
        self
    }

    /// Returns the games score, player one first, e.g. `"6-4"`.
    #[must_use]
    pub fn score(&self) -> String {
        format!("{}-{}", self.player_one, self.player_two)
    }
}

/// A tennis set, rebuilt from the points recorded in its Event Stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set {
    games: Games,
}

impl Projection for Set {
    type State = Games;
    type Event = Event;

    fn apply(mut state: Self::State, event: &Self::Event) -> Self::State {
        match event {
            Event::PlayerOneScored | Event::PlayerTwoScored => {
                if state.winner.is_some() {
                    return state;
                }

                state.current = Game::apply(state.current, event);

                match state.current.score().winner() {
                    Some(player) => Games {
                        current: Points::default(),
                        ..state.game_won_by(player)
                    },
                    None => state,
                }
            },
            Event::SetPlayerOne(_) => state.recorded_for(Player::One),
            Event::SetPlayerTwo(_) => state.recorded_for(Player::Two),
            Event::GameScoreAnnounced(_)
            | Event::SetScoreAnnounced(_)
            | Event::MatchPlayerOne
            | Event::MatchPlayerTwo => state,
        }
    }
}

impl Set {
    /// Rebuilds the set from the points in the Event Stream and announces
    /// its games score, by writing a
    /// [`SetScoreAnnounced`](Event::SetScoreAnnounced) event.
    ///
    /// The first time the points decide the winner of the set, a
    /// [`SetPlayerOne`](Event::SetPlayerOne) or [`SetPlayerTwo`](Event::SetPlayerTwo)
    /// event carrying the final games score is written before the announcement.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            name = "Set::new",
            skip_all,
            fields(events = stream.len())
        )
    )]
    pub fn new(stream: &mut EventStream<Event>) -> Self {
        let mut games = Self::replay(stream.read_all());
        let score = games.score();

        if let (Some(winner), false) = (games.winner, games.recorded) {
            let set_won = Event::set_won_by(winner, score.clone());

            #[cfg(feature = "tracing")]
            tracing::debug!(%winner, %score, "Set won");

            games = Self::apply(games, &set_won);
            stream.write(set_won);
        }

        stream.write(Event::SetScoreAnnounced(score));

        Self { games }
    }

    /// Games won so far, and the points of the game being played.
    #[must_use]
    pub fn games(&self) -> Games {
        self.games
    }

    /// The winner of the set, if the set is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.games.winner
    }

    /// The games score of the set, e.g. `"6-4"`.
    #[must_use]
    pub fn score(&self) -> String {
        self.games.score()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::event::Event::{PlayerOneScored as P1, PlayerTwoScored as P2};

    fn love_game(player: Player) -> Vec<Event> {
        vec![Event::point_won_by(player); 4]
    }

    fn games(player: Player, count: usize) -> Vec<Event> {
        (0..count).flat_map(|_| love_game(player)).collect()
    }

    fn announced(stream: &EventStream<Event>) -> Option<&Event> {
        stream.read_last()
    }

    #[test]
    fn score_is_announced_for_an_empty_set() {
        let mut stream = EventStream::default();

        Set::new(&mut stream);

        assert_eq!(
            Some(&Event::SetScoreAnnounced("0-0".to_owned())),
            announced(&stream)
        );
    }

    #[test]
    fn winning_a_game_changes_the_set_score() {
        let mut stream = EventStream::from(love_game(Player::One));

        let set = Set::new(&mut stream);

        assert_eq!("1-0", set.score());
        assert_eq!(
            Some(&Event::SetScoreAnnounced("1-0".to_owned())),
            announced(&stream)
        );
    }

    #[test]
    fn points_of_an_unfinished_game_do_not_change_the_set_score() {
        let mut stream = EventStream::from(vec![P1, P2, P2, P1, P1]);

        let set = Set::new(&mut stream);

        assert_eq!("0-0", set.score());
        assert_eq!(
            Points {
                player_one: 3,
                player_two: 2
            },
            set.games().current
        );
    }

    #[test]
    fn six_love_games_win_the_set() {
        let mut stream = EventStream::from(games(Player::One, 6));
        let points = stream.len();

        let set = Set::new(&mut stream);

        assert_eq!(Some(Player::One), set.winner());
        assert_eq!(
            &[
                Event::SetPlayerOne("6-0".to_owned()),
                Event::SetScoreAnnounced("6-0".to_owned())
            ],
            &stream.read_all()[points..]
        );
    }

    #[test]
    fn a_set_needs_a_two_games_lead() {
        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(love_game(Player::One));
            events.extend(love_game(Player::Two));
        }
        events.extend(love_game(Player::Two));

        let mut stream = EventStream::from(events);
        let set = Set::new(&mut stream);

        assert_eq!("5-6", set.score());
        assert_eq!(None, set.winner());

        stream.write_all(love_game(Player::Two));
        let set = Set::new(&mut stream);

        assert_eq!(Some(Player::Two), set.winner());
        assert_eq!("5-7", set.score());
    }

    #[test]
    fn the_set_winner_is_recorded_only_once() {
        let mut stream = EventStream::from(games(Player::Two, 6));

        Set::new(&mut stream);
        stream.write_all(love_game(Player::One));
        let set = Set::new(&mut stream);

        let set_won_events = stream
            .read_all()
            .iter()
            .filter(|event| matches!(event, Event::SetPlayerOne(_) | Event::SetPlayerTwo(_)))
            .count();

        assert_eq!(1, set_won_events);
        assert_eq!("0-6", set.score());
        assert_eq!(
            Some(&Event::SetScoreAnnounced("0-6".to_owned())),
            announced(&stream)
        );
    }
}
