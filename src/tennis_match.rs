//! A tennis match, won by the first player to win the required number of sets.
//!
//! A [`Match`] has no state of its own: every time one is constructed, it
//! replays the whole Event Stream of the match from the
//! [Event Store][crate::event::store] and, as soon as the sets recorded
//! there decide a winner, it writes the match outcome back to the same stream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::store::{AppendError, Store, Streamer};
use crate::event::{Event, VersionSelect};
use crate::player::Player;
use crate::projection::Projection;
use crate::version::{self, Version};

/// The format of a match, i.e. how many sets a player needs to win it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// First to two sets.
    BestOfThree,
    /// First to three sets.
    #[default]
    BestOfFive,
}

impl Format {
    /// Number of sets a player must win to win the match.
    #[must_use]
    pub fn sets_to_win(self) -> u32 {
        match self {
            Format::BestOfThree => 2,
            Format::BestOfFive => 3,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::BestOfThree => f.write_str("best-of-three"),
            Format::BestOfFive => f.write_str("best-of-five"),
        }
    }
}

/// Error returned when parsing an unknown [`Format`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match format '{0}', expected 'best-of-three' or 'best-of-five'")]
pub struct ParseFormatError(String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-of-three" => Ok(Format::BestOfThree),
            "best-of-five" => Ok(Format::BestOfFive),
            other => Err(ParseFormatError(other.to_owned())),
        }
    }
}

/// Number of sets won by each player, and the outcome of the match
/// if one has already been recorded in the Event Stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sets {
    /// Sets won by player one.
    pub player_one: u32,
    /// Sets won by player two.
    pub player_two: u32,
    /// The first outcome recorded in the Event Stream, if any.
    pub winner: Option<Player>,
}

impl Sets {
    /// Returns the player who won the match according to the sets won,
    /// which is the only player that reached the sets required by the [`Format`].
    ///
    /// When both players reached that number the tally does not describe
    /// a completed match, and no winner is returned.
    #[must_use]
    pub fn leader(&self, format: Format) -> Option<Player> {
        let target = format.sets_to_win();

        match (self.player_one >= target, self.player_two >= target) {
            (true, false) => Some(Player::One),
            (false, true) => Some(Player::Two),
            (true, true) | (false, false) => None,
        }
    }
}

/// All possible errors returned by [`Match::new`].
#[derive(Debug, thiserror::Error)]
pub enum Error<E>
where
    E: std::error::Error + 'static,
{
    /// The Event Stream of the match could not be read.
    #[error("failed to read the match event stream: {0}")]
    Stream(#[source] E),

    /// The outcome of the match could not be recorded.
    #[error("failed to record the match outcome: {0}")]
    Append(#[source] AppendError),
}

/// A tennis match, rebuilt from the sets recorded in its Event Stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: String,
    format: Format,
    sets: Sets,
    version: Version,
}

impl Projection for Match {
    type State = Sets;
    type Event = Event;

    fn apply(mut state: Self::State, event: &Self::Event) -> Self::State {
        match event {
            Event::SetPlayerOne(_) => state.player_one += 1,
            Event::SetPlayerTwo(_) => state.player_two += 1,
            // Only the first outcome counts, the match is over after that.
            Event::MatchPlayerOne | Event::MatchPlayerTwo => {
                state.winner = state.winner.or(event.match_winner());
            },
            Event::PlayerOneScored
            | Event::PlayerTwoScored
            | Event::GameScoreAnnounced(_)
            | Event::SetScoreAnnounced(_) => {},
        }

        state
    }
}

impl Match {
    /// Returns the name of the Event Stream holding the events of the match
    /// with the specified id.
    #[must_use]
    pub fn stream_name_for(id: &str) -> String {
        format!("match:{id}")
    }

    /// Rebuilds the best-of-five match with the specified id from the Event Store,
    /// recording its outcome if the sets decide a winner for the first time.
    ///
    /// # Errors
    ///
    /// Returns an error if the Event Stream could not be read, or if the
    /// outcome could not be appended to it (e.g. because another writer
    /// appended to the stream in the meantime).
    pub fn new<S>(
        store: &S,
        id: &str,
    ) -> Result<Self, Error<<S as Streamer<String, Event>>::Error>>
    where
        S: Store<String, Event>,
        <S as Streamer<String, Event>>::Error: std::error::Error + 'static,
    {
        Self::with_format(store, id, Format::default())
    }

    /// Same as [`Match::new`], using the specified [`Format`].
    ///
    /// # Errors
    ///
    /// Check [`Match::new`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", name = "Match::with_format", skip(store))
    )]
    pub fn with_format<S>(
        store: &S,
        id: &str,
        format: Format,
    ) -> Result<Self, Error<<S as Streamer<String, Event>>::Error>>
    where
        S: Store<String, Event>,
        <S as Streamer<String, Event>>::Error: std::error::Error + 'static,
    {
        let stream_id = Self::stream_name_for(id);

        let (version, sets) = store
            .stream(&stream_id, VersionSelect::All)
            .try_fold((0, Sets::default()), |(_, sets), persisted| {
                persisted.map(|persisted| (persisted.version, Self::apply(sets, &persisted.event)))
            })
            .map_err(Error::Stream)?;

        let mut tennis_match = Self {
            id: id.to_owned(),
            format,
            sets,
            version,
        };

        if sets.winner.is_some() {
            return Ok(tennis_match);
        }

        let Some(winner) = sets.leader(format) else {
            #[cfg(feature = "tracing")]
            {
                let target = format.sets_to_win();

                if sets.player_one >= target && sets.player_two >= target {
                    tracing::warn!(
                        match_id = id,
                        player_one = sets.player_one,
                        player_two = sets.player_two,
                        %format,
                        "Both players reached the sets needed to win, no winner can be decided"
                    );
                }
            }

            return Ok(tennis_match);
        };

        let outcome = Event::match_won_by(winner);

        tennis_match.version = store
            .append(
                stream_id,
                version::Check::MustBe(version),
                vec![outcome.clone()],
            )
            .map_err(Error::Append)?;

        tennis_match.sets = Self::apply(sets, &outcome);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            match_id = id,
            %winner,
            player_one = sets.player_one,
            player_two = sets.player_two,
            "Match outcome recorded"
        );

        Ok(tennis_match)
    }

    /// The id of the match.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The format the match is played with.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// The sets won by each player so far.
    #[must_use]
    pub fn sets(&self) -> Sets {
        self.sets
    }

    /// The winner of the match, if the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.sets.winner
    }

    /// The version of the match Event Stream, after the outcome
    /// has been recorded if that was the case.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }
}
