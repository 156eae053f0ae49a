//! Module `event` contains the Domain Events of a tennis match, and the
//! types used to persist them in Event Streams.

use serde::{Deserialize, Serialize};

use crate::message;
use crate::player::Player;
use crate::version::Version;

pub mod store;
pub mod stream;

pub use stream::EventStream;

/// All the facts that can happen during a tennis match.
///
/// The set of events is closed: every projection matches on it exhaustively,
/// so adding a new kind of event is a compile error until all of them handle it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "score")]
pub enum Event {
    /// Player one won a point.
    PlayerOneScored,
    /// Player two won a point.
    PlayerTwoScored,
    /// Player one won a set, with the final games score of the set (e.g. `"6-0"`).
    ///
    /// The score label is carried along as-is and is never parsed.
    SetPlayerOne(String),
    /// Player two won a set, with the final games score of the set.
    SetPlayerTwo(String),
    /// The umpire announced the score of the current game.
    GameScoreAnnounced(String),
    /// The umpire announced the games score of the current set.
    SetScoreAnnounced(String),
    /// Player one won the match.
    MatchPlayerOne,
    /// Player two won the match.
    MatchPlayerTwo,
}

impl Event {
    /// Returns the event recorded when the specified [Player] wins a point.
    #[must_use]
    pub fn point_won_by(player: Player) -> Self {
        match player {
            Player::One => Event::PlayerOneScored,
            Player::Two => Event::PlayerTwoScored,
        }
    }

    /// Returns the event recorded when the specified [Player] wins a set,
    /// with its final games score.
    #[must_use]
    pub fn set_won_by(player: Player, score: impl Into<String>) -> Self {
        match player {
            Player::One => Event::SetPlayerOne(score.into()),
            Player::Two => Event::SetPlayerTwo(score.into()),
        }
    }

    /// Returns the event recorded when the specified [Player] wins the match.
    #[must_use]
    pub fn match_won_by(player: Player) -> Self {
        match player {
            Player::One => Event::MatchPlayerOne,
            Player::Two => Event::MatchPlayerTwo,
        }
    }

    /// Returns the winner of the match, if this is a match outcome event.
    #[must_use]
    pub fn match_winner(&self) -> Option<Player> {
        match self {
            Event::MatchPlayerOne => Some(Player::One),
            Event::MatchPlayerTwo => Some(Player::Two),
            _ => None,
        }
    }
}

impl message::Message for Event {
    fn name(&self) -> &'static str {
        match self {
            Event::PlayerOneScored => "PlayerOneScored",
            Event::PlayerTwoScored => "PlayerTwoScored",
            Event::SetPlayerOne(_) => "SetPlayerOne",
            Event::SetPlayerTwo(_) => "SetPlayerTwo",
            Event::GameScoreAnnounced(_) => "GameScoreAnnounced",
            Event::SetScoreAnnounced(_) => "SetScoreAnnounced",
            Event::MatchPlayerOne => "MatchPlayerOne",
            Event::MatchPlayerTwo => "MatchPlayerTwo",
        }
    }
}

/// An [Event] that has been persisted to the Event [Store][store::Store].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persisted<Id, Evt>
where
    Evt: message::Message,
{
    /// The id of the Event Stream the persisted Event belongs to.
    pub stream_id: Id,

    /// The version of the Event Stream when this Event has been recorded.
    ///
    /// Check the [Version] type and module documentation for more info.
    pub version: Version,

    /// The actual Domain Event.
    pub event: Evt,
}

/// Specifies the slice of the Event Stream to select when calling
/// [`Streamer::stream`][store::Streamer::stream].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelect {
    /// Selects all Events in the Event Stream.
    All,

    /// Selects all Events in the Event Stream starting from the Event
    /// with the specified [Version].
    From(Version),
}

/// Stream is an ordered iterator of [Persisted] Domain Events.
pub type Stream<'a, Id, Evt, Err> = Box<dyn Iterator<Item = Result<Persisted<Id, Evt>, Err>> + 'a>;
