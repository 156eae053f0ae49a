//! `eventually-tennis` scores tennis matches with Event Sourcing.
//!
//! Points and sets are recorded as Domain [Event][event::Event]s in
//! append-only streams, and every scoreboard (game score, set score,
//! match winner) is a [Projection][projection::Projection] obtained by
//! replaying those streams from the beginning. No scoreboard is ever
//! stored on its own.
//!
//! ```rust
//! use eventually_tennis::event::store::{EventStoreExt, InMemory};
//! use eventually_tennis::event::Event;
//! use eventually_tennis::tennis_match::Match;
//!
//! let store = InMemory::<String, Event>::default();
//! let stream = Match::stream_name_for("final");
//!
//! store
//!     .write_all(stream.clone(), vec![
//!         Event::SetPlayerOne("6-0".to_owned()),
//!         Event::SetPlayerOne("6-3".to_owned()),
//!         Event::SetPlayerOne("7-5".to_owned()),
//!     ])
//!     .unwrap();
//!
//! Match::new(&store, "final").unwrap();
//!
//! assert_eq!(Some(Event::MatchPlayerOne), store.read_last(&stream).unwrap());
//! ```

#![deny(unsafe_code, unused_qualifications, trivial_casts)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod event;
pub mod game;
pub mod message;
pub mod player;
pub mod projection;
pub mod set;
pub mod tennis_match;
#[cfg(feature = "tracing")]
pub mod tracing;
pub mod version;

pub use {
    event::Event,
    game::{Game, Score},
    player::Player,
    projection::Projection,
    set::Set,
    tennis_match::{Format, Match},
};
