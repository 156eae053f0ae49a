//! Contains the Event Store abstractions and the [`std::collections::HashMap`]'s
//! based [`InMemory`] Event Store implementation.
//!
//! An Event Store keeps many Event Streams side by side, each identified by
//! a unique Stream identifier. Writes to a stream never affect the content
//! or the order of any other stream.
//!
//! The contract assumes a single writer per Event Stream: the optimistic
//! [version check][version::Check] detects a second writer, but nothing
//! here coordinates concurrent appends.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{event, message, version};

/// Interface used to stream [Persisted][event::Persisted] Domain Events
/// from an Event Store to an application.
pub trait Streamer<StreamId, Event>: Send + Sync
where
    StreamId: Send + Sync,
    Event: message::Message + Send + Sync,
{
    /// The error type returned by the Store during a [`stream`] call.
    ///
    /// [`stream`]: Streamer::stream
    type Error: Send + Sync;

    /// Opens an Event Stream, effectively streaming all Domain Events
    /// of an Event Stream back in the application.
    ///
    /// Opening a stream that has never been written to is not an error:
    /// the resulting stream is simply empty.
    fn stream(
        &self,
        id: &StreamId,
        select: event::VersionSelect,
    ) -> event::Stream<'_, StreamId, Event, Self::Error>;
}

/// All possible error types returned by [`Appender::append`].
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    /// Error returned when [`Appender::append`] encounters a conflict error
    /// while appending the new Domain Events.
    #[error("failed to append new domain events: {0}")]
    Conflict(#[from] version::ConflictError),
    /// Error returned when the [Appender] implementation has encountered an error.
    #[error("failed to append new domain events, an error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Interface used to append new Domain Events in an Event Store.
pub trait Appender<StreamId, Event>: Send + Sync
where
    StreamId: Send + Sync,
    Event: message::Message + Send + Sync,
{
    /// Appends new Domain Events to the specified Event Stream, in the
    /// order they are provided, creating the stream if it does not exist yet.
    ///
    /// The result of this operation is the new [Version][version::Version]
    /// of the Event Stream with the specified Domain Events added to it.
    ///
    /// # Errors
    ///
    /// Returns [`AppendError::Conflict`] if `version_check` does not match
    /// the current version of the Event Stream.
    fn append(
        &self,
        id: StreamId,
        version_check: version::Check,
        events: Vec<Event>,
    ) -> Result<version::Version, AppendError>;
}

/// An Event Store, used to store Domain Events in Event Streams -- a stream
/// of Domain Events -- and retrieve them.
///
/// Each Event Stream is represented by a unique Stream identifier.
pub trait Store<StreamId, Event>:
    Streamer<StreamId, Event> + Appender<StreamId, Event> + Send + Sync
where
    StreamId: Send + Sync,
    Event: message::Message + Send + Sync,
{
}

impl<T, StreamId, Event> Store<StreamId, Event> for T
where
    T: Streamer<StreamId, Event> + Appender<StreamId, Event> + Send + Sync,
    StreamId: Send + Sync,
    Event: message::Message + Send + Sync,
{
}

#[derive(Debug)]
struct InMemoryBackend<Id, Evt>
where
    Evt: message::Message,
{
    event_streams: HashMap<Id, Vec<event::Persisted<Id, Evt>>>,
}

impl<Id, Evt> Default for InMemoryBackend<Id, Evt>
where
    Evt: message::Message,
{
    fn default() -> Self {
        Self {
            event_streams: HashMap::default(),
        }
    }
}

/// In-memory implementation of [`Store`] trait,
/// backed by a thread-safe [`std::collections::HashMap`].
///
/// Clones share the same Event Streams.
#[derive(Debug, Clone)]
pub struct InMemory<Id, Evt>
where
    Evt: message::Message,
{
    backend: Arc<RwLock<InMemoryBackend<Id, Evt>>>,
}

impl<Id, Evt> Default for InMemory<Id, Evt>
where
    Evt: message::Message,
{
    fn default() -> Self {
        Self {
            backend: Arc::default(),
        }
    }
}

impl<Id, Evt> Streamer<Id, Evt> for InMemory<Id, Evt>
where
    Id: Clone + Eq + Hash + Send + Sync,
    Evt: message::Message + Clone + Send + Sync,
{
    type Error = Infallible;

    fn stream(
        &self,
        id: &Id,
        select: event::VersionSelect,
    ) -> event::Stream<'_, Id, Evt, Self::Error> {
        let events = self
            .backend
            .read()
            .event_streams
            .get(id)
            .cloned()
            // NOTE: the new Vec is empty, so there will be no memory allocation!
            .unwrap_or_default()
            .into_iter()
            .filter(move |evt| match select {
                event::VersionSelect::All => true,
                event::VersionSelect::From(v) => evt.version >= v,
            });

        Box::new(events.map(Ok))
    }
}

impl<Id, Evt> Appender<Id, Evt> for InMemory<Id, Evt>
where
    Id: Clone + Eq + Hash + Send + Sync,
    Evt: message::Message + Clone + Send + Sync,
{
    fn append(
        &self,
        id: Id,
        version_check: version::Check,
        events: Vec<Evt>,
    ) -> Result<version::Version, AppendError> {
        let mut backend = self.backend.write();

        let last_event_stream_version = backend
            .event_streams
            .get(&id)
            .and_then(|events| events.last())
            .map(|event| event.version)
            .unwrap_or_default();

        if let version::Check::MustBe(expected) = version_check {
            if last_event_stream_version != expected {
                return Err(AppendError::Conflict(version::ConflictError {
                    expected,
                    actual: last_event_stream_version,
                }));
            }
        }

        let mut persisted_events: Vec<event::Persisted<Id, Evt>> = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| event::Persisted {
                stream_id: id.clone(),
                version: last_event_stream_version + (i as version::Version) + 1,
                event,
            })
            .collect();

        let new_last_event_stream_version = persisted_events
            .last()
            .map_or(last_event_stream_version, |evt| evt.version);

        backend
            .event_streams
            .entry(id)
            .and_modify(|events| events.append(&mut persisted_events))
            .or_insert_with(|| persisted_events);

        Ok(new_last_event_stream_version)
    }
}

/// Decorator type for a [`Store`] implementation that tracks the list of
/// recorded Domain Events through it.
///
/// Useful for testing purposes, i.e. asserting that Domain Events written through
/// this Event Store instance are the ones expected.
#[derive(Debug, Clone)]
pub struct Tracking<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Send + Sync,
    Event: message::Message + Send + Sync,
{
    store: T,

    #[allow(clippy::type_complexity)] // It is a complex type but still readable.
    events: Arc<RwLock<Vec<event::Persisted<StreamId, Event>>>>,
}

impl<T, StreamId, Event> Tracking<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Clone + Send + Sync,
    Event: message::Message + Clone + Send + Sync,
{
    /// Returns the list of recorded Domain Events through this decorator so far.
    pub fn recorded_events(&self) -> Vec<event::Persisted<StreamId, Event>> {
        self.events.read().clone()
    }

    /// Resets the list of recorded Domain Events through this decorator.
    pub fn reset_recorded_events(&self) {
        self.events.write().clear();
    }
}

impl<T, StreamId, Event> Streamer<StreamId, Event> for Tracking<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Clone + Send + Sync,
    Event: message::Message + Clone + Send + Sync,
{
    type Error = <T as Streamer<StreamId, Event>>::Error;

    fn stream(
        &self,
        id: &StreamId,
        select: event::VersionSelect,
    ) -> event::Stream<'_, StreamId, Event, Self::Error> {
        self.store.stream(id, select)
    }
}

impl<T, StreamId, Event> Appender<StreamId, Event> for Tracking<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Clone + Send + Sync,
    Event: message::Message + Clone + Send + Sync,
{
    fn append(
        &self,
        id: StreamId,
        version_check: version::Check,
        events: Vec<Event>,
    ) -> Result<version::Version, AppendError> {
        let new_version = self
            .store
            .append(id.clone(), version_check, events.clone())?;

        let events_size = events.len();
        let previous_version = new_version - (events_size as version::Version);

        let mut persisted_events = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| event::Persisted {
                stream_id: id.clone(),
                version: previous_version + (i as version::Version) + 1,
                event,
            })
            .collect();

        self.events.write().append(&mut persisted_events);

        Ok(new_version)
    }
}

/// Extension trait with the everyday operations on an Event Store,
/// built on top of [`Streamer`] and [`Appender`].
pub trait EventStoreExt<StreamId, Event>: Store<StreamId, Event> + Sized
where
    StreamId: Clone + Send + Sync,
    Event: message::Message + Clone + Send + Sync,
{
    /// Appends one Domain Event at the end of the Event Stream,
    /// with no version expectation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying [`Appender`] fails.
    fn write(&self, id: StreamId, event: Event) -> Result<version::Version, AppendError> {
        self.append(id, version::Check::Any, vec![event])
    }

    /// Appends all the Domain Events at the end of the Event Stream, in order,
    /// with no version expectation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying [`Appender`] fails.
    fn write_all(&self, id: StreamId, events: Vec<Event>) -> Result<version::Version, AppendError> {
        self.append(id, version::Check::Any, events)
    }

    /// Returns all the Domain Events of the Event Stream, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying [`Streamer`] fails.
    fn read_all(
        &self,
        id: &StreamId,
    ) -> Result<Vec<Event>, <Self as Streamer<StreamId, Event>>::Error> {
        self.stream(id, event::VersionSelect::All)
            .map(|persisted| persisted.map(|persisted| persisted.event))
            .collect()
    }

    /// Returns the last Domain Event of the Event Stream, or `None`
    /// if nothing has been written to it yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying [`Streamer`] fails.
    fn read_last(
        &self,
        id: &StreamId,
    ) -> Result<Option<Event>, <Self as Streamer<StreamId, Event>>::Error> {
        self.stream(id, event::VersionSelect::All)
            .last()
            .transpose()
            .map(|persisted| persisted.map(|persisted| persisted.event))
    }

    /// Returns a [`Tracking`] instance that decorates the original [`Store`]
    /// instance this method has been called on.
    fn with_recorded_events_tracking(self) -> Tracking<Self, StreamId, Event> {
        Tracking {
            store: self,
            events: Arc::default(),
        }
    }
}

impl<T, StreamId, Event> EventStoreExt<StreamId, Event> for T
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Clone + Send + Sync,
    Event: message::Message + Clone + Send + Sync,
{
}
