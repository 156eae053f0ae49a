//! Module containing some extension traits to support code instrumentation
//! using the `tracing` crate.

use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::instrument;

use crate::event::store::{AppendError, Appender, Store, Streamer};
use crate::version::{self, Version};
use crate::{event, message};

/// [`Store`] type wrapper that provides instrumentation
/// features through the `tracing` crate.
#[derive(Debug, Clone)]
pub struct InstrumentedEventStore<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Debug + Send + Sync,
    Event: message::Message + Debug + Send + Sync,
{
    store: T,
    stream_id: PhantomData<StreamId>,
    event: PhantomData<Event>,
}

impl<T, StreamId, Event> Streamer<StreamId, Event> for InstrumentedEventStore<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Debug + Send + Sync,
    Event: message::Message + Debug + Send + Sync,
{
    type Error = <T as Streamer<StreamId, Event>>::Error;

    #[instrument(name = "event::Store.stream", skip(self))]
    fn stream(
        &self,
        id: &StreamId,
        select: event::VersionSelect,
    ) -> event::Stream<'_, StreamId, Event, Self::Error> {
        self.store.stream(id, select)
    }
}

impl<T, StreamId, Event> Appender<StreamId, Event> for InstrumentedEventStore<T, StreamId, Event>
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Debug + Send + Sync,
    Event: message::Message + Debug + Send + Sync,
{
    #[instrument(name = "event::Store.append", ret, err, skip(self))]
    fn append(
        &self,
        id: StreamId,
        version_check: version::Check,
        events: Vec<Event>,
    ) -> Result<Version, AppendError> {
        self.store.append(id, version_check, events)
    }
}

/// Extension trait for any [`Store`] type to provide
/// instrumentation features through the `tracing` crate.
pub trait EventStoreExt<StreamId, Event>: Store<StreamId, Event> + Sized
where
    StreamId: Debug + Send + Sync,
    Event: message::Message + Debug + Send + Sync,
{
    /// Returns an instrumented version of the [`Store`] instance.
    fn with_tracing(self) -> InstrumentedEventStore<Self, StreamId, Event> {
        InstrumentedEventStore {
            store: self,
            stream_id: PhantomData,
            event: PhantomData,
        }
    }
}

impl<T, StreamId, Event> EventStoreExt<StreamId, Event> for T
where
    T: Store<StreamId, Event> + Send + Sync,
    StreamId: Debug + Send + Sync,
    Event: message::Message + Debug + Send + Sync,
{
}
