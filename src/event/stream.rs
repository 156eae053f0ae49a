//! A single, ungrouped Event Stream kept in memory.
//!
//! Use an [`EventStream`] when a projection owns the whole log it reads
//! from, e.g. the points of a single [Set][crate::set::Set]. When many
//! streams have to live side by side, use an [Event Store][super::store]
//! instead.

/// An ordered, append-only sequence of Domain Events.
///
/// Events can only be added at the end of the stream: they are never
/// edited, removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStream<Evt> {
    events: Vec<Evt>,
}

impl<Evt> Default for EventStream<Evt> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<Evt> From<Vec<Evt>> for EventStream<Evt> {
    fn from(events: Vec<Evt>) -> Self {
        Self { events }
    }
}

impl<Evt> EventStream<Evt> {
    /// Appends a new Domain Event at the end of the stream.
    pub fn write(&mut self, event: Evt) {
        self.events.push(event);
    }

    /// Appends all the Domain Events, in the order they are provided.
    pub fn write_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = Evt>,
    {
        self.events.extend(events);
    }

    /// Returns all the Domain Events in the stream, in the order they were written.
    pub fn read_all(&self) -> &[Evt] {
        &self.events
    }

    /// Returns the most recently written Domain Event, or `None` if the stream is empty.
    pub fn read_last(&self) -> Option<&Evt> {
        self.events.last()
    }

    /// Number of Domain Events written to the stream so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been written to the stream yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::message::tests::StringMessage;

    #[test]
    fn it_preserves_the_write_order() {
        let mut stream = EventStream::default();

        stream.write(StringMessage("event-1"));
        stream.write_all(vec![StringMessage("event-2"), StringMessage("event-3")]);

        assert_eq!(
            &[
                StringMessage("event-1"),
                StringMessage("event-2"),
                StringMessage("event-3")
            ],
            stream.read_all()
        );
        assert_eq!(Some(&StringMessage("event-3")), stream.read_last());
    }

    #[test]
    fn read_last_on_an_empty_stream_is_none() {
        let stream = EventStream::<StringMessage>::default();

        assert!(stream.is_empty());
        assert_eq!(None, stream.read_last());
    }
}
