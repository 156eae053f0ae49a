//! Contains support for [`Projection`]s: read models obtained by
//! left-folding an ordered sequence of Domain Events.
//!
//! Every scoreboard in this crate is a [`Projection`], which means it can
//! always be recomputed from the Event Stream it was derived from, starting
//! from its [`Default`] (empty) state.

/// A `Projection` is a read model that can be assembled by left-folding
/// its previous state and a number of ordered, consecutive events.
pub trait Projection {
    /// State of the read model. The [`Default`] value represents
    /// the state before any event has been applied.
    type State: Default;

    /// Domain events folded into the [`State`](Projection::State).
    type Event;

    /// Applies a single Domain Event to the current `state`,
    /// returning the next state.
    ///
    /// To enforce immutability, this method takes ownership of the
    /// previous state and returns a new one.
    fn apply(state: Self::State, event: &Self::Event) -> Self::State;

    /// Applies an ordered sequence of events to the provided `state`.
    fn fold<'a, I>(state: Self::State, events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        events.into_iter().fold(state, Self::apply)
    }

    /// Rebuilds the state from scratch, by folding all the events
    /// on top of the [`Default`] state.
    fn replay<'a, I>(events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        Self::fold(Self::State::default(), events)
    }
}
