//! This module contains the definition of a [Message] type, which
//! describes some sort of domain value, such as a
//! [Domain Event][crate::event::Event] recorded during a tennis match.

/// Represents a piece of domain data that occurs in the system.
///
/// Each Message has a specific name to it, which should ideally be
/// unique within the domain you're operating in. Example: the Domain Event
/// recorded when player one wins a point has `name()`: `"PlayerOneScored"`.
pub trait Message {
    /// Returns the domain name of the [Message].
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct StringMessage(pub(crate) &'static str);

    impl Message for StringMessage {
        fn name(&self) -> &'static str {
            "string_payload"
        }
    }

    #[test]
    fn message_name_does_not_depend_on_payload() {
        assert_eq!(StringMessage("a").name(), StringMessage("b").name());
    }
}
