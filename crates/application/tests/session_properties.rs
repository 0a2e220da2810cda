//! Property-based tests for the session text store

use application::SessionRegistry;
use domain::SessionId;
use proptest::prelude::*;

proptest! {
    /// Whatever is written is read back verbatim, including empty and
    /// arbitrary Unicode strings.
    #[test]
    fn set_then_get_returns_written_text(text in "\\PC*") {
        let registry = SessionRegistry::new();
        let id = SessionId::new();

        registry.set_text(id, text.clone());
        prop_assert_eq!(registry.text(id), text);
    }

    /// A later write fully replaces the earlier one regardless of either
    /// value - last-write-wins, never an append or merge.
    #[test]
    fn later_write_wins(first in "\\PC*", second in "\\PC*") {
        let registry = SessionRegistry::new();
        let id = SessionId::new();

        registry.set_text(id, first);
        registry.set_text(id, second.clone());
        prop_assert_eq!(registry.text(id), second);
    }

    /// Writes to one session never leak into another.
    #[test]
    fn sessions_do_not_interfere(a_text in "\\PC*", b_text in "\\PC*") {
        let registry = SessionRegistry::new();
        let a = SessionId::new();
        let b = SessionId::new();

        registry.set_text(a, a_text.clone());
        registry.set_text(b, b_text.clone());

        prop_assert_eq!(registry.text(a), a_text);
        prop_assert_eq!(registry.text(b), b_text);
    }

    /// Ending a session drops its text; the next touch starts empty.
    #[test]
    fn ended_session_restarts_empty(text in "\\PC+") {
        let registry = SessionRegistry::new();
        let id = SessionId::new();

        registry.set_text(id, text);
        registry.end(id);
        prop_assert_eq!(registry.text(id), "");
    }
}
