use crate::host::ListenerSet;
use crate::selection::SelectionContext;

/// Interaction state of the widget
///
/// Owned exclusively by [`WidgetRuntime`](crate::widget::WidgetRuntime) and
/// mutated only through its transition methods. `pinned` and `quote_mode`
/// are sub-flags of the expanded panel; closing always clears `pinned`.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    /// Whether the panel is expanded
    pub open: bool,

    /// Expanded sub-flag: outside clicks and Escape no longer dismiss
    pub pinned: bool,

    /// Expanded sub-flag: a page selection is actively being captured
    pub quote_mode: bool,

    /// Current question input text
    pub question: String,

    /// Captured page selection, if any
    pub selection: Option<SelectionContext>,

    /// Id of the destination service the prompt will be sent to
    pub selected_service: String,
}

impl WidgetState {
    /// Initial collapsed state with the given seeded service id
    pub fn collapsed(selected_service: impl Into<String>) -> Self {
        Self {
            open: false,
            pinned: false,
            quote_mode: false,
            question: String::new(),
            selection: None,
            selected_service: selected_service.into(),
        }
    }

    /// Document listeners this state requires
    pub fn wanted_listeners(&self) -> ListenerSet {
        ListenerSet {
            dismiss: self.open,
            capture: self.quote_mode,
        }
    }

    /// Structural invariant: `pinned` implies `open`
    pub fn is_consistent(&self) -> bool {
        !self.pinned || self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_state() {
        let state = WidgetState::collapsed("chatgpt");

        assert!(!state.open);
        assert!(!state.pinned);
        assert!(!state.quote_mode);
        assert!(state.question.is_empty());
        assert!(state.selection.is_none());
        assert_eq!(state.selected_service, "chatgpt");
        assert!(state.is_consistent());
    }

    #[test]
    fn test_wanted_listeners_follow_flags() {
        let mut state = WidgetState::collapsed("chatgpt");
        assert_eq!(state.wanted_listeners(), ListenerSet::none());

        state.open = true;
        assert_eq!(state.wanted_listeners(), ListenerSet { dismiss: true, capture: false });

        state.quote_mode = true;
        assert_eq!(state.wanted_listeners(), ListenerSet { dismiss: true, capture: true });
    }

    #[test]
    fn test_consistency() {
        let mut state = WidgetState::collapsed("chatgpt");
        assert!(state.is_consistent());

        state.pinned = true;
        assert!(!state.is_consistent());

        state.open = true;
        assert!(state.is_consistent());
    }
}
