//! Cross-document text-selection capture
//!
//! The embedding driver reads the platform selection and reports it as a
//! [`RawSelection`], including whether either endpoint falls inside the
//! widget's own isolated subtree. Capture itself is a pure function, so the
//! exclusion and truncation rules are testable without a browser.

use std::time::SystemTime;

/// Hard cap on captured selection text, in characters
pub const MAX_SELECTION_CHARS: usize = 1024;

/// Marker appended when a selection is truncated
pub const TRUNCATION_MARKER: &str = "...";

/// A platform selection as observed by the embedding driver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSelection {
    /// Selected text, as reported by the platform
    pub text: String,

    /// Whether the selection's anchor node lies inside the widget subtree
    pub anchor_in_widget: bool,

    /// Whether the selection's focus node lies inside the widget subtree
    pub focus_in_widget: bool,
}

impl RawSelection {
    /// A selection entirely on the host page
    pub fn on_page(text: impl Into<String>) -> Self {
        Self { text: text.into(), anchor_in_widget: false, focus_in_widget: false }
    }
}

/// Captured page context attached to the next submitted question
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionContext {
    /// Captured text, at most [`MAX_SELECTION_CHARS`] characters plus marker
    pub text: String,

    /// When the capture happened
    pub captured_at: SystemTime,
}

/// Apply the capture rules to a raw selection
///
/// Returns `None` when the trimmed text is empty or when either endpoint is
/// inside the widget subtree (selecting the widget's own help text must not
/// be treated as page context). Callers keep any previously captured context
/// on `None`.
pub fn capture(raw: &RawSelection) -> Option<SelectionContext> {
    let text = raw.text.trim();
    if text.is_empty() {
        return None;
    }

    if raw.anchor_in_widget || raw.focus_in_widget {
        log::debug!("ignoring selection anchored inside the widget subtree");
        return None;
    }

    let text = if text.chars().count() > MAX_SELECTION_CHARS {
        let truncated: String = text.chars().take(MAX_SELECTION_CHARS).collect();
        format!("{}{}", truncated, TRUNCATION_MARKER)
    } else {
        text.to_string()
    };

    Some(SelectionContext { text, captured_at: SystemTime::now() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_page_selection() {
        let ctx = capture(&RawSelection::on_page("some page text")).unwrap();
        assert_eq!(ctx.text, "some page text");
    }

    #[test]
    fn test_capture_trims_whitespace() {
        let ctx = capture(&RawSelection::on_page("  padded  ")).unwrap();
        assert_eq!(ctx.text, "padded");

        assert!(capture(&RawSelection::on_page("   \n\t ")).is_none());
        assert!(capture(&RawSelection::on_page("")).is_none());
    }

    #[test]
    fn test_capture_rejects_widget_endpoints() {
        let anchor = RawSelection {
            text: "widget help text".to_string(),
            anchor_in_widget: true,
            focus_in_widget: false,
        };
        assert!(capture(&anchor).is_none());

        let focus = RawSelection {
            text: "widget help text".to_string(),
            anchor_in_widget: false,
            focus_in_widget: true,
        };
        assert!(capture(&focus).is_none());
    }

    #[test]
    fn test_truncation_at_cap() {
        let long = "a".repeat(2000);
        let ctx = capture(&RawSelection::on_page(long)).unwrap();

        assert_eq!(ctx.text.len(), MAX_SELECTION_CHARS + TRUNCATION_MARKER.len());
        assert!(ctx.text.ends_with(TRUNCATION_MARKER));
        assert!(ctx.text[..MAX_SELECTION_CHARS].chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_exactly_at_cap_is_verbatim() {
        let exact = "b".repeat(MAX_SELECTION_CHARS);
        let ctx = capture(&RawSelection::on_page(exact.clone())).unwrap();

        assert_eq!(ctx.text, exact);
        assert!(!ctx.text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not be split.
        let long = "é".repeat(MAX_SELECTION_CHARS + 5);
        let ctx = capture(&RawSelection::on_page(long)).unwrap();

        let body = ctx.text.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_SELECTION_CHARS);
    }
}
