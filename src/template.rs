//! Prompt template interpolation
//!
//! A deliberately small engine: one pass over the template, a fixed set of
//! recognized placeholder names, and no re-expansion of substituted text, so
//! a question that itself contains placeholder syntax is inserted literally.

/// Placeholder syntax is `${name}` over this enumerated set
pub const PLACEHOLDER_NAMES: [&str; 3] = ["webpage_url", "question", "text_selection_context"];

/// Values substituted into a prompt template
///
/// A field left at its default (empty string) substitutes as the empty
/// string; there is no "missing binding" error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    /// Replaces `${webpage_url}`
    pub webpage_url: String,

    /// Replaces `${question}`
    pub question: String,

    /// Replaces `${text_selection_context}`
    pub text_selection_context: String,
}

impl Bindings {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "webpage_url" => Some(&self.webpage_url),
            "question" => Some(&self.question),
            "text_selection_context" => Some(&self.text_selection_context),
            _ => None,
        }
    }
}

/// Substitute every recognized `${name}` occurrence in `template`
///
/// Unknown placeholders and unterminated `${` tokens are emitted literally.
/// Substituted values are appended to the output and never re-scanned.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match bindings.lookup(name) {
                    Some(value) => out.push_str(value),
                    // Unknown placeholder: keep the token as-is.
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                // No closing brace; the remainder is literal text.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
