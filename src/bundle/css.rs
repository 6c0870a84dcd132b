//! Stylesheet processing for isolated-subtree injection
//!
//! `@property --name { ... initial-value: v; ... }` declarations are not
//! honored inside an isolated styling scope on all engines, so the bundler
//! rewrites them into plain custom-property assignments on a selector that
//! matches both a normal document root and a shadow host.

/// Rewrite `@property` rules that carry an initial value
///
/// Each such rule is removed and its property collected; the collected
/// assignments are prepended as a single `:root, :host` rule. `@property`
/// rules without an initial value are left in place.
pub fn inline_property_rules(css: &str) -> String {
    let mut properties: Vec<(String, String)> = Vec::new();
    let mut out = String::with_capacity(css.len());
    let mut rest = css;

    while let Some(at) = rest.find("@property") {
        out.push_str(&rest[..at]);
        let rule = &rest[at..];

        let Some((name, initial, consumed)) = parse_property_rule(rule) else {
            // Malformed or valueless rule: keep the "@property" text and
            // continue scanning after it.
            out.push_str("@property");
            rest = &rule["@property".len()..];
            continue;
        };

        match initial {
            Some(value) => properties.push((name, value)),
            None => out.push_str(&rule[..consumed]),
        }
        rest = &rule[consumed..];
    }
    out.push_str(rest);

    if properties.is_empty() {
        return out;
    }

    let mut root = String::from(":root, :host {\n");
    for (name, value) in &properties {
        root.push_str(&format!("  {}: {};\n", name, value));
    }
    root.push_str("}\n");
    root.push_str(&out);
    root
}

/// Parse one `@property` rule starting at the beginning of `rule`
///
/// Returns the property name, its `initial-value` declaration if present,
/// and the byte length of the whole rule. `None` when the rule is not well
/// formed (missing braces or a non-custom-property name).
fn parse_property_rule(rule: &str) -> Option<(String, Option<String>, usize)> {
    let open = rule.find('{')?;
    let close = open + rule[open..].find('}')?;

    let name = rule["@property".len()..open].trim();
    if !name.starts_with("--") {
        return None;
    }

    let initial = rule[open + 1..close].split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        (key.trim() == "initial-value").then(|| value.trim().to_string())
    });

    Some((name.to_string(), initial, close + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_property_with_initial_value() {
        let css = "@property --radius {\n  syntax: \"<length>\";\n  inherits: false;\n  initial-value: 0.5rem;\n}\n.card { border-radius: var(--radius); }\n";
        let out = inline_property_rules(css);

        assert!(out.starts_with(":root, :host {\n  --radius: 0.5rem;\n}\n"));
        assert!(!out.contains("@property"));
        assert!(out.contains(".card { border-radius: var(--radius); }"));
    }

    #[test]
    fn test_collects_multiple_properties() {
        let css = concat!(
            "@property --a { initial-value: 1px; syntax: \"<length>\"; }\n",
            "body { margin: 0; }\n",
            "@property --b { syntax: \"*\"; initial-value: red; }\n",
        );
        let out = inline_property_rules(css);

        let root_end = out.find('}').unwrap();
        let root = &out[..root_end];
        assert!(root.contains("--a: 1px;"));
        assert!(root.contains("--b: red;"));
        assert!(out.contains("body { margin: 0; }"));
    }

    #[test]
    fn test_keeps_property_without_initial_value() {
        let css = "@property --free { syntax: \"*\"; inherits: true; }\n";
        let out = inline_property_rules(css);

        assert_eq!(out, css);
    }

    #[test]
    fn test_plain_css_untouched() {
        let css = ":root { --x: 1; }\n.a { color: var(--x); }\n";
        assert_eq!(inline_property_rules(css), css);
    }

    #[test]
    fn test_malformed_rule_kept_literally() {
        let css = "@property --broken without braces";
        let out = inline_property_rules(css);

        assert_eq!(out, css);
    }

    #[test]
    fn test_idempotent_on_rewritten_output() {
        let css = "@property --r { initial-value: 4px; }\n.x { padding: var(--r); }\n";
        let once = inline_property_rules(css);
        let twice = inline_property_rules(&once);

        assert_eq!(once, twice);
    }
}
