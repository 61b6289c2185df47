use std::sync::OnceLock;

use regex::Regex;

/// The delimiter run of a fence line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    /// '`' or '~'.
    pub ch: char,
    /// Length of the run, at least [`FenceSig::MIN_LEN`].
    pub len: usize,
}

impl FenceSig {
    pub const MIN_LEN: usize = 3;
    pub const MAX_INDENT: usize = 3;

    /// Whether a fence opened with `self` is closed by `closer`.
    pub fn closed_by(self, closer: FenceSig) -> bool {
        closer.ch == self.ch && closer.len >= self.len
    }
}

/// Local facts about one line of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Anything that is not a fence line.
    Text,
    /// A bare fence run; opens a code block or closes the open fence.
    Fence(FenceSig),
    /// A fence with an info string that is not a directive, e.g. ```` ```rust ````.
    CodeOpen(FenceSig),
    /// A fence whose info string is `{name}`, optionally followed by an argument.
    DirectiveOpen {
        sig: FenceSig,
        name: &'a str,
        argument: Option<&'a str>,
    },
}

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\{([A-Za-z][A-Za-z0-9_-]*)\}(?:\s+(.*))?$").expect("Invalid directive regex")
    })
}

/// Classifies a single line without looking at its neighbours.
pub fn classify(line: &str) -> LineClass<'_> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > FenceSig::MAX_INDENT {
        return LineClass::Text;
    }
    let rest = &line[indent..];
    let Some(ch) = rest.chars().next().filter(|c| matches!(c, '`' | '~')) else {
        return LineClass::Text;
    };
    let len = rest.chars().take_while(|c| *c == ch).count();
    if len < FenceSig::MIN_LEN {
        return LineClass::Text;
    }
    let sig = FenceSig { ch, len };
    // `ch` is ASCII, so `len` chars are `len` bytes.
    let info = rest[len..].trim();

    if info.is_empty() {
        return LineClass::Fence(sig);
    }
    match directive_regex().captures(info) {
        Some(caps) => LineClass::DirectiveOpen {
            sig,
            name: caps.get(1).map_or("", |m| m.as_str()),
            argument: caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|a| !a.is_empty()),
        },
        None => LineClass::CodeOpen(sig),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BACKTICKS: FenceSig = FenceSig { ch: '`', len: 3 };

    #[test]
    fn plain_text() {
        assert_eq!(classify("hello"), LineClass::Text);
        assert_eq!(classify("``not a fence"), LineClass::Text);
        assert_eq!(classify("    ```"), LineClass::Text);
    }

    #[test]
    fn bare_fences() {
        assert_eq!(classify("```"), LineClass::Fence(BACKTICKS));
        assert_eq!(
            classify("  ~~~~  "),
            LineClass::Fence(FenceSig { ch: '~', len: 4 })
        );
    }

    #[test]
    fn code_fence_with_language() {
        assert_eq!(classify("```rust"), LineClass::CodeOpen(BACKTICKS));
    }

    #[test]
    fn directive_without_argument() {
        assert_eq!(
            classify("```{panels}"),
            LineClass::DirectiveOpen {
                sig: BACKTICKS,
                name: "panels",
                argument: None,
            }
        );
    }

    #[test]
    fn directive_with_argument() {
        assert_eq!(
            classify("````{link-button} https://example.com  "),
            LineClass::DirectiveOpen {
                sig: FenceSig { ch: '`', len: 4 },
                name: "link-button",
                argument: Some("https://example.com"),
            }
        );
    }

    #[test]
    fn malformed_directive_is_code() {
        assert_eq!(classify("```{panels"), LineClass::CodeOpen(BACKTICKS));
        assert_eq!(classify("```{}"), LineClass::CodeOpen(BACKTICKS));
    }

    #[test]
    fn closing_rules() {
        assert!(BACKTICKS.closed_by(FenceSig { ch: '`', len: 5 }));
        assert!(!BACKTICKS.closed_by(FenceSig { ch: '~', len: 3 }));
        assert!(!FenceSig { ch: '`', len: 4 }.closed_by(BACKTICKS));
    }
}
