use std::sync::OnceLock;

use regex::Regex;

use super::classes::ClassTarget;

/// Key of a per-panel option line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Class(ClassTarget),
    ImgTop,
    ImgBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOp {
    /// `=`: replace the class list.
    Assign,
    /// `+=`: extend the class list.
    Append,
}

/// A matched option line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionLine<'a> {
    pub key: OptionKey,
    pub op: OptionOp,
    pub value: &'a str,
}

const KEYS: &str = "column|card|body|header|footer|img-top|img-bottom|img-top-cls|img-bottom-cls";

fn assign_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^({KEYS})\s*(\+?=)\s*(.*)$")).expect("Invalid option regex")
    })
}

fn field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^:({KEYS}):\s*(\+?)\s*(.*)$")).expect("Invalid option regex")
    })
}

fn key_from_name(name: &str) -> Option<OptionKey> {
    match name {
        "img-top" => Some(OptionKey::ImgTop),
        "img-bottom" => Some(OptionKey::ImgBottom),
        other => ClassTarget::from_name(other).map(OptionKey::Class),
    }
}

/// Matches `key = value`, `key += value`, `:key: value` or `:key: +value`.
///
/// Returns `None` for anything else, including unknown keys; the caller
/// treats such a line as the start of the panel content.
pub fn parse_option_line(line: &str) -> Option<OptionLine<'_>> {
    let (caps, append) = if let Some(caps) = assign_regex().captures(line) {
        let append = &caps[2] == "+=";
        (caps, append)
    } else {
        let caps = field_regex().captures(line)?;
        let append = &caps[2] == "+";
        (caps, append)
    };

    let key = key_from_name(caps.get(1)?.as_str())?;
    let value = caps.get(3).map_or("", |m| m.as_str()).trim_end();
    Some(OptionLine {
        key,
        op: if append {
            OptionOp::Append
        } else {
            OptionOp::Assign
        },
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("card = shadow", OptionKey::Class(ClassTarget::Card), OptionOp::Assign, "shadow")]
    #[case("card=a b", OptionKey::Class(ClassTarget::Card), OptionOp::Assign, "a b")]
    #[case("column += p-2", OptionKey::Class(ClassTarget::Column), OptionOp::Append, "p-2")]
    #[case("img-top = https://x/y.png", OptionKey::ImgTop, OptionOp::Assign, "https://x/y.png")]
    #[case("img-top-cls = rounded", OptionKey::Class(ClassTarget::ImgTopCls), OptionOp::Assign, "rounded")]
    #[case("img-bottom-cls += b", OptionKey::Class(ClassTarget::ImgBottomCls), OptionOp::Append, "b")]
    #[case(":card: a", OptionKey::Class(ClassTarget::Card), OptionOp::Assign, "a")]
    #[case(":body: + bg-info", OptionKey::Class(ClassTarget::Body), OptionOp::Append, "bg-info")]
    #[case(":img-bottom: pic.jpg", OptionKey::ImgBottom, OptionOp::Assign, "pic.jpg")]
    #[case("footer =", OptionKey::Class(ClassTarget::Footer), OptionOp::Assign, "")]
    fn matches_option_lines(
        #[case] line: &str,
        #[case] key: OptionKey,
        #[case] op: OptionOp,
        #[case] value: &str,
    ) {
        assert_eq!(parse_option_line(line), Some(OptionLine { key, op, value }));
    }

    #[rstest]
    #[case("title = x")]
    #[case("Some text about the card")]
    #[case(" card = indented")]
    #[case(":title: x")]
    #[case("card: x")]
    #[case("")]
    fn rejects_non_option_lines(#[case] line: &str) {
        assert_eq!(parse_option_line(line), None);
    }

    #[test]
    fn trailing_whitespace_is_dropped_from_value() {
        let opt = parse_option_line("img-top = a.png   ").unwrap();
        assert_eq!(opt.value, "a.png");
    }
}
