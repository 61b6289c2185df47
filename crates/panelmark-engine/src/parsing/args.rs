//! Comma-separated argument strings such as `save, size=2, classes="a b"`.
//!
//! Positional and keyword arguments are collected independently. Quoting is
//! only understood well enough to keep commas inside `"..."` together;
//! a value whose quotes never close is kept verbatim, quotes included.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

pub type Kwargs = BTreeMap<String, ArgValue>;

fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_-]*)\s*=(.*)$").expect("Invalid keyword regex")
    })
}

/// Parses `s` into positional and keyword arguments.
pub fn parse_args(s: &str) -> (Vec<ArgValue>, Kwargs) {
    let mut args = Vec::new();
    let mut kwargs = Kwargs::new();

    for token in tokens(s) {
        if token.trim().is_empty() {
            continue;
        }
        match keyword_regex().captures(&token) {
            Some(caps) => {
                kwargs.insert(caps[1].to_string(), coerce(&caps[2]));
            }
            None => args.push(coerce(&token)),
        }
    }

    (args, kwargs)
}

/// Splits on commas, gluing a segment to the next one while it holds an
/// odd number of quote characters.
fn tokens(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<String> = None;

    for segment in s.split(',') {
        let token = match current.take() {
            Some(mut open) => {
                open.push(',');
                open.push_str(segment);
                open
            }
            None => segment.to_string(),
        };
        if token.matches('"').count() % 2 == 1 {
            current = Some(token);
        } else {
            out.push(token);
        }
    }
    // Unterminated quote: keep what we have.
    out.extend(current);
    out
}

fn coerce(raw: &str) -> ArgValue {
    let value = raw.trim();
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|inner| !inner.contains('"'))
    {
        return ArgValue::Str(inner.to_string());
    }
    match value.parse::<i64>() {
        Ok(n) => ArgValue::Int(n),
        Err(_) => ArgValue::Str(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kw(pairs: &[(&str, ArgValue)]) -> Kwargs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[rstest]
    #[case("", vec![], kw(&[]))]
    #[case("a", vec!["a".into()], kw(&[]))]
    #[case("a,b", vec!["a".into(), "b".into()], kw(&[]))]
    #[case("a,1", vec!["a".into(), ArgValue::Int(1)], kw(&[]))]
    #[case("1,a", vec![ArgValue::Int(1), "a".into()], kw(&[]))]
    #[case("a,b=1", vec!["a".into()], kw(&[("b", ArgValue::Int(1))]))]
    #[case(r#"a,b="1""#, vec!["a".into()], kw(&[("b", "1".into())]))]
    #[case(r#"a , b = "1,2" "#, vec!["a".into()], kw(&[("b", "1,2".into())]))]
    #[case(
        r#"a , b = "1,2", sdf=4 "#,
        vec!["a".into()],
        kw(&[("b", "1,2".into()), ("sdf", ArgValue::Int(4))])
    )]
    // An unterminated quote survives into the value.
    #[case(r#"a,b=""""#, vec!["a".into()], kw(&[("b", r#"""""#.into())]))]
    fn parses_argument_strings(
        #[case] input: &str,
        #[case] args: Vec<ArgValue>,
        #[case] kwargs: Kwargs,
    ) {
        assert_eq!(parse_args(input), (args, kwargs));
    }

    #[test]
    fn blank_tokens_are_skipped() {
        assert_eq!(
            parse_args(" a, ,b,"),
            (vec![ArgValue::from("a"), ArgValue::from("b")], Kwargs::new())
        );
    }

    #[test]
    fn later_keyword_wins() {
        let (_, kwargs) = parse_args("size=1, size=3");
        assert_eq!(kwargs["size"], ArgValue::Int(3));
    }

    #[test]
    fn quoted_positional_keeps_commas_and_equals() {
        let (args, kwargs) = parse_args(r#""x=1, y", 2"#);
        assert_eq!(args, vec!["x=1, y".into(), ArgValue::Int(2)]);
        assert!(kwargs.is_empty());
    }

    #[test]
    fn negative_numbers_are_ints() {
        assert_eq!(parse_args("-3").0, vec![ArgValue::Int(-3)]);
    }

    #[test]
    fn quoted_number_stays_a_string() {
        assert_eq!(parse_args(r#""7""#).0, vec![ArgValue::Str("7".into())]);
    }

    #[test]
    fn values_display_as_written() {
        assert_eq!(ArgValue::Int(2).to_string(), "2");
        assert_eq!(ArgValue::from("x").to_string(), "x");
    }
}
