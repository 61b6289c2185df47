use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::{ArgValue, class_tokens, parse_args};

use super::{ArgumentSpec, Directive, DirectiveError, Invocation};

const DEFAULT_PREFIX: &str = "fa";

/// An icon-font glyph: ```` ```{icon} name, size=2, prefix=fas ````.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconDirective;

impl IconDirective {
    fn invalid(&self, invocation: &Invocation<'_>, reason: String) -> DirectiveError {
        DirectiveError::InvalidArgument {
            directive: self.name().to_string(),
            reason,
            line: invocation.line,
        }
    }
}

impl Directive for IconDirective {
    fn name(&self) -> &'static str {
        "icon"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Required
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        _parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let (args, kwargs) = parse_args(invocation.argument.unwrap_or_default());
        let Some(name) = args.first() else {
            return Err(self.invalid(invocation, "missing icon name".to_string()));
        };
        if args.len() > 1 {
            log::warn!(
                "line {}: icon takes one name, ignoring {} extra arguments",
                invocation.line,
                args.len() - 1
            );
        }

        let prefix = kwargs
            .get("prefix")
            .map(ArgValue::to_string)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let mut classes = vec![prefix, format!("fa-{name}")];

        for (key, value) in &kwargs {
            match (key.as_str(), value) {
                ("prefix", _) => {}
                ("size", ArgValue::Int(n)) => classes.push(format!("fa-{n}x")),
                ("size", ArgValue::Str(s)) => {
                    return Err(self.invalid(invocation, format!("size must be an integer, got `{s}`")));
                }
                ("classes", value) => classes.extend(class_tokens(&value.to_string())),
                (other, _) => {
                    return Err(self.invalid(invocation, format!("unknown keyword `{other}`")));
                }
            }
        }

        Ok(vec![
            Element::new("span")
                .with_classes(classes)
                .with_attr("aria-hidden", "true")
                .into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentParser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(argument: &str) -> Result<String, DirectiveError> {
        DocumentParser::default().render(&format!("```{{icon}} {argument}\n```"))
    }

    #[rstest]
    #[case("home", "fa fa-home")]
    #[case("home, size=2", "fa fa-home fa-2x")]
    #[case("github, prefix=fab", "fab fa-github")]
    #[case(r#"spinner, classes="fa-spin text-info", size=3"#, "fa fa-spinner fa-spin text-info fa-3x")]
    fn icon_classes(#[case] argument: &str, #[case] classes: &str) {
        assert_eq!(
            render(argument).unwrap(),
            format!("<span class=\"{classes}\" aria-hidden=\"true\"></span>")
        );
    }

    #[rstest]
    #[case("size=2")]
    #[case("home, size=big")]
    #[case("home, colour=red")]
    fn invalid_arguments(#[case] argument: &str) {
        let err = render(argument).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidArgument { line: 1, .. }));
    }

    #[test]
    fn requires_argument() {
        assert!(matches!(
            DocumentParser::default().render("```{icon}\n```"),
            Err(DirectiveError::MissingArgument { .. })
        ));
    }
}
