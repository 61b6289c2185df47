//! Bootstrap badges: ```` ```{badge} text, badge-primary ```` and
//! ```` ```{link-badge} url, text, ref, badge-info ````.
//!
//! Both take their settings from one `parse_args` argument. Positional
//! values fill the slots in order; a keyword of the same name overrides the
//! positional value.

use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::{ArgValue, Kwargs, class_tokens, parse_args};

use super::link_button::link_href;
use super::{ArgumentSpec, Directive, DirectiveError, Invocation};

/// Parsed badge arguments, by slot name.
struct Slots {
    values: Kwargs,
}

impl Slots {
    /// Maps the positional values of `argument` onto `names` and merges the
    /// keywords. Unknown keywords and surplus positionals are errors.
    fn parse(
        directive: &str,
        invocation: &Invocation<'_>,
        names: &[&str],
    ) -> Result<Self, DirectiveError> {
        let invalid = |reason: String| DirectiveError::InvalidArgument {
            directive: directive.to_string(),
            reason,
            line: invocation.line,
        };

        let (args, kwargs) = parse_args(invocation.argument.unwrap_or_default());
        if args.len() > names.len() {
            return Err(invalid(format!(
                "expected at most {} values, got {}",
                names.len(),
                args.len()
            )));
        }
        let mut values: Kwargs = names
            .iter()
            .zip(args)
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        for (key, value) in kwargs {
            if !names.contains(&key.as_str()) {
                return Err(invalid(format!("unknown keyword `{key}`")));
            }
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(ArgValue::to_string)
    }
}

/// An inline label: `<span class="badge …">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeDirective;

impl Directive for BadgeDirective {
    fn name(&self) -> &'static str {
        "badge"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Required
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        _parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let slots = Slots::parse(self.name(), invocation, &["text", "cls"])?;
        let Some(text) = slots.get("text") else {
            return Err(DirectiveError::InvalidArgument {
                directive: self.name().to_string(),
                reason: "missing badge text".to_string(),
                line: invocation.line,
            });
        };
        Ok(vec![
            Element::new("span")
                .with_class("badge")
                .with_classes(class_tokens(&slots.get("cls").unwrap_or_default()))
                .with_child(Node::text(text))
                .into(),
        ])
    }
}

/// A badge that links to a URL or, with type `ref`, a document anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkBadgeDirective;

impl Directive for LinkBadgeDirective {
    fn name(&self) -> &'static str {
        "link-badge"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Required
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        _parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let slots = Slots::parse(
            self.name(),
            invocation,
            &["link", "text", "type", "cls", "tooltip"],
        )?;
        let Some(link) = slots.get("link") else {
            return Err(DirectiveError::InvalidArgument {
                directive: self.name().to_string(),
                reason: "missing link".to_string(),
                line: invocation.line,
            });
        };
        let reference = match slots.get("type").as_deref() {
            None | Some("url") => false,
            Some("ref") => true,
            Some(other) => {
                return Err(DirectiveError::InvalidArgument {
                    directive: self.name().to_string(),
                    reason: format!("type must be `url` or `ref`, got `{other}`"),
                    line: invocation.line,
                });
            }
        };

        let label = slots.get("text").unwrap_or_else(|| link.clone());
        let mut text = Element::new("span").with_child(Node::text(label));
        if reference {
            text = text.with_classes(["xref", "any"]);
        }
        let mut badge = Element::new("a")
            .with_classes(["sphinx-bs", "badge"])
            .with_classes(class_tokens(&slots.get("cls").unwrap_or_default()))
            .with_attr("href", link_href(self.name(), invocation.line, &link, reference)?);
        if let Some(tooltip) = slots.get("tooltip") {
            badge = badge.with_attr("title", tooltip);
        }
        Ok(vec![badge.with_child(text).into()])
    }
}
