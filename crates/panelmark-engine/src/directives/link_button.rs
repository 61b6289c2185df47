use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::class_tokens;

use super::{ArgumentSpec, Directive, DirectiveError, Invocation, OptionKind};

/// The `href` for `uri`. References become fragment links to the
/// percent-decoded target.
pub(super) fn link_href(
    directive: &str,
    line: usize,
    uri: &str,
    reference: bool,
) -> Result<String, DirectiveError> {
    if !reference {
        return Ok(uri.to_string());
    }
    let target = urlencoding::decode(uri).map_err(|e| DirectiveError::InvalidArgument {
        directive: directive.to_string(),
        reason: format!("cannot decode `{uri}`: {e}"),
        line,
    })?;
    Ok(format!("#{target}"))
}

/// A link styled as a button.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkButtonDirective;

impl Directive for LinkButtonDirective {
    fn name(&self) -> &'static str {
        "link-button"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Required
    }

    fn options(&self) -> &'static [(&'static str, OptionKind)] {
        &[
            ("type", OptionKind::Choice(&["url", "ref"])),
            ("text", OptionKind::Text),
            ("tooltip", OptionKind::Text),
            ("classes", OptionKind::Text),
        ]
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        _parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let options = &invocation.options;
        let uri = invocation.argument.unwrap_or_default();
        if !invocation.content.iter().all(|l| l.trim().is_empty()) {
            log::warn!(
                "line {}: link-button takes no content, ignoring {} lines",
                invocation.line,
                invocation.content.len()
            );
        }

        let reference = options.get("type") == Some("ref");
        let mut inner = Element::new("span").with_child(Node::text(options.get("text").unwrap_or(uri)));
        if reference {
            inner = inner.with_classes(["xref", "any"]);
        }
        let href = link_href(self.name(), invocation.line, uri, reference)?;

        let mut link = Element::new("a")
            .with_classes(["sphinx-bs", "btn", "text-wrap"])
            .with_classes(class_tokens(options.get("classes").unwrap_or_default()))
            .with_attr("href", href);
        if let Some(tooltip) = options.get("tooltip") {
            link = link.with_attr("title", tooltip);
        }
        Ok(vec![Element::new("p").with_child(link.with_child(inner)).into()])
    }
}
