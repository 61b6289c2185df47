use html_escape::encode_double_quoted_attribute;

use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::class_tokens;

use super::{ArgumentSpec, Directive, DirectiveError, Invocation, OptionKind, override_classes};

const ANIMATIONS: &[&str] = &["fade-in", "fade-in-slide-down"];

const ELLIPSIS: &str = concat!(
    "<svg viewBox=\"0 0 36 24\" width=\"36\" height=\"16\" xmlns=\"http://www.w3.org/2000/svg\" class=\"ellipsis\">",
    "<g fill=\"currentColor\">",
    "<circle cx=\"0\" cy=\"12\" r=\"6\"></circle>",
    "<circle cx=\"18\" cy=\"12\" r=\"6\"></circle>",
    "<circle cx=\"36\" cy=\"12\" r=\"6\"></circle>",
    "</g></svg>"
);

/// Chevron pointing down (shown while closed) and up (shown while open).
const POINTS_CLOSED: &str = "6 9 12 15 18 9";
const POINTS_OPEN: &str = "18 15 12 9 6 15";

fn chevron(color: &str, points: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\" \
         stroke=\"{}\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\
         <polyline points=\"{points}\"></polyline></svg>",
        encode_double_quoted_attribute(color)
    )
}

/// Collapsible card built on `<details>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownDirective;

impl Directive for DropdownDirective {
    fn name(&self) -> &'static str {
        "dropdown"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Optional
    }

    fn options(&self) -> &'static [(&'static str, OptionKind)] {
        &[
            ("container", OptionKind::Text),
            ("title", OptionKind::Text),
            ("body", OptionKind::Text),
            ("open", OptionKind::Flag),
            ("marker-color", OptionKind::Text),
            ("name", OptionKind::Text),
            ("animate", OptionKind::Choice(ANIMATIONS)),
        ]
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let options = &invocation.options;
        let classes = |name: &str, default: &str| match options.get(name) {
            Some(value) => override_classes(class_tokens(default), value),
            None => class_tokens(default),
        };

        let mut container = classes("container", "mb-3");
        if let Some(animation) = options.get("animate")
            && !container.iter().any(|c| c == animation)
        {
            container.push(animation.to_string());
        }
        let color = options.get("marker-color").unwrap_or("currentColor");

        let mut summary = Element::new("summary")
            .with_classes(["summary-title", "card-header"])
            .with_classes(classes("title", ""));
        match invocation.argument {
            Some(title) => summary.children.extend(parser.parse_inline(title)),
            None => summary.push(Node::raw(ELLIPSIS)),
        }
        summary.push(
            Element::container(["summary-chevron-up"]).with_child(Node::raw(chevron(color, POINTS_CLOSED))),
        );
        summary.push(
            Element::container(["summary-chevron-down"]).with_child(Node::raw(chevron(color, POINTS_OPEN))),
        );

        let mut body: Node = Element::container(["summary-content", "card-body"])
            .with_classes(classes("body", ""))
            .with_children(parser.nested_parse(invocation.content, invocation.content_offset)?)
            .into();
        body.walk_elements_mut(&mut |el| {
            if el.tag == "p" {
                el.classes.push("card-text".to_string());
            }
        });

        let mut details = Element::new("details")
            .with_classes(["dropdown", "card"])
            .with_classes(container);
        if options.flag("open") {
            details = details.with_flag("open");
        }
        if let Some(id) = options.get("name") {
            details = details.with_attr("id", id);
        }
        Ok(vec![details.with_child(summary).with_child(body).into()])
    }
}
