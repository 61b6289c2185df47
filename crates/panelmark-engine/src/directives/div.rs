use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::class_tokens;

use super::{ArgumentSpec, Directive, DirectiveError, Invocation};

/// A plain `div` around nested content; the argument is its class list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivDirective;

impl Directive for DivDirective {
    fn name(&self) -> &'static str {
        "div"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Optional
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let classes = class_tokens(invocation.argument.unwrap_or_default());
        let children = parser.nested_parse(invocation.content, invocation.content_offset)?;
        Ok(vec![Element::container(classes).with_children(children).into()])
    }
}
