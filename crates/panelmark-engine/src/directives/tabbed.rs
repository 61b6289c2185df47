use crate::document::NestedParse;
use crate::nodes::{Element, Node, Tab};
use crate::parsing::class_tokens;

use super::{ArgumentSpec, Directive, DirectiveError, Invocation, OptionKind};

/// One tab of a tab set; the argument is the tab label.
///
/// Consecutive `tabbed` siblings form one set, see [`group_tabs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TabbedDirective;

impl Directive for TabbedDirective {
    fn name(&self) -> &'static str {
        "tabbed"
    }

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::Required
    }

    fn options(&self) -> &'static [(&'static str, OptionKind)] {
        &[
            ("selected", OptionKind::Flag),
            ("new-group", OptionKind::Flag),
            ("class-label", OptionKind::Text),
            ("class-content", OptionKind::Text),
        ]
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        if invocation.content.iter().all(|l| l.trim().is_empty()) {
            return Err(DirectiveError::MissingContent {
                directive: self.name().to_string(),
                line: invocation.line,
            });
        }
        let options = &invocation.options;

        let label = Element::new("label")
            .with_class("tabbed-label")
            .with_classes(class_tokens(options.get("class-label").unwrap_or_default()))
            .with_children(parser.parse_inline(invocation.argument.unwrap_or_default()));
        let content = Element::container(["tabbed-content"])
            .with_classes(class_tokens(options.get("class-content").unwrap_or_default()))
            .with_children(parser.nested_parse(invocation.content, invocation.content_offset)?);

        Ok(vec![
            Tab {
                label,
                content,
                selected: options.flag("selected"),
                new_group: options.flag("new-group"),
                line: invocation.line,
            }
            .into(),
        ])
    }
}

/// Replaces every run of adjacent tabs in `nodes` with a tab set. A tab
/// marked `new-group` always starts a new set.
pub fn group_tabs(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut run: Vec<Tab> = Vec::new();

    for node in nodes {
        match node {
            Node::Tab(tab) => {
                if tab.new_group && !run.is_empty() {
                    out.push(tab_set(std::mem::take(&mut run)).into());
                }
                run.push(*tab);
            }
            other => {
                if !run.is_empty() {
                    out.push(tab_set(std::mem::take(&mut run)).into());
                }
                out.push(other);
            }
        }
    }
    if !run.is_empty() {
        out.push(tab_set(run).into());
    }
    out
}

/// Builds `div.tabbed-set` holding a radio input, label and content per tab.
///
/// Ids come from directive line numbers, so they are unique within a
/// document. The first `selected` tab is checked, else the first tab.
pub fn tab_set(tabs: Vec<Tab>) -> Element {
    let name = format!("tabbed-set-{}", tabs.first().map_or(0, |t| t.line));
    let selected: Vec<usize> = tabs
        .iter()
        .enumerate()
        .filter(|(_, t)| t.selected)
        .map(|(i, _)| i)
        .collect();
    if selected.len() > 1 {
        log::warn!("{name}: {} tabs are selected, keeping the first", selected.len());
    }
    let checked = selected.first().copied().unwrap_or(0);

    let mut set = Element::container(["tabbed-set"]);
    for (i, tab) in tabs.into_iter().enumerate() {
        let id = format!("tab-{}", tab.line);
        let mut input = Element::new("input")
            .with_attr("type", "radio")
            .with_attr("id", id.clone())
            .with_attr("name", name.clone());
        if i == checked {
            input = input.with_flag("checked");
        }
        set.push(input);
        set.push(tab.label.with_attr("for", id));
        set.push(tab.content);
    }
    set
}
