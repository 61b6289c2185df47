use crate::document::NestedParse;
use crate::nodes::{Element, Node};
use crate::parsing::{
    ClassMap, ClassTarget, Delimiters, PanelBlock, class_tokens, classes_for, split_panels,
};

use super::{Directive, DirectiveError, Invocation, OptionKind, override_classes};

const DEFAULT_CONTAINER: &str = "container pb-4";
const DEFAULT_COLUMN: &str = "col-lg-6 col-md-6 col-sm-6 col-xs-12 p-2";
const DEFAULT_CARD: &str = "shadow";

/// Multi-column card layout.
#[derive(Debug, Clone, Copy)]
pub struct PanelsDirective {
    delimiters: Delimiters,
}

impl PanelsDirective {
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    /// Class defaults every panel starts from, before directive options.
    pub fn default_classes() -> ClassMap {
        ClassMap::from([
            (ClassTarget::Column, class_tokens(DEFAULT_COLUMN)),
            (ClassTarget::Card, class_tokens(DEFAULT_CARD)),
        ])
    }

    fn render_panel(
        &self,
        panel: &PanelBlock<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Node, DirectiveError> {
        let classes = |target| classes_for(&panel.classes, target).iter().cloned();

        let mut card = Element::container(["card", "w-100"]).with_classes(classes(ClassTarget::Card));
        if let Some(src) = &panel.img_top {
            card.push(image(src, "card-img-top", classes(ClassTarget::ImgTopCls)));
        }
        if let Some(header) = &panel.header
            && let Some(el) = section(
                parser,
                header.lines,
                header.offset,
                "card-header",
                classes(ClassTarget::Header),
            )?
        {
            card.push(el);
        }
        card.push(
            Element::container(["card-body"])
                .with_classes(classes(ClassTarget::Body))
                .with_children(parser.nested_parse(panel.body.lines, panel.body.offset)?),
        );
        if let Some(footer) = &panel.footer
            // The footer offset is its delimiter line; content starts below it.
            && let Some(el) = section(
                parser,
                footer.lines,
                footer.offset + 1,
                "card-footer",
                classes(ClassTarget::Footer),
            )?
        {
            card.push(el);
        }
        if let Some(src) = &panel.img_bottom {
            card.push(image(src, "card-img-bottom", classes(ClassTarget::ImgBottomCls)));
        }

        Ok(Element::container(["d-flex"])
            .with_classes(classes(ClassTarget::Column))
            .with_child(card)
            .into())
    }
}

fn image(src: &str, class: &str, extra: impl Iterator<Item = String>) -> Element {
    Element::new("img")
        .with_class(class)
        .with_classes(extra)
        .with_attr("src", src)
        .with_attr("alt", "")
}

/// A header or footer whose first line is absolute line `offset`. A region
/// without lines renders nothing.
fn section(
    parser: &dyn NestedParse,
    lines: &[&str],
    offset: usize,
    class: &str,
    extra: impl Iterator<Item = String>,
) -> Result<Option<Element>, DirectiveError> {
    if lines.is_empty() {
        return Ok(None);
    }
    let children = parser.nested_parse(lines, offset)?;
    Ok(Some(
        Element::container([class])
            .with_classes(extra)
            .with_children(children),
    ))
}

impl Directive for PanelsDirective {
    fn name(&self) -> &'static str {
        "panels"
    }

    fn options(&self) -> &'static [(&'static str, OptionKind)] {
        &[
            ("container", OptionKind::Text),
            ("column", OptionKind::Text),
            ("card", OptionKind::Text),
            ("body", OptionKind::Text),
            ("header", OptionKind::Text),
            ("footer", OptionKind::Text),
            ("img-top-cls", OptionKind::Text),
            ("img-bottom-cls", OptionKind::Text),
        ]
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError> {
        let options = &invocation.options;
        let container = match options.get("container") {
            Some(value) => override_classes(class_tokens(DEFAULT_CONTAINER), value),
            None => class_tokens(DEFAULT_CONTAINER),
        };

        let mut defaults = Self::default_classes();
        for target in ClassTarget::ALL {
            if let Some(value) = options.get(target.as_str()) {
                let base = defaults.remove(&target).unwrap_or_default();
                defaults.insert(target, override_classes(base, value));
            }
        }

        let panels = split_panels(
            invocation.content,
            invocation.content_offset,
            &defaults,
            &self.delimiters,
        );
        let mut row = Element::container(["row"]);
        for panel in &panels {
            row.push(self.render_panel(panel, parser)?);
        }
        Ok(vec![Element::container(container).with_child(row).into()])
    }
}
