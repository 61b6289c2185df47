use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html::push_html};

use crate::nodes::{Element, Node};

/// pulldown-cmark extensions enabled for Markdown content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: false,
            tasklists: true,
        }
    }
}

impl MarkdownOptions {
    fn to_cmark(self) -> Options {
        let mut opts = Options::empty();
        opts.set(Options::ENABLE_TABLES, self.tables);
        opts.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        opts.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        opts.set(Options::ENABLE_TASKLISTS, self.tasklists);
        opts
    }
}

/// Renders Markdown into render-tree nodes.
///
/// Every paragraph, at any depth, becomes a `<p>` element so callers can
/// restyle it. The HTML around paragraphs is kept as raw nodes, split at
/// top-level block boundaries. Rendering the nodes gives the same HTML as
/// rendering `text` in one go.
pub fn render_blocks(text: &str, options: MarkdownOptions) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pending = Vec::new();
    let mut paragraph: Option<Vec<Event<'_>>> = None;
    let mut depth = 0usize;

    for event in Parser::new_ext(text, options.to_cmark()) {
        match event {
            Event::Start(Tag::Paragraph) => {
                flush_raw(&mut nodes, &mut pending, true);
                paragraph = Some(Vec::new());
                depth += 1;
                continue;
            }
            Event::End(TagEnd::Paragraph) => {
                if let Some(inner) = paragraph.take() {
                    nodes.push(paragraph_node(inner));
                }
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        match &mut paragraph {
            Some(inner) => inner.push(event),
            None => {
                pending.push(event);
                if depth == 0 {
                    flush_raw(&mut nodes, &mut pending, false);
                }
            }
        }
    }
    flush_raw(&mut nodes, &mut pending, false);
    nodes
}

/// Renders a single line of inline Markdown, without the paragraph wrapper.
pub fn render_inline(text: &str, options: MarkdownOptions) -> Vec<Node> {
    let mut nodes = render_blocks(text, options);
    if let [Node::Element(p)] = nodes.as_mut_slice()
        && p.tag == "p"
    {
        return std::mem::take(&mut p.children);
    }
    nodes
}

/// Writes `pending` as one raw node. Before a paragraph the HTML is ended
/// with a newline, as pulldown-cmark starts a fresh line for `<p>`.
fn flush_raw(nodes: &mut Vec<Node>, pending: &mut Vec<Event<'_>>, fresh_line: bool) {
    if pending.is_empty() {
        return;
    }
    let mut html = String::new();
    push_html(&mut html, pending.drain(..));
    if fresh_line && !html.ends_with('\n') {
        html.push('\n');
    }
    nodes.push(Node::raw(html));
}

fn paragraph_node(inner: Vec<Event<'_>>) -> Node {
    let mut html = String::new();
    push_html(&mut html, inner.into_iter());
    Element::new("p").with_child(Node::raw(html)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn paragraphs_become_elements() {
        let nodes = render_blocks("one *two*\n\nthree", MarkdownOptions::default());
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], Node::Element(p) if p.tag == "p"));
        assert_eq!(render(&nodes), "<p>one <em>two</em></p>\n<p>three</p>\n");
    }

    #[test]
    fn other_blocks_are_raw_html() {
        let nodes = render_blocks("# Title\n\n- a\n- b", MarkdownOptions::default());
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], Node::Raw(h) if h.starts_with("<h1>Title</h1>")));
        assert!(matches!(&nodes[1], Node::Raw(h) if h.starts_with("<ul>")));
    }

    #[rstest]
    #[case::loose_list("- a\n\n  para\n- b")]
    #[case::blockquote("> quoted\n>\n> twice")]
    #[case::quote_in_item("- a\n\n  > quoted")]
    #[case::tight_list("- a\n- b")]
    fn nested_paragraphs_are_elements(#[case] text: &str) {
        let nodes = render_blocks(text, MarkdownOptions::default());

        let mut expected = String::new();
        push_html(&mut expected, Parser::new_ext(text, MarkdownOptions::default().to_cmark()));
        assert_eq!(render(&nodes), expected);

        let paragraphs = nodes
            .iter()
            .filter(|n| matches!(n, Node::Element(p) if p.tag == "p"))
            .count();
        assert_eq!(paragraphs, expected.matches("<p>").count());
    }

    #[test]
    fn blank_input_renders_nothing() {
        assert!(render_blocks("\n\n", MarkdownOptions::default()).is_empty());
    }

    #[test]
    fn inline_drops_paragraph_wrapper() {
        let nodes = render_inline("Click **here**", MarkdownOptions::default());
        assert_eq!(render(&nodes), "Click <strong>here</strong>");
    }

    #[test]
    fn strikethrough_follows_options() {
        let on = render(&render_blocks("~~x~~", MarkdownOptions::default()));
        assert!(on.contains("<del>x</del>"));
        let off = MarkdownOptions {
            strikethrough: false,
            ..MarkdownOptions::default()
        };
        assert!(!render(&render_blocks("~~x~~", off)).contains("<del>"));
    }
}
