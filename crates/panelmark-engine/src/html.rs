//! HTML serialization of the render tree.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::directives::tabbed::tab_set;
use crate::nodes::{Element, Node};

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Serializes `nodes` to an HTML fragment.
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

/// Wraps a fragment in a minimal HTML5 document.
pub fn standalone(body: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        encode_text(title)
    )
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(text) => out.push_str(&encode_text(text)),
        Node::Raw(html) => out.push_str(html),
        // Tabs are grouped while parsing; a stray one is a set of its own.
        Node::Tab(tab) => write_element(out, &tab_set(vec![tab.as_ref().clone()])),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(el.tag);
    if !el.classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&encode_double_quoted_attribute(&el.classes.join(" ")));
        out.push('"');
    }
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag) {
        out.push('\n');
        return;
    }

    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(el.tag);
    out.push('>');
    if matches!(el.tag, "div" | "details" | "p") {
        out.push('\n');
    }
}
