//! # Document Host
//!
//! Finds directive fences in a Markdown document and dispatches them to the
//! [`DirectiveRegistry`]. Everything outside a directive fence is rendered
//! with pulldown-cmark.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): fence openers, closers and
//!    directive openers, decided per line.
//! 2. **Block Building** (`builder`): `DocBuilder` groups lines into Markdown
//!    runs and directive fences. Code fences are raw zones.
//! 3. **Dispatch**: the option block of each directive fence is parsed and
//!    validated, then the directive runs with this parser as its
//!    [`NestedParse`] handle.
//! 4. **Grouping**: adjacent `tabbed` results among the parsed siblings are
//!    merged into tab sets.

use std::sync::OnceLock;

use regex::Regex;

use crate::directives::{self, DirectiveError, DirectiveOptions, DirectiveRegistry, Invocation};
use crate::html;
use crate::nodes::Node;
use crate::parsing::Delimiters;

pub mod builder;
pub mod classify;
pub mod markdown;

pub use builder::{DirectiveFence, DocBlock, DocBuilder};
pub use classify::{FenceSig, LineClass, classify};
pub use markdown::MarkdownOptions;

/// Turns a sub-range of source lines into render-tree nodes.
pub trait NestedParse {
    /// Parses `lines`, whose first line is absolute line `offset` (0-based).
    fn nested_parse(&self, lines: &[&str], offset: usize) -> Result<Vec<Node>, DirectiveError>;

    /// Parses one line of inline markup.
    fn parse_inline(&self, text: &str) -> Vec<Node>;
}

/// Renders Markdown documents containing directive fences.
#[derive(Debug)]
pub struct DocumentParser {
    registry: DirectiveRegistry,
    markdown: MarkdownOptions,
}

impl DocumentParser {
    pub fn new(registry: DirectiveRegistry, markdown: MarkdownOptions) -> Self {
        Self { registry, markdown }
    }

    /// A parser with the default directives, using `delimiters` for panels.
    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self::new(
            DirectiveRegistry::with_defaults(delimiters),
            MarkdownOptions::default(),
        )
    }

    pub fn with_markdown(mut self, markdown: MarkdownOptions) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn parse(&self, text: &str) -> Result<Vec<Node>, DirectiveError> {
        let lines: Vec<&str> = text.lines().collect();
        self.nested_parse(&lines, 0)
    }

    /// Parses `text` and serializes the result to an HTML fragment.
    pub fn render(&self, text: &str) -> Result<String, DirectiveError> {
        Ok(html::render(&self.parse(text)?))
    }

    fn run_directive(
        &self,
        lines: &[&str],
        offset: usize,
        fence: DirectiveFence<'_>,
    ) -> Result<Vec<Node>, DirectiveError> {
        let line = offset + fence.opener + 1;
        let directive =
            self.registry
                .get(fence.name)
                .ok_or_else(|| DirectiveError::UnknownDirective {
                    name: fence.name.to_string(),
                    line,
                })?;

        let body = &lines[fence.body_start..fence.body_end];
        let body_offset = offset + fence.body_start;
        let (options, consumed) = parse_options(body, body_offset);
        let invocation = Invocation {
            name: fence.name,
            argument: fence.argument,
            options,
            content: &body[consumed..],
            content_offset: body_offset + consumed,
            line,
        };
        directives::validate(directive, &invocation)?;

        log::debug!(
            "line {line}: running `{}` over {} content lines",
            fence.name,
            invocation.content.len()
        );
        directive.run(&invocation, self)
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::with_delimiters(Delimiters::default())
    }
}

impl NestedParse for DocumentParser {
    fn nested_parse(&self, lines: &[&str], offset: usize) -> Result<Vec<Node>, DirectiveError> {
        let mut builder = DocBuilder::new();
        for (i, line) in lines.iter().enumerate() {
            builder.push(i, classify(line));
        }

        let mut nodes = Vec::new();
        for block in builder.finish(lines.len()) {
            match block {
                DocBlock::Markdown { start, end } => {
                    let text = lines[start..end].join("\n");
                    nodes.extend(markdown::render_blocks(&text, self.markdown));
                }
                DocBlock::Directive(fence) => {
                    nodes.extend(self.run_directive(lines, offset, fence)?);
                }
            }
        }
        Ok(directives::tabbed::group_tabs(nodes))
    }

    fn parse_inline(&self, text: &str) -> Vec<Node> {
        markdown::render_inline(text, self.markdown)
    }
}

fn option_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^:([A-Za-z][A-Za-z0-9_-]*):(?:\s+(.*))?$").expect("Invalid option regex")
    })
}

/// Parses the leading `:name: value` lines of a directive body, plus one
/// blank line after them. Returns the options and the number of lines
/// consumed.
fn parse_options(body: &[&str], offset: usize) -> (DirectiveOptions, usize) {
    let mut options = DirectiveOptions::default();
    let mut consumed = 0;
    for line in body {
        let Some(caps) = option_regex().captures(line.trim_end()) else {
            break;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map_or("", |m| m.as_str().trim());
        options.insert(name, value, offset + consumed + 1);
        consumed += 1;
    }
    if consumed > 0 && body.get(consumed).is_some_and(|l| l.trim().is_empty()) {
        consumed += 1;
    }
    (options, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_stop_at_first_other_line() {
        let body = [":open:", ":title: + bold  ", "", "text", ":name: x"];
        let (options, consumed) = parse_options(&body, 4);
        assert_eq!(consumed, 3);
        assert!(options.flag("open"));
        assert_eq!(options.get("open"), Some(""));
        assert_eq!(options.get("title"), Some("+ bold"));
        assert_eq!(options.line("title"), Some(6));
        assert_eq!(options.get("name"), None);
    }

    #[test]
    fn blank_line_is_only_consumed_after_options() {
        let (options, consumed) = parse_options(&["", ":open:"], 0);
        assert!(options.is_empty());
        assert_eq!(consumed, 0);
    }

    #[test]
    fn option_needs_space_before_value() {
        let (options, consumed) = parse_options(&[":name:x"], 0);
        assert!(options.is_empty());
        assert_eq!(consumed, 0);
    }

    #[test]
    fn markdown_only_document() {
        let html = DocumentParser::default().render("# Hi\n\nsome *text*").unwrap();
        assert_eq!(html, "<h1>Hi</h1>\n<p>some <em>text</em></p>\n");
    }

    #[test]
    fn code_fences_are_not_directives() {
        let html = DocumentParser::default()
            .render("```\n```{unknown}\n```")
            .unwrap();
        assert!(html.contains("<pre><code>```{unknown}\n</code></pre>"));
    }

    #[test]
    fn unknown_directive_reports_absolute_line() {
        let err = DocumentParser::default()
            .render("intro\n\n```{carousel}\nx\n```")
            .unwrap_err();
        assert_eq!(
            err,
            DirectiveError::UnknownDirective {
                name: "carousel".to_string(),
                line: 3
            }
        );
    }

    #[test]
    fn nested_parse_adds_offset_to_lines() {
        let parser = DocumentParser::default();
        let err = parser
            .nested_parse(&["", "```{div}", ":colour: red", "```"], 20)
            .unwrap_err();
        assert_eq!(err.line(), 23);
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let parser = DocumentParser::new(DirectiveRegistry::new(), MarkdownOptions::default());
        assert!(parser.render("```{div}\n```").is_err());
        assert_eq!(parser.render("plain").unwrap(), "<p>plain</p>\n");
    }
}
