pub mod directives;
pub mod document;
pub mod html;
pub mod io;
pub mod nodes;
pub mod parsing;

// Re-export key types for easier usage
pub use directives::{Directive, DirectiveError, DirectiveRegistry};
pub use document::{DocumentParser, MarkdownOptions, NestedParse};
pub use io::*;
pub use nodes::{Element, Node, Tab};
pub use parsing::{DelimiterError, Delimiters, PanelBlock, Region, parse_args, split_panels};
