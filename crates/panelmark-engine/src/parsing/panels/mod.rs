//! # Panel Splitting
//!
//! Partitions a directive body into panels, each with optional header and
//! footer regions and per-panel class overrides.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`delimiters`): every line is classified as a
//!    panel, header or footer marker or as content, using only the line
//!    itself.
//! 2. **Segmenting** (`splitter`): `PanelSplitter` tracks the current
//!    panel's start and its header/footer split points and emits
//!    `PanelSegment`s.
//! 3. **Panel Parsing** (`panel`): `parse_panel` consumes the leading option
//!    lines of a segment (`options`), merges classes over the defaults
//!    (`classes`) and cuts the header, body and footer regions.
//!
//! ## Key Invariants
//!
//! - Panels are emitted in source order
//! - Options, header, body and footer of a panel never overlap
//! - Every region carries the absolute line offset of its content
//! - Malformed input degrades to empty regions; it never panics

pub mod classes;
pub mod delimiters;
pub mod options;
pub mod panel;
pub mod splitter;

pub use classes::{ClassMap, ClassTarget};
pub use delimiters::{DelimiterError, Delimiters, LineMarker};
pub use options::{OptionKey, OptionLine, OptionOp, parse_option_line};
pub use panel::{PanelBlock, PanelSegment, Region, parse_panel};
pub use splitter::PanelSplitter;

/// Splits `lines` into panels.
///
/// `content_offset` is the absolute line number of `lines[0]`; it is added
/// to every region offset. `default_classes` is cloned per panel and never
/// modified.
pub fn split_panels<'a>(
    lines: &'a [&'a str],
    content_offset: usize,
    default_classes: &ClassMap,
    delimiters: &Delimiters,
) -> Vec<PanelBlock<'a>> {
    let mut splitter = PanelSplitter::new();
    for (i, line) in lines.iter().enumerate() {
        splitter.push(i, delimiters.classify(line));
    }
    let segments = splitter.finish(lines.len());
    log::debug!(
        "split {} lines at offset {content_offset} into {} panels",
        lines.len(),
        segments.len()
    );

    segments
        .into_iter()
        .map(|seg| {
            parse_panel(
                &lines[seg.start..seg.end],
                seg.start,
                seg.header_split,
                seg.footer_split,
                content_offset,
                default_classes,
            )
        })
        .collect()
}
