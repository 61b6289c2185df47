use super::classify::{FenceSig, LineClass};

/// A directive fence found in the document. All indices are line indices
/// into the builder input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveFence<'a> {
    pub name: &'a str,
    pub argument: Option<&'a str>,
    pub opener: usize,
    pub body_start: usize,
    pub body_end: usize,
}

/// A top-level piece of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocBlock<'a> {
    /// Lines `[start, end)` rendered as Markdown.
    Markdown { start: usize, end: usize },
    Directive(DirectiveFence<'a>),
}

#[derive(Debug, Clone, Copy)]
enum FenceState<'a> {
    None,
    /// A code fence; a raw zone inside the current Markdown run.
    Code { sig: FenceSig },
    Directive {
        sig: FenceSig,
        name: &'a str,
        argument: Option<&'a str>,
        opener: usize,
    },
}

/// Groups classified lines into Markdown runs and directive fences.
pub struct DocBuilder<'a> {
    markdown_start: Option<usize>,
    fence: FenceState<'a>,
    out: Vec<DocBlock<'a>>,
}

impl<'a> DocBuilder<'a> {
    pub fn new() -> Self {
        Self {
            markdown_start: None,
            fence: FenceState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, index: usize, class: LineClass<'a>) {
        match self.fence {
            FenceState::Code { sig } => {
                if let LineClass::Fence(closer) = class
                    && sig.closed_by(closer)
                {
                    self.fence = FenceState::None;
                }
            }
            FenceState::Directive {
                sig,
                name,
                argument,
                opener,
            } => {
                if let LineClass::Fence(closer) = class
                    && sig.closed_by(closer)
                {
                    self.out.push(DocBlock::Directive(DirectiveFence {
                        name,
                        argument,
                        opener,
                        body_start: opener + 1,
                        body_end: index,
                    }));
                    self.fence = FenceState::None;
                }
            }
            FenceState::None => match class {
                LineClass::DirectiveOpen {
                    sig,
                    name,
                    argument,
                } => {
                    self.flush_markdown(index);
                    self.fence = FenceState::Directive {
                        sig,
                        name,
                        argument,
                        opener: index,
                    };
                }
                LineClass::Fence(sig) | LineClass::CodeOpen(sig) => {
                    self.extend_markdown(index);
                    self.fence = FenceState::Code { sig };
                }
                LineClass::Text => self.extend_markdown(index),
            },
        }
    }

    pub fn finish(mut self, len: usize) -> Vec<DocBlock<'a>> {
        // EOF flush: unterminated fences run to the end of input.
        if let FenceState::Directive {
            name,
            argument,
            opener,
            ..
        } = self.fence
        {
            log::warn!("directive `{name}` opened on line {} is never closed", opener + 1);
            self.out.push(DocBlock::Directive(DirectiveFence {
                name,
                argument,
                opener,
                body_start: opener + 1,
                body_end: len,
            }));
        }
        self.flush_markdown(len);
        self.out
    }

    fn extend_markdown(&mut self, index: usize) {
        self.markdown_start.get_or_insert(index);
    }

    fn flush_markdown(&mut self, end: usize) {
        if let Some(start) = self.markdown_start.take() {
            self.out.push(DocBlock::Markdown { start, end });
        }
    }
}

impl Default for DocBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::classify::classify;
    use pretty_assertions::assert_eq;

    fn build<'a>(lines: &[&'a str]) -> Vec<DocBlock<'a>> {
        let mut builder = DocBuilder::new();
        for (i, line) in lines.iter().enumerate() {
            builder.push(i, classify(line));
        }
        builder.finish(lines.len())
    }

    #[test]
    fn plain_markdown_is_one_run() {
        assert_eq!(
            build(&["# Title", "", "text"]),
            vec![DocBlock::Markdown { start: 0, end: 3 }]
        );
    }

    #[test]
    fn directive_splits_markdown() {
        let blocks = build(&["intro", "```{panels}", "a", "---", "b", "```", "outro"]);
        assert_eq!(
            blocks,
            vec![
                DocBlock::Markdown { start: 0, end: 1 },
                DocBlock::Directive(DirectiveFence {
                    name: "panels",
                    argument: None,
                    opener: 1,
                    body_start: 2,
                    body_end: 5,
                }),
                DocBlock::Markdown { start: 6, end: 7 },
            ]
        );
    }

    #[test]
    fn code_fences_are_raw_zones() {
        let blocks = build(&["```text", "```{panels}", "```", "after"]);
        assert_eq!(blocks, vec![DocBlock::Markdown { start: 0, end: 4 }]);
    }

    #[test]
    fn shorter_inner_fence_does_not_close() {
        let blocks = build(&["````{div} x", "```{panels}", "a", "```", "````"]);
        assert_eq!(blocks.len(), 1);
        let DocBlock::Directive(fence) = blocks[0] else {
            panic!("expected a directive");
        };
        assert_eq!((fence.body_start, fence.body_end), (1, 4));
        assert_eq!(fence.argument, Some("x"));
    }

    #[test]
    fn unterminated_directive_runs_to_end() {
        let blocks = build(&["```{dropdown} Title", "body"]);
        assert_eq!(
            blocks,
            vec![DocBlock::Directive(DirectiveFence {
                name: "dropdown",
                argument: Some("Title"),
                opener: 0,
                body_start: 1,
                body_end: 2,
            })]
        );
    }

    #[test]
    fn empty_document_has_no_blocks() {
        assert_eq!(build(&[]), vec![]);
    }
}
