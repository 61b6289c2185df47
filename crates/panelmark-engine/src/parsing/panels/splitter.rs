use super::{delimiters::LineMarker, panel::PanelSegment};

/// State machine that turns classified lines into panel segments.
///
/// Feed every line's [`LineMarker`] in order with [`push`](Self::push), then
/// call [`finish`](Self::finish) with the total line count.
#[derive(Debug, Default)]
pub struct PanelSplitter {
    start_line: usize,
    header_split: Option<usize>,
    footer_split: Option<usize>,
    seen_panel_marker: bool,
    out: Vec<PanelSegment>,
}

impl PanelSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: usize, marker: LineMarker) {
        match marker {
            LineMarker::Panel => {
                // A marker on the very first line only opens the first panel.
                if index != 0 {
                    self.flush(index);
                }
                self.seen_panel_marker = true;
                self.start_line = index + 1;
                self.header_split = None;
                self.footer_split = None;
            }
            LineMarker::Header => {
                if self.footer_split.is_none() {
                    self.header_split = Some(index - self.start_line);
                }
            }
            LineMarker::Footer => {
                self.footer_split = Some(index - self.start_line);
            }
            LineMarker::Content => {}
        }
    }

    pub fn finish(mut self, len: usize) -> Vec<PanelSegment> {
        // An empty tail after a panel marker is not a panel.
        if !(self.seen_panel_marker && self.start_line >= len) {
            self.flush(len);
        }
        self.out
    }

    fn flush(&mut self, end: usize) {
        self.out.push(PanelSegment {
            start: self.start_line,
            end: end.max(self.start_line),
            header_split: self.header_split,
            footer_split: self.footer_split,
        });
    }
}
