use thiserror::Error;

/// Number of times a delimiter character must repeat at line start.
pub const MARKER_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    #[error("expected 3 delimiters (panel, header, footer), got {0}")]
    WrongCount(usize),
    #[error("delimiter {0:?} must be exactly one character")]
    WrongLength(String),
    #[error("delimiters must be distinct, got {0:?}")]
    NotUnique(Vec<char>),
}

/// The three single-character delimiters of the panel grammar.
///
/// A line starting with a delimiter repeated [`MARKER_LEN`] times is a
/// structural marker. Construction validates the set, so the splitter
/// itself never has to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    panel: char,
    head: char,
    foot: char,
}

/// What a single line means to the splitter, decided without context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMarker {
    Panel,
    Header,
    Footer,
    Content,
}

impl Delimiters {
    pub const DEFAULT_PANEL: char = '-';
    pub const DEFAULT_HEAD: char = '^';
    pub const DEFAULT_FOOT: char = '+';

    pub fn new(panel: char, head: char, foot: char) -> Result<Self, DelimiterError> {
        if panel == head || panel == foot || head == foot {
            return Err(DelimiterError::NotUnique(vec![panel, head, foot]));
        }
        Ok(Self { panel, head, foot })
    }

    /// Builds the set from configuration strings, in panel/header/footer order.
    pub fn from_strs<S: AsRef<str>>(values: &[S]) -> Result<Self, DelimiterError> {
        if values.len() != 3 {
            return Err(DelimiterError::WrongCount(values.len()));
        }
        let mut chars = [' '; 3];
        for (slot, value) in chars.iter_mut().zip(values) {
            let value = value.as_ref();
            let mut it = value.chars();
            match (it.next(), it.next()) {
                (Some(c), None) => *slot = c,
                _ => return Err(DelimiterError::WrongLength(value.to_string())),
            }
        }
        Self::new(chars[0], chars[1], chars[2])
    }

    /// Classifies a line. Only the line start is inspected, so `---- text`
    /// is still a panel marker.
    pub fn classify(&self, line: &str) -> LineMarker {
        if starts_with_run(line, self.panel) {
            LineMarker::Panel
        } else if starts_with_run(line, self.head) {
            LineMarker::Header
        } else if starts_with_run(line, self.foot) {
            LineMarker::Footer
        } else {
            LineMarker::Content
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            panel: Self::DEFAULT_PANEL,
            head: Self::DEFAULT_HEAD,
            foot: Self::DEFAULT_FOOT,
        }
    }
}

fn starts_with_run(line: &str, c: char) -> bool {
    let mut chars = line.chars();
    (0..MARKER_LEN).all(|_| chars.next() == Some(c))
}
