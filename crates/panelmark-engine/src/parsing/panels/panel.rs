use super::{
    classes::{ClassMap, class_tokens},
    options::{OptionKey, OptionOp, parse_option_line},
};

/// A run of source lines together with the absolute line number used when
/// reporting problems found inside it.
///
/// `start` is the index of the first line within the input handed to the
/// splitter. `offset` is usually `content_offset + start`; footers are the
/// exception and point at their delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    pub start: usize,
    pub lines: &'a [&'a str],
    pub offset: usize,
}

impl Region<'_> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One parsed panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelBlock<'a> {
    pub classes: ClassMap,
    pub img_top: Option<String>,
    pub img_bottom: Option<String>,
    pub header: Option<Region<'a>>,
    pub body: Region<'a>,
    pub footer: Option<Region<'a>>,
}

/// Where a panel sits in the splitter input and where its markers are.
///
/// Split points are indices relative to the panel's first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSegment {
    pub start: usize,
    pub end: usize,
    pub header_split: Option<usize>,
    pub footer_split: Option<usize>,
}

/// Parses one panel: leading option lines, then header, body and footer.
///
/// `content` is the panel's own lines, `local_offset` their position in the
/// splitter input and `content_offset` the absolute line of that input.
/// Never panics on inconsistent split points; inverted ranges collapse to
/// empty regions.
pub fn parse_panel<'a>(
    content: &'a [&'a str],
    local_offset: usize,
    header_split: Option<usize>,
    footer_split: Option<usize>,
    content_offset: usize,
    default_classes: &ClassMap,
) -> PanelBlock<'a> {
    let mut classes = default_classes.clone();
    let mut img_top = None;
    let mut img_bottom = None;

    let mut opt_offset = 0;
    for line in content {
        let Some(opt) = parse_option_line(line) else {
            break;
        };
        match opt.key {
            OptionKey::ImgTop => img_top = Some(opt.value.trim().to_string()),
            OptionKey::ImgBottom => img_bottom = Some(opt.value.trim().to_string()),
            OptionKey::Class(target) => {
                let tokens = class_tokens(opt.value);
                match opt.op {
                    OptionOp::Append => classes.entry(target).or_default().extend(tokens),
                    OptionOp::Assign => {
                        classes.insert(target, tokens);
                    }
                }
            }
        }
        opt_offset += 1;
    }

    let region = move |start: usize, end: usize, offset: usize| {
        let end = end.min(content.len());
        let start = start.min(end);
        Region {
            start: local_offset + start,
            lines: &content[start..end],
            offset: content_offset + local_offset + offset,
        }
    };

    let mut body_start = opt_offset;
    let mut body_end = content.len();

    let header = header_split.map(|split| {
        body_start = split + 1;
        region(opt_offset, split, opt_offset)
    });

    let footer = footer_split.map(|split| {
        body_end = split;
        region(split + 1, content.len(), split)
    });

    let body_start = body_start.min(content.len());
    let body = region(body_start, body_end, body_start);

    PanelBlock {
        classes,
        img_top,
        img_bottom,
        header,
        body,
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::panels::classes::ClassTarget;
    use pretty_assertions::assert_eq;

    fn defaults() -> ClassMap {
        ClassMap::from([(ClassTarget::Column, vec!["y".to_string()])])
    }

    #[test]
    fn append_accumulates_onto_default() {
        let lines = ["column += x", "body"];
        let block = parse_panel(&lines, 0, None, None, 0, &defaults());
        assert_eq!(block.classes[&ClassTarget::Column], vec!["y", "x"]);
        assert_eq!(block.body.lines, ["body"]);
        assert_eq!(block.body.offset, 1);
    }

    #[test]
    fn assign_discards_accumulation() {
        let lines = ["column += x", "column = z"];
        let block = parse_panel(&lines, 0, None, None, 0, &defaults());
        assert_eq!(block.classes[&ClassTarget::Column], vec!["z"]);
        assert!(block.body.is_empty());
        assert_eq!(block.body.offset, 2);
    }

    #[test]
    fn append_to_missing_key_starts_from_empty() {
        let lines = ["card += a b"];
        let block = parse_panel(&lines, 0, None, None, 0, &ClassMap::new());
        assert_eq!(
            block.classes,
            ClassMap::from([(ClassTarget::Card, vec!["a".to_string(), "b".to_string()])])
        );
    }

    #[test]
    fn default_map_is_not_mutated() {
        let defaults = defaults();
        let lines = ["column += x"];
        parse_panel(&lines, 0, None, None, 0, &defaults);
        assert_eq!(defaults, self::defaults());
    }

    #[test]
    fn image_options_stay_out_of_classes() {
        let lines = ["img-top = top.png", "img-bottom = bottom.png", "text"];
        let block = parse_panel(&lines, 0, None, None, 0, &ClassMap::new());
        assert_eq!(block.img_top.as_deref(), Some("top.png"));
        assert_eq!(block.img_bottom.as_deref(), Some("bottom.png"));
        assert!(block.classes.is_empty());
    }

    #[test]
    fn options_must_be_a_leading_run() {
        let lines = ["text", "card = late"];
        let block = parse_panel(&lines, 0, None, None, 0, &ClassMap::new());
        assert!(block.classes.is_empty());
        assert_eq!(block.body.lines, ["text", "card = late"]);
    }

    #[test]
    fn empty_content_gives_empty_body() {
        let block = parse_panel(&[], 4, None, None, 10, &ClassMap::new());
        assert!(block.body.is_empty());
        assert_eq!(block.body.offset, 14);
        assert_eq!(block.header, None);
        assert_eq!(block.footer, None);
    }

    #[test]
    fn header_starts_after_options() {
        let lines = ["card = a", "Title", "^^^", "Body"];
        let block = parse_panel(&lines, 3, Some(2), None, 100, &ClassMap::new());
        let header = block.header.unwrap();
        assert_eq!(header.lines, ["Title"]);
        assert_eq!(header.start, 4);
        assert_eq!(header.offset, 104);
        assert_eq!(block.body.lines, ["Body"]);
        assert_eq!(block.body.offset, 106);
    }

    #[test]
    fn footer_offset_points_at_delimiter() {
        let lines = ["Body", "+++", "Foot"];
        let block = parse_panel(&lines, 0, None, Some(1), 0, &ClassMap::new());
        let footer = block.footer.unwrap();
        assert_eq!(footer.lines, ["Foot"]);
        assert_eq!(footer.start, 2);
        assert_eq!(footer.offset, 1);
        assert_eq!(block.body.lines, ["Body"]);
    }

    #[test]
    fn inverted_splits_collapse_to_empty_body() {
        let lines = ["a", "b", "c"];
        let block = parse_panel(&lines, 0, Some(2), Some(0), 0, &ClassMap::new());
        assert!(block.body.is_empty());
        assert_eq!(block.header.unwrap().lines, ["a", "b"]);
        assert_eq!(block.footer.unwrap().lines, ["b", "c"]);
    }

    #[test]
    fn out_of_range_splits_do_not_panic() {
        let lines = ["a"];
        let block = parse_panel(&lines, 0, Some(7), Some(9), 0, &ClassMap::new());
        assert!(block.body.is_empty());
        assert!(block.header.unwrap().lines == ["a"]);
        assert!(block.footer.unwrap().is_empty());
    }
}
