use std::collections::BTreeMap;

/// An element of the rendered card that carries its own class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassTarget {
    Column,
    Card,
    Body,
    Header,
    Footer,
    ImgTopCls,
    ImgBottomCls,
}

/// Per-element class lists. A missing key means "no classes beyond the
/// fixed ones the renderer always adds".
pub type ClassMap = BTreeMap<ClassTarget, Vec<String>>;

impl ClassTarget {
    pub const ALL: [ClassTarget; 7] = [
        ClassTarget::Column,
        ClassTarget::Card,
        ClassTarget::Body,
        ClassTarget::Header,
        ClassTarget::Footer,
        ClassTarget::ImgTopCls,
        ClassTarget::ImgBottomCls,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClassTarget::Column => "column",
            ClassTarget::Card => "card",
            ClassTarget::Body => "body",
            ClassTarget::Header => "header",
            ClassTarget::Footer => "footer",
            ClassTarget::ImgTopCls => "img-top-cls",
            ClassTarget::ImgBottomCls => "img-bottom-cls",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Splits a class string on whitespace.
pub fn class_tokens(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

/// Returns the classes for `target`, or an empty slice.
pub fn classes_for(map: &ClassMap, target: ClassTarget) -> &[String] {
    map.get(&target).map(Vec::as_slice).unwrap_or(&[])
}
