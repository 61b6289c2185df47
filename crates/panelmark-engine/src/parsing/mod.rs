//! # Line-Level Parsing
//!
//! - **`panels`**: splits a directive body into panels with header, body and
//!   footer regions and per-panel class overrides
//! - **`args`**: comma-separated positional/keyword argument strings

pub mod args;
pub mod panels;

pub use args::{ArgValue, Kwargs, parse_args};
pub use panels::classes::{class_tokens, classes_for};
pub use panels::{
    ClassMap, ClassTarget, DelimiterError, Delimiters, PanelBlock, Region, split_panels,
};
