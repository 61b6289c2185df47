//! # Directives
//!
//! A directive turns one fenced block (```` ```{name} argument ````) into
//! render-tree nodes. The document host parses the `:key: value` option
//! lines, validates them against [`Directive::options`] and the argument
//! against [`Directive::argument`], then calls [`Directive::run`] with a
//! [`NestedParse`] handle for the directive content.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::document::NestedParse;
use crate::nodes::Node;
use crate::parsing::{Delimiters, class_tokens};

pub mod badge;
pub mod div;
pub mod dropdown;
pub mod icon;
pub mod link_button;
pub mod panels;
pub mod tabbed;

pub use badge::{BadgeDirective, LinkBadgeDirective};
pub use div::DivDirective;
pub use dropdown::DropdownDirective;
pub use icon::IconDirective;
pub use link_button::LinkButtonDirective;
pub use panels::PanelsDirective;
pub use tabbed::TabbedDirective;

/// Errors raised while running a directive. `line` is the 1-based absolute
/// line number of the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("line {line}: unknown directive `{name}`")]
    UnknownDirective { name: String, line: usize },

    #[error("line {line}: directive `{directive}` has no option `{option}`")]
    UnknownOption {
        directive: String,
        option: String,
        line: usize,
    },

    #[error("line {line}: invalid value for option `{option}` of `{directive}`: {reason}")]
    InvalidOption {
        directive: String,
        option: String,
        reason: String,
        line: usize,
    },

    #[error("line {line}: directive `{directive}` requires an argument")]
    MissingArgument { directive: String, line: usize },

    #[error("line {line}: directive `{directive}` takes no argument")]
    UnexpectedArgument { directive: String, line: usize },

    #[error("line {line}: directive `{directive}` requires content")]
    MissingContent { directive: String, line: usize },

    #[error("line {line}: invalid argument for `{directive}`: {reason}")]
    InvalidArgument {
        directive: String,
        reason: String,
        line: usize,
    },
}

impl DirectiveError {
    pub fn line(&self) -> usize {
        match self {
            DirectiveError::UnknownDirective { line, .. }
            | DirectiveError::UnknownOption { line, .. }
            | DirectiveError::InvalidOption { line, .. }
            | DirectiveError::MissingArgument { line, .. }
            | DirectiveError::UnexpectedArgument { line, .. }
            | DirectiveError::MissingContent { line, .. }
            | DirectiveError::InvalidArgument { line, .. } => *line,
        }
    }
}

/// How an option value is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Any text, including none.
    Text,
    /// Presence only; a value is an error.
    Flag,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentSpec {
    #[default]
    None,
    Optional,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionValue {
    value: String,
    line: usize,
}

/// Options given to one directive invocation, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveOptions {
    values: BTreeMap<String, OptionValue>,
}

impl DirectiveOptions {
    /// Records an option; a repeated name replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>, line: usize) {
        let name = name.into();
        if self.values.contains_key(&name) {
            log::warn!("line {line}: option `{name}` given more than once, keeping the last");
        }
        self.values.insert(
            name,
            OptionValue {
                value: value.into(),
                line,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.value.as_str())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The 1-based line the option was given on.
    pub fn line(&self, name: &str) -> Option<usize> {
        self.values.get(name).map(|v| v.line)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a directive sees of its fenced block.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub argument: Option<&'a str>,
    pub options: DirectiveOptions,
    /// Content lines after the option block.
    pub content: &'a [&'a str],
    /// Absolute 0-based line number of `content[0]`.
    pub content_offset: usize,
    /// 1-based line of the opening fence.
    pub line: usize,
}

pub trait Directive: Send + Sync {
    fn name(&self) -> &'static str;

    fn argument(&self) -> ArgumentSpec {
        ArgumentSpec::None
    }

    fn options(&self) -> &'static [(&'static str, OptionKind)] {
        &[]
    }

    fn run(
        &self,
        invocation: &Invocation<'_>,
        parser: &dyn NestedParse,
    ) -> Result<Vec<Node>, DirectiveError>;
}

/// Checks `invocation` against the option and argument specs of `directive`.
pub fn validate(directive: &dyn Directive, invocation: &Invocation<'_>) -> Result<(), DirectiveError> {
    let name = directive.name();
    match (directive.argument(), invocation.argument) {
        (ArgumentSpec::Required, None) => {
            return Err(DirectiveError::MissingArgument {
                directive: name.to_string(),
                line: invocation.line,
            });
        }
        (ArgumentSpec::None, Some(_)) => {
            return Err(DirectiveError::UnexpectedArgument {
                directive: name.to_string(),
                line: invocation.line,
            });
        }
        _ => {}
    }

    let spec = directive.options();
    for (option, value) in invocation.options.iter() {
        let line = invocation.options.line(option).unwrap_or(invocation.line);
        let Some((_, kind)) = spec.iter().find(|(n, _)| *n == option) else {
            return Err(DirectiveError::UnknownOption {
                directive: name.to_string(),
                option: option.to_string(),
                line,
            });
        };
        let reason = match kind {
            OptionKind::Text => None,
            OptionKind::Flag if !value.is_empty() => {
                Some(format!("flag takes no value, got `{value}`"))
            }
            OptionKind::Flag => None,
            OptionKind::Choice(choices) if !choices.iter().any(|c| *c == value) => Some(format!(
                "`{value}` is not one of {}",
                choices.join(", ")
            )),
            OptionKind::Choice(_) => None,
        };
        if let Some(reason) = reason {
            return Err(DirectiveError::InvalidOption {
                directive: name.to_string(),
                option: option.to_string(),
                reason,
                line,
            });
        }
    }
    Ok(())
}

/// Applies a class option to `base`: a leading `+` appends, anything else
/// replaces.
pub fn override_classes(mut base: Vec<String>, value: &str) -> Vec<String> {
    let value = value.trim();
    match value.strip_prefix('+') {
        Some(extra) => {
            base.extend(class_tokens(extra));
            base
        }
        None => class_tokens(value),
    }
}

/// Directives available to a document, by name.
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: BTreeMap<&'static str, Box<dyn Directive>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every directive of this crate.
    pub fn with_defaults(delimiters: Delimiters) -> Self {
        let mut registry = Self::new();
        registry.register(PanelsDirective::new(delimiters));
        registry.register(DropdownDirective);
        registry.register(TabbedDirective);
        registry.register(LinkButtonDirective);
        registry.register(BadgeDirective);
        registry.register(LinkBadgeDirective);
        registry.register(IconDirective);
        registry.register(DivDirective);
        registry
    }

    /// Adds `directive`, replacing any directive of the same name.
    pub fn register(&mut self, directive: impl Directive + 'static) {
        self.directives.insert(directive.name(), Box::new(directive));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        self.directives.get(name).map(|d| d.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.directives.keys().copied()
    }
}

impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
