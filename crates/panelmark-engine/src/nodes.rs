//! Render tree produced by directives and the Markdown renderer.

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Pre-rendered HTML, written verbatim.
    Raw(String),
    /// A tab waiting to be grouped with its neighbours into a tab set.
    Tab(Box<Tab>),
}

/// One `tabbed` directive before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// The `<label>`; its `for` attribute is set when the set is built.
    pub label: Element,
    pub content: Element,
    pub selected: bool,
    /// Starts a new tab set even when the previous sibling is a tab.
    pub new_group: bool,
    /// 1-based line of the directive, used to derive element ids.
    pub line: usize,
}

/// An HTML element with a class list, extra attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    /// Attributes other than `class`, in output order. `None` values are
    /// written as bare boolean attributes.
    pub attrs: Vec<(&'static str, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A `div` carrying `classes`.
    pub fn container<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("div").with_classes(classes)
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    pub fn with_flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Tab> for Node {
    fn from(tab: Tab) -> Self {
        Node::Tab(Box::new(tab))
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    /// Visits every element of the tree, parents before children.
    pub fn walk_elements_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        if let Node::Element(el) = self {
            f(el);
            for child in &mut el.children {
                child.walk_elements_mut(f);
            }
        }
    }
}
