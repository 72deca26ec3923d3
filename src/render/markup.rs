//! UI element tree produced by the renderers.

use serde::{Deserialize, Serialize};

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "img", "input"];

/// A node of the rendered UI tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Markup {
    /// An element with attributes and children
    Element(Box<Element>),
    /// Literal text
    Text { text: String },
}

impl Markup {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text { text: text.into() }
    }

    /// Get the element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Markup::Element(el) => Some(el),
            Markup::Text { .. } => None,
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Markup::Text { text } => out.push_str(text),
            Markup::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for elements matching a predicate.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.find_into(pred, &mut found);
        found
    }

    fn find_into<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Markup::Element(el) = self {
            if pred(el) {
                found.push(el);
            }
            for child in &el.children {
                child.find_into(pred, found);
            }
        }
    }

    /// Serialize to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append HTML for this node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Markup::Text { text } => {
                html_escape::encode_text_to_string(text, out);
            }
            Markup::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self {
        Markup::Element(Box::new(el))
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Markup>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute and return self. Setting an existing name replaces it.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the `class` attribute and return self. Empty classes are skipped.
    pub fn class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        if class.trim().is_empty() {
            return self;
        }
        self.attr("class", class.trim())
    }

    /// Append a child and return self.
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child and return self.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::text(text))
    }

    /// Append children and return self.
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Get an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map_or(false, |c| c.split_whitespace().any(|c| c == class))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            // Boolean attributes are written bare.
            if !value.is_empty() {
                out.push_str("=\"");
                html_escape::encode_double_quoted_attribute_to_string(value, out);
                out.push('"');
            }
        }

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            out.push('>');
            return;
        }
        if self.children.is_empty() && self.tag == "path" {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Render a sequence of nodes to HTML.
pub fn to_html_fragment(nodes: &[Markup]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}
