//! Structured view tree for cards and board markup.
//!
//! Renderers build `Element`s; text and attribute values are escaped only
//! when the tree is serialized, so entity data can never inject markup.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// The ` &nbsp; ` filler used by placeholders and spacers.
    Filler,
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["br"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Space-separated class list, e.g. `"card-header bg-secondary py-2"`.
    pub fn class(self, classes: &str) -> Self {
        self.attr("class", classes)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let list = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", list);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let list = self
            .get_attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", list);
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn filler(mut self) -> Self {
        self.children.push(Node::Filler);
        self
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first search for a descendant (or self) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|node| match node {
            Node::Element(el) => el.find_by_class(class),
            _ => None,
        })
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl Node {
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Filler => out.push_str(" &nbsp; "),
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_text(&el.children, out),
            Node::Text(text) => out.push_str(text),
            Node::Filler => out.push(' '),
        }
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nested_elements() {
        let el = Element::new("div")
            .class("card")
            .id("order1")
            .child(Element::new("span").text("O-1"))
            .child(Element::new("br"));
        assert_eq!(
            el.to_html(),
            r#"<div class="card" id="order1"><span>O-1</span><br></div>"#
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let el = Element::new("a")
            .attr("href", "x?a=\"1\"&b=2")
            .text("<script>alert('x')</script>");
        let html = el.to_html();
        assert!(html.contains("href=\"x?a=&quot;1&quot;&amp;b=2\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_class_helpers() {
        let mut el = Element::new("div").class("dropzone rounded");
        el.add_class("droppable");
        el.add_class("droppable");
        assert_eq!(el.get_attr("class"), Some("dropzone rounded droppable"));
        el.remove_class("droppable");
        assert_eq!(el.get_attr("class"), Some("dropzone rounded"));
        assert!(!el.has_class("drop"));
    }

    #[test]
    fn test_text_content_and_find_by_class() {
        let el = Element::new("div")
            .child(Element::new("span").class("label").text("Product:"))
            .text(" P-1");
        assert_eq!(el.text_content(), "Product: P-1");
        assert_eq!(el.find_by_class("label").unwrap().text_content(), "Product:");
    }

    #[test]
    fn test_filler_renders_nbsp() {
        let el = Element::new("div").class("dropzone rounded").filler();
        assert_eq!(el.to_html(), r#"<div class="dropzone rounded"> &nbsp; </div>"#);
    }
}
