//! Retained visual tree and its SVG serialization

use std::fmt::Write;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Svg,
    G,
    Rect,
    Text,
    Circle,
    Polyline,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Svg => "svg",
            Tag::G => "g",
            Tag::Rect => "rect",
            Tag::Text => "text",
            Tag::Circle => "circle",
            Tag::Polyline => "polyline",
        }
    }
}

/// One node of the visual tree. Attributes keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_px(self, name: &'static str, value: f64) -> Self {
        self.with_attr(name, format_px(value))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn set_px(&mut self, name: &'static str, value: f64) {
        self.set_attr(name, format_px(value));
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute parsed as a number
    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(|v| v.parse().ok())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Elements are visible unless explicitly hidden
    pub fn is_visible(&self) -> bool {
        self.attr("visibility") != Some("hidden")
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.set_attr("visibility", if visible { "visible" } else { "hidden" });
    }

    /// Index of the data point this element is a hit-region for
    pub fn hit_region(&self) -> Option<usize> {
        self.attr("data-index").and_then(|v| v.parse().ok())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// All elements with `tag` in this subtree, in document order
    pub fn find_all(&self, tag: Tag) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: Tag, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            child.collect(tag, found);
        }
    }

    /// Hit-region indices in document order
    pub fn hit_regions(&self) -> Vec<usize> {
        self.find_all(Tag::Rect)
            .into_iter()
            .filter_map(Element::hit_region)
            .collect()
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out, 0);
        out
    }

    fn write_svg(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.tag.name());
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_text(value));
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.write_svg(out, depth + 1);
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", self.tag.name());
    }
}

/// Shortest decimal form of a pixel value, without negative zero
pub fn format_px(value: f64) -> String {
    format!("{}", value + 0.0)
}

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new(Tag::Svg).with_attr("id", "svg").with_child(
            Element::new(Tag::G)
                .with_attr("id", "group")
                .with_child(Element::new(Tag::Rect).with_attr("data-index", 0))
                .with_child(Element::new(Tag::Text).with_text("a < b")),
        )
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new(Tag::Rect).with_px("x", 1.0);
        el.set_px("x", 2.5);
        assert_eq!(el.attr("x"), Some("2.5"));
        assert_eq!(el.attr_f64("x"), Some(2.5));
        assert_eq!(el.to_svg(), "<rect x=\"2.5\"/>\n");
    }

    #[test]
    fn test_find_by_id() {
        let mut tree = sample();
        assert_eq!(tree.find_by_id("group").unwrap().children().len(), 2);
        assert!(tree.find_by_id("missing").is_none());

        tree.find_by_id_mut("group").unwrap().set_visible(false);
        assert!(!tree.find_by_id("group").unwrap().is_visible());
        assert!(tree.is_visible());
    }

    #[test]
    fn test_hit_regions() {
        assert_eq!(sample().hit_regions(), vec![0]);
    }

    #[test]
    fn test_svg_escaping() {
        let svg = sample().to_svg();
        assert!(svg.contains("<text>a &lt; b</text>"));
        assert!(svg.starts_with("<svg id=\"svg\">\n"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(60.0), "60");
        assert_eq!(format_px(-0.0), "0");
        assert_eq!(format_px(28.75), "28.75");
    }
}
