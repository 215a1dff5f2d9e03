//! Hand-rolled parser for the markup subset tutorial documents use.
//!
//! This is not a general HTML parser. It handles well-formed tag soup of
//! the shape tutorial pages are written in: nested elements, quoted and
//! unquoted attributes, text runs, comments, and a handful of void
//! elements. Recovery is defensive -- an unmatched close tag is dropped,
//! an unclosed element is closed at end of input.
//!
//! `<html>` and `<head>` are treated as transparent wrappers, a `<title>`
//! element is captured into [`Document::title`] instead of the tree, and
//! an explicit `<body>` tag merges its attributes into the body root.

use crate::{Document, Element, NodeId, NodeKind, TagName};

/// Tags that never have children or close tags.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "meta", "link", "input", "source"];

/// Tags that do not create nodes; their children attach to the current
/// insertion point.
const TRANSPARENT_TAGS: &[&str] = &["html", "head"];

/// Parse a complete document.
pub fn parse_document(markup: &str) -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    Parser::new(&mut doc, body, true).run(markup);
    doc
}

/// Parse a markup fragment and append the resulting nodes as children of
/// `parent`. Used for downloaded content, which directly contains
/// `<section>` elements rather than full documents.
pub fn parse_fragment_into(doc: &mut Document, parent: NodeId, markup: &str) {
    Parser::new(doc, parent, false).run(markup);
}

// -----------------------------------------------------------------------
// Parser
// -----------------------------------------------------------------------

struct Parser<'a> {
    doc: &'a mut Document,
    /// Open-element stack; the last entry is the insertion point.
    stack: Vec<(String, NodeId)>,
    /// Whether body/title special-casing applies (full documents only).
    document_mode: bool,
    /// Text collected for an open `<title>` element.
    title_text: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(doc: &'a mut Document, root: NodeId, document_mode: bool) -> Self {
        Self {
            doc,
            stack: vec![(String::from("#root"), root)],
            document_mode,
            title_text: None,
        }
    }

    fn insertion_point(&self) -> NodeId {
        self.stack.last().map(|(_, id)| *id).unwrap_or(0)
    }

    fn run(mut self, markup: &str) {
        let bytes = markup.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] == b'<' {
                if markup[pos..].starts_with("<!--") {
                    // Comment: skip to -->, or end of input.
                    pos = match markup[pos..].find("-->") {
                        Some(end) => pos + end + 3,
                        None => bytes.len(),
                    };
                } else if markup[pos..].starts_with("<!") {
                    // Doctype or similar declaration: skip to >.
                    pos = match markup[pos..].find('>') {
                        Some(end) => pos + end + 1,
                        None => bytes.len(),
                    };
                } else if markup[pos..].starts_with("</") {
                    let end = markup[pos..].find('>').map(|e| pos + e);
                    match end {
                        Some(end) => {
                            let name = markup[pos + 2..end].trim().to_ascii_lowercase();
                            self.close_tag(&name);
                            pos = end + 1;
                        },
                        None => break,
                    }
                } else {
                    match find_tag_end(markup, pos) {
                        Some(end) => {
                            self.open_tag(&markup[pos + 1..end]);
                            pos = end + 1;
                        },
                        None => break,
                    }
                }
            } else {
                let next = markup[pos..]
                    .find('<')
                    .map(|n| pos + n)
                    .unwrap_or(bytes.len());
                self.text(&markup[pos..next]);
                pos = next;
            }
        }
    }

    /// Handle an open tag. `raw` is the tag contents without the angle
    /// brackets, e.g. `section data-title="Intro"`.
    fn open_tag(&mut self, raw: &str) {
        let raw = strip_self_closing(raw.trim());
        let (name, attr_str) = match raw.find(char::is_whitespace) {
            Some(split) => (&raw[..split], &raw[split..]),
            None => (raw, ""),
        };
        let name = name.to_ascii_lowercase();
        if name.is_empty() {
            return;
        }

        if TRANSPARENT_TAGS.contains(&name.as_str()) {
            return;
        }
        if self.document_mode && name == "title" {
            self.title_text = Some(String::new());
            return;
        }
        if self.document_mode && name == "body" {
            // Merge attributes into the existing body root.
            let body = self.doc.body();
            let attrs = parse_attrs(attr_str);
            if let Some(elem) = self.doc.element_mut(body) {
                apply_attrs(elem, attrs);
            }
            return;
        }
        if VOID_TAGS.contains(&name.as_str()) {
            let id = self.doc.create_element(TagName::from_name(&name));
            let attrs = parse_attrs(attr_str);
            if let Some(elem) = self.doc.element_mut(id) {
                apply_attrs(elem, attrs);
            }
            let parent = self.insertion_point();
            self.doc.append_child(parent, id);
            return;
        }

        let id = self.doc.create_element(TagName::from_name(&name));
        let attrs = parse_attrs(attr_str);
        if let Some(elem) = self.doc.element_mut(id) {
            apply_attrs(elem, attrs);
        }
        let parent = self.insertion_point();
        self.doc.append_child(parent, id);
        self.stack.push((name, id));
    }

    /// Handle a close tag: pop to the matching open element, or drop the
    /// tag if nothing matches.
    fn close_tag(&mut self, name: &str) {
        if TRANSPARENT_TAGS.contains(&name) {
            return;
        }
        if self.document_mode && name == "title" {
            if let Some(text) = self.title_text.take() {
                self.doc.title = text.trim().to_string();
            }
            return;
        }
        if self.document_mode && name == "body" {
            return;
        }
        if let Some(open_at) = self.stack.iter().rposition(|(n, _)| n == name) {
            // Never pop the root sentinel.
            if open_at > 0 {
                self.stack.truncate(open_at);
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(title) = self.title_text.as_mut() {
            title.push_str(text);
            return;
        }
        if text.trim().is_empty() {
            return;
        }
        let parent = self.insertion_point();
        let node = self.doc.create_text(text);
        self.doc.append_child(parent, node);
    }
}

/// Drop the `/` of self-closing syntax (`<br/>`, `<img src="x" />`). A
/// slash ending an unquoted attribute value (`href=https://example.org/`)
/// belongs to the value and stays.
fn strip_self_closing(raw: &str) -> &str {
    let Some(rest) = raw.strip_suffix('/') else {
        return raw;
    };
    match rest.chars().last() {
        None => rest,
        Some(c) if c.is_whitespace() || c == '"' || c == '\'' => rest,
        // Bare tag name, no attributes: `<br/>`.
        _ if !rest.contains(char::is_whitespace) => rest,
        _ => raw,
    }
}

/// Find the `>` closing an open tag starting at `pos` (which points at
/// `<`), respecting quoted attribute values that may contain `>`.
fn find_tag_end(markup: &str, pos: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, ch) in markup[pos..].char_indices() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            },
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '>' => return Some(pos + offset),
                _ => {},
            },
        }
    }
    None
}

/// Parse an attribute string into (name, value) pairs. Accepts
/// `name="value"`, `name='value'`, `name=value`, and bare `name`
/// (empty value, used by presence flags like `data-chapter`).
fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        // Attribute name runs to whitespace or `=`.
        let mut name_end = raw.len();
        for (i, c) in raw[start..].char_indices() {
            if c.is_whitespace() || c == '=' {
                name_end = start + i;
                break;
            }
        }
        let name = raw[start..name_end].to_ascii_lowercase();
        while chars.peek().is_some_and(|&(i, _)| i < name_end) {
            chars.next();
        }
        // Skip whitespace before a possible `=`.
        while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            chars.next();
        }
        let value = if chars.peek().is_some_and(|&(_, c)| c == '=') {
            chars.next();
            while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
                chars.next();
            }
            match chars.peek().copied() {
                Some((vstart, q @ ('"' | '\''))) => {
                    chars.next();
                    let mut vend = raw.len();
                    for (i, c) in raw[vstart + 1..].char_indices() {
                        if c == q {
                            vend = vstart + 1 + i;
                            break;
                        }
                    }
                    let value = raw[vstart + 1..vend].to_string();
                    while chars.peek().is_some_and(|&(i, _)| i <= vend) {
                        chars.next();
                    }
                    value
                },
                Some((vstart, _)) => {
                    let mut vend = raw.len();
                    for (i, c) in raw[vstart..].char_indices() {
                        if c.is_whitespace() {
                            vend = vstart + i;
                            break;
                        }
                    }
                    let value = raw[vstart..vend].to_string();
                    while chars.peek().is_some_and(|&(i, _)| i < vend) {
                        chars.next();
                    }
                    value
                },
                None => String::new(),
            }
        } else {
            String::new()
        };
        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
    attrs
}

/// Route parsed attributes into an element: `id` and `class` go to their
/// dedicated fields, everything else to the attribute list.
fn apply_attrs(elem: &mut Element, attrs: Vec<(String, String)>) {
    for (name, value) in attrs {
        match name.as_str() {
            "id" => elem.id = Some(value),
            "class" => {
                for class in value.split_whitespace() {
                    elem.add_class(class);
                }
            },
            _ => elem.set_attribute(&name, &value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_with_data_attrs() {
        let doc = Document::parse(
            "<body><main>\
             <section data-title=\"Intro\"><p>Hello</p></section>\
             <section data-title=\"Details\" data-background-color=\"#fff\">\
             <p>World</p></section>\
             </main></body>",
        );
        let sections = doc.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(doc.element(sections[0]).unwrap().data("title"), Some("Intro"));
        assert_eq!(
            doc.element(sections[1]).unwrap().data("background-color"),
            Some("#fff")
        );
        assert_eq!(doc.text_content(sections[0]), "Hello");
    }

    #[test]
    fn captures_document_title() {
        let doc = Document::parse(
            "<html><head><title>My Tutorial</title></head>\
             <body><main></main></body></html>",
        );
        assert_eq!(doc.title, "My Tutorial");
        // The title element does not land in the tree.
        assert!(doc.first_by_tag(&TagName::Other("title".into())).is_none());
    }

    #[test]
    fn body_attributes_merge_into_root() {
        let doc = Document::parse("<body class=\"hidden\"><main></main></body>");
        assert!(doc.has_class(doc.body(), "hidden"));
        // Only one body exists.
        assert_eq!(doc.elements_by_tag(&TagName::Body).len(), 1);
    }

    #[test]
    fn id_and_class_routed_to_fields() {
        let doc = Document::parse("<section id=\"toc\" class=\"outline wide\"></section>");
        let toc = doc.element_by_id("toc").unwrap();
        let elem = doc.element(toc).unwrap();
        assert!(elem.has_class("outline"));
        assert!(elem.has_class("wide"));
        assert!(elem.get_attribute("id").is_none());
    }

    #[test]
    fn bare_attribute_is_presence_flag() {
        let doc = Document::parse("<section data-chapter data-title=\"Basics\"></section>");
        let section = doc.sections()[0];
        let elem = doc.element(section).unwrap();
        assert!(elem.has_data("chapter"));
        assert_eq!(elem.data("chapter"), Some(""));
        assert_eq!(elem.data("title"), Some("Basics"));
    }

    #[test]
    fn single_quoted_and_unquoted_values() {
        let doc = Document::parse("<section data-title='Intro' data-index=3></section>");
        let elem = doc.element(doc.sections()[0]).unwrap();
        assert_eq!(elem.data("title"), Some("Intro"));
        assert_eq!(elem.data("index"), Some("3"));
    }

    #[test]
    fn comments_and_doctype_skipped() {
        let doc = Document::parse(
            "<!DOCTYPE html><!-- a comment --><body>\
             <section data-title=\"A\"></section>\
             <!-- <section data-title=\"B\"></section> -->\
             </body>",
        );
        assert_eq!(doc.sections().len(), 1);
    }

    #[test]
    fn void_elements_do_not_nest() {
        let doc = Document::parse("<section><br><p>after</p></section>");
        let section = doc.sections()[0];
        // br and p are siblings under section.
        assert_eq!(doc.node(section).children.len(), 2);
    }

    #[test]
    fn self_closing_slash_stripped() {
        let doc = Document::parse("<section><br/><img src=\"x.png\" /></section>");
        let section = doc.sections()[0];
        let children = doc.node(section).children.clone();
        assert_eq!(children.len(), 2);
        assert_eq!(
            doc.element(children[1]).unwrap().get_attribute("src"),
            Some("x.png")
        );
    }

    #[test]
    fn unquoted_value_keeps_trailing_slash() {
        let doc = Document::parse("<section><a href=https://example.org/>link</a></section>");
        let link = doc.first_by_tag(&TagName::A).unwrap();
        assert_eq!(
            doc.element(link).unwrap().get_attribute("href"),
            Some("https://example.org/")
        );
        // The element still nests normally.
        assert_eq!(doc.text_content(link), "link");
    }

    #[test]
    fn unmatched_close_tag_dropped() {
        let doc = Document::parse("<section><p>text</p></div></section>");
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.text_content(doc.sections()[0]), "text");
    }

    #[test]
    fn unclosed_element_closed_at_end() {
        let doc = Document::parse("<section data-title=\"A\"><p>dangling");
        let section = doc.sections()[0];
        assert_eq!(doc.text_content(section), "dangling");
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        let doc = Document::parse("<section data-title=\"a > b\"></section>");
        let elem = doc.element(doc.sections()[0]).unwrap();
        assert_eq!(elem.data("title"), Some("a > b"));
    }

    #[test]
    fn fragment_appends_under_parent() {
        let mut doc = Document::parse("<body><main></main></body>");
        let main = doc.first_by_tag(&TagName::Main).unwrap();
        parse_fragment_into(
            &mut doc,
            main,
            "<section data-title=\"Extra 1\"></section>\
             <section data-title=\"Extra 2\"></section>",
        );
        let sections = doc.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(doc.parent(sections[0]), Some(main));
        assert_eq!(
            doc.element(sections[1]).unwrap().data("title"),
            Some("Extra 2")
        );
    }

    #[test]
    fn fragment_preserves_request_order() {
        let mut doc = Document::parse("<body><main><section data-title=\"First\"></section></main></body>");
        let main = doc.first_by_tag(&TagName::Main).unwrap();
        parse_fragment_into(&mut doc, main, "<section data-title=\"Second\"></section>");
        parse_fragment_into(&mut doc, main, "<section data-title=\"Third\"></section>");
        let titles: Vec<_> = doc
            .sections()
            .iter()
            .map(|&s| doc.element(s).unwrap().data("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn whitespace_only_text_ignored() {
        let doc = Document::parse("<body>\n  <main>\n    <section></section>\n  </main>\n</body>");
        let main = doc.first_by_tag(&TagName::Main).unwrap();
        assert_eq!(doc.node(main).children.len(), 1);
    }

    #[test]
    fn nested_same_tag_elements() {
        let doc = Document::parse("<div id=\"outer\"><div id=\"inner\"></div></div>");
        let outer = doc.element_by_id("outer").unwrap();
        let inner = doc.element_by_id("inner").unwrap();
        assert_eq!(doc.parent(inner), Some(outer));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_title() -> impl Strategy<Value = String> {
            "[A-Za-z][A-Za-z0-9 ]{0,20}"
        }

        proptest! {
            #[test]
            fn section_count_matches_input(titles in proptest::collection::vec(arb_title(), 0..8)) {
                let mut markup = String::from("<body><main>");
                for title in &titles {
                    markup.push_str(&format!("<section data-title=\"{title}\"></section>"));
                }
                markup.push_str("</main></body>");
                let doc = Document::parse(&markup);
                prop_assert_eq!(doc.sections().len(), titles.len());
            }

            #[test]
            fn attribute_values_survive_parse(title in arb_title()) {
                let markup = format!("<section data-title=\"{title}\"></section>");
                let doc = Document::parse(&markup);
                let elem = doc.element(doc.sections()[0]).unwrap();
                prop_assert_eq!(elem.data("title"), Some(title.as_str()));
            }
        }
    }
}
