//! In-memory document model for minitut.
//!
//! A flat arena of nodes indexed by [`NodeId`], with just enough of a DOM
//! surface for the tutorial viewer: element queries by id/tag/attribute,
//! typed `data-*` metadata, class toggling, element creation and insertion,
//! and subtree cloning. The document also carries the pieces of page state
//! the viewer manipulates that live outside the tree in a real browser:
//! the window title, the URL fragment, and the scroll offset.
//!
//! Nothing here talks to a real browser; a host adapter is expected to
//! mirror this model into whatever display it drives.

pub mod parser;

pub use parser::parse_fragment_into;

/// Index of a node in the document arena.
pub type NodeId = usize;

// -----------------------------------------------------------------------
// Tags and elements
// -----------------------------------------------------------------------

/// Element tag names the viewer cares about. Anything else is preserved
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagName {
    Body,
    Main,
    Section,
    Nav,
    A,
    Ol,
    Li,
    H2,
    H3,
    Div,
    Pre,
    Code,
    Other(String),
}

impl TagName {
    /// Map a lowercase tag name to a `TagName`.
    pub fn from_name(name: &str) -> TagName {
        match name {
            "body" => TagName::Body,
            "main" => TagName::Main,
            "section" => TagName::Section,
            "nav" => TagName::Nav,
            "a" => TagName::A,
            "ol" => TagName::Ol,
            "li" => TagName::Li,
            "h2" => TagName::H2,
            "h3" => TagName::H3,
            "div" => TagName::Div,
            "pre" => TagName::Pre,
            "code" => TagName::Code,
            other => TagName::Other(other.to_string()),
        }
    }

    /// The lowercase tag name.
    pub fn as_str(&self) -> &str {
        match self {
            TagName::Body => "body",
            TagName::Main => "main",
            TagName::Section => "section",
            TagName::Nav => "nav",
            TagName::A => "a",
            TagName::Ol => "ol",
            TagName::Li => "li",
            TagName::H2 => "h2",
            TagName::H3 => "h3",
            TagName::Div => "div",
            TagName::Pre => "pre",
            TagName::Code => "code",
            TagName::Other(name) => name,
        }
    }
}

/// Inline style properties the viewer writes on `<body>`. An empty string
/// means "unset", matching the browser behavior of assigning `""` to a
/// style property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub background_color: String,
    pub background_image: String,
}

/// An element node: tag, optional id, class list, and attributes.
///
/// `id` and `class` are kept out of the attribute list so class toggling
/// and id lookup stay cheap; all other attributes (including `data-*`)
/// live in `attrs` in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: TagName,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub style: InlineStyle,
}

impl Element {
    /// Create an element with no id, classes, or attributes.
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            style: InlineStyle::default(),
        }
    }

    /// Get an attribute value (not `id`/`class`).
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute is present, even with an empty value.
    /// `data-chapter` markers rely on presence, not value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Set (or replace) an attribute value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Get a `data-*` metadata value: `data("title")` reads `data-title`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.strip_prefix("data-") == Some(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether a `data-*` entry is present, even with an empty value.
    pub fn has_data(&self, key: &str) -> bool {
        self.attrs
            .iter()
            .any(|(n, _)| n.strip_prefix("data-") == Some(key))
    }

    /// Set a `data-*` metadata value.
    pub fn set_data(&mut self, key: &str, value: &str) {
        let name = format!("data-{key}");
        self.set_attribute(&name, value);
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

// -----------------------------------------------------------------------
// Nodes
// -----------------------------------------------------------------------

/// Node payload: an element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

/// A node in the arena. Children are ordered; document order is a
/// preorder walk from the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

// -----------------------------------------------------------------------
// Document
// -----------------------------------------------------------------------

/// The document: node arena rooted at `<body>`, plus the out-of-tree page
/// state the viewer drives (window title, URL fragment, scroll offset).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Node arena. Index 0 is always the `<body>` element.
    pub nodes: Vec<Node>,
    /// Window title (`document.title`).
    pub title: String,
    /// Current URL fragment without the leading `#`.
    pub fragment: String,
    /// Vertical scroll offset of the window.
    pub scroll_y: i32,
}

impl Document {
    /// Create an empty document containing only a `<body>` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(Element::new(TagName::Body)),
                parent: None,
                children: Vec::new(),
            }],
            title: String::new(),
            fragment: String::new(),
            scroll_y: 0,
        }
    }

    /// Parse a document from markup. See [`parser`] for the accepted
    /// subset.
    pub fn parse(markup: &str) -> Self {
        parser::parse_document(markup)
    }

    /// The `<body>` root.
    pub fn body(&self) -> NodeId {
        0
    }

    // ---------------------------------------------------------------
    // Node access
    // ---------------------------------------------------------------

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The parent of a node, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Borrow the element payload of a node, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id].kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Text(_) => None,
        }
    }

    /// Mutably borrow the element payload of a node.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id].kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Text(_) => None,
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// All element ids in document order (preorder from body).
    pub fn all_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.body(), &mut out);
        out
    }

    fn walk(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[id].kind, NodeKind::Element(_)) {
            out.push(id);
        }
        // Children are cloned cheaply (Vec<usize>) so the borrow does not
        // outlive the recursion.
        for child in self.nodes[id].children.clone() {
            self.walk(child, out);
        }
    }

    /// All elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &TagName) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|e| e.tag == *tag))
            .collect()
    }

    /// First element with the given tag, in document order.
    pub fn first_by_tag(&self, tag: &TagName) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.tag == *tag))
    }

    /// Element with the given id attribute.
    pub fn element_by_id(&self, id_attr: &str) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.id.as_deref() == Some(id_attr)))
    }

    /// All `<section>` elements in document order.
    pub fn sections(&self) -> Vec<NodeId> {
        self.elements_by_tag(&TagName::Section)
    }

    /// The `<section>` whose `data-index` equals `index`.
    pub fn section_by_index(&self, index: usize) -> Option<NodeId> {
        let want = index.to_string();
        self.sections()
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.data("index") == Some(want.as_str())))
    }

    /// All element descendants of `root` (excluding `root`), preorder.
    pub fn descendant_elements(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.nodes[root].children.clone() {
            self.walk(child, &mut out);
        }
        out
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: TagName) -> NodeId {
        self.push_node(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Insert `child` as the first child of `parent`.
    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.insert(0, child);
    }

    /// Detach a node from its current parent. The node stays in the arena
    /// (ids are never reused) but is no longer reachable from the body.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    /// Remove all children of a node.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in std::mem::take(&mut self.nodes[id].children) {
            self.nodes[child].parent = None;
        }
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        let text_node = self.create_text(text);
        self.append_child(id, text_node);
    }

    /// Concatenated text of all text descendants of `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let NodeKind::Text(text) = &self.nodes[id].kind {
            out.push_str(text);
        }
        for child in self.nodes[id].children.clone() {
            self.collect_text(child, out);
        }
    }

    /// Deep-copy the children of `source` and append the copies to
    /// `target`, replacing any existing children of `target`.
    pub fn clone_children_into(&mut self, source: NodeId, target: NodeId) {
        self.clear_children(target);
        for child in self.nodes[source].children.clone() {
            let copy = self.deep_copy(child);
            self.append_child(target, copy);
        }
    }

    fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id].kind.clone();
        let copy = self.push_node(kind);
        for child in self.nodes[id].children.clone() {
            let child_copy = self.deep_copy(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    // ---------------------------------------------------------------
    // Class and attribute conveniences
    // ---------------------------------------------------------------

    /// Add a class to an element node. No-op on text nodes.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.add_class(class);
        }
    }

    /// Remove a class from an element node. No-op on text nodes.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.remove_class(class);
        }
    }

    /// Whether an element node carries a class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
