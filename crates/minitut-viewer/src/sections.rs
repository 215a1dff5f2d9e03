//! Section preparation: clone resolution, whitespace gobbling, index
//! assignment, visibility, and heading insertion.
//!
//! These run once at startup, in this order: gobble, clone, index, hide,
//! headings. Cloning must precede indexing so clones receive their own
//! index.

use minitut_dom::{Document, NodeId, NodeKind, TagName};

use crate::text;

/// The id of the table-of-contents section. It is never indexed and
/// never hidden.
pub const TOC_ID: &str = "toc";

/// The class that hides an element.
pub const HIDDEN_CLASS: &str = "hidden";

/// Resolve an id selector (`#id` or bare `id`) to an element.
pub fn resolve_id_selector(doc: &Document, selector: &str) -> Option<NodeId> {
    let id = selector.strip_prefix('#').unwrap_or(selector);
    doc.element_by_id(id)
}

fn is_toc(doc: &Document, section: NodeId) -> bool {
    doc.element(section)
        .is_some_and(|e| e.id.as_deref() == Some(TOC_ID))
}

/// Clean every text run under an element flagged `data-gobble`,
/// including text nested in child elements like `<pre><code>`.
pub fn gobble_whitespace(doc: &mut Document) {
    for id in doc.all_elements() {
        if !doc.element(id).is_some_and(|e| e.has_data("gobble")) {
            continue;
        }
        gobble_subtree(doc, id);
    }
}

fn gobble_subtree(doc: &mut Document, id: NodeId) {
    for child in doc.node(id).children.clone() {
        let cleaned = match &doc.node(child).kind {
            NodeKind::Text(raw) => Some(text::gobble(raw)),
            NodeKind::Element(_) => None,
        };
        match cleaned {
            Some(cleaned) => {
                if let NodeKind::Text(raw) = &mut doc.nodes[child].kind {
                    *raw = cleaned;
                }
            },
            None => gobble_subtree(doc, child),
        }
    }
}

/// Resolve `<section data-clone="#sec-xxx">`: copy the referenced
/// section's children, and its title unless the clone sets its own.
/// A dangling reference leaves the section untouched.
pub fn resolve_clones(doc: &mut Document) {
    for section in doc.sections() {
        let Some(selector) = doc
            .element(section)
            .and_then(|e| e.data("clone"))
            .map(str::to_string)
        else {
            continue;
        };
        let Some(source) = resolve_id_selector(doc, &selector) else {
            log::warn!("data-clone target not found: {selector}");
            continue;
        };
        doc.clone_children_into(source, section);

        let has_own_title = doc.element(section).is_some_and(|e| e.data("title").is_some());
        if !has_own_title
            && let Some(title) = doc
                .element(source)
                .and_then(|e| e.data("title"))
                .map(str::to_string)
            && let Some(elem) = doc.element_mut(section)
        {
            elem.set_data("title", &title);
        }
    }
}

/// Assign `data-index` 1..N to every section except the TOC and chapter
/// markers. Returns N.
pub fn assign_indices(doc: &mut Document) -> usize {
    let mut amount = 0;
    for section in doc.sections() {
        if is_toc(doc, section) {
            continue;
        }
        if doc.element(section).is_some_and(|e| e.has_data("chapter")) {
            continue;
        }
        amount += 1;
        if let Some(elem) = doc.element_mut(section) {
            elem.set_data("index", &amount.to_string());
        }
    }
    amount
}

/// Add the `hidden` class to every section except the TOC.
pub fn hide_all(doc: &mut Document) {
    for section in doc.sections() {
        if is_toc(doc, section) {
            continue;
        }
        doc.add_class(section, HIDDEN_CLASS);
    }
}

/// Insert an `<h2>` with the section title at the top of each titled
/// section (except the TOC). Callers skip this entirely when an external
/// section-title element is configured.
pub fn insert_headings(doc: &mut Document) {
    for section in doc.sections() {
        if is_toc(doc, section) {
            continue;
        }
        let Some(title) = doc
            .element(section)
            .and_then(|e| e.data("title"))
            .map(str::to_string)
        else {
            continue;
        };
        let heading = doc.create_element(TagName::H2);
        doc.set_text_content(heading, &title);
        doc.insert_first(section, heading);
    }
}
