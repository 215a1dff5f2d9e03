//! Table-of-contents construction and highlighting.
//!
//! The outline is derived once at startup from the indexed sections:
//! chapter markers become `<h3>` headings and close the open list group;
//! indexed, titled sections become `<li data-index><a href="#i">` entries
//! in the current `<ol>`. Untitled sections do not appear.

use minitut_dom::{Document, NodeId, TagName};

use crate::config::TocStyle;
use crate::sections::{HIDDEN_CLASS, TOC_ID};

/// Class of the hamburger toggle button.
pub const HAMBURGER_BUTTON_CLASS: &str = "toc-hamburger-button";

/// Class of the collapsible hamburger panel.
pub const HAMBURGER_MENU_CLASS: &str = "toc-hamburger-menu";

/// Class marking the outline entry of the current section.
pub const ACTIVE_CLASS: &str = "active";

/// Build the outline into the `#toc` container. Without a container this
/// is a no-op.
pub fn build(doc: &mut Document, style: TocStyle) {
    let Some(toc) = doc.element_by_id(TOC_ID) else {
        log::debug!("no #{TOC_ID} container; skipping outline");
        return;
    };

    let mut outline: Vec<NodeId> = Vec::new();
    let mut list: Option<NodeId> = None;

    for section in doc.sections() {
        let Some(elem) = doc.element(section) else {
            continue;
        };
        let Some(title) = elem.data("title").map(str::to_string) else {
            continue;
        };

        if elem.has_data("chapter") {
            let heading = doc.create_element(TagName::H3);
            doc.set_text_content(heading, &title);
            outline.push(heading);
            list = None;
            continue;
        }
        let Some(index) = elem.data("index").map(str::to_string) else {
            continue;
        };

        let list_id = match list {
            Some(id) => id,
            None => {
                let id = doc.create_element(TagName::Ol);
                outline.push(id);
                list = Some(id);
                id
            },
        };

        let link = doc.create_element(TagName::A);
        if let Some(a) = doc.element_mut(link) {
            a.set_attribute("href", &format!("#{index}"));
        }
        doc.set_text_content(link, &title);

        let item = doc.create_element(TagName::Li);
        if let Some(li) = doc.element_mut(item) {
            li.set_data("index", &index);
        }
        doc.append_child(item, link);
        doc.append_child(list_id, item);
    }

    match style {
        TocStyle::Permanent => {
            for id in outline {
                doc.append_child(toc, id);
            }
        },
        TocStyle::Hamburger => {
            let button = doc.create_element(TagName::Div);
            doc.add_class(button, HAMBURGER_BUTTON_CLASS);
            doc.add_class(button, "icon-menu");

            let menu = doc.create_element(TagName::Div);
            doc.add_class(menu, HAMBURGER_MENU_CLASS);
            doc.add_class(menu, HIDDEN_CLASS);
            for id in outline {
                doc.append_child(menu, id);
            }

            doc.append_child(toc, button);
            doc.append_child(toc, menu);
        },
    }
}

/// The hamburger toggle button, if the outline was built in hamburger
/// mode.
pub fn hamburger_button(doc: &Document) -> Option<NodeId> {
    doc.all_elements()
        .into_iter()
        .find(|&id| doc.has_class(id, HAMBURGER_BUTTON_CLASS))
}

/// Flip the hamburger panel's visibility.
pub fn toggle_menu(doc: &mut Document) {
    let Some(menu) = doc
        .all_elements()
        .into_iter()
        .find(|&id| doc.has_class(id, HAMBURGER_MENU_CLASS))
    else {
        return;
    };
    if doc.has_class(menu, HIDDEN_CLASS) {
        doc.remove_class(menu, HIDDEN_CLASS);
    } else {
        doc.add_class(menu, HIDDEN_CLASS);
    }
}

/// Move the `active` highlight to the outline entry for `index`.
/// Exactly one entry carries the highlight afterwards (zero if the index
/// has no entry, e.g. an untitled section).
pub fn highlight(doc: &mut Document, index: usize) {
    let Some(toc) = doc.element_by_id(TOC_ID) else {
        return;
    };
    let want = index.to_string();
    let mut target: Option<NodeId> = None;

    for item in doc.descendant_elements(toc) {
        let Some(elem) = doc.element(item) else {
            continue;
        };
        if elem.tag != TagName::Li {
            continue;
        }
        let is_target = elem.data("index") == Some(want.as_str());
        for child in doc.node(item).children.clone() {
            if doc.element(child).is_some_and(|e| e.tag == TagName::A) {
                doc.remove_class(child, ACTIVE_CLASS);
                if is_target {
                    target = Some(child);
                }
            }
        }
    }

    if let Some(link) = target {
        doc.add_class(link, ACTIVE_CLASS);
    }
}
