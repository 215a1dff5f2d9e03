//! Slide-style tutorial viewer.
//!
//! [`TutorialViewer`] turns a document of `<section>` elements into a
//! slide deck: at most one indexed section is visible at a time, a table
//! of contents links to all of them, and keyboard, touch, hash and
//! history events move between them. The document is the in-memory model
//! from `minitut_dom`; host adapters feed [`InputEvent`]s in and mirror
//! the mutated document out.
//!
//! Startup runs once per document: download extra content, clean
//! whitespace, resolve clones, number the sections, hide them all, insert
//! headings, build the outline, then show the section named in the URL
//! fragment.

pub mod config;
pub mod fetch;
pub mod history;
pub mod nav;
pub mod sections;
pub mod text;
pub mod toc;

pub use config::{TocStyle, ViewerConfig};
pub use fetch::{ContentFetcher, MemoryFetcher};
pub use history::{HistoryEntry, HistoryOp, HistorySink, HistoryState, MemoryHistory};
pub use nav::{NavMode, NavState, parse_fragment};

use minitut_dom::{Document, TagName};
use minitut_types::error::Result;
use minitut_types::input::{InputEvent, Key, PointerKind, SwipeDirection};

use crate::history::HistorySync;
use crate::sections::HIDDEN_CLASS;

/// The tutorial viewer component.
///
/// Construct with a [`ViewerConfig`], optionally attach a history sink,
/// call [`start`](Self::start) once, then feed input events through
/// [`handle_input`](Self::handle_input).
pub struct TutorialViewer {
    config: ViewerConfig,
    nav: NavState,
    title_prefix: String,
    history: Option<HistorySync>,
}

impl TutorialViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            nav: NavState::new(),
            title_prefix: String::new(),
            history: None,
        }
    }

    /// Attach a history sink. Section transitions are mirrored into it;
    /// without a sink the viewer keeps no history.
    pub fn set_history_sink(&mut self, sink: Box<dyn HistorySink>) {
        self.history = Some(HistorySync::new(sink));
    }

    /// Currently shown section index (0 before [`start`](Self::start)).
    pub fn current_index(&self) -> usize {
        self.nav.current
    }

    /// Number of indexed sections.
    pub fn amount(&self) -> usize {
        self.nav.amount
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Prepare the document and show the initial section.
    ///
    /// The initial index comes from the document's URL fragment; an
    /// unparseable fragment means section 1. The window title at this
    /// point becomes the prefix for all later title updates.
    pub fn start(&mut self, doc: &mut Document, fetcher: &dyn ContentFetcher) -> Result<()> {
        self.title_prefix = doc.title.clone();
        let initial = parse_fragment(&doc.fragment);

        fetch::download_content(doc, &self.config.download, fetcher)?;
        sections::gobble_whitespace(doc);
        sections::resolve_clones(doc);
        self.nav.amount = sections::assign_indices(doc);
        sections::hide_all(doc);
        if self.config.section_title.is_none() {
            sections::insert_headings(doc);
        }
        toc::build(doc, self.config.toc_style);

        log::info!("viewer started with {} section(s)", self.nav.amount);
        self.show_section(doc, initial);
        Ok(())
    }

    /// Show the section with the given index, clamped into range.
    ///
    /// Updates visibility, body background, scroll position, window
    /// title, the external section-title element, the TOC highlight, the
    /// neighbor links in `<nav>`, and the URL fragment. In normal mode
    /// the transition is also recorded in history.
    pub fn show_section(&mut self, doc: &mut Document, requested: i64) {
        let index = self.nav.clamp(requested);
        self.nav.current = index;

        sections::hide_all(doc);
        let Some(section) = doc.section_by_index(index) else {
            log::debug!("no section with index {index}");
            return;
        };
        doc.remove_class(section, HIDDEN_CLASS);

        let color = doc
            .element(section)
            .and_then(|e| e.data("background-color"))
            .unwrap_or("")
            .to_string();
        let image = doc
            .element(section)
            .and_then(|e| e.data("background-image"))
            .filter(|v| !v.is_empty())
            .map(|v| format!("url({v})"))
            .unwrap_or_default();
        if let Some(body) = doc.element_mut(doc.body()) {
            body.style.background_color = color;
            body.style.background_image = image;
        }

        doc.scroll_y = 0;

        let title = doc
            .element(section)
            .and_then(|e| e.data("title"))
            .map(str::to_string);
        doc.title = match &title {
            Some(title) => format!("{} – {}", self.title_prefix, title),
            None => self.title_prefix.clone(),
        };

        if let Some(selector) = self.config.section_title.clone()
            && let Some(target) = sections::resolve_id_selector(doc, &selector)
        {
            doc.set_text_content(target, title.as_deref().unwrap_or(""));
        }

        toc::highlight(doc, index);
        self.rebuild_nav_links(doc, index);

        // Unhide the body; it starts hidden so the initial load does not
        // flash every section at once.
        doc.remove_class(doc.body(), HIDDEN_CLASS);

        doc.fragment = index.to_string();
        if self.nav.mode == NavMode::Normal
            && let Some(sync) = &mut self.history
        {
            sync.record(index);
        }
    }

    /// Replace the `<nav>` content with links to the titled neighbors of
    /// `index`. A missing or untitled neighbor gets no link at all.
    fn rebuild_nav_links(&self, doc: &mut Document, index: usize) {
        let Some(nav) = doc.first_by_tag(&TagName::Nav) else {
            return;
        };
        doc.clear_children(nav);

        let mut neighbors = Vec::new();
        if index > 1 {
            neighbors.push(index - 1);
        }
        if index < self.nav.amount {
            neighbors.push(index + 1);
        }
        for neighbor in neighbors {
            let Some(section) = doc.section_by_index(neighbor) else {
                continue;
            };
            let Some(title) = doc
                .element(section)
                .and_then(|e| e.data("title"))
                .map(str::to_string)
            else {
                continue;
            };
            let link = doc.create_element(TagName::A);
            if let Some(a) = doc.element_mut(link) {
                a.set_attribute("href", &format!("#{neighbor}"));
            }
            doc.set_text_content(link, &title);
            doc.append_child(nav, link);
        }
    }

    /// Dispatch one input event. Returns whether the viewer consumed it;
    /// unconsumed events should keep their platform default behavior.
    pub fn handle_input(&mut self, doc: &mut Document, event: &InputEvent) -> bool {
        match event {
            InputEvent::HashChange { fragment } => {
                self.show_section(doc, parse_fragment(fragment));
                true
            },
            InputEvent::KeyUp { key, modifiers } => {
                if !self.config.keyboard_nav || modifiers.any() {
                    return false;
                }
                match key {
                    Key::ArrowLeft => {
                        if self.nav.has_previous() {
                            self.show_section(doc, self.nav.current as i64 - 1);
                        }
                        true
                    },
                    Key::ArrowRight | Key::Enter | Key::Space => {
                        if self.nav.has_next() {
                            self.show_section(doc, self.nav.current as i64 + 1);
                        }
                        true
                    },
                    Key::Other => false,
                }
            },
            InputEvent::Swipe { direction, pointer } => {
                // Mouse drags stay available for text selection.
                if !self.config.touch_nav || *pointer == PointerKind::Mouse {
                    return false;
                }
                match direction {
                    SwipeDirection::Left => {
                        if self.nav.has_next() {
                            self.show_section(doc, self.nav.current as i64 + 1);
                        }
                    },
                    SwipeDirection::Right => {
                        if self.nav.has_previous() {
                            self.show_section(doc, self.nav.current as i64 - 1);
                        }
                    },
                }
                true
            },
            InputEvent::Click { target } => self.handle_click(doc, *target),
            InputEvent::HistoryPop { state, fragment } => {
                let index = match history::parse_state(state.as_deref()) {
                    Some(state) => state.index as i64,
                    None => parse_fragment(fragment),
                };
                self.nav.mode = NavMode::ReplayingHistory;
                self.show_section(doc, index);
                self.nav.mode = NavMode::Normal;
                true
            },
        }
    }

    /// Resolve a click against the document: the hamburger button toggles
    /// the outline panel, and section links (`href="#<index>"`) navigate.
    /// Other clicks, including links to other targets, pass through.
    fn handle_click(&mut self, doc: &mut Document, target: usize) -> bool {
        if target >= doc.nodes.len() {
            log::debug!("click target {target} outside the document");
            return false;
        }
        let mut id = Some(target);
        while let Some(node) = id {
            if doc.has_class(node, toc::HAMBURGER_BUTTON_CLASS) {
                toc::toggle_menu(doc);
                return true;
            }
            if doc.element(node).is_some_and(|e| e.tag == TagName::A) {
                let index = doc
                    .element(node)
                    .and_then(|e| e.get_attribute("href"))
                    .and_then(|href| href.strip_prefix('#'))
                    .and_then(|rest| rest.parse::<i64>().ok());
                return match index {
                    Some(index) => {
                        self.show_section(doc, index);
                        true
                    },
                    None => false,
                };
            }
            id = doc.parent(node);
        }
        false
    }
}
