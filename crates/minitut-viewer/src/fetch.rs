//! Content download seam.
//!
//! Large tutorials split their sections across extra files that are
//! fetched at startup and appended to `<main>` before indexing. The
//! fetch itself is behind [`ContentFetcher`] so the viewer never touches
//! a network stack; hosts plug in whatever transport they have (and own
//! per-request timeouts). [`MemoryFetcher`] is the in-memory
//! implementation used by tests.

use std::collections::BTreeMap;

use minitut_dom::{Document, TagName, parse_fragment_into};
use minitut_types::error::{Result, ViewerError};

/// Fetches one content fragment by URL.
pub trait ContentFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Download all configured fragments and append them to `<main>` in
/// request order.
///
/// All-or-nothing: the first failed fetch aborts startup with an error,
/// and nothing is appended. Responses are parsed as `<section>` fragments,
/// not full documents.
pub fn download_content(
    doc: &mut Document,
    urls: &[String],
    fetcher: &dyn ContentFetcher,
) -> Result<()> {
    if urls.is_empty() {
        return Ok(());
    }
    let Some(main) = doc.first_by_tag(&TagName::Main) else {
        log::warn!("no <main> element; skipping content download");
        return Ok(());
    };

    // Complete every fetch before touching the document, so a late
    // failure cannot leave a partially merged tree.
    let mut fragments = Vec::with_capacity(urls.len());
    for url in urls {
        let body = fetcher
            .fetch(url)
            .map_err(|e| ViewerError::Fetch(format!("{url}: {e}")))?;
        fragments.push(body);
    }

    for fragment in &fragments {
        parse_fragment_into(doc, main, fragment);
    }
    log::debug!("merged {} downloaded fragment(s)", fragments.len());
    Ok(())
}

/// A fully in-memory fetcher backed by a URL-to-body map.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    files: BTreeMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response body for a URL.
    pub fn insert(&mut self, url: &str, body: &str) {
        self.files.insert(url.to_string(), body.to_string());
    }
}

impl ContentFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| ViewerError::Fetch(format!("not found: {url}")))
    }
}
