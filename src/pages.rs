//! Markdown content pages (privacy policy, terms, cookie notice).
//!
//! Pages live in `content/pages/`. Each `.md` file becomes a page at
//! `/{slug}`:
//!
//! ```text
//! content/pages/
//! ├── 010-privacy.md      # /privacy, listed in the footer
//! ├── 020-terms.md        # /terms, listed in the footer
//! ├── 030-github.md       # only a URL → external footer link, no page
//! └── accessibility.md    # /accessibility, generated but not listed
//! ```
//!
//! None of these routes has its own navigation context; they render with the
//! homepage fallback navigation.

use crate::types::NavigationItem;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PAGES_DIR: &str = "pages";

/// Slugs that would shadow a generated route.
const RESERVED_SLUGS: &[&str] = &["web-design", "assets", "404"];

#[derive(Error, Debug)]
pub enum PagesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("page {0:?} uses a reserved route")]
    Reserved(String),
    #[error("more than one page resolves to /{0}")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    /// First `# heading`, or the link title.
    pub title: String,
    /// Footer label: slug with dashes as spaces.
    pub link_title: String,
    pub slug: String,
    /// Raw markdown, or the URL for link pages.
    pub body: String,
    /// Numbered pages are listed in the footer.
    pub listed: bool,
    pub sort_key: u32,
    pub is_link: bool,
}

impl ContentPage {
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

/// Load every markdown page under `content_root/pages`, in footer order.
///
/// A missing directory means no pages.
pub fn load_pages(content_root: &Path) -> Result<Vec<ContentPage>, PagesError> {
    let dir = content_root.join(PAGES_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut md_files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case("md"))
        })
        .collect();
    md_files.sort();

    let mut pages = Vec::new();
    let mut seen = HashSet::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (listed, sort_key, slug) = match split_number_prefix(&stem) {
            Some((num, name)) => (true, num, name.to_string()),
            None => (false, u32::MAX, stem.clone()),
        };
        if RESERVED_SLUGS.contains(&slug.as_str()) || slug.is_empty() {
            return Err(PagesError::Reserved(stem));
        }
        if !seen.insert(slug.clone()) {
            return Err(PagesError::Duplicate(slug));
        }

        let link_title = slug.replace('-', " ");
        let content = fs::read_to_string(md_path)?;
        let trimmed = content.trim();
        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let title = if is_link {
            link_title.clone()
        } else {
            content
                .lines()
                .find(|line| line.starts_with("# "))
                .map(|line| line.trim_start_matches("# ").trim().to_string())
                .unwrap_or_else(|| link_title.clone())
        };
        let body = if is_link { trimmed.to_string() } else { content };

        pages.push(ContentPage {
            title,
            link_title,
            slug,
            body,
            listed,
            sort_key,
            is_link,
        });
    }

    pages.sort_by_key(|p| p.sort_key);
    log::debug!("loaded {} content page(s) from {}", pages.len(), dir.display());
    Ok(pages)
}

/// Footer links for listed pages: internal pages and external link pages.
pub fn footer_items(pages: &[ContentPage]) -> Vec<NavigationItem> {
    pages
        .iter()
        .filter(|p| p.listed)
        .map(|p| {
            if p.is_link {
                NavigationItem::external(&p.slug, &p.link_title, p.body.as_str())
            } else {
                NavigationItem::page(&p.slug, &p.link_title, p.path())
            }
        })
        .collect()
}

/// `"010-privacy"` → `Some((10, "privacy"))`.
fn split_number_prefix(stem: &str) -> Option<(u32, &str)> {
    let (prefix, rest) = stem.split_once('-')?;
    let num = prefix.parse::<u32>().ok()?;
    Some((num, rest))
}
