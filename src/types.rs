//! Navigation value types shared by the generator, the store, and the renderer.
//!
//! These are serialized only for the `nav` CLI snapshot; nothing here is ever
//! persisted between page views.

use serde::Serialize;

/// What kind of target a navigation item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    /// In-page anchor (`#section`).
    Anchor,
    /// Application route (`/web-design/poole`).
    Page,
    /// Off-site link, opened in a new tab.
    External,
}

/// A single entry in a navigation list.
///
/// Constructed by [`crate::items::generate`] for a given page context and
/// treated as immutable afterwards, except for the `is_active` flag which
/// [`crate::store::NavigationStore::mark_active_item`] maintains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationItem {
    /// Unique within its list.
    pub id: String,
    /// Display label.
    pub name: String,
    pub href: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<NavigationItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub mobile_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub desktop_only: bool,
}

impl NavigationItem {
    pub fn anchor(id: &str, name: &str, section: &str) -> Self {
        Self::new(id, name, format!("#{section}"), ItemType::Anchor)
    }

    pub fn page(id: &str, name: &str, href: impl Into<String>) -> Self {
        Self::new(id, name, href.into(), ItemType::Page)
    }

    pub fn external(id: &str, name: &str, href: impl Into<String>) -> Self {
        Self::new(id, name, href.into(), ItemType::External)
    }

    fn new(id: &str, name: &str, href: String, item_type: ItemType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            href,
            item_type,
            is_active: false,
            sub_items: Vec::new(),
            mobile_only: false,
            desktop_only: false,
        }
    }

    pub fn with_sub_items(mut self, sub_items: Vec<NavigationItem>) -> Self {
        self.sub_items = sub_items;
        self
    }

    pub fn mobile_only(mut self) -> Self {
        self.mobile_only = true;
        self.desktop_only = false;
        self
    }

    /// Whether this item should be shown on a viewport of the given size.
    pub fn visible_on(&self, viewport: crate::context::ViewportSize) -> bool {
        use crate::context::ViewportSize;
        match viewport {
            ViewportSize::Mobile => !self.desktop_only,
            ViewportSize::Tablet | ViewportSize::Desktop => !self.mobile_only,
        }
    }
}
