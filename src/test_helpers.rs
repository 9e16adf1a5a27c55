//! Shared test utilities for the tidemark test suite.
//!
//! Provides a small fixed town registry, a ready-made store over it, and
//! extractors for navigation item lists.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut view = PageView::mount(
//!     "/web-design/poole",
//!     Arc::new(three_town_registry()),
//!     &NavigationConfig::default(),
//!     SimulatedWindow::at(0.0, 375.0),
//! );
//! assert_eq!(ids(&view.state().sub_navigation_items), vec!["bournemouth", "weymouth"]);
//! ```

use std::sync::Arc;

use crate::config::NavigationConfig;
use crate::store::NavigationStore;
use crate::towns::{Town, TownRegistry};
use crate::types::NavigationItem;

// =========================================================================
// Fixtures
// =========================================================================

/// Bournemouth, Poole and Weymouth, in that (population) order.
pub fn three_town_registry() -> TownRegistry {
    let town = |slug: &str, name: &str, population: u32, postcode: &str| Town {
        slug: slug.to_string(),
        name: name.to_string(),
        population,
        postcode: postcode.to_string(),
        key_industries: vec!["Tourism".to_string()],
    };
    TownRegistry::new(vec![
        town("weymouth", "Weymouth", 53_000, "DT4"),
        town("poole", "Poole", 151_500, "BH15"),
        town("bournemouth", "Bournemouth", 187_500, "BH1"),
    ])
    .unwrap()
}

/// A store over [`three_town_registry`] with default navigation settings.
pub fn test_store() -> NavigationStore {
    NavigationStore::new(Arc::new(three_town_registry()), &NavigationConfig::default())
}

/// Item ids in list order.
pub fn ids(list: &[NavigationItem]) -> Vec<&str> {
    list.iter().map(|i| i.id.as_str()).collect()
}
