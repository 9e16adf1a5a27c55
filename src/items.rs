//! Navigation item generation.
//!
//! Maps a page context and a registry snapshot to the primary and
//! sub-navigation lists. Output depends on nothing else, so the server render
//! and any later re-render of the same context produce identical lists.
//!
//! ```text
//! homepage    Work · About · Services · Contact          (in-page anchors)
//! web-design  Home · Web Design · Work · Contact         + every town
//! town        Home · Web Design▾ · Work · Contact · Areas + sibling towns
//! ```

use crate::context::{PageContext, Route, WEB_DESIGN_PATH, town_path};
use crate::towns::TownRegistry;
use crate::types::NavigationItem;
use serde::Serialize;

/// The two lists the store holds for a context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedItems {
    pub navigation_items: Vec<NavigationItem>,
    pub sub_navigation_items: Vec<NavigationItem>,
}

/// Generate both navigation lists for `context`.
///
/// An unknown town slug yields an empty sub-navigation list; the primary
/// list is always produced.
pub fn generate(context: &PageContext, registry: &TownRegistry) -> GeneratedItems {
    match &context.route {
        Route::Homepage => GeneratedItems {
            navigation_items: homepage_items(),
            sub_navigation_items: Vec::new(),
        },
        Route::WebDesign => GeneratedItems {
            navigation_items: service_items(Vec::new()),
            sub_navigation_items: town_items(registry, None),
        },
        Route::Town { town_slug } => {
            if !registry.contains(town_slug) {
                log::warn!("unknown town slug {town_slug:?}, sub-navigation left empty");
                return GeneratedItems {
                    navigation_items: service_items(Vec::new()),
                    sub_navigation_items: Vec::new(),
                };
            }
            let siblings = town_items(registry, Some(town_slug));
            let mut navigation_items = service_items(siblings.clone());
            navigation_items.push(
                NavigationItem::page("areas", "Areas we cover", WEB_DESIGN_PATH)
                    .with_sub_items(siblings.clone())
                    .mobile_only(),
            );
            GeneratedItems {
                navigation_items,
                sub_navigation_items: siblings,
            }
        }
    }
}

fn homepage_items() -> Vec<NavigationItem> {
    vec![
        NavigationItem::anchor("work", "Work", "work"),
        NavigationItem::anchor("about", "About", "about"),
        NavigationItem::anchor("services", "Services", "services"),
        NavigationItem::anchor("contact", "Contact", "contact"),
    ]
}

/// Primary list shared by the web design landing page and town pages.
///
/// `web_design_children` become the desktop dropdown under "Web Design".
fn service_items(web_design_children: Vec<NavigationItem>) -> Vec<NavigationItem> {
    vec![
        NavigationItem::page("home", "Home", "/"),
        NavigationItem::page("web-design", "Web Design", WEB_DESIGN_PATH)
            .with_sub_items(web_design_children),
        NavigationItem::page("work", "Work", "/#work"),
        NavigationItem::anchor("contact", "Contact", "contact"),
    ]
}

/// One page item per registry town in listing order, minus `exclude`.
fn town_items(registry: &TownRegistry, exclude: Option<&str>) -> Vec<NavigationItem> {
    registry
        .iter()
        .filter(|town| Some(town.slug.as_str()) != exclude)
        .map(|town| NavigationItem::page(&town.slug, &town.name, town_path(&town.slug)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ids, three_town_registry};
    use crate::types::ItemType;
    use pretty_assertions::assert_eq;

    fn ctx(route: Route) -> PageContext {
        PageContext::new(route)
    }

    fn town(slug: &str) -> Route {
        Route::Town {
            town_slug: slug.to_string(),
        }
    }

    #[test]
    fn homepage_has_fixed_anchor_list() {
        let items = generate(&ctx(Route::Homepage), &three_town_registry());
        assert_eq!(ids(&items.navigation_items), vec!["work", "about", "services", "contact"]);
        assert!(items.navigation_items.iter().all(|i| i.item_type == ItemType::Anchor));
        assert!(items.sub_navigation_items.is_empty());
    }

    #[test]
    fn web_design_lists_every_town() {
        let items = generate(&ctx(Route::WebDesign), &three_town_registry());
        assert_eq!(ids(&items.navigation_items), vec!["home", "web-design", "work", "contact"]);
        assert_eq!(
            ids(&items.sub_navigation_items),
            vec!["bournemouth", "poole", "weymouth"]
        );
    }

    #[test]
    fn town_excludes_itself() {
        let items = generate(&ctx(town("poole")), &three_town_registry());
        let subs = &items.sub_navigation_items;
        assert_eq!(ids(subs), vec!["bournemouth", "weymouth"]);
        for item in subs {
            assert_eq!(item.item_type, ItemType::Page);
            assert_eq!(item.href, format!("/web-design/{}", item.id));
        }
    }

    #[test]
    fn town_includes_every_other_town_exactly_once() {
        let registry = TownRegistry::builtin();
        for current in registry.iter() {
            let items = generate(&ctx(town(&current.slug)), &registry);
            let subs = ids(&items.sub_navigation_items);
            assert_eq!(subs.len(), registry.len() - 1);
            assert!(!subs.contains(&current.slug.as_str()));
            for other in registry.iter().filter(|t| t.slug != current.slug) {
                assert_eq!(subs.iter().filter(|s| **s == other.slug).count(), 1);
            }
        }
    }

    #[test]
    fn town_primary_list_carries_dropdown_and_mobile_areas() {
        let items = generate(&ctx(town("weymouth")), &three_town_registry());
        let web_design = &items.navigation_items[1];
        assert_eq!(ids(&web_design.sub_items), vec!["bournemouth", "poole"]);
        let areas = items.navigation_items.last().unwrap();
        assert_eq!(areas.id, "areas");
        assert!(areas.mobile_only);
    }

    #[test]
    fn unknown_town_degrades_to_empty_sub_navigation() {
        let items = generate(&ctx(town("atlantis")), &three_town_registry());
        assert!(items.sub_navigation_items.is_empty());
        assert_eq!(ids(&items.navigation_items), vec!["home", "web-design", "work", "contact"]);
    }

    #[test]
    fn generation_is_deterministic() {
        let registry = TownRegistry::builtin();
        let context = ctx(town("dorchester"));
        assert_eq!(generate(&context, &registry), generate(&context, &registry));
    }
}
