//! Navigation state store.
//!
//! One store exists per page view. It owns the [`NavigationState`], keeps the
//! item lists consistent with the page context, and tells subscribers when
//! anything they render from has changed.
//!
//! ## Sticky navigation policy
//!
//! ```text
//!              initial      scroll past hero   scroll back above
//! homepage     hidden   →   visible        →   hidden
//! web-design   visible      visible            visible
//! town         visible      visible            visible
//! ```
//!
//! ## Update ordering
//!
//! A route change resolves the context, regenerates both item lists, closes
//! the mobile menu and only then notifies. Scroll and resize updates touch
//! disjoint fields and simply overwrite them; every update is a recomputation
//! rather than a delta, so interleaving order does not matter.

use crate::config::NavigationConfig;
use crate::context::{self, Breakpoints, PageContext, PageType, Route, ViewportSize};
use crate::items::{self, GeneratedItems};
use crate::scroll::is_past_threshold;
use crate::towns::TownRegistry;
use crate::types::NavigationItem;
use serde::Serialize;
use std::sync::Arc;

/// Whether a page type shows the sticky bar from the moment it mounts.
pub fn show_sticky_immediately(page_type: PageType) -> bool {
    match page_type {
        PageType::Homepage => false,
        PageType::WebDesign | PageType::Town => true,
    }
}

/// Everything the sticky bar and the mobile overlay render from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    pub context: PageContext,
    pub show_sticky_nav: bool,
    pub navigation_items: Vec<NavigationItem>,
    pub sub_navigation_items: Vec<NavigationItem>,
    pub is_mobile_menu_open: bool,
}

impl NavigationState {
    fn new(route: Route) -> Self {
        Self {
            context: PageContext::new(route),
            show_sticky_nav: false,
            navigation_items: Vec::new(),
            sub_navigation_items: Vec::new(),
            is_mobile_menu_open: false,
        }
    }

    pub fn show_sticky_immediately(&self) -> bool {
        show_sticky_immediately(self.context.page_type())
    }

    /// The active primary item, if any.
    pub fn active_item(&self) -> Option<&NavigationItem> {
        self.navigation_items.iter().find(|i| i.is_active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&NavigationState)>;

pub struct NavigationStore {
    state: NavigationState,
    registry: Arc<TownRegistry>,
    hero_threshold: f64,
    breakpoints: Breakpoints,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStore")
            .field("state", &self.state)
            .field("hero_threshold", &self.hero_threshold)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl NavigationStore {
    /// Create a store in the homepage context. Call [`Self::initialize`]
    /// before rendering.
    pub fn new(registry: Arc<TownRegistry>, config: &NavigationConfig) -> Self {
        Self {
            state: NavigationState::new(Route::Homepage),
            registry,
            hero_threshold: config.hero_threshold,
            breakpoints: config.breakpoints(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn snapshot(&self) -> &NavigationState {
        &self.state
    }

    /// Set the page context for a freshly mounted page.
    pub fn initialize(&mut self, page_type: PageType, town_slug: Option<&str>) {
        let route = Route::from_parts(page_type, town_slug);
        self.apply_route(route);
        self.notify();
    }

    /// Move to a new route within the same page view.
    pub fn on_route_change(&mut self, pathname: &str) {
        let route = context::resolve(pathname);
        log::debug!("route change to {pathname:?} resolved as {route:?}");
        self.state.is_mobile_menu_open = false;
        self.apply_route(route);
        self.notify();
    }

    /// Recompute scroll-derived state for an offset.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        let past = is_past_threshold(scroll_y, self.hero_threshold);
        if past == self.state.context.is_scrolled_past_hero {
            return;
        }
        self.state.context.is_scrolled_past_hero = past;
        self.apply_sticky_policy();
        self.notify();
    }

    /// Recompute the viewport class. Growing out of the mobile layout closes
    /// the mobile menu.
    pub fn on_resize(&mut self, width: Option<f64>) {
        let viewport = context::classify_viewport(width, &self.breakpoints);
        if viewport == self.state.context.viewport_size {
            return;
        }
        let was_mobile = self.state.context.viewport_size == ViewportSize::Mobile;
        self.state.context.viewport_size = viewport;
        if was_mobile && self.state.is_mobile_menu_open {
            self.state.is_mobile_menu_open = false;
        }
        self.notify();
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.state.is_mobile_menu_open = !self.state.is_mobile_menu_open;
        self.notify();
    }

    /// Close the mobile menu. Already closed means no change and no notification.
    pub fn close_mobile_menu(&mut self) {
        if !self.state.is_mobile_menu_open {
            return;
        }
        self.state.is_mobile_menu_open = false;
        self.notify();
    }

    /// Mark the item whose `href` equals `current_href` as active.
    ///
    /// Each list (primary, sub-navigation, and every nested `sub_items`) gets
    /// at most one active item: the first match. Everything else is cleared.
    pub fn mark_active_item(&mut self, current_href: &str) {
        mark_in(&mut self.state.navigation_items, current_href);
        mark_in(&mut self.state.sub_navigation_items, current_href);
        self.notify();
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&NavigationState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber. Called when the page view goes away.
    pub(crate) fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    fn apply_route(&mut self, route: Route) {
        self.state.context.route = route;
        let GeneratedItems {
            navigation_items,
            sub_navigation_items,
        } = items::generate(&self.state.context, &self.registry);
        self.state.navigation_items = navigation_items;
        self.state.sub_navigation_items = sub_navigation_items;
        let path = self.state.context.route.path();
        mark_in(&mut self.state.navigation_items, &path);
        mark_in(&mut self.state.sub_navigation_items, &path);
        self.apply_sticky_policy();
    }

    fn apply_sticky_policy(&mut self) {
        self.state.show_sticky_nav =
            self.state.show_sticky_immediately() || self.state.context.is_scrolled_past_hero;
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.state);
        }
    }
}

fn mark_in(list: &mut [NavigationItem], href: &str) {
    let mut found = false;
    for item in list.iter_mut() {
        item.is_active = !found && item.href == href;
        found |= item.is_active;
        mark_in(&mut item.sub_items, href);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ids, test_store};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn active_ids(list: &[NavigationItem]) -> Vec<&str> {
        list.iter().filter(|i| i.is_active).map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn homepage_sticky_hidden_until_past_hero() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        assert!(!store.snapshot().show_sticky_nav);

        store.on_scroll(601.0);
        assert!(store.snapshot().context.is_scrolled_past_hero);
        assert!(store.snapshot().show_sticky_nav);

        store.on_scroll(10.0);
        assert!(!store.snapshot().show_sticky_nav);

        store.on_scroll(900.0);
        store.on_scroll(0.0);
        assert!(!store.snapshot().show_sticky_nav);
        assert!(!store.snapshot().context.is_scrolled_past_hero);
    }

    #[test]
    fn service_pages_show_sticky_immediately() {
        for (page_type, slug) in [(PageType::WebDesign, None), (PageType::Town, Some("poole"))] {
            let mut store = test_store();
            store.initialize(page_type, slug);
            assert!(store.snapshot().show_sticky_nav, "{page_type:?}");
            store.on_scroll(0.0);
            store.on_scroll(5000.0);
            store.on_scroll(0.0);
            assert!(store.snapshot().show_sticky_nav, "{page_type:?}");
        }
    }

    #[test]
    fn initialize_generates_items_for_town() {
        let mut store = test_store();
        store.initialize(PageType::Town, Some("poole"));
        let state = store.snapshot();
        assert_eq!(state.context.town_slug(), Some("poole"));
        assert_eq!(ids(&state.sub_navigation_items), vec!["bournemouth", "weymouth"]);
    }

    #[test]
    fn unknown_town_still_renders_primary_navigation() {
        let mut store = test_store();
        store.initialize(PageType::Town, Some("atlantis"));
        let state = store.snapshot();
        assert!(state.sub_navigation_items.is_empty());
        assert_eq!(state.navigation_items.len(), 4);
        assert!(state.show_sticky_nav);
    }

    #[test]
    fn mark_active_item_selects_exactly_one() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        store.mark_active_item("#services");
        assert_eq!(active_ids(&store.snapshot().navigation_items), vec!["services"]);
        store.mark_active_item("#contact");
        assert_eq!(active_ids(&store.snapshot().navigation_items), vec!["contact"]);
        store.mark_active_item("#nowhere");
        assert!(active_ids(&store.snapshot().navigation_items).is_empty());
    }

    #[test]
    fn mark_active_item_first_match_wins_on_duplicate_hrefs() {
        let mut list = vec![
            NavigationItem::page("a", "A", "/x"),
            NavigationItem::page("b", "B", "/x"),
        ];
        mark_in(&mut list, "/x");
        assert_eq!(active_ids(&list), vec!["a"]);
    }

    #[test]
    fn route_marks_current_page_active() {
        let mut store = test_store();
        store.initialize(PageType::WebDesign, None);
        assert_eq!(store.snapshot().active_item().map(|i| i.id.as_str()), Some("web-design"));
    }

    #[test]
    fn close_when_closed_is_identity() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        let before = store.snapshot().clone();
        store.close_mobile_menu();
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn toggle_flips_menu() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        store.toggle_mobile_menu();
        assert!(store.snapshot().is_mobile_menu_open);
        store.toggle_mobile_menu();
        assert!(!store.snapshot().is_mobile_menu_open);
    }

    #[test]
    fn route_change_regenerates_items_and_closes_menu() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        store.toggle_mobile_menu();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            sink.borrow_mut().push((
                state.context.town_slug().map(str::to_string),
                ids(&state.sub_navigation_items).join(","),
                state.is_mobile_menu_open,
            ));
        });

        store.on_route_change("/web-design/weymouth");
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            (Some("weymouth".to_string()), "bournemouth,poole".to_string(), false)
        );
        assert!(store.snapshot().show_sticky_nav);
    }

    #[test]
    fn route_back_to_homepage_reapplies_scroll_policy() {
        let mut store = test_store();
        store.initialize(PageType::WebDesign, None);
        store.on_route_change("/");
        assert!(!store.snapshot().show_sticky_nav);
        store.on_scroll(700.0);
        store.on_route_change("/web-design");
        store.on_route_change("/");
        assert!(store.snapshot().show_sticky_nav);
    }

    #[test]
    fn resize_out_of_mobile_closes_menu() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        store.on_resize(Some(375.0));
        assert_eq!(store.snapshot().context.viewport_size, ViewportSize::Mobile);
        store.toggle_mobile_menu();
        store.on_resize(Some(400.0));
        assert!(store.snapshot().is_mobile_menu_open);
        store.on_resize(Some(1280.0));
        assert_eq!(store.snapshot().context.viewport_size, ViewportSize::Desktop);
        assert!(!store.snapshot().is_mobile_menu_open);
    }

    #[test]
    fn subscribers_are_notified_until_unsubscribed() {
        let mut store = test_store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.initialize(PageType::Homepage, None);
        store.toggle_mobile_menu();
        assert_eq!(*count.borrow(), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_mobile_menu();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn scroll_within_same_side_does_not_notify() {
        let mut store = test_store();
        store.initialize(PageType::Homepage, None);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.on_scroll(10.0);
        store.on_scroll(20.0);
        store.on_scroll(700.0);
        store.on_scroll(800.0);
        assert_eq!(*count.borrow(), 1);
    }
}
