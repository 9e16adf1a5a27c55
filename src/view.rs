//! Page view lifecycle.
//!
//! A [`PageView`] binds one [`NavigationStore`] to one environment for the
//! lifetime of a displayed page: mount registers listeners and takes the
//! first scroll reading, [`PageView::handle`] routes UI events, and
//! [`PageView::unmount`] consumes the view after releasing everything it
//! registered. Because unmount takes `self`, no event can reach a torn-down
//! store.

use crate::config::NavigationConfig;
use crate::context;
use crate::overlay::{MobileOverlay, ScrollLock};
use crate::scroll::{Environment, ListenerId, ListenerKind, ScrollDetector};
use crate::store::{NavigationState, NavigationStore};
use crate::towns::TownRegistry;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Input delivered to a mounted page view.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Raw scroll event with its timestamp in milliseconds.
    Scroll { y: f64, at_ms: u64 },
    /// Animation frame; flushes a throttled scroll sample.
    FrameTick { at_ms: u64 },
    Resize { width: f64 },
    RouteChange { pathname: String },
    ToggleMenu,
    CloseMenu,
    /// A navigation item was clicked.
    ItemClick { href: String },
}

pub struct PageView<E: Environment + ScrollLock> {
    store: NavigationStore,
    detector: ScrollDetector,
    overlay: MobileOverlay,
    listeners: Vec<ListenerId>,
    env: E,
}

impl<E: Environment + ScrollLock> PageView<E> {
    /// Mount a page view for `pathname`.
    pub fn mount(
        pathname: &str,
        registry: Arc<TownRegistry>,
        config: &NavigationConfig,
        mut env: E,
    ) -> Self {
        let route = context::resolve(pathname);
        let mut store = NavigationStore::new(registry, config);
        store.initialize(route.page_type(), route.town_slug());

        let listeners: Vec<ListenerId> = [ListenerKind::Scroll, ListenerKind::Resize]
            .into_iter()
            .filter_map(|kind| env.add_listener(kind))
            .collect();

        let mut view = Self {
            store,
            detector: ScrollDetector::new(config.hero_threshold, config.throttle_ms),
            overlay: MobileOverlay::new(),
            listeners,
            env,
        };
        view.resample();
        log::debug!(
            "mounted {pathname:?} with {} listener(s)",
            view.listeners.len()
        );
        view
    }

    pub fn state(&self) -> &NavigationState {
        self.store.snapshot()
    }

    /// Mutable store access, for subscribing views.
    pub fn store_mut(&mut self) -> &mut NavigationStore {
        &mut self.store
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Scroll { y, at_ms } => {
                self.env.scrolled_to(y);
                if let Some(crossing) = self.detector.observe(y, at_ms) {
                    self.store.on_scroll(crossing.scroll_y);
                }
            }
            UiEvent::FrameTick { at_ms } => {
                if let Some(crossing) = self.detector.flush(at_ms) {
                    self.store.on_scroll(crossing.scroll_y);
                }
            }
            UiEvent::Resize { width } => self.store.on_resize(Some(width)),
            UiEvent::RouteChange { pathname } => {
                self.detector.cancel();
                self.store.on_route_change(&pathname);
                self.resample();
            }
            UiEvent::ToggleMenu => self.store.toggle_mobile_menu(),
            UiEvent::CloseMenu => self.store.close_mobile_menu(),
            UiEvent::ItemClick { href } => {
                self.store.mark_active_item(&href);
                self.store.close_mobile_menu();
            }
        }
        self.overlay
            .sync(self.store.snapshot().is_mobile_menu_open, &mut self.env);
    }

    /// Tear the view down and hand the environment back.
    pub fn unmount(mut self) -> E {
        self.detector.cancel();
        for id in self.listeners.drain(..) {
            self.env.remove_listener(id);
        }
        self.overlay.close(&mut self.env);
        log::debug!(
            "unmounted {:?}, dropping {} subscriber(s)",
            self.store.snapshot().context.route.path(),
            self.store.subscriber_count()
        );
        self.store.clear_subscribers();
        self.env
    }

    /// Read scroll and viewport straight from the environment.
    fn resample(&mut self) {
        let scroll_y = self.detector.sample(&self.env).unwrap_or(0.0);
        self.store.on_scroll(scroll_y);
        self.store.on_resize(self.env.viewport_width());
    }
}

/// In-memory window for the `nav` command and tests.
///
/// Scroll offset and width are whatever the caller sets; listener
/// registrations and overflow writes are recorded for inspection.
#[derive(Debug, Default)]
pub struct SimulatedWindow {
    pub scroll_y: Option<f64>,
    pub width: Option<f64>,
    pub overflow: Option<String>,
    /// Number of `set_overflow` calls.
    pub overflow_writes: usize,
    pub registered: Vec<(ListenerId, ListenerKind)>,
    pub removed: Vec<ListenerId>,
    next_id: u64,
}

impl SimulatedWindow {
    pub fn new(scroll_y: Option<f64>, width: Option<f64>) -> Self {
        Self {
            scroll_y,
            width,
            ..Self::default()
        }
    }

    pub fn at(scroll_y: f64, width: f64) -> Self {
        Self::new(Some(scroll_y), Some(width))
    }

    pub fn active_listeners(&self) -> usize {
        let removed: BTreeSet<u64> = self.removed.iter().map(|id| id.0).collect();
        self.registered
            .iter()
            .filter(|(id, _)| !removed.contains(&id.0))
            .count()
    }
}

impl Environment for SimulatedWindow {
    fn scroll_y(&self) -> Option<f64> {
        self.scroll_y
    }

    fn viewport_width(&self) -> Option<f64> {
        self.width
    }

    fn add_listener(&mut self, kind: ListenerKind) -> Option<ListenerId> {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registered.push((id, kind));
        Some(id)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.removed.push(id);
    }

    fn scrolled_to(&mut self, scroll_y: f64) {
        self.scroll_y = Some(scroll_y);
    }
}

impl ScrollLock for SimulatedWindow {
    fn overflow(&self) -> Option<String> {
        self.overflow.clone()
    }

    fn set_overflow(&mut self, value: Option<&str>) {
        self.overflow_writes += 1;
        self.overflow = value.map(str::to_string);
    }
}
