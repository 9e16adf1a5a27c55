//! Page context resolution.
//!
//! Turns a route pathname into the identity of the page being displayed and
//! classifies the viewport. Both functions are total: every input string and
//! every width (including "no window at all") maps to a defined answer.
//!
//! | Pathname              | Route                        |
//! |-----------------------|------------------------------|
//! | `/`                   | `Homepage`                   |
//! | `/web-design`         | `WebDesign`                  |
//! | `/web-design/poole`   | `Town { town_slug: "poole" }`|
//! | `/privacy`, `/about`  | `Homepage` (fallback)        |

use serde::Serialize;

pub const WEB_DESIGN_PATH: &str = "/web-design";

/// The three mutually exclusive kinds of page the navigation knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    Homepage,
    WebDesign,
    Town,
}

/// Resolved page identity.
///
/// The town slug lives inside the `Town` variant, so "slug present iff the
/// page is a town page" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "page_type", rename_all = "kebab-case")]
pub enum Route {
    Homepage,
    WebDesign,
    Town { town_slug: String },
}

impl Route {
    /// Build a route from a page type and an optional slug.
    ///
    /// A slug given for a non-town page is dropped. A town page without a
    /// slug has no town to show, so it degrades to the web design landing
    /// page, which carries the same primary navigation.
    pub fn from_parts(page_type: PageType, town_slug: Option<&str>) -> Self {
        match (page_type, town_slug) {
            (PageType::Homepage, _) => Route::Homepage,
            (PageType::WebDesign, _) => Route::WebDesign,
            (PageType::Town, Some(slug)) if !slug.is_empty() => Route::Town {
                town_slug: slug.to_string(),
            },
            (PageType::Town, _) => {
                log::warn!("town page requested without a town slug, using web-design context");
                Route::WebDesign
            }
        }
    }

    pub fn page_type(&self) -> PageType {
        match self {
            Route::Homepage => PageType::Homepage,
            Route::WebDesign => PageType::WebDesign,
            Route::Town { .. } => PageType::Town,
        }
    }

    pub fn town_slug(&self) -> Option<&str> {
        match self {
            Route::Town { town_slug } => Some(town_slug),
            _ => None,
        }
    }

    /// Canonical pathname for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Homepage => "/".to_string(),
            Route::WebDesign => WEB_DESIGN_PATH.to_string(),
            Route::Town { town_slug } => town_path(town_slug),
        }
    }
}

/// Route path of a town landing page.
pub fn town_path(slug: &str) -> String {
    format!("{WEB_DESIGN_PATH}/{slug}")
}

/// Resolve a route pathname into a [`Route`].
///
/// Paths under `/web-design/` take their final non-empty segment as the town
/// slug. Anything unrecognised falls back to the homepage context.
pub fn resolve(pathname: &str) -> Route {
    if pathname == "/" {
        return Route::Homepage;
    }
    if pathname == WEB_DESIGN_PATH {
        return Route::WebDesign;
    }
    if let Some(rest) = pathname.strip_prefix("/web-design/") {
        return match rest.rsplit('/').find(|s| !s.is_empty()) {
            Some(slug) => Route::Town {
                town_slug: slug.to_string(),
            },
            None => Route::WebDesign,
        };
    }
    log::debug!("no navigation context for {pathname:?}, falling back to homepage");
    Route::Homepage
}

/// Coarse viewport classes used for item visibility and menu behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportSize {
    Mobile,
    Tablet,
    Desktop,
}

/// Minimum widths (CSS px) at which each larger viewport class begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    pub tablet_min: f64,
    pub desktop_min: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_min: 768.0,
            desktop_min: 1024.0,
        }
    }
}

/// Classify a viewport width.
///
/// `None` means no window exists (server render); that classifies as
/// desktop so the static markup matches the widest layout.
pub fn classify_viewport(width: Option<f64>, breakpoints: &Breakpoints) -> ViewportSize {
    match width {
        Some(w) if w < breakpoints.tablet_min => ViewportSize::Mobile,
        Some(w) if w < breakpoints.desktop_min => ViewportSize::Tablet,
        _ => ViewportSize::Desktop,
    }
}

/// Everything the navigation needs to know about the page being viewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContext {
    #[serde(flatten)]
    pub route: Route,
    pub is_scrolled_past_hero: bool,
    pub viewport_size: ViewportSize,
}

impl PageContext {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            is_scrolled_past_hero: false,
            viewport_size: ViewportSize::Desktop,
        }
    }

    pub fn page_type(&self) -> PageType {
        self.route.page_type()
    }

    pub fn town_slug(&self) -> Option<&str> {
        self.route.town_slug()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town(slug: &str) -> Route {
        Route::Town {
            town_slug: slug.to_string(),
        }
    }

    #[test]
    fn root_is_homepage() {
        assert_eq!(resolve("/"), Route::Homepage);
    }

    #[test]
    fn exact_web_design_path() {
        assert_eq!(resolve("/web-design"), Route::WebDesign);
    }

    #[test]
    fn town_paths_take_final_segment() {
        assert_eq!(resolve("/web-design/poole"), town("poole"));
        assert_eq!(resolve("/web-design/poole/"), town("poole"));
        assert_eq!(resolve("/web-design/dorset/weymouth"), town("weymouth"));
    }

    #[test]
    fn bare_web_design_prefix_is_landing_page() {
        assert_eq!(resolve("/web-design/"), Route::WebDesign);
        assert_eq!(resolve("/web-design//"), Route::WebDesign);
    }

    #[test]
    fn unknown_paths_fall_back_to_homepage() {
        for path in ["/privacy", "/about", "/web-designer", "", "web-design/poole"] {
            assert_eq!(resolve(path), Route::Homepage, "path {path:?}");
        }
    }

    #[test]
    fn slug_present_only_for_town() {
        assert_eq!(resolve("/web-design/bournemouth").town_slug(), Some("bournemouth"));
        assert_eq!(resolve("/web-design").town_slug(), None);
        assert_eq!(resolve("/").town_slug(), None);
    }

    #[test]
    fn from_parts_keeps_invariant() {
        assert_eq!(
            Route::from_parts(PageType::Homepage, Some("poole")),
            Route::Homepage
        );
        assert_eq!(Route::from_parts(PageType::Town, Some("poole")), town("poole"));
        assert_eq!(Route::from_parts(PageType::Town, None), Route::WebDesign);
        assert_eq!(Route::from_parts(PageType::Town, Some("")), Route::WebDesign);
    }

    #[test]
    fn route_path_round_trips_through_resolve() {
        for route in [Route::Homepage, Route::WebDesign, town("weymouth")] {
            assert_eq!(resolve(&route.path()), route);
        }
    }

    #[test]
    fn viewport_classification() {
        let bp = Breakpoints::default();
        assert_eq!(classify_viewport(Some(375.0), &bp), ViewportSize::Mobile);
        assert_eq!(classify_viewport(Some(768.0), &bp), ViewportSize::Tablet);
        assert_eq!(classify_viewport(Some(1023.9), &bp), ViewportSize::Tablet);
        assert_eq!(classify_viewport(Some(1440.0), &bp), ViewportSize::Desktop);
        assert_eq!(classify_viewport(None, &bp), ViewportSize::Desktop);
    }

    #[test]
    fn context_serializes_flat() {
        let ctx = PageContext::new(town("poole"));
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["page_type"], "town");
        assert_eq!(json["town_slug"], "poole");
        assert_eq!(json["viewport_size"], "desktop");
    }
}
