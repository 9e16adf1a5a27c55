//! HTML site generation.
//!
//! Renders every route of the agency site to static HTML. Each page's
//! navigation comes from a [`PageView`] mounted in a [`StaticEnvironment`]:
//! no scroll position and no viewport, so the markup carries the state a
//! visitor sees before any interaction. The client script picks up from
//! there using the `data-*` attributes on the sticky bar.
//!
//! ## Generated Pages
//!
//! - **Homepage** (`/index.html`): hero plus work, about, services and contact sections
//! - **Service page** (`/web-design/index.html`): service overview and town index
//! - **Town pages** (`/web-design/{slug}/index.html`): one per registry town
//! - **Content pages** (`/{slug}/index.html`): markdown from `content/pages/`
//! - **Not found** (`/404.html`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── style.3f9a1c0b2e.css      # fingerprinted stylesheet
//! ├── nav.js
//! ├── web-design/
//! │   ├── index.html
//! │   ├── bournemouth/index.html
//! │   └── poole/index.html
//! ├── privacy/index.html
//! └── assets/                   # copied from content/assets/
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, ConfigError, NavigationConfig, SiteConfig, SiteInfo};
use crate::context::{self, PageType, Route, ViewportSize, WEB_DESIGN_PATH};
use crate::pages::{self, ContentPage, PagesError};
use crate::scroll::StaticEnvironment;
use crate::seo::{self, PageMeta};
use crate::store::NavigationState;
use crate::towns::{RegistryError, Town, TownRegistry};
use crate::types::{ItemType, NavigationItem};
use crate::view::PageView;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Pages(#[from] PagesError),
    #[error("asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");
const ASSETS_DIR: &str = "assets";

/// Everything loaded from the content root.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub registry: Arc<TownRegistry>,
    pub pages: Vec<ContentPage>,
}

impl Site {
    pub fn load(content_root: &Path) -> Result<Self, GenerateError> {
        Ok(Self {
            config: config::load_config(content_root)?,
            registry: Arc::new(TownRegistry::load(content_root)?),
            pages: pages::load_pages(content_root)?,
        })
    }

    /// Navigation state of `path` as first rendered, before any interaction.
    pub fn initial_state(&self, path: &str) -> NavigationState {
        let view = PageView::mount(
            path,
            Arc::clone(&self.registry),
            &self.config.navigation,
            StaticEnvironment,
        );
        let state = view.state().clone();
        view.unmount();
        state
    }

    /// Every route this site renders, in sitemap order.
    pub fn routes(&self) -> Vec<String> {
        let mut routes = vec!["/".to_string(), WEB_DESIGN_PATH.to_string()];
        routes.extend(self.registry.iter().map(|t| context::town_path(&t.slug)));
        routes.extend(self.pages.iter().filter(|p| !p.is_link).map(ContentPage::path));
        routes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub route: String,
    pub title: String,
    /// Path relative to the output directory.
    pub file: PathBuf,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub stylesheet: String,
    pub assets_copied: usize,
}

pub fn generate(
    site: &Site,
    content_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let css = format!("{}\n\n{}", config::generate_root_css(&site.config), CSS_STATIC);
    let stylesheet = fingerprinted_name("style", "css", &css);
    fs::write(output_dir.join(&stylesheet), &css)?;
    fs::write(output_dir.join("nav.js"), JS)?;

    let shell = Shell {
        site,
        stylesheet: format!("/{stylesheet}"),
        footer_items: pages::footer_items(&site.pages),
    };
    let mut report = GenerateReport {
        stylesheet,
        ..Default::default()
    };

    let info = &site.config.site;
    let mut emit = |route: &str, meta: &PageMeta, markup: Markup| -> Result<(), GenerateError> {
        let file = output_file(route);
        let dest = output_dir.join(&file);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, markup.into_string())?;
        log::debug!("wrote {}", dest.display());
        report.pages.push(GeneratedPage {
            route: route.to_string(),
            title: meta.title.clone(),
            file,
        });
        Ok(())
    };

    let town_routes = site.registry.iter().map(|town| Route::Town {
        town_slug: town.slug.clone(),
    });
    for route in [Route::Homepage, Route::WebDesign].into_iter().chain(town_routes) {
        let Some(meta) = seo::route_meta(info, &site.registry, &route) else {
            continue;
        };
        let markup = match &route {
            Route::Homepage => render_homepage(&shell, &meta),
            Route::WebDesign => render_web_design_page(&shell, &meta),
            Route::Town { town_slug } => match site.registry.get(town_slug) {
                Some(town) => render_town_page(&shell, town, &meta),
                None => continue,
            },
        };
        emit(&route.path(), &meta, markup)?;
    }

    for page in site.pages.iter().filter(|p| !p.is_link) {
        let route = page.path();
        let meta = seo::content_page_meta(info, &page.title, &route);
        emit(&route, &meta, render_content_page(&shell, page, &meta))?;
    }

    let not_found = render_not_found(&shell);
    fs::write(output_dir.join("404.html"), not_found.into_string())?;

    fs::write(output_dir.join("sitemap.xml"), render_sitemap(info, &site.routes()))?;

    report.assets_copied = copy_assets(&content_root.join(ASSETS_DIR), &output_dir.join(ASSETS_DIR))?;

    log::info!(
        "generated {} pages into {}",
        report.pages.len(),
        output_dir.display()
    );
    Ok(report)
}

/// `/` → `index.html`, `/web-design/poole` → `web-design/poole/index.html`.
fn output_file(route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(trimmed).join("index.html")
    }
}

/// `name.{first 10 hex chars of sha256}.ext`
fn fingerprinted_name(stem: &str, ext: &str, content: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
    format!("{stem}.{}.{ext}", &digest[..10])
}

fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn render_sitemap(site: &SiteInfo, routes: &[String]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in routes {
        xml.push_str(&format!("  <url><loc>{}</loc></url>\n", xml_escape(&site.url(route))));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Per-build values every page template needs.
struct Shell<'a> {
    site: &'a Site,
    stylesheet: String,
    footer_items: Vec<NavigationItem>,
}

/// Renders the base HTML document structure
fn base_document(meta: &PageMeta, stylesheet: &str, body_class: Option<&str>, content: Markup) -> Markup {
    // A literal `</` inside the JSON-LD would end the script element early.
    let json_ld = meta.structured_data.to_string().replace("</", "<\\/");
    html! {
        (DOCTYPE)
        html lang="en-GB" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(meta.canonical);
                link rel="stylesheet" href=(stylesheet);
                script type="application/ld+json" { (PreEscaped(json_ld)) }
            }
            body class=[body_class] {
                (content)
                script src="/nav.js" defer {}
            }
        }
    }
}

/// Resolve the href an item renders with on `page_path`.
///
/// Pages that fall back to the homepage context do not contain the homepage
/// sections, so their anchors point back at `/`.
fn item_href(item: &NavigationItem, state: &NavigationState, page_path: &str) -> String {
    let off_home = state.context.page_type() == PageType::Homepage && page_path != "/";
    if item.item_type == ItemType::Anchor && off_home {
        format!("/{}", item.href)
    } else {
        item.href.clone()
    }
}

fn render_link(item: &NavigationItem, href: &str) -> Markup {
    html! {
        @if item.item_type == ItemType::External {
            a href=(href) target="_blank" rel="noopener" { (item.name) }
        } @else {
            a href=(href) aria-current=[item.is_active.then_some("page")] { (item.name) }
        }
    }
}

/// Renders one primary item; items with children get a dropdown.
fn render_nav_item(item: &NavigationItem, state: &NavigationState, page_path: &str) -> Markup {
    html! {
        li class=[item.is_active.then_some("active")] {
            (render_link(item, &item_href(item, state, page_path)))
            @if !item.sub_items.is_empty() {
                ul.nav-dropdown {
                    @for child in &item.sub_items {
                        li class=[child.is_active.then_some("active")] {
                            (render_link(child, &item_href(child, state, page_path)))
                        }
                    }
                }
            }
        }
    }
}

/// Renders the sticky navigation bar.
///
/// Visibility is baked in as the `is-visible` class; the data attributes
/// let the client script keep applying the same policy while scrolling.
pub fn render_sticky_nav(
    state: &NavigationState,
    site_name: &str,
    nav: &NavigationConfig,
    page_path: &str,
) -> Markup {
    let menu_open = state.is_mobile_menu_open;
    html! {
        header.sticky-nav.is-visible[state.show_sticky_nav]
            data-sticky-immediately=(bool_attr(state.show_sticky_immediately()))
            data-hero-threshold=(nav.hero_threshold.to_string())
            data-tablet-min=(nav.tablet_min_width.to_string())
            data-page-type=(page_type_name(state.context.page_type())) {
            a.brand href="/" { (site_name) }
            nav.primary-nav aria-label="Primary" {
                ul {
                    @for item in state.navigation_items.iter().filter(|i| i.visible_on(ViewportSize::Desktop)) {
                        (render_nav_item(item, state, page_path))
                    }
                }
            }
            button.menu-toggle type="button" aria-controls="mobile-menu"
                aria-expanded=(bool_attr(menu_open)) {
                span.menu-toggle-bar {}
                span.menu-toggle-bar {}
                span.menu-toggle-bar {}
                span.visually-hidden { "Menu" }
            }
        }
    }
}

/// Renders the contextual sub-navigation strip (towns), if there is one.
pub fn render_sub_nav(state: &NavigationState) -> Markup {
    html! {
        @if !state.sub_navigation_items.is_empty() {
            nav.sub-nav aria-label="Areas we cover" {
                ul {
                    @for item in &state.sub_navigation_items {
                        li class=[item.is_active.then_some("active")] {
                            (render_link(item, &item.href))
                        }
                    }
                }
            }
        }
    }
}

/// Renders the full-screen mobile menu. Hidden unless the menu is open.
pub fn render_mobile_overlay(state: &NavigationState, page_path: &str) -> Markup {
    html! {
        div.mobile-overlay id="mobile-menu" hidden[!state.is_mobile_menu_open] {
            button.menu-close type="button" aria-label="Close menu" { "×" }
            ul {
                @for item in state.navigation_items.iter().filter(|i| i.visible_on(ViewportSize::Mobile)) {
                    @if item.mobile_only {
                        li.mobile-group {
                            span.mobile-group-title { (item.name) }
                            ul {
                                @for child in &item.sub_items {
                                    li { (render_link(child, &child.href)) }
                                }
                            }
                        }
                    } @else {
                        li class=[item.is_active.then_some("active")] {
                            (render_link(item, &item_href(item, state, page_path)))
                        }
                    }
                }
            }
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn page_type_name(page_type: PageType) -> &'static str {
    match page_type {
        PageType::Homepage => "homepage",
        PageType::WebDesign => "web-design",
        PageType::Town => "town",
    }
}

fn site_footer(shell: &Shell) -> Markup {
    let info = &shell.site.config.site;
    html! {
        footer.site-footer id="contact" {
            div.footer-contact {
                h2 { "Talk to " (info.name) }
                p {
                    a href={ "mailto:" (info.email) } { (info.email) }
                    " · "
                    a href={ "tel:" (info.phone.replace(' ', "")) } { (info.phone) }
                }
            }
            nav.footer-towns aria-label="Towns" {
                ul {
                    @for town in shell.site.registry.iter() {
                        li { a href=(context::town_path(&town.slug)) { "Web design " (town.name) } }
                    }
                }
            }
            @if !shell.footer_items.is_empty() {
                nav.footer-legal aria-label="Legal" {
                    ul {
                        @for item in &shell.footer_items {
                            li { (render_link(item, &item.href)) }
                        }
                    }
                }
            }
        }
    }
}

/// Sticky bar, sub-navigation and mobile overlay for a page.
fn page_chrome(shell: &Shell, page_path: &str) -> (NavigationState, Markup) {
    let state = shell.site.initial_state(page_path);
    let markup = html! {
        (render_sticky_nav(
            &state,
            &shell.site.config.site.name,
            &shell.site.config.navigation,
            page_path,
        ))
        (render_sub_nav(&state))
        (render_mobile_overlay(&state, page_path))
    };
    (state, markup)
}

fn hero(heading: &str, lede: &str) -> Markup {
    html! {
        section.hero data-hero {
            h1 { (heading) }
            p.lede { (lede) }
            a.button href="#contact" { "Start a project" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_homepage(shell: &Shell, meta: &PageMeta) -> Markup {
    let info = &shell.site.config.site;
    let (_, chrome) = page_chrome(shell, "/");
    let content = html! {
        (chrome)
        main.homepage {
            (hero(&info.name, &info.tagline))
            section id="work" {
                h2 { "Work" }
                p { "Recent sites for independent shops, trades and hospitality across the county." }
            }
            section id="about" {
                h2 { "About" }
                p { (info.name) " is a small studio that designs, builds and looks after websites for local businesses." }
            }
            section id="services" {
                h2 { "Services" }
                ul.service-list {
                    li { a href=(WEB_DESIGN_PATH) { "Web design" } }
                    li { "Search engine optimisation" }
                    li { "Hosting and care plans" }
                }
            }
        }
        (site_footer(shell))
    };
    base_document(meta, &shell.stylesheet, Some("page-homepage"), content)
}

fn render_web_design_page(shell: &Shell, meta: &PageMeta) -> Markup {
    let (state, chrome) = page_chrome(shell, WEB_DESIGN_PATH);
    let content = html! {
        (chrome)
        main.web-design-page {
            (hero("Web design in Dorset", "Fast, accessible websites built around how your customers search."))
            section.town-index {
                h2 { "Areas we cover" }
                ul.town-grid {
                    @for item in &state.sub_navigation_items {
                        li { a href=(item.href) { (item.name) } }
                    }
                }
            }
        }
        (site_footer(shell))
    };
    base_document(meta, &shell.stylesheet, Some("page-web-design"), content)
}

fn render_town_page(shell: &Shell, town: &Town, meta: &PageMeta) -> Markup {
    let path = context::town_path(&town.slug);
    let (state, chrome) = page_chrome(shell, &path);
    let heading = format!("Web design in {}", town.name);
    let lede = format!(
        "Websites for {} businesses, from the studio down the road.",
        town.name
    );
    let content = html! {
        (chrome)
        main.town-page data-town=(town.slug) {
            (hero(&heading, &lede))
            section.town-facts {
                h2 { (town.name) " at a glance" }
                dl {
                    dt { "Population" }
                    dd { (format_population(town.population)) }
                    dt { "Postcode" }
                    dd { (town.postcode) }
                }
                @if !town.key_industries.is_empty() {
                    h3 { "Key industries" }
                    ul.industries {
                        @for industry in &town.key_industries {
                            li { (industry) }
                        }
                    }
                }
            }
            @if !state.sub_navigation_items.is_empty() {
                section.nearby-towns {
                    h2 { "Also serving" }
                    ul {
                        @for item in &state.sub_navigation_items {
                            li { a href=(item.href) { (item.name) } }
                        }
                    }
                }
            }
        }
        (site_footer(shell))
    };
    base_document(meta, &shell.stylesheet, Some("page-town"), content)
}

fn render_content_page(shell: &Shell, page: &ContentPage, meta: &PageMeta) -> Markup {
    let (_, chrome) = page_chrome(shell, &page.path());

    let parser = Parser::new(&page.body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let content = html! {
        (chrome)
        main.content-page {
            article.prose {
                (PreEscaped(body_html))
            }
        }
        (site_footer(shell))
    };
    base_document(meta, &shell.stylesheet, Some("page-content"), content)
}

fn render_not_found(shell: &Shell) -> Markup {
    let info = &shell.site.config.site;
    let meta = seo::content_page_meta(info, "Page not found", "/404");
    let (_, chrome) = page_chrome(shell, "/404");
    let content = html! {
        (chrome)
        main.not-found {
            h1 { "Page not found" }
            p { a href="/" { "Back to the homepage" } }
        }
        (site_footer(shell))
    };
    base_document(&meta, &shell.stylesheet, Some("page-not-found"), content)
}

/// `187500` → `"187,500"`
fn format_population(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
