//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Check
//!
//! ```text
//! Towns
//! 001 Bournemouth (pop. 187500, BH1)
//!     /web-design/bournemouth
//! 002 Poole (pop. 151500, BH15)
//!     /web-design/poole
//!
//! Pages
//! 001 Privacy Policy
//!     /privacy
//! 002 github (link)
//!     https://github.com/tidemark
//! ```
//!
//! ## Build
//!
//! ```text
//! / → index.html
//! /web-design → web-design/index.html
//! /web-design/poole → web-design/poole/index.html
//!
//! Generated 4 pages, stylesheet style.3f9a1c0b2e.css, 2 assets
//! ```

use crate::generate::{GenerateReport, Site};
use crate::store::NavigationState;
use crate::types::NavigationItem;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Towns".to_string()];
    for (i, town) in site.registry.iter().enumerate() {
        lines.push(format!(
            "{} {} (pop. {}, {})",
            format_index(i + 1),
            town.name,
            town.population,
            town.postcode
        ));
        lines.push(format!(
            "{}{}",
            indent(1),
            crate::context::town_path(&town.slug)
        ));
    }

    if !site.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in site.pages.iter().enumerate() {
            let marker = match (page.is_link, page.listed) {
                (true, _) => " (link)",
                (false, false) => " (unlisted)",
                (false, true) => "",
            };
            lines.push(format!("{} {}{}", format_index(i + 1), page.title, marker));
            let target = if page.is_link {
                page.body.clone()
            } else {
                page.path()
            };
            lines.push(format!("{}{}", indent(1), target));
        }
    }
    lines
}

pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|p| format!("{} → {}", p.route, p.file.display()))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, stylesheet {}, {} assets",
        report.pages.len(),
        report.stylesheet,
        report.assets_copied
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Readable summary of a navigation state. `nav --json` prints the
/// serialized state instead.
pub fn format_nav_state(state: &NavigationState) -> Vec<String> {
    let ctx = &state.context;
    let mut lines = vec![format!(
        "Page: {}{}",
        ctx.route.path(),
        ctx.town_slug()
            .map(|slug| format!(" (town: {slug})"))
            .unwrap_or_default()
    )];
    lines.push(format!(
        "Viewport: {:?}, past hero: {}",
        ctx.viewport_size, ctx.is_scrolled_past_hero
    ));
    lines.push(format!(
        "Sticky nav: {}",
        if state.show_sticky_nav { "visible" } else { "hidden" }
    ));
    lines.push(format!(
        "Mobile menu: {}",
        if state.is_mobile_menu_open { "open" } else { "closed" }
    ));
    lines.push(String::new());
    lines.push("Navigation".to_string());
    push_items(&mut lines, &state.navigation_items, 1);
    if !state.sub_navigation_items.is_empty() {
        lines.push(String::new());
        lines.push("Sub-navigation".to_string());
        push_items(&mut lines, &state.sub_navigation_items, 1);
    }
    lines
}

fn push_items(lines: &mut Vec<String>, items: &[NavigationItem], depth: usize) {
    for (i, item) in items.iter().enumerate() {
        let mut flags = Vec::new();
        if item.is_active {
            flags.push("active");
        }
        if item.mobile_only {
            flags.push("mobile");
        }
        if item.desktop_only {
            flags.push("desktop");
        }
        let suffix = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        lines.push(format!(
            "{}{} {} → {}{}",
            indent(depth),
            format_index(i + 1),
            item.name,
            item.href,
            suffix
        ));
        push_items(lines, &item.sub_items, depth + 1);
    }
}

pub fn print_nav_state(state: &NavigationState) {
    for line in format_nav_state(state) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::generate::GeneratedPage;
    use crate::pages::ContentPage;
    use crate::test_helpers::three_town_registry;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn site() -> Site {
        Site {
            config: SiteConfig::default(),
            registry: Arc::new(three_town_registry()),
            pages: vec![ContentPage {
                title: "github".to_string(),
                link_title: "github".to_string(),
                slug: "github".to_string(),
                body: "https://github.com/tidemark".to_string(),
                listed: true,
                sort_key: 30,
                is_link: true,
            }],
        }
    }

    #[test]
    fn check_lists_towns_in_order() {
        let lines = format_check_output(&site());
        assert_eq!(lines[0], "Towns");
        assert_eq!(lines[1], "001 Bournemouth (pop. 187500, BH1)");
        assert_eq!(lines[2], "    /web-design/bournemouth");
        assert!(lines.contains(&"001 github (link)".to_string()));
        assert!(lines.contains(&"    https://github.com/tidemark".to_string()));
    }

    #[test]
    fn generate_summary_line() {
        let report = GenerateReport {
            pages: vec![GeneratedPage {
                route: "/".to_string(),
                title: "Home".to_string(),
                file: PathBuf::from("index.html"),
            }],
            stylesheet: "style.abc.css".to_string(),
            assets_copied: 2,
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "/ → index.html");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 pages, stylesheet style.abc.css, 2 assets"
        );
    }

    #[test]
    fn nav_state_shows_town_and_nested_items() {
        let state = site().initial_state("/web-design/poole");
        let lines = format_nav_state(&state);
        assert_eq!(lines[0], "Page: /web-design/poole (town: poole)");
        assert!(lines.contains(&"Sticky nav: visible".to_string()));
        assert!(lines.contains(&"Sub-navigation".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("        001 Bournemouth → /web-design/bournemouth")));
    }
}
