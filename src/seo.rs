//! Page metadata and schema.org structured data.
//!
//! Every rendered page gets a title, a meta description, a canonical URL and
//! one JSON-LD block. The schema type follows the page:
//!
//! | Page                | Schema                                |
//! |---------------------|---------------------------------------|
//! | `/`                 | `Organization`                        |
//! | `/web-design`       | `Service` with every town served      |
//! | `/web-design/{slug}`| `LocalBusiness` with `areaServed`     |
//! | legal pages         | `WebPage`                             |

use crate::config::SiteInfo;
use crate::context::{Route, WEB_DESIGN_PATH, town_path};
use crate::towns::{Town, TownRegistry};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub structured_data: Value,
}

pub fn homepage_meta(site: &SiteInfo) -> PageMeta {
    PageMeta {
        title: format!("{} | {}", site.name, site.tagline),
        description: format!(
            "{} designs and builds fast, search-friendly websites for local businesses.",
            site.name
        ),
        canonical: site.url("/"),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": site.name,
            "url": site.url("/"),
            "email": site.email,
            "telephone": site.phone,
        }),
    }
}

pub fn web_design_meta(site: &SiteInfo, registry: &TownRegistry) -> PageMeta {
    let areas: Vec<Value> = registry.iter().map(place).collect();
    PageMeta {
        title: format!("Web Design in Dorset | {}", site.name),
        description: format!(
            "Bespoke web design for businesses across {} Dorset towns.",
            registry.len()
        ),
        canonical: site.url(WEB_DESIGN_PATH),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "Service",
            "serviceType": "Web design",
            "provider": { "@type": "Organization", "name": site.name, "url": site.url("/") },
            "areaServed": areas,
        }),
    }
}

pub fn town_meta(site: &SiteInfo, town: &Town) -> PageMeta {
    let path = town_path(&town.slug);
    let industries = town.key_industries.join(", ");
    let description = if industries.is_empty() {
        format!("Web design for businesses in {} ({}).", town.name, town.postcode)
    } else {
        format!(
            "Web design for {} businesses in {}: {}.",
            town.name, town.postcode, industries
        )
    };
    PageMeta {
        title: format!("Web Design {} | {}", town.name, site.name),
        description,
        canonical: site.url(&path),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "LocalBusiness",
            "name": format!("{} - Web Design {}", site.name, town.name),
            "url": site.url(&path),
            "email": site.email,
            "telephone": site.phone,
            "areaServed": place(town),
        }),
    }
}

/// Metadata for a plain content page such as `/privacy`.
pub fn content_page_meta(site: &SiteInfo, title: &str, path: &str) -> PageMeta {
    PageMeta {
        title: format!("{title} | {}", site.name),
        description: format!("{title} for {}.", site.name),
        canonical: site.url(path),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": title,
            "url": site.url(path),
        }),
    }
}

/// Metadata for any navigable route. Unknown towns yield `None`.
pub fn route_meta(site: &SiteInfo, registry: &TownRegistry, route: &Route) -> Option<PageMeta> {
    match route {
        Route::Homepage => Some(homepage_meta(site)),
        Route::WebDesign => Some(web_design_meta(site, registry)),
        Route::Town { town_slug } => registry.get(town_slug).map(|t| town_meta(site, t)),
    }
}

fn place(town: &Town) -> Value {
    json!({
        "@type": "City",
        "name": town.name,
        "postalCode": town.postcode,
    })
}
