//! Town registry: the static local-area data behind the location pages.
//!
//! The registry is read-only once built and shared between every page view
//! (`Arc<TownRegistry>`). Towns are held in listing order, population
//! descending with slug as the tie-breaker, so every consumer that lists
//! towns (sub-navigation, the web design index, sitemap) agrees on order
//! without sorting again.
//!
//! A site can replace the built-in Dorset registry with `towns.toml` in the
//! content root:
//!
//! ```toml
//! [[town]]
//! slug = "poole"
//! name = "Poole"
//! population = 151500
//! postcode = "BH15"
//! key_industries = ["Marine engineering", "Tourism"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const TOWNS_FILE: &str = "towns.toml";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Town registry validation error: {0}")]
    Validation(String),
}

/// Local-area metadata for one town.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Town {
    /// URL segment under `/web-design/`.
    pub slug: String,
    /// Display name.
    pub name: String,
    pub population: u32,
    /// Outward postcode district, e.g. `BH15`.
    pub postcode: String,
    #[serde(default)]
    pub key_industries: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TownsFile {
    #[serde(default)]
    town: Vec<Town>,
}

#[derive(Debug, Clone, Default)]
pub struct TownRegistry {
    towns: Vec<Town>,
}

impl TownRegistry {
    /// Build a registry, validating slugs and putting towns in listing order.
    pub fn new(mut towns: Vec<Town>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for town in &towns {
            if !is_valid_slug(&town.slug) {
                return Err(RegistryError::Validation(format!(
                    "invalid town slug {:?}: use lowercase letters, digits and dashes",
                    town.slug
                )));
            }
            if town.name.trim().is_empty() {
                return Err(RegistryError::Validation(format!(
                    "town {:?} has an empty name",
                    town.slug
                )));
            }
            if !seen.insert(town.slug.as_str()) {
                return Err(RegistryError::Validation(format!(
                    "duplicate town slug {:?}",
                    town.slug
                )));
            }
        }
        towns.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(Self { towns })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let file: TownsFile = toml::from_str(content)?;
        Self::new(file.town)
    }

    /// Load `towns.toml` from the content root, or the built-in registry
    /// when the file does not exist.
    pub fn load(content_root: &Path) -> Result<Self, RegistryError> {
        let path = content_root.join(TOWNS_FILE);
        if !path.exists() {
            log::debug!("no {TOWNS_FILE} in {}, using built-in towns", content_root.display());
            return Ok(Self::builtin());
        }
        let content = fs::read_to_string(&path)?;
        let registry = Self::from_toml_str(&content)?;
        log::info!("loaded {} towns from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// The agency's default coverage area.
    pub fn builtin() -> Self {
        let town = |slug: &str, name: &str, population: u32, postcode: &str, industries: &[&str]| {
            Town {
                slug: slug.to_string(),
                name: name.to_string(),
                population,
                postcode: postcode.to_string(),
                key_industries: industries.iter().map(|s| s.to_string()).collect(),
            }
        };
        let towns = vec![
            town("bournemouth", "Bournemouth", 187_500, "BH1", &["Tourism", "Financial services", "Digital and creative"]),
            town("poole", "Poole", 151_500, "BH15", &["Marine engineering", "Tourism", "Manufacturing"]),
            town("weymouth", "Weymouth", 53_000, "DT4", &["Tourism", "Hospitality", "Fishing"]),
            town("christchurch", "Christchurch", 31_400, "BH23", &["Aerospace", "Tourism", "Retail"]),
            town("ferndown", "Ferndown", 26_600, "BH22", &["Light industry", "Logistics", "Retail"]),
            town("dorchester", "Dorchester", 21_400, "DT1", &["Public sector", "Retail", "Agriculture"]),
            town("wimborne", "Wimborne", 15_600, "BH21", &["Retail", "Hospitality", "Professional services"]),
            town("bridport", "Bridport", 13_700, "DT6", &["Food and drink", "Arts", "Tourism"]),
            town("blandford", "Blandford Forum", 11_700, "DT11", &["Brewing", "Defence", "Retail"]),
            town("swanage", "Swanage", 9_600, "BH19", &["Tourism", "Hospitality", "Marine"]),
        ];
        match Self::new(towns) {
            Ok(registry) => registry,
            Err(e) => {
                log::warn!("built-in town registry rejected ({e}), serving no towns");
                Self::default()
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Town> {
        self.towns.iter().find(|t| t.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Towns in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Town> {
        self.towns.iter()
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
