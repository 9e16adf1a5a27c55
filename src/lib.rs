//! # Tidemark
//!
//! Static site generator for a web design agency's marketing site: a
//! homepage, a `/web-design` service page, one landing page per town the
//! agency covers, and markdown content pages. Its core is the navigation
//! state machine that decides, for any page and any moment in a visit, what
//! the sticky bar, the town sub-navigation and the mobile menu show.
//!
//! # Architecture
//!
//! ```text
//! pathname ──► context::resolve ──► NavigationStore ──► items::generate
//!                                        ▲    │
//!     scroll / resize / clicks ──► PageView   └──► subscribers, generate (HTML)
//! ```
//!
//! The navigation core is plain in-memory state with no I/O. Everything it
//! needs from a browser arrives through capabilities
//! ([`scroll::Environment`], [`overlay::ScrollLock`]); the static renderer
//! passes [`scroll::StaticEnvironment`], which answers "nothing to observe",
//! and gets exactly the state a visitor sees before interacting.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`context`] | Pathname → page identity; viewport classification |
//! | [`items`] | Page context + town registry → navigation item lists |
//! | [`store`] | Page-view-scoped navigation state with subscriptions |
//! | [`scroll`] | Throttled hero-threshold detection over an injected environment |
//! | [`overlay`] | Mobile menu background scroll lock |
//! | [`view`] | Mount/event/unmount lifecycle binding the above |
//! | [`towns`] | Read-only town registry (built-in or `towns.toml`) |
//! | [`pages`] | Markdown content pages |
//! | [`seo`] | Titles, descriptions, canonical URLs, JSON-LD |
//! | [`generate`] | Maud templates and site output |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`types`] | Navigation item value types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Page-View-Scoped State
//!
//! There is no global navigation state. A [`view::PageView`] owns its store
//! from mount to unmount, and unmount consumes the view, so a listener firing
//! into a torn-down store cannot be expressed.
//!
//! ## Navigation Never Fails a Page
//!
//! Unknown routes fall back to the homepage context and unknown town slugs
//! give an empty sub-navigation. Errors exist only at the edges: loading
//! config, towns and pages from disk, and writing the output.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so templates are
//! checked at compile time and every interpolation is escaped.

pub mod config;
pub mod context;
pub mod generate;
pub mod items;
pub mod output;
pub mod overlay;
pub mod pages;
pub mod scroll;
pub mod seo;
pub mod store;
pub mod towns;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
