//! Binder Organizer - Pokemon TCG collection organizer
//!
//! Browses official sets from the TCGdex catalog, manages locally persisted
//! custom sets, expands card lists into master sets with reverse-holo
//! variants, computes binder-page layouts and exports printable placeholder
//! sheets as PDFs.

pub mod binder;
pub mod catalog;
pub mod debounce;
pub mod eligibility;
pub mod error;
pub mod expansion;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod store;
pub mod suggest;

pub use binder::{compute_binder_stats, recommend_preset, BinderPreset, BinderStats};
pub use catalog::{CatalogClient, SetPage};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE_DELAY};
pub use eligibility::is_reverse_eligible;
pub use error::{OrganizerError, Result};
pub use expansion::{expand, DisplayEntry, DisplayMode, ListSource};
pub use layout::{plan_pages, Orientation, PaperSize, PrintPage};
pub use models::{Card, CardSet, Variation};
pub use pdf::{generate_pdf, PrintOptions};
pub use store::{CustomCard, CustomSet, CustomStore};
pub use suggest::SuggestionClient;
