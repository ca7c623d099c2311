//! Local persistence for user-created sets and cards
//!
//! Two JSON documents under the data directory, one per record collection,
//! mirroring the layout the records had in browser storage. Reads are
//! fail-soft: a missing or corrupt file behaves like an empty collection.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{OrganizerError, Result};
use crate::models::{Card, CardImages, CardSet, SetImages, SetSummary, Variation};

const SETS_FILE: &str = "custom_sets.json";
const CARDS_FILE: &str = "custom_cards.json";

/// A user-created set; a catalog set plus its creation timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSet {
    #[serde(flatten)]
    pub set: CardSet,
    pub created_at: String,
}

/// A user-curated card; tracks which custom set it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCard {
    #[serde(flatten)]
    pub card: Card,
    pub custom_set_id: String,
}

/// Serialized backup of both collections
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    sets: Vec<CustomSet>,
    cards: Vec<CustomCard>,
    exported_at: String,
}

/// File-backed repository for the two custom-record collections
pub struct CustomStore {
    dir: PathBuf,
}

impl CustomStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CustomStore { dir: dir.into() }
    }

    /// Default store location: ~/.local/share/binder_organizer
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binder_organizer")
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    fn sets_path(&self) -> PathBuf {
        self.dir.join(SETS_FILE)
    }

    fn cards_path(&self) -> PathBuf {
        self.dir.join(CARDS_FILE)
    }

    /// All custom sets, in creation order. Missing or corrupt data reads as
    /// an empty collection, never an error.
    pub fn list_sets(&self) -> Vec<CustomSet> {
        load_collection(&self.sets_path())
    }

    /// All custom cards across all sets
    pub fn list_cards(&self) -> Vec<CustomCard> {
        load_collection(&self.cards_path())
    }

    /// Cards belonging to one custom set
    pub fn cards_by_set(&self, set_id: &str) -> Vec<CustomCard> {
        self.list_cards()
            .into_iter()
            .filter(|c| c.custom_set_id == set_id)
            .collect()
    }

    /// Create a new empty custom set
    pub fn create_set(&self, name: &str, series: &str) -> Result<CustomSet> {
        let mut sets = self.list_sets();

        // Millisecond ids can collide when two sets are created back to back
        let mut millis = Utc::now().timestamp_millis();
        while sets.iter().any(|s| s.set.id == format!("custom-{millis}")) {
            millis += 1;
        }
        let now = Utc::now();

        let new_set = CustomSet {
            set: CardSet {
                id: format!("custom-{millis}"),
                name: name.to_string(),
                series: series.to_string(),
                printed_total: 0,
                total: 0,
                release_date: now.format("%Y-%m-%d").to_string(),
                updated_at: now.to_rfc3339(),
                images: SetImages::default(),
            },
            created_at: now.to_rfc3339(),
        };

        sets.push(new_set.clone());
        self.save_sets(&sets)?;

        log::info!("Created custom set {} ({})", new_set.set.name, new_set.set.id);
        Ok(new_set)
    }

    /// Rename a custom set and/or change its series label
    pub fn update_set(
        &self,
        id: &str,
        name: Option<&str>,
        series: Option<&str>,
    ) -> Result<CustomSet> {
        let mut sets = self.list_sets();
        let set = sets
            .iter_mut()
            .find(|s| s.set.id == id)
            .ok_or_else(|| OrganizerError::SetNotFound(id.to_string()))?;

        if let Some(name) = name {
            set.set.name = name.to_string();
        }
        if let Some(series) = series {
            set.set.series = series.to_string();
        }
        set.set.updated_at = Utc::now().to_rfc3339();

        let updated = set.clone();
        self.save_sets(&sets)?;
        Ok(updated)
    }

    /// Delete a custom set and every card belonging to it
    pub fn delete_set(&self, id: &str) -> Result<()> {
        let mut sets = self.list_sets();
        let before = sets.len();
        sets.retain(|s| s.set.id != id);
        if sets.len() == before {
            return Err(OrganizerError::SetNotFound(id.to_string()));
        }

        let mut cards = self.list_cards();
        let cards_before = cards.len();
        cards.retain(|c| c.custom_set_id != id);

        self.save_sets(&sets)?;
        self.save_cards(&cards)?;

        log::info!(
            "Deleted custom set {} and {} member card(s)",
            id,
            cards_before - cards.len()
        );
        Ok(())
    }

    /// Add a card to a custom set. When `source` is given (a card picked
    /// from the catalog), its set metadata and images are preserved so the
    /// print run and eligibility checks keep working.
    #[allow(clippy::too_many_arguments)]
    pub fn add_card(
        &self,
        set_id: &str,
        name: &str,
        number: &str,
        rarity: &str,
        image_url: &str,
        source: Option<&Card>,
        variation: Option<Variation>,
    ) -> Result<CustomCard> {
        let mut sets = self.list_sets();
        if !sets.iter().any(|s| s.set.id == set_id) {
            return Err(OrganizerError::SetNotFound(set_id.to_string()));
        }

        let mut cards = self.list_cards();
        let mut millis = Utc::now().timestamp_millis();
        while cards.iter().any(|c| c.card.id == format!("{set_id}-{millis}")) {
            millis += 1;
        }

        let new_card = CustomCard {
            card: Card {
                id: format!("{set_id}-{millis}"),
                name: name.to_string(),
                supertype: source
                    .map(|c| c.supertype.clone())
                    .unwrap_or_else(|| "Pokémon".to_string()),
                subtypes: source.map(|c| c.subtypes.clone()).unwrap_or_default(),
                number: number.to_string(),
                artist: source
                    .map(|c| c.artist.clone())
                    .unwrap_or_else(|| "Custom".to_string()),
                rarity: rarity.to_string(),
                variation: variation
                    .or(source.map(|c| c.variation))
                    .unwrap_or_default(),
                set: source.map(|c| c.set.clone()).unwrap_or(SetSummary {
                    id: set_id.to_string(),
                    ..Default::default()
                }),
                images: CardImages {
                    small: if image_url.is_empty() {
                        source.map(|c| c.images.small.clone()).unwrap_or_default()
                    } else {
                        image_url.to_string()
                    },
                    large: source
                        .map(|c| c.images.large.clone())
                        .filter(|url| !url.is_empty())
                        .unwrap_or_else(|| image_url.to_string()),
                },
            },
            custom_set_id: set_id.to_string(),
        };

        cards.push(new_card.clone());
        self.save_cards(&cards)?;
        self.recompute_counts(set_id, &mut sets, &cards)?;

        Ok(new_card)
    }

    /// Change a stored card's rarity and/or variation
    pub fn update_card(
        &self,
        id: &str,
        rarity: Option<&str>,
        variation: Option<Variation>,
    ) -> Result<CustomCard> {
        let mut cards = self.list_cards();
        let card = cards
            .iter_mut()
            .find(|c| c.card.id == id)
            .ok_or_else(|| OrganizerError::CardNotFound(id.to_string()))?;

        if let Some(rarity) = rarity {
            card.card.rarity = rarity.to_string();
        }
        if let Some(variation) = variation {
            card.card.variation = variation;
        }

        let updated = card.clone();
        self.save_cards(&cards)?;
        Ok(updated)
    }

    /// Remove one card; the owning set's counts are recomputed
    pub fn remove_card(&self, id: &str) -> Result<()> {
        let mut cards = self.list_cards();
        let set_id = cards
            .iter()
            .find(|c| c.card.id == id)
            .map(|c| c.custom_set_id.clone())
            .ok_or_else(|| OrganizerError::CardNotFound(id.to_string()))?;

        cards.retain(|c| c.card.id != id);
        self.save_cards(&cards)?;

        let mut sets = self.list_sets();
        self.recompute_counts(&set_id, &mut sets, &cards)?;
        Ok(())
    }

    /// Serialize both collections into one backup snapshot
    pub fn export(&self) -> Result<String> {
        let snapshot = Snapshot {
            sets: self.list_sets(),
            cards: self.list_cards(),
            exported_at: Utc::now().to_rfc3339(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Replace both collections with a previously exported snapshot. A
    /// snapshot that fails to parse leaves the store untouched.
    pub fn import(&self, json: &str) -> Result<()> {
        let snapshot: Snapshot = serde_json::from_str(json)?;

        self.save_sets(&snapshot.sets)?;
        self.save_cards(&snapshot.cards)?;

        log::info!(
            "Imported snapshot: {} set(s), {} card(s)",
            snapshot.sets.len(),
            snapshot.cards.len()
        );
        Ok(())
    }

    /// Card-count fields are recomputed from the live member count after
    /// every mutation rather than tracked incrementally, so they can't drift
    fn recompute_counts(
        &self,
        set_id: &str,
        sets: &mut [CustomSet],
        cards: &[CustomCard],
    ) -> Result<()> {
        let count = cards.iter().filter(|c| c.custom_set_id == set_id).count() as u32;
        if let Some(set) = sets.iter_mut().find(|s| s.set.id == set_id) {
            set.set.total = count;
            set.set.printed_total = count;
            set.set.updated_at = Utc::now().to_rfc3339();
        }
        self.save_sets(sets)
    }

    fn save_sets(&self, sets: &[CustomSet]) -> Result<()> {
        save_collection(&self.sets_path(), sets)
    }

    fn save_cards(&self, cards: &[CustomCard]) -> Result<()> {
        save_collection(&self.cards_path(), cards)
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "Ignoring corrupt store file {}: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn save_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(records)?;
    std::fs::write(path, content)?;
    Ok(())
}
