//! TCGdex catalog client
//!
//! Fetches the official set list and per-set card lists from the TCGdex v2
//! REST API and reshapes them into the crate's domain types. The list
//! payloads carry neither rarity nor supertype, so both are inferred from
//! the card name; that inference feeds the reverse-holo eligibility check.

use serde::Deserialize;

use crate::error::{OrganizerError, Result};
use crate::models::{Card, CardImages, CardSet, SetImages, SetSummary};

const API_BASE_URL: &str = "https://api.tcgdex.net/v2/en";
const USER_AGENT: &str = "binder_organizer/1.0";

/// Set summary as returned by GET /sets
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TcgdexSet {
    id: String,
    name: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    card_count: TcgdexCardCount,
}

#[derive(Debug, Deserialize)]
struct TcgdexCardCount {
    total: u32,
    official: u32,
}

/// Set detail as returned by GET /sets/{id}, including the card list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TcgdexSetDetail {
    id: String,
    name: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    card_count: TcgdexCardCount,
    #[serde(default)]
    cards: Vec<TcgdexCardSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TcgdexCardSummary {
    id: String,
    local_id: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IllustratorResponse {
    #[allow(dead_code)]
    name: String,
    cards: Vec<TcgdexCardSummary>,
}

/// One page of the filtered, newest-first set list
#[derive(Debug)]
pub struct SetPage {
    pub sets: Vec<CardSet>,
    pub page: usize,
    pub page_size: usize,
    /// Count of all physical sets, before pagination
    pub total_count: usize,
}

/// Async client for the TCGdex catalog
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Client against a custom base URL (for testing with mock servers)
    pub(crate) fn with_base_url(base_url: impl Into<String>) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OrganizerError::HttpStatus(response.status()));
        }
        Ok(response.json::<T>().await?)
    }

    /// List official sets, newest first, with manual pagination.
    ///
    /// TCG Pocket sets (the mobile game) are filtered out by their id
    /// patterns; they are not physical cards and have no binder pages.
    pub async fn get_sets(&self, page: usize, page_size: usize) -> Result<SetPage> {
        let raw: Vec<TcgdexSet> = self.fetch_json("/sets").await?;

        let mut sets: Vec<CardSet> = raw
            .iter()
            .filter(|set| is_physical_set(&set.id))
            .map(convert_set)
            .collect();

        // API order is oldest-first; collectors want the latest releases up top
        sets.reverse();
        let total_count = sets.len();

        let start = page.saturating_sub(1) * page_size;
        let paged: Vec<CardSet> = sets.into_iter().skip(start).take(page_size).collect();

        log::info!(
            "Fetched {} physical sets, returning page {} ({} sets)",
            total_count,
            page,
            paged.len()
        );

        Ok(SetPage {
            sets: paged,
            page,
            page_size,
            total_count,
        })
    }

    /// Fetch a single set's summary
    pub async fn get_set(&self, id: &str) -> Result<CardSet> {
        let raw: TcgdexSet = self.fetch_json(&format!("/sets/{id}")).await?;
        Ok(convert_set(&raw))
    }

    /// Fetch every card in a set, each carrying the resolved set metadata
    pub async fn get_cards_by_set(&self, set_id: &str) -> Result<Vec<Card>> {
        let detail: TcgdexSetDetail = self.fetch_json(&format!("/sets/{set_id}")).await?;

        let set_info = SetSummary {
            id: set_id.to_string(),
            name: detail.name.clone(),
            series: series_from_id(&detail.id),
            printed_total: detail.card_count.official,
            total: detail.card_count.total,
            images: set_images(&detail.id, detail.symbol.as_deref(), detail.logo.as_deref()),
        };

        let cards: Vec<Card> = detail
            .cards
            .iter()
            .map(|card| convert_card(card, &set_info))
            .collect();

        log::info!("Fetched {} cards for set {}", cards.len(), set_id);
        Ok(cards)
    }

    /// Search cards by illustrator name, restricted to known physical sets.
    ///
    /// The illustrator payload carries bare card ids (`<setId>-<localId>`)
    /// with no set metadata, so each hit is enriched from `known_sets`;
    /// cards whose set is not in that list are dropped.
    pub async fn get_cards_by_artist(
        &self,
        artist: &str,
        known_sets: &[CardSet],
    ) -> Result<Vec<Card>> {
        let path = format!("/illustrators/{}", urlencoding::encode(artist));
        let response: IllustratorResponse = self.fetch_json(&path).await?;

        let cards: Vec<Card> = response
            .cards
            .iter()
            .filter_map(|card| {
                let set_id = card.id.rsplit_once('-').map(|(prefix, _)| prefix)?;
                let set = known_sets.iter().find(|s| s.id == set_id)?;
                let mut converted = convert_card(card, &SetSummary::from(set));
                converted.artist = artist.to_string();
                Some(converted)
            })
            .collect();

        log::info!(
            "Artist search '{}' matched {} cards in known sets",
            artist,
            cards.len()
        );
        Ok(cards)
    }

    /// Case-insensitive name search across the given sets.
    ///
    /// One set failing to load does not fail the search: its contribution is
    /// dropped and the remaining sets still aggregate.
    pub async fn search_cards_in_sets(&self, query: &str, set_ids: &[String]) -> Result<Vec<Card>> {
        if query.chars().count() < 2 {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let mut matches = Vec::new();

        for set_id in set_ids {
            match self.get_cards_by_set(set_id).await {
                Ok(cards) => {
                    matches.extend(
                        cards
                            .into_iter()
                            .filter(|c| c.name.to_lowercase().contains(&needle)),
                    );
                }
                Err(e) => {
                    log::warn!("Skipping set {} during search: {}", set_id, e);
                }
            }
        }

        Ok(matches)
    }
}

/// TCG Pocket sets use A-series / B-series ids ("A1", "A2a", ...), "MEP" for
/// promos and "P-A"; everything else is a physical product
fn is_physical_set(id: &str) -> bool {
    let id = id.to_uppercase();
    let mut chars = id.chars();
    if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
        if (first == 'A' || first == 'B') && second.is_ascii_digit() {
            return false;
        }
    }
    !(id.starts_with("MEP") || id == "P-A")
}

/// Series label derived from the set id: digits stripped, uppercased
fn series_from_id(id: &str) -> String {
    let series: String = id
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .to_uppercase();
    if series.is_empty() {
        "Unknown".to_string()
    } else {
        series
    }
}

/// Symbol/logo URLs, falling back to the pokemontcg.io CDN when TCGdex has
/// no asset for the set
fn set_images(set_id: &str, symbol: Option<&str>, logo: Option<&str>) -> SetImages {
    SetImages {
        symbol: match symbol {
            Some(url) => format!("{url}.png"),
            None => format!("https://images.pokemontcg.io/{set_id}/symbol.png"),
        },
        logo: match logo {
            Some(url) => format!("{url}.png"),
            None => format!("https://images.pokemontcg.io/{set_id}/logo.png"),
        },
    }
}

fn convert_set(set: &TcgdexSet) -> CardSet {
    CardSet {
        id: set.id.clone(),
        name: set.name.clone(),
        series: series_from_id(&set.id),
        printed_total: set.card_count.official,
        total: set.card_count.total,
        release_date: String::new(),
        updated_at: String::new(),
        images: set_images(&set.id, set.symbol.as_deref(), set.logo.as_deref()),
    }
}

/// Infer the rarity tier from the card name. The list payload has no rarity
/// field, and the reverse-holo logic only needs to tell the regular tiers
/// from the special mechanics, which all mark themselves in the name.
fn rarity_from_name(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.contains(" ex") || name.ends_with(" ex") {
        "Rare Ultra"
    } else if name.contains(" gx") {
        "Rare Ultra"
    } else if name.contains(" v") && !name.contains("eevee") {
        "Rare Ultra"
    } else if name.contains(" vmax") || name.contains(" vstar") {
        "Rare Ultra"
    } else if name.contains("radiant ") {
        "Radiant Rare"
    } else {
        "Common"
    }
}

fn supertype_from_name(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.contains("energy") {
        "Energy"
    } else if name.contains("trainer")
        || name.contains("supporter")
        || name.contains("stadium")
        || name.contains("item")
    {
        "Trainer"
    } else {
        "Pokémon"
    }
}

fn convert_card(card: &TcgdexCardSummary, set_info: &SetSummary) -> Card {
    Card {
        id: card.id.clone(),
        name: card.name.clone(),
        supertype: supertype_from_name(&card.name).to_string(),
        subtypes: vec![],
        number: card.local_id.clone(),
        artist: String::new(),
        rarity: rarity_from_name(&card.name).to_string(),
        variation: Default::default(),
        set: set_info.clone(),
        images: match &card.image {
            Some(base) => CardImages {
                small: format!("{base}/low.png"),
                large: format!("{base}/high.png"),
            },
            None => CardImages::default(),
        },
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
