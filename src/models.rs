//! Domain types shared across the catalog client, the local store and the
//! planning modules.
//!
//! Serde renames keep the JSON layout identical to the TCGdex payloads and
//! the persisted record format, so snapshots exported elsewhere import
//! cleanly here.

use serde::{Deserialize, Serialize};

/// Print variation of a card. Absent in stored data means `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variation {
    #[default]
    Normal,
    Reverse,
}

impl Variation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variation::Normal => "Normal",
            Variation::Reverse => "Reverse",
        }
    }
}

/// Symbol and logo image URLs for a set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetImages {
    pub symbol: String,
    pub logo: String,
}

/// Small and large image URLs for a card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

/// A named collection of cards, either from the remote catalog or
/// user-created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub id: String,
    pub name: String,
    pub series: String,
    /// Official card count of the base print run
    pub printed_total: u32,
    /// Count including secret rares and other non-standard prints
    pub total: u32,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub images: SetImages,
}

/// Set metadata carried on every card so the planning code never needs a
/// second lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    pub id: String,
    pub name: String,
    pub series: String,
    pub printed_total: u32,
    pub total: u32,
    #[serde(default)]
    pub images: SetImages,
}

impl From<&CardSet> for SetSummary {
    fn from(set: &CardSet) -> Self {
        SetSummary {
            id: set.id.clone(),
            name: set.name.clone(),
            series: set.series.clone(),
            printed_total: set.printed_total,
            total: set.total,
            images: set.images.clone(),
        }
    }
}

/// One physical card entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable within the owning set's card list, not globally unique
    pub id: String,
    pub name: String,
    pub supertype: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
    /// Printed collector number; may contain non-digit characters
    pub number: String,
    #[serde(default)]
    pub artist: String,
    pub rarity: String,
    #[serde(default)]
    pub variation: Variation,
    pub set: SetSummary,
    #[serde(default)]
    pub images: CardImages,
}

impl Card {
    /// True when this card's collector number falls inside the owning set's
    /// base print run. Unparseable numbers count as inside (fail-open); this
    /// is the single source of truth for that policy.
    pub fn within_print_run(&self) -> bool {
        within_print_run(&self.number, self.set.printed_total)
    }
}

/// Strip non-digit characters from a collector number and parse the rest
pub fn parse_collector_number(number: &str) -> Option<u32> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Compare a collector number against a set's printed total.
///
/// A printed total of 0 (sets with unknown counts) is treated as 999, and a
/// number that fails to parse is treated as in range. Fail-open on malformed
/// numbers is deliberate and shared by the eligibility check and the
/// non-standard-print filter.
pub fn within_print_run(number: &str, printed_total: u32) -> bool {
    let printed_total = if printed_total == 0 { 999 } else { printed_total };
    match parse_collector_number(number) {
        Some(n) => n <= printed_total,
        None => true,
    }
}
