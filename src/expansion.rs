//! Master-set expansion
//!
//! Turns a raw card list into the ordered list of display entries the binder
//! and print planners work on, synthesizing reverse-holo entries where a set
//! legally has them.

use std::collections::HashSet;

use crate::eligibility::is_reverse_eligible;
use crate::models::{Card, Variation};

/// How a card list should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// The base print run only, one entry per card
    Standard,
    /// Every card plus its reverse-holo variant where one exists
    Master,
}

/// Where a card list came from; curated lists get de-duplication against
/// manually tracked reverse holos, catalog lists do not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    Catalog,
    UserCurated,
}

/// One renderable unit: a source card resolved to a concrete variation.
///
/// A single stored card can expand into two entries under master mode. The
/// identity of an entry is the (source card id, variation) pair, so a
/// synthesized reverse never collides with anything stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub card: Card,
    pub variation: Variation,
}

impl DisplayEntry {
    fn new(card: Card, variation: Variation) -> Self {
        DisplayEntry { card, variation }
    }

    /// Identity of this entry within one expanded list
    pub fn key(&self) -> (&str, Variation) {
        (&self.card.id, self.variation)
    }
}

/// Expand `cards` into the final ordered display list.
///
/// When `include_nonstandard` is false, cards numbered past their set's
/// printed total (secret rares, full arts) are dropped first; unparseable
/// numbers are always kept, the same fail-open rule the eligibility check
/// uses. Output order is the walk order: source cards keep their relative
/// order and a Normal entry always precedes its synthesized Reverse. Never
/// panics.
pub fn expand(
    cards: &[Card],
    mode: DisplayMode,
    include_nonstandard: bool,
    source: ListSource,
) -> Vec<DisplayEntry> {
    let base: Vec<&Card> = cards
        .iter()
        .filter(|card| include_nonstandard || card.within_print_run())
        .collect();

    match mode {
        DisplayMode::Standard => base
            .into_iter()
            .map(|card| DisplayEntry::new(card.clone(), card.variation))
            .collect(),
        DisplayMode::Master => match source {
            ListSource::UserCurated => expand_curated(&base),
            ListSource::Catalog => expand_catalog(&base),
        },
    }
}

/// Catalog lists have no manual entries to respect: every eligible card gets
/// an auto-generated reverse.
fn expand_catalog(cards: &[&Card]) -> Vec<DisplayEntry> {
    let mut entries = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        entries.push(DisplayEntry::new((*card).clone(), Variation::Normal));
        if is_reverse_eligible(card) {
            entries.push(DisplayEntry::new((*card).clone(), Variation::Reverse));
        }
    }
    entries
}

/// Curated lists may already contain manually tracked reverse holos; those
/// are kept as-is and suppress the synthesized copy for the same
/// (set id, collector number).
fn expand_curated(cards: &[&Card]) -> Vec<DisplayEntry> {
    let has_manual_reverse: HashSet<(String, String)> = cards
        .iter()
        .filter(|c| c.variation == Variation::Reverse)
        .map(|c| (c.set.id.clone(), c.number.clone()))
        .collect();

    let mut entries = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        if card.variation == Variation::Reverse {
            entries.push(DisplayEntry::new((*card).clone(), Variation::Reverse));
            continue;
        }

        entries.push(DisplayEntry::new((*card).clone(), Variation::Normal));

        let key = (card.set.id.clone(), card.number.clone());
        if is_reverse_eligible(card) && !has_manual_reverse.contains(&key) {
            entries.push(DisplayEntry::new((*card).clone(), Variation::Reverse));
        }
    }
    entries
}
