//! Reverse-holo eligibility classification
//!
//! Decides whether a card, in its set context, can legally exist as a
//! reverse-holo variant. Pure and total: any well-formed card gets a bool.

use crate::models::Card;

/// Rarities that receive reverse-holo prints (the standard tiers)
const REGULAR_RARITIES: [&str; 4] = ["Common", "Uncommon", "Rare", "Rare Holo"];

/// Returns true when `card` may have a reverse-holo variant.
///
/// A card qualifies only if its rarity is one of the regular tiers, it is not
/// a special-mechanic card (ex/V/GX and the ultra/secret/illustration/special
/// rarity families), its set is not a promo set, it is not an Energy card,
/// and its collector number sits inside the base print run (unparseable
/// numbers pass; missing rarity fails).
pub fn is_reverse_eligible(card: &Card) -> bool {
    // No rarity means we cannot classify the card; refuse rather than guess.
    if card.rarity.is_empty() {
        return false;
    }

    let is_regular_rarity = REGULAR_RARITIES.contains(&card.rarity.as_str());

    // Cards like ex, V and GX never get reverse holos, whatever their rarity
    // label says. The name suffixes are case-sensitive on purpose: " ex" is
    // the mechanic marker, "Vulpix" is not.
    let rarity_lower = card.rarity.to_lowercase();
    let is_special_type = card.name.contains(" ex")
        || card.name.contains(" V")
        || card.name.contains(" GX")
        || rarity_lower.contains("ultra")
        || rarity_lower.contains("secret")
        || rarity_lower.contains("illustration")
        || rarity_lower.contains("special");

    // Promo sets follow the 'p' naming convention ("xyp", "svp", "smp")
    let set_id = card.set.id.to_lowercase();
    let is_promo_set = set_id.contains('p') || set_id.contains("promo");

    let is_energy = card.supertype == "Energy";

    is_regular_rarity
        && !is_special_type
        && !is_promo_set
        && !is_energy
        && card.within_print_run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SetSummary, Variation};

    fn card(name: &str, rarity: &str, supertype: &str, number: &str, set_id: &str) -> Card {
        Card {
            id: format!("{set_id}-{number}"),
            name: name.to_string(),
            supertype: supertype.to_string(),
            subtypes: vec![],
            number: number.to_string(),
            artist: String::new(),
            rarity: rarity.to_string(),
            variation: Variation::Normal,
            set: SetSummary {
                id: set_id.to_string(),
                name: "Base Set".to_string(),
                series: "BASE".to_string(),
                printed_total: 102,
                total: 102,
                images: Default::default(),
            },
            images: Default::default(),
        }
    }

    #[test]
    fn regular_common_is_eligible() {
        assert!(is_reverse_eligible(&card(
            "Caterpie", "Common", "Pokémon", "45", "base1"
        )));
    }

    #[test]
    fn each_regular_rarity_is_eligible() {
        for rarity in ["Common", "Uncommon", "Rare", "Rare Holo"] {
            assert!(
                is_reverse_eligible(&card("Growlithe", rarity, "Pokémon", "28", "base1")),
                "{rarity} should be eligible"
            );
        }
    }

    #[test]
    fn ultra_rarity_is_excluded() {
        assert!(!is_reverse_eligible(&card(
            "Charizard",
            "Rare Ultra",
            "Pokémon",
            "4",
            "base1"
        )));
    }

    #[test]
    fn mechanic_name_suffixes_are_excluded() {
        assert!(!is_reverse_eligible(&card(
            "Charizard ex",
            "Common",
            "Pokémon",
            "6",
            "base1"
        )));
        assert!(!is_reverse_eligible(&card(
            "Pikachu V", "Common", "Pokémon", "43", "base1"
        )));
        assert!(!is_reverse_eligible(&card(
            "Eevee GX", "Common", "Pokémon", "101", "base1"
        )));
    }

    #[test]
    fn name_suffix_check_is_case_sensitive() {
        // "Vulpix" contains no " V" token; lowercase "v" inside a word is fine
        assert!(is_reverse_eligible(&card(
            "Vulpix", "Common", "Pokémon", "68", "base1"
        )));
    }

    #[test]
    fn promo_set_is_excluded() {
        assert!(!is_reverse_eligible(&card(
            "Mew", "Common", "Pokémon", "8", "xyp"
        )));
    }

    #[test]
    fn energy_is_excluded() {
        assert!(!is_reverse_eligible(&card(
            "Fire Energy",
            "Common",
            "Energy",
            "98",
            "base1"
        )));
    }

    #[test]
    fn number_past_printed_total_is_excluded() {
        // rarity qualifies, but 150 > 102
        assert!(!is_reverse_eligible(&card(
            "Mewtwo", "Common", "Pokémon", "150", "base1"
        )));
    }

    #[test]
    fn unparseable_number_is_fail_open() {
        assert!(is_reverse_eligible(&card(
            "Ditto", "Common", "Pokémon", "??", "base1"
        )));
    }

    #[test]
    fn missing_rarity_is_fail_closed() {
        assert!(!is_reverse_eligible(&card(
            "Ditto", "", "Pokémon", "3", "base1"
        )));
    }
}
