//! Binder capacity arithmetic and product recommendations

use serde::Serialize;

/// A physical binder product: pocket count per page, total slot capacity,
/// page count. Static reference data, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderPreset {
    pub name: &'static str,
    pub pockets: u32,
    pub slots: u32,
    pub pages: u32,
}

/// Common binder configurations with typical total slot counts
pub const BINDER_PRESETS: [BinderPreset; 10] = [
    BinderPreset { name: "4-Pocket Mini", pockets: 4, slots: 40, pages: 10 },
    BinderPreset { name: "4-Pocket Standard", pockets: 4, slots: 80, pages: 20 },
    BinderPreset { name: "6-Pocket Slim", pockets: 6, slots: 60, pages: 10 },
    BinderPreset { name: "6-Pocket Standard", pockets: 6, slots: 120, pages: 20 },
    BinderPreset { name: "9-Pocket Small", pockets: 9, slots: 180, pages: 20 },
    BinderPreset { name: "9-Pocket Standard", pockets: 9, slots: 360, pages: 40 },
    BinderPreset { name: "9-Pocket Large", pockets: 9, slots: 540, pages: 60 },
    BinderPreset { name: "12-Pocket Slim", pockets: 12, slots: 96, pages: 8 },
    BinderPreset { name: "12-Pocket Standard", pockets: 12, slots: 120, pages: 10 },
    BinderPreset { name: "12-Pocket Large", pockets: 12, slots: 240, pages: 20 },
];

/// Slot arithmetic for storing `total_cards` in pages of `pocket_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinderStats {
    pub pages_needed: u32,
    pub total_slots: u32,
    pub empty_slots: u32,
}

/// Compute pages needed, total slots and leftover slots for a card count.
///
/// A pocket count of 0 is treated as 1; no page holds zero cards. Guarantees:
/// `total_slots % pocket_count == 0`, `total_slots >= total_cards` and
/// `empty_slots < pocket_count`.
pub fn compute_binder_stats(total_cards: u32, pocket_count: u32) -> BinderStats {
    let pocket_count = pocket_count.max(1);
    let pages_needed = total_cards.div_ceil(pocket_count);
    let total_slots = pages_needed * pocket_count;
    BinderStats {
        pages_needed,
        total_slots,
        empty_slots: total_slots - total_cards,
    }
}

/// Presets available for a given pocket count, in table order
pub fn presets_for_pockets(pocket_count: u32) -> Vec<&'static BinderPreset> {
    BINDER_PRESETS
        .iter()
        .filter(|p| p.pockets == pocket_count)
        .collect()
}

/// First preset of the selected pocket count whose slot capacity fits the
/// card count; `None` means no single binder of that type is big enough and
/// the caller should report the shortfall.
pub fn recommend_preset(total_cards: u32, pocket_count: u32) -> Option<&'static BinderPreset> {
    presets_for_pockets(pocket_count)
        .into_iter()
        .find(|p| p.slots >= total_cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_for_204_cards_in_9_pockets() {
        let stats = compute_binder_stats(204, 9);
        assert_eq!(stats.pages_needed, 23);
        assert_eq!(stats.total_slots, 207);
        assert_eq!(stats.empty_slots, 3);
    }

    #[test]
    fn stats_invariants_hold_across_counts() {
        for pockets in [4u32, 6, 9, 12] {
            for count in [0u32, 1, 8, 9, 10, 99, 204, 540] {
                let stats = compute_binder_stats(count, pockets);
                assert_eq!(stats.total_slots % pockets, 0);
                assert!(stats.total_slots >= count);
                assert_eq!(stats.empty_slots, stats.total_slots - count);
                assert!(stats.empty_slots < pockets);
            }
        }
    }

    #[test]
    fn zero_pockets_fall_back_to_one_per_page() {
        let stats = compute_binder_stats(10, 0);
        assert_eq!(stats.pages_needed, 10);
        assert_eq!(stats.total_slots, 10);
        assert_eq!(stats.empty_slots, 0);
    }

    #[test]
    fn exact_fit_leaves_no_empty_slots() {
        let stats = compute_binder_stats(180, 9);
        assert_eq!(stats.pages_needed, 20);
        assert_eq!(stats.empty_slots, 0);
    }

    #[test]
    fn recommendation_picks_first_fitting_preset() {
        let preset = recommend_preset(204, 9).unwrap();
        assert_eq!(preset.name, "9-Pocket Standard");

        let preset = recommend_preset(150, 9).unwrap();
        assert_eq!(preset.name, "9-Pocket Small");
    }

    #[test]
    fn oversized_collection_has_no_recommendation() {
        assert!(recommend_preset(600, 9).is_none());
        assert!(recommend_preset(100, 4).is_none());
    }

    #[test]
    fn presets_are_filtered_by_pocket_count() {
        let presets = presets_for_pockets(12);
        assert_eq!(presets.len(), 3);
        assert!(presets.iter().all(|p| p.pockets == 12));
    }
}
