//! Plain-text rendering of totals and loadouts for CLI output and API
//! payloads. Zero-valued stat fields are omitted; an all-zero total renders
//! as "No stats".

use crate::build::aggregator::TotalStats;
use crate::build::decoder::{Loadout, Slot};
use crate::data::catalog::Catalog;
use crate::data::item::{EMPTY_ENCHANT_ID, EMPTY_GEM_ID, EMPTY_MODIFIER_ID};

pub fn format_total_stats(stats: &TotalStats) -> String {
    let mut out = String::new();
    for (label, value) in stats.entries() {
        if value != 0 {
            out.push_str(&format!("{label} {value}\n"));
        }
    }

    if out.is_empty() {
        "No stats".to_string()
    } else {
        out
    }
}

fn item_name(catalog: &Catalog, id: &str) -> String {
    catalog
        .find_by_id(id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// One slot as display lines: item name, enchant/modifier when set, socketed
/// gem names, and the item level.
pub fn format_slot(slot: &Slot, catalog: &Catalog) -> String {
    let mut lines = vec![item_name(catalog, &slot.item)];

    if !slot.enchant.is_empty() && slot.enchant != EMPTY_ENCHANT_ID {
        lines.push(format!("Enchant: {}", item_name(catalog, &slot.enchant)));
    }
    if !slot.modifier.is_empty() && slot.modifier != EMPTY_MODIFIER_ID {
        lines.push(format!("Modifier: {}", item_name(catalog, &slot.modifier)));
    }

    let gems: Vec<String> = slot
        .gems
        .iter()
        .filter(|gem| !gem.is_empty() && gem.as_str() != EMPTY_GEM_ID)
        .map(|gem| item_name(catalog, gem))
        .collect();
    if !gems.is_empty() {
        lines.push(format!("Gems: {}", gems.join(", ")));
    }

    lines.push(format!("Level: {}", slot.level));
    lines.join("\n")
}

/// Whole loadout as a readable block: allocations, magics, styles, slots.
pub fn format_loadout(loadout: &Loadout, catalog: &Catalog) -> String {
    let mut out = format!(
        "Level {} | Vitality {} | Magic {} | Strength {} | Weapon {}\n",
        loadout.level,
        loadout.vitality_points,
        loadout.magic_points,
        loadout.strength_points,
        loadout.weapon_points,
    );

    if !loadout.magics.is_empty() {
        let names: Vec<&str> = loadout.magics.iter().map(|magic| magic.name()).collect();
        out.push_str(&format!("Magics: {}\n", names.join(", ")));
    }
    if !loadout.fighting_styles.is_empty() {
        let names: Vec<&str> = loadout
            .fighting_styles
            .iter()
            .map(|style| style.name())
            .collect();
        out.push_str(&format!("Fighting styles: {}\n", names.join(", ")));
    }

    let slot_labels = ["Accessory 1", "Accessory 2", "Accessory 3", "Chestplate", "Boots"];
    for (label, slot) in slot_labels.iter().zip(loadout.slots()) {
        out.push_str(&format!("\n[{label}]\n{}\n", format_slot(slot, catalog)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_totals_render_as_no_stats() {
        assert_eq!(format_total_stats(&TotalStats::default()), "No stats");
    }

    #[test]
    fn zero_fields_are_omitted() {
        let stats = TotalStats {
            power: 100,
            warding: 6,
            ..TotalStats::default()
        };
        let rendered = format_total_stats(&stats);
        assert_eq!(rendered, "Power 100\nWarding 6\n");
    }
}
