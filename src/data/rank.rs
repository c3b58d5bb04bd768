//! Rank catalog items by a single stat read from the level-140 row of the
//! per-level table, optionally filtered by main type.

use crate::data::catalog::Catalog;
use crate::data::item::{Item, MAX_ITEM_LEVEL};

/// Stat names accepted by the ranking endpoints, in display order.
pub const RANKABLE_STATS: &[&str] = &[
    "power",
    "defense",
    "agility",
    "attackspeed",
    "attacksize",
    "intensity",
    "regeneration",
    "armorpiercing",
    "resistance",
];

#[derive(Debug, Clone)]
pub struct RankedItem {
    pub id: String,
    pub name: String,
    pub main_type: String,
    pub rarity: String,
    pub value: i32,
}

/// Stat value at the max-level row, or None if the item has no such row.
pub fn stat_at_max_level(item: &Item, stat: &str) -> Option<i32> {
    let rows = item.stats_per_level.as_ref()?;
    let row = rows.iter().find(|row| row.level == MAX_ITEM_LEVEL)?;
    match stat {
        "power" => row.power,
        "defense" => row.defense,
        "agility" => row.agility,
        "attackspeed" => row.attack_speed,
        "attacksize" => row.attack_size,
        "intensity" => row.intensity,
        "regeneration" => row.regeneration,
        "armorpiercing" => row.piercing,
        "resistance" => row.resistance,
        _ => None,
    }
}

pub fn stat_display_name(stat: &str) -> &str {
    match stat {
        "power" => "Power",
        "defense" => "Defense",
        "agility" => "Agility",
        "attackspeed" => "Attack Speed",
        "attacksize" => "Attack Size",
        "intensity" => "Intensity",
        "regeneration" => "Regeneration",
        "armorpiercing" => "Armor Piercing",
        "resistance" => "Resistance",
        _ => stat,
    }
}

/// Items with a positive value for `stat` at max level, highest first.
/// Deleted items, "None" placeholder records, and items without a per-level
/// table are skipped; `main_type` filters when non-empty.
pub fn rank_items(catalog: &Catalog, stat: &str, main_type: Option<&str>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = catalog
        .items()
        .iter()
        .filter(|item| !item.deleted && item.name != "None" && item.stats_per_level.is_some())
        .filter(|item| match main_type {
            Some(filter) if !filter.is_empty() => item.main_type.eq_ignore_ascii_case(filter),
            _ => true,
        })
        .filter_map(|item| {
            let value = stat_at_max_level(item, stat)?;
            (value > 0).then(|| RankedItem {
                id: item.id.clone(),
                name: item.name.clone(),
                main_type: item.main_type.clone(),
                rarity: item.rarity.clone(),
                value,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    ranked
}
