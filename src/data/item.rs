//! Item catalog records in the gearBuilder JSON schema.
//! One document holds every gear piece, gem, enchant, and modifier; loaded
//! once at startup and indexed by `data::catalog`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PATH: &str = "data/items.json";

/// Highest item level the gearBuilder emits; slots default to it.
pub const MAX_ITEM_LEVEL: u32 = 140;

// Reserved catalog ids meaning "nothing equipped" for each category.
pub const EMPTY_ACCESSORY_ID: &str = "AAA";
pub const EMPTY_CHESTPLATE_ID: &str = "AAB";
pub const EMPTY_BOOTS_ID: &str = "AAC";
pub const EMPTY_ENCHANT_ID: &str = "AAD";
pub const EMPTY_MODIFIER_ID: &str = "AAE";
pub const EMPTY_GEM_ID: &str = "AAF";

/// One catalog record: gear piece, gem, enchant, or modifier.
/// Stat fields are optional in the source document; absent means zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub legend: String,
    #[serde(rename = "mainType")]
    pub main_type: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "subType", default)]
    pub sub_type: Option<String>,
    #[serde(rename = "gemNo", default)]
    pub gem_no: Option<u32>,
    #[serde(rename = "minLevel", default)]
    pub min_level: Option<u32>,
    #[serde(rename = "maxLevel", default)]
    pub max_level: Option<u32>,
    #[serde(rename = "statsPerLevel", default)]
    pub stats_per_level: Option<Vec<StatsPerLevel>>,
    #[serde(rename = "validModifiers", default)]
    pub valid_modifiers: Option<Vec<String>>,

    // Linear per-10-levels increments (enchants and most modifiers).
    #[serde(rename = "powerIncrement", default)]
    pub power_increment: Option<f64>,
    #[serde(rename = "defenseIncrement", default)]
    pub defense_increment: Option<f64>,
    #[serde(rename = "agilityIncrement", default)]
    pub agility_increment: Option<f64>,
    #[serde(rename = "attackSpeedIncrement", default)]
    pub attack_speed_increment: Option<f64>,
    #[serde(rename = "attackSizeIncrement", default)]
    pub attack_size_increment: Option<f64>,
    #[serde(rename = "intensityIncrement", default)]
    pub intensity_increment: Option<f64>,
    #[serde(rename = "regenerationIncrement", default)]
    pub regeneration_increment: Option<f64>,
    #[serde(rename = "piercingIncrement", default)]
    pub piercing_increment: Option<f64>,
    #[serde(rename = "resistanceIncrement", default)]
    pub resistance_increment: Option<f64>,

    // Level-independent fixed stats (gems, warding on enchants, insanity).
    #[serde(default)]
    pub power: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub agility: Option<i32>,
    #[serde(rename = "attackSpeed", default)]
    pub attack_speed: Option<i32>,
    #[serde(rename = "attackSize", default)]
    pub attack_size: Option<i32>,
    #[serde(default)]
    pub intensity: Option<i32>,
    #[serde(default)]
    pub regeneration: Option<i32>,
    #[serde(default)]
    pub piercing: Option<i32>,
    #[serde(default)]
    pub resistance: Option<i32>,
    #[serde(default)]
    pub insanity: Option<i32>,
    #[serde(default)]
    pub warding: Option<i32>,
    #[serde(default)]
    pub drawback: Option<i32>,
}

/// One row of an item's level table. Rows are keyed by the 10-level bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsPerLevel {
    pub level: u32,
    #[serde(default)]
    pub power: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub agility: Option<i32>,
    #[serde(rename = "attackSpeed", default)]
    pub attack_speed: Option<i32>,
    #[serde(rename = "attackSize", default)]
    pub attack_size: Option<i32>,
    #[serde(default)]
    pub intensity: Option<i32>,
    #[serde(default)]
    pub regeneration: Option<i32>,
    #[serde(default)]
    pub piercing: Option<i32>,
    #[serde(default)]
    pub resistance: Option<i32>,
    #[serde(default)]
    pub warding: Option<i32>,
    #[serde(default)]
    pub drawback: Option<i32>,
}

impl Item {
    /// True for the three "nothing equipped" gear sentinels.
    pub fn is_empty_gear_sentinel(id: &str) -> bool {
        id == EMPTY_ACCESSORY_ID || id == EMPTY_CHESTPLATE_ID || id == EMPTY_BOOTS_ID
    }
}

/// Load the full item catalog document. The file is a flat JSON array.
pub fn load_item_catalog(path: impl AsRef<Path>) -> Result<Vec<Item>, std::io::Error> {
    let raw = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&raw).map_err(std::io::Error::other)?;
    Ok(items)
}
