//! Pure payload builders for the HTTP API. Each endpoint is a function from
//! request body / path to a JSON string, so routing and tests stay free of
//! socket handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::build::{aggregate, decode, format_total_stats, DecodeError, Loadout, TotalStats};
use crate::data::catalog::{Catalog, CatalogStore};
use crate::data::item::{load_item_catalog, Item, DEFAULT_ITEMS_PATH};
use crate::data::rank::{rank_items, stat_display_name, RankedItem, RANKABLE_STATS};

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "gearforge-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotSummary {
    pub position: &'static str,
    pub item: String,
    pub item_name: String,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildResponse {
    pub status: &'static str,
    pub level: i32,
    pub vitality_points: i32,
    pub magic_points: i32,
    pub strength_points: i32,
    pub weapon_points: i32,
    pub magics: Vec<&'static str>,
    pub fighting_styles: Vec<&'static str>,
    pub slots: Vec<SlotSummary>,
    pub stats: TotalStats,
    pub stats_text: String,
}

#[derive(Debug)]
pub enum BuildPayloadError {
    Parse(serde_json::Error),
    Decode(DecodeError),
}

impl fmt::Display for BuildPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BuildPayloadError {}

fn slot_summaries(loadout: &Loadout, catalog: &Catalog) -> Vec<SlotSummary> {
    let positions = [
        "accessory_1",
        "accessory_2",
        "accessory_3",
        "chestplate",
        "boots",
    ];
    positions
        .iter()
        .zip(loadout.slots())
        .map(|(position, slot)| SlotSummary {
            position,
            item: slot.item.clone(),
            item_name: catalog
                .find_by_id(&slot.item)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            level: slot.level,
        })
        .collect()
}

/// POST /api/build: decode the code and aggregate against the live catalog.
pub fn build_payload(body: &str, store: &CatalogStore) -> Result<String, BuildPayloadError> {
    let request: BuildRequest = serde_json::from_str(body).map_err(BuildPayloadError::Parse)?;
    let loadout = decode(&request.code).map_err(BuildPayloadError::Decode)?;

    let catalog = store.snapshot();
    let stats = aggregate(&loadout, &catalog);

    let response = BuildResponse {
        status: "ok",
        level: loadout.level,
        vitality_points: loadout.vitality_points,
        magic_points: loadout.magic_points,
        strength_points: loadout.strength_points,
        weapon_points: loadout.weapon_points,
        magics: loadout.magics.iter().map(|magic| magic.name()).collect(),
        fighting_styles: loadout
            .fighting_styles
            .iter()
            .map(|style| style.name())
            .collect(),
        slots: slot_summaries(&loadout, &catalog),
        stats,
        stats_text: format_total_stats(&stats),
    };
    serde_json::to_string_pretty(&response).map_err(BuildPayloadError::Parse)
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemListEntry {
    pub id: String,
    pub name: String,
    pub main_type: String,
    pub rarity: String,
}

pub fn items_payload(store: &CatalogStore) -> Result<String, serde_json::Error> {
    let catalog = store.snapshot();
    let list: Vec<ItemListEntry> = catalog
        .items()
        .iter()
        .filter(|item| !item.deleted)
        .map(|item| ItemListEntry {
            id: item.id.clone(),
            name: item.name.clone(),
            main_type: item.main_type.clone(),
            rarity: item.rarity.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "items": list }))
}

#[derive(Debug)]
pub enum ItemLookupError {
    NotFound,
    Serialize(serde_json::Error),
}

impl fmt::Display for ItemLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "item not found"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ItemLookupError {}

/// GET /api/items/<id-or-name>: id match first, then case-insensitive name.
pub fn item_detail_payload(
    id_or_name: &str,
    store: &CatalogStore,
) -> Result<String, ItemLookupError> {
    let catalog = store.snapshot();
    let item: &Item = catalog
        .find_by_id(id_or_name)
        .or_else(|| catalog.find_by_name(id_or_name))
        .ok_or(ItemLookupError::NotFound)?;
    serde_json::to_string_pretty(item).map_err(ItemLookupError::Serialize)
}

#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    pub id: String,
    pub name: String,
    pub main_type: String,
    pub rarity: String,
    pub value: i32,
}

#[derive(Debug)]
pub enum RankPayloadError {
    UnknownStat(String),
    Serialize(serde_json::Error),
}

impl fmt::Display for RankPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStat(stat) => write!(f, "unknown stat '{stat}'"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RankPayloadError {}

fn query_param<'a>(path: &'a str, key: &str) -> Option<&'a str> {
    let query = path.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == key).then_some(value)
    })
}

/// GET /api/rank?stat=<stat>[&type=<mainType>]: catalog items ranked by the
/// stat's value at max level, best first.
pub fn rank_payload(path: &str, store: &CatalogStore) -> Result<String, RankPayloadError> {
    let stat = query_param(path, "stat").unwrap_or("").to_lowercase();
    if !RANKABLE_STATS.contains(&stat.as_str()) {
        return Err(RankPayloadError::UnknownStat(stat));
    }
    let main_type = query_param(path, "type");

    let catalog = store.snapshot();
    let ranked: Vec<RankEntry> = rank_items(&catalog, &stat, main_type)
        .into_iter()
        .map(|item: RankedItem| RankEntry {
            id: item.id,
            name: item.name,
            main_type: item.main_type,
            rarity: item.rarity,
            value: item.value,
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({
        "stat": stat_display_name(&stat),
        "items": ranked,
    }))
    .map_err(RankPayloadError::Serialize)
}

pub fn data_version_payload(store: &CatalogStore) -> Result<String, serde_json::Error> {
    let catalog = store.snapshot();
    serde_json::to_string_pretty(&serde_json::json!({
        "item_count": catalog.len(),
        "loaded_at": store.loaded_at().to_rfc3339(),
    }))
}

#[derive(Debug)]
pub enum RefreshError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RefreshError {}

/// POST /api/data/refresh: reload items.json and swap the catalog wholesale.
pub fn refresh_payload(store: &CatalogStore) -> Result<String, RefreshError> {
    let items = load_item_catalog(DEFAULT_ITEMS_PATH).map_err(RefreshError::Io)?;
    let count = items.len();
    store.replace(items);
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "item_count": count,
    }))
    .map_err(RefreshError::Serialize)
}
