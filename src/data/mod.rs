pub mod catalog;
pub mod item;
pub mod rank;
pub mod validate;

pub use catalog::{Catalog, CatalogStore};
pub use item::{
    load_item_catalog, Item, StatsPerLevel, DEFAULT_ITEMS_PATH, EMPTY_ACCESSORY_ID,
    EMPTY_BOOTS_ID, EMPTY_CHESTPLATE_ID, EMPTY_ENCHANT_ID, EMPTY_GEM_ID, EMPTY_MODIFIER_ID,
    MAX_ITEM_LEVEL,
};
pub use rank::{rank_items, stat_at_max_level, stat_display_name, RankedItem, RANKABLE_STATS};
pub use validate::{validate_items, ValidationReport, ValidationSeverity};
