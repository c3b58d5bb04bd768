pub mod aggregator;
pub mod decoder;
pub mod format;

pub use aggregator::{aggregate, slot_contribution, TotalStats};
pub use decoder::{
    decode, DecodeError, FightingStyle, Loadout, Magic, Slot, SlotPosition, ACCESSORY_SLOTS,
    SECTION_COUNT, STATS_TOKEN_COUNT,
};
pub use format::{format_loadout, format_slot, format_total_stats};
