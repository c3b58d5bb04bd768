//! Composes a loadout's total stats from the item catalog.
//!
//! Pure over its inputs: reads the catalog and loadout, produces a fresh
//! `TotalStats`. Missing catalog ids contribute zero rather than failing, so
//! a stale build code still aggregates the slots it can resolve.

use serde::Serialize;

use crate::build::decoder::{Loadout, Slot};
use crate::data::catalog::Catalog;
use crate::data::item::{Item, StatsPerLevel, EMPTY_ENCHANT_ID, EMPTY_GEM_ID, EMPTY_MODIFIER_ID};

/// Defense row of the Atlantean Essence bonus table. Game-balance constant
/// taken verbatim from the gearBuilder; every other stat scales at 3/level
/// bucket.
const ATLANTEAN_DEFENSE_INCREMENT: f64 = 9.07;
const ATLANTEAN_STAT_INCREMENT: i32 = 3;

/// Additive stat totals across all five equipment slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TotalStats {
    pub power: i32,
    pub defense: i32,
    pub agility: i32,
    pub attack_speed: i32,
    pub attack_size: i32,
    pub intensity: i32,
    pub regeneration: i32,
    pub piercing: i32,
    pub resistance: i32,
    pub warding: i32,
    pub drawback: i32,
    pub insanity: i32,
}

impl TotalStats {
    pub fn add_from(&mut self, other: &TotalStats) {
        self.power += other.power;
        self.defense += other.defense;
        self.agility += other.agility;
        self.attack_speed += other.attack_speed;
        self.attack_size += other.attack_size;
        self.intensity += other.intensity;
        self.regeneration += other.regeneration;
        self.piercing += other.piercing;
        self.resistance += other.resistance;
        self.warding += other.warding;
        self.drawback += other.drawback;
        self.insanity += other.insanity;
    }

    /// (label, value) pairs in display order. Formatting and serialization
    /// iterate this instead of branching per field.
    pub fn entries(&self) -> [(&'static str, i32); 12] {
        [
            ("Power", self.power),
            ("Defense", self.defense),
            ("Agility", self.agility),
            ("Attack Speed", self.attack_speed),
            ("Attack Size", self.attack_size),
            ("Intensity", self.intensity),
            ("Regeneration", self.regeneration),
            ("Piercing", self.piercing),
            ("Resistance", self.resistance),
            ("Warding", self.warding),
            ("Drawback", self.drawback),
            ("Insanity", self.insanity),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.entries().iter().all(|(_, value)| *value == 0)
    }
}

/// Total stats for a loadout: field-wise sum of the five slot contributions.
pub fn aggregate(loadout: &Loadout, catalog: &Catalog) -> TotalStats {
    let mut total = TotalStats::default();
    for slot in loadout.slots() {
        total.add_from(&slot_contribution(slot, catalog));
    }
    total
}

/// Stats contributed by a single slot at its own item level.
pub fn slot_contribution(slot: &Slot, catalog: &Catalog) -> TotalStats {
    let mut stats = TotalStats::default();

    if Item::is_empty_gear_sentinel(&slot.item) {
        return stats;
    }

    let multiplier = slot.level / 10;
    let level_bucket = multiplier * 10;

    if let Some(item) = catalog.find_by_id(&slot.item) {
        if let Some(rows) = &item.stats_per_level {
            if let Some(row) = level_row(rows, level_bucket) {
                add_level_row(&mut stats, row);
            }
        }
        add_fixed_stats(&mut stats, item);
        add_gem_stats(&mut stats, slot, item, catalog);
    }

    if slot.enchant != EMPTY_ENCHANT_ID && !slot.enchant.is_empty() {
        if let Some(enchant) = catalog.find_by_id(&slot.enchant) {
            add_increments(&mut stats, enchant, multiplier);
            // Warding on an enchant is flat, never level-scaled.
            stats.warding += enchant.warding.unwrap_or(0);
        }
    }

    if slot.modifier != EMPTY_MODIFIER_ID && !slot.modifier.is_empty() {
        if catalog.is_atlantean_modifier(&slot.modifier) {
            apply_atlantean_essence(&mut stats, multiplier);
        } else if let Some(modifier) = catalog.find_by_id(&slot.modifier) {
            add_increments(&mut stats, modifier, multiplier);
        }
    }

    stats
}

/// Row whose level equals the bucket, else the table's last (highest) row.
fn level_row(rows: &[StatsPerLevel], level_bucket: u32) -> Option<&StatsPerLevel> {
    rows.iter()
        .find(|row| row.level == level_bucket)
        .or_else(|| rows.last())
}

fn add_level_row(stats: &mut TotalStats, row: &StatsPerLevel) {
    stats.power += row.power.unwrap_or(0);
    stats.defense += row.defense.unwrap_or(0);
    stats.agility += row.agility.unwrap_or(0);
    stats.attack_speed += row.attack_speed.unwrap_or(0);
    stats.attack_size += row.attack_size.unwrap_or(0);
    stats.intensity += row.intensity.unwrap_or(0);
    stats.regeneration += row.regeneration.unwrap_or(0);
    stats.piercing += row.piercing.unwrap_or(0);
    stats.resistance += row.resistance.unwrap_or(0);
    stats.warding += row.warding.unwrap_or(0);
    stats.drawback += row.drawback.unwrap_or(0);
}

/// Level-independent stat fields. Gems and the odd flat-stat gear use these.
fn add_fixed_stats(stats: &mut TotalStats, item: &Item) {
    stats.power += item.power.unwrap_or(0);
    stats.defense += item.defense.unwrap_or(0);
    stats.agility += item.agility.unwrap_or(0);
    stats.attack_speed += item.attack_speed.unwrap_or(0);
    stats.attack_size += item.attack_size.unwrap_or(0);
    stats.intensity += item.intensity.unwrap_or(0);
    stats.regeneration += item.regeneration.unwrap_or(0);
    stats.piercing += item.piercing.unwrap_or(0);
    stats.resistance += item.resistance.unwrap_or(0);
    stats.warding += item.warding.unwrap_or(0);
    stats.drawback += item.drawback.unwrap_or(0);
    stats.insanity += item.insanity.unwrap_or(0);
}

/// `floor(increment * multiplier)` for the nine incrementable stats.
fn add_increments(stats: &mut TotalStats, item: &Item, multiplier: u32) {
    let scale = |increment: Option<f64>| -> i32 {
        (increment.unwrap_or(0.0) * multiplier as f64).floor() as i32
    };

    stats.power += scale(item.power_increment);
    stats.defense += scale(item.defense_increment);
    stats.agility += scale(item.agility_increment);
    stats.attack_speed += scale(item.attack_speed_increment);
    stats.attack_size += scale(item.attack_size_increment);
    stats.intensity += scale(item.intensity_increment);
    stats.regeneration += scale(item.regeneration_increment);
    stats.piercing += scale(item.piercing_increment);
    stats.resistance += scale(item.resistance_increment);
}

/// Only the item's declared socket count is honored; extra gem tokens in the
/// build code are ignored here even though the decoder accepted them.
fn add_gem_stats(stats: &mut TotalStats, slot: &Slot, item: &Item, catalog: &Catalog) {
    let sockets = item.gem_no.unwrap_or(0) as usize;
    for gem_id in slot.gems.iter().take(sockets) {
        if gem_id == EMPTY_GEM_ID || gem_id.is_empty() {
            continue;
        }
        if let Some(gem) = catalog.find_by_id(gem_id) {
            stats.power += gem.power.unwrap_or(0);
            stats.defense += gem.defense.unwrap_or(0);
            stats.agility += gem.agility.unwrap_or(0);
            stats.attack_speed += gem.attack_speed.unwrap_or(0);
            stats.attack_size += gem.attack_size.unwrap_or(0);
            stats.intensity += gem.intensity.unwrap_or(0);
            stats.regeneration += gem.regeneration.unwrap_or(0);
            stats.piercing += gem.piercing.unwrap_or(0);
            stats.resistance += gem.resistance.unwrap_or(0);
            stats.drawback += gem.drawback.unwrap_or(0);
        }
    }
}

/// Atlantean Essence: one insanity point, plus a scaled bonus on the first
/// stat (fixed priority order) still at zero for this slot. Defense uses its
/// own non-uniform constant; if no stat is empty the bonus lands on power.
fn apply_atlantean_essence(stats: &mut TotalStats, multiplier: u32) {
    stats.insanity += 1;

    let multiplier_int = multiplier as i32;
    let scaled = ATLANTEAN_STAT_INCREMENT * multiplier_int;

    if stats.power == 0 {
        stats.power += scaled;
    } else if stats.defense == 0 {
        stats.defense += (ATLANTEAN_DEFENSE_INCREMENT * multiplier as f64).floor() as i32;
    } else if stats.attack_size == 0 {
        stats.attack_size += scaled;
    } else if stats.attack_speed == 0 {
        stats.attack_speed += scaled;
    } else if stats.agility == 0 {
        stats.agility += scaled;
    } else if stats.intensity == 0 {
        stats.intensity += scaled;
    } else {
        stats.power += scaled;
    }
}
