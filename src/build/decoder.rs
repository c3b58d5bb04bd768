//! Decodes gearBuilder build codes into a typed loadout.
//!
//! A build code is the URL fragment the web tool emits: eight `|`-separated
//! sections, each a `,`-separated token list. Section order is fixed: stat
//! allocations, magics, fighting styles, three accessory slots, chestplate,
//! boots. Decoding is catalog-independent; ids are carried as opaque strings
//! and resolved later by the aggregator.

use std::fmt;

use crate::data::item::MAX_ITEM_LEVEL;

pub const SECTION_COUNT: usize = 8;
pub const STATS_TOKEN_COUNT: usize = 5;
pub const ACCESSORY_SLOTS: usize = 3;

/// Magic catalog in gearBuilder index order. Indices are wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    Acid,
    Ash,
    Crystal,
    Earth,
    Explosion,
    Fire,
    Glass,
    Ice,
    Light,
    Lightning,
    Magma,
    Metal,
    Plasma,
    Poison,
    Sand,
    Shadow,
    Snow,
    Water,
    Wind,
    Wood,
}

impl Magic {
    pub const ALL: [Magic; 20] = [
        Magic::Acid,
        Magic::Ash,
        Magic::Crystal,
        Magic::Earth,
        Magic::Explosion,
        Magic::Fire,
        Magic::Glass,
        Magic::Ice,
        Magic::Light,
        Magic::Lightning,
        Magic::Magma,
        Magic::Metal,
        Magic::Plasma,
        Magic::Poison,
        Magic::Sand,
        Magic::Shadow,
        Magic::Snow,
        Magic::Water,
        Magic::Wind,
        Magic::Wood,
    ];

    pub fn from_index(index: usize) -> Option<Magic> {
        Magic::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Magic::Acid => "Acid",
            Magic::Ash => "Ash",
            Magic::Crystal => "Crystal",
            Magic::Earth => "Earth",
            Magic::Explosion => "Explosion",
            Magic::Fire => "Fire",
            Magic::Glass => "Glass",
            Magic::Ice => "Ice",
            Magic::Light => "Light",
            Magic::Lightning => "Lightning",
            Magic::Magma => "Magma",
            Magic::Metal => "Metal",
            Magic::Plasma => "Plasma",
            Magic::Poison => "Poison",
            Magic::Sand => "Sand",
            Magic::Shadow => "Shadow",
            Magic::Snow => "Snow",
            Magic::Water => "Water",
            Magic::Wind => "Wind",
            Magic::Wood => "Wood",
        }
    }
}

/// Fighting style catalog in gearBuilder index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightingStyle {
    BasicCombat,
    Boxing,
    IronLeg,
    CannonFist,
    SailorStyle,
    ThermoFist,
}

impl FightingStyle {
    pub const ALL: [FightingStyle; 6] = [
        FightingStyle::BasicCombat,
        FightingStyle::Boxing,
        FightingStyle::IronLeg,
        FightingStyle::CannonFist,
        FightingStyle::SailorStyle,
        FightingStyle::ThermoFist,
    ];

    pub fn from_index(index: usize) -> Option<FightingStyle> {
        FightingStyle::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            FightingStyle::BasicCombat => "Basic Combat",
            FightingStyle::Boxing => "Boxing",
            FightingStyle::IronLeg => "Iron Leg",
            FightingStyle::CannonFist => "Cannon Fist",
            FightingStyle::SailorStyle => "Sailor Style",
            FightingStyle::ThermoFist => "Thermo Fist",
        }
    }
}

/// Which slot section of the code a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    Accessory1,
    Accessory2,
    Accessory3,
    Chestplate,
    Boots,
}

impl SlotPosition {
    pub fn label(&self) -> &'static str {
        match self {
            SlotPosition::Accessory1 => "accessory 1",
            SlotPosition::Accessory2 => "accessory 2",
            SlotPosition::Accessory3 => "accessory 3",
            SlotPosition::Chestplate => "chestplate",
            SlotPosition::Boots => "boots",
        }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One equipment position: item plus enchant, modifier, socketed gems, and
/// the level the item is evaluated at (independent of character level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub item: String,
    pub enchant: String,
    pub modifier: String,
    pub gems: Vec<String>,
    pub level: u32,
}

impl Default for Slot {
    fn default() -> Self {
        Slot {
            item: String::new(),
            enchant: String::new(),
            modifier: String::new(),
            gems: Vec::new(),
            level: MAX_ITEM_LEVEL,
        }
    }
}

/// Fully decoded build code. Owned by the request that decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadout {
    pub level: i32,
    pub vitality_points: i32,
    pub magic_points: i32,
    pub strength_points: i32,
    pub weapon_points: i32,
    pub magics: Vec<Magic>,
    pub fighting_styles: Vec<FightingStyle>,
    pub accessories: [Slot; ACCESSORY_SLOTS],
    pub chestplate: Slot,
    pub boots: Slot,
}

impl Loadout {
    /// The five equipment slots in aggregation order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.accessories
            .iter()
            .chain(std::iter::once(&self.chestplate))
            .chain(std::iter::once(&self.boots))
    }
}

/// Structural decode failure. Every variant names the section or slot that
/// broke so callers can produce specific messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    SectionCount { found: usize },
    StatsTokenCount { found: usize },
    StatValue { field: &'static str, token: String },
    MagicIndex { token: String },
    MagicIndexOutOfRange { index: usize },
    FightingStyleIndex { token: String },
    FightingStyleIndexOutOfRange { index: usize },
    SlotTokenCount { slot: SlotPosition, found: usize },
    SlotLevel { slot: SlotPosition, token: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionCount { found } => write!(
                f,
                "invalid build code: expected {SECTION_COUNT} sections, got {found}"
            ),
            Self::StatsTokenCount { found } => write!(
                f,
                "invalid stats section: expected {STATS_TOKEN_COUNT} values, got {found}"
            ),
            Self::StatValue { field, token } => {
                write!(f, "invalid stats section: cannot parse {field} '{token}'")
            }
            Self::MagicIndex { token } => {
                write!(f, "invalid magics section: cannot parse index '{token}'")
            }
            Self::MagicIndexOutOfRange { index } => {
                write!(f, "invalid magics section: index {index} out of range")
            }
            Self::FightingStyleIndex { token } => write!(
                f,
                "invalid fighting styles section: cannot parse index '{token}'"
            ),
            Self::FightingStyleIndexOutOfRange { index } => write!(
                f,
                "invalid fighting styles section: index {index} out of range"
            ),
            Self::SlotTokenCount { slot, found } => {
                write!(f, "invalid {slot} slot: expected 4-7 values, got {found}")
            }
            Self::SlotLevel { slot, token } => {
                write!(f, "invalid {slot} slot: cannot parse item level '{token}'")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a build code string. Fails fast on the first structural problem;
/// a returned loadout is always fully populated.
pub fn decode(code: &str) -> Result<Loadout, DecodeError> {
    let sections: Vec<Vec<&str>> = code
        .split('|')
        .map(|section| section.split(',').collect())
        .collect();

    if sections.len() != SECTION_COUNT {
        return Err(DecodeError::SectionCount {
            found: sections.len(),
        });
    }

    let (level, vitality, magic, strength, weapon) = parse_stats_section(&sections[0])?;
    let magics = parse_magics_section(&sections[1])?;
    let fighting_styles = parse_styles_section(&sections[2])?;

    let accessories = [
        parse_slot_section(&sections[3], SlotPosition::Accessory1)?,
        parse_slot_section(&sections[4], SlotPosition::Accessory2)?,
        parse_slot_section(&sections[5], SlotPosition::Accessory3)?,
    ];
    let chestplate = parse_slot_section(&sections[6], SlotPosition::Chestplate)?;
    let boots = parse_slot_section(&sections[7], SlotPosition::Boots)?;

    Ok(Loadout {
        level,
        vitality_points: vitality,
        magic_points: magic,
        strength_points: strength,
        weapon_points: weapon,
        magics,
        fighting_styles,
        accessories,
        chestplate,
        boots,
    })
}

fn parse_stats_section(tokens: &[&str]) -> Result<(i32, i32, i32, i32, i32), DecodeError> {
    if tokens.len() != STATS_TOKEN_COUNT {
        return Err(DecodeError::StatsTokenCount {
            found: tokens.len(),
        });
    }

    let parse = |field: &'static str, token: &str| -> Result<i32, DecodeError> {
        token.parse().map_err(|_| DecodeError::StatValue {
            field,
            token: token.to_string(),
        })
    };

    Ok((
        parse("level", tokens[0])?,
        parse("vitality points", tokens[1])?,
        parse("magic points", tokens[2])?,
        parse("strength points", tokens[3])?,
        parse("weapon points", tokens[4])?,
    ))
}

fn parse_magics_section(tokens: &[&str]) -> Result<Vec<Magic>, DecodeError> {
    let mut magics = Vec::new();
    for token in tokens {
        // An entirely empty section arrives as a single empty token.
        if token.is_empty() {
            continue;
        }
        let index: usize = token.parse().map_err(|_| DecodeError::MagicIndex {
            token: token.to_string(),
        })?;
        let magic =
            Magic::from_index(index).ok_or(DecodeError::MagicIndexOutOfRange { index })?;
        magics.push(magic);
    }
    Ok(magics)
}

fn parse_styles_section(tokens: &[&str]) -> Result<Vec<FightingStyle>, DecodeError> {
    let mut styles = Vec::new();
    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let index: usize = token.parse().map_err(|_| DecodeError::FightingStyleIndex {
            token: token.to_string(),
        })?;
        let style = FightingStyle::from_index(index)
            .ok_or(DecodeError::FightingStyleIndexOutOfRange { index })?;
        styles.push(style);
    }
    Ok(styles)
}

/// Slot grammar: `item, enchant, modifier, [gem1[, gem2[, gem3]]], level`.
/// Gem count is inferred purely from the token count; the catalog's gemNo is
/// enforced later by the aggregator, not here.
fn parse_slot_section(tokens: &[&str], position: SlotPosition) -> Result<Slot, DecodeError> {
    if !(4..=7).contains(&tokens.len()) {
        return Err(DecodeError::SlotTokenCount {
            slot: position,
            found: tokens.len(),
        });
    }

    let gem_tokens = &tokens[3..tokens.len() - 1];
    let level_token = tokens[tokens.len() - 1];
    let level: u32 = level_token.parse().map_err(|_| DecodeError::SlotLevel {
        slot: position,
        token: level_token.to_string(),
    })?;

    Ok(Slot {
        item: tokens[0].to_string(),
        enchant: tokens[1].to_string(),
        modifier: tokens[2].to_string(),
        gems: gem_tokens.iter().map(|gem| gem.to_string()).collect(),
        level,
    })
}
