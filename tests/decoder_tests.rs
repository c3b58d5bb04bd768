use gearforge::build::{decode, DecodeError, FightingStyle, Magic, SlotPosition};

fn valid_code() -> String {
    [
        "100,20,20,20,20",
        "0,19",
        "5",
        "X1,AAD,AAE,140",
        "AAA,AAD,AAE,140",
        "AAA,AAD,AAE,140",
        "AAB,AAD,AAE,140",
        "AAC,AAD,AAE,140",
    ]
    .join("|")
}

#[test]
fn valid_code_decodes_fully() {
    let loadout = decode(&valid_code()).expect("valid code should decode");

    assert_eq!(loadout.level, 100);
    assert_eq!(loadout.vitality_points, 20);
    assert_eq!(loadout.magic_points, 20);
    assert_eq!(loadout.strength_points, 20);
    assert_eq!(loadout.weapon_points, 20);
    assert_eq!(loadout.magics, vec![Magic::Acid, Magic::Wood]);
    assert_eq!(loadout.fighting_styles, vec![FightingStyle::ThermoFist]);
    assert_eq!(loadout.accessories.len(), 3);
    assert_eq!(loadout.chestplate.item, "AAB");
    assert_eq!(loadout.boots.item, "AAC");
}

#[test]
fn four_token_slot_has_no_gems() {
    let loadout = decode(&valid_code()).expect("valid code should decode");
    let slot = &loadout.accessories[0];

    assert_eq!(slot.item, "X1");
    assert_eq!(slot.enchant, "AAD");
    assert_eq!(slot.modifier, "AAE");
    assert!(slot.gems.is_empty());
    assert_eq!(slot.level, 140);
}

#[test]
fn gem_count_is_inferred_from_token_count() {
    for (section, expected_gems) in [
        ("X1,AAD,AAE,G1,140", vec!["G1"]),
        ("X1,AAD,AAE,G1,G2,140", vec!["G1", "G2"]),
        ("X1,AAD,AAE,G1,G2,G3,140", vec!["G1", "G2", "G3"]),
    ] {
        let code = format!(
            "100,20,20,20,20|||{section}|AAA,AAD,AAE,140|AAA,AAD,AAE,140|AAB,AAD,AAE,140|AAC,AAD,AAE,140"
        );
        let loadout = decode(&code).expect("slot with gems should decode");
        let slot = &loadout.accessories[0];
        assert_eq!(slot.gems, expected_gems);
        assert_eq!(slot.level, 140);
    }
}

#[test]
fn empty_magic_and_style_sections_yield_no_selections() {
    let code =
        "100,20,20,20,20|||AAA,AAD,AAE,140|AAA,AAD,AAE,140|AAA,AAD,AAE,140|AAB,AAD,AAE,140|AAC,AAD,AAE,140";
    let loadout = decode(code).expect("empty sections should decode");
    assert!(loadout.magics.is_empty());
    assert!(loadout.fighting_styles.is_empty());
}

#[test]
fn wrong_section_count_is_an_error() {
    let err = decode("100,20,20,20,20|0|1").expect_err("3 sections should fail");
    assert_eq!(err, DecodeError::SectionCount { found: 3 });

    let nine = format!("{}|extra,section", valid_code());
    let err = decode(&nine).expect_err("9 sections should fail");
    assert_eq!(err, DecodeError::SectionCount { found: 9 });
}

#[test]
fn non_numeric_level_reports_the_stats_section() {
    let code = valid_code().replacen("100", "abc", 1);
    let err = decode(&code).expect_err("non-numeric level should fail");

    assert_eq!(
        err,
        DecodeError::StatValue {
            field: "level",
            token: "abc".to_string(),
        }
    );
    assert!(err.to_string().contains("stats section"));
}

#[test]
fn wrong_stats_token_count_is_an_error() {
    let code = valid_code().replacen("100,20,20,20,20", "100,20,20,20", 1);
    let err = decode(&code).expect_err("4 stat tokens should fail");
    assert_eq!(err, DecodeError::StatsTokenCount { found: 4 });
}

#[test]
fn magic_index_out_of_range_is_an_error() {
    let code = valid_code().replacen("0,19", "0,20", 1);
    let err = decode(&code).expect_err("magic index 20 should fail");
    assert_eq!(err, DecodeError::MagicIndexOutOfRange { index: 20 });
}

#[test]
fn fighting_style_index_out_of_range_is_an_error() {
    let code = valid_code().replacen("|5|", "|6|", 1);
    let err = decode(&code).expect_err("style index 6 should fail");
    assert_eq!(err, DecodeError::FightingStyleIndexOutOfRange { index: 6 });
}

#[test]
fn bad_slot_token_count_names_the_slot() {
    let code = valid_code().replace("AAB,AAD,AAE,140", "AAB,AAD,140");
    let err = decode(&code).expect_err("3-token slot should fail");

    assert_eq!(
        err,
        DecodeError::SlotTokenCount {
            slot: SlotPosition::Chestplate,
            found: 3,
        }
    );
    assert!(err.to_string().contains("chestplate"));

    let code = valid_code().replace("AAC,AAD,AAE,140", "AAC,AAD,AAE,G1,G2,G3,G4,140");
    let err = decode(&code).expect_err("8-token slot should fail");
    assert_eq!(
        err,
        DecodeError::SlotTokenCount {
            slot: SlotPosition::Boots,
            found: 8,
        }
    );
}

#[test]
fn negative_item_level_is_an_error() {
    let code = valid_code().replacen("X1,AAD,AAE,140", "X1,AAD,AAE,-10", 1);
    let err = decode(&code).expect_err("negative level should fail");

    assert_eq!(
        err,
        DecodeError::SlotLevel {
            slot: SlotPosition::Accessory1,
            token: "-10".to_string(),
        }
    );
    assert!(err.to_string().contains("accessory 1"));
}

#[test]
fn magic_catalog_order_is_fixed() {
    assert_eq!(Magic::from_index(0), Some(Magic::Acid));
    assert_eq!(Magic::from_index(9), Some(Magic::Lightning));
    assert_eq!(Magic::from_index(19), Some(Magic::Wood));
    assert_eq!(Magic::from_index(20), None);

    assert_eq!(FightingStyle::from_index(0), Some(FightingStyle::BasicCombat));
    assert_eq!(FightingStyle::from_index(5), Some(FightingStyle::ThermoFist));
    assert_eq!(FightingStyle::from_index(6), None);
}
