//! Plando behavior: exported layouts reproduce the original assignment, and
//! invalid layouts fail with named configuration errors.

use anyhow::Result;
use twinrando::plando::export_layout;
use twinrando::randomize::generate_seed;
use twinrando::{CancelToken, GenerationError};
use twinrando_game::{Config, ItemType, PlandoLayout, RewardType};

#[test]
fn exported_layout_reproduces_the_assignment() -> Result<()> {
    let original = generate_seed(&[Config::default()], 7, &CancelToken::new())?;
    let layout = export_layout(&original.worlds[0]);
    assert!(layout.complete);

    // A different seed must not matter: the layout pins everything.
    let mut config = Config::default();
    config.plando = Some(layout.clone());
    let replayed = generate_seed(&[config], 4242, &CancelToken::new())?;

    assert_eq!(
        original.worlds[0].assignments,
        replayed.worlds[0].assignments
    );
    assert_eq!(export_layout(&replayed.worlds[0]), layout);
    Ok(())
}

#[test]
fn partial_layout_pins_its_entries_and_fills_the_rest() -> Result<()> {
    let layout = PlandoLayout {
        items: vec![
            ("Link's House".to_string(), ItemType::Morph),
            ("Parlor Missile".to_string(), ItemType::Lamp),
        ],
        rewards: vec![("Eastern Palace".to_string(), RewardType::CrystalRed)],
        medallions: vec![("Misery Mire".to_string(), ItemType::Quake)],
        complete: false,
    };
    let mut config = Config::default();
    config.plando = Some(layout);
    let data = generate_seed(&[config], 13, &CancelToken::new())?;

    let world = &data.worlds[0];
    let house = world.location_by_name("Link's House").unwrap();
    assert_eq!(world.item_at(house).unwrap().item_type, ItemType::Morph);
    let parlor = world.location_by_name("Parlor Missile").unwrap();
    assert_eq!(world.item_at(parlor).unwrap().item_type, ItemType::Lamp);

    let eastern = world.region_by_name("Eastern Palace").unwrap();
    assert_eq!(
        world.regions[eastern].reward.as_ref().unwrap().reward,
        Some(RewardType::CrystalRed)
    );
    let mire = world.region_by_name("Misery Mire").unwrap();
    assert_eq!(
        world.regions[mire].medallion.as_ref().unwrap().medallion,
        Some(ItemType::Quake)
    );

    assert_eq!(world.vacant_locations().count(), 0);
    Ok(())
}

#[test]
fn unknown_location_name_is_a_configuration_error() {
    let mut config = Config::default();
    config.plando = Some(PlandoLayout {
        items: vec![("Tower of Babel".to_string(), ItemType::Lamp)],
        ..PlandoLayout::default()
    });
    let result = generate_seed(&[config], 1, &CancelToken::new());
    match result {
        Err(GenerationError::Configuration(message)) => {
            assert!(message.contains("Tower of Babel"), "message was: {message}")
        }
        other => panic!("expected a configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn reward_on_a_plain_region_is_a_configuration_error() {
    let mut config = Config::default();
    config.plando = Some(PlandoLayout {
        rewards: vec![("Light World".to_string(), RewardType::PendantGreen)],
        ..PlandoLayout::default()
    });
    let result = generate_seed(&[config], 1, &CancelToken::new());
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn non_medallion_item_in_a_medallion_slot_is_a_configuration_error() {
    let mut config = Config::default();
    config.plando = Some(PlandoLayout {
        medallions: vec![("Turtle Rock".to_string(), ItemType::Hammer)],
        ..PlandoLayout::default()
    });
    let result = generate_seed(&[config], 1, &CancelToken::new());
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn incomplete_layout_claiming_completeness_is_rejected() {
    let mut config = Config::default();
    config.plando = Some(PlandoLayout {
        items: vec![("Link's House".to_string(), ItemType::Lamp)],
        complete: true,
        ..PlandoLayout::default()
    });
    let result = generate_seed(&[config], 1, &CancelToken::new());
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}
