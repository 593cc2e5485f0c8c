//! End-to-end properties of generated seeds: completeness, determinism,
//! sphere partitioning, and the no-self-lock guarantee.

use anyhow::Result;
use hashbrown::HashSet;
use twinrando::fill::{collect_bosses, collect_rewards};
use twinrando::playthrough::base_inventory;
use twinrando::randomize::{generate_seed, generate_with_retries, validate_seed, SeedData};
use twinrando::{CancelToken, GenerationError, LocationRef};
use twinrando_game::{
    Config, Item, ItemPools, ItemType, KeysanityMode, LocationPin, PoolKind, World,
};
use twinrando_logic::{is_location_available, Progression};

fn generate_default(seed: usize) -> SeedData {
    generate_seed(&[Config::default()], seed, &CancelToken::new())
        .expect("default config should generate")
}

fn placed_types(world: &World) -> Vec<ItemType> {
    let mut types: Vec<ItemType> = world.placed_items().map(|i| i.item_type).collect();
    types.sort();
    types
}

fn expected_types(config: &Config) -> Vec<ItemType> {
    let world = World::new(config.clone(), 0);
    let pools = ItemPools::new(&world);
    let mut types: Vec<ItemType> = pools
        .dungeon
        .iter()
        .chain(pools.progression.iter())
        .chain(pools.nice.iter())
        .chain(pools.junk.iter())
        .map(|i| i.item_type)
        .collect();
    if config.metroid_keysanity() {
        types.extend(pools.keycards.iter().map(|i| i.item_type));
    }
    types.sort();
    types
}

#[test]
fn every_location_holds_exactly_one_item() {
    for seed in [1, 2, 3] {
        let data = generate_default(seed);
        let world = &data.worlds[0];
        assert_eq!(world.vacant_locations().count(), 0);
        assert_eq!(placed_types(world), expected_types(&world.config));
    }
}

#[test]
fn keysanity_places_keys_and_keycards_through_the_global_fill() {
    let mut config = Config::default();
    config.keysanity = KeysanityMode::Both;
    let data = generate_seed(&[config.clone()], 11, &CancelToken::new())
        .expect("keysanity config should generate");
    let world = &data.worlds[0];
    assert_eq!(world.vacant_locations().count(), 0);
    assert_eq!(placed_types(world), expected_types(&config));
}

#[test]
fn identical_seed_and_config_produce_identical_output() {
    let first = generate_default(42);
    let second = generate_default(42);
    assert_eq!(first.worlds[0].assignments, second.worlds[0].assignments);
    let spheres = |data: &SeedData| -> Vec<Vec<LocationRef>> {
        data.playthrough
            .spheres
            .iter()
            .map(|s| s.locations.clone())
            .collect()
    };
    assert_eq!(spheres(&first), spheres(&second));

    let different = generate_default(43);
    assert_ne!(
        first.worlds[0].assignments, different.worlds[0].assignments,
        "different seeds should not collide on the full assignment"
    );
}

#[test]
fn spheres_partition_the_filled_locations() {
    let data = generate_default(5);
    let world = &data.worlds[0];

    let mut seen: HashSet<LocationRef> = HashSet::new();
    for sphere in &data.playthrough.spheres {
        for &loc in &sphere.locations {
            assert!(seen.insert(loc), "location appears in two spheres: {loc:?}");
        }
    }
    let all: HashSet<LocationRef> = world.filled_locations().map(|loc| (0, loc)).collect();
    assert_eq!(seen, all);
}

#[test]
fn no_placed_item_is_required_to_reach_its_own_location() {
    let data = generate_default(9);
    let worlds = &data.worlds;
    let world = &worlds[0];

    for loc in world.filled_locations() {
        let mut items: Vec<Item> = base_inventory(worlds);
        items.extend(world.filled_locations().filter(|&l| l != loc).map(|l| {
            world.item_at(l).expect("location is filled")
        }));
        let rewards = collect_rewards(worlds, &[0], &items);
        let bosses = collect_bosses(worlds, &[0], &items, &rewards);
        let progression = Progression::for_world(0, &items, &rewards, &bosses);
        assert!(
            is_location_available(world, loc, &progression),
            "{} is gated behind its own item {:?}",
            world.locations[loc].name,
            world.item_at(loc).unwrap().item_type
        );
    }
}

#[test]
fn requested_early_items_land_in_the_first_spheres() -> Result<()> {
    let mut config = Config::default();
    config.early_items = vec![ItemType::Morph];
    let data = generate_with_retries(&[config], 21, &CancelToken::new())?;
    assert!(validate_seed(&data));
    let sphere = data
        .playthrough
        .sphere_of(0, ItemType::Morph)
        .expect("morph is placed");
    assert!(sphere <= 2, "morph landed in sphere {}", sphere + 1);
    Ok(())
}

#[test]
fn location_pins_are_honored() -> Result<()> {
    let mut config = Config::default();
    config.location_pins = vec![
        ("King Zora".to_string(), LocationPin::Pool(PoolKind::Junk)),
        (
            "Blind's Hideout".to_string(),
            LocationPin::Item(ItemType::Hammer),
        ),
    ];
    let data = generate_with_retries(&[config], 33, &CancelToken::new())?;
    assert!(validate_seed(&data));

    let world = &data.worlds[0];
    let zora = world.location_by_name("King Zora").unwrap();
    assert!(world.item_at(zora).unwrap().item_type.is_junk());
    let blinds = world.location_by_name("Blind's Hideout").unwrap();
    assert_eq!(world.item_at(blinds).unwrap().item_type, ItemType::Hammer);
    Ok(())
}

#[test]
fn unknown_pinned_location_is_a_configuration_error() {
    let mut config = Config::default();
    config.location_pins = vec![(
        "Chris Houlihan Room".to_string(),
        LocationPin::Pool(PoolKind::Junk),
    )];
    let result = generate_seed(&[config], 1, &CancelToken::new());
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn cancellation_aborts_the_attempt() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let result = generate_seed(&[Config::default()], 1, &cancel);
    assert!(matches!(result, Err(GenerationError::Cancelled)));
}

#[test]
fn multiworld_generation_completes_both_worlds() {
    let mut configs = vec![Config::default(), Config::default()];
    for (i, config) in configs.iter_mut().enumerate() {
        config.game_mode = twinrando_game::GameMode::Multiworld;
        config.player_name = format!("Player {}", i + 1);
    }
    let data = generate_seed(&configs, 77, &CancelToken::new())
        .expect("multiworld config should generate");
    for world in &data.worlds {
        assert_eq!(world.vacant_locations().count(), 0);
    }
    // In multiworld, items may cross worlds, but the combined multiset must
    // still match the combined pools.
    let mut placed: Vec<(usize, ItemType)> = data
        .worlds
        .iter()
        .flat_map(|w| w.placed_items())
        .map(|i| (i.world_id, i.item_type))
        .collect();
    placed.sort();
    let mut expected: Vec<(usize, ItemType)> = (0..2)
        .flat_map(|w| {
            expected_types(&data.worlds[w].config)
                .into_iter()
                .map(move |t| (w, t))
        })
        .collect();
    expected.sort();
    assert_eq!(placed, expected);
}
