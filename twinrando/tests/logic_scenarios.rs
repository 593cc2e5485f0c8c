//! Small synthetic worlds driving the assumed fill and sphere generator
//! through their documented corner cases.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use twinrando::fill::Filler;
use twinrando::playthrough::Playthrough;
use twinrando::{CancelToken, GenerationError, LocationRef};
use twinrando_game::layout::WorldBuilder;
use twinrando_game::Requirement::{Free, Item as NeedsItem};
use twinrando_game::{Config, Game, Item, ItemType, World};

/// L1 is open; L2 needs item A; L3's requirement is provided per scenario.
fn fixture_world(l3_requirement: twinrando_game::Requirement) -> World {
    let mut b = WorldBuilder::new();
    let region = b.region("Testing Grounds", Game::Zelda, Free);
    b.location(region, "L1", Free);
    b.location(region, "L2", NeedsItem(ItemType::Hookshot));
    b.location(region, "L3", l3_requirement);
    let (regions, locations) = b.into_parts();

    let mut config = Config::default();
    config.fill.front_fill = vec![];
    World::from_parts(config, 0, regions, locations)
}

fn run_assumed_fill(
    world: World,
    pool: Vec<ItemType>,
    seed: u64,
) -> Result<Vec<World>, GenerationError> {
    let mut worlds = vec![world];
    let config = worlds[0].config.clone();
    let mut rng = StdRng::seed_from_u64(seed);
    let cancel = CancelToken::new();

    let mut items: Vec<Item> = pool.into_iter().map(|t| Item::new(t, 0)).collect();
    items.shuffle(&mut rng);
    let mut locations: Vec<LocationRef> =
        worlds[0].vacant_locations().map(|loc| (0, loc)).collect();
    locations.shuffle(&mut rng);

    let mut filler = Filler::new(&config, &mut rng, &cancel);
    filler.assumed_fill(&mut worlds, &mut items, &[], &mut locations, &[0])?;
    Ok(worlds)
}

#[test]
fn assumed_fill_never_self_locks() -> Result<()> {
    // A = Hookshot gates L2, B = FireRod gates L3; C is junk. Whatever
    // order the pool is consumed in, A must not end up at L2 nor B at L3.
    for seed in 0..25 {
        let world = fixture_world(NeedsItem(ItemType::FireRod));
        let mut worlds = run_assumed_fill(
            world,
            vec![ItemType::Hookshot, ItemType::FireRod],
            seed,
        )?;

        let world = &mut worlds[0];
        let l2 = world.location_by_name("L2").unwrap();
        let l3 = world.location_by_name("L3").unwrap();
        assert_ne!(
            world.item_at(l2).map(|i| i.item_type),
            Some(ItemType::Hookshot),
            "seed {seed}: A placed behind itself"
        );
        assert_ne!(
            world.item_at(l3).map(|i| i.item_type),
            Some(ItemType::FireRod),
            "seed {seed}: B placed behind itself"
        );

        // Top up the one remaining location with junk and confirm the whole
        // fixture plays through.
        let vacant: Vec<usize> = world.vacant_locations().collect();
        assert_eq!(vacant.len(), 1);
        world.assign(vacant[0], Item::new(ItemType::Arrows, 0)).unwrap();

        let playthrough = Playthrough::generate(&worlds)?;
        let collected: usize = playthrough.spheres.iter().map(|s| s.locations.len()).sum();
        assert_eq!(collected, 3, "seed {seed}: playthrough left locations behind");
    }
    Ok(())
}

#[test]
fn single_gate_fixture_yields_exactly_two_spheres() -> Result<()> {
    // Both L2 and L3 are gated on A alone, so A is forced to L1 and the
    // playthrough must be exactly {L1}, then {L2, L3}.
    for seed in 0..10 {
        let world = fixture_world(NeedsItem(ItemType::Hookshot));
        let mut worlds = run_assumed_fill(
            world,
            vec![ItemType::Hookshot, ItemType::FireRod],
            seed,
        )?;

        let world = &mut worlds[0];
        let l1 = world.location_by_name("L1").unwrap();
        assert_eq!(
            world.item_at(l1).map(|i| i.item_type),
            Some(ItemType::Hookshot)
        );
        let vacant: Vec<usize> = world.vacant_locations().collect();
        assert_eq!(vacant.len(), 1);
        world.assign(vacant[0], Item::new(ItemType::Arrows, 0)).unwrap();

        let playthrough = Playthrough::generate(&worlds)?;
        assert_eq!(playthrough.spheres.len(), 2, "seed {seed}");
        assert_eq!(playthrough.spheres[0].locations, vec![(0, l1)]);
        let mut second: Vec<LocationRef> = playthrough.spheres[1].locations.clone();
        second.sort();
        let l2 = worlds[0].location_by_name("L2").unwrap();
        let l3 = worlds[0].location_by_name("L3").unwrap();
        assert_eq!(second, vec![(0, l2), (0, l3)]);
    }
    Ok(())
}

#[test]
fn fill_with_no_valid_slot_fails_instead_of_looping() {
    // The only location requires the only item: nowhere is valid, and the
    // failure counter must trip rather than spin forever.
    let mut b = WorldBuilder::new();
    let region = b.region("Testing Grounds", Game::Zelda, Free);
    b.location(region, "L1", NeedsItem(ItemType::Hookshot));
    let (regions, locations) = b.into_parts();
    let mut config = Config::default();
    config.fill.front_fill = vec![];
    let world = World::from_parts(config, 0, regions, locations);

    let result = run_assumed_fill(world, vec![ItemType::Hookshot], 0);
    assert!(matches!(result, Err(GenerationError::Unsatisfiable(_))));
}

#[test]
fn stuck_playthrough_reports_the_uncollectible_locations() {
    // A hand-built assignment that breaks the logic: the gate item sits
    // behind its own gate.
    let world = fixture_world(NeedsItem(ItemType::FireRod));
    let mut worlds = vec![world];
    let l1 = worlds[0].location_by_name("L1").unwrap();
    let l2 = worlds[0].location_by_name("L2").unwrap();
    let l3 = worlds[0].location_by_name("L3").unwrap();
    worlds[0].assign(l1, Item::new(ItemType::Arrows, 0)).unwrap();
    worlds[0].assign(l2, Item::new(ItemType::Hookshot, 0)).unwrap();
    worlds[0].assign(l3, Item::new(ItemType::FireRod, 0)).unwrap();

    match Playthrough::generate(&worlds) {
        Err(GenerationError::Unsatisfiable(message)) => {
            assert!(message.contains("L2"), "message was: {message}");
            assert!(message.contains("L3"), "message was: {message}");
        }
        other => panic!("expected an unsatisfiable error, got {other:?}"),
    }
}
