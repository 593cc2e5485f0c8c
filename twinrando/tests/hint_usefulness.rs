//! Usefulness classification via the exclude-and-resimulate oracle.

use twinrando::hints::{location_usefulness, Usefulness};
use twinrando::randomize::{generate_seed, SeedData};
use twinrando::CancelToken;
use twinrando_game::{Config, ItemType};

fn generate() -> SeedData {
    generate_seed(&[Config::default()], 1234, &CancelToken::new())
        .expect("default config should generate")
}

fn location_of(data: &SeedData, item_type: ItemType) -> usize {
    let world = &data.worlds[0];
    world
        .filled_locations()
        .find(|&loc| world.item_at(loc).unwrap().item_type == item_type)
        .unwrap_or_else(|| panic!("{item_type:?} was not placed"))
}

#[test]
fn the_morph_location_is_mandatory() {
    // Nothing else opens the morph-gated checks, so removing the location
    // holding it must break the playthrough.
    let data = generate();
    let loc = location_of(&data, ItemType::Morph);
    assert_eq!(
        location_usefulness(&data.worlds, &[(0, loc)]),
        Usefulness::Mandatory
    );
}

#[test]
fn a_junk_location_is_useless() {
    let data = generate();
    let world = &data.worlds[0];
    let loc = world
        .filled_locations()
        .find(|&loc| world.item_at(loc).unwrap().item_type.is_junk())
        .expect("some junk is always placed");
    assert_eq!(
        location_usefulness(&data.worlds, &[(0, loc)]),
        Usefulness::Useless
    );
}

#[test]
fn an_optional_nice_item_is_nice_to_have() {
    let data = generate();
    let world = &data.worlds[0];
    // Heart containers gate nothing, so their location can only ever be
    // nice to have.
    let loc = world
        .filled_locations()
        .find(|&loc| world.item_at(loc).unwrap().item_type == ItemType::HeartContainer)
        .expect("heart containers are always placed");
    assert_eq!(
        location_usefulness(&data.worlds, &[(0, loc)]),
        Usefulness::NiceToHave
    );
}
