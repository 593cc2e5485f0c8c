//! Pre-planned placement: applies a declarative location/region layout to a
//! world before the randomized stages run, and exports a finished world back
//! into such a layout. A complete exported layout, fed back through the
//! fill, reproduces the identical assignment.

use log::debug;
use twinrando_game::{Item, ItemPools, ItemType, PlandoLayout, World};

use crate::GenerationError;

/// Applies the layout to one world, drawing each pinned item out of the
/// world's pools. Invalid entries are configuration errors naming the
/// offending names; nothing is retried.
pub fn apply_layout(
    world: &mut World,
    layout: &PlandoLayout,
    pools: &mut ItemPools,
) -> Result<(), GenerationError> {
    assign_rewards(world, layout)?;
    assign_medallions(world, layout)?;

    for (location_name, item_type) in &layout.items {
        let loc = world.location_by_name(location_name).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "could not find a location with the specified name: '{location_name}'"
            ))
        })?;
        let item = pools.take(*item_type).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "no {item_type:?} left in the item pool for '{location_name}'"
            ))
        })?;
        world
            .assign(loc, item)
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
        debug!("plando placed {:?} at {}", item_type, location_name);
    }

    if layout.complete {
        ensure_complete(world)?;
    }
    Ok(())
}

fn assign_rewards(world: &mut World, layout: &PlandoLayout) -> Result<(), GenerationError> {
    for (region_name, reward_type) in &layout.rewards {
        let region_id = world.region_by_name(region_name).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "could not find a region with the specified name: '{region_name}'"
            ))
        })?;
        let region = &mut world.regions[region_id];
        let Some(slot) = &mut region.reward else {
            return Err(GenerationError::Configuration(format!(
                "'{region_name}' is configured with a reward, but that region cannot hold one"
            )));
        };
        slot.reward = Some(*reward_type);
    }
    Ok(())
}

fn assign_medallions(world: &mut World, layout: &PlandoLayout) -> Result<(), GenerationError> {
    for (region_name, medallion) in &layout.medallions {
        if !medallion.is_medallion() {
            return Err(GenerationError::Configuration(format!(
                "{medallion:?} is not a valid medallion for '{region_name}'"
            )));
        }
        let region_id = world.region_by_name(region_name).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "could not find a region with the specified name: '{region_name}'"
            ))
        })?;
        let region = &mut world.regions[region_id];
        let Some(slot) = &mut region.medallion else {
            return Err(GenerationError::Configuration(format!(
                "'{region_name}' is configured with a medallion, but that region cannot hold one"
            )));
        };
        slot.medallion = Some(*medallion);
    }
    Ok(())
}

/// A layout that claims to be complete must leave no vacant location and no
/// unassigned reward/medallion slot.
fn ensure_complete(world: &World) -> Result<(), GenerationError> {
    let vacant: Vec<&str> = world
        .vacant_locations()
        .map(|loc| world.locations[loc].name)
        .collect();
    if !vacant.is_empty() {
        return Err(GenerationError::Configuration(format!(
            "not all locations have been filled; missing:\n{}",
            vacant.join("\n")
        )));
    }

    let missing_rewards: Vec<&str> = world
        .regions
        .iter()
        .filter(|r| matches!(&r.reward, Some(slot) if slot.reward.is_none()))
        .map(|r| r.name)
        .collect();
    if !missing_rewards.is_empty() {
        return Err(GenerationError::Configuration(format!(
            "not all regions have had their rewards set; missing:\n{}",
            missing_rewards.join("\n")
        )));
    }

    let missing_medallions: Vec<&str> = world
        .regions
        .iter()
        .filter(|r| matches!(&r.medallion, Some(slot) if slot.medallion.is_none()))
        .map(|r| r.name)
        .collect();
    if !missing_medallions.is_empty() {
        return Err(GenerationError::Configuration(format!(
            "not all regions have had their medallions set; missing:\n{}",
            missing_medallions.join("\n")
        )));
    }
    Ok(())
}

/// Serializes a finished single-world assignment into a layout that, fed
/// back through [`apply_layout`], reproduces it exactly.
pub fn export_layout(world: &World) -> PlandoLayout {
    let items: Vec<(String, ItemType)> = world
        .filled_locations()
        .map(|loc| {
            let item: Item = world.item_at(loc).expect("location is filled");
            (world.locations[loc].name.to_string(), item.item_type)
        })
        .collect();
    let rewards = world
        .regions
        .iter()
        .filter_map(|r| {
            let reward = r.reward.as_ref()?.reward?;
            Some((r.name.to_string(), reward))
        })
        .collect();
    let medallions = world
        .regions
        .iter()
        .filter_map(|r| {
            let medallion = r.medallion.as_ref()?.medallion?;
            Some((r.name.to_string(), medallion))
        })
        .collect();
    PlandoLayout {
        items,
        rewards,
        medallions,
        complete: world.vacant_locations().next().is_none(),
    }
}
