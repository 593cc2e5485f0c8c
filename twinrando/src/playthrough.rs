//! Playthrough simulation: a fixed-point expansion over the filled
//! locations, producing the ordered "spheres" a player could collect items
//! in. Also serves as the completability oracle: rerunning the simulation
//! with a subset of locations excluded answers whether that subset is
//! required to finish the game.

use hashbrown::HashSet;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use twinrando_game::{Item, ItemPools, World};
use twinrando_logic::{is_location_available, Progression};

use crate::fill::{collect_bosses, collect_rewards};
use crate::{GenerationError, LocationRef};

/// One wave of the simulation: everything that became collectible given the
/// items gathered in all earlier waves. Spheres are pairwise disjoint and
/// together cover every simulated location.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sphere {
    pub locations: Vec<LocationRef>,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Playthrough {
    pub spheres: Vec<Sphere>,
}

impl Playthrough {
    /// Simulates the full set of filled locations, starting from the
    /// standard assumed inventory (starting items, plus keycards when they
    /// are not placed by the fill).
    pub fn generate(worlds: &[World]) -> Result<Playthrough, GenerationError> {
        let locations: Vec<LocationRef> = worlds
            .iter()
            .flat_map(|world| world.filled_locations().map(move |loc| (world.id, loc)))
            .collect();
        Self::generate_for(worlds, &locations, &base_inventory(worlds))
    }

    /// Simulates exactly the given locations. Fails with an unsatisfiable
    /// error naming the stuck locations if the simulation cannot collect
    /// them all.
    pub fn generate_for(
        worlds: &[World],
        locations: &[LocationRef],
        base_items: &[Item],
    ) -> Result<Playthrough, GenerationError> {
        let world_ids: Vec<usize> = worlds.iter().map(|w| w.id).collect();
        let sphere_limit = worlds
            .first()
            .map(|w| w.config.fill.sphere_limit)
            .unwrap_or(100);

        let mut items: Vec<Item> = base_items.to_vec();
        let mut collected: HashSet<LocationRef> = HashSet::new();
        let mut spheres: Vec<Sphere> = vec![];

        while collected.len() < locations.len() {
            let rewards = collect_rewards(worlds, &world_ids, &items);
            let bosses = collect_bosses(worlds, &world_ids, &items, &rewards);
            let progressions: Vec<Progression> = worlds
                .iter()
                .map(|w| Progression::for_world(w.id, &items, &rewards, &bosses))
                .collect();

            let mut new_locations: Vec<LocationRef> = vec![];
            let mut new_items: Vec<Item> = vec![];
            for &(w, loc) in locations {
                if !collected.contains(&(w, loc))
                    && is_location_available(&worlds[w], loc, &progressions[w])
                {
                    new_locations.push((w, loc));
                    new_items.push(worlds[w].item_at(loc).expect("simulated location is filled"));
                }
            }

            debug!(
                "sphere {}: {} new items, {} rewards, {} bosses",
                spheres.len() + 1,
                new_items.len(),
                rewards.len(),
                bosses.len()
            );

            if new_locations.is_empty() {
                // Rewards and bosses were already folded in above, so a wave
                // that moves no locations is terminal.
                let stuck: Vec<String> = locations
                    .iter()
                    .filter(|l| !collected.contains(*l))
                    .map(|&(w, loc)| worlds[w].locations[loc].name.to_string())
                    .collect();
                return Err(GenerationError::Unsatisfiable(format!(
                    "playthrough stuck with {} uncollectible locations: {}",
                    stuck.len(),
                    stuck.join(", ")
                )));
            }

            collected.extend(new_locations.iter().copied());
            items.extend(new_items.iter().copied());
            spheres.push(Sphere {
                locations: new_locations,
                items: new_items,
            });

            if spheres.len() > sphere_limit {
                return Err(GenerationError::Unsatisfiable(format!(
                    "more than {sphere_limit} spheres; seed likely impossible"
                )));
            }
        }

        Ok(Playthrough { spheres })
    }

    /// Index of the first sphere containing the given item type in the
    /// given world, if any.
    pub fn sphere_of(&self, world_id: usize, item_type: twinrando_game::ItemType) -> Option<usize> {
        self.spheres.iter().position(|s| {
            s.items
                .iter()
                .any(|i| i.world_id == world_id && i.item_type == item_type)
        })
    }
}

/// The inventory the player is assumed to start with: configured starting
/// items, plus each world's keycards when Metroid keysanity does not place
/// them at locations.
pub fn base_inventory(worlds: &[World]) -> Vec<Item> {
    let mut items: Vec<Item> = vec![];
    for world in worlds {
        if !world.config.metroid_keysanity() {
            items.extend(ItemPools::new(world).keycards);
        }
        items.extend(
            world
                .config
                .starting_inventory
                .iter()
                .map(|&t| Item::new(t, world.id)),
        );
    }
    items
}
