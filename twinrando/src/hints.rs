//! Hint-usefulness queries, built on the playthrough oracle: remove the
//! queried locations from the simulation and see whether the rest of the
//! game still completes without them.

use serde_derive::{Deserialize, Serialize};
use twinrando_game::World;

use crate::playthrough::{base_inventory, Playthrough};
use crate::LocationRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Usefulness {
    Useless,
    NiceToHave,
    Mandatory,
}

/// How useful the items sitting at the given locations are. Mandatory means
/// the game cannot be completed without visiting them; NiceToHave means the
/// game completes but the player passes up something worthwhile.
pub fn location_usefulness(worlds: &[World], locations: &[LocationRef]) -> Usefulness {
    let remaining: Vec<LocationRef> = worlds
        .iter()
        .flat_map(|world| world.filled_locations().map(move |loc| (world.id, loc)))
        .filter(|l| !locations.contains(l))
        .collect();

    match Playthrough::generate_for(worlds, &remaining, &base_inventory(worlds)) {
        Err(_) => Usefulness::Mandatory,
        Ok(_) => {
            let any_useful = locations.iter().any(|&(w, loc)| {
                let Some(item) = worlds[w].item_at(loc) else {
                    return false;
                };
                let owner = &worlds[item.world_id];
                item.item_type.is_nice()
                    || (item.item_type.is_progression(&owner.config)
                        && !item.item_type.is_junk())
            });
            if any_useful {
                Usefulness::NiceToHave
            } else {
                Usefulness::Useless
            }
        }
    }
}
