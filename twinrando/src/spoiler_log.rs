//! Spoiler log: a serializable account of a finished seed, covering the
//! playthrough spheres, the complete location/item mapping, and the
//! reward/medallion assignments made to regions.

use anyhow::Result;
use serde_derive::{Deserialize, Serialize};
use twinrando_game::World;

use crate::playthrough::Playthrough;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoilerEntry {
    pub location: String,
    pub region: String,
    pub player: String,
    pub item: String,
    pub item_player: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoilerSphere {
    pub sphere: usize,
    pub items: Vec<SpoilerEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoilerAssignment {
    pub region: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoilerWorld {
    pub player: String,
    pub rewards: Vec<SpoilerAssignment>,
    pub medallions: Vec<SpoilerAssignment>,
    pub locations: Vec<SpoilerEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoilerLog {
    pub seed: usize,
    pub playthrough: Vec<SpoilerSphere>,
    pub worlds: Vec<SpoilerWorld>,
}

impl SpoilerLog {
    pub fn new(seed: usize, worlds: &[World], playthrough: &Playthrough) -> SpoilerLog {
        let entry = |w: usize, loc: usize| -> SpoilerEntry {
            let world = &worlds[w];
            let item = world.item_at(loc).expect("spoiled location is filled");
            SpoilerEntry {
                location: world.locations[loc].name.to_string(),
                region: world.regions[world.locations[loc].region_id].name.to_string(),
                player: world.config.player_name.clone(),
                item: item.item_type.to_string(),
                item_player: worlds[item.world_id].config.player_name.clone(),
            }
        };

        let spheres = playthrough
            .spheres
            .iter()
            .enumerate()
            .map(|(i, sphere)| SpoilerSphere {
                sphere: i + 1,
                items: sphere
                    .locations
                    .iter()
                    .map(|&(w, loc)| entry(w, loc))
                    .collect(),
            })
            .collect();

        let spoiler_worlds = worlds
            .iter()
            .map(|world| SpoilerWorld {
                player: world.config.player_name.clone(),
                rewards: world
                    .regions
                    .iter()
                    .filter_map(|r| {
                        let reward = r.reward.as_ref()?.reward?;
                        Some(SpoilerAssignment {
                            region: r.name.to_string(),
                            value: reward.to_string(),
                        })
                    })
                    .collect(),
                medallions: world
                    .regions
                    .iter()
                    .filter_map(|r| {
                        let medallion = r.medallion.as_ref()?.medallion?;
                        Some(SpoilerAssignment {
                            region: r.name.to_string(),
                            value: medallion.to_string(),
                        })
                    })
                    .collect(),
                locations: world
                    .filled_locations()
                    .map(|loc| entry(world.id, loc))
                    .collect(),
            })
            .collect();

        SpoilerLog {
            seed,
            playthrough: spheres,
            worlds: spoiler_worlds,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
