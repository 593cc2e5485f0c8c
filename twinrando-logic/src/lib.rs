//! Progression snapshots and the access-predicate evaluator.
//!
//! A [`Progression`] is a value-type record of what one player currently
//! owns: item counts, obtained rewards, and defeated bosses. Evaluation is a
//! pure query; the fill and playthrough engines construct fresh snapshots
//! rather than mutating one in place mid-evaluation.

use serde_derive::{Deserialize, Serialize};
use twinrando_game::{
    Boss, BossType, Item, ItemType, LocationId, Requirement, Reward, RewardType, World, WorldId,
    NUM_ITEM_TYPES,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    item_counts: Vec<u32>,
    rewards: Vec<RewardType>,
    bosses: Vec<BossType>,
}

impl Progression {
    pub fn new() -> Progression {
        Progression {
            item_counts: vec![0; NUM_ITEM_TYPES],
            rewards: vec![],
            bosses: vec![],
        }
    }

    pub fn from_parts(
        items: impl IntoIterator<Item = ItemType>,
        rewards: impl IntoIterator<Item = RewardType>,
        bosses: impl IntoIterator<Item = BossType>,
    ) -> Progression {
        let mut p = Progression::new();
        for t in items {
            p.add(t);
        }
        p.rewards.extend(rewards);
        p.bosses.extend(bosses);
        p
    }

    /// Projects a cross-world item/reward/boss collection down to the view a
    /// single world's predicates see: only that world's entries count.
    pub fn for_world(
        world_id: WorldId,
        items: &[Item],
        rewards: &[Reward],
        bosses: &[Boss],
    ) -> Progression {
        Progression::from_parts(
            items
                .iter()
                .filter(|i| i.world_id == world_id)
                .map(|i| i.item_type),
            rewards
                .iter()
                .filter(|r| r.world_id == world_id)
                .map(|r| r.reward_type),
            bosses
                .iter()
                .filter(|b| b.world_id == world_id)
                .map(|b| b.boss_type),
        )
    }

    pub fn add(&mut self, item: ItemType) {
        self.item_counts[item as usize] += 1;
    }

    pub fn add_reward(&mut self, reward: RewardType) {
        self.rewards.push(reward);
    }

    pub fn add_boss(&mut self, boss: BossType) {
        self.bosses.push(boss);
    }

    pub fn has(&self, item: ItemType) -> bool {
        self.item_counts[item as usize] > 0
    }

    pub fn count(&self, item: ItemType) -> u32 {
        self.item_counts[item as usize]
    }

    pub fn has_reward(&self, reward: RewardType) -> bool {
        self.rewards.contains(&reward)
    }

    pub fn reward_count(&self, kinds: &[RewardType]) -> u32 {
        self.rewards.iter().filter(|r| kinds.contains(r)).count() as u32
    }

    pub fn has_defeated(&self, boss: BossType) -> bool {
        self.bosses.contains(&boss)
    }

    pub fn item_total(&self) -> u32 {
        self.item_counts.iter().sum()
    }
}

/// Evaluates a requirement tree against a progression. Region and medallion
/// references resolve through the world's arenas; region reference chains
/// must be acyclic, which the built-in layout guarantees.
pub fn satisfies(world: &World, req: &Requirement, p: &Progression) -> bool {
    match req {
        Requirement::Free => true,
        Requirement::Never => false,
        Requirement::Item(t) => p.has(*t),
        Requirement::ItemCount(t, n) => p.count(*t) >= *n,
        Requirement::Reward(r) => p.has_reward(*r),
        Requirement::RewardCount(kinds, n) => p.reward_count(kinds) >= *n,
        Requirement::Boss(b) => p.has_defeated(*b),
        Requirement::Medallion(region_id) => {
            let assigned = world.regions[*region_id]
                .medallion
                .as_ref()
                .and_then(|slot| slot.medallion);
            match assigned {
                Some(m) => p.has(m),
                // Carrying all three always works; an unassigned slot is
                // otherwise impassable.
                None => {
                    p.has(ItemType::Bombos) && p.has(ItemType::Ether) && p.has(ItemType::Quake)
                }
            }
        }
        Requirement::Region(region_id) => is_region_available(world, *region_id, p),
        Requirement::And(reqs) => reqs.iter().all(|r| satisfies(world, r, p)),
        Requirement::Or(reqs) => reqs.iter().any(|r| satisfies(world, r, p)),
    }
}

pub fn is_region_available(world: &World, region_id: usize, p: &Progression) -> bool {
    satisfies(world, &world.regions[region_id].entrance, p)
}

pub fn is_location_available(world: &World, loc: LocationId, p: &Progression) -> bool {
    let location = &world.locations[loc];
    is_region_available(world, location.region_id, p)
        && satisfies(world, &location.requirement, p)
}

/// Whether a region has been cleared for its reward under the progression.
pub fn can_complete_reward(world: &World, region_id: usize, p: &Progression) -> bool {
    match &world.regions[region_id].reward {
        Some(slot) => {
            is_region_available(world, region_id, p) && satisfies(world, &slot.requirement, p)
        }
        None => false,
    }
}

/// Whether a region's boss can be defeated under the progression.
pub fn can_defeat_boss(world: &World, region_id: usize, p: &Progression) -> bool {
    match &world.regions[region_id].boss {
        Some(slot) => {
            is_region_available(world, region_id, p) && satisfies(world, &slot.requirement, p)
        }
        None => false,
    }
}

/// Local placement rules for seating `item` at `loc`: the location must be
/// reachable, dungeon items must stay inside their home dungeon outside
/// keysanity, and preference-pinned locations refuse junk.
pub fn can_hold(world: &World, loc: LocationId, item: Item, p: &Progression) -> bool {
    let location = &world.locations[loc];
    if location.deny_junk && (item.item_type.is_junk() || item.item_type.is_nice()) {
        return false;
    }
    if item.item_type.is_dungeon_item() && !world.config.zelda_keysanity() {
        let region = &world.regions[location.region_id];
        if !region.dungeon_items.contains(&item.item_type) {
            return false;
        }
    }
    is_location_available(world, loc, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinrando_game::settings::Config;
    use twinrando_game::ItemType::*;

    fn default_world() -> World {
        World::new(Config::default(), 0)
    }

    fn full_progression(world: &World) -> Progression {
        use strum::IntoEnumIterator;
        let mut p = Progression::new();
        for _ in 0..4 {
            for t in twinrando_game::ItemType::iter() {
                p.add(t);
            }
        }
        for region in &world.regions {
            if let Some(slot) = &region.reward {
                if let Some(r) = slot.reward {
                    p.add_reward(r);
                }
            }
            if let Some(slot) = &region.boss {
                p.add_boss(slot.boss);
            }
        }
        p
    }

    #[test]
    fn everything_reachable_with_everything_owned() {
        let mut world = default_world();
        let mut rng = rand_stub();
        world.setup(&mut rng);
        let p = full_progression(&world);
        for loc in 0..world.locations.len() {
            assert!(
                is_location_available(&world, loc, &p),
                "unreachable with full inventory: {}",
                world.locations[loc].name
            );
        }
    }

    #[test]
    fn availability_is_monotone_under_item_adds() {
        let mut world = default_world();
        let mut rng = rand_stub();
        world.setup(&mut rng);

        let mut p = Progression::new();
        let order = [
            Morph, Missile, Super, PowerBomb, Bombs, Varia, SpeedBooster, HiJump, Charge,
            ProgressiveSword, ProgressiveSword, Lamp, Bow, Book, Boots, ProgressiveGlove,
            ProgressiveGlove, Hammer, MoonPearl, Flippers, Hookshot, Mirror, FireRod, IceRod,
            Somaria, Cape, Flute, Bottle, Gravity, Grapple, SpaceJump, ScrewAttack, Bombos,
            Ether, Quake,
        ];
        let mut reachable: Vec<bool> = (0..world.locations.len())
            .map(|loc| is_location_available(&world, loc, &p))
            .collect();
        for item in order {
            p.add(item);
            for loc in 0..world.locations.len() {
                let now = is_location_available(&world, loc, &p);
                assert!(
                    now || !reachable[loc],
                    "{} became unreachable after adding {:?}",
                    world.locations[loc].name,
                    item
                );
                reachable[loc] = now;
            }
        }
    }

    fn rand_stub() -> impl rand::Rng {
        use rand::SeedableRng;
        rand::rngs::StdRng::seed_from_u64(0)
    }
}
