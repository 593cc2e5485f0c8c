//! Static data model for the dual-game randomizer: items, regions,
//! locations, access requirements, and the per-player [`World`] arenas that
//! the fill and playthrough engines operate on.

pub mod layout;
pub mod pools;
pub mod settings;

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};
use strum::EnumCount as _;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, VariantNames};

pub use pools::ItemPools;
pub use settings::{Config, FillConfig, GameMode, ItemPlacement, KeysanityMode, LocationPin,
    PlandoLayout, PoolKind};

pub type WorldId = usize; // Index of a player's world within the session
pub type RegionId = usize; // Index into World.regions
pub type LocationId = usize; // Index into World.locations

/// The two games whose worlds are stitched together into one seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    Metroid,
    Zelda,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumCount, EnumIter, VariantNames,
)]
pub enum ItemType {
    // Zelda progression
    ProgressiveSword,
    ProgressiveGlove,
    Bow,
    Hookshot,
    FireRod,
    IceRod,
    Bombos,
    Ether,
    Quake,
    Lamp,
    Hammer,
    Flute,
    Book,
    Somaria,
    Cape,
    Mirror,
    Boots,
    Flippers,
    MoonPearl,
    Bottle,
    HalfMagic,
    // Metroid progression
    Morph,
    Bombs,
    Charge,
    Varia,
    Gravity,
    HiJump,
    SpaceJump,
    SpeedBooster,
    Grapple,
    Wave,
    Ice,
    Plasma,
    ScrewAttack,
    SpringBall,
    Missile,
    Super,
    PowerBomb,
    // Zelda dungeon items
    KeyHC,
    KeyDP,
    KeyTH,
    KeyMM,
    KeyTR,
    KeyGT,
    BigKeyEP,
    BigKeyDP,
    BigKeyTH,
    BigKeyMM,
    BigKeyTR,
    BigKeyGT,
    // Metroid door keycards
    CardCrateriaL1,
    CardBrinstarBoss,
    CardNorfairL1,
    CardNorfairBoss,
    CardWreckedShipBoss,
    CardMaridiaBoss,
    // Nice-to-have
    HeartContainer,
    ETank,
    ReserveTank,
    ProgressiveShield,
    ProgressiveTunic,
    // Junk
    Arrows,
    ThreeBombs,
    TwentyRupees,
    FiftyRupees,
}

pub const NUM_ITEM_TYPES: usize = ItemType::COUNT;

impl ItemType {
    pub fn game(self) -> Game {
        use ItemType::*;
        match self {
            ProgressiveSword | ProgressiveGlove | Bow | Hookshot | FireRod | IceRod | Bombos
            | Ether | Quake | Lamp | Hammer | Flute | Book | Somaria | Cape | Mirror | Boots
            | Flippers | MoonPearl | Bottle | HalfMagic | KeyHC | KeyDP | KeyTH | KeyMM | KeyTR
            | KeyGT | BigKeyEP | BigKeyDP | BigKeyTH | BigKeyMM | BigKeyTR | BigKeyGT
            | HeartContainer | ProgressiveShield | ProgressiveTunic | Arrows | ThreeBombs
            | TwentyRupees | FiftyRupees => Game::Zelda,
            _ => Game::Metroid,
        }
    }

    pub fn is_dungeon_item(self) -> bool {
        self.is_small_key() || self.is_big_key()
    }

    pub fn is_small_key(self) -> bool {
        use ItemType::*;
        matches!(self, KeyHC | KeyDP | KeyTH | KeyMM | KeyTR | KeyGT)
    }

    pub fn is_big_key(self) -> bool {
        use ItemType::*;
        matches!(self, BigKeyEP | BigKeyDP | BigKeyTH | BigKeyMM | BigKeyTR | BigKeyGT)
    }

    pub fn is_keycard(self) -> bool {
        use ItemType::*;
        matches!(
            self,
            CardCrateriaL1 | CardBrinstarBoss | CardNorfairL1 | CardNorfairBoss
                | CardWreckedShipBoss | CardMaridiaBoss
        )
    }

    pub fn is_medallion(self) -> bool {
        use ItemType::*;
        matches!(self, Bombos | Ether | Quake)
    }

    pub fn is_nice(self) -> bool {
        use ItemType::*;
        matches!(
            self,
            HeartContainer | ETank | ReserveTank | ProgressiveShield | ProgressiveTunic
        )
    }

    pub fn is_junk(self) -> bool {
        use ItemType::*;
        matches!(self, Arrows | ThreeBombs | TwentyRupees | FiftyRupees)
    }

    /// Junk that the player may mistake for something worthwhile. Locations
    /// pinned to hold progression refuse these.
    pub fn is_scam(self) -> bool {
        use ItemType::*;
        matches!(self, TwentyRupees | FiftyRupees)
    }

    /// Whether this item can gate progress under the given settings. Dungeon
    /// items and keycards only count when the matching keysanity mode places
    /// them through the general fill.
    pub fn is_progression(self, config: &Config) -> bool {
        if self.is_dungeon_item() {
            return config.zelda_keysanity();
        }
        if self.is_keycard() {
            return config.metroid_keysanity();
        }
        !self.is_nice() && !self.is_junk()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum RewardType {
    PendantGreen,
    PendantRed,
    PendantBlue,
    CrystalBlue,
    CrystalRed,
    Agahnim,
}

impl RewardType {
    pub fn is_pendant(self) -> bool {
        use RewardType::*;
        matches!(self, PendantGreen | PendantRed | PendantBlue)
    }

    pub fn is_crystal(self) -> bool {
        use RewardType::*;
        matches!(self, CrystalBlue | CrystalRed)
    }
}

pub const PENDANTS: [RewardType; 3] = [
    RewardType::PendantGreen,
    RewardType::PendantRed,
    RewardType::PendantBlue,
];
pub const CRYSTALS: [RewardType; 2] = [RewardType::CrystalBlue, RewardType::CrystalRed];

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum BossType {
    Kraid,
    Phantoon,
    Draygon,
    Ridley,
}

/// A single item instance, owned by one player's world. Instances are
/// created in fixed pools before filling and never mutated; placement only
/// changes which location holds one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub item_type: ItemType,
    pub world_id: WorldId,
}

impl Item {
    pub fn new(item_type: ItemType, world_id: WorldId) -> Self {
        Item { item_type, world_id }
    }
}

/// Access predicate tree, evaluated against a progression snapshot. Every
/// variant is monotone: adding items, rewards, or defeated bosses to the
/// progression can never turn a satisfied requirement unsatisfied. The
/// fixed-point sphere algorithm and the assumed fill both rely on this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Requirement {
    Free,
    Never,
    Item(ItemType),
    ItemCount(ItemType, u32),
    Reward(RewardType),
    /// At least the given number of rewards whose type is in the given set.
    RewardCount(Vec<RewardType>, u32),
    Boss(BossType),
    /// The medallion assigned to the named region is owned (or all three
    /// medallions are, which always suffices).
    Medallion(RegionId),
    /// The named region is enterable. Region references must stay acyclic.
    Region(RegionId),
    And(Vec<Requirement>),
    Or(Vec<Requirement>),
}

impl Requirement {
    pub fn make_and(mut reqs: Vec<Requirement>) -> Requirement {
        reqs.retain(|r| *r != Requirement::Free);
        if reqs.iter().any(|r| *r == Requirement::Never) {
            return Requirement::Never;
        }
        match reqs.len() {
            0 => Requirement::Free,
            1 => reqs.into_iter().next().unwrap(),
            _ => Requirement::And(reqs),
        }
    }

    pub fn make_or(mut reqs: Vec<Requirement>) -> Requirement {
        reqs.retain(|r| *r != Requirement::Never);
        if reqs.iter().any(|r| *r == Requirement::Free) {
            return Requirement::Free;
        }
        match reqs.len() {
            0 => Requirement::Never,
            1 => reqs.into_iter().next().unwrap(),
            _ => Requirement::Or(reqs),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Location {
    pub id: LocationId,
    pub name: &'static str,
    pub region_id: RegionId,
    /// Placement-order bias: higher weights move a location toward the front
    /// of the candidate list when location weighting is enabled.
    pub weight: i32,
    /// Location-specific predicate, on top of the owning region's entrance.
    pub requirement: Requirement,
    /// Set by preference pinning: junk may not be placed here.
    pub deny_junk: bool,
}

/// "Clearing this region grants a reward." The reward itself is assigned at
/// world setup (or by plando) and read back by access predicates.
#[derive(Clone, Debug)]
pub struct RewardSlot {
    pub requirement: Requirement,
    pub reward: Option<RewardType>,
}

/// "This region has a boss that can be defeated," gating anything that
/// requires the boss kill.
#[derive(Clone, Debug)]
pub struct BossSlot {
    pub boss: BossType,
    pub requirement: Requirement,
}

/// "Entering this region requires a prerequisite item," assigned at world
/// setup (or by plando).
#[derive(Clone, Debug)]
pub struct MedallionSlot {
    pub medallion: Option<ItemType>,
}

#[derive(Clone, Debug)]
pub struct Region {
    pub id: RegionId,
    pub name: &'static str,
    pub game: Game,
    pub entrance: Requirement,
    pub locations: Vec<LocationId>,
    /// Dungeon items native to this region. Outside keysanity, only these
    /// may be filled into the region's locations (and nowhere else).
    pub dungeon_items: Vec<ItemType>,
    pub reward: Option<RewardSlot>,
    pub boss: Option<BossSlot>,
    pub medallion: Option<MedallionSlot>,
}

/// A reward made obtainable by a completable reward region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub reward_type: RewardType,
    pub world_id: WorldId,
    pub region_id: RegionId,
}

/// A boss made defeatable by a completable boss region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub boss_type: BossType,
    pub world_id: WorldId,
    pub region_id: RegionId,
}

/// One player's combined game world: the region/location arenas, the item
/// assignment table (parallel to `locations`), and the player's settings.
/// Cross references between regions, locations, and items are plain indices
/// into these arenas.
#[derive(Clone, Debug)]
pub struct World {
    pub id: WorldId,
    pub config: Config,
    pub regions: Vec<Region>,
    pub locations: Vec<Location>,
    pub assignments: Vec<Option<Item>>,
}

impl World {
    pub fn new(config: Config, id: WorldId) -> World {
        let (regions, locations) = layout::build(&config);
        let num_locations = locations.len();
        World {
            id,
            config,
            regions,
            locations,
            assignments: vec![None; num_locations],
        }
    }

    /// Builds a world from explicitly constructed regions/locations instead
    /// of the built-in layout. Used by scenario tests and tooling.
    pub fn from_parts(
        config: Config,
        id: WorldId,
        regions: Vec<Region>,
        locations: Vec<Location>,
    ) -> World {
        let num_locations = locations.len();
        World {
            id,
            config,
            regions,
            locations,
            assignments: vec![None; num_locations],
        }
    }

    /// Randomly assigns rewards and medallions to any slot not already set
    /// (e.g. by plando). The reward pool holds exactly one reward per
    /// unassigned slot, drawn from the pendant/crystal mix the layout
    /// expects.
    pub fn setup<R: Rng>(&mut self, rng: &mut R) {
        for region in &mut self.regions {
            if let Some(slot) = &mut region.medallion {
                if slot.medallion.is_none() {
                    slot.medallion = Some(match rng.gen_range(0..3) {
                        0 => ItemType::Bombos,
                        1 => ItemType::Ether,
                        _ => ItemType::Quake,
                    });
                }
            }
        }

        let mut rewards: Vec<RewardType> = vec![
            RewardType::PendantGreen,
            RewardType::PendantRed,
            RewardType::PendantBlue,
            RewardType::CrystalBlue,
            RewardType::CrystalRed,
        ];
        // Rewards already pinned (by plando) are spoken for.
        for region in &self.regions {
            if let Some(slot) = &region.reward {
                if let Some(assigned) = slot.reward {
                    if let Some(pos) = rewards.iter().position(|&r| r == assigned) {
                        rewards.remove(pos);
                    }
                }
            }
        }
        rewards.shuffle(rng);
        for region in &mut self.regions {
            if let Some(slot) = &mut region.reward {
                if slot.reward.is_none() {
                    slot.reward = rewards.pop();
                }
            }
        }
    }

    pub fn location_by_name(&self, name: &str) -> Option<LocationId> {
        self.locations
            .iter()
            .position(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn region_by_name(&self, name: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn item_at(&self, loc: LocationId) -> Option<Item> {
        self.assignments[loc]
    }

    pub fn is_vacant(&self, loc: LocationId) -> bool {
        self.assignments[loc].is_none()
    }

    pub fn vacant_locations(&self) -> impl Iterator<Item = LocationId> + '_ {
        (0..self.locations.len()).filter(|&i| self.assignments[i].is_none())
    }

    pub fn filled_locations(&self) -> impl Iterator<Item = LocationId> + '_ {
        (0..self.locations.len()).filter(|&i| self.assignments[i].is_some())
    }

    /// Fills a location. Each location is filled exactly once per
    /// generation; a second assignment is a logic error in the caller.
    pub fn assign(&mut self, loc: LocationId, item: Item) -> Result<()> {
        if let Some(existing) = self.assignments[loc] {
            bail!(
                "location {:?} already holds {:?}",
                self.locations[loc].name,
                existing.item_type
            );
        }
        self.assignments[loc] = Some(item);
        Ok(())
    }

    /// Rewards currently assigned to this world's reward regions.
    pub fn rewards(&self) -> Vec<Reward> {
        self.regions
            .iter()
            .filter_map(|r| {
                let slot = r.reward.as_ref()?;
                let reward_type = slot.reward?;
                Some(Reward {
                    reward_type,
                    world_id: self.id,
                    region_id: r.id,
                })
            })
            .collect()
    }

    /// Bosses living in this world's boss regions.
    pub fn bosses(&self) -> Vec<Boss> {
        self.regions
            .iter()
            .filter_map(|r| {
                let slot = r.boss.as_ref()?;
                Some(Boss {
                    boss_type: slot.boss,
                    world_id: self.id,
                    region_id: r.id,
                })
            })
            .collect()
    }

    /// Items already placed at this world's locations.
    pub fn placed_items(&self) -> impl Iterator<Item = Item> + '_ {
        self.assignments.iter().filter_map(|a| *a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_composition_simplifies_degenerate_cases() {
        assert_eq!(Requirement::make_and(vec![]), Requirement::Free);
        assert_eq!(Requirement::make_or(vec![]), Requirement::Never);
        assert_eq!(
            Requirement::make_and(vec![Requirement::Free, Requirement::Item(ItemType::Lamp)]),
            Requirement::Item(ItemType::Lamp)
        );
        assert_eq!(
            Requirement::make_and(vec![Requirement::Never, Requirement::Item(ItemType::Lamp)]),
            Requirement::Never
        );
        assert_eq!(
            Requirement::make_or(vec![Requirement::Free, Requirement::Item(ItemType::Lamp)]),
            Requirement::Free
        );
    }

    #[test]
    fn setup_assigns_every_slot_and_skips_pinned_rewards() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);

        let mut world = World::new(Config::default(), 0);
        let mire = world.region_by_name("Misery Mire").unwrap();
        world.regions[mire].reward.as_mut().unwrap().reward = Some(RewardType::CrystalRed);
        world.setup(&mut rng);

        assert_eq!(
            world.regions[mire].reward.as_ref().unwrap().reward,
            Some(RewardType::CrystalRed)
        );
        // One of each reward in the pool ends up assigned exactly once.
        let mut assigned: Vec<RewardType> = world
            .rewards()
            .into_iter()
            .map(|r| r.reward_type)
            .filter(|r| *r != RewardType::Agahnim)
            .collect();
        assigned.sort_by_key(|r| format!("{r:?}"));
        let mut expected = vec![
            RewardType::CrystalBlue,
            RewardType::CrystalRed,
            RewardType::PendantBlue,
            RewardType::PendantGreen,
            RewardType::PendantRed,
        ];
        expected.sort_by_key(|r| format!("{r:?}"));
        assert_eq!(assigned, expected);

        for region in &world.regions {
            if let Some(slot) = &region.medallion {
                assert!(slot.medallion.is_some());
            }
        }
    }
}

