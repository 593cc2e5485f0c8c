//! Per-world item pools. Pools are created once, before any fill runs, and
//! together account for exactly one item per location: the junk pool is
//! sized to whatever the fixed pools leave uncovered.

use crate::{Item, ItemType, World};

use ItemType::*;

/// Order matters for the dungeon pool: the assumed fill consumes it
/// front-to-back, so big keys (which gate the most locations) are seated
/// before small keys.
const DUNGEON_POOL: &[ItemType] = &[
    BigKeyEP, BigKeyDP, BigKeyTH, BigKeyMM, BigKeyTR, BigKeyGT, KeyHC, KeyDP, KeyTH, KeyMM,
    KeyMM, KeyTR, KeyTR, KeyTR, KeyGT, KeyGT,
];

const PROGRESSION_POOL: &[ItemType] = &[
    ProgressiveSword,
    ProgressiveSword,
    ProgressiveGlove,
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
    Missile,
    Missile,
    Super,
    Super,
    Super,
    PowerBomb,
    PowerBomb,
    PowerBomb,
];

const KEYCARD_POOL: &[ItemType] = &[
    CardCrateriaL1,
    CardBrinstarBoss,
    CardNorfairL1,
    CardNorfairBoss,
    CardWreckedShipBoss,
    CardMaridiaBoss,
];

const NICE_POOL: &[ItemType] = &[
    HeartContainer,
    HeartContainer,
    HeartContainer,
    ETank,
    ETank,
    ETank,
    ETank,
    ReserveTank,
    ReserveTank,
    ProgressiveShield,
    ProgressiveShield,
    ProgressiveTunic,
    ProgressiveTunic,
];

const JUNK_CYCLE: &[ItemType] = &[TwentyRupees, Arrows, ThreeBombs, FiftyRupees];

#[derive(Clone, Debug)]
pub struct ItemPools {
    pub dungeon: Vec<Item>,
    pub progression: Vec<Item>,
    pub keycards: Vec<Item>,
    pub nice: Vec<Item>,
    pub junk: Vec<Item>,
}

impl ItemPools {
    pub fn new(world: &World) -> ItemPools {
        let make = |types: &[ItemType]| -> Vec<Item> {
            types.iter().map(|&t| Item::new(t, world.id)).collect()
        };
        let dungeon = make(DUNGEON_POOL);
        let progression = make(PROGRESSION_POOL);
        let keycards = make(KEYCARD_POOL);
        let nice = make(NICE_POOL);

        // Keycards only occupy locations when Metroid keysanity places them;
        // otherwise they are assumed owned and the junk pool grows to cover
        // their share.
        let mut fixed = dungeon.len() + progression.len() + nice.len();
        if world.config.metroid_keysanity() {
            fixed += keycards.len();
        }
        let junk_count = world.locations.len().saturating_sub(fixed);
        let junk = JUNK_CYCLE
            .iter()
            .cycle()
            .take(junk_count)
            .map(|&t| Item::new(t, world.id))
            .collect();

        ItemPools {
            dungeon,
            progression,
            keycards,
            nice,
            junk,
        }
    }

    /// Removes and returns one item of the given type, searching the pools
    /// in dungeon, progression, keycard, nice, junk order.
    pub fn take(&mut self, item_type: ItemType) -> Option<Item> {
        for pool in [
            &mut self.dungeon,
            &mut self.progression,
            &mut self.keycards,
            &mut self.nice,
            &mut self.junk,
        ] {
            if let Some(pos) = pool.iter().position(|i| i.item_type == item_type) {
                return Some(pool.remove(pos));
            }
        }
        None
    }

    /// Number of items that will be placed at locations under the given
    /// world's settings.
    pub fn placed_count(&self, world: &World) -> usize {
        let mut n = self.dungeon.len() + self.progression.len() + self.nice.len() + self.junk.len();
        if world.config.metroid_keysanity() {
            n += self.keycards.len();
        }
        n
    }
}
