use serde_derive::{Deserialize, Serialize};

use crate::ItemType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Single,
    Multiworld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeysanityMode {
    None,
    Zelda,
    Metroid,
    Both,
}

/// Placement policy for the handful of items that can be forced to their
/// original location or seeded into sphere 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemPlacement {
    Randomized,
    Original,
    Early,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Progression,
    Nice,
    Junk,
}

/// A user-requested pin for a single location: either any item drawn from a
/// pool category, or one specific item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationPin {
    Pool(PoolKind),
    Item(ItemType),
}

/// A manually pre-planned placement, applied before any randomized fill.
/// Entries name locations and regions by their display name. When `complete`
/// is set, the layout must cover every location and every reward/medallion
/// slot of the world it is applied to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlandoLayout {
    pub items: Vec<(String, ItemType)>,
    pub rewards: Vec<(String, crate::RewardType)>,
    pub medallions: Vec<(String, ItemType)>,
    pub complete: bool,
}

/// Tuning constants for the fill algorithms. The defaults are empirically
/// tuned values carried over from long-running seed generation practice, not
/// derived from first principles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Number of times a single item may fail to find a vacant location
    /// before the whole attempt is declared unsatisfiable.
    pub failure_threshold: usize,
    /// Upper bound on playthrough spheres before the seed is declared stuck.
    pub sphere_limit: usize,
    /// Items seeded into empty-inventory-reachable locations before any
    /// other fill runs, so that the trash fill cannot gate them behind
    /// themselves.
    pub front_fill: Vec<ItemType>,
}

impl Default for FillConfig {
    fn default() -> Self {
        FillConfig {
            failure_threshold: 500,
            sphere_limit: 100,
            front_fill: vec![ItemType::Super, ItemType::PowerBomb],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub player_name: String,
    pub game_mode: GameMode,
    pub keysanity: KeysanityMode,
    pub sword_placement: ItemPlacement,
    pub morph_placement: ItemPlacement,
    pub bombs_placement: ItemPlacement,
    /// Crystals required to open the final tower. Also scales how much of
    /// the tower is pre-filled with junk.
    pub tower_crystal_count: u32,
    /// Items the player starts with; these are never placed at a location.
    pub starting_inventory: Vec<ItemType>,
    /// Items that must show up within the first few spheres.
    pub early_items: Vec<ItemType>,
    /// Per-location pins, honored before the general fill.
    pub location_pins: Vec<(String, LocationPin)>,
    pub plando: Option<PlandoLayout>,
    pub fill: FillConfig,
}

impl Config {
    pub fn zelda_keysanity(&self) -> bool {
        matches!(self.keysanity, KeysanityMode::Zelda | KeysanityMode::Both)
    }

    pub fn metroid_keysanity(&self) -> bool {
        matches!(self.keysanity, KeysanityMode::Metroid | KeysanityMode::Both)
    }

    pub fn multiworld(&self) -> bool {
        self.game_mode == GameMode::Multiworld
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            player_name: "Player".to_string(),
            game_mode: GameMode::Single,
            keysanity: KeysanityMode::None,
            sword_placement: ItemPlacement::Randomized,
            morph_placement: ItemPlacement::Randomized,
            bombs_placement: ItemPlacement::Randomized,
            tower_crystal_count: 2,
            starting_inventory: vec![],
            early_items: vec![],
            location_pins: vec![],
            plando: None,
            fill: FillConfig::default(),
        }
    }
}
