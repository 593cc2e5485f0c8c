//! Item placement. The central algorithm is the assumed fill: while seating
//! one item, every other not-yet-placed item is assumed already owned, which
//! finds a valid slot without knowing the final collection order and keeps
//! the item's own prerequisites satisfiable by the rest of the pool.

use hashbrown::HashMap;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use twinrando_game::{
    Boss, Config, Game, Item, ItemPools, ItemPlacement, ItemType, LocationPin, PoolKind, Reward,
    World, WorldId,
};
use twinrando_logic::{
    can_complete_reward, can_defeat_boss, can_hold, is_location_available, Progression,
};

use crate::{plando, CancelToken, GenerationError, LocationRef};

/// Item types nudged toward the tail of the multiworld progression pool so
/// that they tend to land at earlier locations, with the fraction of the
/// pool their tail occupies.
const ITEM_BIAS: &[(ItemType, f64)] = &[(ItemType::MoonPearl, 0.40), (ItemType::Morph, 0.20)];

/// Share of the final tower pre-filled with junk, per required crystal.
const MAX_TOWER_CRYSTALS: u32 = 2;

pub struct Filler<'a, R: Rng> {
    primary: &'a Config,
    rng: &'a mut R,
    cancel: &'a CancelToken,
}

impl<'a, R: Rng> Filler<'a, R> {
    pub fn new(primary: &'a Config, rng: &'a mut R, cancel: &'a CancelToken) -> Self {
        Filler {
            primary,
            rng,
            cancel,
        }
    }

    /// Runs every fill stage in order. Later stages assume earlier stages
    /// have already claimed their locations.
    pub fn fill(&mut self, worlds: &mut [World]) -> Result<(), GenerationError> {
        let mut starting_inventory: Vec<Item> = vec![];
        for world in worlds.iter() {
            starting_inventory.extend(
                world
                    .config
                    .starting_inventory
                    .iter()
                    .map(|&t| Item::new(t, world.id)),
            );
        }

        let mut pools: Vec<ItemPools> = worlds.iter().map(ItemPools::new).collect();

        // Pre-planned layouts run first so the pools the randomized stages
        // see already exclude everything the plan claimed. A complete plan
        // replaces the randomized stages for its world entirely.
        let mut plando_complete = vec![false; worlds.len()];
        for w in 0..worlds.len() {
            if let Some(layout) = worlds[w].config.plando.clone() {
                plando::apply_layout(&mut worlds[w], &layout, &mut pools[w])?;
                plando_complete[w] = layout.complete;
            }
        }

        // Whatever the plan left open is rolled now.
        for world in worlds.iter_mut() {
            world.setup(self.rng);
        }

        let mut nice: Vec<Item> = pools.iter().flat_map(|p| p.nice.clone()).collect();
        nice.shuffle(self.rng);
        let mut junk: Vec<Item> = pools.iter().flat_map(|p| p.junk.clone()).collect();
        junk.shuffle(self.rng);

        let mut progression_items: Vec<Item> = vec![];
        let mut assumed_inventory: Vec<Item> = starting_inventory.clone();

        for w in 0..worlds.len() {
            if self.cancel.is_cancelled() {
                return Err(GenerationError::Cancelled);
            }
            if plando_complete[w] {
                // Even a fully planned world keeps its keycards assumed
                // when they are not placed as items.
                if !worlds[w].config.metroid_keysanity() {
                    assumed_inventory.extend(std::mem::take(&mut pools[w].keycards));
                }
                continue;
            }

            // The dungeon pool order is significant, don't shuffle.
            let mut dungeon = std::mem::take(&mut pools[w].dungeon);
            let mut progression = std::mem::take(&mut pools[w].progression);
            let keycards = std::mem::take(&mut pools[w].keycards);

            let preference_items =
                self.apply_preferences(&mut worlds[w], &mut progression, &mut nice, &mut junk)?;
            self.initial_fill(
                &mut worlds[w],
                &mut progression,
                &starting_inventory,
            )?;

            if !worlds[w].config.zelda_keysanity() {
                debug!("world {w}: distributing dungeon items according to logic");
                let mut world_locations: Vec<LocationRef> = worlds[w]
                    .vacant_locations()
                    .map(|loc| (w, loc))
                    .collect();
                world_locations.shuffle(self.rng);
                let mut base: Vec<Item> = progression.clone();
                base.extend(keycards.iter().copied());
                base.extend(assumed_inventory.iter().copied());
                base.extend(preference_items.iter().copied());
                self.assumed_fill(worlds, &mut dungeon, &base, &mut world_locations, &[w])?;
            }

            if worlds[w].config.metroid_keysanity() {
                progression_items.extend(keycards);
            } else {
                assumed_inventory.extend(keycards);
            }

            progression_items.extend(dungeon);
            progression_items.extend(progression);
        }

        progression_items.shuffle(self.rng);

        let mut locations: Vec<LocationRef> = worlds
            .iter()
            .flat_map(|world| world.vacant_locations().map(move |loc| (world.id, loc)))
            .collect();
        locations.shuffle(self.rng);
        if self.primary.multiworld() {
            // Bias late-pool types so they tend to land at earlier locations.
            self.apply_item_bias(&mut progression_items, ITEM_BIAS)?;
        } else {
            locations = apply_location_weighting(worlds, &locations);
        }

        debug!("pre-filling the tower with junk");
        self.tower_junk_fill(worlds, &mut junk);

        debug!("distributing progression items according to logic");
        let world_ids: Vec<WorldId> = worlds.iter().map(|w| w.id).collect();
        self.assumed_fill(
            worlds,
            &mut progression_items,
            &assumed_inventory,
            &mut locations,
            &world_ids,
        )?;

        debug!("distributing nice-to-have items");
        self.fast_fill(worlds, &mut nice, &locations);

        debug!("distributing junk items");
        self.fast_fill(worlds, &mut junk, &locations);

        let vacant: Vec<String> = worlds
            .iter()
            .flat_map(|world| {
                world
                    .vacant_locations()
                    .map(|loc| world.locations[loc].name.to_string())
            })
            .collect();
        if !vacant.is_empty() {
            return Err(GenerationError::Unsatisfiable(format!(
                "locations left vacant after fill: {}",
                vacant.join(", ")
            )));
        }
        Ok(())
    }

    /// Seats each item of `item_pool` at the first vacant location that can
    /// hold it under the assumption that every other unplaced item is
    /// already owned. Items with nowhere to go are requeued; an item that
    /// keeps failing past the configured threshold means the configuration
    /// cannot converge.
    pub fn assumed_fill(
        &mut self,
        worlds: &mut [World],
        item_pool: &mut Vec<Item>,
        base_items: &[Item],
        locations: &mut Vec<LocationRef>,
        world_scope: &[WorldId],
    ) -> Result<(), GenerationError> {
        let mut items_to_add: Vec<Item> = item_pool.clone();
        let mut failed_attempts: HashMap<Item, usize> = HashMap::new();

        while !items_to_add.is_empty() {
            // Try placing the next item.
            let item = items_to_add.remove(0);

            let mut assumed: Vec<Item> = items_to_add.clone();
            assumed.extend(base_items.iter().copied());
            let inventory = collect_items(worlds, world_scope, assumed);
            let rewards = collect_rewards(worlds, world_scope, &inventory);
            let bosses = collect_bosses(worlds, world_scope, &inventory, &rewards);

            let location = find_fillable(worlds, locations, item, &inventory, &rewards, &bosses);
            match location {
                None => {
                    debug!("could not find anywhere to place {:?}", item.item_type);
                    items_to_add.push(item);

                    let failures = failed_attempts.entry(item).or_insert(0);
                    *failures += 1;
                    if *failures > self.primary.fill.failure_threshold {
                        return Err(GenerationError::Unsatisfiable(format!(
                            "no location will accept {:?} after {} attempts; the requested \
                             item/location combination cannot converge",
                            item.item_type, failures
                        )));
                    }
                }
                Some((w, loc)) => {
                    worlds[w]
                        .assign(loc, item)
                        .map_err(|e| GenerationError::Unsatisfiable(e.to_string()))?;
                    if let Some(pos) = item_pool.iter().position(|i| *i == item) {
                        item_pool.remove(pos);
                    }
                    debug!(
                        "placed {:?} at {}",
                        item.item_type, worlds[w].locations[loc].name
                    );

                    if item.item_type.is_big_key()
                        && !items_to_add.iter().any(|i| i.item_type.is_big_key())
                    {
                        debug!("reshuffling locations after final big key placement");
                        locations.shuffle(self.rng);
                    }
                }
            }

            if self.cancel.is_cancelled() {
                return Err(GenerationError::Cancelled);
            }
        }
        Ok(())
    }

    /// Fixed vanilla pins and sphere-1 front fills that run before any other
    /// stage, so the trash fill cannot gate these items behind themselves.
    fn initial_fill(
        &mut self,
        world: &mut World,
        progression: &mut Vec<Item>,
        starting_inventory: &[Item],
    ) -> Result<(), GenerationError> {
        match world.config.sword_placement {
            ItemPlacement::Original => {
                self.fill_item_at_location(world, progression, ItemType::ProgressiveSword, "Secret Passage")?
            }
            ItemPlacement::Early => {
                self.front_fill(world, progression, ItemType::ProgressiveSword)?
            }
            ItemPlacement::Randomized => {}
        }
        match world.config.morph_placement {
            ItemPlacement::Original => {
                self.fill_item_at_location(world, progression, ItemType::Morph, "Morphing Ball")?
            }
            ItemPlacement::Early => self.front_fill(world, progression, ItemType::Morph)?,
            ItemPlacement::Randomized => {}
        }
        match world.config.bombs_placement {
            ItemPlacement::Original => {
                self.fill_item_at_location(world, progression, ItemType::Bombs, "Bomb Torizo")?
            }
            ItemPlacement::Early => self.front_fill(world, progression, ItemType::Bombs)?,
            ItemPlacement::Randomized => {}
        }

        let front_fill = world.config.fill.front_fill.clone();
        for item_type in front_fill {
            let already_started = starting_inventory
                .iter()
                .any(|i| i.world_id == world.id && i.item_type == item_type);
            if !already_started {
                self.front_fill(world, progression, item_type)?;
            }
        }
        Ok(())
    }

    /// Places one item of the given type at a random location reachable with
    /// only what has been placed in this world so far.
    fn front_fill(
        &mut self,
        world: &mut World,
        pool: &mut Vec<Item>,
        item_type: ItemType,
    ) -> Result<(), GenerationError> {
        let pos = pool
            .iter()
            .position(|i| i.item_type == item_type && i.world_id == world.id)
            .ok_or_else(|| {
                GenerationError::Configuration(format!(
                    "tried to front fill {item_type:?}, but there is no such item in the pool"
                ))
            })?;

        let owned: Vec<ItemType> = world
            .placed_items()
            .filter(|i| i.world_id == world.id)
            .map(|i| i.item_type)
            .collect();
        let progression = Progression::from_parts(owned, [], []);
        let candidates: Vec<usize> = world
            .vacant_locations()
            .filter(|&loc| is_location_available(world, loc, &progression))
            .filter(|&loc| {
                let name = world.locations[loc].name;
                !world
                    .config
                    .location_pins
                    .iter()
                    .any(|(pinned, _)| pinned.eq_ignore_ascii_case(name))
            })
            .collect();
        let &loc = candidates.choose(self.rng).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "tried to front fill {item_type:?}, but no location was available"
            ))
        })?;

        let item = pool.remove(pos);
        world
            .assign(loc, item)
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
        debug!(
            "front-filled {:?} at {}",
            item_type, world.locations[loc].name
        );
        Ok(())
    }

    /// Honors the per-location pins and early-item requests from the
    /// world's settings. Returns the items placed here so later stages can
    /// assume them owned.
    fn apply_preferences(
        &mut self,
        world: &mut World,
        progression: &mut Vec<Item>,
        nice: &mut Vec<Item>,
        junk: &mut Vec<Item>,
    ) -> Result<Vec<Item>, GenerationError> {
        let mut placed: Vec<Item> = vec![];

        let mut pins = world.config.location_pins.clone();
        pins.shuffle(self.rng);
        for (name, pin) in pins {
            let loc = world.location_by_name(&name).ok_or_else(|| {
                GenerationError::Configuration(format!(
                    "pinned location does not exist: '{name}'"
                ))
            })?;
            if !world.is_vacant(loc) {
                debug!("pinned location {name} already has an item; skipping");
                continue;
            }
            match pin {
                LocationPin::Pool(PoolKind::Progression) => {
                    // Drawing from the opposite game minimizes the chance of
                    // picking an item that gates its own location.
                    world.locations[loc].deny_junk = true;
                    let region_game = world.regions[world.locations[loc].region_id].game;
                    let opposite = match region_game {
                        Game::Metroid => Game::Zelda,
                        Game::Zelda => Game::Metroid,
                    };
                    match progression
                        .iter()
                        .position(|i| i.item_type.game() == opposite)
                    {
                        Some(pos) => {
                            let item = progression.remove(pos);
                            world
                                .assign(loc, item)
                                .map_err(|e| GenerationError::Configuration(e.to_string()))?;
                            info!("pinned {:?} at {}", item.item_type, name);
                            placed.push(item);
                        }
                        None => debug!("no cross-game progression item left for {name}"),
                    }
                }
                LocationPin::Pool(PoolKind::Nice) => {
                    if let Some(item) = take_first(nice, world.id) {
                        world
                            .assign(loc, item)
                            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
                        placed.push(item);
                    }
                }
                LocationPin::Pool(PoolKind::Junk) => {
                    if let Some(item) = take_first(junk, world.id) {
                        world
                            .assign(loc, item)
                            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
                        placed.push(item);
                    }
                }
                LocationPin::Item(item_type) => {
                    let item =
                        self.pin_specific_item(world, loc, item_type, progression, nice, junk)?;
                    placed.push(item);
                }
            }
        }

        // Requested early items are seeded into locations reachable with
        // only the early items granted so far.
        let mut early = world.config.early_items.clone();
        early.shuffle(self.rng);
        let mut granted: Vec<ItemType> = world
            .config
            .starting_inventory
            .to_vec();
        for item_type in early {
            let in_pool = |pool: &[Item]| {
                pool.iter()
                    .any(|i| i.item_type == item_type && i.world_id == world.id)
            };
            let source: &mut Vec<Item> = if in_pool(progression) {
                progression
            } else if in_pool(nice) {
                nice
            } else if in_pool(junk) {
                junk
            } else {
                continue;
            };
            let progression_snapshot = Progression::from_parts(granted.iter().copied(), [], []);
            let candidates: Vec<usize> = world
                .vacant_locations()
                .filter(|&loc| is_location_available(world, loc, &progression_snapshot))
                .collect();
            let &loc = candidates.choose(self.rng).ok_or_else(|| {
                GenerationError::Configuration(format!(
                    "no reachable location left for early item {item_type:?}"
                ))
            })?;
            let pos = source
                .iter()
                .position(|i| i.item_type == item_type && i.world_id == world.id)
                .ok_or_else(|| {
                    GenerationError::Configuration(format!(
                        "early item {item_type:?} is not in this world's pools"
                    ))
                })?;
            let item = source.remove(pos);
            world
                .assign(loc, item)
                .map_err(|e| GenerationError::Configuration(e.to_string()))?;
            info!(
                "seeded early item {:?} at {}",
                item_type, world.locations[loc].name
            );
            granted.push(item_type);
            placed.push(item);
        }

        Ok(placed)
    }

    fn pin_specific_item(
        &mut self,
        world: &mut World,
        loc: usize,
        item_type: ItemType,
        progression: &mut Vec<Item>,
        nice: &mut Vec<Item>,
        junk: &mut Vec<Item>,
    ) -> Result<Item, GenerationError> {
        let name = world.locations[loc].name;
        let in_pool = |pool: &[Item]| {
            pool.iter()
                .any(|i| i.item_type == item_type && i.world_id == world.id)
        };
        let source: &mut Vec<Item> = if in_pool(progression) {
            // A progression item must not be required to reach the location
            // it is pinned to: the location has to open up with every other
            // item in the game but this one.
            if !is_location_available(world, loc, &everything_except(world, item_type)) {
                return Err(GenerationError::Configuration(format!(
                    "{item_type:?} was selected as the item for '{name}', but it is required \
                     to get there"
                )));
            }
            progression
        } else if in_pool(nice) {
            nice
        } else if in_pool(junk) {
            junk
        } else {
            return Err(GenerationError::Configuration(format!(
                "no {item_type:?} left in any pool for pinned location '{name}'"
            )));
        };
        let pos = source
            .iter()
            .position(|i| i.item_type == item_type && i.world_id == world.id)
            .expect("presence checked above");
        let item = source.remove(pos);
        world
            .assign(loc, item)
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
        info!("pinned {:?} at {}", item_type, name);
        Ok(item)
    }

    fn fill_item_at_location(
        &mut self,
        world: &mut World,
        pool: &mut Vec<Item>,
        item_type: ItemType,
        location_name: &str,
    ) -> Result<(), GenerationError> {
        let loc = world.location_by_name(location_name).ok_or_else(|| {
            GenerationError::Configuration(format!("no such location: '{location_name}'"))
        })?;
        let pos = pool
            .iter()
            .position(|i| i.item_type == item_type && i.world_id == world.id)
            .ok_or_else(|| {
                GenerationError::Configuration(format!(
                    "tried to place {item_type:?} at '{location_name}', but there is no such \
                     item in the pool"
                ))
            })?;
        let item = pool.remove(pos);
        world
            .assign(loc, item)
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
        debug!("manually placed {:?} at {}", item_type, location_name);
        Ok(())
    }

    /// Moves each biased item type into the tail fraction of the pool. The
    /// assumed fill consumes the pool front-to-back, so tail items are
    /// seated last, into the least constrained remaining locations.
    fn apply_item_bias(
        &mut self,
        pool: &mut Vec<Item>,
        bias: &[(ItemType, f64)],
    ) -> Result<(), GenerationError> {
        let n = pool.len();

        let mut gathered: Vec<(ItemType, f64, Vec<Item>)> = vec![];
        for &(item_type, weight) in bias {
            let items: Vec<Item> = pool.iter().filter(|i| i.item_type == item_type).copied().collect();
            gathered.push((item_type, weight, items));
        }
        pool.retain(|i| !bias.iter().any(|(t, _)| *t == i.item_type));

        gathered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        for (item_type, weight, items) in gathered {
            let tail_start = (n as f64 * (1.0 - weight)) as usize;
            if tail_start >= pool.len() {
                return Err(GenerationError::Configuration(format!(
                    "too many items are being biased, which makes the tail portion for \
                     {item_type:?} too big"
                )));
            }
            for item in items {
                let k = self.rng.gen_range(tail_start..pool.len());
                pool.insert(k, item);
            }
        }
        Ok(())
    }

    /// Claims a crystal-count-scaled share of the final tower for junk, so
    /// the tower does not soak up progression items the player only reaches
    /// at the very end.
    fn tower_junk_fill(&mut self, worlds: &mut [World], junk: &mut Vec<Item>) {
        for w in 0..worlds.len() {
            let Some(region_id) = worlds[w].region_by_name("Ganon's Tower") else {
                continue;
            };
            let mut tower_locations: Vec<LocationRef> = worlds[w].regions[region_id]
                .locations
                .iter()
                .filter(|&&loc| worlds[w].is_vacant(loc))
                .map(|&loc| (w, loc))
                .collect();
            tower_locations.shuffle(self.rng);
            let crystal_count = worlds[w].config.tower_crystal_count;
            let count = tower_locations.len() * crystal_count as usize
                / (MAX_TOWER_CRYSTALS as usize * 2);
            tower_locations.truncate(count);
            self.fast_fill(worlds, junk, &tower_locations);
        }
    }

    /// Straight zip of pool items onto whatever is still vacant, in list
    /// order, with no reachability check: these items never gate progress.
    fn fast_fill(&mut self, worlds: &mut [World], pool: &mut Vec<Item>, locations: &[LocationRef]) {
        for &(w, loc) in locations {
            if pool.is_empty() {
                break;
            }
            if worlds[w].is_vacant(loc) {
                let item = pool.remove(0);
                worlds[w]
                    .assign(loc, item)
                    .expect("vacancy checked above");
                debug!(
                    "fast-filled {:?} at {}",
                    item.item_type, worlds[w].locations[loc].name
                );
            }
        }
    }
}

fn take_first(pool: &mut Vec<Item>, world_id: WorldId) -> Option<Item> {
    let pos = pool.iter().position(|i| i.world_id == world_id)?;
    Some(pool.remove(pos))
}

/// A progression owning every item in the game except the named type, with
/// every reward obtained and every boss defeated. Used to ask "is this item
/// the only way to reach a location".
fn everything_except(world: &World, excluded: ItemType) -> Progression {
    use strum::IntoEnumIterator;

    let mut everything = Progression::new();
    for _ in 0..4 {
        for t in ItemType::iter() {
            if t != excluded {
                everything.add(t);
            }
        }
    }
    for region in &world.regions {
        if let Some(slot) = &region.reward {
            if let Some(r) = slot.reward {
                everything.add_reward(r);
            }
        }
        if let Some(slot) = &region.boss {
            everything.add_boss(slot.boss);
        }
    }
    everything
}

/// First location in `locations` that can accept `item` under the trial
/// inventory. Each candidate must pass the local placement rules in its own
/// world's view, and the same location in the item's home world must open up
/// once that world also has the item (multiworld soft-lock guard).
fn find_fillable(
    worlds: &[World],
    locations: &[LocationRef],
    item: Item,
    items: &[Item],
    rewards: &[Reward],
    bosses: &[Boss],
) -> Option<LocationRef> {
    let progressions: Vec<Progression> = worlds
        .iter()
        .map(|w| Progression::for_world(w.id, items, rewards, bosses))
        .collect();
    let mut item_world_progression =
        Progression::for_world(item.world_id, items, rewards, bosses);
    item_world_progression.add(item.item_type);

    locations
        .iter()
        .copied()
        .find(|&(w, loc)| {
            worlds[w].is_vacant(loc)
                && can_hold(&worlds[w], loc, item, &progressions[w])
                && is_location_available(&worlds[item.world_id], loc, &item_world_progression)
        })
}

/// Fixed-point closure: starting from the assumed items, repeatedly collect
/// everything reachable among the already-filled locations. Rewards and
/// bosses are intentionally not folded in here; the caller derives them from
/// the closed item set afterwards.
pub fn collect_items(
    worlds: &[World],
    world_scope: &[WorldId],
    base: Vec<Item>,
) -> Vec<Item> {
    let mut assumed = base;
    let mut remaining: Vec<LocationRef> = world_scope
        .iter()
        .flat_map(|&w| worlds[w].filled_locations().map(move |loc| (w, loc)))
        .collect();

    loop {
        let progressions: Vec<Progression> = worlds
            .iter()
            .map(|w| Progression::for_world(w.id, &assumed, &[], &[]))
            .collect();
        let mut found: Vec<Item> = vec![];
        remaining.retain(|&(w, loc)| {
            if is_location_available(&worlds[w], loc, &progressions[w]) {
                found.push(worlds[w].item_at(loc).expect("location is filled"));
                false
            } else {
                true
            }
        });
        if found.is_empty() {
            break;
        }
        assumed.extend(found);
    }
    assumed
}

/// Rewards whose regions are completable under the given item collection.
pub fn collect_rewards(worlds: &[World], world_scope: &[WorldId], items: &[Item]) -> Vec<Reward> {
    let mut out = vec![];
    for &w in world_scope {
        let world = &worlds[w];
        let progression = Progression::for_world(w, items, &[], &[]);
        out.extend(
            world
                .rewards()
                .into_iter()
                .filter(|r| can_complete_reward(world, r.region_id, &progression)),
        );
    }
    out
}

/// Bosses defeatable under the given item collection and rewards.
pub fn collect_bosses(
    worlds: &[World],
    world_scope: &[WorldId],
    items: &[Item],
    rewards: &[Reward],
) -> Vec<Boss> {
    let mut out = vec![];
    for &w in world_scope {
        let world = &worlds[w];
        let progression = Progression::for_world(w, items, rewards, &[]);
        out.extend(
            world
                .bosses()
                .into_iter()
                .filter(|b| can_defeat_boss(world, b.region_id, &progression)),
        );
    }
    out
}

/// Stable reorder of the candidate list by `index - weight`: positively
/// weighted locations drift toward the front and negatively weighted ones
/// toward the back.
pub fn apply_location_weighting(worlds: &[World], locations: &[LocationRef]) -> Vec<LocationRef> {
    let mut keyed: Vec<(i64, LocationRef)> = locations
        .iter()
        .enumerate()
        .map(|(index, &(w, loc))| {
            (
                index as i64 - worlds[w].locations[loc].weight as i64,
                (w, loc),
            )
        })
        .collect();
    keyed.sort_by_key(|&(key, _)| key);
    keyed.into_iter().map(|(_, loc)| loc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use twinrando_game::layout::WorldBuilder;
    use twinrando_game::Requirement;

    #[test]
    fn item_bias_moves_biased_types_into_the_tail() {
        let config = Config::default();
        let cancel = CancelToken::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut filler = Filler::new(&config, &mut rng, &cancel);

        let mut pool: Vec<Item> = std::iter::repeat(Item::new(ItemType::Lamp, 0))
            .take(40)
            .collect();
        pool.insert(3, Item::new(ItemType::MoonPearl, 0));
        pool.insert(10, Item::new(ItemType::Morph, 0));
        let n = pool.len();

        filler.apply_item_bias(&mut pool, ITEM_BIAS).unwrap();
        assert_eq!(pool.len(), n);

        let pearl = pool
            .iter()
            .position(|i| i.item_type == ItemType::MoonPearl)
            .unwrap();
        let morph = pool
            .iter()
            .position(|i| i.item_type == ItemType::Morph)
            .unwrap();
        assert!(pearl >= (n as f64 * 0.60) as usize, "pearl at {pearl}");
        assert!(morph >= (n as f64 * 0.80) as usize, "morph at {morph}");
    }

    #[test]
    fn location_weighting_is_a_stable_reorder_by_weight() {
        let mut b = WorldBuilder::new();
        let region = b.region("Testing Grounds", Game::Zelda, Requirement::Free);
        b.weighted_location(region, "Deprioritized", Requirement::Free, -10);
        b.location(region, "Plain A", Requirement::Free);
        b.location(region, "Plain B", Requirement::Free);
        b.weighted_location(region, "Prioritized", Requirement::Free, 10);
        let (regions, locations) = b.into_parts();
        let worlds = vec![World::from_parts(Config::default(), 0, regions, locations)];

        let input: Vec<LocationRef> = (0..4).map(|loc| (0, loc)).collect();
        let ordered = apply_location_weighting(&worlds, &input);
        let names: Vec<&str> = ordered
            .iter()
            .map(|&(_, loc)| worlds[0].locations[loc].name)
            .collect();
        assert_eq!(
            names,
            vec!["Prioritized", "Plain A", "Plain B", "Deprioritized"]
        );
    }
}
