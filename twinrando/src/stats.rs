//! Batch seed statistics. Each worker generates a full seed with its own
//! world and RNG state, so the only shared state is the accumulator:
//! atomic counters plus a mutex-guarded item/location histogram. A failed
//! worker records its failure kind and never disturbs its siblings.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hashbrown::HashMap;
use rayon::prelude::*;
use twinrando_game::{Config, Game, ItemType};

use crate::randomize::{generate_seed, SeedData};
use crate::{CancelToken, GenerationError};

#[derive(Debug, Default)]
pub struct StatsReport {
    pub requested: usize,
    pub generated: usize,
    pub unsatisfiable: usize,
    pub configuration_errors: usize,
    /// A scam item at the Shaktool dig site.
    pub shaktool_scams: usize,
    /// A scam item from King Zora's five-hundred-rupee sale.
    pub zora_scams: usize,
    /// The morph ball sitting at its original location.
    pub vanilla_morph: usize,
    /// A Metroid item in the tower's Moldorm chest.
    pub tower_moldorm_metroid: usize,
    /// How often each (location, item) pairing occurred in the local world.
    pub item_location_counts: HashMap<(String, ItemType), usize>,
}

/// Generates `num_seeds` seeds derived from `base_seed` in parallel and
/// aggregates placement statistics for the local world.
pub fn generate_stats(
    config: &Config,
    num_seeds: usize,
    base_seed: usize,
    cancel: &CancelToken,
) -> StatsReport {
    let generated = AtomicUsize::new(0);
    let unsatisfiable = AtomicUsize::new(0);
    let configuration_errors = AtomicUsize::new(0);
    let shaktool_scams = AtomicUsize::new(0);
    let zora_scams = AtomicUsize::new(0);
    let vanilla_morph = AtomicUsize::new(0);
    let tower_moldorm_metroid = AtomicUsize::new(0);
    let histogram: Mutex<HashMap<(String, ItemType), usize>> = Mutex::new(HashMap::new());

    (0..num_seeds).into_par_iter().for_each(|i| {
        if cancel.is_cancelled() {
            return;
        }
        let seed = base_seed.wrapping_add(i);
        match generate_seed(&[config.clone()], seed, cancel) {
            Ok(data) => {
                generated.fetch_add(1, Ordering::Relaxed);
                gather(
                    &data,
                    &shaktool_scams,
                    &zora_scams,
                    &vanilla_morph,
                    &tower_moldorm_metroid,
                    &histogram,
                );
            }
            Err(GenerationError::Unsatisfiable(_)) => {
                unsatisfiable.fetch_add(1, Ordering::Relaxed);
            }
            Err(GenerationError::Configuration(_)) => {
                configuration_errors.fetch_add(1, Ordering::Relaxed);
            }
            Err(GenerationError::Cancelled) => {}
        }
    });

    StatsReport {
        requested: num_seeds,
        generated: generated.into_inner(),
        unsatisfiable: unsatisfiable.into_inner(),
        configuration_errors: configuration_errors.into_inner(),
        shaktool_scams: shaktool_scams.into_inner(),
        zora_scams: zora_scams.into_inner(),
        vanilla_morph: vanilla_morph.into_inner(),
        tower_moldorm_metroid: tower_moldorm_metroid.into_inner(),
        item_location_counts: histogram.into_inner().unwrap_or_default(),
    }
}

fn gather(
    data: &SeedData,
    shaktool_scams: &AtomicUsize,
    zora_scams: &AtomicUsize,
    vanilla_morph: &AtomicUsize,
    tower_moldorm_metroid: &AtomicUsize,
    histogram: &Mutex<HashMap<(String, ItemType), usize>>,
) {
    let world = &data.worlds[0];
    let item_type_at = |name: &str| -> Option<ItemType> {
        let loc = world.location_by_name(name)?;
        Some(world.item_at(loc)?.item_type)
    };

    if item_type_at("Shaktool Item").is_some_and(|t| t.is_scam()) {
        shaktool_scams.fetch_add(1, Ordering::Relaxed);
    }
    if item_type_at("King Zora").is_some_and(|t| t.is_scam()) {
        zora_scams.fetch_add(1, Ordering::Relaxed);
    }
    if item_type_at("Morphing Ball") == Some(ItemType::Morph) {
        vanilla_morph.fetch_add(1, Ordering::Relaxed);
    }
    if item_type_at("Moldorm Chest").is_some_and(|t| t.game() == Game::Metroid) {
        tower_moldorm_metroid.fetch_add(1, Ordering::Relaxed);
    }

    let mut histogram = match histogram.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    for loc in world.filled_locations() {
        let item = world.item_at(loc).expect("location is filled");
        *histogram
            .entry((world.locations[loc].name.to_string(), item.item_type))
            .or_insert(0) += 1;
    }
}

impl StatsReport {
    /// Plain-text summary with the most common item for each location.
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "Seeds requested:          {}", self.requested);
        let _ = writeln!(out, "Successfully generated:   {}", self.generated);
        let _ = writeln!(out, "Unsatisfiable:            {}", self.unsatisfiable);
        let _ = writeln!(out, "Configuration errors:     {}", self.configuration_errors);
        let _ = writeln!(out, "Shaktool betrays you:     {}", self.shaktool_scams);
        let _ = writeln!(out, "Zora is a scam:           {}", self.zora_scams);
        let _ = writeln!(out, "Morph in original spot:   {}", self.vanilla_morph);
        let _ = writeln!(out, "Metroid item at Moldorm:  {}", self.tower_moldorm_metroid);

        let mut by_location: HashMap<&str, (ItemType, usize)> = HashMap::new();
        for ((location, item), &count) in &self.item_location_counts {
            let entry = by_location
                .entry(location.as_str())
                .or_insert((*item, count));
            if count > entry.1 {
                *entry = (*item, count);
            }
        }
        let mut rows: Vec<(&str, ItemType, usize)> = by_location
            .into_iter()
            .map(|(location, (item, count))| (location, item, count))
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(b.0)));
        if !rows.is_empty() {
            let _ = writeln!(out, "\nMost common placements:");
            for (location, item, count) in rows.into_iter().take(20) {
                let _ = writeln!(out, "  {location}: {item} ({count})");
            }
        }
        out
    }
}
