//! Seed orchestration: builds the worlds, runs the fill stages, simulates
//! the playthrough, validates the result against the requested preferences,
//! and retries unsatisfiable attempts with fresh derived seeds up to a
//! bounded budget.

use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use twinrando_game::{Config, LocationPin, PoolKind, World};

use crate::fill::Filler;
use crate::playthrough::Playthrough;
use crate::spoiler_log::SpoilerLog;
use crate::{CancelToken, GenerationError};

/// How many whole-generation attempts to make before giving up on the
/// requested configuration.
pub const GENERATION_ATTEMPTS: usize = 5;

/// Requested early items must land within this many spheres.
const EARLY_SPHERE_LIMIT: usize = 2;

/// A finished seed: the filled worlds, the simulated playthrough, and the
/// spoiler account of both.
#[derive(Debug)]
pub struct SeedData {
    pub seed: usize,
    pub worlds: Vec<World>,
    pub playthrough: Playthrough,
    pub spoiler: SpoilerLog,
}

fn seeded_rng(seed: usize) -> StdRng {
    let mut rng_seed = [0u8; 32];
    rng_seed[..8].copy_from_slice(&(seed as u64).to_le_bytes());
    StdRng::from_seed(rng_seed)
}

/// Runs one complete generation attempt. Deterministic: the same configs
/// and seed produce an identical assignment and playthrough.
pub fn generate_seed(
    configs: &[Config],
    seed: usize,
    cancel: &CancelToken,
) -> Result<SeedData, GenerationError> {
    if configs.is_empty() {
        return Err(GenerationError::Configuration(
            "at least one player config is required".to_string(),
        ));
    }
    info!("attempting to generate seed {seed}");

    let mut rng = seeded_rng(seed);
    let mut worlds: Vec<World> = configs
        .iter()
        .enumerate()
        .map(|(id, config)| World::new(config.clone(), id))
        .collect();
    let primary = worlds[0].config.clone();

    Filler::new(&primary, &mut rng, cancel).fill(&mut worlds)?;

    let playthrough = Playthrough::generate(&worlds)?;
    let spoiler = SpoilerLog::new(seed, &worlds, &playthrough);
    info!(
        "generated seed {seed} with {} spheres",
        playthrough.spheres.len()
    );
    Ok(SeedData {
        seed,
        worlds,
        playthrough,
        spoiler,
    })
}

/// Bounded retry combinator around [`generate_seed`]: unsatisfiable
/// attempts and preference-validation failures consume an attempt and roll
/// a fresh derived seed; configuration errors surface immediately.
pub fn generate_with_retries(
    configs: &[Config],
    seed: usize,
    cancel: &CancelToken,
) -> Result<SeedData, GenerationError> {
    let mut seed_rng = seeded_rng(seed);
    for attempt in 0..GENERATION_ATTEMPTS {
        let attempt_seed = if attempt == 0 {
            seed
        } else {
            seed_rng.next_u64() as usize
        };
        match generate_seed(configs, attempt_seed, cancel) {
            Ok(data) => {
                if validate_seed(&data) {
                    return Ok(data);
                }
                info!("seed {attempt_seed} did not match the requested preferences; retrying");
            }
            Err(GenerationError::Unsatisfiable(message)) => {
                info!("seed {attempt_seed} was unsatisfiable: {message}");
            }
            Err(other) => return Err(other),
        }
    }
    Err(GenerationError::Unsatisfiable(format!(
        "no valid seed produced after {GENERATION_ATTEMPTS} attempts"
    )))
}

/// Confirms the finished seed honors the per-location pins and that every
/// requested early item shows up within the first few spheres. A pure
/// check; failures are reported to the caller as `false`, never as errors.
pub fn validate_seed(data: &SeedData) -> bool {
    for world in &data.worlds {
        for (name, pin) in &world.config.location_pins {
            let Some(loc) = world.location_by_name(name) else {
                return false;
            };
            let Some(item) = world.item_at(loc) else {
                return false;
            };
            let matches = match pin {
                LocationPin::Item(t) => item.item_type == *t,
                LocationPin::Pool(PoolKind::Progression) => {
                    let owner = &data.worlds[item.world_id];
                    item.item_type.is_progression(&owner.config)
                }
                LocationPin::Pool(PoolKind::Nice) => item.item_type.is_nice(),
                LocationPin::Pool(PoolKind::Junk) => item.item_type.is_junk(),
            };
            if !matches {
                info!(
                    "location '{}' did not receive the pinned {:?}; got {:?}",
                    name, pin, item.item_type
                );
                return false;
            }
        }

        for &item_type in &world.config.early_items {
            match data.playthrough.sphere_of(world.id, item_type) {
                Some(sphere) if sphere <= EARLY_SPHERE_LIMIT => {}
                sphere => {
                    info!(
                        "early item {:?} did not show up early as expected (sphere {:?})",
                        item_type, sphere
                    );
                    return false;
                }
            }
        }
    }
    true
}
