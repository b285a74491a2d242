//! Command-line and environment configuration
//!
//! World constants come from `WorldParams::default()`; the flags below
//! override them. Each flag can also be set through its environment variable.

use clap::Parser;
use particle_physics::WorldParams;
use std::num::NonZeroUsize;

/// Elevator particle box
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about)]
pub struct Args {
    /// Seed for the initial layout (random if unset)
    #[arg(long, env = "PARTICLES_SEED")]
    pub seed: Option<u64>,

    /// Number of particles
    #[arg(long, env = "PARTICLES_COUNT")]
    pub count: Option<NonZeroUsize>,
}

impl Args {
    /// Default world with the overrides applied
    pub fn params(&self) -> WorldParams {
        let params = WorldParams::default();
        match self.count {
            Some(count) => params.with_particle_count(count.get()),
            None => params,
        }
    }
}
