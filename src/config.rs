//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

use crate::recipes::RecipeStore;
use crate::server::DEFAULT_BODY_LIMIT;

/// In-memory recipe service.
///
/// Every flag can also be set through the environment variable named next
/// to it. Log verbosity follows `RUST_LOG`.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "RECIPE_BOX_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Largest request body accepted, in bytes. Longer bodies get `413`.
    #[arg(long, env = "RECIPE_BOX_BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Start with an empty collection instead of the two sample recipes.
    #[arg(long, env = "RECIPE_BOX_NO_SAMPLES")]
    pub no_samples: bool,
}

impl Config {
    /// Parses `std::env::args` and the environment, exiting on bad input.
    pub fn from_env() -> Self {
        Self::parse()
    }

    /// Builds the store this configuration asks for.
    pub fn store(&self) -> RecipeStore {
        if self.no_samples {
            RecipeStore::new()
        } else {
            RecipeStore::with_samples()
        }
    }
}
