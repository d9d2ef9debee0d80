#![allow(clippy::needless_return)]

//! This crate is a collection of small numerical exercises and a toy
//! stochastic simulation, each usable as a library routine or through a thin
//! executable under `bin/`.
//!
//! - [`euler`]: Project Euler #1 and #2, brute force against closed forms
//! - [`langevin`]: Euler-Maruyama integration of a particle in a double well
//!   and its rate of crossing the barrier
//! - [`puzzles`]: N-queens and ID check digits
//! - [`graph`]: faces of a plane graph

pub mod error;
pub mod utils;

pub mod euler;
pub mod langevin;
pub mod puzzles;
pub mod graph;

#[cfg(feature = "config")]
pub mod config;

/// Install the `tracing` subscriber used by the executables: human-readable
/// output on stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Stdout is left for results only.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // a subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
