//! Crossing rate of a particle in a double-well potential under underdamped
//! Langevin dynamics.
//!
//! With no arguments this reproduces the reference run of 5e8 steps, streaming
//! the trajectory instead of storing it.

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use scratchpad::{
    config::{ self, Verify },
    init_logging,
    langevin::{ self, DoubleWell, LangevinParams, Trajectory },
    println_flush,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "particle",
    about = "Euler-Maruyama integration of a particle in a double well; prints the barrier crossing rate",
)]
struct Cli {
    /// Read parameters from a TOML, JSON, or YAML file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the parameters actually used to this file and continue.
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Number of samples, including the initial state.
    #[arg(long, short = 'n')]
    steps: Option<usize>,

    /// Time step.
    #[arg(long)]
    dt: Option<f64>,

    /// Inverse temperature.
    #[arg(long)]
    beta: Option<f64>,

    /// Friction coefficient.
    #[arg(long)]
    gamma: Option<f64>,

    /// Initial position.
    #[arg(long, allow_negative_numbers = true)]
    x0: Option<f64>,

    /// Initial velocity.
    #[arg(long, allow_negative_numbers = true)]
    v0: Option<f64>,

    /// Random seed; drawn from system entropy if omitted.
    #[arg(long, short)]
    seed: Option<u64>,

    /// Store the full trajectory in memory before computing the rate.
    #[arg(long)]
    store: bool,

    /// Write the stored `[steps, 2]` trajectory of `(x, v)` to a .npy file
    /// (implies --store).
    #[cfg(feature = "npy")]
    #[arg(long)]
    save: Option<PathBuf>,

    /// Instead of a single run, print `dt rate` for each of these time steps at
    /// fixed total simulated time.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    sweep: Option<Vec<f64>>,
}

impl Cli {
    /// Parameters from `--config` (or the defaults) with any explicit flags
    /// applied on top, verified after merging.
    fn params(&self) -> Result<LangevinParams> {
        let base: LangevinParams = match &self.config {
            Some(path) => config::load(path)?,
            None => LangevinParams::default(),
        };
        let p = self.apply_overrides(base);
        p.verify()?;
        return Ok(p);
    }

    fn apply_overrides(&self, mut p: LangevinParams) -> LangevinParams {
        if let Some(steps) = self.steps { p.steps = steps; }
        if let Some(dt) = self.dt { p.dt = dt; }
        if let Some(beta) = self.beta { p.beta = beta; }
        if let Some(gamma) = self.gamma { p.gamma = gamma; }
        if let Some(x0) = self.x0 { p.x0 = x0; }
        if let Some(v0) = self.v0 { p.v0 = v0; }
        return p;
    }

    #[cfg(feature = "npy")]
    fn store(&self) -> bool { self.store || self.save.is_some() }

    #[cfg(not(feature = "npy"))]
    fn store(&self) -> bool { self.store }
}

#[cfg(feature = "npy")]
fn save(cli: &Cli, traj: &Trajectory) -> Result<()> {
    if let Some(path) = &cli.save {
        ndarray_npy::write_npy(path, &traj.as_array2())?;
        info!(file = %path.display(), "saved trajectory");
    }
    return Ok(());
}

#[cfg(not(feature = "npy"))]
fn save(_cli: &Cli, _traj: &Trajectory) -> Result<()> { Ok(()) }

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let params = cli.params()?;
    if let Some(path) = &cli.dump_config {
        config::write(path, &params)?;
    }
    let (seed, mut rng) = langevin::make_rng(cli.seed);
    info!(seed, ?params, "starting");

    if let Some(dts) = &cli.sweep {
        for (dt, rate) in langevin::sweep_dt(&params, &DoubleWell, dts, seed)? {
            println_flush!("{} {}", dt, rate);
        }
        return Ok(());
    }

    let rate
        = if cli.store() {
            let traj = langevin::integrate(&params, &DoubleWell, &mut rng)?;
            save(&cli, &traj)?;
            langevin::crossing_rate(&traj)
        } else {
            langevin::crossing_rate_streaming(&params, &DoubleWell, &mut rng)?
        };
    println_flush!("{}", rate);
    return Ok(());
}
