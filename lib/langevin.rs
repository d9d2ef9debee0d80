//! Underdamped Langevin dynamics of a single particle in one dimension,
//! integrated with the explicit Euler-Maruyama scheme, and the rate at which
//! the particle crosses the origin.
//!
//! The particle (unit mass) obeys
//! ```math
//! \dot{x} = v
//!     ,~ \dot{v} = -U'(x) - \gamma v + \sqrt{2 \gamma / \beta} \, \xi(t)
//! ```
//! for white noise $`\xi`$, which is discretized with time step $`\Delta t`$ as
//! ```math
//! x_{i + 1} = x_i + v_i \Delta t
//!     ,~ v_{i + 1} = v_i - U'(x_i) \Delta t - \gamma v_i \Delta t
//!         + \sqrt{2 \gamma \Delta t / \beta} \, \eta_i
//! ```
//! with $`\eta_i \sim \mathcal{N}(0, 1)`$. Both updates use the old state.
//!
//! The crossing rate over $`N`$ samples is
//! ```math
//! \nu = \frac{1}{(N - 1) \Delta t}
//!     \sum_{i = 0}^{N - 2} \left| \theta(x_{i + 1}) - \theta(x_i) \right|
//! ```
//! where $`\theta(x) = 1`$ for $`x > 0`$ and zero otherwise.
//!
//! Runs are reproducible: all randomness comes from the generator passed in,
//! and one normal variate is drawn per step.

use ndarray as nd;
use rand::{
    prelude as rnd,
    Rng,
    SeedableRng,
};
use rand_distr::{
    Distribution,
    StandardNormal,
};
use tracing::{
    debug,
    info,
};

crate::mkerr!(
    /// Errors arising from invalid simulation parameters.
    LangevinError("langevin") -> LangevinResult : {
        BadBeta => "inverse temperature must be positive",
        BadTimestep => "time step must be positive",
        BadFriction => "friction coefficient must be non-negative",
        TooFewSteps => "a trajectory needs at least two time steps",
        NonFinite => "parameters must be finite",
        LengthMismatch => "position and velocity arrays must have equal lengths",
        TooManySteps => "number of time steps doesn't fit in a usize",
    }
);

/// A one-dimensional potential $`U(x)`$.
pub trait Potential {
    /// $`U(x)`$
    fn energy(&self, x: f64) -> f64;

    /// $`U'(x)`$
    fn gradient(&self, x: f64) -> f64;

    /// The force $`-U'(x)`$.
    fn force(&self, x: f64) -> f64 { -self.gradient(x) }
}

/// The symmetric quartic double well $`U(x) = x^4 / 4 - x^2 / 2`$, with minima
/// at $`x = \pm 1`$ and a barrier of height $`1/4`$ at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DoubleWell;

impl Potential for DoubleWell {
    fn energy(&self, x: f64) -> f64 {
        let x2 = x * x;
        return 0.25 * x2 * x2 - 0.5 * x2;
    }

    fn gradient(&self, x: f64) -> f64 { x * x * x - x }
}

/// Simulation parameters.
///
/// Defaults reproduce the reference run: $`5 \times 10^8`$ steps of
/// $`\Delta t = 10^{-3}`$ at $`\beta = 20`$, $`\gamma = 10^{-3}`$, starting at
/// rest at the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct LangevinParams {
    /// Number of samples in the trajectory, including the initial state.
    pub steps: usize,
    /// Inverse temperature.
    pub beta: f64,
    /// Time step.
    pub dt: f64,
    /// Friction coefficient.
    pub gamma: f64,
    /// Initial position.
    pub x0: f64,
    /// Initial velocity.
    pub v0: f64,
}

impl Default for LangevinParams {
    fn default() -> Self {
        return Self {
            steps: 500_000_000,
            beta: 20.0,
            dt: 0.001,
            gamma: 0.001,
            x0: 0.0,
            v0: 0.0,
        };
    }
}

impl LangevinParams {
    /// Check that all parameters describe a well-posed run.
    pub fn validate(&self) -> LangevinResult<()> {
        let finite = [self.beta, self.dt, self.gamma, self.x0, self.v0]
            .iter()
            .all(|p| p.is_finite());
        if !finite {
            return Err(LangevinError::NonFinite);
        }
        if self.beta <= 0.0 {
            return Err(LangevinError::BadBeta);
        }
        if self.dt <= 0.0 {
            return Err(LangevinError::BadTimestep);
        }
        if self.gamma < 0.0 {
            return Err(LangevinError::BadFriction);
        }
        if self.steps < 2 {
            return Err(LangevinError::TooFewSteps);
        }
        return Ok(());
    }

    /// Standard deviation of the velocity kick per step,
    /// $`\sqrt{2 \gamma \Delta t / \beta}`$.
    pub fn noise_amplitude(&self) -> f64 {
        return (2.0 / self.beta * self.dt * self.gamma).sqrt();
    }

    /// Simulated time spanned by the trajectory, $`(N - 1) \Delta t`$.
    pub fn total_time(&self) -> f64 {
        return self.dt * self.steps.saturating_sub(1) as f64;
    }

    /// Copy with time step `dt`, adjusting the number of steps to keep
    /// [`total_time`][Self::total_time] (approximately) fixed.
    pub fn with_timestep(&self, dt: f64) -> LangevinResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(LangevinError::BadTimestep);
        }
        let intervals = (self.total_time() / dt).round();
        if !intervals.is_finite() || intervals >= usize::MAX as f64 {
            return Err(LangevinError::TooManySteps);
        }
        let steps = (intervals as usize).checked_add(1)
            .ok_or(LangevinError::TooManySteps)?;
        return Ok(Self { dt, steps, ..*self });
    }
}

/// Create a seeded generator. If no seed is given, one is drawn from the
/// thread-local generator; the seed actually used is returned so the run can be
/// repeated.
pub fn make_rng(seed: Option<u64>) -> (u64, rnd::StdRng) {
    let seed = seed.unwrap_or_else(|| rnd::thread_rng().gen());
    return (seed, rnd::StdRng::seed_from_u64(seed));
}

/// An iterator over the `(x, v)` states of a trajectory, beginning with the
/// initial state and generating each next state on demand.
pub struct States<'a, P, R>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{
    potential: &'a P,
    rng: &'a mut R,
    dt: f64,
    gamma: f64,
    dw: f64,
    x: f64,
    v: f64,
    remaining: usize,
}

impl<'a, P, R> States<'a, P, R>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(params: &LangevinParams, potential: &'a P, rng: &'a mut R)
        -> LangevinResult<Self>
    {
        params.validate()?;
        return Ok(Self {
            potential,
            rng,
            dt: params.dt,
            gamma: params.gamma,
            dw: params.noise_amplitude(),
            x: params.x0,
            v: params.v0,
            remaining: params.steps,
        });
    }

    fn advance(&mut self) {
        let eta: f64 = StandardNormal.sample(&mut *self.rng);
        let x = self.x + self.v * self.dt;
        let v = self.v
            - self.potential.gradient(self.x) * self.dt
            - self.gamma * self.v * self.dt
            + eta * self.dw;
        self.x = x;
        self.v = v;
    }
}

impl<'a, P, R> Iterator for States<'a, P, R>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{
    type Item = (f64, f64);

    fn next(&mut self) -> Option<(f64, f64)> {
        if self.remaining == 0 {
            return None;
        }
        let out = (self.x, self.v);
        self.remaining -= 1;
        // no variate is drawn for a state that will never be yielded
        if self.remaining > 0 {
            self.advance();
        }
        return Some(out);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<'a, P, R> ExactSizeIterator for States<'a, P, R>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{ }

/// Positions and velocities sampled at every time step.
///
/// Always holds at least two samples; built only by [`integrate`] or
/// [`Trajectory::from_arrays`].
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    x: nd::Array1<f64>,
    v: nd::Array1<f64>,
    dt: f64,
}

fn is_positive(x: f64) -> bool { x > 0.0 }

impl Trajectory {
    /// Wrap existing arrays, which must have equal lengths of at least two.
    pub fn from_arrays(x: nd::Array1<f64>, v: nd::Array1<f64>, dt: f64)
        -> LangevinResult<Self>
    {
        if x.len() != v.len() {
            return Err(LangevinError::LengthMismatch);
        }
        if x.len() < 2 {
            return Err(LangevinError::TooFewSteps);
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(LangevinError::BadTimestep);
        }
        return Ok(Self { x, v, dt });
    }

    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    pub fn v(&self) -> &nd::Array1<f64> { &self.v }

    pub fn dt(&self) -> f64 { self.dt }

    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Sample times $`i \Delta t`$.
    pub fn times(&self) -> nd::Array1<f64> {
        return nd::Array1::range(0.0, self.len() as f64, 1.0) * self.dt;
    }

    /// Total energy $`v^2 / 2 + U(x)`$ at every sample.
    pub fn energy<P>(&self, potential: &P) -> nd::Array1<f64>
    where P: Potential + ?Sized
    {
        return self.x.iter().zip(self.v.iter())
            .map(|(x, v)| 0.5 * v * v + potential.energy(*x))
            .collect();
    }

    /// Number of sign changes of $`\theta(x)`$ between consecutive samples.
    pub fn crossings(&self) -> usize {
        return self.x.iter().zip(self.x.iter().skip(1))
            .filter(|(xk, xkp1)| is_positive(**xk) != is_positive(**xkp1))
            .count();
    }

    /// Stack into a single `[N, 2]` array of `(x, v)` rows.
    pub fn as_array2(&self) -> nd::Array2<f64> {
        let mut out: nd::Array2<f64> = nd::Array2::zeros((self.len(), 2));
        out.column_mut(0).assign(&self.x);
        out.column_mut(1).assign(&self.v);
        return out;
    }
}

fn rate_from_count(crossings: usize, samples: usize, dt: f64) -> f64 {
    return crossings as f64 / (dt * (samples - 1) as f64);
}

/// Integrate the full trajectory, storing every state.
///
/// Memory use is two `f64`s per step; for very long runs prefer
/// [`crossing_rate_streaming`].
pub fn integrate<P, R>(params: &LangevinParams, potential: &P, rng: &mut R)
    -> LangevinResult<Trajectory>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{
    let states = States::new(params, potential, rng)?;
    debug!(steps = params.steps, dt = params.dt, "integrating trajectory");
    let mut x: nd::Array1<f64> = nd::Array1::zeros(params.steps);
    let mut v: nd::Array1<f64> = nd::Array1::zeros(params.steps);
    states.enumerate()
        .for_each(|(k, (xk, vk))| {
            x[k] = xk;
            v[k] = vk;
        });
    return Ok(Trajectory { x, v, dt: params.dt });
}

/// Crossing rate of a stored trajectory.
pub fn crossing_rate(traj: &Trajectory) -> f64 {
    return rate_from_count(traj.crossings(), traj.len(), traj.dt);
}

/// Compute the crossing rate without storing the trajectory.
///
/// Given a generator in the same state, the result is bit-for-bit equal to
/// `crossing_rate(&integrate(params, potential, rng)?)`.
pub fn crossing_rate_streaming<P, R>(
    params: &LangevinParams,
    potential: &P,
    rng: &mut R,
) -> LangevinResult<f64>
where
    P: Potential + ?Sized,
    R: Rng + ?Sized,
{
    let mut states = States::new(params, potential, rng)?;
    debug!(steps = params.steps, dt = params.dt, "streaming trajectory");
    let mut crossings: usize = 0;
    // validation guarantees at least two states
    let mut above = states.next().map(|(x, _)| is_positive(x)).unwrap_or(false);
    for (x, _) in states {
        let now = is_positive(x);
        if now != above {
            crossings += 1;
        }
        above = now;
    }
    let rate = rate_from_count(crossings, params.steps, params.dt);
    info!(crossings, rate, "finished run");
    return Ok(rate);
}

/// Compute the crossing rate at each of several time steps, holding the total
/// simulated time of `params` fixed and seeding a fresh generator with `seed`
/// for every run.
///
/// Returns `(dt, rate)` pairs in the order of `dts`.
pub fn sweep_dt<P>(
    params: &LangevinParams,
    potential: &P,
    dts: &[f64],
    seed: u64,
) -> LangevinResult<Vec<(f64, f64)>>
where P: Potential + ?Sized
{
    return dts.iter()
        .map(|dt| {
            let p = params.with_timestep(*dt)?;
            let (_, mut rng) = make_rng(Some(seed));
            crossing_rate_streaming(&p, potential, &mut rng).map(|nu| (*dt, nu))
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn short(steps: usize) -> LangevinParams {
        return LangevinParams { steps, gamma: 0.5, beta: 2.0, ..Default::default() };
    }

    #[test]
    fn double_well_shape() {
        let u = DoubleWell;
        assert_eq!(u.energy(0.0), 0.0);
        assert_eq!(u.energy(1.0), -0.25);
        assert_eq!(u.gradient(1.0), 0.0);
        assert_eq!(u.gradient(-1.0), 0.0);
        assert_eq!(u.gradient(2.0), 6.0);
        assert_eq!(u.force(2.0), -6.0);
    }

    #[test]
    fn default_noise_amplitude() {
        let p = LangevinParams::default();
        assert!((p.noise_amplitude() - 1e-7_f64.sqrt()).abs() < 1e-15);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn invalid_params() {
        let p = LangevinParams::default();
        assert_eq!(
            LangevinParams { beta: 0.0, ..p }.validate(),
            Err(LangevinError::BadBeta),
        );
        assert_eq!(
            LangevinParams { dt: -1.0, ..p }.validate(),
            Err(LangevinError::BadTimestep),
        );
        assert_eq!(
            LangevinParams { gamma: -0.1, ..p }.validate(),
            Err(LangevinError::BadFriction),
        );
        assert_eq!(
            LangevinParams { steps: 1, ..p }.validate(),
            Err(LangevinError::TooFewSteps),
        );
        assert_eq!(
            LangevinParams { x0: f64::NAN, ..p }.validate(),
            Err(LangevinError::NonFinite),
        );
        let (_, mut rng) = make_rng(Some(0));
        assert!(integrate(&LangevinParams { steps: 0, ..p }, &DoubleWell, &mut rng).is_err());
    }

    #[test]
    fn counts_crossings_of_origin() {
        // theta: 0 1 1 0 0 1 -> three changes; zero itself counts as "not above"
        let x = array![-1.0, 1.0, 2.0, -1.0, 0.0, 1.0];
        let v = nd::Array1::zeros(6);
        let traj = Trajectory::from_arrays(x, v, 0.5).unwrap();
        assert_eq!(traj.crossings(), 3);
        assert_eq!(crossing_rate(&traj), 3.0 / (0.5 * 5.0));
    }

    #[test]
    fn from_arrays_checks_shapes() {
        assert_eq!(
            Trajectory::from_arrays(array![0.0, 1.0], array![0.0], 0.1),
            Err(LangevinError::LengthMismatch),
        );
        assert_eq!(
            Trajectory::from_arrays(array![0.0], array![0.0], 0.1),
            Err(LangevinError::TooFewSteps),
        );
        assert_eq!(
            Trajectory::from_arrays(nd::Array1::zeros(0), nd::Array1::zeros(0), 1.0),
            Err(LangevinError::TooFewSteps),
        );
        assert_eq!(
            Trajectory::from_arrays(array![0.0, 1.0], array![0.0, 0.0], 0.0),
            Err(LangevinError::BadTimestep),
        );
    }

    #[test]
    fn first_step_is_explicit_euler() {
        let p = LangevinParams {
            steps: 2, dt: 0.01, gamma: 0.0, x0: 1.0, v0: 0.5, ..Default::default()
        };
        let (_, mut rng) = make_rng(Some(1));
        let traj = integrate(&p, &DoubleWell, &mut rng).unwrap();
        assert_eq!(traj.x(), &array![1.0, 1.0 + 0.5 * 0.01]);
        assert_eq!(traj.v(), &array![0.5, 0.5]);
        assert_eq!(traj.dt(), 0.01);
    }

    #[test]
    fn resting_at_barrier_top_without_noise() {
        let p = LangevinParams { steps: 1000, gamma: 0.0, ..Default::default() };
        let (_, mut rng) = make_rng(Some(7));
        let traj = integrate(&p, &DoubleWell, &mut rng).unwrap();
        assert!(traj.x.iter().all(|x| *x == 0.0));
        assert_eq!(crossing_rate(&traj), 0.0);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let p = short(5000);
        let (_, mut rng1) = make_rng(Some(42));
        let (_, mut rng2) = make_rng(Some(42));
        let a = integrate(&p, &DoubleWell, &mut rng1).unwrap();
        let b = integrate(&p, &DoubleWell, &mut rng2).unwrap();
        assert_eq!(a, b);

        let (_, mut rng3) = make_rng(Some(43));
        let c = integrate(&p, &DoubleWell, &mut rng3).unwrap();
        assert_ne!(a.v, c.v);
    }

    #[test]
    fn streaming_matches_stored() {
        let p = short(20_000);
        let (_, mut rng1) = make_rng(Some(2024));
        let (_, mut rng2) = make_rng(Some(2024));
        let stored = crossing_rate(&integrate(&p, &DoubleWell, &mut rng1).unwrap());
        let streamed = crossing_rate_streaming(&p, &DoubleWell, &mut rng2).unwrap();
        assert_eq!(stored, streamed);
    }

    #[test]
    fn states_yield_exactly_steps() {
        let p = short(10);
        let (_, mut rng) = make_rng(Some(3));
        let states = States::new(&p, &DoubleWell, &mut rng).unwrap();
        assert_eq!(states.len(), 10);
        assert_eq!(states.count(), 10);
    }

    #[test]
    fn timestep_change_keeps_total_time() {
        let p = LangevinParams { steps: 1001, dt: 0.01, ..Default::default() };
        let q = p.with_timestep(0.005).unwrap();
        assert_eq!(q.steps, 2001);
        assert!((q.total_time() - p.total_time()).abs() < 1e-12);
    }

    #[test]
    fn sweep_rejects_bad_timesteps() {
        let p = LangevinParams { steps: 1001, ..Default::default() };
        assert_eq!(p.with_timestep(0.0), Err(LangevinError::BadTimestep));
        assert_eq!(p.with_timestep(f64::NAN), Err(LangevinError::BadTimestep));
        assert_eq!(p.with_timestep(1e-300), Err(LangevinError::TooManySteps));
        assert_eq!(
            sweep_dt(&p, &DoubleWell, &[0.0], 0),
            Err(LangevinError::BadTimestep),
        );
        assert_eq!(
            sweep_dt(&p, &DoubleWell, &[1e-3, -1e-3], 0),
            Err(LangevinError::BadTimestep),
        );
    }

    #[test]
    fn stacked_array_layout() {
        let traj = Trajectory::from_arrays(array![1.0, 2.0], array![3.0, 4.0], 1.0).unwrap();
        assert_eq!(traj.as_array2(), array![[1.0, 3.0], [2.0, 4.0]]);
        assert_eq!(traj.times(), array![0.0, 1.0]);
    }
}
