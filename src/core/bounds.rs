//! Boundary repair.
//!
//! Maps a position produced by an update formula back into the feasible
//! box `[lower_bound, upper_bound]`.

use super::problem::Problem;
use rand::Rng;

/// Strategy for repairing out-of-bounds coordinates.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_swarmopt::core::{BoundaryRepair, FnObjective, Problem};
///
/// let problem = Problem::new(vec![0.0, 0.0], vec![1.0, 1.0], FnObjective(|x: &[f64]| x[0])).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let repaired = BoundaryRepair::Clamp.repair(vec![-3.0, 0.5], &problem, &mut rng);
/// assert_eq!(repaired, vec![0.0, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryRepair {
    /// Move each violating coordinate to the nearest bound.
    ///
    /// A NaN coordinate has no nearest bound and goes to the interval
    /// midpoint. Draws nothing from the random source.
    #[default]
    Clamp,

    /// Re-sample each violating coordinate uniformly within its bounds.
    ///
    /// Keeps diversity where clamping would pile agents onto the border.
    Random,
}

impl BoundaryRepair {
    /// Returns a feasible version of `position`.
    pub fn repair<R: Rng>(self, mut position: Vec<f64>, problem: &Problem, rng: &mut R) -> Vec<f64> {
        let bounds = problem.lower_bound().iter().zip(problem.upper_bound());
        match self {
            BoundaryRepair::Clamp => {
                for (x, (&lo, &hi)) in position.iter_mut().zip(bounds) {
                    *x = clamp_coordinate(*x, lo, hi);
                }
            }
            BoundaryRepair::Random => {
                for (x, (&lo, &hi)) in position.iter_mut().zip(bounds) {
                    if !(lo <= *x && *x <= hi) {
                        *x = uniform(rng, lo, hi);
                    }
                }
            }
        }
        position
    }
}

#[inline]
fn clamp_coordinate(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        lo + 0.5 * (hi - lo)
    } else {
        x.clamp(lo, hi)
    }
}

/// Uniform draw in `[lo, hi]`, collapsing to `lo` for an empty interval.
#[inline]
pub(crate) fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Uniform random position inside the problem bounds.
pub(crate) fn random_position<R: Rng>(problem: &Problem, rng: &mut R) -> Vec<f64> {
    problem
        .lower_bound()
        .iter()
        .zip(problem.upper_bound())
        .map(|(&lo, &hi)| uniform(rng, lo, hi))
        .collect()
}

/// Returns `true` if every coordinate lies within the bounds.
pub fn is_feasible(position: &[f64], problem: &Problem) -> bool {
    position.len() == problem.n_dims()
        && position
            .iter()
            .zip(problem.lower_bound().iter().zip(problem.upper_bound()))
            .all(|(&x, (&lo, &hi))| lo <= x && x <= hi)
}
