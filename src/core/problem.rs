//! Problem descriptor and objective contract.
//!
//! A [`Problem`] bundles the search-space bounds, the optimization
//! [`Direction`], the objective function and an optional weighting that
//! reduces several objectives to one scalar target.

use crate::error::{ObjectiveError, OptimizerError, Result};
use std::fmt;
use std::sync::Arc;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Smaller targets are better.
    #[default]
    Minimize,
    /// Larger targets are better.
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// Orders two targets so that the better one sorts first.
    ///
    /// Incomparable values (NaN) are treated as equal.
    #[inline]
    pub fn cmp_targets(self, a: f64, b: f64) -> std::cmp::Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }

}

/// A black-box objective function.
///
/// Returns one value per objective. Single-objective functions return a
/// vector of length one; see [`FnObjective`] for the closure adapter.
///
/// The function must be deterministic and free of side effects over the
/// bounded domain declared by the [`Problem`].
pub trait Objective: Send + Sync {
    /// Evaluates the objective vector at `position`.
    fn evaluate(&self, position: &[f64]) -> std::result::Result<Vec<f64>, ObjectiveError>;
}

/// Adapter for a scalar closure `Fn(&[f64]) -> f64`.
///
/// ```
/// use u_swarmopt::core::{FnObjective, Problem};
///
/// let sphere = FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>());
/// let problem = Problem::new(vec![-5.0; 3], vec![5.0; 3], sphere).unwrap();
/// assert_eq!(problem.n_dims(), 3);
/// ```
pub struct FnObjective<F>(pub F);

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> std::result::Result<Vec<f64>, ObjectiveError> {
        Ok(vec![(self.0)(position)])
    }
}

/// Adapter for a multi-objective closure `Fn(&[f64]) -> Vec<f64>`.
pub struct MultiFnObjective<F>(pub F);

impl<F> Objective for MultiFnObjective<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> std::result::Result<Vec<f64>, ObjectiveError> {
        Ok((self.0)(position))
    }
}

/// Adapter for a fallible scalar closure.
pub struct TryFnObjective<F>(pub F);

impl<F> Objective for TryFnObjective<F>
where
    F: Fn(&[f64]) -> std::result::Result<f64, ObjectiveError> + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> std::result::Result<Vec<f64>, ObjectiveError> {
        (self.0)(position).map(|v| vec![v])
    }
}

/// Immutable description of an optimization problem.
///
/// # Examples
///
/// ```
/// use u_swarmopt::core::{Direction, MultiFnObjective, Problem};
///
/// let problem = Problem::new(
///     vec![0.0, 0.0],
///     vec![1.0, 1.0],
///     MultiFnObjective(|x: &[f64]| vec![x[0], x[1]]),
/// )
/// .unwrap()
/// .with_direction(Direction::Maximize)
/// .with_obj_weights(vec![0.5, 0.5])
/// .unwrap();
///
/// assert_eq!(problem.direction(), Direction::Maximize);
/// ```
#[derive(Clone)]
pub struct Problem {
    lower_bound: Vec<f64>,
    upper_bound: Vec<f64>,
    direction: Direction,
    objective: Arc<dyn Objective>,
    obj_weights: Option<Vec<f64>>,
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("n_dims", &self.n_dims())
            .field("lower_bound", &self.lower_bound)
            .field("upper_bound", &self.upper_bound)
            .field("direction", &self.direction)
            .field("obj_weights", &self.obj_weights)
            .finish_non_exhaustive()
    }
}

impl Problem {
    /// Creates a minimization problem.
    ///
    /// # Errors
    ///
    /// [`OptimizerError::InvalidProblem`] if the bound vectors are empty,
    /// differ in length, contain non-finite values, `lower > upper` on
    /// some dimension, or `upper - lower` overflows to infinity.
    pub fn new<O>(lower_bound: Vec<f64>, upper_bound: Vec<f64>, objective: O) -> Result<Self>
    where
        O: Objective + 'static,
    {
        Self::from_shared(lower_bound, upper_bound, Arc::new(objective))
    }

    /// Creates a problem from an already shared objective.
    pub fn from_shared(
        lower_bound: Vec<f64>,
        upper_bound: Vec<f64>,
        objective: Arc<dyn Objective>,
    ) -> Result<Self> {
        if lower_bound.is_empty() {
            return Err(OptimizerError::invalid("n_dims must be at least 1"));
        }
        if lower_bound.len() != upper_bound.len() {
            return Err(OptimizerError::invalid(format!(
                "lower_bound has {} entries but upper_bound has {}",
                lower_bound.len(),
                upper_bound.len()
            )));
        }
        for (i, (&lo, &hi)) in lower_bound.iter().zip(&upper_bound).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(OptimizerError::invalid(format!(
                    "bounds of dimension {i} must be finite"
                )));
            }
            if lo > hi {
                return Err(OptimizerError::invalid(format!(
                    "lower_bound[{i}] = {lo} exceeds upper_bound[{i}] = {hi}"
                )));
            }
            if !(hi - lo).is_finite() {
                return Err(OptimizerError::invalid(format!(
                    "width of dimension {i} is not representable"
                )));
            }
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            direction: Direction::Minimize,
            objective,
            obj_weights: None,
        })
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the weights reducing the objective vector to the target.
    ///
    /// The number of weights must match the number of objectives returned
    /// by the objective; a mismatch is reported at evaluation time.
    pub fn with_obj_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(OptimizerError::invalid("obj_weights must not be empty"));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(OptimizerError::invalid("obj_weights must be finite"));
        }
        self.obj_weights = Some(weights);
        Ok(self)
    }

    /// Number of decision variables.
    pub fn n_dims(&self) -> usize {
        self.lower_bound.len()
    }

    pub fn lower_bound(&self) -> &[f64] {
        &self.lower_bound
    }

    pub fn upper_bound(&self) -> &[f64] {
        &self.upper_bound
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn obj_weights(&self) -> Option<&[f64]> {
        self.obj_weights.as_deref()
    }

    pub(crate) fn objective(&self) -> &dyn Objective {
        self.objective.as_ref()
    }

    /// Reduces an objective vector to the scalar target.
    ///
    /// Weighted sum when weights are set, otherwise the first objective.
    pub fn reduce(&self, objectives: &[f64]) -> std::result::Result<f64, String> {
        match &self.obj_weights {
            Some(weights) => {
                if weights.len() != objectives.len() {
                    return Err(format!(
                        "objective returned {} values but {} weights are configured",
                        objectives.len(),
                        weights.len()
                    ));
                }
                Ok(weights.iter().zip(objectives).map(|(w, o)| w * o).sum())
            }
            None => objectives
                .first()
                .copied()
                .ok_or_else(|| "objective returned no values".to_string()),
        }
    }

    /// Reflects a position through the centre of the search box.
    pub fn opposite(&self, position: &[f64]) -> Vec<f64> {
        position
            .iter()
            .zip(self.lower_bound.iter().zip(&self.upper_bound))
            .map(|(&x, (&lo, &hi))| lo + (hi - x))
            .collect()
    }
}
