//! Solution representation.
//!
//! A [`Solution`] pairs a position with the [`Fitness`] computed for that
//! exact position. Solutions are only created by the
//! [`Evaluator`](super::Evaluator), so a cached fitness can never be stale.

use super::problem::Direction;

/// Cached result of evaluating one position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fitness {
    /// Scalar used for every comparison.
    pub target: f64,
    /// Raw objective values the target was reduced from.
    pub objectives: Vec<f64>,
}

impl Fitness {
    /// Returns `true` if this fitness is strictly better than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Fitness, direction: Direction) -> bool {
        direction.is_better(self.target, other.target)
    }
}

/// Best position an agent has held so far, with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBest {
    pub position: Vec<f64>,
    pub fitness: Fitness,
}

/// One agent of the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    position: Vec<f64>,
    fitness: Fitness,
    personal_best: Option<PersonalBest>,
}

impl Solution {
    pub(crate) fn new(position: Vec<f64>, fitness: Fitness) -> Self {
        Self {
            position,
            fitness,
            personal_best: None,
        }
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    /// Shorthand for `self.fitness().target`.
    #[inline]
    pub fn target(&self) -> f64 {
        self.fitness.target
    }

    /// Personal-best memory, present only for strategies that track it.
    pub fn personal_best(&self) -> Option<&PersonalBest> {
        self.personal_best.as_ref()
    }

    /// Returns `true` if `self` is strictly better than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Solution, direction: Direction) -> bool {
        self.fitness.is_better_than(&other.fitness, direction)
    }

    /// Starts personal-best memory at the current position.
    pub(crate) fn with_memory(mut self) -> Self {
        self.personal_best = Some(PersonalBest {
            position: self.position.clone(),
            fitness: self.fitness.clone(),
        });
        self
    }

    pub(crate) fn with_personal_best(mut self, best: PersonalBest) -> Self {
        self.personal_best = Some(best);
        self
    }

    /// Position of the personal best, falling back to the current position.
    pub fn memory_position(&self) -> &[f64] {
        self.personal_best
            .as_ref()
            .map_or(&self.position, |pb| &pb.position)
    }

    /// Adopts `candidate` if it beats this agent, updating personal best.
    ///
    /// The incumbent is kept unless the candidate is strictly better. When
    /// adopted, the incumbent's personal best carries over and is replaced
    /// only if the candidate also beats it, so memory never regresses.
    pub(crate) fn adopt_if_better(self, candidate: Solution, direction: Direction) -> Solution {
        if !candidate.is_better_than(&self, direction) {
            return self;
        }
        match self.personal_best {
            Some(best) if !candidate.fitness.is_better_than(&best.fitness, direction) => {
                candidate.with_personal_best(best)
            }
            Some(_) => candidate.with_memory(),
            None => candidate,
        }
    }
}

#[cfg(test)]
pub(crate) fn solution_for_test(position: Vec<f64>, target: f64) -> Solution {
    Solution::new(
        position,
        Fitness {
            target,
            objectives: vec![target],
        },
    )
}
