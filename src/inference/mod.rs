//! Defines the interface to inference engines

use crate::variable::Assignment;
use crate::util::Result;

mod combinations;
mod enumeration;
mod normalize;

pub use self::combinations::CombinationGenerator;
pub use self::enumeration::{EngineOptions, EnumerationEngine, FactorScope};
pub use self::normalize::{normalize, Distribution};


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
/// for a single query variable `Y`.
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)```
    fn posterior(&self, query: &str, evidence: &Assignment) -> Result<Posterior>;

}


/// The answer to a conditional query: the unnormalized score of every query state, the
/// normalized distribution and the most probable state.
#[derive(Clone, Debug, PartialEq)]
pub struct Posterior {

    /// The query variable
    query: String,

    /// The evidence the query was conditioned on
    evidence: Assignment,

    /// `(state, score)` in the query's domain order, before normalization
    scores: Vec<(String, f64)>,

    distribution: Distribution

}

impl Posterior {

    pub fn new(query: &str, evidence: Assignment, scores: Vec<(String, f64)>, distribution: Distribution) -> Self {
        Posterior { query: String::from(query), evidence, scores, distribution }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn evidence(&self) -> &Assignment {
        &self.evidence
    }

    /// The unnormalized scores, in the query's domain order
    pub fn scores(&self) -> &[(String, f64)] {
        &self.scores
    }

    /// The unnormalized score of `state`
    pub fn score(&self, state: &str) -> Option<f64> {
        self.scores.iter().find(|&&(ref s, _)| s == state).map(|&(_, p)| p)
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// The normalized probability of `state`
    pub fn probability(&self, state: &str) -> Option<f64> {
        self.distribution.probability(state)
    }

    pub fn most_probable(&self) -> (&str, f64) {
        self.distribution.most_probable()
    }
}
