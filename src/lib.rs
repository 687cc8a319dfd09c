//! Exact inference by enumeration over discrete Bayesian networks.
//!
//! A `BayesianNetwork` is assembled by hand, with a `NetworkBuilder`, or loaded from JSON by the
//! `loader`. Queries of the form `P(Y | E = e)` are answered by an `EnumerationEngine`.

pub mod cpt;
pub mod inference;
pub mod loader;
pub mod model;
mod report;
pub mod util;
pub mod variable;

pub use crate::cpt::{Cpt, CptNode, Factor, LookupMode};
pub use crate::inference::{
    ConditionalInferenceEngine,
    Distribution,
    EngineOptions,
    EnumerationEngine,
    FactorScope,
    Posterior
};
pub use crate::loader::{load_evidence, load_network, parse_evidence, parse_network, ParseWarning};
pub use crate::model::{BayesianNetwork, NetworkBuilder};
pub use crate::util::{BayesError, Result};
pub use crate::variable::{Assignment, Variable};
