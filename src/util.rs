//! Defines the `BayesError` type for the bayes-enum library

use std::io;
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, BayesError>;

#[derive(Debug, Error)]
pub enum BayesError {

    /// A variable was referenced (by an edge, a CPT scope, a query or the evidence) that is not a
    /// node of the network
    #[error("variable `{0}` is not defined in the network")]
    MissingVariable(String),

    /// A node of the network has no domain of states
    #[error("variable `{0}` has no domain")]
    MissingDomain(String),

    /// A variable was added to a network under construction more than once
    #[error("variable `{0}` was added twice")]
    DuplicateVariable(String),

    /// A variable whose factor is required has no conditional probability table
    #[error("variable `{0}` has no conditional probability table")]
    MissingCpt(String),

    /// Descending a CPT found a level where no key matches the assignment
    #[error("no branch of the CPT for `{variable}` matches the assignment {assignment}")]
    NoMatchingBranch { variable: String, assignment: String },

    /// Ancestor resolution re-entered a variable that is still on the descent path
    #[error("cycle detected through variable `{0}`")]
    Cycle(String),

    /// The unnormalized scores sum to zero (or to something that is not a positive number)
    #[error("cannot normalize scores summing to {total}")]
    DegenerateDistribution { total: f64 },

    /// A state label that is not part of the variable's domain
    #[error("`{state}` is not a state of `{variable}`")]
    UnknownState { variable: String, state: String },

    /// The query variable is also fixed by the evidence
    #[error("query variable `{0}` is also observed in the evidence")]
    QueryObserved(String),

    /// The enumeration would visit more hidden-variable combinations than allowed
    #[error("enumeration needs {required} combinations but the budget is {budget}")]
    BudgetExceeded { required: u64, budget: u64 },

    /// A CPT (or a domain) whose shape does not fit the network
    #[error("invalid table for `{variable}`: {reason}")]
    InvalidTable { variable: String, reason: String },

    /// Malformed input in a network definition
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

}

impl BayesError {

    /// Shorthand for `BayesError::InvalidTable`
    pub(crate) fn invalid_table(variable: &str, reason: String) -> Self {
        BayesError::InvalidTable { variable: String::from(variable), reason }
    }

}
