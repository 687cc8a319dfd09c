//! Definition of the variable module
//!
//! A `Variable` is a discrete random variable of a Bayesian network: a name and the ordered
//! domain of state labels it may take. An `Assignment` maps variable names to states.

use indexmap::IndexMap;

use std::fmt;
use std::iter::FromIterator;


/// A discrete random variable with an ordered domain of named states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// The name of the `Variable`
    name: String,

    /// The states of the `Variable`, in authored order
    states: Vec<String>
}

impl Variable {

    /// Construct a new `Variable` with the given states
    pub fn new(name: &str, states: &[&str]) -> Self {
        Variable {
            name: String::from(name),
            states: states.iter().map(|s| String::from(*s)).collect()
        }
    }

    /// Construct a new `Variable` from owned state labels
    pub fn with_states(name: String, states: Vec<String>) -> Self {
        Variable { name, states }
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the domain of the `Variable`
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// The number of states in the domain
    pub fn cardinality(&self) -> usize {
        self.states.len()
    }

    /// Check if `state` belongs to the domain
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }
}


/// A (partial or full) assignment of states to variables.
///
/// Insertion order is kept, and overwriting a variable keeps its original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: IndexMap<String, String>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `state` to `var`, replacing any previous state
    pub fn set(&mut self, var: &str, state: &str) {
        self.values.insert(String::from(var), String::from(state));
    }

    /// Get the state assigned to `var`
    pub fn get(&self, var: &str) -> Option<&str> {
        self.values.get(var).map(String::as_str)
    }

    /// Check if `var` is assigned
    pub fn contains(&self, var: &str) -> bool {
        self.values.contains_key(var)
    }

    /// Check if any variable is assigned the state `state`
    pub fn has_value(&self, state: &str) -> bool {
        self.values.values().any(|s| s == state)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the `(variable, state)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy this `Assignment` and extend the copy with more `(variable, state)` pairs.
    ///
    /// `self` is left untouched; later pairs overwrite earlier ones for the same variable.
    pub fn extended<'b, I>(&self, more: I) -> Assignment
        where I: IntoIterator<Item = (&'b str, &'b str)>
    {
        let mut copy = self.clone();
        for (var, state) in more {
            copy.set(var, state);
        }
        copy
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Assignment {

    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Assignment::new().extended(iter)
    }

}

impl fmt::Display for Assignment {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, state)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", var, state)?;
        }
        write!(f, "}}")
    }

}
