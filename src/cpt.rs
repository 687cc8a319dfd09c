//! Definition of the conditional probability table (CPT) module
//!
//! A `Cpt` is a recursively nested mapping. Every level is keyed by state labels and holds either
//! another level or a leaf probability. Looking up a probability means descending the table with
//! a full `Assignment` until a leaf is reached; the result is a priced `Factor`.

use crate::util::{BayesError, Result};
use crate::variable::Assignment;

use indexmap::IndexMap;


/// One level (or leaf) of a `Cpt`.
#[derive(Clone, Debug, PartialEq)]
pub enum CptNode {
    /// A probability, terminating the descent
    Leaf(f64),

    /// A nested level keyed by state label, in authored order
    Branch(IndexMap<String, CptNode>)
}

impl CptNode {

    /// Build a level from `(state, child)` pairs
    pub fn branch<'a, I>(children: I) -> Self
        where I: IntoIterator<Item = (&'a str, CptNode)>
    {
        CptNode::Branch(children.into_iter().map(|(k, v)| (String::from(k), v)).collect())
    }

    /// Build a level whose children are all leaves
    pub fn distribution(probabilities: &[(&str, f64)]) -> Self {
        CptNode::branch(probabilities.iter().map(|&(k, p)| (k, CptNode::Leaf(p))))
    }

    /// The number of levels above the deepest leaf
    pub fn depth(&self) -> usize {
        match self {
            &CptNode::Leaf(_) => 0,
            &CptNode::Branch(ref children) => {
                1 + children.values().map(CptNode::depth).max().unwrap_or(0)
            }
        }
    }
}


/// How the levels of a `Cpt` are matched against an `Assignment`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMode {
    /// Level `i` is selected by the state assigned to the `i`-th variable of the table's scope.
    ByVariable,

    /// Level keys are matched against the *set* of assigned states: the first key (in table
    /// order) equal to any assigned state is taken. Two variables sharing a state label cannot
    /// be told apart in this mode.
    ByState
}

impl Default for LookupMode {
    fn default() -> Self {
        LookupMode::ByVariable
    }
}


/// A conditional probability table for a single variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Cpt {
    /// The variables conditioning each level, outermost first. `None` when the author did not
    /// declare one; the network then derives it from the graph.
    scope: Option<Vec<String>>,

    /// The nested table
    root: CptNode
}

impl Cpt {

    /// A table without a declared scope
    pub fn new(root: CptNode) -> Self {
        Cpt { scope: None, root }
    }

    /// A table whose levels are conditioned, outermost first, on `scope`
    pub fn with_scope(scope: &[&str], root: CptNode) -> Self {
        Cpt { scope: Some(scope.iter().map(|s| String::from(*s)).collect()), root }
    }

    /// The declared scope, if any
    pub fn scope(&self) -> Option<&[String]> {
        self.scope.as_ref().map(Vec::as_slice)
    }

    pub fn root(&self) -> &CptNode {
        &self.root
    }

    /// Find the probability of `var` under a full `assignment`.
    ///
    /// # Args
    /// * `var`: the variable this table belongs to, for error reporting
    /// * `scope`: the variables conditioning each level; only used by `LookupMode::ByVariable`
    /// * `assignment`: a full assignment covering every variable the table is keyed on
    /// * `mode`: how levels are matched
    ///
    /// # Errors
    /// * `BayesError::NoMatchingBranch` if some level has no key matching the assignment
    /// * `BayesError::MissingVariable` if a scope variable is not assigned (`ByVariable` only)
    pub fn evaluate(
        &self,
        var: &str,
        scope: &[&str],
        assignment: &Assignment,
        mode: LookupMode
    ) -> Result<Factor> {
        match mode {
            LookupMode::ByVariable => self.evaluate_by_variable(var, scope, assignment),
            LookupMode::ByState => self.evaluate_by_state(var, assignment),
        }
    }

    fn evaluate_by_variable(&self, var: &str, scope: &[&str], assignment: &Assignment) -> Result<Factor> {
        let mut node = &self.root;
        let mut selected: Vec<String> = Vec::with_capacity(scope.len());

        loop {
            match node {
                &CptNode::Leaf(p) => return Ok(Factor::new(p, label(&selected))),
                &CptNode::Branch(ref children) => {
                    // nested deeper than the scope says it should be
                    let conditioned = scope.get(selected.len())
                                           .ok_or_else(|| no_match(var, assignment))?;
                    let state = assignment.get(conditioned)
                                          .ok_or_else(|| BayesError::MissingVariable(String::from(*conditioned)))?;

                    node = children.get(state).ok_or_else(|| no_match(var, assignment))?;
                    selected.push(format!("{}={}", conditioned, state));
                }
            }
        }
    }

    fn evaluate_by_state(&self, var: &str, assignment: &Assignment) -> Result<Factor> {
        let mut selected = Vec::new();

        descend_by_state(&self.root, assignment, &mut selected)
            .map(|p| Factor::new(p, label(&selected)))
            .ok_or_else(|| no_match(var, assignment))
    }
}

/// Depth-first descent over the keys matching any assigned state. A matching key whose subtree
/// dead-ends is abandoned for the next matching key.
fn descend_by_state(node: &CptNode, assignment: &Assignment, selected: &mut Vec<String>) -> Option<f64> {
    match node {
        &CptNode::Leaf(p) => Some(p),
        &CptNode::Branch(ref children) => {
            for (key, child) in children.iter().filter(|&(k, _)| assignment.has_value(k)) {
                selected.push(key.clone());
                if let Some(p) = descend_by_state(child, assignment, selected) {
                    return Some(p);
                }
                selected.pop();
            }
            None
        }
    }
}

fn no_match(var: &str, assignment: &Assignment) -> BayesError {
    BayesError::NoMatchingBranch {
        variable: String::from(var),
        assignment: assignment.to_string()
    }
}

/// `P(last|first ∧ second ∧ ...)`, or `P(last)` with nothing to condition on
fn label(selected: &[String]) -> String {
    match selected.split_last() {
        Some((outcome, [])) => format!("P({})", outcome),
        Some((outcome, given)) => format!("P({}|{})", outcome, given.join(" ∧ ")),
        None => String::from("P()"),
    }
}


/// A single priced factor: the probability a `Cpt` assigns under some assignment, and a human
/// readable label for tracing.
#[derive(Clone, Debug, PartialEq)]
pub struct Factor {
    probability: f64,
    label: String
}

impl Factor {

    pub fn new(probability: f64, label: String) -> Self {
        Factor { probability, label }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
