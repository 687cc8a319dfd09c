//! An implementation of the [builder pattern] for creating a `BayesianNetwork`.
//!
//! [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern

use super::BayesianNetwork;
use crate::cpt::{Cpt, LookupMode};
use crate::util::{BayesError, Result};
use crate::variable::Variable;


/// Assembles a `BayesianNetwork` one variable at a time and validates it on `build`.
///
/// Unlike the raw `BayesianNetwork` operations, the builder rejects a variable added twice and an
/// edge whose parent has not been added yet, so variables must be added in topological order.
pub struct NetworkBuilder {

    /// The network under construction
    network: BayesianNetwork,

    /// The lookup mode the network is validated for
    mode: LookupMode,

    /// The error state of the builder
    err: Option<BayesError>

}

impl NetworkBuilder {

    /// Construct a new `NetworkBuilder` representing an empty network
    pub fn new() -> Self {
        NetworkBuilder {
            network: BayesianNetwork::new(),
            mode: LookupMode::default(),
            err: None
        }
    }

    /// Validate the tables for `mode` instead of the default lookup
    pub fn lookup(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a variable with its parents and CPT.
    ///
    /// # Args
    /// * `var`: the variable and its domain
    /// * `parents`: the parent variables, which must already be in the network
    /// * `cpt`: the conditional probability table of `var`
    pub fn with_variable(mut self, var: &Variable, parents: &[&str], cpt: Cpt) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        if let Some(parent) = parents.iter().find(|p| ! self.network.contains(p)) {
            self.err = Some(BayesError::MissingVariable(String::from(*parent)));
            return self;
        }

        if self.network.contains(var.name()) {
            self.err = Some(BayesError::DuplicateVariable(String::from(var.name())));
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Add to current network
        self.network.add_node(var.name());
        self.network.set_domain(var.name(), var.states().to_vec());
        for parent in parents {
            self.network.add_edge(parent, var.name());
        }
        self.network.set_cpt(var.name(), cpt);

        self
    }

    /// Add an edge between two variables already in the network
    pub fn with_edge(mut self, parent: &str, child: &str) -> Self {
        if self.err.is_some() {
            return self;
        }

        match [parent, child].iter().find(|v| ! self.network.contains(v)) {
            Some(missing) => self.err = Some(BayesError::MissingVariable(String::from(*missing))),
            None => self.network.add_edge(parent, child),
        }

        self
    }

    /// Replace the CPT of a variable already in the network
    pub fn with_cpt(mut self, var: &str, cpt: Cpt) -> Self {
        if self.err.is_some() {
            return self;
        }

        if self.network.contains(var) {
            self.network.set_cpt(var, cpt);
        } else {
            self.err = Some(BayesError::MissingVariable(String::from(var)));
        }

        self
    }

    /// Complete building the network.
    ///
    /// # Returns
    /// the `BayesianNetwork`, or the first error generated while building or validating it
    ///
    /// # Postcondition
    /// This call consumes the `NetworkBuilder`
    pub fn build(self) -> Result<BayesianNetwork> {
        if let Some(e) = self.err {
            return Err(e);
        }

        self.network.validate(self.mode)?;
        Ok(self.network)
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        NetworkBuilder::new()
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cpt::CptNode;

    fn prior(p: f64) -> Cpt {
        Cpt::new(CptNode::distribution(&[("t", p), ("f", 1.0 - p)]))
    }

    #[test]
    fn build_empty() {
        let net = NetworkBuilder::new().build().unwrap();
        assert_eq!(net.num_nodes(), 0);
    }

    #[test]
    /// Example taken from Koller & Friedman Section 3.1.2
    fn intelligence() {
        let intelligence = Variable::new("I", &["t", "f"]);
        let sat = Variable::new("S", &["t", "f"]);

        let sat_cpt = Cpt::new(CptNode::branch(vec![
            ("t", CptNode::distribution(&[("t", 0.8), ("f", 0.2)])),
            ("f", CptNode::distribution(&[("t", 0.05), ("f", 0.95)])),
        ]));

        let net = NetworkBuilder::new()
                      .with_variable(&intelligence, &[], prior(0.3))
                      .with_variable(&sat, &["I"], sat_cpt)
                      .build()
                      .unwrap();

        assert_eq!(net.num_nodes(), 2);
        assert_eq!(net.parents("S"), vec!["I"]);
        assert_eq!(net.domain("S").unwrap().len(), 2);
        assert!(net.cpt("I").is_some());
    }

    #[test]
    fn missing_parent() {
        let a = Variable::new("A", &["t", "f"]);
        let result = NetworkBuilder::new().with_variable(&a, &["Z"], prior(0.5)).build();
        match result {
            Err(BayesError::MissingVariable(ref v)) => assert_eq!(v, "Z"),
            other => panic!("unexpected result {:?}", other.map(|n| n.num_nodes()))
        }
    }

    #[test]
    fn duplicate_variable() {
        let a = Variable::new("A", &["t", "f"]);
        let result = NetworkBuilder::new()
                         .with_variable(&a, &[], prior(0.5))
                         .with_variable(&a, &[], prior(0.5))
                         .build();
        match result {
            Err(BayesError::DuplicateVariable(ref v)) => assert_eq!(v, "A"),
            other => panic!("unexpected result {:?}", other.map(|n| n.num_nodes()))
        }
    }

    #[test]
    fn first_error_wins() {
        let a = Variable::new("A", &["t", "f"]);
        let result = NetworkBuilder::new()
                         .with_edge("X", "A")
                         .with_cpt("Y", prior(0.5))
                         .with_variable(&a, &[], prior(0.5))
                         .build();
        match result {
            Err(BayesError::MissingVariable(ref v)) => assert_eq!(v, "X"),
            other => panic!("unexpected result {:?}", other.map(|n| n.num_nodes()))
        }
    }

    #[test]
    fn validates_tables() {
        let a = Variable::new("A", &["t", "f"]);
        let result = NetworkBuilder::new()
                         .with_variable(&a, &[], Cpt::new(CptNode::distribution(&[("yes", 1.0)])))
                         .build();
        assert!(result.is_err());

        // the same table is acceptable to a value-keyed lookup
        let result = NetworkBuilder::new()
                         .lookup(LookupMode::ByState)
                         .with_variable(&a, &[], Cpt::new(CptNode::distribution(&[("yes", 1.0)])))
                         .build();
        assert!(result.is_ok());
    }

    #[test]
    fn extra_edge() {
        let a = Variable::new("A", &["t", "f"]);
        let b = Variable::new("B", &["t", "f"]);
        let b_cpt = Cpt::new(CptNode::branch(vec![
            ("t", CptNode::distribution(&[("t", 0.9), ("f", 0.1)])),
            ("f", CptNode::distribution(&[("t", 0.2), ("f", 0.8)])),
        ]));

        let net = NetworkBuilder::new()
                      .with_variable(&a, &[], prior(0.6))
                      .with_variable(&b, &[], prior(0.5))
                      .with_edge("A", "B")
                      .with_cpt("B", b_cpt)
                      .build()
                      .unwrap();
        assert_eq!(net.parents("B"), vec!["A"]);
    }

}
