//! Defines the `BayesianNetwork`, the directed graphical model the inference engine works over.
//!
//! # Representation
//! The network keeps its nodes, the directed edges as an adjacency mapping from each parent to its
//! children, the domain of every variable and a `Cpt` for every variable. Insertion order is
//! preserved everywhere, since it drives the order of enumeration and of diagnostic output.
//!
//! The mutating operations perform no validation; `BayesianNetwork::validate` checks a fully
//! populated network once, before it is used for inference.

use crate::cpt::{Cpt, CptNode, LookupMode};
use crate::util::{BayesError, Result};

use indexmap::{IndexMap, IndexSet};

mod ancestors;
mod builder;

pub use self::builder::NetworkBuilder;


/// A discrete Bayesian network.
#[derive(Clone, Debug, Default)]
pub struct BayesianNetwork {

    /// The variables of the network, in insertion order
    nodes: IndexSet<String>,

    /// Adjacency mapping ```parent -> children```. Parents are kept in the order their first
    /// edge was added and duplicate edges collapse.
    edges: IndexMap<String, IndexSet<String>>,

    /// The ordered domain of each variable
    domains: IndexMap<String, Vec<String>>,

    /// The conditional probability table of each variable
    cpts: IndexMap<String, Cpt>

}

impl BayesianNetwork {

    /// Construct an empty network
    pub fn new() -> Self {
        BayesianNetwork::default()
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, var: &str) {
        self.nodes.insert(String::from(var));
    }

    /// Add the directed edge ```parent -> child```
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        self.edges.entry(String::from(parent))
                  .or_insert_with(IndexSet::new)
                  .insert(String::from(child));
    }

    /// Record the domain of `var`, replacing any previous one
    pub fn set_domain(&mut self, var: &str, states: Vec<String>) {
        self.domains.insert(String::from(var), states);
    }

    /// Record the CPT of `var`, replacing any previous one
    pub fn set_cpt(&mut self, var: &str, cpt: Cpt) {
        self.cpts.insert(String::from(var), cpt);
    }

    /// The variables of the network, in insertion order
    pub fn nodes(&self) -> &IndexSet<String> {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Check if `var` is a node of the network
    pub fn contains(&self, var: &str) -> bool {
        self.nodes.contains(var)
    }

    /// The parents of `var`, in the order their edges were first added
    pub fn parents(&self, var: &str) -> Vec<&str> {
        self.edges.iter()
                  .filter(|&(_, children)| children.contains(var))
                  .map(|(parent, _)| parent.as_str())
                  .collect()
    }

    /// The children of `var`, in insertion order
    pub fn children(&self, var: &str) -> Vec<&str> {
        self.edges.get(var)
                  .map(|children| children.iter().map(String::as_str).collect())
                  .unwrap_or_default()
    }

    /// The domain of `var`
    pub fn domain(&self, var: &str) -> Option<&[String]> {
        self.domains.get(var).map(Vec::as_slice)
    }

    /// The CPT of `var`
    pub fn cpt(&self, var: &str) -> Option<&Cpt> {
        self.cpts.get(var)
    }

    /// The variables conditioning each level of the CPT of `var`, outermost first.
    ///
    /// This is the scope declared on the table, or else the parents of `var` followed by `var`
    /// itself.
    pub fn cpt_scope<'a>(&'a self, var: &'a str) -> Vec<&'a str> {
        match self.cpts.get(var).and_then(Cpt::scope) {
            Some(scope) => scope.iter().map(String::as_str).collect(),
            None => {
                let mut scope = self.parents(var);
                scope.push(var);
                scope
            }
        }
    }

    /// Check that the network is complete and that its tables fit its domains.
    ///
    /// # Args
    /// * `mode`: the lookup the tables will be evaluated with. Tables evaluated `ByVariable` are
    ///   checked level by level against the domain of the variable conditioning the level. Tables
    ///   evaluated `ByState` carry no per-level variable, so only their leaves are checked.
    ///
    /// # Errors
    /// * `BayesError::MissingVariable` for an edge endpoint, domain, table or declared scope entry
    ///   naming an unknown variable
    /// * `BayesError::MissingDomain` / `BayesError::MissingCpt` for an incomplete node
    /// * `BayesError::InvalidTable` for a domain with repeated states or a table whose shape does
    ///   not fit
    pub fn validate(&self, mode: LookupMode) -> Result<()> {
        ///////////////////////////////////////////////////////////////////////
        // 1) Every referenced variable must be a node
        for (parent, children) in self.edges.iter() {
            for var in Some(parent).into_iter().chain(children.iter()) {
                self.require_node(var)?;
            }
        }
        for var in self.domains.keys().chain(self.cpts.keys()) {
            self.require_node(var)?;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Every node needs a domain without repeats, and a table
        for var in self.nodes.iter() {
            let domain = self.domain(var).ok_or_else(|| BayesError::MissingDomain(var.clone()))?;
            let distinct: IndexSet<&String> = domain.iter().collect();
            if distinct.len() != domain.len() {
                return Err(BayesError::invalid_table(var, String::from("domain repeats a state")));
            }

            if ! self.cpts.contains_key(var) {
                return Err(BayesError::MissingCpt(var.clone()));
            }
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Every table must fit
        for (var, cpt) in self.cpts.iter() {
            if let Some(scope) = cpt.scope() {
                for conditioned in scope.iter() {
                    self.require_node(conditioned)?;
                }
                if ! scope.contains(var) {
                    return Err(BayesError::invalid_table(var, String::from("scope does not include the variable")));
                }
            }

            match mode {
                LookupMode::ByVariable => self.check_levels(var, &self.cpt_scope(var), cpt.root(), 0)?,
                LookupMode::ByState => check_leaves(var, cpt.root())?,
            }
        }

        Ok(())
    }

    fn require_node(&self, var: &str) -> Result<()> {
        if self.contains(var) {
            Ok(())
        } else {
            Err(BayesError::MissingVariable(String::from(var)))
        }
    }

    /// Check the level at `depth` (and everything below it) against the domain of `scope[depth]`
    fn check_levels(&self, var: &str, scope: &[&str], node: &CptNode, depth: usize) -> Result<()> {
        match (node, scope.get(depth)) {
            (&CptNode::Leaf(p), None) => check_probability(var, p),
            (&CptNode::Leaf(_), Some(conditioned)) => {
                Err(BayesError::invalid_table(
                    var,
                    format!("level {} ends before reaching `{}`", depth, conditioned)
                ))
            },
            (&CptNode::Branch(_), None) => {
                Err(BayesError::invalid_table(
                    var,
                    format!("nested deeper than its {} conditioning variables", scope.len())
                ))
            },
            (&CptNode::Branch(ref children), Some(conditioned)) => {
                let domain = self.domain(conditioned)
                                 .ok_or_else(|| BayesError::MissingDomain(String::from(*conditioned)))?;

                if let Some(state) = children.keys().find(|k| ! domain.contains(k)) {
                    return Err(BayesError::invalid_table(
                        var,
                        format!("`{}` is not a state of `{}`", state, conditioned)
                    ));
                }
                if let Some(state) = domain.iter().find(|s| ! children.contains_key(*s)) {
                    return Err(BayesError::invalid_table(
                        var,
                        format!("no entry for `{}={}`", conditioned, state)
                    ));
                }

                for child in children.values() {
                    self.check_levels(var, scope, child, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

fn check_leaves(var: &str, node: &CptNode) -> Result<()> {
    match node {
        &CptNode::Leaf(p) => check_probability(var, p),
        &CptNode::Branch(ref children) if children.is_empty() => {
            Err(BayesError::invalid_table(var, String::from("empty level")))
        },
        &CptNode::Branch(ref children) => {
            children.values().map(|child| check_leaves(var, child)).collect()
        }
    }
}

fn check_probability(var: &str, p: f64) -> Result<()> {
    if p.is_finite() && p >= 0.0 {
        Ok(())
    } else {
        Err(BayesError::invalid_table(var, format!("{} is not a probability", p)))
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn states(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| String::from(*s)).collect()
    }

    /// A -> B, both over [t, f]
    fn chain() -> BayesianNetwork {
        let mut net = BayesianNetwork::new();
        net.add_node("A");
        net.add_node("B");
        net.add_edge("A", "B");
        net.set_domain("A", states(&["t", "f"]));
        net.set_domain("B", states(&["t", "f"]));
        net.set_cpt("A", Cpt::new(CptNode::distribution(&[("t", 0.6), ("f", 0.4)])));
        net.set_cpt("B", Cpt::new(CptNode::branch(vec![
            ("t", CptNode::distribution(&[("t", 0.9), ("f", 0.1)])),
            ("f", CptNode::distribution(&[("t", 0.2), ("f", 0.8)])),
        ])));
        net
    }

    #[test]
    fn empty() {
        let net = BayesianNetwork::new();
        assert_eq!(net.num_nodes(), 0);
        assert!(net.nodes().is_empty());
        assert!(net.validate(LookupMode::ByVariable).is_ok());
    }

    #[test]
    fn graph_queries() {
        let mut net = chain();
        net.add_node("C");
        net.add_edge("C", "B");
        // duplicate edges collapse
        net.add_edge("A", "B");

        assert_eq!(net.num_nodes(), 3);
        assert!(net.contains("C"));
        assert_eq!(net.parents("B"), vec!["A", "C"]);
        assert!(net.parents("A").is_empty());
        assert_eq!(net.children("A"), vec!["B"]);
        assert!(net.children("B").is_empty());
        assert_eq!(net.domain("A").unwrap(), &states(&["t", "f"])[..]);
        assert!(net.domain("C").is_none());
        assert!(net.cpt("C").is_none());
    }

    #[test]
    fn derived_and_declared_scope() {
        let mut net = chain();
        assert_eq!(net.cpt_scope("A"), vec!["A"]);
        assert_eq!(net.cpt_scope("B"), vec!["A", "B"]);

        let inner_parent = CptNode::branch(vec![
            ("t", CptNode::distribution(&[("t", 0.9), ("f", 0.2)])),
            ("f", CptNode::distribution(&[("t", 0.1), ("f", 0.8)])),
        ]);
        net.set_cpt("B", Cpt::with_scope(&["B", "A"], inner_parent));
        assert_eq!(net.cpt_scope("B"), vec!["B", "A"]);
        assert!(net.validate(LookupMode::ByVariable).is_ok());
    }

    #[test]
    fn validate_chain() {
        let net = chain();
        assert!(net.validate(LookupMode::ByVariable).is_ok());
        assert!(net.validate(LookupMode::ByState).is_ok());
    }

    #[test]
    fn validate_dangling_edge() {
        let mut net = chain();
        net.add_edge("A", "Z");
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::MissingVariable(ref v)) => assert_eq!(v, "Z"),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn validate_missing_domain_and_cpt() {
        let mut net = chain();
        net.add_node("C");
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::MissingDomain(ref v)) => assert_eq!(v, "C"),
            other => panic!("unexpected result {:?}", other)
        }

        net.set_domain("C", states(&["on", "off"]));
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::MissingCpt(ref v)) => assert_eq!(v, "C"),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn validate_repeated_state() {
        let mut net = chain();
        net.set_domain("A", states(&["t", "f", "t"]));
        match net.validate(LookupMode::ByState) {
            Err(BayesError::InvalidTable { ref variable, .. }) => assert_eq!(variable, "A"),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn validate_unknown_key() {
        let mut net = chain();
        net.set_cpt("A", Cpt::new(CptNode::distribution(&[("t", 0.5), ("maybe", 0.5)])));
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::InvalidTable { ref variable, ref reason }) => {
                assert_eq!(variable, "A");
                assert!(reason.contains("maybe"));
            },
            other => panic!("unexpected result {:?}", other)
        }
        // value-keyed tables have no per-level variable to check against
        assert!(net.validate(LookupMode::ByState).is_ok());
    }

    #[test]
    fn validate_missing_key() {
        let mut net = chain();
        net.set_cpt("A", Cpt::new(CptNode::distribution(&[("t", 1.0)])));
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::InvalidTable { ref reason, .. }) => assert!(reason.contains("A=f")),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn validate_depth() {
        let mut net = chain();
        // B's table is one level short of its scope [A, B]
        net.set_cpt("B", Cpt::new(CptNode::distribution(&[("t", 0.5), ("f", 0.5)])));
        assert!(net.validate(LookupMode::ByVariable).is_err());

        // and A's is one level too deep
        let mut net = chain();
        net.set_cpt("A", Cpt::new(CptNode::branch(vec![
            ("t", CptNode::distribution(&[("t", 0.5), ("f", 0.5)])),
            ("f", CptNode::distribution(&[("t", 0.5), ("f", 0.5)])),
        ])));
        assert!(net.validate(LookupMode::ByVariable).is_err());
    }

    #[test]
    fn validate_leaves() {
        let mut net = chain();
        net.set_cpt("A", Cpt::new(CptNode::distribution(&[("t", -0.1), ("f", 1.1)])));
        assert!(net.validate(LookupMode::ByState).is_err());

        net.set_cpt("A", Cpt::new(CptNode::branch(vec![])));
        assert!(net.validate(LookupMode::ByState).is_err());
    }

    #[test]
    fn validate_declared_scope() {
        let mut net = chain();
        net.set_cpt("A", Cpt::with_scope(&["Q"], CptNode::distribution(&[("t", 0.6), ("f", 0.4)])));
        match net.validate(LookupMode::ByVariable) {
            Err(BayesError::MissingVariable(ref v)) => assert_eq!(v, "Q"),
            other => panic!("unexpected result {:?}", other)
        }

        net.set_cpt("A", Cpt::with_scope(&["B"], CptNode::distribution(&[("t", 0.6), ("f", 0.4)])));
        assert!(net.validate(LookupMode::ByVariable).is_err());
    }

}
