//! Ancestor resolution: the set of variables a query depends on through the graph.

use super::BayesianNetwork;
use crate::util::{BayesError, Result};

use indexmap::IndexSet;

use std::vec;

impl BayesianNetwork {

    /// The ancestor closure of `var`: `var` itself followed by every variable reachable by walking
    /// edges backward, in depth-first first-visit order.
    ///
    /// The traversal keeps an explicit stack holding the current descent path, so its depth is
    /// bounded by the number of nodes.
    ///
    /// # Errors
    /// * `BayesError::MissingVariable` if `var` is not a node
    /// * `BayesError::Cycle` if a parent is reached that is still on the descent path
    pub fn ancestors(&self, var: &str) -> Result<IndexSet<String>> {
        let root = match self.nodes.get(var) {
            Some(root) => root.as_str(),
            None => return Err(BayesError::MissingVariable(String::from(var))),
        };

        let mut closure = IndexSet::new();
        closure.insert(String::from(root));

        // each frame is a variable on the descent path and its parents still to visit
        let mut path: Vec<(&str, vec::IntoIter<&str>)> = vec![(root, self.parents(root).into_iter())];

        loop {
            let next = match path.last_mut() {
                Some(&mut (_, ref mut pending)) => pending.next(),
                None => break,
            };

            match next {
                Some(parent) => {
                    if path.iter().any(|&(on_path, _)| on_path == parent) {
                        return Err(BayesError::Cycle(String::from(parent)));
                    }
                    if closure.insert(String::from(parent)) {
                        path.push((parent, self.parents(parent).into_iter()));
                    }
                },
                None => {
                    path.pop();
                }
            }
        }

        Ok(closure)
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> BayesianNetwork {
        let mut net = BayesianNetwork::new();
        for n in nodes {
            net.add_node(n);
        }
        for &(parent, child) in edges {
            net.add_edge(parent, child);
        }
        net
    }

    fn names(set: &IndexSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn root_has_only_itself() {
        let net = graph(&["A", "B"], &[("A", "B")]);
        assert_eq!(names(&net.ancestors("A").unwrap()), vec!["A"]);
        assert_eq!(names(&net.ancestors("B").unwrap()), vec!["B", "A"]);
    }

    #[test]
    fn depth_first_order() {
        // Koller & Friedman's student network, with coherence on top of difficulty
        let net = graph(
            &["C", "D", "I", "G", "S", "L"],
            &[("C", "D"), ("D", "G"), ("I", "G"), ("I", "S"), ("G", "L")]
        );

        // parents of G are visited in adjacency order: D (then its parent C) before I
        assert_eq!(names(&net.ancestors("L").unwrap()), vec!["L", "G", "D", "C", "I"]);
        assert_eq!(names(&net.ancestors("S").unwrap()), vec!["S", "I"]);
    }

    #[test]
    fn diamond_visits_once() {
        let net = graph(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        assert_eq!(names(&net.ancestors("D").unwrap()), vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn unrelated_branches_excluded() {
        let net = graph(&["A", "B", "X", "Y"], &[("A", "B"), ("X", "Y"), ("B", "Y")]);
        let closure = net.ancestors("B").unwrap();
        assert!(! closure.contains("X"));
        assert!(! closure.contains("Y"));
    }

    #[test]
    fn missing_variable() {
        let net = graph(&["A"], &[]);
        match net.ancestors("Z") {
            Err(BayesError::MissingVariable(ref v)) => assert_eq!(v, "Z"),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn cycle_detected() {
        let net = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        match net.ancestors("C") {
            Err(BayesError::Cycle(_)) => (),
            other => panic!("unexpected result {:?}", other)
        }

        let net = graph(&["A"], &[("A", "A")]);
        assert!(net.ancestors("A").is_err());
    }

    #[test]
    fn cycle_above_the_query() {
        let net = graph(&["Q", "X", "Y"], &[("X", "Q"), ("X", "Y"), ("Y", "X")]);
        match net.ancestors("Q") {
            Err(BayesError::Cycle(ref v)) => assert_eq!(v, "X"),
            other => panic!("unexpected result {:?}", other)
        }
    }

}
