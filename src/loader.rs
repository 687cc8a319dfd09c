//! Reading networks and evidence from disk.
//!
//! A network definition is a JSON object:
//!
//! ```json
//! {
//!     "nodes": ["A", "B"],
//!     "edges": ["A -> B"],
//!     "states": { "A": ["t", "f"], "B": ["t", "f"] },
//!     "cpts": {
//!         "A": { "t": 0.6, "f": 0.4 },
//!         "B": { "t": { "t": 0.9, "f": 0.1 }, "f": { "t": 0.2, "f": 0.8 } }
//!     }
//! }
//! ```
//!
//! The keys `NODOS`, `ARISTAS`, `ESTADOS` and `PROBABILIDADES` are read as `nodes`, `edges`,
//! `states` and `cpts`. Edges may also be written as `["A", "B"]` pairs, leaves may be numeric
//! strings, and a table may declare the variables keying its levels with
//! `{ "scope": ["A", "B"], "table": {...} }`.
//!
//! Evidence is plain text with one `name = value` observation per line.

use crate::cpt::{Cpt, CptNode, LookupMode};
use crate::model::BayesianNetwork;
use crate::util::{BayesError, Result};
use crate::variable::Assignment;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use std::fmt;
use std::fs;
use std::path::Path;


/// The top level of a definition. The upper-case Spanish keys of older network files are
/// accepted as aliases.
#[derive(Debug, Deserialize)]
struct NetworkDefinition {
    #[serde(alias = "NODOS")]
    nodes: Vec<String>,

    #[serde(default, alias = "ARISTAS")]
    edges: Vec<EdgeDefinition>,

    #[serde(default, alias = "ESTADOS")]
    states: IndexMap<String, Vec<String>>,

    #[serde(default, alias = "PROBABILIDADES")]
    cpts: IndexMap<String, TableDefinition>
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EdgeDefinition {
    Arrow(String),
    Pair(String, String)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScopedTable {
    scope: Vec<String>,
    table: NodeDefinition
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TableDefinition {
    Scoped(ScopedTable),
    Bare(NodeDefinition)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeDefinition {
    Number(f64),
    Text(String),
    Branch(IndexMap<String, NodeDefinition>)
}

impl EdgeDefinition {

    /// The `(parent, child)` this edge connects
    fn endpoints(&self) -> Result<(&str, &str)> {
        let (parent, child) = match self {
            &EdgeDefinition::Pair(ref parent, ref child) => (parent.trim(), child.trim()),
            &EdgeDefinition::Arrow(ref arrow) => {
                let mut sides = arrow.splitn(2, "->");
                match (sides.next(), sides.next()) {
                    (Some(parent), Some(child)) => (parent.trim(), child.trim()),
                    _ => return Err(BayesError::Parse(format!("edge `{}` is not of the form `parent -> child`", arrow))),
                }
            }
        };

        if parent.is_empty() || child.is_empty() {
            return Err(BayesError::Parse(format!("edge {:?} has an empty endpoint", self)));
        }
        Ok((parent, child))
    }
}

impl TableDefinition {

    fn into_cpt(self, var: &str) -> Result<Cpt> {
        match self {
            TableDefinition::Bare(table) => Ok(Cpt::new(table.into_node(var)?)),
            TableDefinition::Scoped(ScopedTable { scope, table }) => {
                let scope: Vec<&str> = scope.iter().map(|s| s.trim()).collect();
                Ok(Cpt::with_scope(&scope, table.into_node(var)?))
            }
        }
    }
}

impl NodeDefinition {

    fn into_node(self, var: &str) -> Result<CptNode> {
        match self {
            NodeDefinition::Number(p) => Ok(CptNode::Leaf(p)),
            NodeDefinition::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map(CptNode::Leaf)
                    .map_err(|_| BayesError::Parse(format!("`{}` in the table of `{}` is not a number", text, var)))
            },
            NodeDefinition::Branch(children) => {
                let children = children.into_iter()
                                       .map(|(state, child)| -> Result<(String, CptNode)> {
                                           Ok((state, child.into_node(var)?))
                                       })
                                       .collect::<Result<IndexMap<String, CptNode>>>()?;
                Ok(CptNode::Branch(children))
            }
        }
    }
}


/// Build a network from its JSON definition.
///
/// The network is not validated; see `load_network`.
///
/// # Errors
/// * `BayesError::Json` if `json` is not a network definition
/// * `BayesError::Parse` for a malformed edge or a leaf that is not a number
pub fn parse_network(json: &str) -> Result<BayesianNetwork> {
    let definition: NetworkDefinition = serde_json::from_str(json)?;
    let mut network = BayesianNetwork::new();

    for node in definition.nodes.iter() {
        network.add_node(node.trim());
    }

    for edge in definition.edges.iter() {
        let (parent, child) = edge.endpoints()?;
        network.add_edge(parent, child);
    }

    for (var, states) in definition.states.into_iter() {
        network.set_domain(var.trim(), states);
    }

    for (var, table) in definition.cpts.into_iter() {
        let cpt = table.into_cpt(&var)?;
        network.set_cpt(var.trim(), cpt);
    }

    Ok(network)
}

/// Read a network definition from `path` and check it for `mode` lookups.
///
/// # Errors
/// * `BayesError::Io` if the file cannot be read
/// * anything `parse_network` or `BayesianNetwork::validate` raise
pub fn load_network(path: &Path, mode: LookupMode) -> Result<BayesianNetwork> {
    let json = fs::read_to_string(path)?;
    let network = parse_network(&json)?;
    network.validate(mode)?;

    debug!(path = %path.display(), nodes = network.num_nodes(), "loaded network");
    Ok(network)
}


/// An evidence line that was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {

    /// 1-based line number
    pub line: usize,

    /// The offending line, trimmed
    pub content: String

}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: expected `name = value`, found `{}`", self.line, self.content)
    }
}

/// Parse `name = value` observations, one per line.
///
/// Blank lines are ignored. Lines without an `=`, or with nothing on one side of it, are skipped
/// and reported. A later observation of the same variable replaces an earlier one.
pub fn parse_evidence(text: &str) -> (Assignment, Vec<ParseWarning>) {
    let mut evidence = Assignment::new();
    let mut warnings = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut sides = line.splitn(2, '=');
        match (sides.next().map(str::trim), sides.next().map(str::trim)) {
            (Some(var), Some(state)) if ! var.is_empty() && ! state.is_empty() => {
                evidence.set(var, state);
            },
            _ => {
                let warning = ParseWarning { line: i + 1, content: String::from(line) };
                warn!(%warning, "skipping evidence line");
                warnings.push(warning);
            }
        }
    }

    (evidence, warnings)
}

/// Read evidence from `path`; see `parse_evidence`.
///
/// # Errors
/// * `BayesError::Io` if the file cannot be read
pub fn load_evidence(path: &Path) -> Result<(Assignment, Vec<ParseWarning>)> {
    let text = fs::read_to_string(path)?;
    Ok(parse_evidence(&text))
}
