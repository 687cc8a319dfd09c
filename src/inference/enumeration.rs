//! Defines a `ConditionalInferenceEngine` that answers posterior queries by enumeration.
//!
//! For every state `q` of the query variable the engine sums, over every joint assignment `h` of
//! the hidden variables, the product of the priced factors:
//!
//! ```text
//!     score(q) = sum_h prod_P CPT_P(evidence, q, h)
//! ```
//!
//! and normalizes the scores. The work is proportional to the product of the hidden domain sizes,
//! i.e. exponential in the number of variables that are neither observed nor queried.

use crate::cpt::{Cpt, LookupMode};
use crate::model::BayesianNetwork;
use crate::util::{BayesError, Result};
use crate::variable::Assignment;
use super::combinations::CombinationGenerator;
use super::normalize::normalize;
use super::{ConditionalInferenceEngine, Posterior};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace};

use std::iter;


/// Which conditional probability tables are multiplied into each term of the sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorScope {
    /// Only the tables of the query's ancestor closure. Descendants of the query are never
    /// priced, so observing one of them does not move the result away from the query's prior.
    QueryAncestors,

    /// Every table of the network, i.e. the full joint distribution.
    AllVariables
}

impl Default for FactorScope {
    fn default() -> Self {
        FactorScope::QueryAncestors
    }
}


/// Knobs for an `EnumerationEngine`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {

    /// How CPT levels are matched against an assignment
    pub lookup: LookupMode,

    /// Which tables are priced
    pub scope: FactorScope,

    /// Refuse queries needing more hidden-variable combinations than this
    pub max_combinations: Option<u64>

}

impl EngineOptions {

    pub fn lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn scope(mut self, scope: FactorScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn max_combinations(mut self, budget: u64) -> Self {
        self.max_combinations = Some(budget);
        self
    }
}


/// A priced table: the variable, its CPT and the variables keying each level
struct PricedTable<'a> {
    var: &'a str,
    cpt: &'a Cpt,
    scope: Vec<&'a str>
}


/// Exact inference by brute-force enumeration over a `BayesianNetwork`.
///
/// The engine is stateless between queries; the network is only read.
pub struct EnumerationEngine<'a> {

    /// the network to query
    network: &'a BayesianNetwork,

    options: EngineOptions

}

impl<'a> EnumerationEngine<'a> {

    pub fn new(network: &'a BayesianNetwork) -> Self {
        EnumerationEngine::with_options(network, EngineOptions::default())
    }

    pub fn with_options(network: &'a BayesianNetwork, options: EngineOptions) -> Self {
        EnumerationEngine { network, options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The hidden variables of a query and their domains, in node order.
    ///
    /// These are the nodes that are neither the query nor observed. Under `LookupMode::ByVariable`
    /// only the variables some priced table is keyed on are kept: any other variable would
    /// multiply every score by the same constant.
    pub fn hidden_variables(&self, query: &str, evidence: &Assignment) -> Result<IndexMap<&'a str, &'a [String]>> {
        let tables = self.priced_tables(query)?;
        self.hidden_for(query, evidence, &tables)
    }

    /// Resolve the tables to price for `query`, before any enumeration happens
    fn priced_tables(&self, query: &str) -> Result<Vec<PricedTable<'a>>> {
        let network = self.network;

        // resolved under either scope, so a cycle or an undefined ancestor always aborts
        let ancestors = network.ancestors(query)?;
        debug!(query, ancestors = ?ancestors, "resolved ancestor closure");

        // the closure owns its names; map them back onto the network's
        let closure = ancestors.iter()
                               .map(|var| {
                                   network.nodes()
                                          .get(var.as_str())
                                          .map(String::as_str)
                                          .ok_or_else(|| BayesError::MissingVariable(var.clone()))
                               })
                               .collect::<Result<Vec<&'a str>>>()?;

        let priced: Vec<&'a str> = match self.options.scope {
            FactorScope::QueryAncestors => closure,
            FactorScope::AllVariables => network.nodes().iter().map(String::as_str).collect(),
        };

        priced.into_iter()
              .map(|var| -> Result<PricedTable<'a>> {
                  let cpt = network.cpt(var).ok_or_else(|| BayesError::MissingCpt(String::from(var)))?;
                  Ok(PricedTable { var, cpt, scope: network.cpt_scope(var) })
              })
              .collect()
    }

    fn hidden_for(
        &self,
        query: &str,
        evidence: &Assignment,
        tables: &[PricedTable<'a>]
    ) -> Result<IndexMap<&'a str, &'a [String]>> {
        let keyed: Option<IndexSet<&str>> = match self.options.lookup {
            LookupMode::ByVariable => Some(tables.iter().flat_map(|t| t.scope.iter().cloned()).collect()),
            LookupMode::ByState => None,
        };

        let network = self.network;
        let mut hidden = IndexMap::new();
        for var in network.nodes().iter().map(String::as_str) {
            if var == query || evidence.contains(var) {
                continue;
            }
            if let Some(ref keyed) = keyed {
                if ! keyed.contains(var) {
                    continue;
                }
            }

            let domain = network.domain(var).ok_or_else(|| BayesError::MissingDomain(String::from(var)))?;
            hidden.insert(var, domain);
        }

        Ok(hidden)
    }

    /// Reject evidence the network cannot explain, or that pins the query
    fn check_evidence(&self, query: &str, evidence: &Assignment) -> Result<()> {
        for (var, state) in evidence.iter() {
            if var == query {
                return Err(BayesError::QueryObserved(String::from(var)));
            }
            if ! self.network.contains(var) {
                return Err(BayesError::MissingVariable(String::from(var)));
            }

            let domain = self.network.domain(var).ok_or_else(|| BayesError::MissingDomain(String::from(var)))?;
            if ! domain.iter().any(|s| s == state) {
                return Err(BayesError::UnknownState { variable: String::from(var), state: String::from(state) });
            }
        }

        Ok(())
    }
}

impl<'a> ConditionalInferenceEngine for EnumerationEngine<'a> {

    fn posterior(&self, query: &str, evidence: &Assignment) -> Result<Posterior> {
        ///////////////////////////////////////////////////////////////////////
        // 1) Check the query against the network
        if ! self.network.contains(query) {
            return Err(BayesError::MissingVariable(String::from(query)));
        }
        let query_domain = self.network.domain(query)
                                       .ok_or_else(|| BayesError::MissingDomain(String::from(query)))?;
        self.check_evidence(query, evidence)?;

        ///////////////////////////////////////////////////////////////////////
        // 2) Resolve the tables to price and the variables to sum out
        let tables = self.priced_tables(query)?;
        let hidden = self.hidden_for(query, evidence, &tables)?;

        debug!(%evidence, "evidence");
        debug!(hidden = ?hidden, "hidden variable domains");
        debug!(query, domain = ?query_domain, "query domain");

        let generator = CombinationGenerator::new(hidden.into_iter());
        let required = generator.len();
        if let Some(budget) = self.options.max_combinations {
            if required > budget {
                return Err(BayesError::BudgetExceeded { required, budget });
            }
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Sum the product of the priced factors over every combination, per query state
        let mut scores = Vec::with_capacity(query_domain.len());
        for q in query_domain.iter() {
            let mut score = 0.0;

            for combination in generator.iter() {
                // a fresh assignment per term; the evidence itself is never touched
                let full = evidence.extended(iter::once((query, q.as_str())).chain(combination.iter()));

                let mut product = 1.0;
                let mut labels = Vec::with_capacity(tables.len());
                for table in tables.iter() {
                    let factor = table.cpt.evaluate(table.var, &table.scope, &full, self.options.lookup)?;
                    product *= factor.probability();
                    labels.push(format!("{}={:.4}", factor.label(), factor.probability()));
                }

                trace!(assignment = %full, factors = %labels.join(" * "), product = %format!("{:.4}", product));
                score += product;
            }

            debug!(query, state = %q, score = %format!("{:.4}", score), "summed");
            scores.push((q.clone(), score));
        }

        ///////////////////////////////////////////////////////////////////////
        // 4) Normalize
        let distribution = normalize(&scores)?;
        let (best, p) = distribution.most_probable();
        info!(query, state = best, probability = %format!("{:.4}", p), "most probable state");

        Ok(Posterior::new(query, evidence.clone(), scores, distribution))
    }

}
