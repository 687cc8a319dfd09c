//! Enumerates every joint assignment of a set of hidden variables.

use crate::variable::Assignment;

use itertools::Itertools;

use std::iter;


/// The Cartesian product of the domains of some variables.
///
/// The generator is restartable: every call to `iter` starts a fresh, lazy enumeration in
/// odometer order, with the last variable varying fastest.
#[derive(Clone, Debug)]
pub struct CombinationGenerator<'a> {

    /// The hidden variables and their domains, in enumeration order
    hidden: Vec<(&'a str, &'a [String])>

}

impl<'a> CombinationGenerator<'a> {

    pub fn new<I>(hidden: I) -> Self
        where I: IntoIterator<Item = (&'a str, &'a [String])>
    {
        CombinationGenerator { hidden: hidden.into_iter().collect() }
    }

    /// The variables being enumerated
    pub fn variables(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.hidden.iter().map(|&(var, _)| var)
    }

    /// The number of combinations, saturating at `u64::MAX`.
    ///
    /// With no hidden variables there is exactly one (empty) combination.
    pub fn len(&self) -> u64 {
        self.hidden.iter()
                   .fold(1u64, |acc, &(_, domain)| acc.saturating_mul(domain.len() as u64))
    }

    /// Check if there is nothing to enumerate, i.e. some hidden variable has an empty domain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a new enumeration
    pub fn iter(&self) -> Box<dyn Iterator<Item = Assignment> + 'a> {
        if self.hidden.is_empty() {
            // the product of no domains is a single empty assignment
            return Box::new(iter::once(Assignment::new()));
        }

        let names: Vec<&'a str> = self.variables().collect();
        let product = self.hidden.iter()
                                 .map(|&(_, domain)| domain.iter())
                                 .multi_cartesian_product();

        Box::new(product.map(move |states| {
            names.iter()
                 .zip(states)
                 .map(|(&var, state)| (var, state.as_str()))
                 .collect()
        }))
    }
}
