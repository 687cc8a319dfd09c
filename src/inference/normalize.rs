//! Normalization of unnormalized per-state scores into a `Distribution`.

use crate::util::{BayesError, Result};


/// A normalized distribution over the states of one variable, in domain order.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {

    /// `(state, probability)` pairs summing to one
    entries: Vec<(String, f64)>,

    /// Index of the most probable entry
    argmax: usize

}

impl Distribution {

    /// The `(state, probability)` pairs, in input order
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// The probability of `state`
    pub fn probability(&self, state: &str) -> Option<f64> {
        self.entries.iter().find(|&&(ref s, _)| s == state).map(|&(_, p)| p)
    }

    /// The most probable state and its probability. Ties go to the earliest state.
    pub fn most_probable(&self) -> (&str, f64) {
        let (ref state, p) = self.entries[self.argmax];
        (state.as_str(), p)
    }
}


/// Rescale `scores` so they sum to one.
///
/// # Errors
/// * `BayesError::DegenerateDistribution` if the scores are empty or do not sum to a positive,
///   finite number
pub fn normalize(scores: &[(String, f64)]) -> Result<Distribution> {
    let total: f64 = scores.iter().map(|&(_, s)| s).sum();
    if scores.is_empty() || ! total.is_finite() || total <= 0.0 {
        return Err(BayesError::DegenerateDistribution { total });
    }

    let entries: Vec<(String, f64)> = scores.iter()
                                            .map(|&(ref state, s)| (state.clone(), s / total))
                                            .collect();

    // strictly greater, so the first of several equal maxima is kept
    let mut argmax = 0;
    for (i, &(_, p)) in entries.iter().enumerate() {
        if p > entries[argmax].1 {
            argmax = i;
        }
    }

    Ok(Distribution { entries, argmax })
}


#[cfg(test)]
mod tests {

    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|&(s, p)| (String::from(s), p)).collect()
    }

    #[test]
    fn rescales() {
        let d = normalize(&scores(&[("t", 0.54), ("f", 0.08)])).unwrap();
        assert!((d.probability("t").unwrap() - 0.54 / 0.62).abs() < 1e-12);
        assert!((d.probability("f").unwrap() - 0.08 / 0.62).abs() < 1e-12);
        assert_eq!(d.most_probable().0, "t");

        let total: f64 = d.entries().iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn keeps_order() {
        let d = normalize(&scores(&[("low", 1.0), ("mid", 2.0), ("high", 1.0)])).unwrap();
        let states: Vec<&str> = d.entries().iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(states, vec!["low", "mid", "high"]);
        assert_eq!(d.most_probable(), ("mid", 0.5));
        assert_eq!(d.probability("none"), None);
    }

    #[test]
    fn ties_go_to_first() {
        let d = normalize(&scores(&[("a", 0.2), ("b", 0.4), ("c", 0.4)])).unwrap();
        assert_eq!(d.most_probable().0, "b");
    }

    #[test]
    fn zero_mass_is_degenerate() {
        match normalize(&scores(&[("t", 0.0), ("f", 0.0)])) {
            Err(BayesError::DegenerateDistribution { total }) => assert_eq!(total, 0.0),
            other => panic!("unexpected result {:?}", other)
        }
        assert!(normalize(&[]).is_err());
        assert!(normalize(&scores(&[("t", f64::NAN)])).is_err());
    }

}
