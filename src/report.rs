//! Human readable report of a `Posterior`, with every number printed to four decimal places.

use crate::inference::Posterior;

use std::fmt;

impl fmt::Display for Posterior {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Query: {}", self.query())?;
        writeln!(f, "Evidence: {}", self.evidence())?;

        writeln!(f, "Scores:")?;
        for &(ref state, score) in self.scores() {
            writeln!(f, "  {}: {:.4}", state, score)?;
        }

        writeln!(f, "Normalized:")?;
        for &(ref state, p) in self.distribution().entries() {
            writeln!(f, "  {}: {:.4}", state, p)?;
        }

        let (state, p) = self.most_probable();
        write!(f, "\n'{}' is the most probable state of {} with probability {:.4}", state, self.query(), p)
    }

}
