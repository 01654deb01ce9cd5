use sprs::CsMat;
use tracing::debug;

use crate::ModelError;

/// Baseline that predicts the mode of the training labels for every input,
/// ignoring feature content entirely.
///
/// The untrained/trained lifecycle is explicit: `predict` before `fit`
/// fails with [`ModelError::NotTrained`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MajorityClassifier<L> {
    majority: Option<L>,
}

impl<L: Copy + Eq> MajorityClassifier<L> {
    #[must_use]
    pub fn new() -> Self {
        Self { majority: None }
    }

    /// Store the mode of `y`. Ties go to the label encountered first in `y`.
    /// Features are accepted for interface symmetry and ignored.
    pub fn fit(&mut self, _x: &CsMat<f64>, y: &[L]) -> Result<(), ModelError> {
        if y.is_empty() {
            return Err(ModelError::InvalidData(
                "cannot fit on an empty label vector".into(),
            ));
        }

        // Counts keep first-encounter order, so a strictly-greater scan
        // resolves ties in favor of the earliest label.
        let mut counts: Vec<(L, usize)> = Vec::new();
        for &label in y {
            match counts.iter_mut().find(|(seen, _)| *seen == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label, 1)),
            }
        }
        let mut majority = counts[0].0;
        let mut count = counts[0].1;
        for &(label, n) in &counts[1..] {
            if n > count {
                majority = label;
                count = n;
            }
        }

        debug!(count, total = y.len(), "Fitted majority baseline");
        self.majority = Some(majority);
        Ok(())
    }

    /// Return the stored mode once per input row.
    pub fn predict(&self, x: &CsMat<f64>) -> Result<Vec<L>, ModelError> {
        let majority = self.majority.ok_or(ModelError::NotTrained)?;
        Ok(vec![majority; x.rows()])
    }
}
