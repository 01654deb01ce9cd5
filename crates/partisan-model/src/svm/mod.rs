mod kernel;
mod solver;

use core::fmt;

use sprs::{CsMat, CsVec};
use tracing::{debug, info};

use crate::ModelError;

pub use kernel::Kernel;

/// Hyperparameters for [`Svc::fit`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SvcParams {
    /// Regularization strength (box constraint on the multipliers).
    pub c: f64,
    /// KKT violation tolerance.
    pub tol: f64,
    /// Passes without a multiplier update before the solver stops.
    pub max_passes: usize,
    /// Kernel scaling; `None` resolves to `1 / n_features` at fit time.
    pub gamma: Option<f64>,
    pub kernel: Kernel,
}

impl SvcParams {
    #[must_use]
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    #[must_use]
    pub fn with_c(mut self, c: f64) -> Self {
        assert!(c > 0.0, "C must be positive");
        self.c = c;
        self
    }

    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        assert!(gamma > 0.0, "gamma must be positive");
        self.gamma = Some(gamma);
        self
    }
}

impl Default for SvcParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            tol: 1e-3,
            max_passes: 10,
            gamma: None,
            kernel: Kernel::default(),
        }
    }
}

/// Binary kernel support-vector classifier over sparse feature rows.
///
/// The fitted state is self-contained: support vectors are owned copies of
/// the relevant training rows, so the classifier outlives the training
/// matrix.
#[derive(Debug, Clone)]
pub struct Svc<L> {
    kernel: Kernel,
    gamma: f64,
    n_features: usize,
    /// The two class labels in ascending order; `classes[1]` is the
    /// positive side of the decision function.
    classes: [L; 2],
    support: Vec<CsVec<f64>>,
    support_sq: Vec<f64>,
    /// `alpha_i * y_i` for each support vector.
    coeffs: Vec<f64>,
    bias: f64,
}

impl<L: Copy + Eq + Ord + fmt::Debug> Svc<L> {
    /// Fit a C-SVM on the feature matrix and labels.
    ///
    /// Fails on degenerate input: row/label mismatch, an empty or
    /// feature-less matrix, or labels that do not contain exactly two
    /// distinct classes.
    pub fn fit(x: &CsMat<f64>, y: &[L], params: &SvcParams) -> Result<Self, ModelError> {
        if x.rows() != y.len() {
            return Err(ModelError::InvalidData(format!(
                "feature matrix has {} rows but {} labels were supplied",
                x.rows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(ModelError::InvalidData(
                "cannot fit on an empty training set".into(),
            ));
        }
        if x.cols() == 0 {
            return Err(ModelError::InvalidData(
                "feature matrix has no columns".into(),
            ));
        }

        let mut classes: Vec<L> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        match classes.len() {
            2 => {}
            1 => {
                return Err(ModelError::TrainingFailed(format!(
                    "training labels contain a single class ({:?})",
                    classes[0]
                )))
            }
            n => {
                return Err(ModelError::TrainingFailed(format!(
                    "expected exactly 2 classes, found {n}"
                )))
            }
        }
        let classes = [classes[0], classes[1]];
        let signs: Vec<f64> = y
            .iter()
            .map(|&label| if label == classes[1] { 1.0 } else { -1.0 })
            .collect();

        let gamma = params.gamma.unwrap_or(1.0 / x.cols() as f64);
        let kernel = params.kernel;
        info!(%kernel, gamma, c = params.c, num_rows = x.rows(), "Fitting SVC");

        let rows: Vec<CsVec<f64>> = x.outer_iterator().map(|row| row.to_owned()).collect();
        let sq: Vec<f64> = rows.iter().map(|row| row.dot(row)).collect();

        // Dense Gram matrix; training sets here are small enough that the
        // n^2 kernel evaluations dominate, not the memory.
        let n = rows.len();
        let mut gram = vec![0.0_f64; n * n];
        for i in 0..n {
            for j in 0..=i {
                let k = kernel.evaluate(rows[i].view(), rows[j].view(), sq[i], sq[j], gamma);
                gram[i * n + j] = k;
                gram[j * n + i] = k;
            }
        }

        let solution = solver::solve(&gram, &signs, params.c, params.tol, params.max_passes);

        let mut support = Vec::new();
        let mut support_sq = Vec::new();
        let mut coeffs = Vec::new();
        for (i, &alpha) in solution.alphas.iter().enumerate() {
            if alpha > 1e-12 {
                coeffs.push(alpha * signs[i]);
                support_sq.push(sq[i]);
                support.push(rows[i].clone());
            }
        }
        debug!(
            support_vectors = support.len(),
            bias = solution.bias,
            "SVC fit complete"
        );

        Ok(Self {
            kernel,
            gamma,
            n_features: x.cols(),
            classes,
            support,
            support_sq,
            coeffs,
            bias: solution.bias,
        })
    }

    /// Signed distance to the separating surface for each input row.
    pub fn decision_function(&self, x: &CsMat<f64>) -> Result<Vec<f64>, ModelError> {
        if x.cols() != self.n_features {
            return Err(ModelError::InvalidData(format!(
                "input has {} features, classifier was trained on {}",
                x.cols(),
                self.n_features
            )));
        }
        Ok(x.outer_iterator()
            .map(|row| {
                let sq = row.dot(&row);
                let mut decision = self.bias;
                for ((sv, &sv_sq), &coeff) in
                    self.support.iter().zip(&self.support_sq).zip(&self.coeffs)
                {
                    decision +=
                        coeff * self.kernel.evaluate(sv.view(), row.view(), sv_sq, sq, self.gamma);
                }
                decision
            })
            .collect())
    }

    /// Predict a class label for each input row.
    pub fn predict(&self, x: &CsMat<f64>) -> Result<Vec<L>, ModelError> {
        let decisions = self.decision_function(x)?;
        Ok(decisions
            .into_iter()
            .map(|decision| {
                if decision > 0.0 {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            })
            .collect())
    }

    #[must_use]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    #[must_use]
    pub fn num_support_vectors(&self) -> usize {
        self.support.len()
    }
}

#[cfg(test)]
mod tests {
    use sprs::TriMat;

    use super::*;

    /// Dense rows -> CSR matrix.
    fn matrix(rows: &[&[f64]]) -> CsMat<f64> {
        let cols = rows[0].len();
        let mut tri = TriMat::new((rows.len(), cols));
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != 0.0 {
                    tri.add_triplet(i, j, value);
                }
            }
        }
        tri.to_csr()
    }

    fn separable() -> (CsMat<f64>, Vec<i64>) {
        let x = matrix(&[
            &[0.0, 0.2],
            &[0.1, 0.0],
            &[0.0, 0.0],
            &[4.0, 4.2],
            &[4.1, 3.9],
            &[3.8, 4.0],
        ]);
        let y = vec![0, 0, 0, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn linear_kernel_separates_clusters() {
        let (x, y) = separable();
        let params = SvcParams::default().with_kernel(Kernel::Linear);
        let svc = Svc::fit(&x, &y, &params).unwrap();
        assert_eq!(svc.predict(&x).unwrap(), y);
        assert!(svc.num_support_vectors() > 0);
    }

    #[test]
    fn rbf_kernel_separates_clusters() {
        let (x, y) = separable();
        let params = SvcParams::default().with_gamma(0.5);
        let svc = Svc::fit(&x, &y, &params).unwrap();
        assert_eq!(svc.predict(&x).unwrap(), y);
    }

    #[test]
    fn single_class_labels_fail() {
        let (x, _) = separable();
        let y = vec![1; 6];
        let params = SvcParams::default();
        assert!(matches!(
            Svc::fit(&x, &y, &params),
            Err(ModelError::TrainingFailed(_))
        ));
    }

    #[test]
    fn label_count_mismatch_fails() {
        let (x, _) = separable();
        assert!(matches!(
            Svc::fit(&x, &[0, 1], &SvcParams::default()),
            Err(ModelError::InvalidData(_))
        ));
    }

    #[test]
    fn feature_dim_mismatch_on_predict_fails() {
        let (x, y) = separable();
        let svc = Svc::fit(&x, &y, &SvcParams::default().with_kernel(Kernel::Linear)).unwrap();
        let wrong = matrix(&[&[1.0, 2.0, 3.0]]);
        assert!(matches!(
            svc.predict(&wrong),
            Err(ModelError::InvalidData(_))
        ));
    }
}
