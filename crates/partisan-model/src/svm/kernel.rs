use core::fmt;
use std::str::FromStr;

use sprs::CsVecView;

use crate::ModelError;

/// Kernel function for the support-vector classifier.
///
/// The set is closed: linear, polynomial, radial-basis, sigmoid. `gamma` is
/// shared scaling resolved at fit time (`1 / n_features` unless overridden).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Kernel {
    Linear,
    Polynomial { degree: u32, coef0: f64 },
    Rbf,
    Sigmoid { coef0: f64 },
}

impl Kernel {
    /// Evaluate the kernel on two sparse rows.
    ///
    /// `sq_a` / `sq_b` are the rows' squared L2 norms, precomputed by the
    /// caller so the RBF kernel does not re-walk each row.
    #[must_use]
    pub fn evaluate(
        &self,
        a: CsVecView<'_, f64>,
        b: CsVecView<'_, f64>,
        sq_a: f64,
        sq_b: f64,
        gamma: f64,
    ) -> f64 {
        let dot = a.dot(&b);
        match *self {
            Self::Linear => dot,
            Self::Polynomial { degree, coef0 } => (gamma * dot + coef0).powi(degree as i32),
            Self::Rbf => (-gamma * (sq_a - 2.0 * dot + sq_b)).exp(),
            Self::Sigmoid { coef0 } => (gamma * dot + coef0).tanh(),
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::Rbf
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Polynomial { .. } => write!(f, "poly"),
            Self::Rbf => write!(f, "rbf"),
            Self::Sigmoid { .. } => write!(f, "sigmoid"),
        }
    }
}

impl FromStr for Kernel {
    type Err = ModelError;

    /// Accepts `linear`, `poly`, `rbf`, `sigmoid`; polynomial and sigmoid
    /// get their conventional defaults (degree 3, coef0 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "poly" => Ok(Self::Polynomial {
                degree: 3,
                coef0: 0.0,
            }),
            "rbf" => Ok(Self::Rbf),
            "sigmoid" => Ok(Self::Sigmoid { coef0: 0.0 }),
            other => Err(ModelError::InvalidData(format!(
                "unknown kernel '{other}', expected one of linear|poly|rbf|sigmoid"
            ))),
        }
    }
}
