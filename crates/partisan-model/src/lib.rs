//! Classifiers and evaluation metrics: a majority-label baseline and a
//! kernel support-vector classifier trained by sequential minimal
//! optimization over sparse feature rows.

mod baseline;
mod error;
mod metrics;
mod svm;

pub use baseline::MajorityClassifier;
pub use error::ModelError;
pub use metrics::accuracy;
pub use svm::{Kernel, Svc, SvcParams};
