//! Data quality diagnostics.
//!
//! Neither the validator nor the outlier query changes the dataset; both
//! only describe what they find.

mod outliers;
mod validator;

pub use outliers::{IqrFence, OutlierDetector, OutlierReport};
pub use validator::Validator;
