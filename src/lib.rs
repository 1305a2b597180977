pub mod aggregate;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod model;
pub mod neighbors;
pub mod standardize;

pub use aggregate::{Outcome, Prediction};
pub use dataset::Dataset;
pub use distance::{euclidean, Euclidean, Metric};
pub use error::{ModelError, Result};
pub use model::{KNNModel, Labels, Predictor};
pub use neighbors::{select_neighbors, Neighbor};
pub use standardize::{FeatureStats, Standardizer};
