pub mod aggregation;
pub mod coefficient;
pub mod deltas;
pub mod lifecycle;
pub mod points;
pub mod types;
pub mod weighting;

pub use aggregation::aggregate_season;
pub use coefficient::{RegionConfig, compute_coefficient};
pub use deltas::apply_deltas;
pub use lifecycle::advance_lifecycle;
pub use points::{PointTable, PointTableSet};
pub use types::Diagnostic;
pub use weighting::compute_ranking;
