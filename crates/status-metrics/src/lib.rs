pub mod guards;
pub mod metrics;

pub use guards::{flag_escalation, resolve_and_flag};
pub use metrics::StatusMetrics;
