mod matcher;
mod reconciler;

pub use matcher::{NameMatcher, SubstringNameMatcher};
pub use reconciler::{ComplianceReconciler, ReconciliationReport};
