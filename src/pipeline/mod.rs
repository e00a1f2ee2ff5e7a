pub mod assemble;
pub mod chart;
pub mod classify;
pub mod format;
pub mod orchestrator;
pub mod pdf;
pub mod report;

pub use assemble::{FIELDS, PatientRecord};
pub use format::RiskReport;
pub use orchestrator::generate_report;
