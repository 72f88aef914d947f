pub mod breakdowns;
pub mod engine;
pub mod errors;
pub mod period;
pub mod realtime;
pub mod rows;
pub mod spec;
pub mod summarize;
pub mod timeseries;

pub use engine::ReportEngine;
pub use errors::ReportError;
pub use period::Period;
