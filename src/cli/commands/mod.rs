//! CLI command implementations.

mod config;
mod doctor;
mod info;
mod summarize;
mod transcript;
mod translate;

pub use config::run_config;
pub use doctor::run_doctor;
pub use info::run_info;
pub use summarize::{run_summarize, SummarizeOptions};
pub use transcript::run_transcript;
pub use translate::run_translate;
