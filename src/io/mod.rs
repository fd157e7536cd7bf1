/// Command-line parsing and tool orchestration
pub mod cli;
/// Defaults and limits
pub mod configuration;
/// Error types and validation helpers
pub mod error;
/// Image loading, saving and heatmap rendering
pub mod image;
/// Terminal spinner
pub mod progress;
/// Text reports of tool outputs
pub mod report;
