//! CLI command implementations.

mod config;
mod document;
mod lecture;
mod mindmap;
mod serve;

pub use config::run_config;
pub use document::run_document;
pub use lecture::run_lecture;
pub use mindmap::run_mindmap;
pub use serve::run_serve;
