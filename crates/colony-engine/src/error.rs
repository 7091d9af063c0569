//! Error types for the engine binary.

use std::path::PathBuf;

/// Errors that can occur during engine startup and shutdown.
///
/// Once the tick loop is running nothing here can occur; controller
/// invocations are infallible and host rejections are handled in-loop.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] colony_core::config::ConfigError),

    /// The simulated room layout could not be built.
    #[error("layout error: {0}")]
    Layout(#[from] colony_sim::SimError),

    /// Persisted colony memory could not be read or written.
    #[error("memory persistence error at {path}: {message}")]
    Memory {
        /// The memory file involved.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}
