//! Error types for ProPresenter document generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a ProPresenter document.
///
/// The text pipeline itself is total; only the environment can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// The random source used for identifier generation is unavailable.
    #[error("Random source unavailable: {0}")]
    Entropy(String),

    /// A template slot was reached without a value to fill it.
    #[error("No value bound for slot {slot} in {template} template")]
    UnboundSlot {
        /// Name of the template being rendered.
        template: &'static str,
        /// Name of the slot that had no value.
        slot: &'static str,
    },
}
