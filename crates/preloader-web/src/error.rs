use preloader_core::ConfigValueError;
use thiserror::Error;

/// Why the preloader could not attach to the page.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("required element #{0} not found")]
    MissingElement(&'static str),
    #[error("invalid preloader options: {0}")]
    Options(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigValueError),
    #[error("DOM call failed: {0}")]
    Dom(String),
}
