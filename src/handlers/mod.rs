//! Handler builders and associated traits.
//!
//! Provides a minimal builder API for constructing handlers in a
//! type‑safe manner. Each builder implements [`HandlerBuilderTrait`]
//! which returns a shared [`Handler`] ready for registration with a
//! logger.

use std::sync::Arc;

use thiserror::Error;

use crate::handler::Handler;
use crate::level::LevelParseError;

pub mod humio_builder;

pub use humio_builder::HumioHandlerBuilder;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// The configured severity threshold is not a known level.
    #[error("invalid handler level: {0}")]
    InvalidLevel(#[from] LevelParseError),
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait: Send + Sync {
    type Handler: Handler + 'static;

    /// Build the concrete handler instance.
    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler behind a shared trait object.
    fn build(&self) -> Result<Arc<dyn Handler>, HandlerBuildError> {
        Ok(Arc::new(self.build_inner()?))
    }
}
