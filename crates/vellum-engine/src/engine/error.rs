use super::LifecycleState;

/// Failures reported by the result-returning entry points.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The operation is not valid in the current lifecycle state.
    #[error("engine is {state}; operation requires a different lifecycle state")]
    NotReady { state: LifecycleState },

    #[error("engine is already initialized")]
    AlreadyInitialized,

    #[error("graphics backend failed: {0:#}")]
    Backend(anyhow::Error),

    #[error("scene failed to draw: {0:#}")]
    Scene(anyhow::Error),
}

impl EngineError {
    /// True for call-ordering mistakes by the host, as opposed to runtime
    /// failures.
    #[inline]
    pub fn is_precondition(&self) -> bool {
        matches!(self, EngineError::NotReady { .. } | EngineError::AlreadyInitialized)
    }
}
