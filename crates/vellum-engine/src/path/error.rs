/// Errors produced while building or tessellating a path.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A shape helper was given arguments it cannot represent
    /// (non-positive extents, empty point lists, non-finite values).
    #[error("illegal path argument: {0}")]
    IllegalArgument(&'static str),

    #[error("tessellation failed: {0:?}")]
    Tessellation(lyon::tessellation::TessellationError),
}

impl From<lyon::tessellation::TessellationError> for PathError {
    fn from(err: lyon::tessellation::TessellationError) -> Self {
        PathError::Tessellation(err)
    }
}
