use thiserror::Error;

/// Coarse compile outcome. Details are in the diagnostic sink.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("parse failure")]
    Parse,

    #[error("syntax error")]
    Syntax,

    #[error("module validation error")]
    Validation,

    #[error("failed to serialize syntax tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    /// The module reported a fault through the fault import.
    #[error("runtime error")]
    Runtime,

    /// Any other execution failure, exactly as the host produced it.
    #[error(transparent)]
    Host(wasmtime::Error),
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Run(#[from] RunError),
}
