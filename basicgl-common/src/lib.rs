use std::{io, path::PathBuf};

pub mod backend;
pub use backend::ShaderBackend;
pub mod compiler;
pub use compiler::{
    compile_shaders, CompileOptions, CompileOutcome, ReadFailurePolicy, ShaderCompiler,
    StageStatus,
};
mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub mod source;
pub use source::DataSource;
mod stage;
pub use stage::ShaderStage;

#[cfg(test)]
mod mock;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read shader source {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("backend cannot allocate {what}: {message}")]
    Allocation { what: &'static str, message: String },

    #[error("shader program failed to build with {} diagnostic(s)", .0.len())]
    Build(Vec<Diagnostic>),
}
