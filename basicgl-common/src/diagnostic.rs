use enum_assoc::Assoc;
use std::fmt;

use crate::ShaderStage;

/// Failure category. Each category carries the fixed tag it is logged under.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Assoc)]
#[func(pub fn tag(&self) -> &'static str)]
pub enum DiagnosticKind {
    #[assoc(tag = "ERROR::SHADER::FILE_NOT_SUCCESSFULLY_READ")]
    FileRead,
    #[assoc(tag = "ERROR::SHADER::VERTEX::COMPILATION_FAILED")]
    VertexCompile,
    #[assoc(tag = "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED")]
    FragmentCompile,
    #[assoc(tag = "ERROR::SHADER::PROGRAM::LINKING_FAILED")]
    ProgramLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// `None` for link failures, which belong to the program as a whole.
    pub stage: Option<ShaderStage>,
    pub detail: String,
}

impl Diagnostic {
    pub fn file_read(stage: ShaderStage, detail: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::FileRead,
            stage: Some(stage),
            detail: detail.into(),
        }
    }

    pub fn compile(stage: ShaderStage, detail: impl Into<String>) -> Self {
        Diagnostic {
            kind: stage.compile_failure(),
            stage: Some(stage),
            detail: detail.into(),
        }
    }

    pub fn link(detail: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ProgramLink,
            stage: None,
            detail: detail.into(),
        }
    }

    pub fn emit(&self) {
        log::error!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail.trim_end();
        if detail.is_empty() {
            f.write_str(self.kind.tag())
        } else {
            write!(f, "{}\n{}", self.kind.tag(), detail)
        }
    }
}
