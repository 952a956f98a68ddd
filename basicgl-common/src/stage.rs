use enum_assoc::Assoc;

use crate::DiagnosticKind;

/// One independently compiled phase of the pipeline.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Assoc)]
#[func(pub fn name(&self) -> &'static str)]
#[func(pub fn compile_failure(&self) -> DiagnosticKind)]
pub enum ShaderStage {
    #[assoc(name = "vertex")]
    #[assoc(compile_failure = DiagnosticKind::VertexCompile)]
    Vertex,
    #[assoc(name = "fragment")]
    #[assoc(compile_failure = DiagnosticKind::FragmentCompile)]
    Fragment,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
