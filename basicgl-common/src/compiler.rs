use std::path::Path;

use crate::{
    source::load_stage_source, DataSource, Diagnostic, Error, Result, ShaderBackend,
    ShaderStage,
};

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ReadFailurePolicy {
    /// Compile the empty text anyway and let the backend report it.
    #[default]
    Submit,
    /// Allocate nothing and return without a program.
    Abort,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct CompileOptions {
    pub on_read_failure: ReadFailurePolicy,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct StageStatus {
    pub source_read: bool,
    pub compiled: bool,
}

#[derive(Debug, Clone)]
pub struct CompileOutcome<P> {
    /// Present whenever the backend allocated a program, linked or not.
    pub program: Option<P>,
    pub vertex: StageStatus,
    pub fragment: StageStatus,
    pub linked: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the backend refused to create the program object.
    pub allocation_error: Option<String>,
}

impl<P: Copy> CompileOutcome<P> {
    fn new(
        statuses: [StageStatus; 2],
        program: Option<P>,
        linked: bool,
        diagnostics: Vec<Diagnostic>,
        allocation_error: Option<String>,
    ) -> Self {
        CompileOutcome {
            program,
            vertex: statuses[0],
            fragment: statuses[1],
            linked,
            diagnostics,
            allocation_error,
        }
    }

    pub fn stage(&self, stage: ShaderStage) -> StageStatus {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }

    pub fn is_success(&self) -> bool {
        self.program.is_some() && self.linked && self.diagnostics.is_empty()
    }

    /// Hands out the program only if every step succeeded. A broken program
    /// is deleted so it cannot leak.
    pub unsafe fn into_program_or_delete<B>(self, backend: &B) -> Result<P>
    where
        B: ShaderBackend<Program = P>,
    {
        let success = self.is_success();
        match self.program {
            Some(program) if success => Ok(program),
            Some(program) => {
                backend.delete_program(program);
                Err(Error::Build(self.diagnostics))
            }
            None => match self.allocation_error {
                Some(message) => Err(Error::Allocation {
                    what: "shader program",
                    message,
                }),
                None => Err(Error::Build(self.diagnostics)),
            },
        }
    }
}

#[derive(Default)]
struct Report(Vec<Diagnostic>);

impl Report {
    fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.0.push(diagnostic);
    }
}

pub struct ShaderCompiler<'a, B: ShaderBackend> {
    backend: &'a B,
    options: CompileOptions,
}

impl<'a, B: ShaderBackend> ShaderCompiler<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        ShaderCompiler {
            backend,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub unsafe fn compile(
        &self,
        vertex: DataSource<'_, str>,
        fragment: DataSource<'_, str>,
    ) -> CompileOutcome<B::Program> {
        let mut report = Report::default();
        let mut statuses = [StageStatus::default(); 2];

        let sources = [
            load_stage_source(ShaderStage::Vertex, vertex),
            load_stage_source(ShaderStage::Fragment, fragment),
        ];
        let mut texts = Vec::with_capacity(sources.len());
        for (status, source) in statuses.iter_mut().zip(sources) {
            status.source_read = source.is_read();
            if let Some(diagnostic) = source.diagnostic {
                report.push(diagnostic);
            }
            texts.push(source.text);
        }

        if self.options.on_read_failure == ReadFailurePolicy::Abort
            && statuses.iter().any(|status| !status.source_read)
        {
            log::warn!("Skipping shader compilation, a stage source could not be read");
            return CompileOutcome::new(statuses, None, false, report.0, None);
        }

        let mut units = Vec::with_capacity(ShaderStage::ALL.len());
        for ((stage, text), status) in ShaderStage::ALL.into_iter().zip(&texts).zip(&mut statuses)
        {
            if let Some((shader, compiled)) = self.compile_stage(stage, text, &mut report) {
                status.compiled = compiled;
                units.push(shader);
            }
        }

        let program = match self.backend.create_program() {
            Ok(program) => program,
            Err(message) => {
                log::error!("Cannot create shader program: {}", message);
                for &shader in &units {
                    self.backend.delete_shader(shader);
                }
                return CompileOutcome::new(statuses, None, false, report.0, Some(message));
            }
        };

        for &shader in &units {
            self.backend.attach_shader(program, shader);
        }
        self.backend.link_program(program);
        let linked = self.backend.get_program_link_status(program);
        if !linked {
            report.push(Diagnostic::link(self.backend.get_program_info_log(program)));
        }

        // Units are never kept past linking, whatever the outcome.
        for &shader in &units {
            self.backend.detach_shader(program, shader);
            self.backend.delete_shader(shader);
        }

        log::debug!("Built shader program {:?} (linked: {})", program, linked);
        CompileOutcome::new(statuses, Some(program), linked, report.0, None)
    }

    unsafe fn compile_stage(
        &self,
        stage: ShaderStage,
        source: &str,
        report: &mut Report,
    ) -> Option<(B::Shader, bool)> {
        let shader = match self.backend.create_shader(stage) {
            Ok(shader) => shader,
            Err(message) => {
                report.push(Diagnostic::compile(
                    stage,
                    format!("cannot create {} shader: {}", stage, message),
                ));
                return None;
            }
        };

        self.backend.shader_source(shader, source);
        self.backend.compile_shader(shader);
        let compiled = self.backend.get_shader_compile_status(shader);
        if !compiled {
            report.push(Diagnostic::compile(
                stage,
                self.backend.get_shader_info_log(shader),
            ));
        }
        Some((shader, compiled))
    }
}

/// Reads, compiles and links the two files into a program.
///
/// Problems along the way are only logged: the program is returned even when
/// a file was unreadable or a stage failed to compile or link, and the caller
/// owns it either way. `None` means the backend could not create a program
/// object at all.
pub unsafe fn compile_shaders<B: ShaderBackend>(
    backend: &B,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Option<B::Program> {
    ShaderCompiler::new(backend)
        .compile(
            DataSource::Path(vertex_path.as_ref()),
            DataSource::Path(fragment_path.as_ref()),
        )
        .program
}
