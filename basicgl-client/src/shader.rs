use basicgl_common::{ShaderBackend, ShaderStage};
use glow::HasContext;

/// [`ShaderBackend`] over a current OpenGL context.
pub struct GlBackend<'a> {
    gl: &'a glow::Context,
}

impl<'a> GlBackend<'a> {
    pub fn new(gl: &'a glow::Context) -> Self {
        GlBackend { gl }
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl ShaderBackend for GlBackend<'_> {
    type Shader = glow::Shader;
    type Program = glow::Program;

    unsafe fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        self.gl.create_shader(shader_type(stage))
    }

    unsafe fn shader_source(&self, shader: glow::Shader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    unsafe fn compile_shader(&self, shader: glow::Shader) {
        self.gl.compile_shader(shader);
    }

    unsafe fn get_shader_compile_status(&self, shader: glow::Shader) -> bool {
        self.gl.get_shader_compile_status(shader)
    }

    // glow sizes the buffer from INFO_LOG_LENGTH, so long logs come back whole.
    unsafe fn get_shader_info_log(&self, shader: glow::Shader) -> String {
        self.gl.get_shader_info_log(shader)
    }

    unsafe fn delete_shader(&self, shader: glow::Shader) {
        self.gl.delete_shader(shader);
    }

    unsafe fn create_program(&self) -> Result<glow::Program, String> {
        self.gl.create_program()
    }

    unsafe fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        self.gl.attach_shader(program, shader);
    }

    unsafe fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        self.gl.detach_shader(program, shader);
    }

    unsafe fn link_program(&self, program: glow::Program) {
        self.gl.link_program(program);
    }

    unsafe fn get_program_link_status(&self, program: glow::Program) -> bool {
        self.gl.get_program_link_status(program)
    }

    unsafe fn get_program_info_log(&self, program: glow::Program) -> String {
        self.gl.get_program_info_log(program)
    }

    unsafe fn delete_program(&self, program: glow::Program) {
        self.gl.delete_program(program);
    }
}
