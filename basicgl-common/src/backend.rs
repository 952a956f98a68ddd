use std::fmt::Debug;

use crate::ShaderStage;

/// The shader and program subset of a graphics API.
///
/// # Safety
///
/// Every method requires the backend's context to be current on the calling
/// thread, and handles passed in must have been created by the same backend.
pub trait ShaderBackend {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;

    unsafe fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    unsafe fn shader_source(&self, shader: Self::Shader, source: &str);
    unsafe fn compile_shader(&self, shader: Self::Shader);
    unsafe fn get_shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// The complete compiler log, however long.
    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    unsafe fn delete_shader(&self, shader: Self::Shader);

    unsafe fn create_program(&self) -> Result<Self::Program, String>;
    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn link_program(&self, program: Self::Program);
    unsafe fn get_program_link_status(&self, program: Self::Program) -> bool;
    /// The complete linker log, however long.
    unsafe fn get_program_info_log(&self, program: Self::Program) -> String;
    unsafe fn delete_program(&self, program: Self::Program);
}
