//! In-memory backend for tests. Compiles anything with balanced braces and a
//! `void main`, and links when every fragment input is written by the vertex
//! stage.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use crate::{ShaderBackend, ShaderStage};

#[derive(Debug, Clone)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub info_log: String,
    pub deleted: bool,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub(crate) next_id: Cell<u32>,
    pub shaders: RefCell<HashMap<u32, MockShader>>,
    pub programs: RefCell<HashMap<u32, MockProgram>>,
    pub refuse_program: bool,
    pub refuse_shader: Option<ShaderStage>,
}

impl MockBackend {
    fn allocate(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    pub fn program(&self, program: u32) -> MockProgram {
        self.programs.borrow()[&program].clone()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.borrow().values().filter(|s| !s.deleted).count()
    }

    pub fn shaders_of(&self, stage: ShaderStage) -> Vec<MockShader> {
        self.shaders
            .borrow()
            .values()
            .filter(|s| s.stage == stage)
            .cloned()
            .collect()
    }
}

fn check_source(source: &str) -> Result<(), String> {
    for (line_no, line) in source.lines().enumerate() {
        if let Some(message) = line.trim_start().strip_prefix("#error") {
            return Err(format!("0:{}(1): error: {}", line_no + 1, message.trim()));
        }
    }

    let opened = source.matches('{').count();
    let closed = source.matches('}').count();
    if opened != closed {
        return Err(format!(
            "0:{}(1): error: syntax error, unexpected end of file",
            source.lines().count()
        ));
    }

    if !source.contains("void main") {
        return Err("0:0(0): error: main function not defined".to_owned());
    }

    Ok(())
}

/// `(type, name)` pairs declared with the given storage qualifier.
fn interface(source: &str, qualifier: &str) -> Vec<(String, String)> {
    source
        .lines()
        .filter_map(|line| {
            let declaration = line.trim().strip_prefix(qualifier)?.strip_prefix(' ')?;
            let declaration = declaration.strip_suffix(';')?;
            let mut parts = declaration.split_whitespace();
            Some((parts.next()?.to_owned(), parts.next()?.to_owned()))
        })
        .collect()
}

impl ShaderBackend for MockBackend {
    type Shader = u32;
    type Program = u32;

    unsafe fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        if self.refuse_shader == Some(stage) {
            return Err("out of memory".to_owned());
        }
        let id = self.allocate();
        self.shaders.borrow_mut().insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
                info_log: String::new(),
                deleted: false,
            },
        );
        Ok(id)
    }

    unsafe fn shader_source(&self, shader: u32, source: &str) {
        self.shaders.borrow_mut().get_mut(&shader).unwrap().source = source.to_owned();
    }

    unsafe fn compile_shader(&self, shader: u32) {
        let mut shaders = self.shaders.borrow_mut();
        let shader = shaders.get_mut(&shader).unwrap();
        match check_source(&shader.source) {
            Ok(()) => {
                shader.compiled = true;
                shader.info_log.clear();
            }
            Err(log) => {
                shader.compiled = false;
                shader.info_log = log;
            }
        }
    }

    unsafe fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.borrow()[&shader].compiled
    }

    unsafe fn get_shader_info_log(&self, shader: u32) -> String {
        self.shaders.borrow()[&shader].info_log.clone()
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.shaders.borrow_mut().get_mut(&shader).unwrap().deleted = true;
    }

    unsafe fn create_program(&self) -> Result<u32, String> {
        if self.refuse_program {
            return Err("context lost".to_owned());
        }
        let id = self.allocate();
        self.programs.borrow_mut().insert(id, MockProgram::default());
        Ok(id)
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        assert!(!self.shaders.borrow()[&shader].deleted);
        self.programs
            .borrow_mut()
            .get_mut(&program)
            .unwrap()
            .attached
            .push(shader);
    }

    unsafe fn detach_shader(&self, program: u32, shader: u32) {
        self.programs
            .borrow_mut()
            .get_mut(&program)
            .unwrap()
            .attached
            .retain(|&s| s != shader);
    }

    unsafe fn link_program(&self, program: u32) {
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let program = programs.get_mut(&program).unwrap();
        let attached: Vec<&MockShader> = program.attached.iter().map(|s| &shaders[s]).collect();

        let result = (|| {
            if attached.iter().any(|s| !s.compiled) {
                return Err("error: linking with uncompiled/unspecialized shader".to_owned());
            }
            let find = |stage: ShaderStage| {
                attached
                    .iter()
                    .find(|s| s.stage == stage)
                    .ok_or_else(|| format!("error: program lacks a {} shader", stage))
            };
            let vertex = find(ShaderStage::Vertex)?;
            let fragment = find(ShaderStage::Fragment)?;

            let outputs = interface(&vertex.source, "out");
            for (ty, name) in interface(&fragment.source, "in") {
                if !outputs.iter().any(|(t, n)| *t == ty && *n == name) {
                    return Err(format!(
                        "error: fragment shader input `{}` has no matching vertex shader output",
                        name
                    ));
                }
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                program.linked = true;
                program.info_log.clear();
            }
            Err(log) => {
                program.linked = false;
                program.info_log = log;
            }
        }
    }

    unsafe fn get_program_link_status(&self, program: u32) -> bool {
        self.programs.borrow()[&program].linked
    }

    unsafe fn get_program_info_log(&self, program: u32) -> String {
        self.programs.borrow()[&program].info_log.clone()
    }

    unsafe fn delete_program(&self, program: u32) {
        self.programs.borrow_mut().get_mut(&program).unwrap().deleted = true;
    }
}
