use super::face_to_tri;
use bytemuck::offset_of;
use glow::HasContext;
use std::mem;
use vek::Vec2;

#[derive(Debug, Default, Copy, Clone)]
#[repr(C)]
pub struct QuadVertex {
    pub position: Vec2<f32>,
    pub uv: Vec2<f32>,
}

unsafe impl bytemuck::Pod for QuadVertex {}
unsafe impl bytemuck::Zeroable for QuadVertex {}

/// Full-screen quad used to preview a compiled program. Attribute 0 is the
/// clip-space position, attribute 1 the uv.
pub struct PreviewQuad {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
}

impl PreviewQuad {
    pub unsafe fn new(gl: &glow::Context) -> Result<Self, String> {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let corners = [
            (Vec2::new(-1.0, -1.0), Vec2::new(0.0, 0.0)),
            (Vec2::new(1.0, -1.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(-1.0, 1.0), Vec2::new(0.0, 1.0)),
            (Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)),
        ]
        .map(|(position, uv)| QuadVertex { position, uv });

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&corners),
            glow::STATIC_DRAW,
        );

        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(
            0,
            2,
            glow::FLOAT,
            false,
            mem::size_of::<QuadVertex>() as _,
            offset_of!(QuadVertex, position) as _,
        );
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(
            1,
            2,
            glow::FLOAT,
            false,
            mem::size_of::<QuadVertex>() as _,
            offset_of!(QuadVertex, uv) as _,
        );

        let ebo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice::<[u8; 6], u8>(&[face_to_tri(&[0, 1, 2, 3])]),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);
        Ok(PreviewQuad { vao, vbo, ebo })
    }

    /// Draws with `program`, feeding `uniform_Time` and `uniform_Resolution`
    /// when the program declares them.
    pub unsafe fn draw(
        &self,
        gl: &glow::Context,
        program: glow::Program,
        time: f32,
        resolution: Vec2<f32>,
    ) {
        gl.use_program(Some(program));
        if let Some(location) = gl.get_uniform_location(program, "uniform_Time") {
            gl.uniform_1_f32(Some(&location), time);
        }
        if let Some(location) = gl.get_uniform_location(program, "uniform_Resolution") {
            gl.uniform_2_f32(Some(&location), resolution.x, resolution.y);
        }

        gl.bind_vertex_array(Some(self.vao));
        gl.draw_elements(glow::TRIANGLES, 6, glow::UNSIGNED_BYTE, 0);
    }

    pub unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
    }
}
