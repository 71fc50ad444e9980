// PixelQuad
// copyright 2026 pixelquad developers

//! Draw-call orchestration. The renderer owns the binding context and the
//! clear color; a draw re-binds program, VAO and index buffer through the
//! binding context before issuing the call, then drains the GL error queue.

use crate::render::error::RenderResult;
use crate::render::gl::{
    buffer::GlIndexBuffer, gl_check, gl_clear_errors, shader::GlShader,
    vertex_array::GlVertexArray, GlBindings,
};
use glow::HasContext;

#[derive(Debug, Clone, Copy)]
pub struct GlColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GlColor {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

pub struct GlRenderer {
    pub bindings: GlBindings,
    clear_color: GlColor,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
        Self {
            bindings: GlBindings::new(),
            clear_color: GlColor::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn set_clear_color(&mut self, color: GlColor) {
        self.clear_color = color;
    }

    pub fn clear(&mut self, gl: &glow::Context) {
        unsafe {
            gl.clear_color(
                self.clear_color.r,
                self.clear_color.g,
                self.clear_color.b,
                self.clear_color.a,
            );
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    pub fn viewport(&mut self, gl: &glow::Context, width: u32, height: u32) {
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Draws `ibo.count()` indexed triangles. Everything the call depends on
    /// is re-bound first; the slots may have changed since the caller last
    /// touched them.
    pub fn draw(
        &mut self,
        gl: &glow::Context,
        vao: &GlVertexArray,
        ibo: &GlIndexBuffer,
        shader: &GlShader,
    ) -> RenderResult<()> {
        shader.bind(gl, &mut self.bindings)?;
        vao.bind(gl, &mut self.bindings);
        ibo.bind(gl, &mut self.bindings);

        gl_clear_errors(gl);
        unsafe {
            gl.draw_elements(
                glow::TRIANGLES,
                ibo.count() as i32,
                glow::UNSIGNED_INT,
                0,
            );
        }
        gl_check(gl, "draw_elements")
    }
}
