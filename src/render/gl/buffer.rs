// PixelQuad
// copyright 2026 pixelquad developers

//! Vertex and index buffer wrappers. One GL buffer object each; data is
//! uploaded once with STATIC_DRAW at creation.

use crate::render::error::{RenderError, RenderResult};
use crate::render::gl::GlBindings;
use glow::HasContext;

pub struct GlVertexBuffer {
    buffer: glow::Buffer,
}

impl GlVertexBuffer {
    /// Creates the buffer, binds it and uploads `data`.
    pub fn new(gl: &glow::Context, bindings: &mut GlBindings, data: &[f32]) -> RenderResult<Self> {
        let buffer = unsafe { gl.create_buffer() }.map_err(RenderError::Context)?;
        bindings.bind_array_buffer(gl, Some(buffer));
        unsafe {
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.align_to::<u8>().1, glow::STATIC_DRAW);
        }
        Ok(Self { buffer })
    }

    pub fn bind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_array_buffer(gl, Some(self.buffer));
    }

    pub fn unbind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_array_buffer(gl, None);
    }

    pub fn raw(&self) -> glow::Buffer {
        self.buffer
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.buffer);
        }
    }
}

pub struct GlIndexBuffer {
    buffer: glow::Buffer,
    count: usize,
}

impl GlIndexBuffer {
    /// Creates the buffer and uploads `indices`, remembering the index count
    /// for draw calls.
    pub fn new(gl: &glow::Context, bindings: &mut GlBindings, indices: &[u32]) -> RenderResult<Self> {
        let buffer = unsafe { gl.create_buffer() }.map_err(RenderError::Context)?;
        bindings.bind_element_buffer(gl, Some(buffer));
        unsafe {
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                indices.align_to::<u8>().1,
                glow::STATIC_DRAW,
            );
        }
        Ok(Self {
            buffer,
            count: indices.len(),
        })
    }

    pub fn bind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_element_buffer(gl, Some(self.buffer));
    }

    pub fn unbind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_element_buffer(gl, None);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.buffer);
        }
    }
}
