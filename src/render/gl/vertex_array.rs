// PixelQuad
// copyright 2026 pixelquad developers

//! Vertex array wrapper and the attribute layout description.
//!
//! A layout is an ordered sequence of tagged elements from a small closed set
//! of kinds; each push accumulates into the stride. `add_buffer` walks the
//! sequence and emits one attrib pointer per element with a running byte
//! offset, the attribute index being the element's position.

use crate::render::error::{RenderError, RenderResult};
use crate::render::gl::{buffer::GlVertexBuffer, GlBindings};
use glow::HasContext;

/// Supported attribute element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlElemKind {
    Float,
    UnsignedInt,
    UnsignedByte,
}

impl GlElemKind {
    pub fn gl_type(self) -> u32 {
        match self {
            GlElemKind::Float => glow::FLOAT,
            GlElemKind::UnsignedInt => glow::UNSIGNED_INT,
            GlElemKind::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }

    /// Size of one element of this kind, in bytes.
    pub fn size(self) -> u32 {
        match self {
            GlElemKind::Float => 4,
            GlElemKind::UnsignedInt => 4,
            GlElemKind::UnsignedByte => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlLayoutElement {
    pub kind: GlElemKind,
    pub count: u32,
    pub normalized: bool,
}

/// Ordered attribute layout with accumulated stride.
#[derive(Default)]
pub struct GlVertexLayout {
    elements: Vec<GlLayoutElement>,
    stride: u32,
}

impl GlVertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` elements of `kind`. Byte elements are normalized to
    /// [0,1] on the GPU; the wider kinds are passed through.
    pub fn push(&mut self, kind: GlElemKind, count: u32) -> &mut Self {
        self.elements.push(GlLayoutElement {
            kind,
            count,
            normalized: kind == GlElemKind::UnsignedByte,
        });
        self.stride += count * kind.size();
        self
    }

    pub fn elements(&self) -> &[GlLayoutElement] {
        &self.elements
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }
}

pub struct GlVertexArray {
    vao: glow::VertexArray,
}

impl GlVertexArray {
    pub fn new(gl: &glow::Context) -> RenderResult<Self> {
        let vao = unsafe { gl.create_vertex_array() }.map_err(RenderError::Context)?;
        Ok(Self { vao })
    }

    /// Attaches `vb` to this VAO with the attribute layout. The VAO must be
    /// bound before the vertex buffer so the attrib pointers land in it.
    pub fn add_buffer(
        &self,
        gl: &glow::Context,
        bindings: &mut GlBindings,
        vb: &GlVertexBuffer,
        layout: &GlVertexLayout,
    ) {
        self.bind(gl, bindings);
        vb.bind(gl, bindings);

        let mut offset = 0u32;
        for (i, element) in layout.elements().iter().enumerate() {
            unsafe {
                gl.enable_vertex_attrib_array(i as u32);
                gl.vertex_attrib_pointer_f32(
                    i as u32,
                    element.count as i32,
                    element.kind.gl_type(),
                    element.normalized,
                    layout.stride() as i32,
                    offset as i32,
                );
            }
            offset += element.count * element.kind.size();
        }
    }

    pub fn bind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_vertex_array(gl, Some(self.vao));
    }

    pub fn unbind(&self, gl: &glow::Context, bindings: &mut GlBindings) {
        bindings.bind_vertex_array(gl, None);
    }

    pub fn raw(&self) -> glow::VertexArray {
        self.vao
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_accumulates_per_push() {
        let mut layout = GlVertexLayout::new();
        layout.push(GlElemKind::Float, 2);
        assert_eq!(layout.stride(), 8);
        layout.push(GlElemKind::Float, 2);
        assert_eq!(layout.stride(), 16);
        layout.push(GlElemKind::UnsignedByte, 4);
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.elements().len(), 3);
    }

    #[test]
    fn byte_elements_are_normalized() {
        let mut layout = GlVertexLayout::new();
        layout.push(GlElemKind::Float, 3).push(GlElemKind::UnsignedByte, 4);
        assert!(!layout.elements()[0].normalized);
        assert!(layout.elements()[1].normalized);
    }

    #[test]
    fn element_kinds_report_gl_types() {
        assert_eq!(GlElemKind::Float.gl_type(), glow::FLOAT);
        assert_eq!(GlElemKind::UnsignedInt.gl_type(), glow::UNSIGNED_INT);
        assert_eq!(GlElemKind::UnsignedByte.gl_type(), glow::UNSIGNED_BYTE);
        assert_eq!(GlElemKind::UnsignedInt.size(), 4);
        assert_eq!(GlElemKind::UnsignedByte.size(), 1);
    }
}
