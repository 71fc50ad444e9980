// PixelQuad
// copyright 2026 pixelquad developers

//! # OpenGL Object Wrappers
//!
//! Thin lifecycle wrappers around glow objects (generate, bind, upload,
//! destroy), plus the explicit binding context shared by all of them.
//!
//! OpenGL's current-program / current-VAO / current-buffer slots are global,
//! unguarded state; relying on them ambiently is how missing-rebind bugs
//! happen. [`GlBindings`] makes the slots an explicit object that every bind
//! and draw routes through, so the code that mutates a slot is visible at the
//! call site.

pub mod buffer;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use buffer::{GlIndexBuffer, GlVertexBuffer};
pub use renderer::GlRenderer;
pub use shader::{parse_shader_source, GlShader, ShaderProgramSource};
pub use texture::GlTexture;
pub use vertex_array::{GlElemKind, GlVertexArray, GlVertexLayout};

use crate::render::error::{RenderError, RenderResult};
use glow::HasContext;

/// Record of the active context binding slots. All access to the underlying
/// context's bind points goes through one of these, passed by reference.
#[derive(Default)]
pub struct GlBindings {
    program: Option<glow::Program>,
    vertex_array: Option<glow::VertexArray>,
    array_buffer: Option<glow::Buffer>,
    element_buffer: Option<glow::Buffer>,
}

impl GlBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `program` to the current-program slot. Re-binding the program
    /// already recorded is elided; the record is accurate because every bind
    /// routes through here.
    pub fn bind_program(&mut self, gl: &glow::Context, program: Option<glow::Program>) {
        if self.program != program {
            unsafe {
                gl.use_program(program);
            }
            self.program = program;
        }
    }

    pub fn bind_vertex_array(&mut self, gl: &glow::Context, vao: Option<glow::VertexArray>) {
        unsafe {
            gl.bind_vertex_array(vao);
        }
        self.vertex_array = vao;
        // ELEMENT_ARRAY_BUFFER binding is part of VAO state in core profile,
        // so the global record is stale once the VAO changes.
        self.element_buffer = None;
    }

    pub fn bind_array_buffer(&mut self, gl: &glow::Context, buf: Option<glow::Buffer>) {
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, buf);
        }
        self.array_buffer = buf;
    }

    pub fn bind_element_buffer(&mut self, gl: &glow::Context, buf: Option<glow::Buffer>) {
        unsafe {
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, buf);
        }
        self.element_buffer = buf;
    }

    pub fn current_program(&self) -> Option<glow::Program> {
        self.program
    }

    pub fn is_program_bound(&self, program: glow::Program) -> bool {
        self.program == Some(program)
    }
}

/// Drains any stale entries from the GL error queue before a checked call.
pub fn gl_clear_errors(gl: &glow::Context) {
    unsafe { while gl.get_error() != glow::NO_ERROR {} }
}

/// Drains the GL error queue after `call`; a non-empty queue is logged and
/// propagated as a typed error instead of trapping in a debugger. Whether to
/// abort is the render loop's call.
pub fn gl_check(gl: &glow::Context, call: &'static str) -> RenderResult<()> {
    let mut first = None;
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        log::error!("[OpenGL error] 0x{:04x} in {}", code, call);
        first.get_or_insert(code);
    }
    match first {
        None => Ok(()),
        Some(code) => Err(RenderError::Gl { call, code }),
    }
}
