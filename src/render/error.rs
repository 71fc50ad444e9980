// PixelQuad
// copyright 2026 pixelquad developers

//! Render error types. Every failure a GL call or resource load can produce
//! is represented here; callers decide at the render-loop boundary whether to
//! abort or continue. A missing uniform is deliberately not in this list: it
//! is logged as a warning and writes to it become no-ops.

use std::fmt;

/// Render result type
pub type RenderResult<T> = Result<T, RenderError>;

/// Shader stage identifier, used in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// A shader or texture file could not be opened
    ResourceNotFound(String),
    /// Combined shader source had content before any #shader directive
    MalformedResource(String),
    /// A shader stage failed to compile; carries the driver info log
    CompileFailed { stage: ShaderStage, log: String },
    /// The program failed to link; carries the driver info log
    LinkFailed(String),
    /// An operation was issued on a destroyed GL object
    UseAfterFree(&'static str),
    /// The GL error queue was non-empty after a call
    Gl { call: &'static str, code: u32 },
    /// A GL object could not be created (create_shader/program/buffer/...)
    Context(String),
    /// Window or context creation failed
    Window(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ResourceNotFound(path) => write!(f, "Resource not found: {}", path),
            RenderError::MalformedResource(msg) => write!(f, "Malformed resource: {}", msg),
            RenderError::CompileFailed { stage, log } => {
                write!(f, "Failed to compile {} shader: {}", stage, log)
            }
            RenderError::LinkFailed(log) => write!(f, "Program linking failed: {}", log),
            RenderError::UseAfterFree(what) => write!(f, "Use after free: {}", what),
            RenderError::Gl { call, code } => write!(f, "[OpenGL error] 0x{:04x} in {}", code, call),
            RenderError::Context(msg) => write!(f, "GL object creation failed: {}", msg),
            RenderError::Window(msg) => write!(f, "Window error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_diagnostics() {
        let e = RenderError::CompileFailed {
            stage: ShaderStage::Fragment,
            log: "0:3: 'foo' : undeclared identifier".to_string(),
        };
        let s = e.to_string();
        assert!(s.contains("fragment"));
        assert!(s.contains("undeclared identifier"));
    }

    #[test]
    fn gl_error_formats_code_hex() {
        let e = RenderError::Gl { call: "draw_elements", code: 0x0502 };
        assert_eq!(e.to_string(), "[OpenGL error] 0x0502 in draw_elements");
    }
}
