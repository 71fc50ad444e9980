// PixelQuad
// copyright 2026 pixelquad developers

//! PixelQuad is a minimal OpenGL rendering crate built on the glow + glutin + winit
//! stack. It opens a window with a 3.3 core context, loads a combined GLSL
//! shader-definition file, uploads a quad's vertices and indices, binds a texture,
//! and redraws each frame while animating a uniform.
//!
//! The combined shader format keeps both stages in one file, split by `#shader`
//! directives:
//!
//! ```text
//! #shader vertex
//! ...GLSL vertex source...
//! #shader fragment
//! ...GLSL fragment source...
//! ```
//!
//! All GPU objects are thin one-object-per-resource wrappers; methods take a
//! `&glow::Context` rather than owning it, and every bind goes through an
//! explicit [`render::gl::GlBindings`] record of the active context slots, so a
//! missing re-bind shows up in the code instead of in the driver.
//!
//! Everything is single threaded: GL calls happen on the thread that owns the
//! context, and there is no cancellation or timeout for compilation or linking.

/// log module provides log4rs based file logging
pub mod log;

/// small path helpers for locating assets relative to the crate root
pub mod util;

/// rendering: GL object wrappers, shader loading, renderer and windowing
pub mod render;
