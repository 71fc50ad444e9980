// PixelQuad
// copyright 2026 pixelquad developers

//! # Rendering Module
//!
//! OpenGL rendering pipeline for PixelQuad:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                GlWindow (winit+glutin)        │
//! │   window, surface, 3.3 core context, glow     │
//! └───────────────────┬───────────────────────────┘
//!                     │
//! ┌───────────────────▼───────────────────────────┐
//! │                GlRenderer                     │
//! │   clear color, draw calls, GlBindings slots   │
//! ├───────────────┬───────────────┬───────────────┤
//! │   GlShader    │ GlVertexArray │   GlTexture   │
//! │ parse + build │ layout+buffer │  image upload │
//! └───────────────┴───────────────┴───────────────┘
//! ```
//!
//! The `gl` submodule holds the object wrappers. `error` defines the typed
//! failure taxonomy; GL errors are drained and propagated rather than trapped
//! in the core, so aborting stays a render-loop decision.

/// typed render errors and the RenderResult alias
pub mod error;

/// GL object wrappers: shader, buffers, vertex array, texture, renderer
pub mod gl;

/// winit + glutin window and context creation
pub mod window;
