// PixelQuad
// copyright 2026 pixelquad developers

//! Window and OpenGL context creation on the winit + glutin + glow stack.
//!
//! The window must be created inside `ApplicationHandler::resumed`; winit 0.30
//! does not hand out an active event loop anywhere else. The context is a 3.3
//! core profile, made current on the calling thread, and every later GL call
//! must stay on that thread.

use crate::render::error::{RenderError, RenderResult};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use log::{info, warn};
use raw_window_handle::HasWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

pub struct GlWindow {
    pub window: Arc<Window>,
    pub gl: glow::Context,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
}

impl GlWindow {
    /// Creates the window, a 3.3 core context and the glow bindings, and
    /// makes the context current with vsync-paced swaps.
    pub fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        let window_size = LogicalSize::new(width, height);

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(
            Window::default_attributes()
                .with_title(title)
                .with_inner_size(window_size)
                .with_resizable(false),
        ));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("glutin offered no GL configs")
            })
            .map_err(|e| RenderError::Window(e.to_string()))?;

        let window = Arc::new(
            window.ok_or_else(|| RenderError::Window("no window was created".to_string()))?,
        );
        let physical_size = window.inner_size();
        info!(
            "window created - logical: {}x{}, physical: {}x{}",
            width, height, physical_size.width, physical_size.height
        );

        let gl_display = gl_config.display();
        let raw_window_handle = window
            .window_handle()
            .map_err(|e| RenderError::Window(e.to_string()))?
            .as_raw();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));

        let not_current_gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(|e| RenderError::Window(e.to_string()))?
        };

        let (sw, sh) = (
            NonZeroU32::new(physical_size.width.max(1)).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(physical_size.height.max(1)).unwrap_or(NonZeroU32::MIN),
        );
        let gl_surface = unsafe {
            let attrs =
                SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, sw, sh);
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| RenderError::Window(e.to_string()))?
        };

        let gl_context = not_current_gl_context
            .make_current(&gl_surface)
            .map_err(|e| RenderError::Window(e.to_string()))?;

        if let Err(e) = gl_surface.set_swap_interval(
            &gl_context,
            SwapInterval::Wait(NonZeroU32::MIN),
        ) {
            warn!("vsync not available: {}", e);
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| match CString::new(s) {
                Ok(s) => gl_display.get_proc_address(&s),
                Err(_) => std::ptr::null(),
            })
        };

        info!("OpenGL window & context initialized");
        Ok(Self {
            window,
            gl,
            gl_surface,
            gl_context,
        })
    }

    /// Presents the back buffer. Blocks for vsync when the swap interval took.
    pub fn swap(&self) -> RenderResult<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| RenderError::Window(e.to_string()))
    }

    pub fn resize_surface(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.gl_context, w, h);
        }
    }
}
