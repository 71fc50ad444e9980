// PixelQuad
// copyright 2026 pixelquad developers

//! Textured quad demo: opens a 640x480 window, loads the combined shader
//! file, uploads the quad and a texture, and animates `u_color` and a slow
//! `u_mvp` rotation every frame.
//!
//! Pass an image path as the first argument to use it as the texture;
//! otherwise a procedural checkerboard is used.
//!
//! ```text
//! cargo run --bin basic [path/to/image.png]
//! ```

use log::{error, info, LevelFilter};
use pixel_quad::{
    log::init_log,
    render::{
        error::RenderResult,
        gl::{
            renderer::GlColor,
            texture::checkerboard_rgba8,
            GlElemKind, GlIndexBuffer, GlRenderer, GlShader, GlTexture, GlVertexArray,
            GlVertexBuffer, GlVertexLayout,
        },
        window::GlWindow,
    },
    util::get_abs_path,
};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

const WIN_WIDTH: u32 = 640;
const WIN_HEIGHT: u32 = 480;

/// Column-major rotation about Z, the demo's whole model transform.
fn rotation_z(angle: f32) -> [f32; 16] {
    let (s, c) = angle.sin_cos();
    [
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    ]
}

/// Everything the render loop touches each frame.
struct Scene {
    renderer: GlRenderer,
    shader: GlShader,
    vao: GlVertexArray,
    vbo: GlVertexBuffer,
    ibo: GlIndexBuffer,
    texture: GlTexture,
}

impl Scene {
    fn new(gl: &glow::Context, texture_path: Option<&str>) -> RenderResult<Self> {
        let mut renderer = GlRenderer::new(gl);
        renderer.set_clear_color(GlColor::new(0.05, 0.05, 0.08, 1.0));

        // quad: position 2f + texcoord 2f per vertex
        let positions: [f32; 16] = [
            -0.5, -0.5, 0.0, 0.0, //
            0.5, -0.5, 1.0, 0.0, //
            0.5, 0.5, 1.0, 1.0, //
            -0.5, 0.5, 0.0, 1.0, //
        ];
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];

        let vao = GlVertexArray::new(gl)?;
        let vbo = GlVertexBuffer::new(gl, &mut renderer.bindings, &positions)?;
        let mut layout = GlVertexLayout::new();
        layout.push(GlElemKind::Float, 2).push(GlElemKind::Float, 2);
        vao.add_buffer(gl, &mut renderer.bindings, &vbo, &layout);
        // created with the VAO bound so the element binding lands in it
        let ibo = GlIndexBuffer::new(gl, &mut renderer.bindings, &indices)?;

        let mut shader = GlShader::from_file(gl, &get_abs_path("assets/shaders/basic.shader"))?;

        let texture = match texture_path {
            Some(path) => GlTexture::from_file(gl, path)?,
            None => GlTexture::from_rgba8(gl, 256, 256, &checkerboard_rgba8(256, 256, 32))?,
        };
        texture.bind(gl, 0);
        shader.set_uniform_1i(gl, &mut renderer.bindings, "u_texture", 0)?;

        Ok(Self {
            renderer,
            shader,
            vao,
            vbo,
            ibo,
            texture,
        })
    }

    fn draw_frame(&mut self, gl: &glow::Context, t: f32) -> RenderResult<()> {
        self.renderer.clear(gl);

        let red = (t * 2.0).sin() * 0.5 + 0.5;
        self.shader
            .set_uniform_4f(gl, &mut self.renderer.bindings, "u_color", red, 0.3, 0.8, 1.0)?;
        self.shader
            .set_uniform_mat4(gl, &mut self.renderer.bindings, "u_mvp", &rotation_z(t * 0.5))?;
        self.texture.bind(gl, 0);

        self.renderer
            .draw(gl, &self.vao, &self.ibo, &self.shader)
    }

    /// Explicit release of every GPU object, in reverse creation order.
    fn free(&mut self, gl: &glow::Context) {
        self.texture.free(gl);
        self.shader.free(gl, &mut self.renderer.bindings);
        self.ibo.free(gl);
        self.vbo.free(gl);
        self.vao.free(gl);
    }
}

struct App {
    gl_window: Option<GlWindow>,
    scene: Option<Scene>,
    start: Instant,
    texture_path: Option<String>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_window.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
        let gl_window = match GlWindow::new(event_loop, "PixelQuad", WIN_WIDTH, WIN_HEIGHT) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        match Scene::new(&gl_window.gl, self.texture_path.as_deref()) {
            Ok(scene) => {
                self.scene = Some(scene);
                gl_window.window.request_redraw();
                self.gl_window = Some(gl_window);
                info!("scene ready");
            }
            Err(e) => {
                error!("failed to build scene: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let (Some(gl_window), Some(scene)) = (&self.gl_window, &mut self.scene) {
                    scene.free(&gl_window.gl);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let (Some(gl_window), Some(scene)) = (&self.gl_window, &mut self.scene) {
                    gl_window.resize_surface(size.width, size.height);
                    scene.renderer.viewport(&gl_window.gl, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let t = self.start.elapsed().as_secs_f32();
                if let (Some(gl_window), Some(scene)) = (&self.gl_window, &mut self.scene) {
                    // a render error aborts here, at the loop boundary
                    if let Err(e) = scene.draw_frame(&gl_window.gl, t) {
                        error!("render error: {}", e);
                        event_loop.exit();
                        return;
                    }
                    if let Err(e) = gl_window.swap() {
                        error!("swap failed: {}", e);
                        event_loop.exit();
                        return;
                    }
                    gl_window.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    init_log(LevelFilter::Info, "log/basic.log");

    let texture_path = std::env::args().nth(1);
    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            error!("failed to create event loop: {}", e);
            return;
        }
    };

    let mut app = App {
        gl_window: None,
        scene: None,
        start: Instant::now(),
        texture_path,
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_zero_is_identity() {
        let m = rotation_z(0.0);
        let identity: [f32; 16] = [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ];
        assert_eq!(m, identity);
    }

    #[test]
    fn rotation_quarter_turn_maps_x_to_y() {
        let m = rotation_z(std::f32::consts::FRAC_PI_2);
        // first column is the image of the x axis
        assert!(m[0].abs() < 1e-6);
        assert!((m[1] - 1.0).abs() < 1e-6);
    }
}
