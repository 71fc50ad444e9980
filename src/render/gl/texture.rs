// PixelQuad
// copyright 2026 pixelquad developers

//! 2D texture wrapper. Decoding goes through the image crate; the file is
//! flipped vertically on load because OpenGL samples with the origin at the
//! bottom-left while image files store top-left first.

use crate::render::error::{RenderError, RenderResult};
use glow::HasContext;
use log::info;

pub struct GlTexture {
    texture: glow::Texture,
    width: u32,
    height: u32,
}

impl GlTexture {
    /// Decodes an image file and uploads it as RGBA8.
    pub fn from_file(gl: &glow::Context, filepath: &str) -> RenderResult<Self> {
        let img = image::open(filepath)
            .map_err(|_| RenderError::ResourceNotFound(filepath.to_string()))?
            .flipv()
            .to_rgba8();
        info!("texture {}: {}x{}", filepath, img.width(), img.height());
        Self::from_rgba8(gl, img.width(), img.height(), &img)
    }

    /// Uploads a raw RGBA byte buffer. `data` is `width * height * 4` bytes.
    pub fn from_rgba8(gl: &glow::Context, width: u32, height: u32, data: &[u8]) -> RenderResult<Self> {
        let texture = unsafe { gl.create_texture() }.map_err(RenderError::Context)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            // all four parameters are required for a complete texture
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );

            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Binds this texture to the given texture unit.
    pub fn bind(&self, gl: &glow::Context, slot: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + slot);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    pub fn get_texture(&self) -> glow::Texture {
        self.texture
    }

    pub fn get_width(&self) -> u32 {
        self.width
    }

    pub fn get_height(&self) -> u32 {
        self.height
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}

/// Procedural checkerboard, handy when no image file is on hand.
pub fn checkerboard_rgba8(width: u32, height: u32, cell: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if on { 0xe0 } else { 0x40 };
            data.extend_from_slice(&[v, v, v, 0xff]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_has_rgba_stride() {
        let data = checkerboard_rgba8(8, 4, 2);
        assert_eq!(data.len(), 8 * 4 * 4);
        // alpha is opaque everywhere
        assert!(data.chunks(4).all(|px| px[3] == 0xff));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let data = checkerboard_rgba8(4, 1, 2);
        // first cell light, second cell dark
        assert_eq!(data[0], 0xe0);
        assert_eq!(data[2 * 4], 0x40);
    }
}
