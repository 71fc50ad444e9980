// PixelQuad
// copyright 2026 pixelquad developers

//! Combined-source shader loading and the GL program wrapper.
//!
//! A `.shader` file carries both stages, split by `#shader vertex` /
//! `#shader fragment` directive lines. [`parse_shader_source`] splits the text
//! into a [`ShaderProgramSource`]; [`GlShader`] compiles, links and validates
//! the pair and caches uniform locations per program.

use crate::render::error::{RenderError, RenderResult, ShaderStage};
use crate::render::gl::GlBindings;
use glow::HasContext;
use log::{info, warn};
use std::collections::HashMap;
use std::fs;

/// The two stage payloads extracted from one combined resource. Immutable
/// once produced; consumed once by the build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

/// Scanning marker: which payload subsequent lines append to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShaderSection {
    None,
    Vertex,
    Fragment,
}

/// Splits a combined shader-definition text into its two stage payloads.
///
/// A line containing the `#shader` sentinel is a directive and never lands in
/// a payload; within it, a case-sensitive substring match for `vertex` or
/// `fragment` selects the section (a directive matching neither is consumed
/// without switching). Any other line goes verbatim, newline appended, into
/// the current section's payload. Sections may repeat; payloads accumulate in
/// encounter order. A source line before the first directive has no
/// addressable payload and is rejected.
pub fn parse_shader_source(text: &str) -> RenderResult<ShaderProgramSource> {
    let mut section = ShaderSection::None;
    let mut vertex = String::new();
    let mut fragment = String::new();

    for line in text.lines() {
        if line.contains("#shader") {
            if line.contains("vertex") {
                section = ShaderSection::Vertex;
            } else if line.contains("fragment") {
                section = ShaderSection::Fragment;
            }
        } else {
            match section {
                ShaderSection::None => {
                    return Err(RenderError::MalformedResource(format!(
                        "source line before any #shader directive: {:?}",
                        line
                    )));
                }
                ShaderSection::Vertex => {
                    vertex.push_str(line);
                    vertex.push('\n');
                }
                ShaderSection::Fragment => {
                    fragment.push_str(line);
                    fragment.push('\n');
                }
            }
        }
    }
    Ok(ShaderProgramSource { vertex, fragment })
}

/// Uniform name to resolved location, populated lazily on first lookup.
/// Misses are cached too (the shader may simply not reference the uniform,
/// e.g. optimized out) and reported as a warning, not a failure.
///
/// Generic over the location type so the one-query-per-name property is
/// testable without a GL context.
pub struct UniformLocationCache<V> {
    map: HashMap<String, Option<V>>,
}

impl<V: Clone> UniformLocationCache<V> {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Returns the cached location for `name`, running `query` at most once.
    pub fn lookup<F>(&mut self, name: &str, query: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some(cached) = self.map.get(name) {
            return cached.clone();
        }
        let loc = query();
        if loc.is_none() {
            warn!("uniform '{}' doesn't exist!", name);
        }
        self.map.insert(name.to_string(), loc.clone());
        loc
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<V: Clone> Default for UniformLocationCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A linked GL program with its uniform location cache.
///
/// Lifecycle: `Unbound → Bound` on [`bind`](GlShader::bind), back on
/// [`unbind`](GlShader::unbind) or when another program takes the slot;
/// [`free`](GlShader::free) destroys the program, after which every operation
/// fails with `UseAfterFree`.
pub struct GlShader {
    program: glow::Program,
    uniforms: UniformLocationCache<glow::UniformLocation>,
    destroyed: bool,
}

impl GlShader {
    /// Compiles and links a program from the two stage sources.
    ///
    /// Each stage is compiled independently; a failed stage is deleted and the
    /// build stops there, never linking against a dead stage. After a
    /// successful link the program is validated (complaints are logged, not
    /// propagated) and the intermediate stage objects are detached and
    /// deleted.
    pub fn new(gl: &glow::Context, vertex_source: &str, fragment_source: &str) -> RenderResult<Self> {
        let vs = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fs = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(fs) => fs,
            Err(e) => {
                unsafe { gl.delete_shader(vs) };
                return Err(e);
            }
        };
        let program = link_program(gl, vs, fs)?;

        Ok(Self {
            program,
            uniforms: UniformLocationCache::new(),
            destroyed: false,
        })
    }

    pub fn from_source(gl: &glow::Context, source: &ShaderProgramSource) -> RenderResult<Self> {
        Self::new(gl, &source.vertex, &source.fragment)
    }

    /// Reads, parses and builds a combined `.shader` file.
    pub fn from_file(gl: &glow::Context, filepath: &str) -> RenderResult<Self> {
        let text = fs::read_to_string(filepath)
            .map_err(|_| RenderError::ResourceNotFound(filepath.to_string()))?;
        let source = parse_shader_source(&text)?;
        info!(
            "shader {}: vertex {} bytes, fragment {} bytes",
            filepath,
            source.vertex.len(),
            source.fragment.len()
        );
        Self::from_source(gl, &source)
    }

    pub fn bind(&self, gl: &glow::Context, bindings: &mut GlBindings) -> RenderResult<()> {
        if self.destroyed {
            return Err(RenderError::UseAfterFree("shader program"));
        }
        bindings.bind_program(gl, Some(self.program));
        Ok(())
    }

    /// Clears the program slot if this shader holds it. Repeated unbind, or
    /// unbinding a shader whose slot was already taken over, is a no-op; on a
    /// destroyed shader it fails like every other post-free operation.
    pub fn unbind(&self, gl: &glow::Context, bindings: &mut GlBindings) -> RenderResult<()> {
        if self.destroyed {
            return Err(RenderError::UseAfterFree("shader program"));
        }
        if bindings.is_program_bound(self.program) {
            bindings.bind_program(gl, None);
        }
        Ok(())
    }

    pub fn is_bound(&self, bindings: &GlBindings) -> bool {
        !self.destroyed && bindings.is_program_bound(self.program)
    }

    pub fn get_program(&self) -> glow::Program {
        self.program
    }

    /// Cache-first uniform lookup; queries the context at most once per name.
    /// `None` means the uniform does not exist in the linked program; writes
    /// to it are silently dropped.
    pub fn get_uniform_location(
        &mut self,
        gl: &glow::Context,
        name: &str,
    ) -> RenderResult<Option<glow::UniformLocation>> {
        if self.destroyed {
            return Err(RenderError::UseAfterFree("shader program"));
        }
        let program = self.program;
        Ok(self
            .uniforms
            .lookup(name, || unsafe { gl.get_uniform_location(program, name) }))
    }

    pub fn set_uniform_1i(
        &mut self,
        gl: &glow::Context,
        bindings: &mut GlBindings,
        name: &str,
        value: i32,
    ) -> RenderResult<()> {
        self.bind(gl, bindings)?;
        if let Some(loc) = self.get_uniform_location(gl, name)? {
            unsafe { gl.uniform_1_i32(Some(&loc), value) };
        }
        Ok(())
    }

    pub fn set_uniform_4f(
        &mut self,
        gl: &glow::Context,
        bindings: &mut GlBindings,
        name: &str,
        v0: f32,
        v1: f32,
        v2: f32,
        v3: f32,
    ) -> RenderResult<()> {
        self.bind(gl, bindings)?;
        if let Some(loc) = self.get_uniform_location(gl, name)? {
            unsafe { gl.uniform_4_f32(Some(&loc), v0, v1, v2, v3) };
        }
        Ok(())
    }

    pub fn set_uniform_mat4(
        &mut self,
        gl: &glow::Context,
        bindings: &mut GlBindings,
        name: &str,
        mat: &[f32; 16],
    ) -> RenderResult<()> {
        self.bind(gl, bindings)?;
        if let Some(loc) = self.get_uniform_location(gl, name)? {
            unsafe { gl.uniform_matrix_4_f32_slice(Some(&loc), false, mat) };
        }
        Ok(())
    }

    /// Deletes the program and invalidates the uniform cache. Idempotent.
    pub fn free(&mut self, gl: &glow::Context, bindings: &mut GlBindings) {
        if self.destroyed {
            return;
        }
        if bindings.is_program_bound(self.program) {
            bindings.bind_program(gl, None);
        }
        unsafe { gl.delete_program(self.program) };
        self.uniforms.clear();
        self.destroyed = true;
    }
}

fn compile_stage(gl: &glow::Context, stage: ShaderStage, source: &str) -> RenderResult<glow::Shader> {
    // an empty payload (e.g. a missing #shader section) would otherwise fail
    // only at link time, with a much worse diagnostic
    if source.trim().is_empty() {
        return Err(RenderError::CompileFailed {
            stage,
            log: "empty shader source".to_string(),
        });
    }
    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(RenderError::Context)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            log::error!("Failed to compile {} shader: {}", stage, log);
            gl.delete_shader(shader);
            return Err(RenderError::CompileFailed { stage, log });
        }
        Ok(shader)
    }
}

fn link_program(gl: &glow::Context, vs: glow::Shader, fs: glow::Shader) -> RenderResult<glow::Program> {
    unsafe {
        let program = match gl.create_program() {
            Ok(p) => p,
            Err(msg) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(RenderError::Context(msg));
            }
        };
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            log::error!("Program linking failed: {}", log);
            gl.detach_shader(program, vs);
            gl.detach_shader(program, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            gl.delete_program(program);
            return Err(RenderError::LinkFailed(log));
        }

        gl.validate_program(program);
        let vlog = gl.get_program_info_log(program);
        if !vlog.is_empty() {
            warn!("program validation: {}", vlog);
        }

        // the intermediates are not needed once the program is linked
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_sections() {
        let src = "#shader vertex\nfoo\n#shader fragment\nbar\n";
        let parsed = parse_shader_source(src).unwrap();
        assert_eq!(parsed.vertex, "foo\n");
        assert_eq!(parsed.fragment, "bar\n");
    }

    #[test]
    fn parse_preserves_all_non_directive_lines() {
        let src = "#shader vertex\n#version 330 core\nvoid main() {}\n#shader fragment\n#version 330 core\nout vec4 color;\nvoid main() {}\n";
        let parsed = parse_shader_source(src).unwrap();
        // payload line counts = input line counts minus directive lines
        assert_eq!(parsed.vertex.lines().count(), 2);
        assert_eq!(parsed.fragment.lines().count(), 3);
        assert!(parsed.vertex.contains("#version 330 core"));
    }

    #[test]
    fn parse_vertex_only_leaves_fragment_empty() {
        let parsed = parse_shader_source("#shader vertex\nvoid main() {}\n").unwrap();
        assert!(!parsed.vertex.is_empty());
        assert!(parsed.fragment.is_empty());
    }

    #[test]
    fn parse_repeated_sections_accumulate_in_order() {
        let src = "#shader vertex\nA\n#shader fragment\nB\n#shader vertex\nC\n";
        let parsed = parse_shader_source(src).unwrap();
        assert_eq!(parsed.vertex, "A\nC\n");
        assert_eq!(parsed.fragment, "B\n");
    }

    #[test]
    fn parse_directive_match_is_case_sensitive() {
        // "#shader VERTEX" is consumed as a directive line but switches
        // nothing; the following source line then has no section.
        let err = parse_shader_source("#shader VERTEX\nfoo\n").unwrap_err();
        assert!(matches!(err, RenderError::MalformedResource(_)));
    }

    #[test]
    fn parse_unknown_directive_keeps_current_section() {
        let src = "#shader vertex\nA\n#shader geometry\nB\n";
        let parsed = parse_shader_source(src).unwrap();
        assert_eq!(parsed.vertex, "A\nB\n");
        assert!(parsed.fragment.is_empty());
    }

    #[test]
    fn parse_rejects_line_before_first_directive() {
        let err = parse_shader_source("void main() {}\n#shader vertex\n").unwrap_err();
        assert!(matches!(err, RenderError::MalformedResource(_)));
    }

    #[test]
    fn parse_empty_input_yields_two_empty_payloads() {
        let parsed = parse_shader_source("").unwrap();
        assert!(parsed.vertex.is_empty());
        assert!(parsed.fragment.is_empty());
    }

    #[test]
    fn uniform_cache_queries_at_most_once() {
        let mut cache: UniformLocationCache<i32> = UniformLocationCache::new();
        let mut queries = 0;
        let first = cache.lookup("u_color", || {
            queries += 1;
            Some(3)
        });
        let second = cache.lookup("u_color", || {
            queries += 1;
            Some(99)
        });
        assert_eq!(first, Some(3));
        assert_eq!(second, Some(3));
        assert_eq!(queries, 1);
    }

    #[test]
    fn uniform_cache_caches_misses() {
        let mut cache: UniformLocationCache<i32> = UniformLocationCache::new();
        let mut queries = 0;
        for _ in 0..3 {
            let loc = cache.lookup("u_absent", || {
                queries += 1;
                None
            });
            assert_eq!(loc, None);
        }
        assert_eq!(queries, 1);
        assert_eq!(cache.len(), 1);
    }

    // A context that never resolves a GL function; usable for paths that must
    // bail out before touching the driver. glow's constructor eagerly reads
    // GL_VERSION and GL_EXTENSIONS, so glGetString alone resolves to a stub;
    // every other function stays unloaded and panics if called.
    fn null_gl() -> glow::Context {
        extern "system" fn stub_get_string(name: u32) -> *const u8 {
            if name == glow::VERSION {
                b"2.1\0".as_ptr()
            } else {
                b"\0".as_ptr()
            }
        }
        unsafe {
            glow::Context::from_loader_function(|name| {
                if name == "glGetString" {
                    stub_get_string as *const std::os::raw::c_void
                } else {
                    std::ptr::null()
                }
            })
        }
    }

    fn destroyed_shader() -> GlShader {
        GlShader {
            program: glow::NativeProgram(std::num::NonZeroU32::MIN),
            uniforms: UniformLocationCache::new(),
            destroyed: true,
        }
    }

    #[test]
    fn operations_after_free_fail() {
        let gl = null_gl();
        let mut bindings = GlBindings::new();
        let mut shader = destroyed_shader();
        assert!(matches!(
            shader.bind(&gl, &mut bindings),
            Err(RenderError::UseAfterFree(_))
        ));
        assert!(matches!(
            shader.unbind(&gl, &mut bindings),
            Err(RenderError::UseAfterFree(_))
        ));
        assert!(matches!(
            shader.get_uniform_location(&gl, "u_color"),
            Err(RenderError::UseAfterFree(_))
        ));
        assert!(matches!(
            shader.set_uniform_4f(&gl, &mut bindings, "u_color", 0.0, 0.0, 0.0, 1.0),
            Err(RenderError::UseAfterFree(_))
        ));
    }

    #[test]
    fn free_is_idempotent() {
        let gl = null_gl();
        let mut bindings = GlBindings::new();
        let mut shader = destroyed_shader();
        // already destroyed: must return without touching the context
        shader.free(&gl, &mut bindings);
        assert!(!shader.is_bound(&bindings));
    }

    #[test]
    fn uniform_cache_clear_invalidates() {
        let mut cache: UniformLocationCache<i32> = UniformLocationCache::new();
        cache.lookup("a", || Some(1));
        cache.clear();
        assert!(cache.is_empty());
        let mut queries = 0;
        cache.lookup("a", || {
            queries += 1;
            Some(2)
        });
        assert_eq!(queries, 1);
    }
}
