use std::{
    ffi::{CStr, CString},
    ops::BitOr,
    rc::Rc,
};

use glutin::prelude::GlDisplay;
use tracing::{info, warn};

use super::{
    errors::GlError,
    gl::{
        self,
        types::{GLchar, GLenum, GLint, GLsizei, GLuint},
    },
    shader::ShaderKind,
};

/// Buffers cleared by [`GlApi::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearMask(u32);

impl ClearMask {
    pub const COLOR: Self = Self(gl::COLOR_BUFFER_BIT);
    pub const DEPTH: Self = Self(gl::DEPTH_BUFFER_BIT);
    pub const STENCIL: Self = Self(gl::STENCIL_BUFFER_BIT);

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for ClearMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The OpenGL calls the crate relies on, each checked at the call site.
///
/// Handles are plain ids; ownership lives in the types built on top of this
/// trait (see [`crate::common::shader`]). Deletion never fails from the
/// caller's point of view because it runs during drops.
pub trait GlApi {
    fn clear(&self, mask: ClearMask) -> Result<(), GlError>;

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) -> Result<(), GlError>;

    fn create_shader(&self, kind: ShaderKind) -> Result<u32, GlError>;

    fn shader_source(&self, shader: u32, source: &str) -> Result<(), GlError>;

    /// Compiles and checks `COMPILE_STATUS`, returning the info log on failure.
    fn compile_shader(&self, shader: u32) -> Result<(), GlError>;

    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> Result<u32, GlError>;

    fn attach_shader(&self, program: u32, shader: u32) -> Result<(), GlError>;

    /// Links and checks `LINK_STATUS`, returning the info log on failure.
    fn link_program(&self, program: u32) -> Result<(), GlError>;

    fn use_program(&self, program: u32) -> Result<(), GlError>;

    fn delete_program(&self, program: u32);
}

/// A handle to the graphics context that games and resources can keep.
pub type SharedGl = Rc<dyn GlApi>;

/// Upper bound on queued error flags read after one call.
const MAX_QUEUED_ERRORS: usize = 16;

/// Empties the error queue through `next_error`, reporting the first flag.
fn drain_errors<F>(call: &'static str, mut next_error: F) -> Result<(), GlError>
where
    F: FnMut() -> u32,
{
    let mut first = None;
    for _ in 0..MAX_QUEUED_ERRORS {
        match next_error() {
            gl::NO_ERROR => break,
            code if first.is_none() => first = Some(code),
            code => warn!(call, code, "additional gl error flag"),
        }
    }
    match first {
        Some(code) => Err(GlError::Call { call, code }),
        None => Ok(()),
    }
}

/// Function pointers of the current OpenGL context.
///
/// Must only be used on the thread the context is current on.
pub struct GlContext {
    gl: gl::Gl,
}

impl GlContext {
    pub fn load<D>(display: &D) -> Self
    where
        D: GlDisplay,
    {
        let gl = gl::Gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });
        let context = Self { gl };
        if let Some(renderer) = context.get_string(gl::RENDERER) {
            info!("Running on {}", renderer.to_string_lossy());
        }
        if let Some(version) = context.get_string(gl::VERSION) {
            info!("OpenGL Version {}", version.to_string_lossy());
        }
        if let Some(shaders_version) = context.get_string(gl::SHADING_LANGUAGE_VERSION) {
            info!("Shaders version on {}", shaders_version.to_string_lossy());
        }
        context
    }

    fn check_error(&self, call: &'static str) -> Result<(), GlError> {
        drain_errors(call, || unsafe { self.gl.GetError() })
    }

    /// For calls whose signature cannot fail: the error is logged so it is
    /// not blamed on the next checked call.
    fn log_error(&self, call: &'static str) {
        if let Err(e) = self.check_error(call) {
            warn!("{e}");
        }
    }

    fn get_string(&self, variant: GLenum) -> Option<&CStr> {
        unsafe {
            let s = self.gl.GetString(variant);
            (!s.is_null()).then(|| CStr::from_ptr(s.cast()))
        }
    }

    unsafe fn shader_info_log(&self, shader: GLuint) -> String {
        let mut length: GLint = 0;
        self.gl.GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length);
        let mut log = vec![0u8; length.max(1) as usize];
        let mut written: GLsizei = 0;
        self.gl.GetShaderInfoLog(
            shader,
            log.len() as GLsizei,
            &mut written,
            log.as_mut_ptr() as *mut GLchar,
        );
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }

    unsafe fn program_info_log(&self, program: GLuint) -> String {
        let mut length: GLint = 0;
        self.gl.GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length);
        let mut log = vec![0u8; length.max(1) as usize];
        let mut written: GLsizei = 0;
        self.gl.GetProgramInfoLog(
            program,
            log.len() as GLsizei,
            &mut written,
            log.as_mut_ptr() as *mut GLchar,
        );
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }
}

impl GlApi for GlContext {
    fn clear(&self, mask: ClearMask) -> Result<(), GlError> {
        unsafe { self.gl.Clear(mask.bits()) };
        self.check_error("glClear")
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.ClearColor(red, green, blue, alpha) };
        self.log_error("glClearColor");
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) -> Result<(), GlError> {
        unsafe { self.gl.Viewport(x, y, width, height) };
        self.check_error("glViewport")
    }

    fn create_shader(&self, kind: ShaderKind) -> Result<u32, GlError> {
        let shader = unsafe { self.gl.CreateShader(kind.gl_enum()) };
        self.check_error("glCreateShader")?;
        if shader == 0 {
            return Err(GlError::Allocation {
                call: "glCreateShader",
            });
        }
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, source: &str) -> Result<(), GlError> {
        let sources = [source.as_ptr() as *const GLchar];
        let lengths = [source.len() as GLint];
        unsafe {
            self.gl
                .ShaderSource(shader, 1, sources.as_ptr(), lengths.as_ptr());
        }
        self.check_error("glShaderSource")
    }

    fn compile_shader(&self, shader: u32) -> Result<(), GlError> {
        unsafe {
            self.gl.CompileShader(shader);
            self.check_error("glCompileShader")?;
            let mut compile_status = gl::FALSE as GLint;
            self.gl
                .GetShaderiv(shader, gl::COMPILE_STATUS, &mut compile_status);
            if compile_status != gl::TRUE as GLint {
                return Err(GlError::ShaderCompile(self.shader_info_log(shader)));
            }
        }
        Ok(())
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { self.gl.DeleteShader(shader) };
        self.log_error("glDeleteShader");
    }

    fn create_program(&self) -> Result<u32, GlError> {
        let program = unsafe { self.gl.CreateProgram() };
        self.check_error("glCreateProgram")?;
        if program == 0 {
            return Err(GlError::Allocation {
                call: "glCreateProgram",
            });
        }
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) -> Result<(), GlError> {
        unsafe { self.gl.AttachShader(program, shader) };
        self.check_error("glAttachShader")
    }

    fn link_program(&self, program: u32) -> Result<(), GlError> {
        unsafe {
            self.gl.LinkProgram(program);
            self.check_error("glLinkProgram")?;
            let mut link_status = gl::FALSE as GLint;
            self.gl
                .GetProgramiv(program, gl::LINK_STATUS, &mut link_status);
            if link_status != gl::TRUE as GLint {
                return Err(GlError::ProgramLink(self.program_info_log(program)));
            }
        }
        Ok(())
    }

    fn use_program(&self, program: u32) -> Result<(), GlError> {
        unsafe { self.gl.UseProgram(program) };
        self.check_error("glUseProgram")
    }

    fn delete_program(&self, program: u32) {
        unsafe { self.gl.DeleteProgram(program) };
        self.log_error("glDeleteProgram");
    }
}
