use tracing::{debug, info};

use super::{
    gl::{self, types::GLenum},
    result::{map_all, Result, ResultExt, VoidResult},
    wrapper::SharedGl,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
            ShaderKind::Geometry => gl::GEOMETRY_SHADER,
            ShaderKind::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderKind::Compute => gl::COMPUTE_SHADER,
        }
    }
}

/// A compiled shader stage. The handle is deleted when the stage drops.
pub struct ShaderStage {
    gl: SharedGl,
    id: u32,
    name: String,
    kind: ShaderKind,
}

impl ShaderStage {
    pub fn create<N>(gl: &SharedGl, kind: ShaderKind, name: N, source: &str) -> Result<Self>
    where
        N: Into<String>,
    {
        let id = gl.create_shader(kind).located()?;
        // Owned from here on: an early return below releases the handle.
        let stage = Self {
            gl: SharedGl::clone(gl),
            id,
            name: name.into(),
            kind,
        };
        gl.shader_source(stage.id, source).located()?;
        gl.compile_shader(stage.id).located()?;
        debug!(name = %stage.name, ?kind, id, "compiled shader stage");
        Ok(stage)
    }

    pub fn attach_to_program(&self, program_id: u32) -> VoidResult {
        self.gl.attach_shader(program_id, self.id).located()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Gives up ownership of the handle. Deleting it becomes the caller's job.
    pub fn into_raw(mut self) -> u32 {
        std::mem::replace(&mut self.id, 0)
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        if self.id != 0 {
            debug!(name = %self.name, id = self.id, "deleting shader stage");
            self.gl.delete_shader(self.id);
        }
    }
}

/// A linked program. The handle is deleted when the program drops.
pub struct ShaderProgram {
    gl: SharedGl,
    id: u32,
    name: String,
}

impl ShaderProgram {
    pub fn create<'s, I, N>(gl: &SharedGl, stages: I, name: N) -> Result<Self>
    where
        I: IntoIterator<Item = &'s ShaderStage>,
        N: Into<String>,
    {
        let id = gl.create_program().located()?;
        // A failed attach or link still deletes the partially built program.
        let program = Self {
            gl: SharedGl::clone(gl),
            id,
            name: name.into(),
        };
        for stage in stages {
            stage.attach_to_program(program.id).with_prefix(format_args!(
                "attaching '{}' to '{}'",
                stage.name(),
                program.name
            ))?;
        }
        gl.link_program(program.id).located()?;
        info!(name = %program.name, id, "linked shader program");
        Ok(program)
    }

    /// Compiles every `(kind, stage name, source)` and links the result.
    ///
    /// No program handle is created unless every stage compiles. The stages
    /// themselves are released once linking is done.
    pub fn from_sources<N>(
        gl: &SharedGl,
        name: N,
        sources: &[(ShaderKind, &str, &str)],
    ) -> Result<Self>
    where
        N: Into<String>,
    {
        let name = name.into();
        let stages = map_all(sources, |&(kind, stage_name, source)| {
            ShaderStage::create(gl, kind, stage_name, source)
                .with_prefix(format_args!("stage '{stage_name}'"))
        })
        .with_prefix(format_args!("program '{name}'"))?;
        Self::create(gl, &stages, name)
    }

    pub fn bind(&self) -> VoidResult {
        self.gl.use_program(self.id).located()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn into_raw(mut self) -> u32 {
        std::mem::replace(&mut self.id, 0)
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if self.id != 0 {
            debug!(name = %self.name, id = self.id, "deleting shader program");
            self.gl.delete_program(self.id);
        }
    }
}
