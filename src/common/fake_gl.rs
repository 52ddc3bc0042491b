use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use super::{
    errors::GlError,
    shader::ShaderKind,
    wrapper::{ClearMask, GlApi, SharedGl},
};

pub(crate) const SYNTAX_ERROR_LOG: &str = "0:1(1): error: syntax error, unexpected end of file";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GlCall {
    Clear(ClearMask),
    ClearColor([f32; 4]),
    Viewport(i32, i32, i32, i32),
    CreateShader(ShaderKind),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
}

/// Records every call. Sources without an entry point fail to compile.
pub(crate) struct FakeGl {
    calls: RefCell<Vec<GlCall>>,
    sources: RefCell<HashMap<u32, String>>,
    next_id: Cell<u32>,
    link_log: Option<String>,
    failing_call: Option<(&'static str, u32)>,
}

impl FakeGl {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            sources: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
            link_log: None,
            failing_call: None,
        }
    }

    pub(crate) fn with_link_failure(mut self, log: &str) -> Self {
        self.link_log = Some(log.to_string());
        self
    }

    pub(crate) fn with_failing_call(mut self, call: &'static str, code: u32) -> Self {
        self.failing_call = Some((call, code));
        self
    }

    /// The recorder plus the handle that resources and games hold on to.
    pub(crate) fn shared(self) -> (Rc<Self>, SharedGl) {
        let fake = Rc::new(self);
        let gl: SharedGl = fake.clone();
        (fake, gl)
    }

    pub(crate) fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&GlCall) -> bool,
    {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, call: &'static str) -> Result<(), GlError> {
        match self.failing_call {
            Some((failing, code)) if failing == call => Err(GlError::Call { call, code }),
            _ => Ok(()),
        }
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl GlApi for FakeGl {
    fn clear(&self, mask: ClearMask) -> Result<(), GlError> {
        self.record(GlCall::Clear(mask));
        self.check("glClear")
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) -> Result<(), GlError> {
        self.record(GlCall::Viewport(x, y, width, height));
        self.check("glViewport")
    }

    fn create_shader(&self, kind: ShaderKind) -> Result<u32, GlError> {
        self.record(GlCall::CreateShader(kind));
        self.check("glCreateShader")?;
        Ok(self.allocate())
    }

    fn shader_source(&self, shader: u32, source: &str) -> Result<(), GlError> {
        self.record(GlCall::ShaderSource(shader));
        self.check("glShaderSource")?;
        self.sources
            .borrow_mut()
            .insert(shader, source.to_string());
        Ok(())
    }

    fn compile_shader(&self, shader: u32) -> Result<(), GlError> {
        self.record(GlCall::CompileShader(shader));
        self.check("glCompileShader")?;
        let compiles = self
            .sources
            .borrow()
            .get(&shader)
            .is_some_and(|source| source.contains("void main"));
        if compiles {
            Ok(())
        } else {
            Err(GlError::ShaderCompile(SYNTAX_ERROR_LOG.to_string()))
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, GlError> {
        self.record(GlCall::CreateProgram);
        self.check("glCreateProgram")?;
        Ok(self.allocate())
    }

    fn attach_shader(&self, program: u32, shader: u32) -> Result<(), GlError> {
        self.record(GlCall::AttachShader(program, shader));
        self.check("glAttachShader")
    }

    fn link_program(&self, program: u32) -> Result<(), GlError> {
        self.record(GlCall::LinkProgram(program));
        self.check("glLinkProgram")?;
        match &self.link_log {
            Some(log) => Err(GlError::ProgramLink(log.clone())),
            None => Ok(()),
        }
    }

    fn use_program(&self, program: u32) -> Result<(), GlError> {
        self.record(GlCall::UseProgram(program));
        self.check("glUseProgram")
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }
}
