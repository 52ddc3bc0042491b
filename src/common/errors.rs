use std::borrow::Cow;

/// A formatted diagnostic message.
///
/// Literals are kept borrowed, everything else is owned. Two errors are equal
/// when their text is equal, regardless of how it is stored.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("{message}")]
pub struct SimpleError {
    message: Cow<'static, str>,
}

impl SimpleError {
    pub const fn new(message: &'static str) -> Self {
        Self {
            message: Cow::Borrowed(message),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for SimpleError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for SimpleError {
    fn from(message: String) -> Self {
        Self {
            message: Cow::Owned(message),
        }
    }
}

/// Builds a [`SimpleError`] from a format string and its arguments.
#[macro_export]
macro_rules! simple_error {
    ($($arg:tt)+) => {
        $crate::common::errors::SimpleError::from(::std::format!($($arg)+))
    };
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    #[error("{call} failed, no handle")]
    Allocation { call: &'static str },

    #[error("{call} failed, err={code}")]
    Call { call: &'static str, code: u32 },

    #[error("shader compilation error: {0}")]
    ShaderCompile(String),

    #[error("program link error: {0}")]
    ProgramLink(String),
}

impl From<GlError> for SimpleError {
    fn from(error: GlError) -> Self {
        Self::from(error.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to pick a gl display config: {0}")]
    Display(String),

    #[error("gl context error: {0}")]
    Context(#[from] glutin::error::Error),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("window handle unavailable: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),

    #[error("window closed before the gl context was ready")]
    ClosedDuringStartup,
}

impl From<PlatformError> for SimpleError {
    fn from(error: PlatformError) -> Self {
        Self::from(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_and_owned_errors_compare_by_text() {
        let borrowed = SimpleError::new("boom");
        let owned = SimpleError::from(String::from("boom"));
        assert_eq!(borrowed, owned);
        assert_ne!(borrowed, SimpleError::from("bang"));
    }

    #[test]
    fn format_macro_builds_message() {
        let error = simple_error!("glClear failed, err={}", 1280);
        assert_eq!(error.message(), "glClear failed, err=1280");
        assert_eq!(error.to_string(), error.message());
    }

    #[test]
    fn gl_errors_keep_native_text() {
        let error: SimpleError = GlError::ShaderCompile("0:1(1): error: syntax error".into()).into();
        assert_eq!(
            error.message(),
            "shader compilation error: 0:1(1): error: syntax error"
        );

        let error: SimpleError = GlError::Call {
            call: "glViewport",
            code: 1281,
        }
        .into();
        assert_eq!(error.message(), "glViewport failed, err=1281");

        let error: SimpleError = GlError::Allocation {
            call: "glCreateProgram",
        }
        .into();
        assert_eq!(error.message(), "glCreateProgram failed, no handle");
    }
}
