pub mod common;
pub mod snake;

mod internal;

pub use common::{
    errors::SimpleError,
    game::{ApplicationState, Game},
    result::{ConsumeExt, Result, ResultExt, UniqueResult, VoidResult},
    wrapper::{GlApi, SharedGl},
};
pub use internal::game_loop::{run_game_loop, Frontend};

#[cfg(desktop_platform)]
use internal::window_host::{DesktopFrontend, HostSettings};
#[cfg(desktop_platform)]
use winit::{
    dpi::{PhysicalPosition, PhysicalSize, Position, Size},
    window::Window,
};

pub struct ApplicationBuilder {
    title: String,
    window_size: Option<(u32, u32)>,
    window_position: Option<(i32, i32)>,
    resizable: bool,
    gl_version: (u8, u8),
    vsync: bool,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self {
            title: String::from("snake window"),
            window_size: None,
            window_position: None,
            resizable: false,
            gl_version: (4, 6),
            vsync: true,
        }
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<T>(mut self, title: T) -> Self
    where
        T: Into<String>,
    {
        self.title = title.into();
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    pub fn window_position(mut self, x: i32, y: i32) -> Self {
        self.window_position = Some((x, y));
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Core profile version requested for the context.
    pub fn gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn build(self) -> Application {
        Application::new(self)
    }
}

pub struct Application {
    builder: ApplicationBuilder,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    fn new(builder: ApplicationBuilder) -> Self {
        Self { builder }
    }

    /// Opens the window and runs `game` until the window closes or a frame fails.
    #[cfg(desktop_platform)]
    pub fn run<G>(self, mut game: G) -> VoidResult
    where
        G: Game,
    {
        let mut window_attributes = Window::default_attributes()
            .with_title(self.builder.title.clone())
            .with_resizable(self.builder.resizable);
        if let Some((width, height)) = self.builder.window_size {
            window_attributes =
                window_attributes.with_inner_size(Size::Physical(PhysicalSize::new(width, height)));
        }
        if let Some((x, y)) = self.builder.window_position {
            window_attributes =
                window_attributes.with_position(Position::Physical(PhysicalPosition::new(x, y)));
        }
        let settings = HostSettings {
            gl_version: self.builder.gl_version,
            vsync: self.builder.vsync,
        };
        let mut frontend = DesktopFrontend::start(window_attributes, settings).located()?;
        let outcome = run_game_loop(&mut frontend, &mut game);
        // Resources the game still owns are released while the context is current.
        drop(game);
        outcome
    }
}
