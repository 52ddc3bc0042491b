use std::{num::NonZeroU32, rc::Rc, time::Duration};

use glutin::{
    config::{Config, ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    common::{
        errors::{PlatformError, SimpleError},
        game::ApplicationState,
        result::VoidResult,
        wrapper::{GlContext, SharedGl},
    },
    internal::game_loop::Frontend,
};

const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(16);

pub(crate) struct HostSettings {
    pub(crate) gl_version: (u8, u8),
    pub(crate) vsync: bool,
}

/// Desktop window with a current gl context, driven by pumping winit events
/// once per frame.
pub(crate) struct DesktopFrontend {
    handler: WindowHandler,
    event_loop: EventLoop<()>,
}

impl DesktopFrontend {
    /// Opens the window and blocks until its gl context is current.
    pub(crate) fn start(
        window_attributes: WindowAttributes,
        settings: HostSettings,
    ) -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new()?;
        let display_builder =
            DisplayBuilder::new().with_window_attributes(Some(window_attributes.clone()));
        let mut frontend = Self {
            handler: WindowHandler {
                template: ConfigTemplateBuilder::new(),
                display_builder,
                window_attributes,
                settings,
                state: None,
                close_requested: false,
                startup_error: None,
            },
            event_loop,
        };
        loop {
            let status = frontend
                .event_loop
                .pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut frontend.handler);
            if let Some(error) = frontend.handler.startup_error.take() {
                return Err(error);
            }
            if frontend.handler.state.is_some() {
                return Ok(frontend);
            }
            if let PumpStatus::Exit(_) = status {
                return Err(PlatformError::ClosedDuringStartup);
            }
        }
    }
}

impl Frontend for DesktopFrontend {
    fn gl(&self) -> Option<&SharedGl> {
        self.handler.state.as_ref().map(|state| &state.gl)
    }

    fn should_close(&self) -> bool {
        self.handler.close_requested
    }

    fn state(&self) -> ApplicationState {
        let size = self
            .handler
            .state
            .as_ref()
            .map(|state| state.window.inner_size())
            .unwrap_or_default();
        ApplicationState {
            width: size.width,
            height: size.height,
        }
    }

    fn present(&mut self) -> VoidResult {
        let Some(state) = self.handler.state.as_ref() else {
            return Err(SimpleError::new("no window to present to"));
        };
        state
            .gl_surface
            .swap_buffers(&state.gl_context)
            .map_err(PlatformError::from)?;
        Ok(())
    }

    fn poll_events(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            debug!(code, "event loop exited");
            self.handler.close_requested = true;
        }
    }
}

struct HostState {
    gl: SharedGl,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    window: Window,
}

struct WindowHandler {
    template: ConfigTemplateBuilder,
    display_builder: DisplayBuilder,
    window_attributes: WindowAttributes,
    settings: HostSettings,
    state: Option<HostState>,
    close_requested: bool,
    startup_error: Option<PlatformError>,
}

impl WindowHandler {
    fn create_state(&self, event_loop: &ActiveEventLoop) -> Result<HostState, PlatformError> {
        let (window, gl_config) = self
            .display_builder
            .clone()
            .build(event_loop, self.template.clone(), gl_config_picker)
            .map_err(|e| PlatformError::Display(e.to_string()))?;
        info!("Picked a config with {} samples", gl_config.num_samples());
        let raw_window_handle = window
            .as_ref()
            .and_then(|window| window.window_handle().ok())
            .map(|handle| handle.as_raw());
        let gl_display = gl_config.display();
        let (major, minor) = self.settings.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);
        let not_current_gl_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes)? };
        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(
                event_loop,
                self.window_attributes.clone(),
                &gl_config,
            )?,
        };
        let attrs = window.build_surface_attributes(Default::default())?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current_gl_context.make_current(&gl_surface)?;
        let gl: SharedGl = Rc::new(GlContext::load(&gl_display));
        let interval = if self.settings.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(res) = gl_surface.set_swap_interval(&gl_context, interval) {
            error!("Error setting vsync: {res:?}");
        }
        Ok(HostState {
            gl,
            gl_context,
            gl_surface,
            window,
        })
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                error!("failed to open the game window: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => {
                if let (Some(state), Some(width), Some(height)) = (
                    self.state.as_ref(),
                    NonZeroU32::new(size.width),
                    NonZeroU32::new(size.height),
                ) {
                    state.gl_surface.resize(&state.gl_context, width, height);
                }
            }
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                event_loop.exit();
            }
            _ => (),
        }
    }
}

fn gl_config_picker(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("gl display offered no configs")
}
