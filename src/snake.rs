use crate::{
    common::{
        game::{ApplicationState, Game},
        result::{ResultExt, VoidResult},
        wrapper::{ClearMask, SharedGl},
    },
    simple_error,
};

/// The snake game. For now it only paints the board background.
pub struct Snake {
    background: [f32; 4],
}

impl Snake {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.5, 1.0];

    pub fn new() -> Self {
        Self {
            background: Self::BACKGROUND,
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Snake {
    fn on_update(&mut self, gl: &SharedGl, state: &ApplicationState) -> VoidResult {
        let width = i32::try_from(state.width)
            .map_err(|_| simple_error!("viewport width {} out of range", state.width))?;
        let height = i32::try_from(state.height)
            .map_err(|_| simple_error!("viewport height {} out of range", state.height))?;
        gl.viewport(0, 0, width, height).located()?;
        let [red, green, blue, alpha] = self.background;
        gl.clear_color(red, green, blue, alpha);
        gl.clear(ClearMask::COLOR | ClearMask::DEPTH).located()?;
        Ok(())
    }
}
