use super::{result::VoidResult, wrapper::SharedGl};

/// Size of the drawable area for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationState {
    pub width: u32,
    pub height: u32,
}

/// A game driven by the application loop.
///
/// Resources built from `gl` in `setup` may clone the handle and live on the
/// game until `teardown` or until the game itself drops.
pub trait Game {
    /// Called once per frame. A failure stops the loop.
    fn on_update(&mut self, gl: &SharedGl, state: &ApplicationState) -> VoidResult;

    fn setup(&mut self, _gl: &SharedGl) -> VoidResult {
        Ok(())
    }

    fn teardown(&mut self, _gl: &SharedGl) {}
}
