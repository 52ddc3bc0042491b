use tracing::{debug, error, info};

use crate::common::{
    errors::SimpleError,
    game::{ApplicationState, Game},
    result::{ResultExt, VoidResult},
    wrapper::SharedGl,
};

const CONTEXT_UNAVAILABLE: SimpleError = SimpleError::new("gl context is not available");

/// Whatever owns the window and the current gl context.
pub trait Frontend {
    fn gl(&self) -> Option<&SharedGl>;

    /// The external stop condition, e.g. the window was asked to close.
    fn should_close(&self) -> bool;

    fn state(&self) -> ApplicationState;

    fn present(&mut self) -> VoidResult;

    fn poll_events(&mut self);
}

/// Runs `game` once per frame until the frontend asks to stop or a frame fails.
///
/// `teardown` runs in both cases; the first failure is returned.
pub fn run_game_loop<F, G>(frontend: &mut F, game: &mut G) -> VoidResult
where
    F: Frontend + ?Sized,
    G: Game + ?Sized,
{
    let outcome = drive(frontend, game);
    if let Some(gl) = frontend.gl() {
        game.teardown(gl);
    }
    match &outcome {
        Ok(()) => info!("game loop finished"),
        Err(e) => error!("game loop stopped: {e}"),
    }
    outcome
}

fn drive<F, G>(frontend: &mut F, game: &mut G) -> VoidResult
where
    F: Frontend + ?Sized,
    G: Game + ?Sized,
{
    let gl = frontend.gl().ok_or(CONTEXT_UNAVAILABLE)?;
    game.setup(gl).with_prefix("setup")?;

    let mut frames: u64 = 0;
    while !frontend.should_close() {
        let state = frontend.state();
        let gl = frontend.gl().ok_or(CONTEXT_UNAVAILABLE)?;
        game.on_update(gl, &state).located()?;
        frontend.present().located()?;
        frontend.poll_events();
        frames += 1;
    }
    debug!(frames, "stop requested");
    Ok(())
}
