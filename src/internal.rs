pub(crate) mod game_loop;

#[cfg(desktop_platform)]
pub(crate) mod window_host;
