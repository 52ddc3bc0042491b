use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    run();
}

#[cfg(desktop_platform)]
fn run() {
    use snake::{snake::Snake, ApplicationBuilder};

    let app = ApplicationBuilder::new()
        .title("Gamedev 101: Snake")
        .window_size(1024, 1024)
        .build();
    if let Err(e) = app.run(Snake::new()) {
        eprintln!("Error: {e}");
    }
}

#[cfg(not(desktop_platform))]
fn run() {
    eprintln!("Error: no desktop window support on this platform");
}
