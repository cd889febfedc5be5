//! Koipond - torus-knot tube demo with god-ray post-processing

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = koipond::config::load();
    tracing::info!(
        "Starting at {}x{}, vsync {}, auto rotate {}",
        config.video.window_width,
        config.video.window_height,
        config.video.vsync,
        config.camera.auto_rotate
    );

    if let Err(e) = koipond::app::run(config) {
        tracing::error!("Application error: {e:#}");
        std::process::exit(1);
    }
}
