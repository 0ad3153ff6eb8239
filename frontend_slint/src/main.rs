// --- File: frontend_slint/src/main.rs ---

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // RUST_LOG overrides the default of INFO
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    frontend::runner::run()
}

// The browser build starts from the library's wasm entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
