//! OV3D terminal viewer entry point.
//!
//! Usage: `ov3d-terminal [model.obj]` — without a model path a built-in
//! cube is shown. Style is read from the well-known record next to the
//! process and written back on exit.

use std::io;

use ov3d_core::{StyleFile, Viewer};
use ov3d_terminal::TerminalApp;
use tracing::warn;

fn main() -> io::Result<()> {
    // Default to warnings only; override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut viewer = Viewer::new(StyleFile::default());
    if let Some(path) = std::env::args().nth(1) {
        if let Err(err) = viewer.load_geometry(&path) {
            warn!("{err}; showing the built-in cube instead");
        }
    }

    let mut app = TerminalApp::new(viewer)?;
    app.run()
}
