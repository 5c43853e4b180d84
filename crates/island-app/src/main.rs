mod app_state;
mod cli;

use std::net::SocketAddr;

use island_config::{ConfigPersistence, FilePersistence, MemoryPersistence};
use island_presence::SurfaceGeometry;
use tracing_subscriber::EnvFilter;

use crate::app_state::{run, EnvelopeSource, IslandApp};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("island=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "island=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Island v{} starting...", env!("CARGO_PKG_VERSION"));

    let compact = SurfaceGeometry::compact_for_screen(args.notch_width, args.top_inset);
    let source = if args.stdin {
        EnvelopeSource::Stdin
    } else {
        EnvelopeSource::WebSocket(SocketAddr::from(([127, 0, 0, 1], args.port)))
    };

    let result = if args.ephemeral {
        tracing::info!("Camera config kept in memory");
        launch(MemoryPersistence::new(), compact, source, args.fit_body).await
    } else if let Some(path) = args.config {
        tracing::info!("Using config override: {}", path.display());
        launch(FilePersistence::new(path), compact, source, args.fit_body).await
    } else {
        match FilePersistence::at_default_path() {
            Ok(persistence) => launch(persistence, compact, source, args.fit_body).await,
            Err(e) => {
                tracing::warn!("No config directory, camera config kept in memory: {e}");
                launch(MemoryPersistence::new(), compact, source, args.fit_body).await
            }
        }
    };

    if let Err(e) = result {
        tracing::error!("Island stopped: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

async fn launch<P: ConfigPersistence>(
    persistence: P,
    compact: SurfaceGeometry,
    source: EnvelopeSource,
    fit_body: bool,
) -> island_common::Result<()> {
    let mut app = IslandApp::new(persistence, compact);
    if fit_body {
        app.set_fit_body(true);
    }
    run(app, source).await
}
