//! `exemplar serve`: serve pages over HTTP.

use anyhow::{Context, Result};
use exemplar_core::SiteConfig;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::info;

use crate::server::{self, AppState, CorpusSource};

/// Load the corpus, bind `addr`, and serve until Ctrl-C.
///
/// On unix, SIGHUP reloads the corpus from its source.
pub async fn execute(
    config: SiteConfig,
    data: &Path,
    examples_dir: Option<&Path>,
    addr: SocketAddr,
) -> Result<()> {
    let source = examples_dir.map_or_else(
        || CorpusSource::Dataset(data.to_path_buf()),
        |dir| CorpusSource::Examples {
            dir: dir.to_path_buf(),
            sections: None,
        },
    );

    let dataset = source
        .load(&config)
        .with_context(|| format!("Failed to load corpus from {source:?}"))?;
    info!("Serving {} examples", dataset.examples.len());

    let state = AppState::new(config, source, dataset);

    #[cfg(unix)]
    tokio::spawn(reload_on_hangup(state.clone()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    println!("Listening on http://{}", listener.local_addr()?);

    server::serve(listener, state, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn reload_on_hangup(state: AppState) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("Cannot listen for SIGHUP, reload disabled: {e}");
            return;
        },
    };

    while hangup.recv().await.is_some() {
        info!("SIGHUP received, reloading corpus");
        if let Err(e) = state.reload().await {
            tracing::warn!("Reload failed, keeping previous corpus: {e:#}");
        }
    }
}
