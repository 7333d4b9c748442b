//! Live HTTP server.
//!
//! Routes:
//!
//! | Path | Response |
//! |------|----------|
//! | `/` | index page |
//! | `/{example_id}` | example page, or a not-found page with 404 |
//! | `/{example_id}/images/{filename}` | image bytes |
//! | `/llms.txt` | flat Markdown export |
//!
//! The corpus is an `Arc<Dataset>` behind a lock. Handlers clone the `Arc`
//! and render from that snapshot; [`AppState::reload`] builds a complete
//! new dataset before swapping it in, so requests never see a partial one.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use exemplar_core::render::{LinkStyle, PageRenderer, render_llms_txt};
use exemplar_core::{CorpusBuilder, Dataset, SiteConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Where the served corpus comes from.
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// A dataset JSON file written by `exemplar build`.
    Dataset(PathBuf),
    /// An examples directory compiled in memory.
    Examples {
        /// The examples directory.
        dir: PathBuf,
        /// Optional explicit section manifest.
        sections: Option<PathBuf>,
    },
}

impl CorpusSource {
    /// Load a complete dataset from this source.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset file or examples directory is
    /// unusable.
    pub fn load(&self, config: &SiteConfig) -> exemplar_core::Result<Dataset> {
        match self {
            Self::Dataset(path) => Dataset::load(path),
            Self::Examples { dir, sections } => {
                let report = CorpusBuilder::new(config).build(dir, sections.as_deref())?;
                Ok(report.dataset)
            },
        }
    }
}

struct Shared {
    config: SiteConfig,
    source: CorpusSource,
    dataset: RwLock<Arc<Dataset>>,
}

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    shared: Arc<Shared>,
}

impl AppState {
    /// Create state serving `dataset`, reloadable from `source`.
    #[must_use]
    pub fn new(config: SiteConfig, source: CorpusSource, dataset: Dataset) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                source,
                dataset: RwLock::new(Arc::new(dataset)),
            }),
        }
    }

    /// Snapshot of the current corpus.
    pub async fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&*self.shared.dataset.read().await)
    }

    /// Rebuild the corpus from its source and swap it in.
    ///
    /// On failure the previous corpus stays in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the new corpus cannot be loaded.
    pub async fn reload(&self) -> anyhow::Result<usize> {
        let shared = Arc::clone(&self.shared);
        let dataset = tokio::task::spawn_blocking(move || shared.source.load(&shared.config)).await??;
        let count = dataset.examples.len();
        *self.shared.dataset.write().await = Arc::new(dataset);
        info!("Reloaded corpus with {count} examples");
        Ok(count)
    }

    fn renderer(&self) -> PageRenderer<'_> {
        PageRenderer::new(&self.shared.config.site, LinkStyle::Absolute)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/llms.txt", get(llms_txt))
        .route("/{example_id}", get(example_page))
        .route("/{example_id}/images/{filename}", get(example_image))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let dataset = state.dataset().await;
    Html(state.renderer().index(&dataset))
}

async fn example_page(State(state): State<AppState>, Path(example_id): Path<String>) -> Response {
    let dataset = state.dataset().await;
    match dataset.find(&example_id) {
        Some(record) => {
            debug!("Rendering {example_id}");
            Html(state.renderer().example(&dataset, record)).into_response()
        },
        None => {
            warn!("Example not found: {example_id}");
            (StatusCode::NOT_FOUND, Html(state.renderer().not_found(&example_id))).into_response()
        },
    }
}

async fn example_image(
    State(state): State<AppState>,
    Path((example_id, filename)): Path<(String, String)>,
) -> Response {
    let dataset = state.dataset().await;
    let Some(image) = dataset
        .find(&example_id)
        .and_then(|record| record.image_data.iter().find(|i| i.filename == filename))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&image.path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&filename))], bytes).into_response(),
        Err(e) => {
            warn!("Cannot read image {}: {e}", image.path.display());
            StatusCode::NOT_FOUND.into_response()
        },
    }
}

async fn llms_txt(State(state): State<AppState>) -> impl IntoResponse {
    let dataset = state.dataset().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_llms_txt(&dataset, &state.shared.config),
    )
}

fn content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("chart.PNG"), "image/png");
        assert_eq!(content_type("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }
}
