//! # refile: in-place file replacement dialogs
//!
//! `refile` lets an editor replace an uploaded file in place - keeping the
//! same file reference - through a modal dialog instead of a separate page.
//! It injects a "Replace" control into rendered file-upload widgets, serves
//! the modal containing the replace form, and patches the host page after
//! submission, all through a JSON AJAX command protocol interpreted by the
//! client-side dialog behavior.
//!
//! ## Request flow
//!
//! A file-upload widget is rendered and the widget hook
//! ([`form_adapter::ReplaceFormAdapter::widget_alter`]) injects a control
//! whose href points at the modal-open route, carrying the file id in the
//! path and the owner identity as the `_ajax_context` query parameter. When
//! the editor activates the control, the client fetches the route and
//! receives one open-modal command wrapping the ajax-ified replace form
//! ([`modal::ModalLauncher::handle_modal_request`]). Submitting the form
//! inside the modal posts back asynchronously; the adapter's submission
//! handler ([`form_adapter::ReplaceFormAdapter::on_submit`]) either hides
//! the form and appends a completion message, or re-renders it with its
//! errors, wrapped in a replace-node command targeting the form's own
//! selector.
//!
//! ## Host collaborators
//!
//! Entity and file storage belong to the host framework and are reached
//! through the [`storage`] traits; the in-memory backend exists for the
//! standalone binary and for tests. Validation of the replacement upload is
//! likewise the host's job - this subsystem only observes the resulting
//! message list ([`messages`]).
//!
//! ## Quick start
//!
//! ```no_run
//! use clap::Parser;
//! use refile::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = refile::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     refile::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod ajax;
pub mod api;
pub mod config;
pub mod errors;
pub mod form_adapter;
pub mod messages;
pub mod modal;
pub mod render;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use crate::api::ApiDoc;
use crate::storage::{EntityStorage, FileStorage, MemoryStorage};
use axum::{routing::get, Router};
use bon::Builder;
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use url::Url;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across request handlers: configuration, the
/// resolved public base URL, and handles to the host storage backends.
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub public_url: Url,
    pub files: Arc<dyn FileStorage>,
    pub entities: Arc<dyn EntityStorage>,
}

/// Build the application router: the two replace-flow routes, a liveness
/// probe, OpenAPI docs, and tracing middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route(
            "/file/{file_id}/replace-modal",
            get(api::handlers::replace::replace_modal).post(api::handlers::replace::submit_replace),
        )
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Top-level application container: owns the router and configuration.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create the application: seed the in-memory storage backend from the
    /// configured fixtures and build the router.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let public_url = config.resolve_public_url()?;

        let storage = Arc::new(MemoryStorage::new());
        for file in &config.fixtures.files {
            storage.insert_file(file.clone());
        }
        for entity in &config.fixtures.entities {
            storage.insert_entity(entity.clone());
        }
        info!(
            files = config.fixtures.files.len(),
            entities = config.fixtures.entities.len(),
            "seeded in-memory storage from fixtures"
        );

        let state = AppState::builder()
            .config(config.clone())
            .public_url(public_url)
            .files(storage.clone())
            .entities(storage)
            .build();

        Ok(Self {
            router: build_router(state),
            config,
        })
    }

    /// Convert the application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("refile listening on http://{bind_addr}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
