pub mod api;
pub mod config;
pub mod credential;
pub mod pipeline;
pub mod session;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext};
use crate::config::AuditorConfig;
use crate::pipeline::extraction::{PdfDocumentExtractor, PdfTextExtractor};
use crate::pipeline::generation::GeminiClient;
use crate::session::SessionController;

pub async fn run() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = match AuditorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.credential.is_none() {
        tracing::warn!(
            "No API credential found in {} or {}; it must be entered in the UI",
            config::API_KEY_ENV,
            config::secrets_path().display()
        );
    }

    let extractor = PdfDocumentExtractor::new(Box::new(PdfTextExtractor), config.max_document_bytes);
    let generator = GeminiClient::new(&config.api_base, &config.model, config.timeout_secs);
    tracing::info!(model = generator.model(), "Generation backend configured");

    let session = SessionController::new(
        Box::new(extractor),
        Box::new(generator),
        config.report_file_name(),
    )
    .with_credential(config.credential.clone());

    let ctx = ApiContext::new(session, config.max_document_bytes);
    let server = match start_server(ctx, config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Open http://{} in a browser", server.info.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.stop().await;
    ExitCode::SUCCESS
}
