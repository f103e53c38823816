//! AWS Lambda entry point for allcpp-search
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//! Payload: `{"msg": "<keyword>", "debug": "raw" | "response"}`.

use std::sync::Arc;

use allcpp_search::handler::{self, SearchRequest};
use allcpp_search::models::Config;
use allcpp_search::pipeline::SearchService;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config_path =
        std::env::var("ALLCPP_SEARCH_CONFIG").unwrap_or_else(|_| "allcpp-search.toml".to_string());
    let config = Config::load_or_default(&config_path);
    config.validate()?;

    let service = Arc::new(SearchService::from_config(&config)?);

    info!("allcpp-search Lambda starting...");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move { handle_event(&service, event).await }
    }))
    .await
}

/// Handler for AWS Lambda events.
#[instrument(skip(service, event), fields(request_id = %event.context.request_id))]
async fn handle_event(
    service: &SearchService,
    event: LambdaEvent<Value>,
) -> Result<Value, LambdaError> {
    let (payload, _context) = event.into_parts();
    let request = SearchRequest::from_value(payload);
    info!(keyword = %request.msg, debug = ?request.debug, "Handling search");

    let envelope = handler::handle(service, &request).await;
    info!(code = envelope.code(), "Search finished");

    Ok(serde_json::to_value(envelope)?)
}
