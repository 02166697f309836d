// Lambda entry point for the prompt-mode function

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use notes_ai_proxy::api::TextProxy;
use notes_ai_proxy::core::config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    notes_ai_proxy::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let service = Arc::new(TextProxy::from_config(&config));
    info!("prompt-mode function ready");

    run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move { Ok::<Value, Error>(service.handle(&event.payload).await) }
    }))
    .await
}
