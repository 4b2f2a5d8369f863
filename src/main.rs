use futuregen::{Config, GalleryRuntime, GenAiClient, ImageClient, Pipeline, TextClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    futuregen::logger::init_with_config(config.logger.clone())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }
    futuregen::logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config,
    );

    log::debug!("📚 Known text generation models:");
    for model in TextClient::supported_models() {
        log::debug!("  {} - {} ({})", model.id, model.name, model.provider);
    }
    log::debug!("🖼️  Known image generation models:");
    for model in ImageClient::supported_models() {
        log::debug!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    let client = match GenAiClient::new(config.gemini.clone()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize generation client: {}", e);
            return Err(e.into());
        }
    };
    let gallery = GalleryRuntime::new(Pipeline::new(Arc::new(client)));

    run(config, gallery).await
}

#[cfg(feature = "server")]
async fn run(
    config: Config,
    gallery: GalleryRuntime<GenAiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let gallery = actix_web::web::Data::new(gallery);
    gallery.mount();
    futuregen::server::serve(&config, gallery).await?;
    Ok(())
}

/// Without the HTTP surface, run one invocation and print the result.
#[cfg(not(feature = "server"))]
async fn run(
    _config: Config,
    gallery: GalleryRuntime<GenAiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut updates = gallery.subscribe();
    gallery.mount();
    let state = updates.wait_for(|state| !state.is_loading()).await?.clone();

    if let Some(error) = state.error() {
        return Err(error.into());
    }
    for (index, item) in state.items().iter().enumerate() {
        println!("{}. {}\n   {}\n", index + 1, item.title, item.description);
    }
    Ok(())
}
