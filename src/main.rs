use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use tolk::application::services::{
    AudioNormalizer, LoadPolicy, ModelRegistry, PipelineService, SessionStore, SynthesisStage,
    TranscriptionStage, TranslationStage,
};
use tolk::infrastructure::audio::{FfmpegTranscoder, TranscriptionEngineFactory, check_ffmpeg_binary};
use tolk::infrastructure::observability::{TracingConfig, init_tracing};
use tolk::infrastructure::speech::SynthesizerFactory;
use tolk::infrastructure::storage::AudioStoreFactory;
use tolk::infrastructure::translation::HuggingFaceModelLoader;
use tolk::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json,
        &settings.logging.level,
    ));

    check_ffmpeg_binary(&settings.audio.ffmpeg_binary)
        .context("ffmpeg is required to normalize uploaded audio")?;

    let default_pair = settings
        .pipeline
        .default_pair()
        .context("Invalid default language pair")?;

    let transcription_engine = TranscriptionEngineFactory::create(
        settings.transcription.provider,
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )
    .context("Failed to initialize transcription engine")?;

    let model_loader = Arc::new(HuggingFaceModelLoader::new(
        settings.translation.hub_url.clone(),
        settings.translation.inference_url.clone(),
        settings.translation.model_template.clone(),
        settings.translation.api_token.clone(),
    ));

    let synthesizer = SynthesizerFactory::create(
        settings.synthesis.provider,
        settings.synthesis.base_url.clone(),
        settings.synthesis.api_key.clone(),
        settings.synthesis.model.clone(),
        settings.synthesis.voice.clone(),
    );

    let audio_store =
        AudioStoreFactory::create(settings.storage.provider, &settings.storage.local_path)
            .context("Failed to initialize audio store")?;

    let load_policy = if settings.pipeline.reload_on_translate {
        LoadPolicy::LoadIfMissing
    } else {
        LoadPolicy::RequireLoaded
    };

    let sessions = Arc::new(SessionStore::new(default_pair));
    let registry = Arc::new(ModelRegistry::new(model_loader));

    let pipeline = Arc::new(PipelineService::new(
        Arc::clone(&sessions),
        Arc::clone(&registry),
        AudioNormalizer::new(
            Arc::new(FfmpegTranscoder::new(settings.audio.ffmpeg_binary.clone())),
            settings.audio.default_extension.clone(),
        ),
        TranscriptionStage::new(transcription_engine),
        TranslationStage::new(Arc::clone(&registry), load_policy),
        SynthesisStage::new(
            synthesizer,
            audio_store,
            settings.storage.public_prefix.clone(),
        ),
        settings.pipeline.reconfigure_policy,
    ));

    if settings.pipeline.preload_default_model {
        match pipeline.preload_default().await {
            Ok(Some(loaded)) => tracing::info!(
                pair = %loaded.model.pair,
                model = loaded.model.handle.model_id(),
                "Default translation model loaded"
            ),
            Ok(None) => tracing::info!("No default language pair configured"),
            // Sessions can still pick a working pair later.
            Err(e) => tracing::warn!(error = %e, "Failed to preload default translation model"),
        }
    }

    spawn_session_sweeper(
        Arc::clone(&sessions),
        Duration::from_secs(settings.pipeline.session_idle_timeout_secs),
        Duration::from_secs(settings.pipeline.session_sweep_interval_secs.max(1)),
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let router = create_router(AppState::new(pipeline, settings));

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn spawn_session_sweeper(sessions: Arc<SessionStore>, max_idle: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let evicted = sessions.evict_idle(max_idle).await;
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted idle sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
