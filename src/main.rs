use anyhow::Result;
use holovox::camera::CameraProvider;
use holovox::config::AppConfig;
use holovox::speech::RecognitionSession;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holovox=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Holovox assistant");

    let config = AppConfig::load_or_default();

    let camera = build_camera();
    let session = build_session(&config);

    holovox::ui::run(config, camera, session).map_err(|e| anyhow::anyhow!("{}", e))
}

#[cfg(feature = "camera-io")]
fn build_camera() -> Box<dyn CameraProvider> {
    Box::new(holovox::camera::NativeCamera::new())
}

#[cfg(not(feature = "camera-io"))]
fn build_camera() -> Box<dyn CameraProvider> {
    warn!("Built without camera support");
    Box::new(holovox::camera::NullCamera)
}

#[cfg(feature = "audio-io")]
fn build_session(config: &AppConfig) -> Option<Box<dyn RecognitionSession>> {
    match holovox::speech::WhisperSession::new(config.speech.clone()) {
        Ok(session) => Some(Box::new(session)),
        Err(e) => {
            warn!("Speech recognition unavailable: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "audio-io"))]
fn build_session(_config: &AppConfig) -> Option<Box<dyn RecognitionSession>> {
    warn!("Built without audio support");
    None
}
