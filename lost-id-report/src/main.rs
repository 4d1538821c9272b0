mod console_delegate;
mod demo_camera;
mod demo_detector;

use std::error::Error;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use face_capture_core::{
    CancellationToken, CaptureConfiguration, CaptureCoordinator, CaptureOutcome, ModelRegistry,
};
use lost_id_report::{LostIdReport, ReportField};

use console_delegate::ConsoleDelegate;
use demo_camera::DemoCamera;
use demo_detector::{DemoDetector, DemoModelLoader};

/// Give up on the capture if no face is accepted within this time.
const SESSION_TIMEOUT: Duration = Duration::from_secs(15);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CaptureConfiguration::from_json(&fs::read_to_string(path)?)?,
        None => CaptureConfiguration {
            brightness_threshold: 40.0,
            ..Default::default()
        },
    };

    let models = ModelRegistry::new(config.models_location.clone());
    log::info!("{}", models.status());
    models.load_all(&DemoModelLoader).await?;

    let mut coordinator = CaptureCoordinator::new(
        DemoCamera::new(320, 240),
        DemoDetector::new(Duration::from_millis(20)),
        config,
    )?
    .with_model_registry(models);
    coordinator.set_delegate(Arc::new(ConsoleDelegate::default()));

    let cancel = CancellationToken::new();
    let timeout = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SESSION_TIMEOUT).await;
        timeout.cancel();
    });

    let mut report = LostIdReport::new();
    report.apply_input(ReportField::Name, "Thandi");
    report.apply_input(ReportField::Surname, "Nkosi");
    report.apply_input(ReportField::IdNumber, "8001015009087");
    report.apply_input(ReportField::Reason, "Wallet stolen on the train");
    report.apply_input(ReportField::DateLost, "2026-10-12");

    match coordinator.run_session(cancel).await {
        CaptureOutcome::Completed(image) => report.attach_selfie(image),
        CaptureOutcome::Cancelled => log::warn!("capture cancelled"),
        CaptureOutcome::Failed(e) => log::error!("capture failed: {}", e),
    }

    match report.validate_for_submission() {
        Ok(()) => println!("{}", report.to_json()?),
        Err(e) => log::error!("{}", e),
    }
    Ok(())
}
