//! Wizard run command handler.

use super::OutputFormat;
use super::render::{render_card, render_output};
use sightline::{
    FfmpegDecoder, FrameExtractor, MediaUpload, ServiceConfig, ServiceSelection, SightlineError,
    StepId, WizardSession, mime_for_path,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Shown when no credential is configured.
const MOCK_WARNING: &str = "Warning: No API key found. Running in mock mode with simulated data.";

/// Options for a wizard run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Declared MIME type; guessed from the extension when `None`
    pub mime: Option<String>,
    /// Use the mock service even when a credential is present
    pub force_mock: bool,
    /// Wait for Enter before each step
    pub step_by_step: bool,
    /// Output format
    pub format: OutputFormat,
}

/// Upload `file` and advance through every step.
///
/// In JSON mode the final session view is printed even when a step fails.
/// Wizard errors are returned as their user-facing message.
pub async fn run_wizard(
    file: &Path,
    options: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::load().map_err(user_facing)?;
    let selection = if options.force_mock {
        info!("Mock mode forced from the command line");
        ServiceSelection::mock(&config)
    } else {
        let selection = ServiceSelection::from_config(&config).map_err(user_facing)?;
        if selection.mock_mode() {
            eprintln!("{}", MOCK_WARNING);
        }
        selection
    };

    let decoder = FfmpegDecoder::new(
        &config.ffmpeg_path,
        &config.ffprobe_path,
        config.extraction_timeout(),
    );
    let extractor = FrameExtractor::new(Arc::new(decoder)).with_jpeg_quality(config.jpeg_quality);
    let mut session = WizardSession::new(selection.service(), selection.mock_mode());

    let bytes = tokio::fs::read(file).await?;
    let mime = options
        .mime
        .clone()
        .unwrap_or_else(|| mime_for_path(file).to_string());
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    debug!(file = %file.display(), %mime, bytes = bytes.len(), "Read upload");

    let upload = MediaUpload::builder()
        .file_name(file_name)
        .mime(mime)
        .bytes(bytes)
        .build()?;

    let result = drive(&mut session, upload, &extractor, options).await;

    if options.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&session.view())?);
    }
    result.map_err(user_facing)
}

/// Reduce a wizard error to the message shown to the user.
fn user_facing(err: SightlineError) -> Box<dyn std::error::Error> {
    err.user_message().into()
}

async fn drive(
    session: &mut WizardSession,
    upload: MediaUpload,
    extractor: &FrameExtractor,
    options: &RunOptions,
) -> Result<(), SightlineError> {
    let human = options.format == OutputFormat::Human;
    let mut stdin = BufReader::new(tokio::io::stdin());

    if human {
        print!("{}", render_card(StepId::Upload.step()));
    }
    session.upload(upload, extractor).await?;
    if human {
        print!("{}", render_output(StepId::Upload, &session.view()));
    }

    loop {
        let step = session.state().current_step();
        if human {
            print!("{}", render_card(step));
        }
        if session.state().is_complete() {
            if human {
                print!("{}", render_output(step.id, &session.view()));
            }
            return Ok(());
        }

        if options.step_by_step {
            wait_for_enter(&mut stdin, step.action).await;
        }

        let executed = session.advance().await?;
        if human {
            print!("{}", render_output(executed, &session.view()));
        }
    }
}

async fn wait_for_enter<R>(stdin: &mut R, action: &str)
where
    R: AsyncBufReadExt + Unpin,
{
    let mut stdout = tokio::io::stdout();
    let prompt = format!("[Enter] {} ", action);
    let _ = stdout.write_all(prompt.as_bytes()).await;
    let _ = stdout.flush().await;
    let mut line = String::new();
    if let Err(e) = stdin.read_line(&mut line).await {
        debug!(error = %e, "Failed to read from stdin, continuing");
    }
}
