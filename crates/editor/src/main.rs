use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use serde_json::json;

use storefront_catalog::ImageCandidate;
use storefront_editor::command::HELP;
use storefront_editor::{Command, EditorConfig, EditorSession, UserEvent, parse_command};
use storefront_view::render_text;

fn main() -> anyhow::Result<()> {
    let config = EditorConfig::from_env().context("invalid editor configuration")?;
    storefront_observability::init_with(config.log_format);
    tracing::info!(
        currency = %config.currency,
        max_image_bytes = config.max_image_bytes,
        "storefront editor starting"
    );

    let mut session = EditorSession::new(&config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "error: {err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Command::Json => {
                let doc = json!({
                    "search": session.search(),
                    "pending_delete": session.pending_delete().map(|id| id.to_string()),
                    "view": session.view(),
                });
                writeln!(stdout, "{}", serde_json::to_string_pretty(&doc)?)?;
                continue;
            }
            Command::Show => {}
            Command::LoadImage(path) => {
                if let Err(err) = load_image(&mut session, &path) {
                    writeln!(stdout, "error: {err:#}")?;
                }
            }
            Command::Event(event) => session.handle(event),
        }

        if let Some(message) = session.take_message() {
            writeln!(stdout, "[{:?}] {}", message.tone, message.text)?;
        }
        if let Some(alert) = session.take_alert() {
            writeln!(stdout, "!! {alert}")?;
        }
        if let Some(id) = session.pending_delete() {
            writeln!(stdout, "Delete {id}? (confirm / cancel)")?;
        }
        write!(stdout, "{}", render_text(session.view()))?;
        stdout.flush()?;
    }

    tracing::info!(products = session.store().len(), "storefront editor exiting");
    Ok(())
}

/// Select the file, then deliver its bytes if intake accepted it.
fn load_image(session: &mut EditorSession, path: &Path) -> anyhow::Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot open image at {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // The terminal has no picker-reported MIME type; intake falls back to
    // the file extension.
    session.handle(UserEvent::SelectImage(ImageCandidate::new(
        file_name,
        "",
        metadata.len(),
    )));

    if session.form().image.is_loading() {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read image at {}", path.display()))?;
        session.handle(UserEvent::ImageLoaded { bytes });
    }
    Ok(())
}
