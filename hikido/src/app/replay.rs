use std::io::{BufRead, Write};

use anyhow::Result;
use hikido_ipc::{Event, Response};

use super::App;
use crate::desktop::Desktop;

/// Feeds JSON-lines events through the engine against an in-memory desktop,
/// writing one JSON response per event. Returns the number of events read.
///
/// Each event is first applied to the desktop (a window opening, closing,
/// gaining focus or being moved by the user) and then handed to the engine.
pub async fn run_replay<R: BufRead, W: Write>(
    app: &mut App,
    desktop: &Desktop,
    input: R,
    output: &mut W,
) -> Result<usize> {
    let mut count = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        count += 1;

        let response = match serde_json::from_str::<Event>(&line) {
            Ok(event) => {
                desktop.apply_event(&event);
                app.handle_event(desktop, desktop, &event).await
            }
            Err(e) => {
                tracing::warn!("Skipping malformed event on line {}: {}", index + 1, e);
                Response::error(format!("line {}: {}", index + 1, e))
            }
        };

        serde_json::to_writer(&mut *output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }

    tracing::info!("Replayed {} events", count);
    Ok(count)
}
