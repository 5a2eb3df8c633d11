use std::time::Duration;

use crate::core::{frame_ratio, set_frame, FrameCache};
use crate::platform::{WindowId, WindowManipulator, WindowSystem};

/// Moves a window to the next screen, scaled to the new screen's visible
/// frame. Fullscreen windows leave fullscreen for the move and re-enter it
/// on the new screen.
pub async fn send_to_next_screen<S: WindowSystem, M: WindowManipulator>(
    cache: &mut FrameCache,
    ws: &S,
    wm: &M,
    window_id: WindowId,
    settle: Duration,
) -> bool {
    let fullscreen = ws.is_fullscreen(window_id);
    if fullscreen {
        wm.set_fullscreen(window_id, false);
        // The host animates the transition and ignores frame changes until done
        tokio::time::sleep(settle).await;
    }

    let Some(old_screen) = ws.window_screen(window_id) else {
        tracing::debug!("Window {} has no screen", window_id);
        return false;
    };
    let Some(new_screen) = ws.next_screen(old_screen) else {
        return false;
    };
    if old_screen == new_screen {
        tracing::debug!("Only one screen, not moving window {}", window_id);
        return false;
    }

    let (Some(from), Some(to), Some(frame)) = (
        ws.screen_visible_frame(old_screen),
        ws.screen_visible_frame(new_screen),
        ws.window_frame(window_id),
    ) else {
        return false;
    };

    let target = frame_ratio(from, to)(frame);
    tracing::info!(
        "Sending window {} from screen {} to {}: {}",
        window_id,
        old_screen,
        new_screen,
        target
    );
    let moved = set_frame(cache, ws, wm, window_id, &[Some(target)]);

    if fullscreen {
        tokio::time::sleep(settle).await;
        wm.set_fullscreen(window_id, true);
    }

    wm.focus_window(window_id);
    moved
}
