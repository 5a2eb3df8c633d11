//! Candidate frames for the placement commands, computed from a screen's
//! visible frame.

use hikido_ipc::{Corner, Direction, Rect};

use super::frame::Fraction;

pub const DEFAULT_WIDE_SCREEN_THRESHOLD: u32 = 1600;

/// Full-height frames against the left edge: 1/2, 1/3 and on wide screens 1/4.
pub fn left_frames(screen: Rect, wide_threshold: u32) -> Vec<Rect> {
    widths(screen, wide_threshold)
        .into_iter()
        .map(|(fraction, _)| Rect::new(screen.x, screen.y, fraction.of_floor(screen.width), screen.height))
        .collect()
}

/// Mirror of [`left_frames`] against the right edge.
pub fn right_frames(screen: Rect, wide_threshold: u32) -> Vec<Rect> {
    widths(screen, wide_threshold)
        .into_iter()
        .map(|(fraction, offset)| {
            Rect::new(
                screen.x.saturating_add_unsigned(offset.of_ceil(screen.width)),
                screen.y,
                fraction.of_floor(screen.width),
                screen.height,
            )
        })
        .collect()
}

fn widths(screen: Rect, wide_threshold: u32) -> Vec<(Fraction, Fraction)> {
    let mut widths = vec![
        (Fraction::HALF, Fraction::HALF),
        (Fraction::THIRD, Fraction::TWO_THIRDS),
    ];
    if screen.width > wide_threshold {
        widths.push((Fraction::QUARTER, Fraction::THREE_QUARTERS));
    }
    widths
}

pub fn top_frame(screen: Rect) -> Rect {
    Rect::new(
        screen.x,
        screen.y,
        screen.width,
        Fraction::HALF.of_ceil(screen.height),
    )
}

pub fn bottom_frame(screen: Rect) -> Rect {
    Rect::new(
        screen.x,
        screen.y.saturating_add_unsigned(Fraction::HALF.of_floor(screen.height)),
        screen.width,
        Fraction::HALF.of_ceil(screen.height),
    )
}

/// A frame sized and offset by fractions of the screen.
pub fn grid_frame(
    screen: Rect,
    width: Fraction,
    height: Fraction,
    x: Fraction,
    y: Fraction,
) -> Rect {
    Rect::new(
        screen.x.saturating_add_unsigned(x.of_floor(screen.width)),
        screen.y.saturating_add_unsigned(y.of_floor(screen.height)),
        width.of_floor(screen.width),
        height.of_floor(screen.height),
    )
}

/// Quarter, then sixth, of the screen in the given corner.
pub fn corner_frames(screen: Rect, corner: Corner) -> Vec<Rect> {
    use Fraction as F;

    let (half_x, third_x, y) = match corner {
        Corner::TopLeft => (F::ZERO, F::ZERO, F::ZERO),
        Corner::TopRight => (F::HALF, F::TWO_THIRDS, F::ZERO),
        Corner::BottomLeft => (F::ZERO, F::ZERO, F::HALF),
        Corner::BottomRight => (F::HALF, F::TWO_THIRDS, F::HALF),
    };
    vec![
        grid_frame(screen, F::HALF, F::HALF, half_x, y),
        grid_frame(screen, F::THIRD, F::HALF, third_x, y),
    ]
}

/// First of `candidates` that one of `partners` occupies exactly.
pub fn find_partner(candidates: &[Rect], partners: &[Rect]) -> Option<Rect> {
    candidates
        .iter()
        .find(|frame| partners.contains(frame))
        .copied()
}

/// The space left of a window sitting on the right of the screen.
pub fn complement_left(screen: Rect, partner: Rect) -> Rect {
    Rect::new(
        screen.x,
        partner.y,
        screen.width.saturating_sub(partner.width),
        partner.height,
    )
}

/// The space right of a window sitting on the left of the screen.
pub fn complement_right(screen: Rect, partner: Rect) -> Rect {
    Rect::new(
        screen.x.saturating_add_unsigned(partner.width),
        partner.y,
        screen.width.saturating_sub(partner.width),
        partner.height,
    )
}

/// Candidates for a directional placement, in the order they are tried.
///
/// `recent` holds the frames of the most recently focused windows. For left
/// and right, a recent window already filling one side puts the exact
/// remainder of the screen first.
pub fn direction_frames(
    screen: Rect,
    direction: Direction,
    recent: &[Rect],
    wide_threshold: u32,
) -> Vec<Rect> {
    match direction {
        Direction::Left => {
            let mut frames = left_frames(screen, wide_threshold);
            let partner = find_partner(&right_frames(screen, wide_threshold), recent);
            if let Some(partner) = partner {
                tracing::debug!("Completing left of {}", partner);
                frames.insert(0, complement_left(screen, partner));
            }
            frames
        }
        Direction::Right => {
            let mut frames = right_frames(screen, wide_threshold);
            let partner = find_partner(&left_frames(screen, wide_threshold), recent);
            if let Some(partner) = partner {
                tracing::debug!("Completing right of {}", partner);
                frames.insert(0, complement_right(screen, partner));
            }
            frames
        }
        Direction::Up => vec![top_frame(screen), bottom_frame(screen)],
        Direction::Down => vec![bottom_frame(screen), top_frame(screen)],
    }
}
