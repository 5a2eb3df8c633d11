use hikido_ipc::Rect;

/// Exact rational fraction of a screen dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    num: u32,
    den: u32,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction::new(0, 1);
    pub const HALF: Fraction = Fraction::new(1, 2);
    pub const THIRD: Fraction = Fraction::new(1, 3);
    pub const TWO_THIRDS: Fraction = Fraction::new(2, 3);
    pub const QUARTER: Fraction = Fraction::new(1, 4);
    pub const THREE_QUARTERS: Fraction = Fraction::new(3, 4);

    pub const fn new(num: u32, den: u32) -> Self {
        assert!(den > 0);
        Self { num, den }
    }

    pub fn of_floor(self, value: u32) -> u32 {
        (value as u64 * self.num as u64 / self.den as u64) as u32
    }

    pub fn of_ceil(self, value: u32) -> u32 {
        (value as u64 * self.num as u64).div_ceil(self.den as u64) as u32
    }
}

/// Maps frames from one screen rectangle onto another, scaling position and size
/// proportionally. Used when a window changes screens or a cached frame was
/// captured on a different screen.
pub fn frame_ratio(from: Rect, to: Rect) -> impl Fn(Rect) -> Rect {
    let sx = ratio(from.width, to.width);
    let sy = ratio(from.height, to.height);

    move |frame: Rect| Rect {
        x: to.x.saturating_add(((frame.x as f64 - from.x as f64) * sx).round() as i32),
        y: to.y.saturating_add(((frame.y as f64 - from.y as f64) * sy).round() as i32),
        width: (frame.width as f64 * sx).round() as u32,
        height: (frame.height as f64 * sy).round() as u32,
    }
}

fn ratio(from: u32, to: u32) -> f64 {
    if from == 0 {
        return 1.0;
    }
    to as f64 / from as f64
}
