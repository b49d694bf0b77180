use std::ops::Deref;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const COUNT: u8 = 8;

    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= Self::COUNT {
            return Err(QRError::InvalidMaskingPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..Self::COUNT).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Functions take x as column and y as row
mod mask_functions {
    pub fn checkerboard(x: i32, y: i32) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: i32, y: i32) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: i32, _: i32) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i32, y: i32) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i32, y: i32) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: i32, y: i32) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: i32, y: i32) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: i32, y: i32) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            _ => mask_functions::meadow,
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Tries every pattern on a copy of the unmasked symbol and keeps the one with the
/// lowest penalty. Ties go to the lowest pattern index.
pub fn apply_best_mask(qr: &mut QR) -> QRResult<MaskPattern> {
    let score = |m: MaskPattern| -> QRResult<(u32, MaskPattern)> {
        let mut candidate = qr.clone();
        candidate.apply_mask(m)?;
        let pen = compute_total_penalty(&candidate);
        trace!(mask = *m, penalty = pen, "Mask candidate scored");
        Ok((pen, m))
    };

    #[cfg(feature = "parallel")]
    let scores = MaskPattern::all()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(score)
        .collect::<QRResult<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let scores = MaskPattern::all().map(score).collect::<QRResult<Vec<_>>>()?;

    let (pen, best_mask) = select_best(scores);
    debug!(mask = *best_mask, penalty = pen, "Best mask chosen");
    qr.apply_mask(best_mask)?;
    Ok(best_mask)
}

// Keyed on the pattern too so ties go to the lowest index in any evaluation order
fn select_best(scores: Vec<(u32, MaskPattern)>) -> (u32, MaskPattern) {
    scores.into_iter().min().unwrap_or_default()
}

// Penalty rules
//------------------------------------------------------------------------------

pub static PENALTY_N1: u32 = 3;
pub static PENALTY_N2: u32 = 3;
pub static PENALTY_N3: u32 = 40;
pub static PENALTY_N4: u32 = 10;

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr, true) + compute_adjacent_penalty(qr, false);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen =
        compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Reads the module at position j of line i, along a row if horizontal
fn line_color(qr: &QR, i: i16, j: i16, is_hor: bool) -> Color {
    if is_hor {
        *qr.get(i, j)
    } else {
        *qr.get(j, i)
    }
}

// N1: runs of 5 or more same colored modules in a line
fn compute_adjacent_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut last = line_color(qr, i, 0, is_hor);
        let mut run = 1;
        for j in 1..w {
            let clr = line_color(qr, i, j, is_hor);
            if clr != last {
                last = clr;
                run = 1;
                continue;
            }
            run += 1;
            if run == 5 {
                pen += PENALTY_N1;
            } else if run > 5 {
                pen += 1;
            }
        }
    }
    pen
}

// N2: 2x2 blocks of the same color, overlaps included
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += PENALTY_N2;
            }
        }
    }
    pen
}

// N3: 1:1:3:1:1 finder-like pattern with 4 light modules on one side, read
// through an 11 module window
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    const PATTERN: u16 = 0b000_0101_1101;
    const PATTERN_REV: u16 = 0b101_1101_0000;

    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut window = 0u16;
        for j in 0..w {
            let bit = line_color(qr, i, j, is_hor) == Color::Dark;
            window = ((window << 1) & 0x7FF) | bit as u16;
            if j >= 10 && (window == PATTERN || window == PATTERN_REV) {
                pen += PENALTY_N3;
            }
        }
    }
    pen
}

// N4: 10 points for every 5% step the dark ratio strays beyond 45%..55%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules();
    let w = qr.width();
    let total = w * w;
    let mut pen = 0;
    let mut k = 0;
    while dark * 20 < (9usize.saturating_sub(k)) * total || dark * 20 > (11 + k) * total {
        pen += PENALTY_N4;
        k += 1;
    }
    pen
}
