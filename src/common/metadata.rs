use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{Invariant, QRError, QRResult};
use super::mask::MaskPattern;

// Metadata
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
            *self.version, self.ec_level, *self.mask
        )
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Number of modules available for data and ecc once every function pattern is
    /// drawn, remainder bits included.
    pub const fn raw_data_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            res -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub const fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub const fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[ecl as usize][self.0]
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        BLOCK_COUNT[ecl as usize][self.0]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let tier = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        mode.char_cnt_bits()[tier]
    }

    /// Centre coordinates of the alignment patterns, shared by both axes.
    pub fn alignment_positions(self) -> Vec<usize> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }
        let align_cnt = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + align_cnt * 2 + 1) / (2 * align_cnt - 2) * 2 };
        let last = v * 4 + 10;
        let mut res = vec![6];
        res.extend((0..align_cnt - 1).rev().map(|i| last - i * step));
        res
    }

    /// 18 bit version info: 6 bit version followed by its 12 bit BCH remainder.
    pub fn info(self) -> QRResult<u32> {
        debug_assert!(self.0 >= 7, "Version info only exists from version 7: {}", self.0);
        Ok(bch_encode(self.0 as u32, VERSION_INFO_GENERATOR, 12, VERSION_INFO_BIT_LEN)?)
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// 2 bit value carried in the format info: L→1, M→0, Q→3, H→2.
    pub const fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }

    pub const fn next(self) -> Option<ECLevel> {
        match self {
            Self::L => Some(Self::M),
            Self::M => Some(Self::Q),
            Self::Q => Some(Self::H),
            Self::H => None,
        }
    }
}

/// 15 bit format info for the ec level and mask, BCH protected then xored with
/// the format mask.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> QRResult<u32> {
    let data = ecl.format_bits() << 3 | *mask as u32;
    let info = bch_encode(data, FORMAT_INFO_GENERATOR, 10, FORMAT_INFO_BIT_LEN)?;
    Ok(info ^ FORMAT_MASK)
}

// Appends the remainder of data * x^ec_len divided by the generator.
fn bch_encode(data: u32, generator: u32, ec_len: usize, bit_len: usize) -> Result<u32, Invariant> {
    let mut rem = data;
    for _ in 0..ec_len {
        rem = (rem << 1) ^ ((rem >> (ec_len - 1)) * generator);
    }
    let res = data << ec_len | rem;
    if res >> bit_len != 0 {
        return Err(Invariant::BchOverflow { value: res, bits: bit_len });
    }
    Ok(res)
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl From<bool> for Color {
    fn from(value: bool) -> Self {
        if value {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static FORMAT_INFO_GENERATOR: u32 = 0x537;

pub static FORMAT_MASK: u32 = 0x5412;

pub static VERSION_INFO_BIT_LEN: usize = 18;

pub static VERSION_INFO_GENERATOR: u32 = 0x1F25;

// Format info bits, most significant first. The dark module at (-8, 8) is drawn
// separately.
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

// Version info bits, most significant first.
pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

// Error correction codewords per block, indexed [ec level][version]. Index 0 unused.
static ECC_PER_BLOCK: [[usize; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

// Error correction blocks, indexed [ec level][version]. Index 0 unused.
static BLOCK_COUNT: [[usize; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
