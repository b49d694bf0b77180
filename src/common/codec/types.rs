// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
    Eci = 0b0111,
}

impl Mode {
    pub const INDICATOR_BITS: usize = 4;

    pub const fn indicator(self) -> u8 {
        self as u8
    }

    /// Character count widths for versions 1-9, 10-26 and 27-40.
    pub const fn char_cnt_bits(self) -> [usize; 3] {
        match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
            Self::Kanji => [8, 10, 12],
            Self::Eci => [0, 0, 0],
        }
    }

    #[inline]
    pub(crate) fn numeric_digit(char: char) -> Option<u16> {
        char.to_digit(10).map(|d| d as u16)
    }

    #[inline]
    pub(crate) fn alphanumeric_digit(char: char) -> Option<u16> {
        let digit = match char {
            '0'..='9' => char as u16 - '0' as u16,
            'A'..='Z' => char as u16 - 'A' as u16 + 10,
            ' ' => 36,
            '$' => 37,
            '%' => 38,
            '*' => 39,
            '+' => 40,
            '-' => 41,
            '.' => 42,
            '/' => 43,
            ':' => 44,
            _ => return None,
        };
        Some(digit)
    }

    pub fn contains(&self, char: char) -> bool {
        match self {
            Self::Numeric => char.is_ascii_digit(),
            Self::Alphanumeric => Self::alphanumeric_digit(char).is_some(),
            Self::Byte => true,
            Self::Kanji | Self::Eci => false,
        }
    }

    /// Bits needed to encode `len` characters in this mode, header excluded.
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
            Self::Eci => len,
        }
    }
}

/// Whether every character of `text` is a decimal digit.
pub fn is_numeric(text: &str) -> bool {
    text.chars().all(|c| Mode::Numeric.contains(c))
}

/// Whether every character of `text` is in the 45 character alphanumeric set.
pub fn is_alphanumeric(text: &str) -> bool {
    text.chars().all(|c| Mode::Alphanumeric.contains(c))
}

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
