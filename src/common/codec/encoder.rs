pub use segment::*;
pub use writer::{pad_remaining_capacity, push_segment, push_terminator};

// Segments
//------------------------------------------------------------------------------

pub mod segment {
    use tracing::trace;

    use crate::codec::{is_alphanumeric, is_numeric, Mode};
    use crate::common::error::{QRError, QRResult};
    use crate::metadata::Version;
    use crate::BitStream;

    /// A mode tagged run of input, already packed into its data bits.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Segment {
        mode: Mode,
        char_cnt: usize,
        data: BitStream,
    }

    impl Segment {
        pub fn new(mode: Mode, char_cnt: usize, data: BitStream) -> Self {
            Self { mode, char_cnt, data }
        }

        pub fn mode(&self) -> Mode {
            self.mode
        }

        pub fn char_cnt(&self) -> usize {
            self.char_cnt
        }

        pub fn data(&self) -> &BitStream {
            &self.data
        }

        /// Digits in groups of 3 to 10 bits, a trailing 1 or 2 digits to 4 or 7 bits.
        pub fn numeric(digits: &str) -> QRResult<Self> {
            let mut bs = BitStream::with_capacity(Mode::Numeric.encoded_len(digits.len()));
            let mut acc = 0u16;
            let mut acc_cnt = 0;
            let mut char_cnt = 0;
            for c in digits.chars() {
                let d = Mode::numeric_digit(c).ok_or(QRError::InvalidChar(c))?;
                acc = acc * 10 + d;
                acc_cnt += 1;
                if acc_cnt == 3 {
                    bs.push_bits(acc, 10)?;
                    acc = 0;
                    acc_cnt = 0;
                }
                char_cnt += 1;
            }
            if acc_cnt > 0 {
                bs.push_bits(acc, acc_cnt * 3 + 1)?;
            }
            Ok(Self::new(Mode::Numeric, char_cnt, bs))
        }

        /// Character pairs to `first * 45 + second` in 11 bits, a trailing character
        /// to its index in 6 bits.
        pub fn alphanumeric(text: &str) -> QRResult<Self> {
            let mut bs = BitStream::with_capacity(Mode::Alphanumeric.encoded_len(text.len()));
            let mut acc = 0u16;
            let mut acc_cnt = 0;
            let mut char_cnt = 0;
            for c in text.chars() {
                let d = Mode::alphanumeric_digit(c).ok_or(QRError::InvalidChar(c))?;
                acc = acc * 45 + d;
                acc_cnt += 1;
                if acc_cnt == 2 {
                    bs.push_bits(acc, 11)?;
                    acc = 0;
                    acc_cnt = 0;
                }
                char_cnt += 1;
            }
            if acc_cnt > 0 {
                bs.push_bits(acc, 6)?;
            }
            Ok(Self::new(Mode::Alphanumeric, char_cnt, bs))
        }

        pub fn bytes(data: &[u8]) -> QRResult<Self> {
            if data.len() > i32::MAX as usize {
                return Err(QRError::SegmentTooLong(data.len()));
            }
            let mut bs = BitStream::with_capacity(Mode::Byte.encoded_len(data.len()));
            bs.extend(data);
            Ok(Self::new(Mode::Byte, data.len(), bs))
        }

        /// Extended Channel Interpretation designator, 8, 16 or 24 bits long
        /// depending on its magnitude.
        pub fn eci(designator: u32) -> QRResult<Self> {
            let mut bs = BitStream::with_capacity(24);
            match designator {
                0..0x80 => bs.push_bits(designator, 8)?,
                0x80..0x4000 => {
                    bs.push_bits(0b10, 2)?;
                    bs.push_bits(designator, 14)?;
                }
                0x4000..1_000_000 => {
                    bs.push_bits(0b110, 3)?;
                    bs.push_bits(designator, 21)?;
                }
                _ => return Err(QRError::InvalidEciDesignator(designator)),
            }
            Ok(Self::new(Mode::Eci, 0, bs))
        }
    }

    /// Splits `text` into at most one segment, picking the densest mode among
    /// numeric, alphanumeric and byte that can hold every character.
    pub fn make_segments(text: &str) -> QRResult<Vec<Segment>> {
        let seg = if text.is_empty() {
            return Ok(Vec::new());
        } else if is_numeric(text) {
            Segment::numeric(text)?
        } else if is_alphanumeric(text) {
            Segment::alphanumeric(text)?
        } else {
            Segment::bytes(text.as_bytes())?
        };
        trace!(mode = ?seg.mode, char_cnt = seg.char_cnt, "Segment built");
        Ok(vec![seg])
    }

    /// Bits taken by the segments at `ver`, headers included. `None` if a character
    /// count overflows its field or the sum overflows.
    pub fn total_bits(segs: &[Segment], ver: Version) -> Option<usize> {
        segs.iter().try_fold(0usize, |acc, seg| {
            let len_bits = ver.char_cnt_bits(seg.mode);
            if (seg.char_cnt as u64) >> len_bits != 0 {
                return None;
            }
            acc.checked_add(Mode::INDICATOR_BITS + len_bits)?.checked_add(seg.data.len())
        })
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::codec::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::error::QRResult;
    use crate::metadata::Version;
    use crate::BitStream;

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) -> QRResult<()> {
        push_header(seg, ver, out)?;
        out.append(seg.data());
        Ok(())
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) -> QRResult<()> {
        out.push_bits(seg.mode().indicator(), Mode::INDICATOR_BITS)?;
        let len_bits = ver.char_cnt_bits(seg.mode());
        debug_assert!(
            (seg.char_cnt() as u64) >> len_bits == 0,
            "Char count exceeds bit length: Char count {}, Char count bits {len_bits}",
            seg.char_cnt()
        );
        out.push_bits(seg.char_cnt(), len_bits)
    }

    pub fn push_terminator(out: &mut BitStream, bit_capacity: usize) -> QRResult<()> {
        let bit_len = out.len();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len)?;
        }
        Ok(())
    }

    pub fn pad_remaining_capacity(out: &mut BitStream, bit_capacity: usize) -> QRResult<()> {
        push_padding_bits(out)?;
        push_padding_codewords(out, bit_capacity)
    }

    fn push_padding_bits(out: &mut BitStream) -> QRResult<()> {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0, 8 - offset)?;
        }
        Ok(())
    }

    fn push_padding_codewords(out: &mut BitStream, bit_capacity: usize) -> QRResult<()> {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = bit_capacity.saturating_sub(out.len()) >> 3;
        PADDING_CODEWORDS
            .iter()
            .copied()
            .cycle()
            .take(remain_byte_capacity)
            .try_for_each(|pc| out.push_bits(pc, 8))
    }

}
