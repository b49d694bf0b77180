use num_traits::PrimInt;

use super::error::{QRError, QRResult};

// Bit stream
//------------------------------------------------------------------------------

/// Append-only sequence of bits, packed MSB-first into bytes as it grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity(bit_capacity.div_ceil(8)), len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed bytes, the final partial byte padded with zero bits.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn get(&self, i: usize) -> Option<bool> {
        if i >= self.len {
            return None;
        }
        Some(self.data[i >> 3] & (0b10000000 >> (i & 7)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.data[i >> 3] & (0b10000000 >> (i & 7)) != 0)
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub const MAX_PUSH_BITS: usize = 30;

    /// Appends the low `size` bits of `bits`, most significant first. Requires
    /// `size <= 30` and `bits < 2^size`.
    pub fn push_bits<T: PrimInt>(&mut self, bits: T, size: usize) -> QRResult<()> {
        let value = bits.to_u32().filter(|v| size <= Self::MAX_PUSH_BITS && v >> size == 0);
        let Some(value) = value else {
            let value = bits.to_u32().unwrap_or(u32::MAX);
            return Err(QRError::BitsOutOfRange { value, len: size });
        };

        for i in (0..size).rev() {
            self.push((value >> i) & 1 != 0);
        }
        Ok(())
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    pub fn append(&mut self, other: &BitStream) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(&other.data);
            self.len += other.len;
        } else {
            other.iter().for_each(|b| self.push(b));
        }
    }

    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        self.data.extend_from_slice(arr);
        self.len += arr.len() << 3;
    }
}
