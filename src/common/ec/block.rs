use std::ops::Deref;

use super::ReedSolomonGenerator;
use crate::common::error::{Invariant, QRResult};
use crate::metadata::{ECLevel, Version};

pub static MAX_BLOCK_SIZE: usize = 256;

// Block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Block {
    pub data: [u8; MAX_BLOCK_SIZE],
    // Block length
    pub len: usize,
    // Data length
    pub dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], rs: &ReedSolomonGenerator) -> Self {
        let dlen = raw.len();
        let len = dlen + rs.degree();
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block too long: {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        data[dlen..len].copy_from_slice(&rs.remainder(raw));
        Self { data, len, dlen }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    #[cfg(test)]
    pub fn data_len(&self) -> usize {
        self.dlen
    }

    #[cfg(test)]
    pub fn full(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}

// Splitting, error correction and interleaving
//------------------------------------------------------------------------------

/// Splits the data codewords into blocks. The first blocks are one codeword
/// shorter than the rest whenever the total doesn't divide evenly.
pub(crate) fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Result<Vec<&[u8]>, Invariant> {
    let num_blocks = ver.block_count(ecl);
    let ecc_len = ver.ecc_per_block(ecl);
    let raw = ver.total_codewords();
    let num_short = num_blocks - raw % num_blocks;
    let short_dlen = raw / num_blocks - ecc_len;

    let expected = raw - num_blocks * ecc_len;
    if data.len() != expected {
        return Err(Invariant::CodewordCountMismatch { expected, actual: data.len() });
    }

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut rest = data;
    for i in 0..num_blocks {
        let dlen = short_dlen + usize::from(i >= num_short);
        let (head, tail) = rest.split_at(dlen);
        blocks.push(head);
        rest = tail;
    }
    Ok(blocks)
}

/// Column-wise merge: the i-th element of every block, then the (i+1)-th, skipping
/// blocks that have run out.
pub(crate) fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Appends error correction to each block and interleaves the result into the
/// final codeword sequence: all data columns first, then all ecc columns.
pub(crate) fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<u8>> {
    let rs = ReedSolomonGenerator::new(ver.ecc_per_block(ecl))?;
    let blocks =
        blockify(data, ver, ecl)?.into_iter().map(|b| Block::new(b, &rs)).collect::<Vec<_>>();

    let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();
    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));

    let expected = ver.total_codewords();
    if res.len() != expected {
        return Err(Invariant::CodewordCountMismatch { expected, actual: res.len() }.into());
    }
    Ok(res)
}
