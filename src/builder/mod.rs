mod qr;

pub use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use tracing::debug;

use crate::common::{
    bitstream::BitStream,
    codec::{
        make_segments, pad_remaining_capacity, push_segment, push_terminator, total_bits, Segment,
    },
    ec::add_ecc_and_interleave,
    error::{Invariant, QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    min_version: Version,
    max_version: Version,
    ec_level: ECLevel,
    boost_ecl: bool,
    mask: Option<MaskPattern>,
    eci: Option<u32>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            min_version: Version::MIN,
            max_version: Version::MAX,
            ec_level: ECLevel::L,
            boost_ecl: true,
            mask: None,
            eci: None,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.min_version = version;
        self.max_version = version;
        self
    }

    /// Smallest version in `min..=max` that fits the data wins.
    pub fn version_range(&mut self, min: Version, max: Version) -> &mut Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.min_version = Version::MIN;
        self.max_version = Version::MAX;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Raise the ec level while the chosen version still has room for the data.
    pub fn boost_ecl(&mut self, boost_ecl: bool) -> &mut Self {
        self.boost_ecl = boost_ecl;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    /// Prefix the data with an ECI designator, e.g. 26 for UTF-8.
    pub fn eci(&mut self, designator: u32) -> &mut Self {
        self.eci = Some(designator);
        self
    }

    pub fn unset_eci(&mut self) -> &mut Self {
        self.eci = None;
        self
    }

    pub fn metadata(&self) -> String {
        let mask = match self.mask {
            Some(m) => (*m).to_string(),
            None => "Auto".to_string(),
        };
        format!(
            "{{ Version: {}..={}, Ec level: {:?}, Boost: {}, Mask: {} }}",
            *self.min_version, *self.max_version, self.ec_level, self.boost_ecl, mask
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        let mut segs = Vec::with_capacity(2);
        if let Some(designator) = self.eci {
            segs.push(Segment::eci(designator)?);
        }
        match std::str::from_utf8(self.data) {
            Ok(text) => segs.extend(make_segments(text)?),
            Err(_) => segs.push(Segment::bytes(self.data)?),
        }

        encode_segments(
            &segs,
            self.ec_level,
            self.min_version,
            self.max_version,
            self.mask,
            self.boost_ecl,
        )
    }
}

// Encode pipeline
//------------------------------------------------------------------------------

/// Encodes the segments into the smallest version in `min..=max` that fits them.
///
/// With `boost_ecl`, the ec level is raised as far as that version allows. With no
/// `mask`, every pattern is tried and the one with the lowest penalty is kept.
pub fn encode_segments(
    segs: &[Segment],
    ecl: ECLevel,
    min: Version,
    max: Version,
    mask: Option<MaskPattern>,
    boost_ecl: bool,
) -> QRResult<QR> {
    if min > max {
        return Err(QRError::InvalidVersionRange { min: *min, max: *max });
    }

    let (ver, used_bits) = find_min_version(segs, ecl, min, max)?;
    debug!(version = *ver, bits = used_bits, "Version chosen");

    let ecl = if boost_ecl { boost_ec_level(ver, ecl, used_bits) } else { ecl };
    debug!(ecl = ?ecl, "Ec level fixed");

    let data = build_bit_stream(segs, ver, ecl)?;
    let codewords = add_ecc_and_interleave(data.data(), ver, ecl)?;
    debug!(codewords = codewords.len(), "Codewords assembled");

    let mut qr = QR::new(ver, ecl);
    qr.draw_all_function_patterns();
    qr.draw_encoding_region(&codewords)?;

    let mask = match mask {
        Some(m) => {
            qr.apply_mask(m)?;
            m
        }
        None => apply_best_mask(&mut qr)?,
    };
    debug!(version = *ver, ecl = ?ecl, mask = *mask, "QR generated");

    Ok(qr)
}

fn find_min_version(
    segs: &[Segment],
    ecl: ECLevel,
    min: Version,
    max: Version,
) -> QRResult<(Version, usize)> {
    for ver in Version::all().filter(|v| (min..=max).contains(v)) {
        let capacity = ver.data_bit_capacity(ecl);
        if let Some(used) = total_bits(segs, ver) {
            if used <= capacity {
                return Ok((ver, used));
            }
        }
    }
    Err(QRError::DataTooLong)
}

// Steps up one level at a time and stops at the first that doesn't fit
fn boost_ec_level(ver: Version, ecl: ECLevel, used_bits: usize) -> ECLevel {
    let mut ecl = ecl;
    while let Some(next) = ecl.next() {
        if used_bits > ver.data_bit_capacity(next) {
            break;
        }
        ecl = next;
    }
    ecl
}

fn build_bit_stream(segs: &[Segment], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let bit_capacity = ver.data_bit_capacity(ecl);
    let mut bs = BitStream::with_capacity(bit_capacity);
    for seg in segs {
        push_segment(seg, ver, &mut bs)?;
    }
    push_terminator(&mut bs, bit_capacity)?;
    pad_remaining_capacity(&mut bs, bit_capacity)?;

    if bs.len() != bit_capacity {
        return Err(Invariant::BitCountMismatch { expected: bit_capacity, actual: bs.len() }.into());
    }
    Ok(bs)
}
