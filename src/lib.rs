//! # qrgen
//!
//! A Rust library for generating QR Code Model 2 symbols with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Mode Selection**: Text is packed in numeric, alphanumeric or byte mode, whichever is densest
//! - **Version Selection**: Finds the smallest version (1-40) that fits the data, within optional bounds
//! - **Error Correction**: Reed-Solomon error correction with configurable levels (L, M, Q, H), optionally
//!   boosted when the chosen version has room to spare
//! - **Masking**: Picks the mask pattern with the lowest penalty score, or uses the one you pin
//! - **ECI**: Optional Extended Channel Interpretation header segment
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - all settings are automatically chosen
//! let qr = qrgen::encode_text("Hello, World!")?;
//!
//! // Render as text, 4 module quiet zone included
//! let size = qr.size() as i32;
//! for y in -4..size + 4 {
//!     let line = (-4..size + 4).map(|x| if qr.module(x, y) { '█' } else { ' ' });
//!     println!("{}", line.collect::<String>());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrgen::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version_range(Version::new(2)?, Version::new(10)?) // if not provided, searches 1..=40
//!     .ec_level(ECLevel::M)                               // if not provided, defaults to ECLevel::L
//!     .boost_ecl(false)                                   // if not provided, ec level is boosted
//!     .mask(MaskPattern::new(3)?)                         // if not provided, finds best mask
//!     .build()?;
//!
//! assert_eq!(*qr.version(), 2);
//! assert_eq!(qr.ec_level(), ECLevel::M);
//! # Ok(())
//! # }
//! ```
//!
//! ### Low Level Segments
//!
//! ```rust
//! use qrgen::{encode_segments, ECLevel, Segment, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let segs = [Segment::alphanumeric("PRODUCT-")?, Segment::numeric("31415926")?];
//! let qr = encode_segments(&segs, ECLevel::Q, Version::MIN, Version::MAX, None, true)?;
//! assert_eq!(qr.size(), 21);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages are reported through `tracing` events at debug level, and each
//! candidate mask at trace level. Install any subscriber to see them.

pub mod builder;
pub(crate) mod common;

pub use builder::{encode_segments, QRBuilder, QR};
pub use common::codec::{make_segments, Mode, Segment};
pub use common::ec::ReedSolomonGenerator;
pub use common::error::{Invariant, QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
pub use common::bitstream::BitStream;
pub(crate) use common::*;

/// Encodes UTF-8 text at level L or better, in the smallest version that fits,
/// with the best mask.
pub fn encode_text(text: &str) -> QRResult<QR> {
    let segs = make_segments(text)?;
    encode_segments(&segs, ECLevel::L, Version::MIN, Version::MAX, None, true)
}

/// Encodes arbitrary bytes as a single byte mode segment, otherwise like [`encode_text`].
pub fn encode_binary(data: &[u8]) -> QRResult<QR> {
    let segs = [Segment::bytes(data)?];
    encode_segments(&segs, ECLevel::L, Version::MIN, Version::MAX, None, true)
}
