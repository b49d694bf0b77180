use std::ops::Deref;

use crate::common::error::{Invariant, QRResult};
use crate::common::iter::EncRegionIter;
use crate::common::mask::{compute_total_penalty, MaskPattern};
use crate::common::metadata::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// A finished QR code symbol: a square grid of dark and light modules.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        let grid = vec![Module::Empty; w * w].into_boxed_slice();
        Self { grid, w, ver, ecl, mask: MaskPattern::default() }
    }

    #[cfg(test)]
    pub(crate) fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Side length in modules, `version * 4 + 17`.
    pub fn size(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata { version: self.ver, ec_level: self.ecl, mask: self.mask }
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// Penalty score of the symbol as it stands, lower is better.
    pub fn penalty(&self) -> u32 {
        compute_total_penalty(self)
    }

    /// Whether the module at column `x` and row `y` is dark. Anything outside the
    /// symbol is light, so renderers can read the quiet zone through this too.
    pub fn module(&self, x: i32, y: i32) -> bool {
        let w = self.w as i32;
        if !(0..w).contains(&x) || !(0..w).contains(&y) {
            return false;
        }
        matches!(*self.get(y as i16, x as i16), Color::Dark)
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub(crate) fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // 7x7 finder with its light separator, clipped at the symbol edge
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let dist = std::cmp::max(i16::abs(i), i16::abs(j));
                let clr = if dist == 2 || dist == 4 { Color::Light } else { Color::Dark };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        self.draw_line(6, 8, 6, w - 9);
        self.draw_line(8, 6, w - 9, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from(i & 1 == 0)));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_positions();
        let (Some(&first), Some(&last)) = (poses.first(), poses.last()) else {
            return;
        };
        for &r in &poses {
            for &c in &poses {
                // Corners taken by finder patterns
                if (r == first && (c == first || c == last)) || (r == last && c == first) {
                    continue;
                }
                self.draw_alignment_pattern_at(r as i16, c as i16)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                let dist = std::cmp::max(i16::abs(i), i16::abs(j));
                self.set(r + i, c + j, Module::Func(Color::from(dist != 1)));
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn draw_format_info(&mut self, format_info: u32) {
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_SIDE);
        // Dark module
        self.set(-8, 8, on);
    }

    fn draw_version_info(&mut self) -> QRResult<()> {
        if *self.ver < 7 {
            return Ok(());
        }
        let ver_info = self.ver.info()?;
        let (off, on) = (Module::Version(Color::Light), Module::Version(Color::Dark));
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_BL);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_TR);
        Ok(())
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}

#[cfg(test)]
mod qr_information_tests {
    use crate::builder::QR;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{format_info, ECLevel, Version};

    #[test]
    fn test_version_info_1() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_version_info().unwrap();
        assert!(qr.grid().iter().all(|m| *m == crate::builder::Module::Empty));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_version_info().unwrap();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ..................................VVv........\n\
             ..................................VvV........\n\
             ..................................VvV........\n\
             ..................................Vvv........\n\
             ..................................vvv........\n\
             ..................................VVV........\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             VVVVvV.......................................\n\
             VvvvvV.......................................\n\
             vVVvvV.......................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n"
        );
    }

    #[test]
    fn test_format_info_qr() {
        let mut qr = QR::new(Version::MIN, ECLevel::M);
        let info = format_info(ECLevel::M, MaskPattern::new(5).unwrap()).unwrap();
        qr.draw_format_info(info);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........M............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........M............\n\
             ........M............\n\
             .....................\n\
             ........m............\n\
             mMMMMM.Mm....mmMMmmmM\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........m............\n"
        );
    }

    #[test]
    fn test_all_function_patterns_and_qr_info() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_all_function_patterns();
        qr.draw_version_info().unwrap();
        qr.draw_format_info(format_info(ECLevel::L, MaskPattern::default()).unwrap());
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM.........................VVvFfffffff\n\
             fFFFFFfFM.........................VvVFfFFFFFf\n\
             fFfffFfFm.........................VvVFfFfffFf\n\
             fFfffFfFM.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mmmMmmfmm...........fffff............mmMMMmMM\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFm...........fffff...........fffff....\n\
             fFfffFfFM....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFm....................................\n\
             fffffffFm....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Reserves the info areas and fills the data area with the final codeword
    /// sequence. Leftover remainder cells stay light.
    pub(crate) fn draw_encoding_region(&mut self, codewords: &[u8]) -> QRResult<()> {
        self.draw_format_info(format_info(self.ecl, self.mask)?);
        self.draw_version_info()?;
        self.draw_codewords(codewords)?;

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in debug");
        Ok(())
    }

    fn draw_codewords(&mut self, codewords: &[u8]) -> QRResult<()> {
        let bit_len = codewords.len() << 3;
        let mut placed = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if !matches!(self.get(r, c), Module::Empty) {
                continue;
            }
            let clr = if placed < bit_len {
                let bit = codewords[placed >> 3] & (0b10000000 >> (placed & 7)) != 0;
                placed += 1;
                Color::from(bit)
            } else {
                Color::Light
            };
            self.set(r, c, Module::Data(clr));
        }

        if placed != bit_len {
            return Err(Invariant::BitCountMismatch { expected: bit_len, actual: placed }.into());
        }
        Ok(())
    }

    /// Flips every data module selected by the pattern. Applying the same pattern
    /// twice restores the grid.
    pub(crate) fn toggle_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if let Module::Data(clr) = self.get(r, c) {
                    if mask_fn(c as i32, r as i32) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }

    /// Redraws the format info for `pattern` and masks the unmasked data area.
    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) -> QRResult<()> {
        self.draw_format_info(format_info(self.ecl, pattern)?);
        self.toggle_mask(pattern);
        self.mask = pattern;
        Ok(())
    }
}
