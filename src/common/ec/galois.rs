// Arithmetic over GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Carry-less product of `x` and `y`, reduced modulo the field polynomial.
pub fn multiply(x: u8, y: u8) -> u8 {
    let mut z = 0u16;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * PRIMITIVE_POLY);
        z ^= ((y as u16 >> i) & 1) * x as u16;
    }
    debug_assert!(z >> 8 == 0, "Product not reduced: {z:#x}");
    z as u8
}
