//! Conversion between host and wire byte order.
//!
//! The wire is always little-endian. [`EndianSwap::normalize`] is an identity
//! on little-endian targets and a byte reversal on big-endian ones, so the same
//! call converts host to wire on write and wire to host on read.

/// Numeric values that can be brought to the little-endian wire order.
///
/// Floats are swapped through their raw bit pattern, never their numeric value.
///
/// # Examples
///
/// ```
/// use vc_serial::endian::EndianSwap;
///
/// let wire = 0x0102_0304_u32.normalize().to_ne_bytes();
/// assert_eq!(wire, [0x04, 0x03, 0x02, 0x01]);
///
/// let back = u32::from_ne_bytes(wire).normalize();
/// assert_eq!(back, 0x0102_0304);
/// ```
pub trait EndianSwap: Copy {
    /// Converts between host order and wire order.
    fn normalize(self) -> Self;
}

macro_rules! impl_endian_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EndianSwap for $ty {
                #[inline(always)]
                fn normalize(self) -> Self {
                    <$ty>::to_le(self)
                }
            }
        )*
    };
}

impl_endian_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl EndianSwap for f32 {
    #[inline(always)]
    fn normalize(self) -> Self {
        f32::from_bits(self.to_bits().normalize())
    }
}

impl EndianSwap for f64 {
    #[inline(always)]
    fn normalize(self) -> Self {
        f64::from_bits(self.to_bits().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::EndianSwap;

    #[test]
    fn wire_is_little_endian() {
        assert_eq!(0x1234_u16.normalize().to_ne_bytes(), [0x34, 0x12]);
        assert_eq!((-2_i64).normalize().to_ne_bytes(), (-2_i64).to_le_bytes());
        assert_eq!(1.5_f64.normalize().to_ne_bytes(), 1.5_f64.to_le_bytes());
        assert_eq!(0xAB_u8.normalize(), 0xAB);
    }

    #[test]
    fn involution() {
        let value = 0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF_u128;
        assert_eq!(value.normalize().normalize(), value);

        let float = -0.0_f32;
        assert_eq!(float.normalize().normalize().to_bits(), float.to_bits());
    }
}
