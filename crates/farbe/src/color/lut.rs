//! Gamma conversion
//!
//! Decoding an 8-bit channel goes through a table generated at compile
//! time by build.rs. Every other conversion uses the IEC 61966-2-1
//! formula directly, since interpolated values are arbitrary floats.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a gamma-encoded sRGB value to linear light.
///
/// Values outside 0.0..=1.0 are not clamped.
#[inline]
pub fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear-light value to gamma-encoded sRGB.
///
/// Values outside 0.0..=1.0 are not clamped.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_formula() {
        for i in 0..=255u8 {
            let expected = srgb_to_linear(i as f64 / 255.0);
            assert!(
                (srgb8_to_linear(i) - expected).abs() < 1e-15,
                "table entry {i} differs from formula"
            );
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(srgb8_to_linear(0), 0.0);
        assert!((srgb8_to_linear(255) - 1.0).abs() < 1e-12);
        assert!((linear_to_srgb(0.0)).abs() < 1e-12);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = srgb8_to_linear(0);
        for i in 1..=255u8 {
            let curr = srgb8_to_linear(i);
            assert!(curr > prev, "srgb8_to_linear not monotonic at {i}");
            prev = curr;
        }

        let mut prev = linear_to_srgb(0.0);
        for i in 1..=1000 {
            let curr = linear_to_srgb(i as f64 / 1000.0);
            assert!(curr >= prev, "linear_to_srgb not monotonic at {i}");
            prev = curr;
        }
    }

    #[test]
    fn test_round_trip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            assert!((linear_to_srgb(srgb_to_linear(v)) - v).abs() < 1e-12);
        }
    }
}
