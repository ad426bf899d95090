//! Cartesian/polar helpers shared by the LCh-style spaces.

/// Chroma and hue (degrees, 0.0..360.0) of an `(a, b)` pair.
#[inline]
pub(crate) fn to_polar(a: f64, b: f64) -> (f64, f64) {
    let c = (a * a + b * b).sqrt();
    // atan2(0, 0) is 0.0, which is harmless for zero chroma
    (c, normalize_hue(b.atan2(a).to_degrees()))
}

/// `(a, b)` pair of a chroma and hue in degrees.
#[inline]
pub(crate) fn from_polar(c: f64, h: f64) -> (f64, f64) {
    let h = h.to_radians();
    (c * h.cos(), c * h.sin())
}

/// Wrap a hue in degrees into 0.0..360.0.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hue() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert!(normalize_hue(-1e-20) < 360.0);
    }

    #[test]
    fn test_polar_round_trip() {
        let (c, h) = to_polar(0.0, 2.0);
        assert!((c - 2.0).abs() < 1e-12);
        assert!((h - 90.0).abs() < 1e-12);
        let (a, b) = from_polar(c, h);
        assert!(a.abs() < 1e-12);
        assert!((b - 2.0).abs() < 1e-12);
    }
}
