//! Packed RGB helpers

/// Unpack 0xRRGGBB into opaque RGBA floats.
///
/// With `srgb_target` the channels are decoded to linear, since an sRGB
/// surface re-encodes on write.
pub fn unpack_rgb(packed: u32, srgb_target: bool) -> [f32; 4] {
    let channel = |shift: u32| {
        let c = ((packed >> shift) & 0xff) as f32 / 255.0;
        if srgb_target {
            srgb_to_linear(c)
        } else {
            c
        }
    };
    [channel(16), channel(8), channel(0), 1.0]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_primaries() {
        assert_eq!(unpack_rgb(0xff0000, false), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(unpack_rgb(0x00ff00, false), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(unpack_rgb(0x0000ff, true), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_high_bits_ignored() {
        assert_eq!(unpack_rgb(0xff_ffff00, false), unpack_rgb(0xffff00, false));
    }

    #[test]
    fn test_srgb_mid_gray_darkens() {
        let [r, g, b, a] = unpack_rgb(0x808080, true);
        assert!(r < 0.5 && (r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
    }
}
