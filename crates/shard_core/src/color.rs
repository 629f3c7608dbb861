//! Pulse colors

use std::fmt;

/// Hue, saturation and brightness as written into a pulse trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

impl Hsb {
    pub const fn new(h: f64, s: f64, b: f64) -> Self {
        Self { h, s, b }
    }
}

/// Convert an 8-bit RGB color: hue in degrees, saturation and brightness in `0..=1`.
pub fn rgb(r: u8, g: u8, b: u8) -> Hsb {
    let (r, g, b) = (f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    Hsb::new(hue.round(), round2(saturation), round2(max))
}

/// Pulse wire format: `HaSaBa0a0`.
impl fmt::Display for Hsb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}a{}a{}a0a0", self.h, self.s, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        assert_eq!(Hsb::new(54.0, 124.0, 156.0).to_string(), "54a124a156a0a0");
    }

    #[test]
    fn rgb_conversion() {
        assert_eq!(rgb(0, 0, 0), Hsb::new(0.0, 0.0, 0.0));
        assert_eq!(rgb(255, 0, 0), Hsb::new(0.0, 1.0, 1.0));
        assert_eq!(rgb(0, 255, 0), Hsb::new(120.0, 1.0, 1.0));
        assert_eq!(rgb(0, 0, 255), Hsb::new(240.0, 1.0, 1.0));
    }
}
