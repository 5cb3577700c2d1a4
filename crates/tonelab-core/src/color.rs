//! RGB ↔ HSB (hue/saturation/brightness) conversion.
//!
//! The saturation stage works in HSB space. These conversions follow the
//! classic AWT formulation, including the `+0.5` rounding when mapping
//! components back to bytes, so saturation edits stay bit-stable across
//! repeated conversions.

/// Convert RGB bytes to HSB components, each in [0.0, 1.0].
///
/// A gray pixel (zero chroma) reports hue 0.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = cmax as f32 / 255.0;
    let saturation = if cmax != 0 {
        (cmax - cmin) as f32 / cmax as f32
    } else {
        0.0
    };

    if saturation == 0.0 {
        return (0.0, 0.0, brightness);
    }

    let chroma = (cmax - cmin) as f32;
    let redc = (cmax - r) as f32 / chroma;
    let greenc = (cmax - g) as f32 / chroma;
    let bluec = (cmax - b) as f32 / chroma;

    let mut hue = if r == cmax {
        bluec - greenc
    } else if g == cmax {
        2.0 + redc - bluec
    } else {
        4.0 + greenc - redc
    };
    hue /= 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    (hue, saturation, brightness)
}

/// Convert HSB components (each in [0.0, 1.0]) back to RGB bytes.
///
/// Hue wraps: values outside [0, 1) are reduced by their floor first.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let v = (brightness * 255.0 + 0.5) as u8;
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    (
        (r * 255.0 + 0.5) as u8,
        (g * 255.0 + 0.5) as u8,
        (b * 255.0 + 0.5) as u8,
    )
}
