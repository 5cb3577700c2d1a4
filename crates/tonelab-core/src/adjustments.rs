//! Color adjustment stages and the pipeline that runs them.
//!
//! Applies up to six per-pixel adjustments in a fixed order:
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Temperature
//! 5. Fade
//! 6. Vignette
//!
//! Each stage reads one value from the [`AdjustmentSet`] and is a strict
//! identity when that value is neutral: the stage is skipped outright rather
//! than re-running its math with a factor of 1, so chained neutral stages
//! can't drift pixel values through rounding.
//!
//! All stage math follows the same shape: compute a float per channel, clamp
//! to [0, 255], truncate toward zero. Alpha is never touched.

use crate::color::{hsb_to_rgb, rgb_to_hsb};
use crate::raster::RasterBuffer;
use crate::{Adjustment, AdjustmentSet};

/// Apply every non-neutral adjustment to `input`, in pipeline order.
///
/// Never mutates `input`; the result always has the same dimensions. Calling
/// twice with the same arguments produces bit-identical output. With an
/// all-neutral set the result is a plain copy of the input.
///
/// # Example
/// ```ignore
/// use tonelab_core::{apply_adjustments, Adjustment, AdjustmentSet, RasterBuffer};
///
/// let image = RasterBuffer::new(64, 64);
/// let mut settings = AdjustmentSet::new();
/// settings.set(Adjustment::Brightness, 20);
/// let edited = apply_adjustments(&image, &settings);
/// assert_eq!(edited.width(), image.width());
/// ```
pub fn apply_adjustments(input: &RasterBuffer, settings: &AdjustmentSet) -> RasterBuffer {
    let mut current: Option<RasterBuffer> = None;

    for stage in Adjustment::ORDER {
        let value = settings.get(stage);
        if stage.is_neutral(value) {
            continue;
        }
        let source = current.as_ref().unwrap_or(input);
        current = Some(run_stage(stage, source, value));
    }

    current.unwrap_or_else(|| input.clone())
}

fn run_stage(stage: Adjustment, input: &RasterBuffer, value: i32) -> RasterBuffer {
    match stage {
        Adjustment::Brightness => adjust_brightness(input, value),
        Adjustment::Contrast => adjust_contrast(input, value),
        Adjustment::Saturation => adjust_saturation(input, value),
        Adjustment::Temperature => adjust_temperature(input, value),
        Adjustment::Fade => apply_fade(input, value),
        Adjustment::Vignette => apply_vignette(input, value),
    }
}

/// Clamp a computed channel value to [0, 255].
#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Scale every channel by `1 + value/100`.
///
/// value = -100 produces black, value = 100 doubles each channel (clamped).
pub fn adjust_brightness(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Brightness.is_neutral(value) {
        return input.clone();
    }
    let scale = 1.0 + value as f32 / 100.0;

    let mut out = input.clone();
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        px[0] = clamp_channel((px[0] as f32 * scale) as i32);
        px[1] = clamp_channel((px[1] as f32 * scale) as i32);
        px[2] = clamp_channel((px[2] as f32 * scale) as i32);
    }
    out
}

/// Stretch or compress channels around the 128 midpoint.
///
/// Uses the standard 259-based contrast factor:
/// `factor = 259(value + 255) / (255(259 - value))`. The denominator can't
/// reach zero while values stay in [-100, 100]; keep the formula as-is if
/// the range ever widens, since it degenerates at value = 259.
pub fn adjust_contrast(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Contrast.is_neutral(value) {
        return input.clone();
    }
    let factor = (259.0 * (value + 255) as f32) / (255.0 * (259 - value) as f32);

    let mut out = input.clone();
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        px[0] = clamp_channel((factor * (px[0] as f32 - 128.0) + 128.0) as i32);
        px[1] = clamp_channel((factor * (px[1] as f32 - 128.0) + 128.0) as i32);
        px[2] = clamp_channel((factor * (px[2] as f32 - 128.0) + 128.0) as i32);
    }
    out
}

/// Scale HSB saturation by `1 + value/100`, leaving hue and brightness alone.
///
/// value = -100 fully desaturates to gray at the pixel's brightness.
pub fn adjust_saturation(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Saturation.is_neutral(value) {
        return input.clone();
    }
    let scale = 1.0 + value as f32 / 100.0;

    let mut out = input.clone();
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        let (h, s, b) = rgb_to_hsb(px[0], px[1], px[2]);
        let s = (s * scale).clamp(0.0, 1.0);
        let (r, g, b) = hsb_to_rgb(h, s, b);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    out
}

/// Shift red up and blue down by `trunc(value/100 * 30)`.
///
/// Positive values warm the image, negative values cool it. Green is
/// unchanged.
pub fn adjust_temperature(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Temperature.is_neutral(value) {
        return input.clone();
    }
    let shift = (value as f32 / 100.0 * 30.0) as i32;

    let mut out = input.clone();
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        px[0] = clamp_channel(px[0] as i32 + shift);
        px[2] = clamp_channel(px[2] as i32 - shift);
    }
    out
}

/// Blend every channel toward light gray (220) by `value/100`.
///
/// Values at or below 0 are neutral; 100 flattens the image to uniform gray.
pub fn apply_fade(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Fade.is_neutral(value) {
        return input.clone();
    }
    let strength = value as f32 / 100.0;

    let mut out = input.clone();
    for px in out.as_raw_mut().chunks_exact_mut(4) {
        px[0] = clamp_channel((px[0] as f32 * (1.0 - strength) + 220.0 * strength) as i32);
        px[1] = clamp_channel((px[1] as f32 * (1.0 - strength) + 220.0 * strength) as i32);
        px[2] = clamp_channel((px[2] as f32 * (1.0 - strength) + 220.0 * strength) as i32);
    }
    out
}

/// Darken pixels by their distance from the image center.
///
/// The per-pixel factor is `max(0, 1 - (distance / max_distance) * strength)`
/// where `max_distance` is the center-to-corner distance and the center is
/// the integer midpoint `(W/2, H/2)`. The exact center pixel is never
/// darkened; at full strength the corners go to black.
pub fn apply_vignette(input: &RasterBuffer, value: i32) -> RasterBuffer {
    if Adjustment::Vignette.is_neutral(value) {
        return input.clone();
    }
    let strength = value as f32 / 100.0;
    let center_x = input.width() / 2;
    let center_y = input.height() / 2;
    let (cx, cy) = (center_x as f32, center_y as f32);
    let max_distance = (cx * cx + cy * cy).sqrt();

    let mut out = input.clone();
    // 1x1 (and degenerate single-row/column-at-center) images have
    // max_distance 0; every pixel is at the center, so nothing changes.
    if max_distance == 0.0 {
        return out;
    }

    let width = input.width();
    for (i, px) in out.as_raw_mut().chunks_exact_mut(4).enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        let factor = (1.0 - (distance / max_distance) * strength).max(0.0);

        px[0] = clamp_channel((px[0] as f32 * factor) as i32);
        px[1] = clamp_channel((px[1] as f32 * factor) as i32);
        px[2] = clamp_channel((px[2] as f32 * factor) as i32);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Pixel;

    /// 1x1 buffer holding a single pixel.
    fn single(r: u8, g: u8, b: u8, a: u8) -> RasterBuffer {
        let mut buf = RasterBuffer::new(1, 1);
        buf.set_pixel(0, 0, Pixel::new(r, g, b, a)).unwrap();
        buf
    }

    fn only(stage: Adjustment, value: i32) -> AdjustmentSet {
        let mut set = AdjustmentSet::new();
        set.set(stage, value);
        set
    }

    // ===== Pipeline Tests =====

    #[test]
    fn test_identity_all_neutral() {
        let mut image = RasterBuffer::new(3, 3);
        image.set_pixel(1, 2, Pixel::new(12, 34, 56, 78)).unwrap();

        let result = apply_adjustments(&image, &AdjustmentSet::new());
        assert_eq!(result, image);

        // Explicit zeros behave the same as absent keys
        let mut zeros = AdjustmentSet::new();
        for stage in Adjustment::ORDER {
            zeros.set(stage, 0);
        }
        assert_eq!(apply_adjustments(&image, &zeros), image);
    }

    #[test]
    fn test_input_not_mutated() {
        let image = single(128, 128, 128, 255);
        let before = image.clone();

        let mut settings = AdjustmentSet::new();
        settings.set(Adjustment::Brightness, 80);
        settings.set(Adjustment::Vignette, 100);
        let _ = apply_adjustments(&image, &settings);

        assert_eq!(image, before);
    }

    #[test]
    fn test_single_stage_equals_full_chain() {
        let image = single(128, 128, 128, 255);
        let mut settings = AdjustmentSet::new();
        settings.set(Adjustment::Brightness, 50);
        for stage in Adjustment::ORDER {
            if stage != Adjustment::Brightness {
                settings.set(stage, 0);
            }
        }

        let chained = apply_adjustments(&image, &settings);
        let direct = adjust_brightness(&image, 50);
        assert_eq!(chained, direct);
        assert_eq!(chained.get_pixel(0, 0).unwrap(), Pixel::new(192, 192, 192, 255));
    }

    #[test]
    fn test_output_dimensions_match_input() {
        let image = RasterBuffer::new(7, 3);
        let mut settings = AdjustmentSet::new();
        for stage in Adjustment::ORDER {
            settings.set(stage, 40);
        }
        let result = apply_adjustments(&image, &settings);
        assert_eq!(result.width(), 7);
        assert_eq!(result.height(), 3);
    }

    #[test]
    fn test_empty_image() {
        let image = RasterBuffer::new(0, 0);
        let result = apply_adjustments(&image, &only(Adjustment::Contrast, 50));
        assert!(result.is_empty());
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_positive() {
        let result = adjust_brightness(&single(128, 128, 128, 255), 50);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(192, 192, 192, 255));
    }

    #[test]
    fn test_brightness_negative() {
        let result = adjust_brightness(&single(100, 50, 200, 255), -50);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(50, 25, 100, 255));
    }

    #[test]
    fn test_brightness_clips_at_white() {
        let result = adjust_brightness(&single(200, 200, 200, 255), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(255, 255, 255, 255));
    }

    #[test]
    fn test_brightness_minus_100_is_black() {
        let result = adjust_brightness(&single(200, 13, 255, 9), -100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(0, 0, 0, 9));
    }

    #[test]
    fn test_brightness_truncates_toward_zero() {
        // 77 * 1.5 = 115.5, truncates to 115 (not 116)
        let result = adjust_brightness(&single(77, 77, 77, 255), 50);
        assert_eq!(result.get_pixel(0, 0).unwrap().r, 115);
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_midpoint_fixed() {
        // 128 sits on the pivot and never moves
        let result = adjust_contrast(&single(128, 128, 128, 255), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(128, 128, 128, 255));
    }

    #[test]
    fn test_contrast_positive_spreads() {
        let result = adjust_contrast(&single(64, 128, 192, 255), 100);
        let px = result.get_pixel(0, 0).unwrap();
        assert!(px.r < 64, "dark channel gets darker, got {}", px.r);
        assert_eq!(px.g, 128);
        assert!(px.b > 192, "bright channel gets brighter, got {}", px.b);
    }

    #[test]
    fn test_contrast_negative_compresses() {
        let result = adjust_contrast(&single(0, 128, 255, 255), -100);
        let px = result.get_pixel(0, 0).unwrap();
        // factor = 259*155 / (255*359) ~= 0.4385
        // 0   -> 0.4385 * -128 + 128 = 71.86 -> 71
        // 255 -> 0.4385 *  127 + 128 = 183.69 -> 183
        assert_eq!(px.r, 71);
        assert_eq!(px.g, 128);
        assert_eq!(px.b, 183);
    }

    // ===== Saturation Tests =====

    #[test]
    fn test_saturation_minus_100_desaturates_to_value() {
        // Pure red has HSB value 1.0, so the gray is full white
        let result = adjust_saturation(&single(255, 0, 0, 255), -100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(255, 255, 255, 255));

        // Half-brightness green grays out at its value component
        let result = adjust_saturation(&single(0, 128, 0, 255), -100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(128, 128, 128, 255));
    }

    #[test]
    fn test_saturation_independent_of_hue() {
        let red = adjust_saturation(&single(200, 0, 0, 255), -100);
        let blue = adjust_saturation(&single(0, 0, 200, 255), -100);
        assert_eq!(red.get_pixel(0, 0).unwrap(), blue.get_pixel(0, 0).unwrap());
    }

    #[test]
    fn test_saturation_boost_widens_channel_spread() {
        let result = adjust_saturation(&single(200, 128, 100, 255), 50);
        let px = result.get_pixel(0, 0).unwrap();
        assert!((px.r as i32 - px.b as i32) > 100);
    }

    #[test]
    fn test_saturation_boost_saturated_pixel_saturates() {
        // s is clamped at 1.0, so a fully saturated pixel can't overshoot
        let result = adjust_saturation(&single(255, 0, 0, 255), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(255, 0, 0, 255));
    }

    #[test]
    fn test_saturation_leaves_gray_alone() {
        let result = adjust_saturation(&single(180, 180, 180, 255), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(180, 180, 180, 255));
    }

    // ===== Temperature Tests =====

    #[test]
    fn test_temperature_warms() {
        let result = adjust_temperature(&single(128, 128, 128, 255), 50);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(143, 128, 113, 255));
    }

    #[test]
    fn test_temperature_cools() {
        let result = adjust_temperature(&single(128, 128, 128, 255), -100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(98, 128, 158, 255));
    }

    #[test]
    fn test_temperature_shift_truncates() {
        // -33/100 * 30 = -9.9, truncates to -9
        let result = adjust_temperature(&single(128, 128, 128, 255), -33);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(119, 128, 137, 255));
    }

    #[test]
    fn test_temperature_clamps() {
        let result = adjust_temperature(&single(250, 0, 5, 255), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(255, 0, 0, 255));
    }

    // ===== Fade Tests =====

    #[test]
    fn test_fade_blends_toward_gray() {
        let result = apply_fade(&single(0, 0, 0, 255), 50);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(110, 110, 110, 255));
    }

    #[test]
    fn test_fade_full_strength_flattens() {
        let result = apply_fade(&single(13, 250, 0, 7), 100);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::new(220, 220, 220, 7));
    }

    #[test]
    fn test_fade_negative_is_identity() {
        let image = single(10, 20, 30, 40);
        assert_eq!(apply_fade(&image, -60), image);
        assert_eq!(
            apply_adjustments(&image, &only(Adjustment::Fade, -60)),
            image
        );
    }

    // ===== Vignette Tests =====

    /// 3x3 gradient-free gray image for geometry tests.
    fn flat_3x3(value: u8) -> RasterBuffer {
        let mut buf = RasterBuffer::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                buf.set_pixel(x, y, Pixel::opaque(value, value, value)).unwrap();
            }
        }
        buf
    }

    #[test]
    fn test_vignette_center_untouched() {
        let result = apply_vignette(&flat_3x3(200), 100);
        assert_eq!(result.get_pixel(1, 1).unwrap(), Pixel::opaque(200, 200, 200));
    }

    #[test]
    fn test_vignette_full_strength_blackens_corners() {
        let result = apply_vignette(&flat_3x3(200), 100);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(result.get_pixel(x, y).unwrap(), Pixel::opaque(0, 0, 0));
        }
    }

    #[test]
    fn test_vignette_corner_scales_by_strength() {
        // Corner distance equals max_distance, so factor = 1 - strength
        let result = apply_vignette(&flat_3x3(200), 50);
        assert_eq!(result.get_pixel(0, 0).unwrap(), Pixel::opaque(100, 100, 100));
        // Center still untouched at partial strength
        assert_eq!(result.get_pixel(1, 1).unwrap(), Pixel::opaque(200, 200, 200));
    }

    #[test]
    fn test_vignette_darkens_with_distance() {
        let result = apply_vignette(&flat_3x3(200), 80);
        let center = result.get_pixel(1, 1).unwrap().r;
        let edge = result.get_pixel(1, 0).unwrap().r;
        let corner = result.get_pixel(0, 0).unwrap().r;
        assert!(center > edge, "{center} > {edge}");
        assert!(edge > corner, "{edge} > {corner}");
    }

    #[test]
    fn test_vignette_single_pixel_untouched() {
        // 1x1: center-to-corner distance is zero, nothing to darken
        let image = single(90, 90, 90, 255);
        assert_eq!(apply_vignette(&image, 100), image);
    }

    #[test]
    fn test_vignette_preserves_alpha() {
        let mut buf = RasterBuffer::new(3, 3);
        buf.set_pixel(0, 0, Pixel::new(200, 200, 200, 77)).unwrap();
        let result = apply_vignette(&buf, 100);
        assert_eq!(result.get_pixel(0, 0).unwrap().a, 77);
    }
}
