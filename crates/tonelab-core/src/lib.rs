//! Tonelab Core - Color adjustment library
//!
//! This crate provides the core color-adjustment pipeline for Tonelab: an
//! owned RGBA raster buffer, six ordered per-pixel adjustment stages
//! (brightness, contrast, saturation, temperature, fade, vignette), image
//! decode/encode glue, and a JSON-backed preset store.

use std::collections::BTreeMap;

pub mod adjustments;
pub mod color;
pub mod decode;
pub mod encode;
pub mod preset;
pub mod raster;

pub use adjustments::apply_adjustments;
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_png, EncodeError};
pub use preset::{PresetError, PresetStore};
pub use raster::{Pixel, RasterBuffer, RasterError};

/// The six adjustment stages, in pipeline order.
///
/// Variant order is the order the pipeline runs them in; later stages are
/// tuned assuming earlier ones already ran, so it must not be changed.
/// Serialized by variant name, so stored presets read
/// `{"Brightness": 40, ...}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Adjustment {
    Brightness,
    Contrast,
    Saturation,
    Temperature,
    Fade,
    Vignette,
}

impl Adjustment {
    /// All stages in pipeline execution order.
    pub const ORDER: [Adjustment; 6] = [
        Adjustment::Brightness,
        Adjustment::Contrast,
        Adjustment::Saturation,
        Adjustment::Temperature,
        Adjustment::Fade,
        Adjustment::Vignette,
    ];

    /// Whether `value` makes this stage an identity transform.
    ///
    /// 0 is neutral for every stage. Fade only blends toward gray, so
    /// negative values are neutral as well.
    pub fn is_neutral(self, value: i32) -> bool {
        match self {
            Adjustment::Fade => value <= 0,
            _ => value == 0,
        }
    }
}

/// One pipeline invocation's worth of adjustment values.
///
/// Maps each [`Adjustment`] to a value in [-100, 100]; adjustments that were
/// never set read as 0 (neutral). The map round-trips through serde without
/// inventing entries: absent stages stay absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AdjustmentSet {
    values: BTreeMap<Adjustment, i32>,
}

impl AdjustmentSet {
    /// Minimum adjustment value.
    pub const MIN_VALUE: i32 = -100;
    /// Maximum adjustment value.
    pub const MAX_VALUE: i32 = 100;

    /// Create an empty (all-neutral) set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a stage, 0 if never set.
    pub fn get(&self, adjustment: Adjustment) -> i32 {
        self.values.get(&adjustment).copied().unwrap_or(0)
    }

    /// Set a stage's value, clamped to [-100, 100].
    pub fn set(&mut self, adjustment: Adjustment, value: i32) {
        self.values
            .insert(adjustment, value.clamp(Self::MIN_VALUE, Self::MAX_VALUE));
    }

    /// Remove a stage's stored value so it reads as neutral again.
    pub fn unset(&mut self, adjustment: Adjustment) {
        self.values.remove(&adjustment);
    }

    /// Whether every stage would be an identity transform.
    pub fn is_neutral(&self) -> bool {
        Adjustment::ORDER
            .iter()
            .all(|&a| a.is_neutral(self.get(a)))
    }

    /// Stored (stage, value) pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Adjustment, i32)> + '_ {
        self.values.iter().map(|(&a, &v)| (a, v))
    }
}
