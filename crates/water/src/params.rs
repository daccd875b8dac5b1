use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::WaterError;

/// Lattice dimensions and RNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Samples per side (N). The lattice holds N*N samples.
    pub size: usize,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 250,
            seed: None,
        }
    }
}

impl GridConfig {
    pub const MIN_SIZE: usize = 2;
    /// Largest N whose highest vertex index `N*N - 1` fits in a `u16`.
    pub const MAX_SIZE: usize = 256;

    pub fn validate(&self) -> Result<(), WaterError> {
        if self.size < Self::MIN_SIZE {
            return Err(WaterError::GridTooSmall {
                size: self.size,
                min: Self::MIN_SIZE,
            });
        }
        let fits = self
            .size
            .checked_mul(self.size)
            .is_some_and(|samples| samples - 1 <= u16::MAX as usize);
        if !fits {
            return Err(WaterError::GridTooLarge {
                size: self.size,
                max: Self::MAX_SIZE,
            });
        }
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        self.size * self.size
    }
}

/// A live-editable scalar exposed to the debug UI and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunable {
    /// Stable identifier used by `--set key=value`.
    pub key: &'static str,
    pub label: &'static str,
    pub range: RangeInclusive<f32>,
}

impl Tunable {
    pub const fn new(key: &'static str, label: &'static str, range: RangeInclusive<f32>) -> Self {
        Self { key, label, range }
    }
}

/// Water simulation and compositing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    /// Relaxation rate; also drives the composite shader's wave strength.
    pub speed: f32,
    pub amount: f32,
    /// World-space height of the water plane.
    pub height: f32,
    pub refraction_strength: f32,
    pub refraction_ratio: f32,
    pub min_perturbation_height: f32,
    pub max_perturbation_height: f32,
    /// Seconds between perturbations.
    pub perturbation_cooldown: f32,
    /// Seconds between relaxation passes.
    pub height_refresh_offset: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            amount: 10.0,
            height: 1.0,
            refraction_strength: 0.3,
            refraction_ratio: 0.5,
            min_perturbation_height: 1.0,
            max_perturbation_height: 4.0,
            perturbation_cooldown: 0.01,
            height_refresh_offset: 0.064,
        }
    }
}

impl WaterParams {
    pub fn validate(&self) -> Result<(), WaterError> {
        for (key, value) in self.values() {
            if !value.is_finite() {
                return Err(WaterError::NonFinite { key });
            }
        }
        if self.min_perturbation_height > self.max_perturbation_height {
            return Err(WaterError::InvalidPerturbationRange {
                min: self.min_perturbation_height,
                max: self.max_perturbation_height,
            });
        }
        if !(self.max_perturbation_height - self.min_perturbation_height).is_finite() {
            return Err(WaterError::PerturbationRangeOverflow {
                min: self.min_perturbation_height,
                max: self.max_perturbation_height,
            });
        }
        for (key, value) in [
            ("perturbation_cooldown", self.perturbation_cooldown),
            ("height_refresh_offset", self.height_refresh_offset),
        ] {
            if value <= 0.0 {
                return Err(WaterError::InvalidPeriod { key, value });
            }
        }
        Ok(())
    }

    /// Every parameter as `(key, value)`, in UI order.
    pub fn values(&self) -> [(&'static str, f32); 9] {
        [
            ("speed", self.speed),
            ("amount", self.amount),
            ("height", self.height),
            ("refraction_strength", self.refraction_strength),
            ("refraction_ratio", self.refraction_ratio),
            ("min_perturbation_height", self.min_perturbation_height),
            ("max_perturbation_height", self.max_perturbation_height),
            ("perturbation_cooldown", self.perturbation_cooldown),
            ("height_refresh_offset", self.height_refresh_offset),
        ]
    }

    /// Every parameter with its UI metadata and a mutable binding.
    pub fn tunables_mut(&mut self) -> [(Tunable, &mut f32); 9] {
        [
            (
                Tunable::new("speed", "water speed", 0.0..=5.0),
                &mut self.speed,
            ),
            (
                Tunable::new("amount", "water amount", 0.0..=20.0),
                &mut self.amount,
            ),
            (
                Tunable::new("height", "water height", 0.0..=10.0),
                &mut self.height,
            ),
            (
                Tunable::new("refraction_strength", "refraction strength", -1.0..=1.0),
                &mut self.refraction_strength,
            ),
            (
                Tunable::new("refraction_ratio", "refraction index ratio", -1.0..=1.0),
                &mut self.refraction_ratio,
            ),
            (
                Tunable::new("min_perturbation_height", "min perturbation", -10.0..=10.0),
                &mut self.min_perturbation_height,
            ),
            (
                Tunable::new("max_perturbation_height", "max perturbation", -10.0..=10.0),
                &mut self.max_perturbation_height,
            ),
            (
                Tunable::new("perturbation_cooldown", "perturbation cooldown (s)", 0.001..=1.0),
                &mut self.perturbation_cooldown,
            ),
            (
                Tunable::new("height_refresh_offset", "height refresh (s)", 0.001..=1.0),
                &mut self.height_refresh_offset,
            ),
        ]
    }

    /// Assign one parameter by key. The result is not validated.
    pub fn set(&mut self, key: &str, value: f32) -> Result<(), WaterError> {
        let (_, slot) = self
            .tunables_mut()
            .into_iter()
            .find(|(t, _)| t.key == key)
            .ok_or_else(|| WaterError::UnknownParameter(key.to_owned()))?;
        *slot = value;
        Ok(())
    }
}
