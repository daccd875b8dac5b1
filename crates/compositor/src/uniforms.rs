//! Uniform names shared with the water shaders.
//!
//! These strings are matched against shader source byte for byte, including
//! the two historical misspellings in the composite shader.

pub const MODEL: &str = "model";
pub const PROJECTION: &str = "projection";
pub const VIEW: &str = "view";
pub const VIEW_POS: &str = "viewPos";
pub const WATER_HEIGHT: &str = "waterHeight";
pub const SPEED: &str = "speed";
pub const AMOUNT: &str = "amount";
pub const HEIGHT: &str = "height";
pub const TIME_SINCE_START: &str = "timeSinceStart";
pub const REFRACTION_STRENGTH: &str = "refractionStrengh";
pub const REFRACTION_RATIO: &str = "indecesOfRefractionRatio";
pub const WAVE_STRENGTH: &str = "waveStrength";
pub const REFLECTION_MAP: &str = "reflectionMap";
pub const REFRACTION_MAP: &str = "refractionMap";
pub const DEPTH_MAP: &str = "depthMap";

/// Texture unit of the reflection colour attachment.
pub const REFLECTION_UNIT: u32 = 0;
/// Texture unit of the refraction colour attachment.
pub const REFRACTION_UNIT: u32 = 1;
/// Texture unit of the refraction depth attachment.
pub const DEPTH_UNIT: u32 = 3;
