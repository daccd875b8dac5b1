/// Errors from water configuration and setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaterError {
    #[error("grid size {size} is too small (minimum {min})")]
    GridTooSmall { size: usize, min: usize },
    #[error("grid size {size} overflows 16-bit indices (maximum {max})")]
    GridTooLarge { size: usize, max: usize },
    #[error("perturbation range is empty: min {min} > max {max}")]
    InvalidPerturbationRange { min: f32, max: f32 },
    #[error("perturbation range {min}..={max} is too wide to sample")]
    PerturbationRangeOverflow { min: f32, max: f32 },
    #[error("`{key}` must be a positive number of seconds, got {value}")]
    InvalidPeriod { key: &'static str, value: f32 },
    #[error("`{key}` is not finite")]
    NonFinite { key: &'static str },
    #[error("unknown water parameter `{0}`")]
    UnknownParameter(String),
}
