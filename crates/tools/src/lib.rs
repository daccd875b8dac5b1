//! Developer Tooling: lattice inspector and live tuning panels.
//!
//! # Invariants
//! - Panels only write through `tunables_mut`; they never touch a lattice.
//! - Tools are first-class and tested where possible.

mod inspector;
mod panels;

pub use inspector::{LatticeSummary, WaterInspector};
pub use panels::{chaos_panel, tunable_sliders, water_panel};

pub fn crate_info() -> &'static str {
    "wavescape-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
