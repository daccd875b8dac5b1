use std::fmt;

use wavescape_water::WaterGrid;

/// Read-only queries against a water lattice for debugging and the CLI.
pub struct WaterInspector;

impl WaterInspector {
    pub fn summary(grid: &WaterGrid) -> LatticeSummary {
        let (mean, min, max) = grid.height_stats();
        LatticeSummary {
            size: grid.size(),
            samples: grid.current().len(),
            triangles: grid.indices().len() / 3,
            mean_height: mean,
            min_height: min,
            max_height: max,
        }
    }

    /// Height of `current` at `(row, col)`, if inside the lattice.
    pub fn height_at(grid: &WaterGrid, row: usize, col: usize) -> Option<f32> {
        if row >= grid.size() || col >= grid.size() {
            return None;
        }
        grid.current().get(grid.index(row, col)).map(|p| p.y)
    }
}

/// Height statistics of one lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSummary {
    pub size: usize,
    pub samples: usize,
    pub triangles: usize,
    pub mean_height: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl LatticeSummary {
    /// Peak-to-trough height difference.
    pub fn spread(&self) -> f32 {
        self.max_height - self.min_height
    }
}

impl fmt::Display for LatticeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lattice: {n}x{n} samples={} triangles={} height mean={:.3} min={:.3} max={:.3}",
            self.samples,
            self.triangles,
            self.mean_height,
            self.min_height,
            self.max_height,
            n = self.size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavescape_water::GridConfig;

    fn grid() -> WaterGrid {
        let config = GridConfig {
            size: 4,
            seed: None,
        };
        WaterGrid::from_fn(&config, |i| i as f32).unwrap()
    }

    #[test]
    fn summary_of_ramp() {
        let summary = WaterInspector::summary(&grid());
        assert_eq!(summary.samples, 16);
        assert_eq!(summary.triangles, 18);
        assert_eq!(summary.min_height, 0.0);
        assert_eq!(summary.max_height, 15.0);
        assert_eq!(summary.mean_height, 7.5);
        assert_eq!(summary.spread(), 15.0);
    }

    #[test]
    fn height_lookup() {
        let grid = grid();
        assert_eq!(WaterInspector::height_at(&grid, 1, 2), Some(6.0));
        assert_eq!(WaterInspector::height_at(&grid, 4, 0), None);
    }

    #[test]
    fn summary_display() {
        let s = WaterInspector::summary(&grid()).to_string();
        assert!(s.contains("4x4"));
        assert!(s.contains("samples=16"));
        assert!(s.contains("max=15.000"));
    }
}
