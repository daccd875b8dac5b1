use glam::Vec3;
use rand::Rng;

use crate::error::WaterError;
use crate::params::GridConfig;

/// A single random height kick applied to the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub index: usize,
    pub amount: f32,
}

/// Two N*N lattices of sample positions plus the triangle list over them.
///
/// Sample `(row, col)` lives at index `row * N + col` and sits at world
/// position `(row, height, col)`. Neighbour naming follows the lattice
/// offsets: left `-N`, top `+1`, right `+N`, bottom `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterGrid {
    size: usize,
    current: Vec<Vec3>,
    previous: Vec<Vec3>,
    indices: Vec<u16>,
}

/// Triangle list for an N*N lattice: two triangles per quad cell,
/// `6 * (N - 1)^2` indices in total.
///
/// Callers must have validated N against [`GridConfig::MAX_SIZE`].
pub fn build_indices(size: usize) -> Vec<u16> {
    let cells = size.saturating_sub(1);
    let mut indices = Vec::with_capacity(6 * cells * cells);
    for row in 0..cells {
        for col in 0..cells {
            let o = (row * size + col) as u16;
            let n = size as u16;
            indices.extend_from_slice(&[o, o + 1, o + n, o + 1, o + n + 1, o + n]);
        }
    }
    indices
}

impl WaterGrid {
    /// Lattice with every sample at the same height.
    pub fn flat(config: &GridConfig, height: f32) -> Result<Self, WaterError> {
        Self::from_fn(config, |_| height)
    }

    /// Lattice whose samples sit at `base_height` plus a uniform draw in `[min, max]`.
    pub fn seeded<R: Rng + ?Sized>(
        config: &GridConfig,
        base_height: f32,
        min: f32,
        max: f32,
        rng: &mut R,
    ) -> Result<Self, WaterError> {
        if min > max {
            return Err(WaterError::InvalidPerturbationRange { min, max });
        }
        if !(max - min).is_finite() {
            return Err(WaterError::PerturbationRangeOverflow { min, max });
        }
        Self::from_fn(config, |_| base_height + rng.gen_range(min..=max))
    }

    /// Lattice with heights given per sample index.
    pub fn from_fn(
        config: &GridConfig,
        mut height: impl FnMut(usize) -> f32,
    ) -> Result<Self, WaterError> {
        config.validate()?;
        let size = config.size;
        let mut current = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let y = height(row * size + col);
                current.push(Vec3::new(row as f32, y, col as f32));
            }
        }
        Ok(Self {
            size,
            previous: current.clone(),
            current,
            indices: build_indices(size),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Samples written by the last relaxation pass.
    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    /// Source lattice for the next relaxation pass (includes pending perturbations).
    pub fn previous(&self) -> &[Vec3] {
        &self.previous
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// One relaxation pass.
    ///
    /// Every sample moves towards the mean of its in-bounds 4-neighbours in
    /// `previous`: `current = previous + speed * (mean - previous)`. Interior
    /// samples average 4 neighbours, edge samples 3 and corners 2; a missing
    /// neighbour is left out of both the sum and the divisor. Afterwards
    /// `previous` is overwritten with `current`.
    pub fn relax(&mut self, speed: f32) {
        let n = self.size;
        let previous = &self.previous;
        for row in 0..n {
            for col in 0..n {
                let i = row * n + col;
                let mut sum = 0.0;
                let mut count = 0u8;
                if row > 0 {
                    sum += previous[i - n].y;
                    count += 1;
                }
                if col + 1 < n {
                    sum += previous[i + 1].y;
                    count += 1;
                }
                if row + 1 < n {
                    sum += previous[i + n].y;
                    count += 1;
                }
                if col > 0 {
                    sum += previous[i - 1].y;
                    count += 1;
                }
                let own = previous[i].y;
                let delta = speed * (sum / f32::from(count) - own);
                self.current[i].y = own + delta;
            }
        }
        self.previous.copy_from_slice(&self.current);
    }

    /// Raise `previous[index]` by `amount`; picked up by the next relaxation pass.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N * N`.
    pub fn perturb(&mut self, index: usize, amount: f32) {
        self.previous[index].y += amount;
    }

    /// Kick one uniformly chosen sample by a uniform amount in `[min, max]`.
    ///
    /// The amount is drawn before the index. Bounds given in the wrong order
    /// are swapped so a live UI edit can never produce an empty range, and a
    /// span too wide for `f32` is sampled by interpolating between the bounds.
    ///
    /// # Panics
    ///
    /// Panics if the lattice is empty.
    pub fn perturb_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min: f32,
        max: f32,
    ) -> Perturbation {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let amount = if (hi - lo).is_finite() {
            rng.gen_range(lo..=hi)
        } else {
            let t: f32 = rng.gen_range(0.0..=1.0);
            lo * (1.0 - t) + hi * t
        };
        let index = rng.gen_range(0..self.previous.len());
        self.perturb(index, amount);
        Perturbation { index, amount }
    }

    /// Drop both lattices and the index list.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Mean, min and max height of `current`.
    pub fn height_stats(&self) -> (f32, f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for p in &self.current {
            min = min.min(p.y);
            max = max.max(p.y);
            sum += f64::from(p.y);
        }
        let mean = if self.current.is_empty() {
            0.0
        } else {
            (sum / self.current.len() as f64) as f32
        };
        (mean, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(size: usize) -> GridConfig {
        GridConfig { size, seed: None }
    }

    fn heights(grid: &WaterGrid) -> Vec<f32> {
        grid.current().iter().map(|p| p.y).collect()
    }

    #[test]
    fn index_layout_is_row_major() {
        let grid = WaterGrid::flat(&config(4), 0.0).unwrap();
        assert_eq!(grid.index(1, 2), 6);
        assert_eq!(grid.current()[6], Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn indices_two_triangles_per_cell() {
        let indices = build_indices(3);
        assert_eq!(indices.len(), 6 * 2 * 2);
        assert_eq!(&indices[..6], &[0, 1, 3, 1, 4, 3]);
        assert_eq!(&indices[18..], &[4, 5, 7, 5, 8, 7]);
    }

    #[test]
    fn largest_grid_indices_stay_in_range() {
        let size = GridConfig::MAX_SIZE;
        let indices = build_indices(size);
        assert_eq!(indices.len(), 6 * (size - 1) * (size - 1));
        let max = indices.iter().copied().max().unwrap();
        assert_eq!(max as usize, size * size - 1);
    }

    #[test]
    fn oversized_grid_rejected() {
        assert!(matches!(
            WaterGrid::flat(&config(300), 0.0),
            Err(WaterError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn interior_spike_spreads_to_four_neighbours() {
        let mut grid = WaterGrid::from_fn(&config(5), |i| if i == 12 { 8.0 } else { 0.0 }).unwrap();
        grid.relax(0.5);
        let h = heights(&grid);
        assert_eq!(h[12], 4.0);
        for i in [7, 11, 13, 17] {
            assert_eq!(h[i], 1.0, "neighbour {i}");
        }
        let untouched = h
            .iter()
            .enumerate()
            .filter(|(i, _)| ![7, 11, 12, 13, 17].contains(i))
            .all(|(_, y)| *y == 0.0);
        assert!(untouched);
    }

    #[test]
    fn edge_cells_divide_by_three() {
        // (row 0, col 2) is on the left edge: neighbours top, right, bottom.
        let mut grid = WaterGrid::from_fn(&config(5), |i| if i == 2 { 6.0 } else { 0.0 }).unwrap();
        grid.relax(1.0);
        let h = heights(&grid);
        assert_eq!(h[2], 0.0);
        assert_eq!(h[1], 2.0);
        assert_eq!(h[3], 2.0);
        // (row 1, col 2) is interior and sees the spike as its left neighbour.
        assert_eq!(h[7], 1.5);
    }

    #[test]
    fn corner_cells_divide_by_two() {
        let mut grid = WaterGrid::from_fn(&config(5), |i| match i {
            19 => 3.0,
            23 => 5.0,
            _ => 0.0,
        })
        .unwrap();
        grid.relax(1.0);
        let h = heights(&grid);
        // (4, 4): left neighbour 19, bottom neighbour 23.
        assert_eq!(h[24], 4.0);
    }

    #[test]
    fn corner_spike_reaches_both_edges() {
        let mut grid = WaterGrid::from_fn(&config(5), |i| if i == 0 { 4.0 } else { 0.0 }).unwrap();
        grid.relax(1.0);
        let h = heights(&grid);
        let expected = 0.0 + 1.0 * (4.0_f32 / 3.0 - 0.0);
        assert_eq!(h[0], 0.0);
        assert_eq!(h[1], expected);
        assert_eq!(h[5], expected);
        assert_eq!(h[6], 0.0);
    }

    #[test]
    fn uniform_lattice_is_a_fixed_point() {
        let mut grid = WaterGrid::flat(&config(6), 2.0).unwrap();
        grid.relax(0.7);
        assert!(grid.current().iter().all(|p| p.y == 2.0));
    }

    #[test]
    fn relax_copies_current_into_previous() {
        let mut grid = WaterGrid::from_fn(&config(4), |i| i as f32).unwrap();
        grid.relax(0.3);
        assert_eq!(grid.current(), grid.previous());
    }

    #[test]
    fn relax_keeps_horizontal_positions() {
        let mut grid = WaterGrid::from_fn(&config(4), |i| (i % 3) as f32).unwrap();
        grid.relax(1.0);
        for (i, p) in grid.current().iter().enumerate() {
            assert_eq!(p.x, (i / 4) as f32);
            assert_eq!(p.z, (i % 4) as f32);
        }
    }

    #[test]
    fn perturbation_only_touches_previous() {
        let mut grid = WaterGrid::flat(&config(4), 1.0).unwrap();
        grid.perturb(5, 0.5);
        assert_eq!(grid.previous()[5].y, 1.5);
        assert_eq!(grid.current()[5].y, 1.0);
    }

    #[test]
    fn end_to_end_single_perturbation() {
        let mut grid = WaterGrid::flat(&config(4), 2.0).unwrap();
        grid.perturb(5, 1.0);
        grid.relax(1.0);
        let h = heights(&grid);

        // (1, 1) is interior and its neighbours are all 2.0.
        assert_eq!(h[5], 2.0);
        // (0, 1) and (1, 0) are edge samples with the spike among three neighbours.
        let edge = 2.0 + 1.0 * (7.0_f32 / 3.0 - 2.0);
        assert_eq!(h[1], edge);
        assert_eq!(h[4], edge);
        // (1, 2) and (2, 1) are interior with the spike among four neighbours.
        assert_eq!(h[6], 2.25);
        assert_eq!(h[9], 2.25);
        for i in [0, 2, 3, 7, 8, 10, 11, 12, 13, 14, 15] {
            assert_eq!(h[i], 2.0, "sample {i}");
        }
    }

    #[test]
    fn seeded_perturbations_are_reproducible() {
        let (min, max) = (1.0, 4.0);
        let mut grid = WaterGrid::flat(&config(8), 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let applied: Vec<Perturbation> = (0..50)
            .map(|_| grid.perturb_random(&mut rng, min, max))
            .collect();

        let mut replay = StdRng::seed_from_u64(7);
        let mut expected_total = 0.0f32;
        let mut expected = vec![0.0f32; 64];
        for p in &applied {
            let amount: f32 = replay.gen_range(min..=max);
            let index: usize = replay.gen_range(0..64);
            assert_eq!(p.amount, amount);
            assert_eq!(p.index, index);
            assert!((min..=max).contains(&amount));
            expected[index] += amount;
            expected_total += amount;
        }

        let total: f32 = grid.previous().iter().map(|p| p.y).sum();
        assert!((total - expected_total).abs() < 1e-2);
        for (i, p) in grid.previous().iter().enumerate() {
            assert_eq!(p.y, expected[i]);
        }
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let mut grid = WaterGrid::flat(&config(3), 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let p = grid.perturb_random(&mut rng, 2.0, 1.0);
        assert!((1.0..=2.0).contains(&p.amount));
    }

    #[test]
    fn seeded_heights_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = WaterGrid::seeded(&config(10), 1.0, 1.0, 4.0, &mut rng).unwrap();
        assert!(grid.current().iter().all(|p| (2.0..=5.0).contains(&p.y)));
        assert_eq!(grid.current(), grid.previous());
        let (mean, min, max) = grid.height_stats();
        assert!(min >= 2.0 && max <= 5.0 && (min..=max).contains(&mean));
    }

    #[test]
    fn clear_empties_everything() {
        let mut grid = WaterGrid::flat(&config(3), 0.0).unwrap();
        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.indices().is_empty());
    }

    #[test]
    fn seeding_rejects_unsampleable_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            WaterGrid::seeded(&config(4), 0.0, -3.0e38, 3.0e38, &mut rng),
            Err(WaterError::PerturbationRangeOverflow {
                min: -3.0e38,
                max: 3.0e38
            })
        );
    }

    #[test]
    fn widest_range_perturbation_stays_finite() {
        let mut grid = WaterGrid::flat(&config(3), 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let p = grid.perturb_random(&mut rng, f32::MAX, f32::MIN);
            assert!(p.amount.is_finite());
            assert!((f32::MIN..=f32::MAX).contains(&p.amount));
            grid.perturb(p.index, -p.amount);
        }
    }

    #[test]
    #[should_panic]
    fn perturb_out_of_range_panics() {
        let mut grid = WaterGrid::flat(&config(3), 0.0).unwrap();
        grid.perturb(9, 1.0);
    }
}
