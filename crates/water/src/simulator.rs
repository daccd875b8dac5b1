use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use wavescape_render::{MeshBuffer, MeshId};

use crate::error::WaterError;
use crate::grid::{Perturbation, WaterGrid};
use crate::params::{GridConfig, WaterParams};

/// What a single [`WaterSimulator::update`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub perturbation: Option<Perturbation>,
    /// A relaxation pass ran and the vertex buffer was refreshed.
    pub relaxed: bool,
}

/// Handle the compositor draws from; it never sees the lattice itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterMesh {
    pub mesh: MeshId,
    pub index_count: u32,
}

/// Drives a [`WaterGrid`] on two timers and mirrors it into a mesh buffer.
pub struct WaterSimulator<B: MeshBuffer> {
    params: WaterParams,
    grid: WaterGrid,
    buffer: B,
    rng: StdRng,
    since_perturbation: f32,
    since_height_update: f32,
}

impl<B: MeshBuffer> WaterSimulator<B> {
    /// Seed a lattice around `params.height` and upload it.
    pub fn new(config: GridConfig, params: WaterParams, buffer: B) -> Result<Self, WaterError> {
        config.validate()?;
        params.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = WaterGrid::seeded(
            &config,
            params.height,
            params.min_perturbation_height,
            params.max_perturbation_height,
            &mut rng,
        )?;
        info!(
            size = config.size,
            samples = config.sample_count(),
            seed = ?config.seed,
            "water simulator initialised"
        );
        Ok(Self::with_rng(grid, params, buffer, rng))
    }

    /// Wrap an existing lattice, e.g. a flat one for deterministic runs.
    pub fn from_grid(
        grid: WaterGrid,
        params: WaterParams,
        buffer: B,
        seed: u64,
    ) -> Result<Self, WaterError> {
        params.validate()?;
        Ok(Self::with_rng(grid, params, buffer, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(grid: WaterGrid, params: WaterParams, mut buffer: B, rng: StdRng) -> Self {
        buffer.upload_indices(grid.indices());
        buffer.replace_vertices(grid.current());
        Self {
            params,
            grid,
            buffer,
            rng,
            since_perturbation: 0.0,
            since_height_update: 0.0,
        }
    }

    /// Advance both timers by `dt` seconds.
    ///
    /// The perturbation timer is evaluated first, then the height timer. A
    /// timer fires when its accumulated time has reached its period, and is
    /// reset to zero without adding `dt`; otherwise it accumulates `dt`.
    /// A destroyed simulator does nothing.
    pub fn update(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        if self.grid.is_empty() {
            return report;
        }

        if self.since_perturbation >= self.params.perturbation_cooldown {
            let p = self.grid.perturb_random(
                &mut self.rng,
                self.params.min_perturbation_height,
                self.params.max_perturbation_height,
            );
            debug!(index = p.index, amount = p.amount, "perturbation");
            report.perturbation = Some(p);
            self.since_perturbation = 0.0;
        } else {
            self.since_perturbation += dt;
        }

        if self.since_height_update >= self.params.height_refresh_offset {
            self.grid.relax(self.params.speed);
            self.buffer.replace_vertices(self.grid.current());
            report.relaxed = true;
            self.since_height_update = 0.0;
        } else {
            self.since_height_update += dt;
        }

        report
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    /// Live access for debug panels. Values are read on the next update.
    pub fn params_mut(&mut self) -> &mut WaterParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: WaterParams) -> Result<(), WaterError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn grid(&self) -> &WaterGrid {
        &self.grid
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn mesh(&self) -> WaterMesh {
        WaterMesh {
            mesh: self.buffer.mesh_id(),
            index_count: self.grid.indices().len() as u32,
        }
    }

    /// Release the lattices. The buffer keeps its last upload.
    pub fn destroy(&mut self) {
        info!(size = self.grid.size(), "water simulator destroyed");
        self.grid.clear();
    }
}
