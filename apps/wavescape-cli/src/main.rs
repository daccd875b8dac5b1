use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wavescape_common::{Camera, FrameClock};
use wavescape_compositor::{CompositorShaders, WaterCompositor};
use wavescape_render::{MemoryMeshBuffer, MeshId, ModelId, RecordingSurface, ShaderId, TextureId};
use wavescape_render_wgpu::{GpuContext, WgpuMeshBuffer, WgpuTargetAllocator};
use wavescape_scene::{ChaosParams, ChaosResources, ChaosScene, SceneDescription, StaticScene};
use wavescape_tools::WaterInspector;
use wavescape_water::{GridConfig, WaterParams, WaterSimulator};

const MODEL_SHADER: ShaderId = ShaderId(1);
const REFLECTION_SHADER: ShaderId = ShaderId(2);
const REFRACTION_SHADER: ShaderId = ShaderId(3);
const BLENDING_SHADER: ShaderId = ShaderId(4);
const COMPOSITOR_SHADERS: CompositorShaders = CompositorShaders {
    reflection: REFLECTION_SHADER,
    refraction: REFRACTION_SHADER,
    blending: BLENDING_SHADER,
};
const INSTANCE_SHADER: ShaderId = ShaderId(5);
const FLOOR_SHADER: ShaderId = ShaderId(6);
const TOP_SHADER: ShaderId = ShaderId(7);

const WATER_MESH: MeshId = MeshId(1);
const CHAOS_GRID_MESH: MeshId = MeshId(2);

const DEFAULT_MODEL: &str = "data/models/rock/rock.obj";

#[derive(Parser)]
#[command(name = "wavescape-cli", about = "Headless driver for the wavescape programs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Run the water program against a recording surface
    Water {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Lattice side; overrides the config file
        #[arg(long)]
        size: Option<usize>,
        /// RNG seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// JSON file with `grid` and `water` sections
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override a water parameter, e.g. `--set speed=0.5`
        #[arg(long = "set", value_parser = parse_assignment)]
        overrides: Vec<(String, f32)>,
        /// Scene description to reflect; defaults to a single model
        #[arg(long)]
        scene: Option<PathBuf>,
        #[arg(long, default_value = "1920")]
        width: u32,
        #[arg(long, default_value = "1017")]
        height: u32,
    },
    /// Sweep the camera through the chaos scene and report culling
    Chaos {
        #[arg(short, long, default_value = "8")]
        frames: u32,
        /// Instances per lattice side
        #[arg(short, long)]
        dimension: Option<usize>,
        /// Invert the culling test
        #[arg(long)]
        debug: bool,
        /// Override a chaos parameter, e.g. `--set top_angle=1.2`
        #[arg(long = "set", value_parser = parse_assignment)]
        overrides: Vec<(String, f32)>,
    },
    /// Validate a scene description and list its models
    Scene {
        path: PathBuf,
    },
    /// Upload a lattice to a real GPU buffer, read it back, and allocate
    /// the compositor targets
    GpuCheck {
        #[arg(long, default_value = "64")]
        size: usize,
        #[arg(short, long, default_value = "30")]
        frames: u32,
    },
}

/// Contents of a `--config` file. Missing sections fall back to defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct WaterConfig {
    grid: GridConfig,
    water: WaterParams,
}

impl WaterConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

fn parse_assignment(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for `{}`: {e}", key.trim()))?;
    Ok((key.trim().to_owned(), value))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("wavescape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", wavescape_common::crate_info());
            println!("render: {}", wavescape_render::crate_info());
            println!("render-wgpu: {}", wavescape_render_wgpu::crate_info());
            println!("cull: {}", wavescape_cull::crate_info());
            println!("water: {}", wavescape_water::crate_info());
            println!("compositor: {}", wavescape_compositor::crate_info());
            println!("scene: {}", wavescape_scene::crate_info());
            println!("tools: {}", wavescape_tools::crate_info());
        }
        Commands::Water {
            frames,
            dt,
            size,
            seed,
            config,
            overrides,
            scene,
            width,
            height,
        } => {
            let mut config = match config {
                Some(path) => WaterConfig::load(&path)?,
                None => WaterConfig::default(),
            };
            if let Some(size) = size {
                config.grid.size = size;
            }
            if seed.is_some() {
                config.grid.seed = seed;
            }
            for (key, value) in &overrides {
                config.water.set(key, *value)?;
            }
            config.grid.validate()?;
            config.water.validate()?;

            let description = match scene {
                Some(path) => SceneDescription::load(&path)?,
                None => SceneDescription::single_model(DEFAULT_MODEL),
            };
            description.validate()?;
            run_water(&config, &description, frames, dt, (width, height))?;
        }
        Commands::Chaos {
            frames,
            dimension,
            debug,
            overrides,
        } => {
            let mut params = ChaosParams::default();
            if let Some(dimension) = dimension {
                params.dimension = dimension;
            }
            params.invert_culling = debug;
            for (key, value) in &overrides {
                params.set(key, *value)?;
            }
            run_chaos(params, frames)?;
        }
        Commands::Scene { path } => {
            let description = SceneDescription::load(&path)?;
            description.validate()?;
            let scene = StaticScene::new(&description);
            println!(
                "Scene {}: {} placements, {} distinct models",
                path.display(),
                description.models.len(),
                scene.registry().len()
            );
            for (model, id) in scene.registry().iter() {
                println!("  model {:>3}: {model}", id.0);
            }
            for placement in &description.models {
                println!(
                    "  {} at {} scale {} angles {}",
                    placement.model, placement.position, placement.scale, placement.angles
                );
            }
            for face in scene.skybox() {
                println!("  skybox: {face}");
            }
        }
        Commands::GpuCheck { size, frames } => {
            let ctx = GpuContext::headless()?;
            println!("Adapter: {}", ctx.adapter_name());

            let config = GridConfig {
                size,
                seed: Some(7),
            };
            config.validate()?;
            let buffer = WgpuMeshBuffer::new(&ctx, WATER_MESH, config.sample_count());
            let mut sim = WaterSimulator::new(config, WaterParams::default(), buffer)?;
            for _ in 0..frames {
                sim.update(0.016);
            }

            let readback = sim.buffer().read_vertices()?;
            anyhow::ensure!(
                readback.as_slice() == sim.grid().current(),
                "GPU readback differs from the lattice"
            );
            println!(
                "Readback OK: {} vertices, {} indices",
                readback.len(),
                sim.buffer().index_count()
            );
            println!("{}", WaterInspector::summary(sim.grid()));

            let scene = StaticScene::new(&SceneDescription::single_model(DEFAULT_MODEL));
            let mut allocator = WgpuTargetAllocator::new(&ctx);
            let compositor =
                WaterCompositor::new(&scene, &mut allocator, COMPOSITOR_SHADERS, (1920, 1017))?;
            let refraction = compositor.refraction_target();
            anyhow::ensure!(
                allocator.view(compositor.reflection_target().color).is_some()
                    && allocator.view(refraction.color).is_some()
                    && refraction.depth.is_some_and(|depth| allocator.view(depth).is_some()),
                "compositor targets have no sampleable views"
            );
            println!("Compositor targets OK: {} allocated", allocator.len());
            compositor.destroy(&mut allocator)?;
        }
    }

    Ok(())
}

fn run_water(
    config: &WaterConfig,
    description: &SceneDescription,
    frames: u32,
    dt: f32,
    viewport: (u32, u32),
) -> anyhow::Result<()> {
    let aspect = viewport.0 as f32 / viewport.1.max(1) as f32;
    let mut surface = RecordingSurface::new();
    let mut scene = StaticScene::new(description);
    let compositor = WaterCompositor::new(&scene, &mut surface, COMPOSITOR_SHADERS, viewport)?;
    let mut sim = WaterSimulator::new(config.grid, config.water, MemoryMeshBuffer::new(WATER_MESH))?;
    let camera = Camera::new(glam::Vec3::new(0.0, 3.0, 6.0), -90.0, -20.0);
    let mut clock = FrameClock::new();

    println!(
        "Water: {}x{} lattice, {} frames at {dt}s, viewport {}x{}",
        config.grid.size, config.grid.size, frames, viewport.0, viewport.1
    );
    println!("{}", WaterInspector::summary(sim.grid()));

    let (mut perturbations, mut relaxations) = (0u32, 0u32);
    for _ in 0..frames {
        clock.advance(dt);
        let report = sim.update(dt);
        perturbations += u32::from(report.perturbation.is_some());
        relaxations += u32::from(report.relaxed);

        scene.update_projection(&camera, aspect);
        scene.draw(&mut surface, &camera, MODEL_SHADER);
        let scene_draws = surface.draw_count();
        surface.take_commands();

        compositor.draw(&mut surface, &scene, &camera, &clock, sim.params(), sim.mesh())?;
        let water_draws = surface.draw_count();
        debug!(frame = clock.frame(), "{surface}");
        surface.take_commands();

        println!(
            "frame {:>4}: scene draws={scene_draws} water draws={water_draws} perturbed={} relaxed={}",
            clock.frame(),
            report.perturbation.is_some(),
            report.relaxed
        );
    }

    println!("Perturbations: {perturbations}, relaxations: {relaxations}");
    println!("{}", WaterInspector::summary(sim.grid()));
    println!("Vertex uploads: {}", sim.buffer().vertex_uploads());

    compositor.destroy(&mut surface)?;
    sim.destroy();
    scene.destroy();
    info!("water program destroyed");
    Ok(())
}

fn run_chaos(params: ChaosParams, frames: u32) -> anyhow::Result<()> {
    let mut grid = MemoryMeshBuffer::new(CHAOS_GRID_MESH);
    let resources = ChaosResources {
        instance_model: ModelId(1),
        instance_shader: INSTANCE_SHADER,
        instance_textures: (1..=4).map(TextureId).collect(),
        floor_shader: FLOOR_SHADER,
        top_shader: TOP_SHADER,
    };
    let mut scene = ChaosScene::new(params, resources, &mut grid)?;
    let mut surface = RecordingSurface::new();
    let mut camera = Camera::new(scene.params().camera_position, -90.0, 0.0);
    let mut clock = FrameClock::new();
    let step = 360.0 / frames.max(1) as f32;

    println!(
        "Chaos: {} instances, grid {} ({} indices)",
        scene.instances().len(),
        scene.params().grid_size,
        grid.indices().len()
    );
    for _ in 0..frames {
        clock.advance(0.016);
        let stats = scene.draw(&mut surface, &mut camera, &clock, 1920.0 / 1017.0);
        println!(
            "yaw {:>7.1}: {stats} draws={}",
            camera.yaw,
            surface.draw_count()
        );
        surface.take_commands();
        camera.rotate(step, 0.0);
    }
    scene.destroy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assignment_accepts_key_value() {
        assert_eq!(parse_assignment("speed=0.5"), Ok(("speed".into(), 0.5)));
        assert_eq!(
            parse_assignment(" top_angle = -30 "),
            Ok(("top_angle".into(), -30.0))
        );
    }

    #[test]
    fn parse_assignment_rejects_malformed() {
        assert!(parse_assignment("speed").is_err());
        assert!(parse_assignment("speed=fast").is_err());
    }

    #[test]
    fn water_config_sections_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.json");
        std::fs::write(&path, r#"{ "grid": { "size": 32, "seed": 5 } }"#).unwrap();
        let config = WaterConfig::load(&path).unwrap();
        assert_eq!(config.grid, GridConfig { size: 32, seed: Some(5) });
        assert_eq!(config.water, WaterParams::default());
    }

    #[test]
    fn cli_parses_repeated_sets() {
        let cli = Cli::try_parse_from([
            "wavescape-cli",
            "water",
            "--set",
            "speed=2",
            "--set",
            "height=0.5",
            "--frames",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Water {
                frames, overrides, ..
            } => {
                assert_eq!(frames, 3);
                assert_eq!(overrides.len(), 2);
                assert_eq!(overrides[1], ("height".to_owned(), 0.5));
            }
            _ => panic!("expected water command"),
        }
    }

    #[test]
    fn short_water_run_completes() {
        let config = WaterConfig {
            grid: GridConfig {
                size: 8,
                seed: Some(3),
            },
            water: WaterParams::default(),
        };
        let description = SceneDescription::single_model(DEFAULT_MODEL);
        run_water(&config, &description, 5, 0.02, (64, 32)).unwrap();
    }

    #[test]
    fn short_chaos_run_completes() {
        let params = ChaosParams {
            dimension: 3,
            grid_size: 8,
            ..ChaosParams::default()
        };
        run_chaos(params, 2).unwrap();
    }
}
