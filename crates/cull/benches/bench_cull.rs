use std::hint::black_box;
use std::time::Instant;

use glam::{Mat4, Vec3};
use wavescape_cull::FrustumCuller;

fn make_spheres(dimension: usize, spacing: f32) -> Vec<Vec3> {
    let half = dimension as f32 * spacing * 0.5;
    let mut out = Vec::with_capacity(dimension * dimension * dimension);
    for x in 0..dimension {
        for y in 0..dimension {
            for z in 0..dimension {
                out.push(Vec3::new(
                    x as f32 * spacing - half,
                    y as f32 * spacing - half,
                    z as f32 * spacing - half,
                ));
            }
        }
    }
    out
}

fn bench_check_visible(dimension: usize, iterations: usize) {
    let spheres = make_spheres(dimension, 8.0);
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 0.1, 10_000.0);
    let mut culler = FrustumCuller::new();

    let start = Instant::now();
    let mut visible = 0usize;
    for i in 0..iterations {
        let angle = i as f32 * 0.01;
        let view = Mat4::look_at_rh(
            Vec3::ZERO,
            Vec3::new(angle.cos(), 0.0, angle.sin()),
            Vec3::Y,
        );
        culler.rebuild(view, projection);
        for &center in &spheres {
            if culler.check_visible(black_box(center), 2.0) {
                visible += 1;
            }
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  check_visible ({} spheres, {iterations} frames): {per_iter:?}/frame, avg visible {}",
        spheres.len(),
        visible / iterations
    );
}

fn bench_rebuild(iterations: usize) {
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 0.1, 10_000.0);
    let mut culler = FrustumCuller::new();

    let start = Instant::now();
    for i in 0..iterations {
        let eye = Vec3::new(i as f32, 10.0, 0.0);
        culler.rebuild(black_box(Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)), projection);
    }
    let elapsed = start.elapsed();
    println!(
        "  rebuild ({iterations} iters): {:?}/iter",
        elapsed / iterations as u32
    );
}

fn main() {
    println!("=== Frustum Culling Benchmarks ===");
    println!();

    println!("Plane extraction:");
    bench_rebuild(100_000);
    println!();

    println!("Sphere tests:");
    bench_check_visible(10, 200);
    bench_check_visible(20, 100);
    bench_check_visible(40, 20);
}
