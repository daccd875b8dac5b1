use std::fmt;

use glam::{Mat4, Vec3};

use crate::frustum::Frustum;

/// Per-frame culling counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub tested: usize,
    pub visible: usize,
}

impl CullStats {
    pub fn culled(&self) -> usize {
        self.tested - self.visible
    }
}

impl fmt::Display for CullStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tested={} visible={} culled={}",
            self.tested,
            self.visible,
            self.culled()
        )
    }
}

/// Frame-scoped visibility predicate.
///
/// Call [`FrustumCuller::rebuild`] with this frame's camera matrices before the
/// first [`FrustumCuller::check_visible`]; the planes are overwritten in place.
#[derive(Debug, Clone, Default)]
pub struct FrustumCuller {
    frustum: Frustum,
    /// Inverts every answer, so only normally culled objects are drawn.
    pub debug_mode: bool,
    stats: CullStats,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the six planes for this frame and reset the frame's stats.
    pub fn rebuild(&mut self, view: Mat4, projection: Mat4) {
        if self.stats.tested > 0 {
            tracing::trace!(stats = %self.stats, "frustum frame finished");
        }
        self.frustum = Frustum::from_matrices(view, projection);
        self.stats = CullStats::default();
    }

    pub fn check_visible(&mut self, position: Vec3, radius: f32) -> bool {
        let visible = self.frustum.intersects_sphere(position, radius) != self.debug_mode;
        self.stats.tested += 1;
        if visible {
            self.stats.visible += 1;
        }
        visible
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Counters accumulated since the last rebuild.
    pub fn stats(&self) -> CullStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuilt(debug_mode: bool) -> FrustumCuller {
        let mut culler = FrustumCuller::new();
        culler.debug_mode = debug_mode;
        culler.rebuild(
            Mat4::IDENTITY,
            Mat4::perspective_rh_gl(90f32.to_radians(), 1.0, 0.1, 100.0),
        );
        culler
    }

    #[test]
    fn check_visible_normal_mode() {
        let mut culler = rebuilt(false);
        assert!(culler.check_visible(Vec3::ZERO, 1.0));
        assert!(culler.check_visible(Vec3::new(0.0, 0.0, -50.0), 1.0));
        assert!(!culler.check_visible(Vec3::new(0.0, 0.0, -200.0), 1.0));
        assert!(!culler.check_visible(Vec3::new(0.0, 0.0, 10.0), 1.0));
    }

    #[test]
    fn debug_mode_inverts() {
        let mut culler = rebuilt(true);
        assert!(!culler.check_visible(Vec3::ZERO, 1.0));
        assert!(culler.check_visible(Vec3::new(0.0, 0.0, -200.0), 1.0));
    }

    #[test]
    fn stats_reset_on_rebuild() {
        let mut culler = rebuilt(false);
        culler.check_visible(Vec3::ZERO, 1.0);
        culler.check_visible(Vec3::new(0.0, 0.0, -200.0), 1.0);
        assert_eq!(
            culler.stats(),
            CullStats {
                tested: 2,
                visible: 1
            }
        );
        assert_eq!(culler.stats().culled(), 1);

        culler.rebuild(Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(culler.stats(), CullStats::default());
    }

    #[test]
    fn rebuild_replaces_previous_planes() {
        let mut culler = rebuilt(false);
        let target = Vec3::new(0.0, 0.0, 50.0);
        assert!(!culler.check_visible(target, 1.0));

        // Turn around: the same sphere is now in front.
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, Vec3::Y);
        culler.rebuild(view, Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0));
        assert!(culler.check_visible(target, 1.0));
    }

    #[test]
    fn stats_display() {
        let stats = CullStats {
            tested: 10,
            visible: 4,
        };
        assert_eq!(stats.to_string(), "tested=10 visible=4 culled=6");
    }
}
