use glam::{Mat4, Vec3, Vec4};

/// Plane `a*x + b*y + c*z + d = 0` with a unit-length normal `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub const ZERO: Self = Self {
        normal: Vec3::ZERO,
        distance: 0.0,
    };

    /// Build a plane from raw coefficients, dividing all four by `|(a, b, c)|`.
    ///
    /// A zero-length normal produces [`Plane::ZERO`], whose signed distance is
    /// 0 everywhere. It never culls a sphere with a positive radius, but a
    /// point sphere (radius 0) is culled since `0 <= -0`.
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        let normal = Vec3::new(a, b, c);
        let length = normal.length();
        if length > 0.0 && length.is_finite() {
            Self {
                normal: normal / length,
                distance: d / length,
            }
        } else {
            Self::ZERO
        }
    }

    fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Signed distance from `point`; positive on the side the normal faces.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Index of each plane inside [`Frustum::planes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumPlane {
    Near = 0,
    Far = 1,
    Bottom = 2,
    Top = 3,
    Left = 4,
    Right = 5,
}

/// View frustum as six inward-facing planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            planes: [Plane::ZERO; 6],
        }
    }
}

impl Frustum {
    /// Extract the planes of `projection * view`.
    ///
    /// glam matrices act on column vectors, so this product is the transpose of
    /// the row-vector `view * projection`; its rows are combined as
    /// near `r3 + r2`, far `r3 - r2`, bottom `r3 + r1`, top `r3 - r1`,
    /// left `r3 + r0`, right `r3 - r0`. The projection must use OpenGL clip
    /// depth (`z` in `[-w, w]`).
    pub fn from_matrices(view: Mat4, projection: Mat4) -> Self {
        Self::from_view_projection(projection * view)
    }

    pub fn from_view_projection(view_projection: Mat4) -> Self {
        let m = view_projection;
        let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));

        let mut planes = [Plane::ZERO; 6];
        planes[FrustumPlane::Near as usize] = Plane::from_vec4(r3 + r2);
        planes[FrustumPlane::Far as usize] = Plane::from_vec4(r3 - r2);
        planes[FrustumPlane::Bottom as usize] = Plane::from_vec4(r3 + r1);
        planes[FrustumPlane::Top as usize] = Plane::from_vec4(r3 - r1);
        planes[FrustumPlane::Left as usize] = Plane::from_vec4(r3 + r0);
        planes[FrustumPlane::Right as usize] = Plane::from_vec4(r3 - r0);
        Self { planes }
    }

    pub fn plane(&self, which: FrustumPlane) -> Plane {
        self.planes[which as usize]
    }

    /// False iff the sphere lies entirely behind at least one plane.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) > -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn symmetric_frustum() -> Frustum {
        let projection = Mat4::perspective_rh_gl(90f32.to_radians(), 1.0, 0.1, 100.0);
        Frustum::from_matrices(Mat4::IDENTITY, projection)
    }

    #[test]
    fn plane_normalization() {
        let plane = Plane::new(3.0, 4.0, 0.0, 10.0);
        assert!((plane.normal.length() - 1.0).abs() < EPS);
        assert!((plane.normal.x - 0.6).abs() < EPS);
        assert!((plane.normal.y - 0.8).abs() < EPS);
        assert!((plane.distance - 2.0).abs() < EPS);
    }

    #[test]
    fn degenerate_plane_is_zero_not_nan() {
        let plane = Plane::new(0.0, 0.0, 0.0, 5.0);
        assert_eq!(plane, Plane::ZERO);
        assert_eq!(plane.signed_distance(Vec3::new(1.0, 2.0, 3.0)), 0.0);
    }

    #[test]
    fn zero_planes_cull_only_point_spheres() {
        let frustum = Frustum {
            planes: [Plane::new(0.0, 0.0, 0.0, 5.0); 6],
        };
        assert!(frustum.intersects_sphere(Vec3::ONE, 0.01));
        assert!(frustum.intersects_sphere(Vec3::splat(-1.0e6), 1.0));
        assert!(!frustum.intersects_sphere(Vec3::ONE, 0.0));

        let degenerate = Frustum::from_matrices(Mat4::ZERO, Mat4::ZERO);
        assert_eq!(degenerate.planes, [Plane::ZERO; 6]);
        assert!(degenerate.intersects_sphere(Vec3::ONE, 0.5));
        assert!(!degenerate.intersects_sphere(Vec3::ONE, 0.0));
    }

    #[test]
    fn identity_view_planes_at_origin() {
        let f = symmetric_frustum();

        // Camera looks down -Z; the origin sits just behind the near plane.
        let near = f.plane(FrustumPlane::Near);
        assert!((near.normal - Vec3::NEG_Z).length() < EPS);
        assert!((near.signed_distance(Vec3::ZERO) + 0.1).abs() < EPS);

        let far = f.plane(FrustumPlane::Far);
        assert!((far.normal - Vec3::Z).length() < EPS);
        assert!((far.signed_distance(Vec3::ZERO) - 100.0).abs() < 0.05);

        // Side planes pass through the eye.
        for which in [
            FrustumPlane::Left,
            FrustumPlane::Right,
            FrustumPlane::Bottom,
            FrustumPlane::Top,
        ] {
            assert!(f.plane(which).signed_distance(Vec3::ZERO).abs() < EPS);
        }

        // A 90 degree fov puts the side normals at 45 degrees.
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!((f.plane(FrustumPlane::Left).normal - Vec3::new(h, 0.0, -h)).length() < EPS);
        assert!((f.plane(FrustumPlane::Right).normal - Vec3::new(-h, 0.0, -h)).length() < EPS);
        assert!((f.plane(FrustumPlane::Bottom).normal - Vec3::new(0.0, h, -h)).length() < EPS);
        assert!((f.plane(FrustumPlane::Top).normal - Vec3::new(0.0, -h, -h)).length() < EPS);
    }

    #[test]
    fn sphere_beyond_far_plane_is_outside() {
        let f = symmetric_frustum();
        let radius = 2.0;
        assert!(!f.intersects_sphere(Vec3::new(0.0, 0.0, -(100.0 + radius + 1.0)), radius));
        // Straddling the far plane still counts as visible.
        assert!(f.intersects_sphere(Vec3::new(0.0, 0.0, -101.0), radius));
    }

    #[test]
    fn sphere_at_eye_is_inside() {
        let f = symmetric_frustum();
        assert!(f.intersects_sphere(Vec3::ZERO, 1.0));
    }

    #[test]
    fn touching_from_outside_is_culled() {
        // Exactly -radius from the left plane: culled (the test is `<= -radius`).
        let f = Frustum {
            planes: [
                Plane::new(1.0, 0.0, 0.0, 0.0),
                Plane::ZERO,
                Plane::ZERO,
                Plane::ZERO,
                Plane::ZERO,
                Plane::ZERO,
            ],
        };
        assert!(!f.intersects_sphere(Vec3::new(-1.0, 0.0, 0.0), 1.0));
        assert!(f.intersects_sphere(Vec3::new(-0.999, 0.0, 0.0), 1.0));
    }

    #[test]
    fn translated_view_moves_frustum() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        let f = Frustum::from_matrices(view, projection);
        assert!(f.intersects_sphere(Vec3::ZERO, 1.0));
        assert!(!f.intersects_sphere(Vec3::new(0.0, 0.0, 60.0), 1.0));
        assert!(!f.intersects_sphere(Vec3::new(500.0, 0.0, 0.0), 1.0));
    }
}
