//! Transformations

use super::{matrix4x4, Float, Matrix4x4, Normal3f, Point3f, Ray, Vector3f, IDENTITY_MATRIX};
use std::ops::Mul;

/// A transformation for mapping from points to points and vectors to vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse transformation matrix.
    pub m_inv: Matrix4x4,
}

/// Create a transformation representing a translation.
///
/// * `delta` -  Translation.
#[rustfmt::skip]
pub fn translate(delta: &Vector3f) -> Transform {
    Transform {
        m: matrix4x4(
            1.0, 0.0, 0.0, delta.x,
            0.0, 1.0, 0.0, delta.y,
            0.0, 0.0, 1.0, delta.z,
            0.0, 0.0, 0.0, 1.0,
        ),
        m_inv: matrix4x4(
            1.0, 0.0, 0.0, -delta.x,
            0.0, 1.0, 0.0, -delta.y,
            0.0, 0.0, 1.0, -delta.z,
            0.0, 0.0, 0.0,  1.0,
        ),
    }
}

/// Create a transformation representing a scale.
///
/// * `x` -  Scaling factor in x-axis.
/// * `y` -  Scaling factor in y-axis.
/// * `z` -  Scaling factor in z-axis.
#[rustfmt::skip]
pub fn scale(x: Float, y: Float, z: Float) -> Transform {
    Transform {
        m: matrix4x4(
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ),
        m_inv: matrix4x4(
            1.0 / x, 0.0,     0.0,     0.0,
            0.0,     1.0 / y, 0.0,     0.0,
            0.0,     0.0,     1.0 / z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        ),
    }
}

/// Create a transformation representing rotation about the x-axis.
///
/// * `theta` -  Angle in degrees.
#[rustfmt::skip]
pub fn rotate_x(theta: Float) -> Transform {
    let r = theta.to_radians();
    let sin_theta = r.sin();
    let cos_theta = r.cos();
    let m = matrix4x4(
        1.0, 0.0,        0.0,       0.0,
        0.0, cos_theta, -sin_theta, 0.0,
        0.0, sin_theta,  cos_theta, 0.0,
        0.0, 0.0,        0.0,       1.0,
    );
    Transform { m, m_inv: m.transpose() }
}

/// Create a transformation representing rotation about the y-axis.
///
/// * `theta` -  Angle in degrees.
#[rustfmt::skip]
pub fn rotate_y(theta: Float) -> Transform {
    let r = theta.to_radians();
    let sin_theta = r.sin();
    let cos_theta = r.cos();
    let m = matrix4x4(
         cos_theta, 0.0, sin_theta, 0.0,
         0.0,       1.0, 0.0,       0.0,
        -sin_theta, 0.0, cos_theta, 0.0,
         0.0,       0.0, 0.0,       1.0,
    );
    Transform { m, m_inv: m.transpose() }
}

/// Create a transformation representing rotation about the z-axis.
///
/// * `theta` -  Angle in degrees.
#[rustfmt::skip]
pub fn rotate_z(theta: Float) -> Transform {
    let r = theta.to_radians();
    let sin_theta = r.sin();
    let cos_theta = r.cos();
    let m = matrix4x4(
        cos_theta, -sin_theta, 0.0, 0.0,
        sin_theta,  cos_theta, 0.0, 0.0,
        0.0,        0.0,       1.0, 0.0,
        0.0,        0.0,       0.0, 1.0,
    );
    Transform { m, m_inv: m.transpose() }
}

/// Generate the camera-to-world transformation for a camera at `pos` looking
/// towards `look`. Camera space has +x to the right, +y up and looks down +z.
///
/// * `pos`  - Position of camera.
/// * `look` - Position to point towards.
/// * `up`   - Used to orient the camera's viewing direction implied by `pos`
///            and `look`.
#[rustfmt::skip]
pub fn look_at(pos: &Point3f, look: &Point3f, up: &Vector3f) -> Transform {
    let dir = (*look - *pos).normalize();
    let right = up.normalize().cross(&dir).normalize();
    let new_up = dir.cross(&right);

    let camera_to_world = matrix4x4(
        right.x, new_up.x, dir.x, pos.x,
        right.y, new_up.y, dir.y, pos.y,
        right.z, new_up.z, dir.z, pos.z,
        0.0,     0.0,      0.0,   1.0,
    );

    // Rigid transform so the inverse is the transposed rotation followed by
    // the negated, rotated translation.
    let p = Vector3f::new(pos.x, pos.y, pos.z);
    let world_to_camera = matrix4x4(
        right.x,  right.y,  right.z,  -(right.x * p.x + right.y * p.y + right.z * p.z),
        new_up.x, new_up.y, new_up.z, -(new_up.x * p.x + new_up.y * p.y + new_up.z * p.z),
        dir.x,    dir.y,    dir.z,    -(dir.x * p.x + dir.y * p.y + dir.z * p.z),
        0.0,      0.0,      0.0,      1.0,
    );

    Transform {
        m: camera_to_world,
        m_inv: world_to_camera,
    }
}

impl Transform {
    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Transform {
        Transform {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Returns true if matrix is identity matrix.
    pub fn is_identity(&self) -> bool {
        self.m == IDENTITY_MATRIX
    }

    /// Applies transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let m = &self.m;
        let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];

        debug_assert!(wp != 0.0, "Transformation<Point3f>: wp is zero");

        if wp == 1.0 {
            Point3f::new(xp, yp, zp)
        } else {
            Point3f::new(xp / wp, yp / wp, zp / wp)
        }
    }

    /// Applies transformation to a given vector.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m;
        Vector3f::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Applies transformation to a given normal. Normals transform with the
    /// inverse transpose of the matrix.
    ///
    /// * `n` - The normal.
    pub fn transform_normal(&self, n: &Normal3f) -> Normal3f {
        let mi = &self.m_inv;
        Normal3f::new(
            mi[0][0] * n.x + mi[1][0] * n.y + mi[2][0] * n.z,
            mi[0][1] * n.x + mi[1][1] * n.y + mi[2][1] * n.z,
            mi[0][2] * n.x + mi[1][2] * n.y + mi[2][2] * n.z,
        )
    }

    /// Applies transformation to a given ray. The parametric extent is left
    /// unchanged so hit distances stay comparable across spaces.
    ///
    /// * `r` - The ray.
    pub fn transform_ray(&self, r: &Ray) -> Ray {
        Ray::new(
            self.transform_point(&r.o),
            self.transform_vector(&r.d),
            r.t_max,
        )
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Composes this transformation with another. The result applies `t2`
    /// first.
    ///
    /// * `t2` - The transformation to compose with.
    fn mul(self, t2: Transform) -> Self::Output {
        Transform {
            m: self.m * t2.m,
            m_inv: t2.m_inv * self.m_inv,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_point3!(point3_f, f32, -10.0..10.0f32, -10.0..10.0f32, -10.0..10.0f32);
    prop_range!(angle, f32, -360.0..360.0f32);

    fn assert_points_eq(a: Point3f, b: Point3f) {
        assert!(approx_eq!(f32, a.x, b.x, epsilon = 0.0001), "{a} != {b}");
        assert!(approx_eq!(f32, a.y, b.y, epsilon = 0.0001), "{a} != {b}");
        assert!(approx_eq!(f32, a.z, b.z, epsilon = 0.0001), "{a} != {b}");
    }

    #[test]
    fn composition_applies_right_hand_side_first() {
        let t = translate(&Vector3f::new(0.0, 4.0, 0.0)) * rotate_x(180.0);
        let p = t.transform_point(&Point3f::new(1.0, 0.0, 2.0));
        assert_points_eq(p, Point3f::new(1.0, 4.0, -2.0));
    }

    #[test]
    fn rotate_z_turns_up_into_right() {
        let n = rotate_z(-90.0).transform_normal(&Normal3f::new(0.0, 1.0, 0.0));
        assert!(approx_eq!(f32, n.x, 1.0, epsilon = 0.00001));
        assert!(approx_eq!(f32, n.y, 0.0, epsilon = 0.00001));
    }

    #[test]
    fn look_at_maps_camera_axes() {
        let pos = Point3f::new(0.0, 2.0, -6.0);
        let t = look_at(&pos, &Point3f::new(0.0, 2.0, 6.0), &Vector3f::new(0.0, 1.0, 0.0));
        assert_points_eq(t.transform_point(&Point3f::zero()), pos);
        let d = t.transform_vector(&Vector3f::new(0.0, 0.0, 1.0));
        assert!(approx_eq!(f32, d.z, 1.0, epsilon = 0.00001));
        let r = t.transform_vector(&Vector3f::new(1.0, 0.0, 0.0));
        assert!(approx_eq!(f32, r.x, 1.0, epsilon = 0.00001));
    }

    proptest! {
        #[test]
        fn inverse_undoes_transform(p in point3_f(), theta in angle(), d in point3_f()) {
            let t = translate(&Vector3f::from(d)) * rotate_y(theta) * scale(2.0, 0.5, 3.0);
            let q = t.inverse().transform_point(&t.transform_point(&p));
            prop_assert!(approx_eq!(f32, q.x, p.x, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, q.y, p.y, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, q.z, p.z, epsilon = 0.001));
        }

        #[test]
        fn look_at_inverse_round_trips(p in point3_f(), eye in point3_f()) {
            let t = look_at(&eye, &Point3f::new(0.0, 0.0, 20.0), &Vector3f::new(0.0, 1.0, 0.0));
            let q = t.inverse().transform_point(&t.transform_point(&p));
            prop_assert!(approx_eq!(f32, q.x, p.x, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, q.y, p.y, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, q.z, p.z, epsilon = 0.001));
        }
    }
}
