//! Geometry

#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Point3<$t> {
                Point3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

/// Returns a unit vector with the given spherical components.
#[cfg(test)]
#[macro_export]
macro_rules! prop_unit_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(
                cos_theta in -1.0f32..1.0f32,
                phi in 0.0f32..$crate::pbrt::TWO_PI,
            ) -> Vector3f {
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
            }
        }
    };
}

mod bounds2;
mod common;
mod matrix4x4;
mod normal;
mod point2;
mod point3;
mod ray;
mod transform;
mod vector3;

// Re-export
pub use crate::pbrt::{abs, max, min, Float, Int};
pub use bounds2::*;
pub use common::*;
pub use matrix4x4::*;
pub use normal::*;
pub use point2::*;
pub use point3::*;
pub use ray::*;
pub use transform::*;
pub use vector3::*;
