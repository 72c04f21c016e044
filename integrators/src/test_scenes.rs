//! Small scenes shared by the integrator tests.

use lux_core::geometry::*;
use lux_core::pbrt::*;
use lux_core::scene::*;
use lux_core::shape::*;
use lux_core::spectrum::*;
use materials::MatteMaterial;
use shapes::{Sphere, Triangle};
use std::sync::Arc;

/// Emitted radiance of the light above the floor.
pub const LIGHT_RADIANCE: Float = 10.0;

/// Emitted radiance of the light inside the closed box.
pub const BOX_LIGHT_RADIANCE: Float = 5.0;

/// Floor reflectance.
pub const ALBEDO: Float = 0.5;

/// Two triangles spanning [-s, s] x [-s, s] in the y = 0 plane facing +y.
fn quad(object_to_world: Transform, s: Float) -> Vec<ArcShape> {
    let p0 = Point3f::new(-s, 0.0, -s);
    let p1 = Point3f::new(-s, 0.0, s);
    let p2 = Point3f::new(s, 0.0, s);
    let p3 = Point3f::new(s, 0.0, -s);
    let material = Arc::new(MatteMaterial::new(Spectrum::new(ALBEDO)));

    vec![
        Arc::new(Triangle::new(
            object_to_world,
            [p0, p1, p2],
            material.clone(),
            Spectrum::zero(),
        )),
        Arc::new(Triangle::new(
            object_to_world,
            [p0, p2, p3],
            material,
            Spectrum::zero(),
        )),
    ]
}

fn light(center: Vector3f, radius: Float, l_emit: Float) -> ArcShape {
    Arc::new(Sphere::new(
        translate(&center),
        radius,
        Arc::new(MatteMaterial::new(Spectrum::zero())),
        Spectrum::new(l_emit),
    ))
}

/// A large diffuse floor without any light.
pub fn unlit_floor() -> Scene {
    Scene::new(quad(Transform::default(), 10.0))
}

/// A large diffuse floor lit by a sphere of radius 0.5 centered 2 units above
/// the origin.
pub fn lit_floor() -> Scene {
    let mut shapes = quad(Transform::default(), 10.0);
    shapes.push(light(Vector3f::new(0.0, 2.0, 0.0), 0.5, LIGHT_RADIANCE));
    Scene::new(shapes)
}

/// The inside of the cube [-1, 1]^3 with a small spherical light.
pub fn closed_box() -> Scene {
    let floor = translate(&Vector3f::new(0.0, -1.0, 0.0));
    let mut shapes: Vec<ArcShape> = [
        Transform::default(),
        rotate_x(180.0),
        rotate_x(90.0),
        rotate_x(-90.0),
        rotate_z(90.0),
        rotate_z(-90.0),
    ]
    .iter()
    .flat_map(|r| quad(*r * floor, 1.0))
    .collect();

    shapes.push(light(Vector3f::new(0.0, 0.5, 0.0), 0.1, BOX_LIGHT_RADIANCE));
    Scene::new(shapes)
}
