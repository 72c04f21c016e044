//! Cornell box scene.

use cameras::PerspectiveCamera;
use lux_core::geometry::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::scene::*;
use lux_core::shape::*;
use lux_core::spectrum::*;
use materials::{MatteMaterial, MirrorMaterial};
use shapes::{Sphere, Triangle};
use std::sync::Arc;

/// Width, height and depth of the box.
const BOX_WIDTH: Float = 4.0;

/// Half of `BOX_WIDTH`.
const HALF_BOX_WIDTH: Float = BOX_WIDTH / 2.0;

/// Radius of the diffuse and mirror spheres.
const SPHERE_RADIUS: Float = 0.7;

/// Radius of the spherical light.
const LIGHT_RADIUS: Float = 0.18;

/// Emitted radiance of the light.
const LIGHT_RADIANCE: Float = 115.0;

/// Vertical field of view in degrees.
const FOV: Float = 51.3;

/// Returns the two triangles of a wall. In object space the wall is the
/// square floor of the box facing +y.
///
/// * `object_to_world` - Places the wall.
/// * `material`        - Material of the wall.
fn wall(object_to_world: Transform, material: &ArcMaterial) -> [ArcShape; 2] {
    let floor = [
        Point3f::new(HALF_BOX_WIDTH, 0.0, -HALF_BOX_WIDTH),
        Point3f::new(-HALF_BOX_WIDTH, 0.0, -HALF_BOX_WIDTH),
        Point3f::new(-HALF_BOX_WIDTH, 0.0, HALF_BOX_WIDTH),
        Point3f::new(HALF_BOX_WIDTH, 0.0, HALF_BOX_WIDTH),
    ];

    [
        Arc::new(Triangle::new(
            object_to_world,
            [floor[0], floor[1], floor[2]],
            Arc::clone(material),
            Spectrum::zero(),
        )),
        Arc::new(Triangle::new(
            object_to_world,
            [floor[2], floor[3], floor[0]],
            Arc::clone(material),
            Spectrum::zero(),
        )),
    ]
}

fn sphere(center: Vector3f, radius: Float, material: ArcMaterial, l_emit: Spectrum) -> ArcShape {
    Arc::new(Sphere::new(translate(&center), radius, material, l_emit))
}

/// Builds the Cornell box with a spherical light below the ceiling, a
/// diffuse sphere and a mirror sphere.
pub fn scene() -> Scene {
    let white: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.75)));
    let red: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.75, 0.25, 0.25)));
    let blue: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.25, 0.25, 0.75)));
    let bright: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::one()));
    let mirror: ArcMaterial = Arc::new(MirrorMaterial::new(Spectrum::new(0.999)));

    let walls = [
        // Floor.
        (Transform::default(), &white),
        // Ceiling.
        (
            translate(&Vector3f::new(0.0, BOX_WIDTH, 0.0)) * rotate_x(180.0),
            &white,
        ),
        // Left.
        (
            translate(&Vector3f::new(-HALF_BOX_WIDTH, HALF_BOX_WIDTH, 0.0)) * rotate_z(-90.0),
            &red,
        ),
        // Right.
        (
            translate(&Vector3f::new(HALF_BOX_WIDTH, HALF_BOX_WIDTH, 0.0)) * rotate_z(90.0),
            &blue,
        ),
        // Back.
        (
            translate(&Vector3f::new(0.0, HALF_BOX_WIDTH, HALF_BOX_WIDTH)) * rotate_x(-90.0),
            &white,
        ),
    ];

    let mut shapes: Vec<ArcShape> = walls
        .iter()
        .flat_map(|(object_to_world, material)| wall(*object_to_world, material))
        .collect();

    shapes.push(sphere(
        Vector3f::new(0.0, BOX_WIDTH - LIGHT_RADIUS * 1.6, 0.0),
        LIGHT_RADIUS,
        Arc::clone(&bright),
        Spectrum::new(LIGHT_RADIANCE),
    ));
    shapes.push(sphere(
        Vector3f::new(1.0, SPHERE_RADIUS, 0.0),
        SPHERE_RADIUS,
        bright,
        Spectrum::zero(),
    ));
    shapes.push(sphere(
        Vector3f::new(-0.8, SPHERE_RADIUS, HALF_BOX_WIDTH * 0.5),
        SPHERE_RADIUS,
        mirror,
        Spectrum::zero(),
    ));

    Scene::new(shapes)
}

/// Returns a pinhole camera looking into the open side of the box.
///
/// * `resolution` - Image resolution in pixels.
pub fn camera(resolution: Point2i) -> PerspectiveCamera {
    let eye = Point3f::new(0.0, BOX_WIDTH * 0.56, -HALF_BOX_WIDTH - 3.8);
    let look = Point3f::new(0.0, BOX_WIDTH * 0.52, HALF_BOX_WIDTH + 3.8);
    let camera_to_world = look_at(&eye, &look, &Vector3f::new(0.0, 1.0, 0.0));
    PerspectiveCamera::pinhole(camera_to_world, resolution, FOV)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::camera::*;

    #[test]
    fn box_has_one_light() {
        let scene = scene();
        assert_eq!(scene.shapes.len(), 13);
        assert_eq!(scene.lights.len(), 1);
    }

    #[test]
    fn walls_face_inwards() {
        let scene = scene();
        let center = Point3f::new(0.0, HALF_BOX_WIDTH, 0.0);
        for shape in scene.shapes.iter().take(10) {
            let (p, n) = shape.sample_area(&Point2f::new(0.3, 0.3));
            assert!(n.dot(&(center - p)) > 0.0, "wall at {p:?} faces outwards");
        }
    }

    #[test]
    fn center_ray_hits_back_wall() {
        let scene = scene();
        let camera = camera(Point2i::new(64, 64));
        let ray = camera.generate_ray(&CameraSample::new(
            Point2f::new(32.0, 32.0),
            Point2f::new(0.5, 0.5),
        ));
        let si = scene.intersect(&ray).expect("center ray should hit the box");
        assert!((si.p.z - HALF_BOX_WIDTH).abs() < 0.001);
    }
}
