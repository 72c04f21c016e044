//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::shape::*;

/// Scene.
#[derive(Clone)]
pub struct Scene {
    /// All shapes in the scene.
    pub shapes: Vec<ArcShape>,

    /// Indices into `shapes` of the emissive shapes.
    pub lights: Vec<usize>,
}

impl Scene {
    /// Creates a new `Scene`. Every emissive shape becomes a light source.
    ///
    /// * `shapes` - All shapes in the scene.
    pub fn new(shapes: Vec<ArcShape>) -> Self {
        let lights: Vec<usize> = shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_emissive())
            .map(|(i, _)| i)
            .collect();

        info!("Scene has {} shapes and {} lights", shapes.len(), lights.len());

        Self { shapes, lights }
    }

    /// Returns the light with the given index into `lights` as its shape id
    /// and the shape.
    ///
    /// * `light_num` - Index of the light.
    pub fn light(&self, light_num: usize) -> (usize, &ArcShape) {
        let shape_id = self.lights[light_num];
        (shape_id, &self.shapes[shape_id])
    }

    /// Traces the ray into the scene and returns the `SurfaceInteraction` of
    /// the nearest hit if an intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction> {
        let mut t_max = ray.t_max;
        let mut nearest = None;

        for (shape_id, shape) in self.shapes.iter().enumerate() {
            if let Some((t_hit, mut si)) = shape.intersect(&ray.with_t_max(t_max)) {
                t_max = t_hit;
                si.shape_id = shape_id;
                nearest = Some(si);
            }
        }

        nearest
    }

    /// Traces the ray into the scene and returns whether or not an
    /// intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.shapes.iter().any(|shape| shape.intersect_p(ray))
    }
}
