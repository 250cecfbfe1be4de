use std::path::PathBuf;

use nalgebra::{Rotation3, Unit};
use slotmap::SlotMap;

use crate::animation::{PathAnimation, PathShape};
use crate::error::SceneError;
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for an object in the scene.
    pub struct ObjectId;
}

/// Asset paths for an object's mesh, texture, and material definition.
///
/// Parsing these files and uploading GPU buffers happens in the external
/// asset loader; the scene only carries the references.
#[derive(Debug, Clone, Default)]
pub struct MeshRef {
    /// Wavefront OBJ file path.
    pub obj: PathBuf,
    /// Texture image path.
    pub texture: PathBuf,
    /// MTL material file path.
    pub mtl: PathBuf,
}

impl MeshRef {
    /// Creates a mesh reference from the three asset paths.
    #[must_use]
    pub fn new(
        obj: impl Into<PathBuf>,
        texture: impl Into<PathBuf>,
        mtl: impl Into<PathBuf>,
    ) -> Self {
        Self {
            obj: obj.into(),
            texture: texture.into(),
            mtl: mtl.into(),
        }
    }
}

/// Phong reflection coefficients for an object's surface.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Ambient coefficient (ka).
    pub ambient: f64,
    /// Diffuse coefficient (kd).
    pub diffuse: f64,
    /// Specular coefficient (ks).
    pub specular: f64,
    /// Specular exponent (q).
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse: 1.0,
            specular: 1.0,
            shininess: 10.0,
        }
    }
}

/// Point light illuminating the scene.
#[derive(Debug, Clone)]
pub struct Light {
    /// World-space light position.
    pub position: Point3,
    /// RGB light color.
    pub color: Vector3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            color: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A textured mesh instance in the scene.
///
/// Owns its transform state and, optionally, the curve animation driving
/// its position and heading. Each animated object holds its own curve;
/// track data is never shared between objects.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Asset references resolved by the external loader.
    pub mesh: MeshRef,
    /// World-space position, written by the path animation when present.
    pub position: Point3,
    /// Per-axis scale factors.
    pub scale: Vector3,
    /// Spin axis for the continuous rotation toggle; zero means no spin.
    pub spin_axis: Vector3,
    /// Phong surface coefficients.
    pub material: Material,
    animation: Option<PathAnimation>,
}

impl SceneObject {
    /// Creates a static object at the origin with unit scale.
    #[must_use]
    pub fn new(mesh: MeshRef) -> Self {
        Self {
            mesh,
            position: Point3::origin(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            spin_axis: Vector3::zeros(),
            material: Material::default(),
            animation: None,
        }
    }

    /// Attaches a curve animation, generating a fresh track for this
    /// object and bootstrapping the heading from its current position.
    pub fn attach_path(&mut self, shape: PathShape, now: f64) {
        let curve = shape.build_curve();
        self.animation = Some(PathAnimation::new(curve, &self.position, now));
    }

    /// Returns the animation state, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&PathAnimation> {
        self.animation.as_ref()
    }

    /// Returns the current forward heading in radians, if animated.
    #[must_use]
    pub fn heading(&self) -> Option<f64> {
        self.animation.as_ref().map(PathAnimation::heading)
    }

    /// Advances the path animation for this frame; static objects keep
    /// their position.
    pub fn animate(&mut self, now: f64) {
        if let Some(animation) = &mut self.animation {
            animation.advance(&mut self.position, now);
        }
    }

    /// Builds the model matrix: translate, then scale, then (when a spin
    /// axis is set) rotate by `spin_angle` about it.
    #[must_use]
    pub fn model_matrix(&self, spin_angle: f64) -> Matrix4 {
        let mut model = Matrix4::new_translation(&self.position.coords)
            * Matrix4::new_nonuniform_scaling(&self.scale);
        if self.spin_axis.norm() > TOLERANCE {
            let axis = Unit::new_normalize(self.spin_axis);
            model *= Rotation3::from_axis_angle(&axis, spin_angle).to_homogeneous();
        }
        model
    }
}

/// Central arena that owns all scene objects.
///
/// Objects reference each other via generational IDs, and draw order is
/// kept explicitly so selection slots and rendering stay deterministic.
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    draw_order: Vec<ObjectId>,
    /// The scene's point light.
    pub light: Light,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object and returns its ID.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.draw_order.push(id);
        id
    }

    /// Returns a reference to an object, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::ObjectNotFound("object".into()))
    }

    /// Returns a mutable reference to an object, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound("object".into()))
    }

    /// Returns the ID of the object at the given draw-order position.
    #[must_use]
    pub fn object_at(&self, ordinal: usize) -> Option<ObjectId> {
        self.draw_order.get(ordinal).copied()
    }

    /// Iterates objects in draw order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.draw_order
            .iter()
            .filter_map(|id| self.objects.get(*id).map(|object| (*id, object)))
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Advances every animated object using one shared frame timestamp.
    pub fn animate_all(&mut self, now: f64) {
        for object in self.objects.values_mut() {
            object.animate(now);
        }
    }
}
