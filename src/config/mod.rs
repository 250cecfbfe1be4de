use std::path::Path;

use serde::Deserialize;

use crate::animation::PathShape;
use crate::error::{ConfigError, Result};
use crate::math::{Point3, Vector3};
use crate::scene::{Light, MeshRef, Scene, SceneObject};

/// Top-level scene configuration, as stored in `sceneConfig.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    /// Objects to instantiate, in draw order.
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
    /// Scene light; the previous light is kept when absent.
    pub light: Option<LightConfig>,
    /// Initial camera; the previous camera is kept when absent.
    pub camera: Option<CameraConfig>,
}

/// One object entry of the scene configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectConfig {
    /// Wavefront OBJ file path.
    pub obj_file: String,
    /// Texture image path.
    pub texture_file: String,
    /// MTL material file path.
    pub mtl_file: String,
    /// Initial world position.
    pub position: [f64; 3],
    /// Per-axis scale.
    pub scale: [f64; 3],
    /// Spin axis for the continuous-rotation toggle.
    pub rotation: [f64; 3],
    /// Path-shape selector: `"infinity"`, `"circle"`, or absent for a
    /// static object. Unrecognized values are ignored with a warning.
    #[serde(default)]
    pub curve_animation: Option<String>,
}

/// Light section of the scene configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightConfig {
    /// World-space light position.
    pub light_pos: [f64; 3],
    /// RGB light color.
    pub light_color: [f64; 3],
}

impl LightConfig {
    /// Light position as a point.
    #[must_use]
    pub fn position(&self) -> Point3 {
        point3(self.light_pos)
    }

    /// Light color as a vector.
    #[must_use]
    pub fn color(&self) -> Vector3 {
        vector3(self.light_color)
    }
}

/// Camera section of the scene configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    /// Camera position.
    pub camera_pos: [f64; 3],
    /// Initial view direction.
    pub camera_front: [f64; 3],
    /// Up vector.
    pub camera_up: [f64; 3],
}

impl CameraConfig {
    /// Camera position as a point.
    #[must_use]
    pub fn position(&self) -> Point3 {
        point3(self.camera_pos)
    }

    /// View direction as a vector.
    #[must_use]
    pub fn front(&self) -> Vector3 {
        vector3(self.camera_front)
    }

    /// Up direction as a vector.
    #[must_use]
    pub fn up(&self) -> Vector3 {
        vector3(self.camera_up)
    }
}

impl SceneConfig {
    /// Parses a scene configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or does not match
    /// the schema.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Json)?;
        Ok(config)
    }

    /// Loads a scene configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            objects = config.objects.len(),
            "scene config loaded"
        );
        Ok(config)
    }
}

/// Builds a scene from its configuration.
///
/// `now` (seconds) stamps every attached curve animation, so all objects
/// share one attachment instant. Each animated object generates its own
/// curve; unknown animation selectors leave the object static.
#[must_use]
pub fn build_scene(config: &SceneConfig, now: f64) -> Scene {
    let mut scene = Scene::new();

    for entry in &config.objects {
        let mesh = MeshRef::new(
            entry.obj_file.as_str(),
            entry.texture_file.as_str(),
            entry.mtl_file.as_str(),
        );
        let mut object = SceneObject::new(mesh);
        object.position = point3(entry.position);
        object.scale = vector3(entry.scale);
        object.spin_axis = vector3(entry.rotation);

        if let Some(selector) = &entry.curve_animation {
            if let Some(shape) = PathShape::parse(selector) {
                object.attach_path(shape, now);
            } else {
                tracing::warn!(
                    selector = selector.as_str(),
                    obj = entry.obj_file.as_str(),
                    "unknown curve animation selector, object stays static"
                );
            }
        }

        scene.add_object(object);
    }

    if let Some(light) = &config.light {
        scene.light = Light {
            position: light.position(),
            color: light.color(),
        };
    }

    tracing::debug!(objects = scene.len(), "scene built");
    scene
}

fn point3(v: [f64; 3]) -> Point3 {
    Point3::new(v[0], v[1], v[2])
}

fn vector3(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::animation::CURVE_SAMPLE_COUNT;
    use crate::math::TOLERANCE;

    const FULL_CONFIG: &str = r#"{
        "objects": [
            {
                "objFile": "assets/ship.obj",
                "textureFile": "assets/ship.png",
                "mtlFile": "assets/ship.mtl",
                "position": [0.0, 1.0, -2.0],
                "scale": [0.5, 0.5, 0.5],
                "rotation": [0.0, 1.0, 0.0],
                "curveAnimation": "infinity"
            },
            {
                "objFile": "assets/rock.obj",
                "textureFile": "assets/rock.jpg",
                "mtlFile": "assets/rock.mtl",
                "position": [3.0, 0.0, 0.0],
                "scale": [1.0, 1.0, 1.0],
                "rotation": [0.0, 0.0, 0.0]
            }
        ],
        "light": {
            "lightPos": [2.0, 10.0, 2.0],
            "lightColor": [1.0, 0.9, 0.8]
        },
        "camera": {
            "cameraPos": [0.0, 0.0, 10.0],
            "cameraFront": [0.0, 0.0, -1.0],
            "cameraUp": [0.0, 1.0, 0.0]
        }
    }"#;

    #[test]
    fn parses_full_schema() {
        let config = SceneConfig::from_json(FULL_CONFIG).unwrap();
        assert_eq!(config.objects.len(), 2);
        assert_eq!(config.objects[0].curve_animation.as_deref(), Some("infinity"));
        assert_eq!(config.objects[1].curve_animation, None);

        let light = config.light.unwrap();
        assert!((light.position() - Point3::new(2.0, 10.0, 2.0)).norm() < TOLERANCE);

        let camera = config.camera.unwrap();
        assert!((camera.front() - Vector3::new(0.0, 0.0, -1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn sections_are_optional() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert!(config.objects.is_empty());
        assert!(config.light.is_none());
        assert!(config.camera.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneConfig::from_json("{ not json").is_err());
        assert!(SceneConfig::from_json(r#"{"objects": 3}"#).is_err());
    }

    #[test]
    fn build_attaches_animations() {
        let config = SceneConfig::from_json(FULL_CONFIG).unwrap();
        let scene = build_scene(&config, 0.0);

        let animated = scene.object(scene.object_at(0).unwrap()).unwrap();
        let animation = animated.animation().unwrap();
        assert_eq!(animation.curve().curve_points().len(), CURVE_SAMPLE_COUNT + 1);

        let fixed = scene.object(scene.object_at(1).unwrap()).unwrap();
        assert!(fixed.animation().is_none());
        assert!((fixed.position - Point3::new(3.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn build_applies_light() {
        let config = SceneConfig::from_json(FULL_CONFIG).unwrap();
        let scene = build_scene(&config, 0.0);
        assert!((scene.light.position - Point3::new(2.0, 10.0, 2.0)).norm() < TOLERANCE);
        assert!((scene.light.color - Vector3::new(1.0, 0.9, 0.8)).norm() < TOLERANCE);
    }

    #[test]
    fn unknown_selector_leaves_object_static() {
        let text = r#"{
            "objects": [{
                "objFile": "a.obj", "textureFile": "a.png", "mtlFile": "a.mtl",
                "position": [0, 0, 0], "scale": [1, 1, 1], "rotation": [0, 0, 0],
                "curveAnimation": "spiral"
            }]
        }"#;
        let config = SceneConfig::from_json(text).unwrap();
        let scene = build_scene(&config, 0.0);
        let object = scene.object(scene.object_at(0).unwrap()).unwrap();
        assert!(object.animation().is_none());
    }

    #[test]
    fn animated_objects_get_their_own_curves() {
        let text = r#"{
            "objects": [
                {
                    "objFile": "a.obj", "textureFile": "a.png", "mtlFile": "a.mtl",
                    "position": [0, 0, 0], "scale": [1, 1, 1], "rotation": [0, 0, 0],
                    "curveAnimation": "circle"
                },
                {
                    "objFile": "b.obj", "textureFile": "b.png", "mtlFile": "b.mtl",
                    "position": [0, 0, 0], "scale": [1, 1, 1], "rotation": [0, 0, 0],
                    "curveAnimation": "circle"
                }
            ]
        }"#;
        let config = SceneConfig::from_json(text).unwrap();
        let scene = build_scene(&config, 0.0);

        let first = scene.object(scene.object_at(0).unwrap()).unwrap();
        let second = scene.object(scene.object_at(1).unwrap()).unwrap();
        let a = first.animation().unwrap().curve();
        let b = second.animation().unwrap().curve();
        assert_eq!(a, b);
        assert_ne!(a.curve_points().as_ptr(), b.curve_points().as_ptr());
    }
}
