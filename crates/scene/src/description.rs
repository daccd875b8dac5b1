use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use wavescape_common::Transform;

use crate::error::SceneError;

/// Cube map faces used when a scene names none, in left, right, top, bottom,
/// front, back order.
pub const DEFAULT_SKYBOX: [&str; 6] = [
    "data/skybox/fluffballday/FluffballDayLeft.hdr",
    "data/skybox/fluffballday/FluffballDayRight.hdr",
    "data/skybox/fluffballday/FluffballDayTop.hdr",
    "data/skybox/fluffballday/FluffballDayBottom.hdr",
    "data/skybox/fluffballday/FluffballDayFront.hdr",
    "data/skybox/fluffballday/FluffballDayBack.hdr",
];

fn default_skybox() -> [String; 6] {
    DEFAULT_SKYBOX.map(String::from)
}

/// One model entry of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    /// Path of the model file; identical paths share one loaded model.
    pub model: String,
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles in radians.
    pub angles: Vec3,
}

impl ModelPlacement {
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            angles: self.angles,
            scale: self.scale,
        }
    }
}

/// Scene file contents.
///
/// ```json
/// { "models": [ { "model": "data/rock.obj", "position": [0, 0, 0],
///                 "scale": [1, 1, 1], "angles": [0, 0, 0] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub models: Vec<ModelPlacement>,
    #[serde(default = "default_skybox")]
    pub skybox: [String; 6],
}

impl SceneDescription {
    /// A scene holding one unit-scale model at the origin.
    pub fn single_model(path: impl Into<String>) -> Self {
        Self {
            models: vec![ModelPlacement {
                model: path.into(),
                position: Vec3::ZERO,
                scale: Vec3::ONE,
                angles: Vec3::ZERO,
            }],
            skybox: default_skybox(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let description: Self = serde_json::from_str(text)?;
        description.validate()?;
        Ok(description)
    }

    /// Load and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.models.is_empty() {
            return Err(SceneError::NoModels);
        }
        if let Some(index) = self.models.iter().position(|m| m.model.trim().is_empty()) {
            return Err(SceneError::EmptyModelPath { index });
        }
        if let Some(index) = self.skybox.iter().position(|face| face.trim().is_empty()) {
            return Err(SceneError::BadSkybox { index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_SCENE: &str = r#"{
        "models": [
            { "model": "data/models/rock/rock.obj", "position": [1, 0, -2],
              "scale": [0.5, 0.5, 0.5], "angles": [0, 1.57, 0] },
            { "model": "data/models/rock/rock.obj", "position": [-3, 0, 4],
              "scale": [1, 1, 1], "angles": [0, 0, 0] },
            { "model": "data/models/tree/tree.obj", "position": [0, 0, 0],
              "scale": [2, 2, 2], "angles": [0, 0, 0] }
        ]
    }"#;

    #[test]
    fn parses_models_and_defaults_skybox() {
        let scene = SceneDescription::from_json(WATER_SCENE).unwrap();
        assert_eq!(scene.models.len(), 3);
        assert_eq!(scene.models[0].position, Vec3::new(1.0, 0.0, -2.0));
        assert!((scene.models[0].angles.y - 1.57).abs() < 1e-6);
        assert_eq!(scene.skybox[0], DEFAULT_SKYBOX[0]);
        assert!(scene.skybox.iter().all(|f| f.ends_with(".hdr")));
    }

    #[test]
    fn placement_transform_copies_fields() {
        let scene = SceneDescription::from_json(WATER_SCENE).unwrap();
        let t = scene.models[0].transform();
        assert_eq!(t.scale, Vec3::splat(0.5));
        assert_eq!(t.position, scene.models[0].position);
    }

    #[test]
    fn empty_scene_rejected() {
        assert!(matches!(
            SceneDescription::from_json(r#"{ "models": [] }"#),
            Err(SceneError::NoModels)
        ));
    }

    #[test]
    fn missing_field_is_a_json_error() {
        let text = r#"{ "models": [ { "model": "a.obj", "position": [0, 0, 0] } ] }"#;
        assert!(matches!(
            SceneDescription::from_json(text),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn blank_skybox_face_rejected() {
        let mut scene = SceneDescription::single_model("a.obj");
        scene.skybox[4] = String::new();
        assert!(matches!(
            scene.validate(),
            Err(SceneError::BadSkybox { index: 4 })
        ));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let scene = SceneDescription::from_json(WATER_SCENE).unwrap();
        scene.save(tmp.path()).unwrap();

        let loaded = SceneDescription::load(tmp.path()).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SceneDescription::load(dir.path().join("water.json")),
            Err(SceneError::Io(_))
        ));
    }
}
