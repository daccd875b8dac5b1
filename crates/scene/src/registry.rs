use std::collections::BTreeMap;

use wavescape_render::ModelId;

/// Model paths deduplicated into handles.
///
/// Handles are assigned in first-registration order, so the same scene file
/// always yields the same ids.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelId>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `path`, registering it on first sight.
    pub fn register(&mut self, path: &str) -> ModelId {
        let next = ModelId(self.models.len() as u32);
        *self.models.entry(path.to_owned()).or_insert(next)
    }

    pub fn get(&self, path: &str) -> Option<ModelId> {
        self.models.get(path).copied()
    }

    /// Number of distinct models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// `(path, id)` pairs ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModelId)> {
        self.models.iter().map(|(path, id)| (path.as_str(), *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_same_id() {
        let mut registry = ModelRegistry::new();
        let rock = registry.register("rock.obj");
        let tree = registry.register("tree.obj");
        assert_eq!(registry.register("rock.obj"), rock);
        assert_ne!(rock, tree);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("tree.obj"), Some(tree));
        assert_eq!(registry.get("bush.obj"), None);
    }

    #[test]
    fn ids_follow_first_registration() {
        let mut registry = ModelRegistry::new();
        assert_eq!(registry.register("z.obj"), ModelId(0));
        assert_eq!(registry.register("a.obj"), ModelId(1));
        let listed: Vec<(&str, ModelId)> = registry.iter().collect();
        assert_eq!(listed, vec![("a.obj", ModelId(1)), ("z.obj", ModelId(0))]);
    }
}
