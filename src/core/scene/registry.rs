//=========================================================================
// Scene Registry
//=========================================================================
//
// Named scene definitions. Scenes are registered once and never replaced.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== SceneError ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A scene with this name exists. The existing scene was kept.
    AlreadyRegistered(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered(name) => write!(f, "Scene '{}' is already registered", name),
        }
    }
}

impl std::error::Error for SceneError {}

//=== SceneRegistry =======================================================

/// Name → scene table.
#[derive(Default)]
pub struct SceneRegistry {
    scenes: HashMap<String, Arc<dyn Scene>>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scene under `name`.
    ///
    /// ```rust
    /// # use aetheric_stage::prelude::*;
    /// let mut scenes = SceneRegistry::new();
    /// scenes.register("menu", FnScene::new(|| ("menu".to_string(), None))).unwrap();
    /// assert!(scenes.register("menu", FnScene::new(|| ("x".to_string(), None))).is_err());
    /// ```
    pub fn register<T>(&mut self, name: &str, scene: T) -> Result<(), SceneError>
    where
        T: Scene + 'static,
    {
        if self.scenes.contains_key(name) {
            return Err(SceneError::AlreadyRegistered(name.to_string()));
        }
        debug!("Registered scene {}", name);
        self.scenes.insert(name.to_string(), Arc::new(scene));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Scene>> {
        self.scenes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::FnScene;

    fn named(next: &'static str) -> FnScene {
        FnScene::new(move || (next.to_string(), None))
    }

    #[test]
    fn duplicate_registration_keeps_first_scene() {
        let mut scenes = SceneRegistry::new();
        scenes.register("menu", named("game")).unwrap();

        assert_eq!(
            scenes.register("menu", named("credits")),
            Err(SceneError::AlreadyRegistered("menu".into()))
        );
        let (next, _) = scenes.get("menu").unwrap().end();
        assert_eq!(next, "game");
    }

    #[test]
    fn lookup_and_names() {
        let mut scenes = SceneRegistry::new();
        assert!(scenes.is_empty());
        scenes.register("menu", named("game")).unwrap();
        scenes.register("game", named("menu")).unwrap();

        assert!(scenes.contains("game"));
        assert!(scenes.get("credits").is_none());
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes.names(), vec!["game", "menu"]);
    }
}
