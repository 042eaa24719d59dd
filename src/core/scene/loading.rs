//=========================================================================
// Loading Scene
//=========================================================================
//
// Built-in scene shown while the application loads. Keeps ticking until
// the loaded signal arrives (or its sender is dropped), then ends into
// the configured first scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::info;

//=== Internal Dependencies ===============================================

use super::{Scene, SceneContext, SceneResult};
use crate::core::globals::GlobalContext;

//=== LoadingScene ========================================================

pub struct LoadingScene {
    first: String,
    loaded: Receiver<()>,
}

impl LoadingScene {
    /// `first` runs once `loaded` fires or disconnects.
    pub fn new(first: impl Into<String>, loaded: Receiver<()>) -> Self {
        Self {
            first: first.into(),
            loaded,
        }
    }
}

impl Scene for LoadingScene {
    fn start(&self, _context: SceneContext) {
        info!("Loading, first scene is {}", self.first);
    }

    fn update(&self, _context: &mut GlobalContext) -> bool {
        match self.loaded.try_recv() {
            Err(TryRecvError::Empty) => true,
            Ok(()) | Err(TryRecvError::Disconnected) => false,
        }
    }

    fn end(&self) -> (String, Option<SceneResult>) {
        (self.first.clone(), None)
    }
}

//=========================================================================
// Tests
//=========================================================================
