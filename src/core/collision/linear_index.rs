//=========================================================================
// Linear Index
//=========================================================================
//
// Brute-force SpatialIndex: every hit query scans all stored spaces.
// Adequate for small scenes and as the reference behavior in tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{Space, SpaceId, SpatialIndex};

//=== LinearIndex =========================================================

/// Spatial index backed by a plain map with O(n) hit queries.
#[derive(Debug, Default)]
pub struct LinearIndex {
    spaces: HashMap<SpaceId, Space>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for LinearIndex {
    fn add(&mut self, space: Space) {
        self.spaces.insert(space.id, space);
    }

    fn remove(&mut self, id: SpaceId) -> Option<Space> {
        self.spaces.remove(&id)
    }

    fn get(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.get(&id)
    }

    fn hits(&self, space: &Space) -> Vec<&Space> {
        self.spaces
            .values()
            .filter(|other| other.id != space.id && other.bounds.intersects(&space.bounds))
            .collect()
    }

    fn clear(&mut self) {
        self.spaces.clear();
    }

    fn len(&self) -> usize {
        self.spaces.len()
    }
}

//=========================================================================
// Tests
//=========================================================================
