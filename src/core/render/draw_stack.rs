//=========================================================================
// Draw Stack
//=========================================================================
//
// Layered list of renderables for the current scene.
//
// Architecture:
//   add(layer, r) → staged
//   pre_draw()    → staged moved into BTreeMap<layer, Vec<_>>
//   draw()        → layers ascending (back to front), insertion order within
//   reset()       → everything dropped
//
// Staging lets scene setup add renderables without disturbing a frame
// that is already being drawn.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::Viewport;

//=== Renderable ==========================================================

/// Something the render loop can draw. Rasterization is up to the
/// implementor.
pub trait Renderable: Send {
    fn draw(&self, viewport: &Viewport);
}

//=== DrawStack Trait =====================================================

/// Boundary used by the reset path.
pub trait DrawStack: Send {
    /// Drops every renderable, staged or committed.
    fn reset(&mut self);

    /// Commits staged renderables so the next frame sees them.
    fn pre_draw(&mut self);

    /// Number of committed renderables.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//=== LayerStack ==========================================================

/// Default [`DrawStack`]: renderables grouped by integer layer.
#[derive(Default)]
pub struct LayerStack {
    staged: Vec<(i32, Box<dyn Renderable>)>,
    layers: BTreeMap<i32, Vec<Box<dyn Renderable>>>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a renderable on `layer`. It is drawn after the next
    /// [`DrawStack::pre_draw`].
    pub fn add<R: Renderable + 'static>(&mut self, layer: i32, renderable: R) {
        self.staged.push((layer, Box::new(renderable)));
    }

    /// Number of renderables waiting for `pre_draw`.
    pub fn staged(&self) -> usize {
        self.staged.len()
    }

    /// Draws every committed renderable back to front.
    pub fn draw(&self, viewport: &Viewport) {
        for renderable in self.layers.values().flatten() {
            renderable.draw(viewport);
        }
    }
}

impl DrawStack for LayerStack {
    fn reset(&mut self) {
        debug!(
            "Resetting draw stack ({} committed, {} staged)",
            self.len(),
            self.staged.len()
        );
        self.staged.clear();
        self.layers.clear();
    }

    fn pre_draw(&mut self) {
        for (layer, renderable) in self.staged.drain(..) {
            self.layers.entry(layer).or_default().push(renderable);
        }
    }

    fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }
}

//=========================================================================
// Tests
//=========================================================================
