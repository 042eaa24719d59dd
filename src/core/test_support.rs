//=========================================================================
// Test Support
//=========================================================================
//
// Recording fakes shared by unit tests that assert on call ordering.
//
//=========================================================================

use std::sync::{Arc, Mutex};

use crossbeam_channel::Sender;

use crate::core::collision::{LinearIndex, Space, SpaceId, SpatialIndex};
use crate::core::globals::GlobalContext;
use crate::core::render::DrawStack;
use crate::core::ticker::{Ticker, TickerError};

pub(crate) type Journal = Arc<Mutex<Vec<&'static str>>>;

pub(crate) fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn record(journal: &Journal, entry: &'static str) {
    journal.lock().unwrap().push(entry);
}

pub(crate) fn entries(journal: &Journal) -> Vec<&'static str> {
    journal.lock().unwrap().clone()
}

//--- Drop guard ------------------------------------------------------------

/// Records `tag` when dropped. Lets a test see when a container that owns
/// it (a bus binding, an entity) is cleared.
pub(crate) struct JournalGuard {
    tag: &'static str,
    journal: Journal,
}

impl JournalGuard {
    pub(crate) fn new(tag: &'static str, journal: &Journal) -> Self {
        Self {
            tag,
            journal: Arc::clone(journal),
        }
    }
}

impl Drop for JournalGuard {
    fn drop(&mut self) {
        record(&self.journal, self.tag);
    }
}

//--- Spatial index ---------------------------------------------------------

pub(crate) struct JournalIndex {
    tag: &'static str,
    inner: LinearIndex,
    journal: Journal,
}

impl JournalIndex {
    pub(crate) fn new(tag: &'static str, journal: &Journal) -> Self {
        Self {
            tag,
            inner: LinearIndex::new(),
            journal: Arc::clone(journal),
        }
    }
}

impl SpatialIndex for JournalIndex {
    fn add(&mut self, space: Space) {
        self.inner.add(space)
    }
    fn remove(&mut self, id: SpaceId) -> Option<Space> {
        self.inner.remove(id)
    }
    fn get(&self, id: SpaceId) -> Option<&Space> {
        self.inner.get(id)
    }
    fn hits(&self, space: &Space) -> Vec<&Space> {
        self.inner.hits(space)
    }
    fn clear(&mut self) {
        record(&self.journal, self.tag);
        self.inner.clear()
    }
    fn len(&self) -> usize {
        self.inner.len()
    }
}

//--- Draw stack ------------------------------------------------------------

pub(crate) struct JournalStack {
    journal: Journal,
}

impl DrawStack for JournalStack {
    fn reset(&mut self) {
        record(&self.journal, "draw.reset");
    }
    fn pre_draw(&mut self) {
        record(&self.journal, "draw.pre_draw");
    }
    fn len(&self) -> usize {
        0
    }
}

/// Context whose indices and draw stack write to `journal`.
pub(crate) fn journaled_context(journal: &Journal) -> GlobalContext {
    GlobalContext::with_parts(
        Box::new(JournalIndex::new("collision.clear", journal)),
        Box::new(JournalIndex::new("pointer.clear", journal)),
        Box::new(JournalStack {
            journal: Arc::clone(journal),
        }),
    )
}

//--- Ticker ----------------------------------------------------------------

/// Sends exactly one tick per start.
pub(crate) struct JournalTicker {
    journal: Journal,
}

impl JournalTicker {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self {
            journal: Arc::clone(journal),
        }
    }
}

impl Ticker for JournalTicker {
    fn start(&mut self, _tps: f64, ticks: Sender<()>) -> Result<(), TickerError> {
        record(&self.journal, "ticker.start");
        let _ = ticks.try_send(());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TickerError> {
        record(&self.journal, "ticker.stop");
        Ok(())
    }
}
