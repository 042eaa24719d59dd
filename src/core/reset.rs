//=========================================================================
// Reset Coordinator
//=========================================================================
//
// Tears down the transient subsystems between two scenes.
//
// Order (each step depends on the ones before it):
//   1. cancel pending delayed actions
//   2. reset the event bus         ← must precede 3: collision handlers
//   3. clear the collision index      would otherwise fire for entities
//   4. clear the pointer index        with no backing registration
//   5. clear the entity registry
//   6. reset the draw stack, then one pre_draw pass
//
// Must run with the ticker fully stopped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== ResetReport =========================================================

/// What a reset removed, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub cancelled_delays: usize,
    pub bindings: usize,
    pub collision_spaces: usize,
    pub pointer_spaces: usize,
    pub entities: usize,
}

//=== ResetCoordinator ====================================================

/// Ordered teardown of a [`GlobalContext`].
pub struct ResetCoordinator;

impl ResetCoordinator {
    /// Runs the full teardown sequence.
    pub fn reset(context: &mut GlobalContext) -> ResetReport {
        debug!("Resetting engine");

        //--- 1. Delayed actions --------------------------------------------
        let cancelled_delays = context.delays.cancel_pending();

        //--- 2. Event bus --------------------------------------------------
        let bindings = context.bus.binding_count();
        context.bus.reset();
        debug!("Event bus reset");

        //--- 3. Collision --------------------------------------------------
        let collision_spaces = context.collision.len();
        context.collision.clear();

        //--- 4. Pointer ----------------------------------------------------
        let pointer_spaces = context.pointer.len();
        context.pointer.clear();

        //--- 5. Entities ---------------------------------------------------
        let entities = context.entities.len();
        context.entities.clear();

        //--- 6. Draw stack -------------------------------------------------
        context.draw_stack.reset();
        context.draw_stack.pre_draw();

        let report = ResetReport {
            cancelled_delays,
            bindings,
            collision_spaces,
            pointer_spaces,
            entities,
        };
        debug!("Engine reset: {:?}", report);
        report
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::{Label, LinearIndex, Rect, Space};
    use crate::core::entity::{Entity, EntityId};
    use crate::core::event_bus::BindingResponse;
    use crate::core::render::LayerStack;
    use crate::core::test_support::{
        entries, journal, journaled_context, record, Journal, JournalGuard,
    };
    use crate::core::timing::DelayScheduler;
    use std::time::Duration;

    struct Dummy;

    impl Entity for Dummy {}

    /// Entity whose removal shows up in the journal.
    struct Tracked {
        _guard: JournalGuard,
    }

    impl Entity for Tracked {}

    /// Dropped with the bus. Records "delays.drained" first if no delay was
    /// still waiting at that point.
    struct BusWitness {
        delays: DelayScheduler,
        journal: Journal,
        _guard: JournalGuard,
    }

    impl Drop for BusWitness {
        fn drop(&mut self) {
            if self.delays.cancel_pending() == 0 {
                record(&self.journal, "delays.drained");
            }
        }
    }

    fn populated_context() -> GlobalContext {
        let mut context = GlobalContext::with_parts(
            Box::new(LinearIndex::new()),
            Box::new(LinearIndex::new()),
            Box::new(LayerStack::new()),
        );
        let id = context.entities.insert(Dummy);
        context.entities.insert(Dummy);
        context.collision.add(Space::for_entity(id, Rect::default(), Label(1)));
        context.pointer.add(Space::for_entity(id, Rect::default(), Label(2)));
        context.bus.bind(id, "Hit", |_, _, _| BindingResponse::Keep);
        context.bus.global_bind("Tick", |_, _, _| BindingResponse::Keep);
        context
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn reset_empties_every_subsystem() {
        let mut context = populated_context();

        ResetCoordinator::reset(&mut context);

        assert_eq!(context.entities.len(), 0);
        assert_eq!(context.collision.len(), 0);
        assert_eq!(context.pointer.len(), 0);
        assert_eq!(context.bus.binding_count(), 0);
        assert!(context.draw_stack.is_empty());
    }

    #[test]
    fn report_counts_removed_state() {
        let mut context = populated_context();

        let report = ResetCoordinator::reset(&mut context);

        assert_eq!(
            report,
            ResetReport {
                cancelled_delays: 0,
                bindings: 2,
                collision_spaces: 1,
                pointer_spaces: 1,
                entities: 2,
            }
        );
    }

    #[test]
    fn steps_run_in_order() {
        let journal = journal();
        let mut context = journaled_context(&journal);

        let _delay = context.delays.do_after(Duration::from_secs(30), || {});
        std::thread::sleep(Duration::from_millis(100));

        let id = context.entities.insert(Tracked {
            _guard: JournalGuard::new("entities.clear", &journal),
        });
        let witness = BusWitness {
            delays: context.delays.clone(),
            journal: journal.clone(),
            _guard: JournalGuard::new("bus.reset", &journal),
        };
        context.bus.bind(id, "Hit", move |_, _, _| {
            let _held = &witness;
            BindingResponse::Keep
        });

        let report = ResetCoordinator::reset(&mut context);

        assert_eq!(report.cancelled_delays, 1);
        assert_eq!(
            entries(&journal),
            vec![
                "delays.drained",
                "bus.reset",
                "collision.clear",
                "pointer.clear",
                "entities.clear",
                "draw.reset",
                "draw.pre_draw",
            ]
        );
    }

    #[test]
    fn pending_delays_are_cancelled() {
        let mut context = populated_context();
        let handle = context.delays.do_after(Duration::from_secs(30), || {});
        std::thread::sleep(Duration::from_millis(100));

        let report = ResetCoordinator::reset(&mut context);

        assert_eq!(report.cancelled_delays, 1);
        assert!(!handle.join().unwrap());
    }

    #[test]
    fn reset_of_empty_context_is_harmless() {
        let mut context = GlobalContext::new();
        let report = ResetCoordinator::reset(&mut context);
        assert_eq!(report, ResetReport::default());
        assert!(!context.bus.is_bound(EntityId(1), "Hit"));
    }
}
