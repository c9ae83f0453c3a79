//! Lifecycle ordering driven through the world
//!
//! A probe component records every hook it receives into a shared log, so the
//! tests can assert the exact sequence the container produces.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use super::SharedSink;
use crate::assets::ResourceManager;
use crate::ecs::{
    Component, ComponentError, DebugDump, HookContext, Lifecycle, LifecycleError, LifecycleFlags, LifecycleHook, World,
};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink, MemorySink};
use crate::foundation::math::Transform2D;

type HookLog = Rc<RefCell<Vec<String>>>;

struct Probe {
    label: &'static str,
    log: HookLog,
    fail_on: Option<LifecycleHook>,
}

impl Probe {
    fn new(label: &'static str, log: &HookLog) -> Self {
        Self {
            label,
            log: Rc::clone(log),
            fail_on: None,
        }
    }

    fn failing_on(mut self, hook: LifecycleHook) -> Self {
        self.fail_on = Some(hook);
        self
    }

    fn note(&self, hook: LifecycleHook) -> Result<(), ComponentError> {
        if self.fail_on == Some(hook) {
            return Err(ComponentError::InvalidState("probe failure"));
        }
        self.log.borrow_mut().push(format!("{}:{}", self.label, hook));
        Ok(())
    }
}

impl Lifecycle for Probe {
    fn on_instantiated(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Instantiated)
    }

    fn on_initialize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::InitializeState)
    }

    fn on_finalize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::FinalizeState)
    }

    fn on_enable(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Enable)
    }

    fn on_disable(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Disable)
    }

    fn on_activate_in_hierarchy(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::ActivateInHierarchy)
    }

    fn on_deactivate_in_hierarchy(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::DeactivateInHierarchy)
    }

    fn on_paused(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Paused)
    }

    fn on_unpaused(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Unpaused)
    }

    fn on_delete(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.note(LifecycleHook::Delete)
    }
}

impl DebugDump for Probe {
    fn debug_log_component_data(&self, _resources: &ResourceManager, origin: DiagnosticOrigin, sink: &mut dyn DiagnosticSink) {
        sink.record(origin, format_args!("probe {} saw {} hooks", self.label, self.log.borrow().len()));
    }
}

impl Component for Probe {
    fn type_name(&self) -> &'static str {
        "Probe"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn entries(log: &HookLog) -> Vec<String> {
    log.borrow().clone()
}

fn labelled(label: &str, hooks: &[LifecycleHook]) -> Vec<String> {
    hooks.iter().map(|hook| format!("{label}:{hook}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hook_sequence() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();

        world.begin_state().unwrap();
        world.set_paused(true).unwrap();
        world.set_paused(false).unwrap();
        world.end_state().unwrap();
        world.remove_component(probe).unwrap();

        assert_eq!(
            entries(&log),
            labelled(
                "p",
                &[
                    LifecycleHook::Instantiated,
                    LifecycleHook::InitializeState,
                    LifecycleHook::Enable,
                    LifecycleHook::ActivateInHierarchy,
                    LifecycleHook::Paused,
                    LifecycleHook::Unpaused,
                    LifecycleHook::DeactivateInHierarchy,
                    LifecycleHook::Disable,
                    LifecycleHook::FinalizeState,
                    LifecycleHook::Delete,
                ]
            )
        );
        assert!(world.components().is_empty());
        assert!(world.object(object).unwrap().components().is_empty());
    }

    #[test]
    fn test_ids_increase_in_attachment_order() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());

        let first = world.add_component(object, Box::new(Probe::new("a", &log))).unwrap();
        let second = world.add_component(object, Box::new(Probe::new("b", &log))).unwrap();

        assert!(world.component_id(first).unwrap() < world.component_id(second).unwrap());
    }

    #[test]
    fn test_initialize_runs_before_any_enable() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        world.add_component(object, Box::new(Probe::new("a", &log))).unwrap();
        world.add_component(object, Box::new(Probe::new("b", &log))).unwrap();
        log.borrow_mut().clear();

        world.begin_state().unwrap();

        assert_eq!(
            entries(&log)[..2],
            ["a:on_initialize_state".to_string(), "b:on_initialize_state".to_string()]
        );
    }

    #[test]
    fn test_failing_instantiation_detaches_component() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());

        let result = world.add_component(
            object,
            Box::new(Probe::new("p", &log).failing_on(LifecycleHook::Instantiated)),
        );

        assert_eq!(result, Err(ComponentError::InvalidState("probe failure")));
        assert!(world.components().is_empty());
        assert!(world.object(object).unwrap().components().is_empty());
    }

    #[test]
    fn test_failing_hook_stops_begin_state() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world
            .add_component(object, Box::new(Probe::new("p", &log).failing_on(LifecycleHook::Enable)))
            .unwrap();

        assert!(world.begin_state().is_err());

        let flags = world.lifecycle_flags(probe).unwrap();
        assert!(flags.is_state_initialized());
        assert!(!flags.is_enabled());
        assert!(!flags.is_active_in_hierarchy());
    }

    #[test]
    fn test_disabled_component_is_activated_but_not_enabled() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();
        world.set_component_enabled(probe, false).unwrap();

        world.begin_state().unwrap();

        let flags = world.lifecycle_flags(probe).unwrap();
        assert!(!flags.is_enabled());
        assert!(flags.is_active_in_hierarchy());
        assert!(!flags.is_live());

        world.set_component_enabled(probe, true).unwrap();
        assert!(world.lifecycle_flags(probe).unwrap().is_live());
        assert_eq!(entries(&log).last().map(String::as_str), Some("p:on_enable"));
    }

    #[test]
    fn test_parent_deactivation_reaches_children() {
        let log = HookLog::default();
        let mut world = World::new();
        let parent = world.spawn_object("parent", Transform2D::identity());
        let child = world.spawn_child(parent, "child", Transform2D::identity()).unwrap();
        let probe = world.add_component(child, Box::new(Probe::new("c", &log))).unwrap();
        world.begin_state().unwrap();
        log.borrow_mut().clear();

        world.set_object_active(parent, false).unwrap();

        assert!(!world.is_active_in_hierarchy(child));
        let flags = world.lifecycle_flags(probe).unwrap();
        assert!(!flags.is_active_in_hierarchy());
        assert!(flags.is_enabled());
        assert_eq!(entries(&log), labelled("c", &[LifecycleHook::DeactivateInHierarchy]));

        // The child's own flag keeps it inactive when the parent comes back.
        world.set_object_active(child, false).unwrap();
        world.set_object_active(parent, true).unwrap();
        assert_eq!(entries(&log).len(), 1);

        world.set_object_active(child, true).unwrap();
        assert!(world.lifecycle_flags(probe).unwrap().is_live());
        assert_eq!(entries(&log).last().map(String::as_str), Some("c:on_activate_in_hierarchy"));
    }

    #[test]
    fn test_components_added_during_state_are_pending() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        world.begin_state().unwrap();

        let probe = world.add_component(object, Box::new(Probe::new("late", &log))).unwrap();
        assert_eq!(world.lifecycle_flags(probe), Some(LifecycleFlags::INSTANTIATED));

        world.start_pending().unwrap();
        assert!(world.lifecycle_flags(probe).unwrap().is_live());
    }

    #[test]
    fn test_paused_world_pauses_new_state() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();

        world.set_paused(true).unwrap();
        world.begin_state().unwrap();

        let flags = world.lifecycle_flags(probe).unwrap();
        assert!(flags.is_paused());
        assert!(flags.is_live());
    }

    #[test]
    fn test_state_can_run_twice() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();

        world.begin_state().unwrap();
        assert_eq!(
            world.begin_state(),
            Err(ComponentError::InvalidState("game state already active"))
        );
        world.end_state().unwrap();
        world.begin_state().unwrap();

        assert!(world.lifecycle_flags(probe).unwrap().is_live());
        let initialisations = entries(&log)
            .iter()
            .filter(|entry| entry.ends_with("on_initialize_state"))
            .count();
        assert_eq!(initialisations, 2);
    }

    #[test]
    fn test_destroy_object_deletes_children_first() {
        let log = HookLog::default();
        let mut world = World::new();
        let parent = world.spawn_object("parent", Transform2D::identity());
        let child = world.spawn_child(parent, "child", Transform2D::identity()).unwrap();
        world.add_component(parent, Box::new(Probe::new("parent", &log))).unwrap();
        world.add_component(child, Box::new(Probe::new("child", &log))).unwrap();
        world.begin_state().unwrap();
        log.borrow_mut().clear();

        world.destroy_object(parent).unwrap();

        let deletes: Vec<_> = entries(&log)
            .into_iter()
            .filter(|entry| entry.ends_with("on_delete"))
            .collect();
        assert_eq!(deletes, ["child:on_delete", "parent:on_delete"]);
        assert!(world.object(parent).is_none());
        assert!(world.object(child).is_none());
        assert!(world.components().is_empty());
    }

    #[test]
    fn test_lifecycle_errors_for_unknown_keys() {
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let log = HookLog::default();
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();
        world.remove_component(probe).unwrap();

        assert_eq!(world.remove_component(probe), Err(ComponentError::NotFound(probe)));
        world.destroy_object(object).unwrap();
        assert_eq!(world.destroy_object(object), Err(ComponentError::ObjectNotFound(object)));
    }

    #[test]
    fn test_transition_error_type() {
        let flags = LifecycleFlags::INSTANTIATED;
        assert_eq!(
            flags.check(LifecycleHook::Enable),
            Err(LifecycleError::InvalidTransition {
                hook: LifecycleHook::Enable,
                flags,
            })
        );
    }

    #[test]
    fn test_transitions_reach_world_diagnostics() {
        let log = HookLog::default();
        let sink = SharedSink::default();
        let mut world = World::new();
        world.set_diagnostics(Box::new(sink.clone()));
        let object = world.spawn_object("probe", Transform2D::identity());
        world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();

        world.begin_state().unwrap();
        world.debug_dump_all();

        let records = sink.0.borrow();
        assert_eq!(records[0], "Probe#0: on_instantiated");
        assert!(records.iter().any(|line| line == "Probe#0: on_initialize_state"));
        assert!(records.iter().any(|line| line == "Probe#0: probe p saw 4 hooks"));
    }

    #[test]
    fn test_debug_dump_in_any_state() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        let probe = world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();
        let id = world.component_id(probe).unwrap();

        let mut sink = MemorySink::new();
        world.debug_dump(probe, &mut sink).unwrap();
        world.begin_state().unwrap();
        world.debug_dump(probe, &mut sink).unwrap();

        let lines: Vec<_> = sink.records_for(id.0).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("probe p saw 1"));
        assert!(lines[3].starts_with("probe p saw 4"));
    }

    #[test]
    fn test_shutdown_finalizes_and_deletes() {
        let log = HookLog::default();
        let mut world = World::new();
        let object = world.spawn_object("probe", Transform2D::identity());
        world.add_component(object, Box::new(Probe::new("p", &log))).unwrap();
        world.begin_state().unwrap();

        world.shutdown().unwrap();

        assert!(!world.is_state_active());
        assert_eq!(world.objects().count(), 0);
        assert_eq!(entries(&log).last().map(String::as_str), Some("p:on_delete"));
    }
}
