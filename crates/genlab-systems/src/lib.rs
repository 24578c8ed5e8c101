//! Generative process kinds for GenLab.
//!
//! Each kind implements [`genlab_runtime::Process`] and is registered under
//! a stable identifier by [`register_all`]. The runtime treats all of them
//! as black boxes.

/// Cellular automata on a cell grid.
pub mod automaton;
/// L-system production rules and rewriting.
pub mod grammar;
/// A toroidal grid of small integer cell states.
pub mod grid;
/// L-systems drawn with turtle graphics.
pub mod lsystem;
/// Physarum-style slime mold.
pub mod slime;
/// Scalar trail field used by the slime mold.
pub mod trail;
/// Turtle interpretation of L-system words.
pub mod turtle;

use genlab_runtime::{Process, ProcessRegistry};

pub use automaton::{Automaton, BriansBrain, Conway, Rule};
pub use grid::CellGrid;
pub use lsystem::{LSystem, Preset};
pub use slime::SlimeMold;

/// Identifier of Conway's Game of Life.
pub const CA_LIFE: &str = "ca_life";
/// Identifier of Brian's Brain.
pub const CA_BRAIN: &str = "ca_brain";
/// Identifier of the branching-plant L-system.
pub const L_SYSTEM_TREE: &str = "l_system_tree";
/// Identifier of the Koch-snowflake L-system.
pub const L_SYSTEM_KOCH: &str = "l_system_koch";
/// Identifier of the slime mold.
pub const AGENT_SLIME: &str = "agent_slime";

/// Register every built-in process kind, in selection order.
pub fn register_all(registry: &mut ProcessRegistry) {
    registry.register(CA_LIFE, "Game of Life", |spawn| {
        Ok(Box::new(Automaton::new(Conway, spawn)?) as Box<dyn Process>)
    });
    registry.register(CA_BRAIN, "Brian's Brain", |spawn| {
        Ok(Box::new(Automaton::new(BriansBrain, spawn)?) as Box<dyn Process>)
    });
    registry.register(L_SYSTEM_TREE, "L-System Tree", |spawn| {
        Ok(Box::new(LSystem::new(Preset::tree(), spawn)?) as Box<dyn Process>)
    });
    registry.register(L_SYSTEM_KOCH, "L-System Koch Snowflake", |spawn| {
        Ok(Box::new(LSystem::new(Preset::koch(), spawn)?) as Box<dyn Process>)
    });
    registry.register(AGENT_SLIME, "Slime Mold", |spawn| {
        Ok(Box::new(SlimeMold::new(spawn)?) as Box<dyn Process>)
    });
}

/// A registry holding every built-in kind, seeded from OS entropy.
pub fn registry() -> ProcessRegistry {
    let mut registry = ProcessRegistry::new();
    register_all(&mut registry);
    registry
}

/// A registry holding every built-in kind with deterministic seeds.
pub fn seeded_registry(seed: u64) -> ProcessRegistry {
    let mut registry = ProcessRegistry::with_seed(seed);
    register_all(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use genlab_runtime::Creation;

    const IDS: [&str; 5] = [CA_LIFE, CA_BRAIN, L_SYSTEM_TREE, L_SYSTEM_KOCH, AGENT_SLIME];

    #[test]
    fn registers_in_selection_order() {
        let registry = registry();
        assert_eq!(registry.ids().collect::<Vec<_>>(), IDS);
        assert_eq!(registry.name_of(AGENT_SLIME), Some("Slime Mold"));
    }

    #[test]
    fn every_kind_starts_at_iteration_zero() {
        let mut registry = seeded_registry(3);
        for id in IDS {
            match registry.create(id, 320, 240) {
                Creation::Created(instance) => {
                    assert_eq!(instance.id(), id);
                    assert_eq!(instance.process().iteration(), 0);
                }
                other => panic!("{id}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn every_kind_counts_steps_and_blanks() {
        let mut registry = seeded_registry(3);
        for id in IDS {
            let mut instance = registry.create(id, 320, 240).into_instance().unwrap();
            let process = instance.process_mut();
            process.reset(true);
            for _ in 0..3 {
                process.step();
            }
            assert_eq!(process.iteration(), 3, "{id}");
            let seeded = process.population();
            process.reset(false);
            assert_eq!(process.iteration(), 0, "{id}");
            assert_eq!(process.population(), Some(0.0), "{id}");
            assert_ne!(seeded, Some(0.0), "{id}");
        }
    }

    #[test]
    fn every_kind_declares_parameters() {
        let mut registry = seeded_registry(3);
        for id in IDS {
            let instance = registry.create(id, 320, 240).into_instance().unwrap();
            let process = instance.process();
            assert!(!process.parameters().is_empty(), "{id}");
            for descriptor in process.parameters() {
                let action = matches!(descriptor.kind, genlab_runtime::ParamKind::Action { .. });
                assert_eq!(process.param_value(&descriptor.id).is_none(), action, "{id}");
            }
        }
    }

    #[test]
    fn zero_area_construction_fails() {
        let mut registry = seeded_registry(3);
        for id in IDS {
            match registry.create(id, 0, 0) {
                Creation::Failed { error, .. } => {
                    let message = error.to_string();
                    assert!(message.contains(id), "{message}");
                }
                other => panic!("{id}: expected failure, got {other:?}"),
            }
        }
    }
}
