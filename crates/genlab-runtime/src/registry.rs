use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LabError, LabResult};
use crate::process::{NullProcess, Process, ProcessInstance};

/// Inputs handed to a process constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    /// Backing-store width in pixels.
    pub width: u32,
    /// Backing-store height in pixels.
    pub height: u32,
    /// Seed for the instance's random source.
    pub seed: u64,
}

/// Builds a process for a given surface.
pub type Constructor = Box<dyn Fn(Spawn) -> LabResult<Box<dyn Process>>>;

/// One registered process kind.
pub struct RegistryEntry {
    /// Identifier used to select this kind.
    pub id: String,
    /// Display name for selection lists.
    pub name: String,
    constructor: Constructor,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Outcome of [`ProcessRegistry::create`].
///
/// An unknown identifier still yields a usable stub; a failed constructor
/// yields nothing. Callers must not reset or populate controls for a
/// `Failed` outcome.
#[derive(Debug)]
pub enum Creation {
    /// The registered constructor succeeded.
    Created(ProcessInstance),
    /// The identifier is not registered; a [`NullProcess`] stands in.
    Fallback(ProcessInstance),
    /// The registered constructor returned an error.
    Failed {
        /// The requested identifier.
        id: String,
        /// What went wrong.
        error: LabError,
    },
}

impl Creation {
    /// The created instance, if there is one (stub included).
    pub fn into_instance(self) -> Option<ProcessInstance> {
        match self {
            Self::Created(instance) | Self::Fallback(instance) => Some(instance),
            Self::Failed { .. } => None,
        }
    }

    /// Whether a real, registered process was built.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Ordered mapping from process identifier to constructor.
///
/// Registration order is the order shown in selection lists.
pub struct ProcessRegistry {
    entries: Vec<RegistryEntry>,
    rng: StdRng,
}

impl std::fmt::Debug for ProcessRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRegistry")
            .field("entries", &self.entries)
            .finish()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRegistry {
    /// An empty registry seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// An empty registry whose instance seeds are derived from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reseed the source of per-instance seeds.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Register a process kind. A later registration under the same id
    /// replaces the earlier one in place.
    pub fn register<F>(&mut self, id: &str, name: &str, constructor: F)
    where
        F: Fn(Spawn) -> LabResult<Box<dyn Process>> + 'static,
    {
        let entry = RegistryEntry {
            id: id.to_string(),
            name: name.to_string(),
            constructor: Box::new(constructor),
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Builder form of [`ProcessRegistry::register`].
    pub fn with<F>(mut self, id: &str, name: &str, constructor: F) -> Self
    where
        F: Fn(Spawn) -> LabResult<Box<dyn Process>> + 'static,
    {
        self.register(id, name, constructor);
        self
    }

    /// Registered kinds, in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Registered identifiers, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Display name registered for `id`.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    /// Instantiate the process registered under `id` for a surface of
    /// `width` x `height` pixels.
    ///
    /// Constructors do not know the id they were registered under, so a
    /// [`LabError::Construction`] they return is re-labelled with `id`.
    pub fn create(&mut self, id: &str, width: u32, height: u32) -> Creation {
        let Some(entry) = self.entries.iter().find(|e| e.id == id) else {
            tracing::warn!("process id \"{id}\" not found in registry, using stub");
            return Creation::Fallback(ProcessInstance::new(id, Box::new(NullProcess::new())));
        };

        let spawn = Spawn {
            width,
            height,
            seed: self.rng.random(),
        };
        tracing::debug!("creating instance of {} ({width}x{height})", entry.name);

        match (entry.constructor)(spawn) {
            Ok(mut process) => {
                if process.iteration() != 0 {
                    tracing::warn!(
                        "process {id} started at iteration {}, normalizing",
                        process.iteration()
                    );
                    process.reset(false);
                }
                Creation::Created(ProcessInstance::new(id, process))
            }
            Err(error) => {
                let error = match error {
                    LabError::Construction { reason, .. } => LabError::construction(id, reason),
                    other => other,
                };
                tracing::error!("error constructing process {id}: {error}");
                Creation::Failed {
                    id: id.to_string(),
                    error,
                }
            }
        }
    }
}
