//! Sweeper registry: named sweepers and the order they run in.

pub mod errors;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::sweep::Sweeper;

pub use errors::RegistryError;

/// Registry of sweepers keyed by resource type name.
///
/// Built explicitly at startup and handed to the runner; registration order
/// is kept and used as the tie-breaker when ordering by dependencies.
#[derive(Default)]
pub struct SweeperRegistry {
    sweepers: Vec<Arc<dyn Sweeper>>,
    index: HashMap<String, usize>,
}

impl SweeperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Sweeper + 'static>(&mut self, sweeper: S) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(sweeper))
    }

    pub fn register_arc(&mut self, sweeper: Arc<dyn Sweeper>) -> Result<(), RegistryError> {
        let name = sweeper.name().to_string();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateSweeper { name });
        }

        info!(
            event = "core.registry.sweeper_registered",
            sweeper = name,
            dependencies = ?sweeper.dependencies()
        );
        self.index.insert(name, self.sweepers.len());
        self.sweepers.push(sweeper);
        Ok(())
    }

    /// Get a sweeper by its registered name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Sweeper>> {
        self.index.get(name).map(|&i| Arc::clone(&self.sweepers[i]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.sweepers.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sweepers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sweepers.is_empty()
    }

    /// Sweepers to run, dependencies first.
    ///
    /// With a `filter`, only the named sweepers and everything they depend on
    /// (transitively) are returned. Ties keep registration order.
    pub fn run_order(
        &self,
        filter: Option<&[String]>,
    ) -> Result<Vec<Arc<dyn Sweeper>>, RegistryError> {
        let roots: Vec<usize> = match filter {
            Some(names) if !names.is_empty() => names
                .iter()
                .map(|name| {
                    self.index
                        .get(name.as_str())
                        .copied()
                        .ok_or_else(|| RegistryError::UnknownSweeper { name: name.clone() })
                })
                .collect::<Result<_, _>>()?,
            _ => (0..self.sweepers.len()).collect(),
        };

        let mut ordered = Vec::with_capacity(roots.len());
        let mut done = HashSet::new();
        let mut path = Vec::new();
        for root in roots {
            self.visit(root, &mut done, &mut path, &mut ordered)?;
        }

        debug!(
            event = "core.registry.run_order_resolved",
            order = ?ordered.iter().map(|&i| self.sweepers[i].name()).collect::<Vec<_>>()
        );

        Ok(ordered
            .into_iter()
            .map(|i| Arc::clone(&self.sweepers[i]))
            .collect())
    }

    fn visit(
        &self,
        current: usize,
        done: &mut HashSet<usize>,
        path: &mut Vec<usize>,
        ordered: &mut Vec<usize>,
    ) -> Result<(), RegistryError> {
        if done.contains(&current) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|&i| i == current) {
            let mut chain: Vec<&str> = path[start..]
                .iter()
                .map(|&i| self.sweepers[i].name())
                .collect();
            chain.push(self.sweepers[current].name());
            return Err(RegistryError::DependencyCycle {
                chain: chain.join(" -> "),
            });
        }

        path.push(current);
        let sweeper = &self.sweepers[current];
        for dependency in sweeper.dependencies() {
            let next = self.index.get(dependency.as_str()).copied().ok_or_else(|| {
                RegistryError::UnknownDependency {
                    sweeper: sweeper.name().to_string(),
                    dependency: dependency.clone(),
                }
            })?;
            self.visit(next, done, path, ordered)?;
        }
        path.pop();

        done.insert(current);
        ordered.push(current);
        Ok(())
    }
}
