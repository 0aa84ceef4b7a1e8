use std::collections::BTreeMap;

use super::{DesignerFactory, GridSearchDesigner, RandomDesigner, designer_factory};
use crate::error::{Error, Result};

/// Name-keyed collection of [`DesignerFactory`] values.
///
/// Benchmarks usually sweep several algorithms over the same problems; the
/// registry lets them be addressed by the name that ends up on each
/// [`BenchmarkRecord`](crate::BenchmarkRecord).
///
/// # Examples
///
/// ```
/// use optbench::designer::DesignerRegistry;
///
/// let registry = DesignerRegistry::with_defaults();
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["grid", "random"]);
/// assert!(registry.get("random").is_ok());
/// assert!(registry.get("cma-es").is_err());
/// ```
#[derive(Clone, Default)]
pub struct DesignerRegistry {
    factories: BTreeMap<String, DesignerFactory>,
}

impl DesignerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `random` and `grid`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .register(
                "random",
                designer_factory(|problem, seed| Ok(RandomDesigner::new(problem, seed))),
            )
            .register("grid", designer_factory(GridSearchDesigner::new))
    }

    /// Adds or replaces the factory registered under `name`.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, factory: DesignerFactory) -> Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Returns the factory registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDesigner`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<DesignerFactory> {
        self.factories
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownDesigner(name.to_string()))
    }

    /// Iterates over registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Iterates over `(name, factory)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DesignerFactory)> {
        self.factories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl core::fmt::Debug for DesignerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DesignerRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
