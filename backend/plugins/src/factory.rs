//! Lazy component factories.
//!
//! A factory is the deferred half of a slot contribution: nothing is built
//! until the resolver asks for it, and every call builds a fresh unit.
use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use pacer_core::Renderable;

/// A zero-argument deferred computation yielding one renderable unit.
#[async_trait]
pub trait ComponentFactory: Send + Sync {
    /// Name used in logs and diagnostics (usually the component name).
    fn name(&self) -> &str;

    /// Build the unit. May suspend, e.g. to load assets or query a service.
    async fn load(&self) -> Result<Renderable>;
}

/// Shared handle to a factory, as stored in descriptors.
pub type LazyComponent = Arc<dyn ComponentFactory>;

/// Factory backed by an async closure.
pub struct FnFactory<F> {
    name: String,
    build: F,
}

#[async_trait]
impl<F, Fut> ComponentFactory for FnFactory<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Renderable>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Renderable> {
        (self.build)().await
    }
}

/// Factory that hands out a clone of a prebuilt unit.
pub struct StaticFactory {
    name: String,
    unit: Renderable,
}

#[async_trait]
impl ComponentFactory for StaticFactory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Renderable> {
        Ok(self.unit.clone())
    }
}

/// Wrap an async closure as a [`LazyComponent`].
pub fn lazy<F, Fut>(name: impl Into<String>, build: F) -> LazyComponent
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Renderable>> + Send + 'static,
{
    Arc::new(FnFactory {
        name: name.into(),
        build,
    })
}

/// A factory that always yields a copy of `unit`.
pub fn ready(name: impl Into<String>, unit: Renderable) -> LazyComponent {
    Arc::new(StaticFactory {
        name: name.into(),
        unit,
    })
}

/// Debug helper: descriptors print factory names instead of closures.
pub(crate) struct FactoryNames<'a>(pub &'a [LazyComponent]);

impl fmt::Debug for FactoryNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|factory| factory.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_lazy_runs_on_every_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let factory = lazy("PaceChart", move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Renderable::panel("Pace", &[]))
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        factory.load().await.unwrap();
        factory.load().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(factory.name(), "PaceChart");
    }

    #[tokio::test]
    async fn test_ready_clones_unit() {
        let unit = Renderable::link("Home", "/", None);
        let factory = ready("HomeLink", unit.clone());
        assert_eq!(factory.load().await.unwrap(), unit);
    }

    #[tokio::test]
    async fn test_lazy_failure_surfaces() {
        let factory = lazy("Broken", || async {
            Err::<Renderable, _>(anyhow::anyhow!("asset missing"))
        });
        let err = factory.load().await.unwrap_err();
        assert_eq!(err.to_string(), "asset missing");
    }
}
