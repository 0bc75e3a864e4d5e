//! Managed closeable resources
//!
//! Values that need teardown are stored as [`ManagedResource`]s; the store's
//! close action, built by [`managed_close_action`], closes them when their
//! owning context is torn down.
//!
//! A resource may carry the primary [`CloseableResource`] capability, the
//! narrower [`LegacyCloseableResource`] capability, or both. The primary
//! capability always wins; what happens to the overlap is governed by the
//! configurable [`DualCloseablePolicy`].

use mbe_store::{CloseAction, Namespace};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Primary teardown capability for stored values
pub trait CloseableResource: Send + Sync {
    /// Release the resource
    ///
    /// # Errors
    /// Any failure is aggregated by the owning store's teardown; it never
    /// prevents other resources from closing.
    fn close(&self) -> anyhow::Result<()>;
}

/// Narrower, superseded teardown capability
///
/// Kept for resources that have not migrated to [`CloseableResource`] yet;
/// closed only when the primary capability is absent.
pub trait LegacyCloseableResource: Send + Sync {
    /// Release the resource
    ///
    /// # Errors
    /// Aggregated by the owning store's teardown, like the primary
    /// capability.
    fn close(&self) -> anyhow::Result<()>;
}

/// Policy for values carrying both closeable capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualCloseablePolicy {
    /// Log the overlap, then close through the primary capability
    #[default]
    WarnAndClose,

    /// Close through the primary capability without logging
    Silent,
}

/// A stored value with teardown capabilities
pub struct ManagedResource {
    primary: Option<Box<dyn CloseableResource>>,
    legacy: Option<Box<dyn LegacyCloseableResource>>,
}

impl ManagedResource {
    /// Wrap a resource with the primary capability
    #[must_use]
    pub fn closeable(resource: impl CloseableResource + 'static) -> Self {
        Self {
            primary: Some(Box::new(resource)),
            legacy: None,
        }
    }

    /// Wrap a resource with only the legacy capability
    #[must_use]
    pub fn legacy(resource: impl LegacyCloseableResource + 'static) -> Self {
        Self {
            primary: None,
            legacy: Some(Box::new(resource)),
        }
    }

    /// Wrap a resource carrying both capabilities
    #[must_use]
    pub fn dual(
        primary: impl CloseableResource + 'static,
        legacy: impl LegacyCloseableResource + 'static,
    ) -> Self {
        Self {
            primary: Some(Box::new(primary)),
            legacy: Some(Box::new(legacy)),
        }
    }

    /// Whether the primary capability is present
    #[inline]
    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Whether the legacy capability is present
    #[inline]
    #[must_use]
    pub fn has_legacy(&self) -> bool {
        self.legacy.is_some()
    }

    fn close_with(
        &self,
        auto_close_enabled: bool,
        policy: DualCloseablePolicy,
        namespace: &Namespace,
        key: &str,
    ) -> anyhow::Result<()> {
        if auto_close_enabled {
            if let Some(primary) = &self.primary {
                if self.legacy.is_some() && policy == DualCloseablePolicy::WarnAndClose {
                    warn!(
                        %namespace,
                        key,
                        "resource also carries the legacy closeable capability; closing through the primary one"
                    );
                }
                return primary.close();
            }
        }

        if let Some(legacy) = &self.legacy {
            if auto_close_enabled && policy == DualCloseablePolicy::WarnAndClose {
                warn!(
                    %namespace,
                    key,
                    "resource carries only the legacy closeable capability"
                );
            }
            return legacy.close();
        }

        Ok(())
    }
}

impl fmt::Debug for ManagedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedResource")
            .field("has_primary", &self.has_primary())
            .field("has_legacy", &self.has_legacy())
            .finish()
    }
}

/// Build the store-level close action applied to every stored entry
///
/// Plain values are left untouched; [`ManagedResource`]s are closed per the
/// auto-close toggle and dual-capability policy.
#[must_use]
pub fn managed_close_action(
    auto_close_enabled: bool,
    policy: DualCloseablePolicy,
) -> CloseAction {
    Arc::new(move |namespace, key, value| {
        let Some(resource) = value.downcast_ref::<ManagedResource>() else {
            return Ok(());
        };
        resource.close_with(auto_close_enabled, policy, namespace, key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(Arc<AtomicUsize>);

    impl CloseableResource for Counting {
        fn close(&self) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl LegacyCloseableResource for Counting {
        fn close(&self) -> anyhow::Result<()> {
            self.0.fetch_add(100, Ordering::SeqCst);
            Ok(())
        }
    }

    fn run(resource: &ManagedResource, auto_close: bool) -> anyhow::Result<()> {
        resource.close_with(
            auto_close,
            DualCloseablePolicy::WarnAndClose,
            &Namespace::new(["test"]),
            "key",
        )
    }

    #[test]
    fn primary_capability_closes_when_enabled() {
        let closes = Arc::new(AtomicUsize::new(0));
        let resource = ManagedResource::closeable(Counting(Arc::clone(&closes)));

        run(&resource, true).unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn primary_capability_skipped_when_auto_close_disabled() {
        let closes = Arc::new(AtomicUsize::new(0));
        let resource = ManagedResource::closeable(Counting(Arc::clone(&closes)));

        run(&resource, false).unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dual_capability_prefers_primary() {
        let closes = Arc::new(AtomicUsize::new(0));
        let resource = ManagedResource::dual(
            Counting(Arc::clone(&closes)),
            Counting(Arc::clone(&closes)),
        );

        run(&resource, true).unwrap();
        // primary adds 1; the legacy capability is never invoked
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn legacy_capability_closes_even_when_auto_close_disabled() {
        let closes = Arc::new(AtomicUsize::new(0));
        let resource = ManagedResource::legacy(Counting(Arc::clone(&closes)));

        run(&resource, false).unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn close_action_ignores_plain_values() {
        let action = managed_close_action(true, DualCloseablePolicy::WarnAndClose);
        let value: mbe_store::StoredValue = Arc::new(42_u32);

        action(&Namespace::new(["test"]), "key", &value).unwrap();
    }
}
