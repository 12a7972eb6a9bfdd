//! Registration of global pointer-down listeners.
//!
//! An open popover needs to hear about every mouse press so it can close on
//! a click outside of it. Rather than keeping a flag in the app, the popover
//! holds a [`ListenerGuard`] for as long as it is open; the app only routes
//! pointer-down events to popovers while [`PointerListeners::is_active`]
//! reports a registration. Dropping the guard deregisters it, whichever way
//! the popover goes away.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<u64>,
}

/// Shared registry of pointer-down listeners.
///
/// Cloning yields another handle to the same registry.
///
/// # Examples
///
/// ```
/// use beiramar_tui::listener::PointerListeners;
///
/// let listeners = PointerListeners::default();
/// let guard = listeners.register();
/// assert_eq!(listeners.active_count(), 1);
///
/// drop(guard);
/// assert!(!listeners.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    registry: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    /// Registers a listener, active until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn register(&self) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id);
        trace!(id, "pointer listener registered");
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.registry.borrow().active.len()
    }

    /// Returns `true` while at least one listener is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

/// A live listener registration, removed on drop.
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerGuard {
    /// Identifier of this registration.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
            trace!(id = self.id, "pointer listener removed");
        }
    }
}
