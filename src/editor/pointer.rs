//! Page-wide pointer-down dispatch
//!
//! Every mounted editor subscribes to the hub for its surface. A pointer-down
//! is reported with the surface it landed in (if any); every other
//! subscriber is told the click happened outside it. Dropping the
//! `Subscription` deregisters.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Identity of one editable surface on the page
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

static NEXT_SURFACE_ID: AtomicU32 = AtomicU32::new(1);

impl SurfaceId {
    pub fn next() -> Self {
        SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type OutsideListener = Rc<dyn Fn()>;

struct Entry {
    key: u64,
    surface: SurfaceId,
    on_outside: OutsideListener,
}

#[derive(Default)]
struct HubInner {
    next_key: u64,
    entries: Vec<Entry>,
}

#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, surface: SurfaceId, on_outside: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let key = inner.next_key;
        inner.next_key += 1;
        inner.entries.push(Entry {
            key,
            surface,
            on_outside: Rc::new(on_outside),
        });

        Subscription {
            hub: Rc::downgrade(&self.inner),
            key,
        }
    }

    /// Report a pointer-down. `target` is the surface it landed in, `None`
    /// for anywhere else on the page. Returns how many subscribers were told.
    pub fn pointer_down(&self, target: Option<SurfaceId>) -> usize {
        // Listeners run without the hub borrowed so they may (un)subscribe
        let listeners: Vec<OutsideListener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| Some(entry.surface) != target)
            .map(|entry| Rc::clone(&entry.on_outside))
            .collect();

        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Registration handle; deregisters on drop
pub struct Subscription {
    hub: Weak<RefCell<HubInner>>,
    key: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().entries.retain(|entry| entry.key != self.key);
        }
    }
}
