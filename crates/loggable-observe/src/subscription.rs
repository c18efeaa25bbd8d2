//! Subscription handles.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub(crate) type Callback = Rc<RefCell<dyn FnMut()>>;

pub(crate) struct Subscriber {
    pub(crate) id: u64,
    pub(crate) callback: Callback,
}

/// One-shot ownership handle for an active subscription.
///
/// Calling [`dispose`](Disposer::dispose) permanently removes the side
/// effect from the observed object; the handle cannot re-arm it. Dropping a
/// `Disposer` without calling it leaves the subscription running.
#[derive(Debug)]
pub struct Disposer {
    pub(crate) registry: Weak<RefCell<Vec<Subscriber>>>,
    pub(crate) id: u64,
    pub(crate) disposed: Cell<bool>,
}

impl Disposer {
    /// Permanently stops the subscription.
    ///
    /// Disposing twice, or after the observed object has been dropped, is a
    /// tolerated no-op.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().retain(|s| s.id != self.id);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}
