use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T: 'static> {
    id: u64,
    once: bool,
    callback: Callback<T>,
}

struct Inner<T: 'static> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry<T>>>,
}

pub struct Observable<T: 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.len())
            .finish()
    }
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn add(&self, callback: impl FnMut(&T) + 'static) -> ObserverHandle {
        self.push(callback, false)
    }

    /// Register a callback that is removed after its first call.
    pub fn add_once(&self, callback: impl FnMut(&T) + 'static) -> ObserverHandle {
        self.push(callback, true)
    }

    fn push(&self, callback: impl FnMut(&T) + 'static, once: bool) -> ObserverHandle {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner
            .entries
            .borrow_mut()
            .push(Entry { id, once, callback });
        ObserverHandle(id)
    }

    /// Returns `false` when the handle was already removed.
    pub fn remove(&self, handle: ObserverHandle) -> bool {
        let mut entries = self.inner.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != handle.0);
        entries.len() != before
    }

    pub fn clear(&self) {
        self.inner.entries.borrow_mut().clear();
    }

    /// Observers added or removed during a notification take effect from the
    /// next one. Returns the number of observers called.
    pub fn notify(&self, value: &T) -> usize {
        let snapshot: Vec<(u64, bool, Callback<T>)> = self
            .inner
            .entries
            .borrow()
            .iter()
            .map(|e| (e.id, e.once, e.callback.clone()))
            .collect();
        let mut called = 0;
        for (id, once, callback) in snapshot {
            if once {
                self.remove(ObserverHandle(id));
            }
            // a callback re-entering its own observable is skipped
            if let Ok(mut cb) = callback.try_borrow_mut() {
                (&mut *cb)(value);
                called += 1;
            }
        }
        called
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_observers(&self) -> bool {
        !self.is_empty()
    }
}
