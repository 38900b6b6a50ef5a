
use {
    smallvec::SmallVec,
    std::{
        cell::{Cell, RefCell},
        rc::{Rc, Weak},
    },
};

type Slots<E> = RefCell<Vec<Rc<Slot<E>>>>;

/// A list of callbacks that are invoked when an event is emitted.
///
/// Emission iterates over a snapshot of the list. Listeners may detach
/// themselves or other listeners, attach new listeners, or drop the object that
/// owns the signal while a callback is running. A listener that is detached
/// during an emission is not invoked for the remainder of that emission and a
/// listener that is attached during an emission is first invoked by the next
/// emission.
pub struct Signal<E: ?Sized> {
    slots: Rc<Slots<E>>,
}

struct Slot<E: ?Sized> {
    attached: Cell<bool>,
    callback: Box<dyn Fn(&E)>,
}

/// A subscription to a [`Signal`].
///
/// Dropping the listener detaches it.
#[must_use]
pub struct SignalListener<E: ?Sized> {
    slot: Rc<Slot<E>>,
    slots: Weak<Slots<E>>,
}

impl<E: ?Sized> Default for Signal<E> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
        }
    }
}

impl<E: ?Sized> Signal<E> {
    pub fn subscribe<F>(&self, callback: F) -> SignalListener<E>
    where
        F: Fn(&E) + 'static,
    {
        let slot = Rc::new(Slot {
            attached: Cell::new(true),
            callback: Box::new(callback),
        });
        self.slots.borrow_mut().push(slot.clone());
        SignalListener {
            slot,
            slots: Rc::downgrade(&self.slots),
        }
    }

    pub fn emit(&self, event: &E) {
        let snapshot: SmallVec<[Rc<Slot<E>>; 4]> = self.slots.borrow().iter().cloned().collect();
        for slot in snapshot {
            if slot.attached.get() {
                (slot.callback)(event);
            }
        }
    }

    pub fn has_listeners(&self) -> bool {
        !self.slots.borrow().is_empty()
    }

    pub fn num_listeners(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Detaches all listeners.
    pub fn clear(&self) {
        let slots = std::mem::take(&mut *self.slots.borrow_mut());
        for slot in slots {
            slot.attached.set(false);
        }
    }
}

impl<E: ?Sized> SignalListener<E> {
    pub fn detach(&self) {
        if !self.slot.attached.replace(false) {
            return;
        }
        if let Some(slots) = self.slots.upgrade() {
            slots
                .borrow_mut()
                .retain(|slot| !Rc::ptr_eq(slot, &self.slot));
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.attached.get()
    }
}

impl<E: ?Sized> Drop for SignalListener<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
