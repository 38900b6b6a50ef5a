use {
    crate::{client::ClientId, ifs::wl_seat::BindingId, object::ObjectId},
    std::cell::Cell,
};

/// A surface that can receive focus.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FocusTarget {
    pub client: ClientId,
    pub surface: ObjectId,
}

/// The focus of the pointer or the keyboard.
///
/// The focused binding is stored by id. It is cleared before the binding is
/// unregistered so that it never names a binding that is no longer part of the
/// seat. The surface stays focused even if its client has no binding.
#[derive(Default)]
pub struct FocusState {
    target: Cell<Option<FocusTarget>>,
    binding: Cell<Option<BindingId>>,
    serial: Cell<Option<u32>>,
}

impl FocusState {
    pub fn target(&self) -> Option<FocusTarget> {
        self.target.get()
    }

    pub fn binding(&self) -> Option<BindingId> {
        self.binding.get()
    }

    /// The serial of the enter event sent to the focused binding.
    pub fn serial(&self) -> Option<u32> {
        self.serial.get()
    }

    pub(super) fn set(
        &self,
        target: Option<FocusTarget>,
        binding: Option<BindingId>,
        serial: Option<u32>,
    ) {
        self.target.set(target);
        self.binding.set(binding);
        self.serial.set(serial);
    }

    pub(super) fn clear(&self) {
        self.set(None, None, None);
    }

    pub(super) fn clear_binding(&self, binding: BindingId) -> bool {
        if self.binding.get() != Some(binding) {
            return false;
        }
        self.binding.set(None);
        self.serial.set(None);
        true
    }
}

pub struct TouchPoint {
    pub id: i32,
    pub target: FocusTarget,
    binding: Cell<Option<BindingId>>,
    pos: Cell<(f64, f64)>,
}

impl TouchPoint {
    pub(super) fn new(id: i32, target: FocusTarget, binding: Option<BindingId>, x: f64, y: f64) -> Self {
        Self {
            id,
            target,
            binding: Cell::new(binding),
            pos: Cell::new((x, y)),
        }
    }

    pub fn binding(&self) -> Option<BindingId> {
        self.binding.get()
    }

    pub fn position(&self) -> (f64, f64) {
        self.pos.get()
    }

    pub(super) fn set_position(&self, x: f64, y: f64) {
        self.pos.set((x, y));
    }

    pub(super) fn detach(&self) {
        self.binding.set(None);
    }
}
