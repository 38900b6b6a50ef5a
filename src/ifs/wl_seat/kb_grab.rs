use {
    crate::{
        ifs::wl_seat::{WlSeatGlobal, focus::FocusTarget},
        wire::{KeyState, Modifiers},
    },
    std::rc::Rc,
};

/// Receives keyboard input before it is delivered to clients.
pub trait KeyboardGrab {
    fn enter(&self, seat: &Rc<WlSeatGlobal>, target: FocusTarget, keys: &[u32], modifiers: Modifiers);
    fn clear_focus(&self, seat: &Rc<WlSeatGlobal>);
    fn key(&self, seat: &Rc<WlSeatGlobal>, time: u32, key: u32, state: KeyState);
    fn modifiers(&self, seat: &Rc<WlSeatGlobal>, modifiers: Modifiers);
    fn cancel(&self, seat: &Rc<WlSeatGlobal>);
}

pub struct DefaultKeyboardGrab;

impl KeyboardGrab for DefaultKeyboardGrab {
    fn enter(&self, seat: &Rc<WlSeatGlobal>, target: FocusTarget, keys: &[u32], modifiers: Modifiers) {
        seat.keyboard_enter(target, keys, modifiers);
    }

    fn clear_focus(&self, seat: &Rc<WlSeatGlobal>) {
        seat.keyboard_clear_focus();
    }

    fn key(&self, seat: &Rc<WlSeatGlobal>, time: u32, key: u32, state: KeyState) {
        seat.keyboard_send_key(time, key, state);
    }

    fn modifiers(&self, seat: &Rc<WlSeatGlobal>, modifiers: Modifiers) {
        seat.keyboard_send_modifiers(modifiers);
    }

    fn cancel(&self, _seat: &Rc<WlSeatGlobal>) {
        // nothing
    }
}
