use {
    crate::{
        ifs::wl_seat::{WlSeatGlobal, focus::FocusTarget},
        wire::{ButtonState, ScrollAxis},
    },
    std::rc::Rc,
};

/// Receives pointer input before it is delivered to clients.
pub trait PointerGrab {
    fn enter(&self, seat: &Rc<WlSeatGlobal>, target: FocusTarget, x: f64, y: f64);
    fn clear_focus(&self, seat: &Rc<WlSeatGlobal>);
    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, x: f64, y: f64);
    /// Returns the serial of the button event or 0 if no event was sent.
    fn button(&self, seat: &Rc<WlSeatGlobal>, time: u32, button: u32, state: ButtonState) -> u32;
    fn axis(&self, seat: &Rc<WlSeatGlobal>, time: u32, axis: ScrollAxis, value: f64);
    fn frame(&self, seat: &Rc<WlSeatGlobal>);
    /// Called after the grab has been ended.
    fn cancel(&self, seat: &Rc<WlSeatGlobal>);
}

pub struct DefaultPointerGrab;

impl PointerGrab for DefaultPointerGrab {
    fn enter(&self, seat: &Rc<WlSeatGlobal>, target: FocusTarget, x: f64, y: f64) {
        seat.pointer_enter(target, x, y);
    }

    fn clear_focus(&self, seat: &Rc<WlSeatGlobal>) {
        seat.pointer_clear_focus();
    }

    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, x: f64, y: f64) {
        seat.pointer_send_motion(time, x, y);
    }

    fn button(&self, seat: &Rc<WlSeatGlobal>, time: u32, button: u32, state: ButtonState) -> u32 {
        seat.pointer_send_button(time, button, state)
    }

    fn axis(&self, seat: &Rc<WlSeatGlobal>, time: u32, axis: ScrollAxis, value: f64) {
        seat.pointer_send_axis(time, axis, value);
    }

    fn frame(&self, seat: &Rc<WlSeatGlobal>) {
        seat.pointer_send_frame();
    }

    fn cancel(&self, _seat: &Rc<WlSeatGlobal>) {
        // nothing
    }
}
