use {
    crate::ifs::wl_seat::{WlSeatGlobal, focus::TouchPoint},
    std::rc::Rc,
};

/// Receives touch input before it is delivered to clients.
pub trait TouchGrab {
    /// Returns the serial of the down event or 0 if no event was sent.
    fn down(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32) -> u32;
    fn up(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32);
    fn motion(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32);
    fn frame(&self, seat: &Rc<WlSeatGlobal>);
    fn cancel(&self, seat: &Rc<WlSeatGlobal>);
}

pub struct DefaultTouchGrab;

impl TouchGrab for DefaultTouchGrab {
    fn down(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32) -> u32 {
        seat.touch_send_down(point, time)
    }

    fn up(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32) {
        seat.touch_send_up(point, time);
    }

    fn motion(&self, seat: &Rc<WlSeatGlobal>, point: &Rc<TouchPoint>, time: u32) {
        seat.touch_send_motion(point, time);
    }

    fn frame(&self, seat: &Rc<WlSeatGlobal>) {
        seat.touch_send_frame();
    }

    fn cancel(&self, _seat: &Rc<WlSeatGlobal>) {
        // nothing
    }
}
