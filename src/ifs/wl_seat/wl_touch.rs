use {
    crate::{ifs::wl_seat::WlSeat, object::ObjectId, wire::Event},
    std::rc::Rc,
};

pub struct WlTouch {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlTouch {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_down(&self, serial: u32, time: u32, surface: ObjectId, id: i32, x: f64, y: f64) {
        self.seat.client.event(Event::TouchDown {
            self_id: self.id,
            serial,
            time,
            surface,
            id,
            x,
            y,
        })
    }

    pub fn send_up(&self, serial: u32, time: u32, id: i32) {
        self.seat.client.event(Event::TouchUp {
            self_id: self.id,
            serial,
            time,
            id,
        })
    }

    pub fn send_motion(&self, time: u32, id: i32, x: f64, y: f64) {
        self.seat.client.event(Event::TouchMotion {
            self_id: self.id,
            time,
            id,
            x,
            y,
        })
    }

    pub fn send_frame(&self) {
        self.seat.client.event(Event::TouchFrame { self_id: self.id })
    }

    pub fn send_cancel(&self) {
        self.seat.client.event(Event::TouchCancel { self_id: self.id })
    }

    pub fn release(&self) {
        if self.seat.touches.remove(&self.id).is_some() {
            self.seat.client.remove_object(self.id);
        }
    }

    pub(super) fn destroy(&self) {
        self.seat.client.remove_object(self.id);
    }
}
