use {
    crate::{
        client::ClientId,
        ifs::wl_seat::{BindingId, WlSeat},
        object::ObjectId,
        wire::{ButtonState, Event, ScrollAxis},
    },
    std::rc::Rc,
};

/// A `set_cursor` request of a client that has pointer focus.
#[derive(Clone, Debug, PartialEq)]
pub struct SetCursorRequest {
    pub binding: BindingId,
    pub client: ClientId,
    pub surface: Option<ObjectId>,
    pub serial: u32,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
}

pub struct WlPointer {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlPointer {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_enter(&self, serial: u32, surface: ObjectId, x: f64, y: f64) {
        self.seat.client.event(Event::PointerEnter {
            self_id: self.id,
            serial,
            surface,
            x,
            y,
        })
    }

    pub fn send_leave(&self, serial: u32, surface: ObjectId) {
        self.seat.client.event(Event::PointerLeave {
            self_id: self.id,
            serial,
            surface,
        })
    }

    pub fn send_motion(&self, time: u32, x: f64, y: f64) {
        self.seat.client.event(Event::PointerMotion {
            self_id: self.id,
            time,
            x,
            y,
        })
    }

    pub fn send_button(&self, serial: u32, time: u32, button: u32, state: ButtonState) {
        self.seat.client.event(Event::PointerButton {
            self_id: self.id,
            serial,
            time,
            button,
            state,
        })
    }

    pub fn send_axis(&self, time: u32, axis: ScrollAxis, value: f64) {
        self.seat.client.event(Event::PointerAxis {
            self_id: self.id,
            time,
            axis,
            value,
        })
    }

    pub fn send_frame(&self) {
        self.seat.client.event(Event::PointerFrame { self_id: self.id })
    }

    pub fn set_cursor(&self, serial: u32, surface: Option<ObjectId>, hotspot_x: i32, hotspot_y: i32) {
        let global = &self.seat.global;
        let focus = global.pointer_focus();
        if focus.binding() != Some(self.seat.id) {
            log::debug!(
                "Client {} tried to set the cursor without having pointer focus",
                self.seat.client.id(),
            );
            return;
        }
        if focus.serial() != Some(serial) {
            log::debug!(
                "Client {} tried to set the cursor with an invalid serial {}",
                self.seat.client.id(),
                serial,
            );
            return;
        }
        global.events.request_set_cursor.emit(&SetCursorRequest {
            binding: self.seat.id,
            client: self.seat.client.id(),
            surface,
            serial,
            hotspot_x,
            hotspot_y,
        });
    }

    pub fn release(&self) {
        if self.seat.pointers.remove(&self.id).is_some() {
            self.seat.client.remove_object(self.id);
        }
    }

    pub(super) fn destroy(&self) {
        self.seat.client.remove_object(self.id);
    }
}
