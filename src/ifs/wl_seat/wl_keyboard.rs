use {
    crate::{
        ifs::wl_seat::WlSeat,
        object::ObjectId,
        wire::{Event, KeyState, Modifiers},
    },
    std::rc::Rc,
};

pub struct WlKeyboard {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlKeyboard {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_enter(&self, serial: u32, surface: ObjectId, keys: &[u32]) {
        self.seat.client.event(Event::KeyboardEnter {
            self_id: self.id,
            serial,
            surface,
            keys,
        })
    }

    pub fn send_leave(&self, serial: u32, surface: ObjectId) {
        self.seat.client.event(Event::KeyboardLeave {
            self_id: self.id,
            serial,
            surface,
        })
    }

    pub fn send_key(&self, serial: u32, time: u32, key: u32, state: KeyState) {
        self.seat.client.event(Event::Key {
            self_id: self.id,
            serial,
            time,
            key,
            state,
        })
    }

    pub fn send_modifiers(&self, serial: u32, modifiers: Modifiers) {
        self.seat.client.event(Event::Modifiers {
            self_id: self.id,
            serial,
            modifiers,
        })
    }

    pub fn release(&self) {
        if self.seat.keyboards.remove(&self.id).is_some() {
            self.seat.client.remove_object(self.id);
        }
    }

    pub(super) fn destroy(&self) {
        self.seat.client.remove_object(self.id);
    }
}
