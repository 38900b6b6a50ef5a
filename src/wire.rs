use crate::{ifs::wl_seat::SeatCapabilities, object::ObjectId};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ButtonState {
    Released,
    Pressed,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyState {
    Released,
    Pressed,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub depressed: u32,
    pub latched: u32,
    pub locked: u32,
    pub group: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event<'a> {
    Capabilities {
        self_id: ObjectId,
        capabilities: SeatCapabilities,
    },
    Name {
        self_id: ObjectId,
        name: &'a str,
    },
    PointerEnter {
        self_id: ObjectId,
        serial: u32,
        surface: ObjectId,
        x: f64,
        y: f64,
    },
    PointerLeave {
        self_id: ObjectId,
        serial: u32,
        surface: ObjectId,
    },
    PointerMotion {
        self_id: ObjectId,
        time: u32,
        x: f64,
        y: f64,
    },
    PointerButton {
        self_id: ObjectId,
        serial: u32,
        time: u32,
        button: u32,
        state: ButtonState,
    },
    PointerAxis {
        self_id: ObjectId,
        time: u32,
        axis: ScrollAxis,
        value: f64,
    },
    PointerFrame {
        self_id: ObjectId,
    },
    KeyboardEnter {
        self_id: ObjectId,
        serial: u32,
        surface: ObjectId,
        keys: &'a [u32],
    },
    KeyboardLeave {
        self_id: ObjectId,
        serial: u32,
        surface: ObjectId,
    },
    Key {
        self_id: ObjectId,
        serial: u32,
        time: u32,
        key: u32,
        state: KeyState,
    },
    Modifiers {
        self_id: ObjectId,
        serial: u32,
        modifiers: Modifiers,
    },
    TouchDown {
        self_id: ObjectId,
        serial: u32,
        time: u32,
        surface: ObjectId,
        id: i32,
        x: f64,
        y: f64,
    },
    TouchUp {
        self_id: ObjectId,
        serial: u32,
        time: u32,
        id: i32,
    },
    TouchMotion {
        self_id: ObjectId,
        time: u32,
        id: i32,
        x: f64,
        y: f64,
    },
    TouchFrame {
        self_id: ObjectId,
    },
    TouchCancel {
        self_id: ObjectId,
    },
}

impl Event<'_> {
    pub fn self_id(&self) -> ObjectId {
        match *self {
            Event::Capabilities { self_id, .. }
            | Event::Name { self_id, .. }
            | Event::PointerEnter { self_id, .. }
            | Event::PointerLeave { self_id, .. }
            | Event::PointerMotion { self_id, .. }
            | Event::PointerButton { self_id, .. }
            | Event::PointerAxis { self_id, .. }
            | Event::PointerFrame { self_id }
            | Event::KeyboardEnter { self_id, .. }
            | Event::KeyboardLeave { self_id, .. }
            | Event::Key { self_id, .. }
            | Event::Modifiers { self_id, .. }
            | Event::TouchDown { self_id, .. }
            | Event::TouchUp { self_id, .. }
            | Event::TouchMotion { self_id, .. }
            | Event::TouchFrame { self_id }
            | Event::TouchCancel { self_id } => self_id,
        }
    }
}
