use {
    crate::{
        client::{Client, ClientError, ClientId},
        ifs::wl_seat::SeatCapabilities,
        object::{Interface, ObjectId, Version},
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
        wire::{ButtonState, Event, KeyState},
    },
    std::{
        cell::{Cell, RefCell},
        mem,
    },
};

/// An owned copy of an event that was sent to a [`TestClient`].
#[derive(Clone, Debug, PartialEq)]
pub enum Ev {
    Capabilities(ObjectId, SeatCapabilities),
    Name(ObjectId, String),
    PointerEnter { id: ObjectId, serial: u32, surface: ObjectId },
    PointerLeave { id: ObjectId, serial: u32, surface: ObjectId },
    PointerMotion { id: ObjectId, x: f64, y: f64 },
    PointerButton { id: ObjectId, serial: u32, button: u32, state: ButtonState },
    PointerAxis { id: ObjectId },
    PointerFrame { id: ObjectId },
    KeyboardEnter { id: ObjectId, serial: u32, surface: ObjectId, keys: Vec<u32> },
    KeyboardLeave { id: ObjectId, serial: u32, surface: ObjectId },
    Key { id: ObjectId, serial: u32, key: u32, state: KeyState },
    Modifiers { id: ObjectId, serial: u32 },
    TouchDown { id: ObjectId, serial: u32, surface: ObjectId, touch_id: i32 },
    TouchUp { id: ObjectId, serial: u32, touch_id: i32 },
    TouchMotion { id: ObjectId, touch_id: i32 },
    TouchFrame { id: ObjectId },
    TouchCancel { id: ObjectId },
}

impl From<&Event<'_>> for Ev {
    fn from(event: &Event<'_>) -> Self {
        match *event {
            Event::Capabilities { self_id, capabilities } => Ev::Capabilities(self_id, capabilities),
            Event::Name { self_id, name } => Ev::Name(self_id, name.to_string()),
            Event::PointerEnter { self_id, serial, surface, .. } => Ev::PointerEnter {
                id: self_id,
                serial,
                surface,
            },
            Event::PointerLeave { self_id, serial, surface } => Ev::PointerLeave {
                id: self_id,
                serial,
                surface,
            },
            Event::PointerMotion { self_id, x, y, .. } => Ev::PointerMotion { id: self_id, x, y },
            Event::PointerButton { self_id, serial, button, state, .. } => Ev::PointerButton {
                id: self_id,
                serial,
                button,
                state,
            },
            Event::PointerAxis { self_id, .. } => Ev::PointerAxis { id: self_id },
            Event::PointerFrame { self_id } => Ev::PointerFrame { id: self_id },
            Event::KeyboardEnter { self_id, serial, surface, keys } => Ev::KeyboardEnter {
                id: self_id,
                serial,
                surface,
                keys: keys.to_vec(),
            },
            Event::KeyboardLeave { self_id, serial, surface } => Ev::KeyboardLeave {
                id: self_id,
                serial,
                surface,
            },
            Event::Key { self_id, serial, key, state, .. } => Ev::Key {
                id: self_id,
                serial,
                key,
                state,
            },
            Event::Modifiers { self_id, serial, .. } => Ev::Modifiers { id: self_id, serial },
            Event::TouchDown { self_id, serial, surface, id, .. } => Ev::TouchDown {
                id: self_id,
                serial,
                surface,
                touch_id: id,
            },
            Event::TouchUp { self_id, serial, id, .. } => Ev::TouchUp {
                id: self_id,
                serial,
                touch_id: id,
            },
            Event::TouchMotion { self_id, id, .. } => Ev::TouchMotion {
                id: self_id,
                touch_id: id,
            },
            Event::TouchFrame { self_id } => Ev::TouchFrame { id: self_id },
            Event::TouchCancel { self_id } => Ev::TouchCancel { id: self_id },
        }
    }
}

/// A client connection that records everything the seat does to it.
pub struct TestClient {
    pub id: ClientId,
    next_id: NumCell<u32>,
    objects: CopyHashMap<ObjectId, (Interface, Version)>,
    removed: RefCell<Vec<ObjectId>>,
    events: RefCell<Vec<Ev>>,
    no_memory: NumCell<u32>,
    fail_add_object: Cell<bool>,
}

impl TestClient {
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            next_id: NumCell::new(1),
            objects: Default::default(),
            removed: Default::default(),
            events: Default::default(),
            no_memory: NumCell::new(0),
            fail_add_object: Cell::new(false),
        }
    }

    /// Allocates a client-side object id.
    pub fn new_id(&self) -> ObjectId {
        ObjectId::from_raw(self.next_id.fetch_add(1))
    }

    /// Makes the next `add_object` call fail as if the client ran out of memory.
    pub fn fail_next_add_object(&self) {
        self.fail_add_object.set(true);
    }

    pub fn has_object(&self, id: ObjectId) -> bool {
        self.objects.contains(&id)
    }

    pub fn interface_of(&self, id: ObjectId) -> Option<Interface> {
        self.objects.get(&id).map(|(interface, _)| interface)
    }

    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn removed(&self) -> Vec<ObjectId> {
        self.removed.borrow().clone()
    }

    pub fn events(&self) -> Vec<Ev> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<Ev> {
        mem::take(&mut *self.events.borrow_mut())
    }

    pub fn no_memory(&self) -> u32 {
        self.no_memory.get()
    }
}

impl Client for TestClient {
    fn id(&self) -> ClientId {
        self.id
    }

    fn add_object(
        &self,
        id: ObjectId,
        interface: Interface,
        version: Version,
    ) -> Result<(), ClientError> {
        if self.fail_add_object.replace(false) {
            return Err(ClientError::NoMemory);
        }
        if self.objects.contains(&id) {
            return Err(ClientError::ObjectIdInUse(id));
        }
        self.objects.set(id, (interface, version));
        Ok(())
    }

    fn remove_object(&self, id: ObjectId) {
        if self.objects.remove(&id).is_none() {
            log::warn!("Client {} removed unknown object {}", self.id, id);
        }
        self.removed.borrow_mut().push(id);
    }

    fn event(&self, event: Event<'_>) {
        if !self.objects.contains(&event.self_id()) {
            log::error!("Event {:?} sent to unknown object", event);
        }
        self.events.borrow_mut().push(Ev::from(&event));
    }

    fn post_no_memory(&self) {
        self.no_memory.fetch_add(1);
    }
}
