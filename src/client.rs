use {
    crate::{
        object::{Interface, ObjectId, Version},
        wire::Event,
    },
    std::fmt::{Display, Formatter},
    thiserror::Error,
};

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ClientId(u64);

impl ClientId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("The client ran out of memory")]
    NoMemory,
    #[error("Object id {0} is already in use")]
    ObjectIdInUse(ObjectId),
}

/// The connection of a client as seen by the seat.
///
/// Message framing, id allocation and dispatch are owned by the transport.
/// The seat only creates and destroys objects and queues events on them.
pub trait Client {
    fn id(&self) -> ClientId;

    /// Creates the server side of an object the client has allocated.
    fn add_object(
        &self,
        id: ObjectId,
        interface: Interface,
        version: Version,
    ) -> Result<(), ClientError>;

    /// Destroys an object and notifies the client about its destruction.
    fn remove_object(&self, id: ObjectId);

    fn event(&self, event: Event<'_>);

    fn post_no_memory(&self);
}
