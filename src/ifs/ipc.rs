use {
    crate::{
        ifs::wl_seat::{BindingId, WlSeatGlobal},
        object::ObjectId,
    },
    std::rc::Rc,
};

/// A data source that can be installed as the selection of a seat or be
/// dragged.
pub trait DynDataSource {
    /// Called when the source is no longer used by the seat.
    fn send_cancelled(&self, seat: &Rc<WlSeatGlobal>);
}

/// A data device or primary selection device owned by a seat binding.
pub trait DynDataDevice {
    fn id(&self) -> ObjectId;

    /// Called when the binding that owns the device is destroyed.
    fn destroy(&self);
}

pub struct Drag {
    pub origin: Option<BindingId>,
    pub source: Option<Rc<dyn DynDataSource>>,
    pub icon: Option<ObjectId>,
}
