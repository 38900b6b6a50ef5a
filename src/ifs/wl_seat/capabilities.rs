use serde::Deserialize;

bitflags! {
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct SeatCapabilities(pub u32) {
        pub const POINTER = 1 << 0,
        pub const KEYBOARD = 1 << 1,
        pub const TOUCH = 1 << 2,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Pointer,
    Keyboard,
    Touch,
}

impl Capability {
    pub fn mask(self) -> SeatCapabilities {
        match self {
            Capability::Pointer => SeatCapabilities::POINTER,
            Capability::Keyboard => SeatCapabilities::KEYBOARD,
            Capability::Touch => SeatCapabilities::TOUCH,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Pointer => "pointer",
            Capability::Keyboard => "keyboard",
            Capability::Touch => "touch",
        }
    }
}

impl FromIterator<Capability> for SeatCapabilities {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        let mut caps = SeatCapabilities::none();
        for cap in iter {
            caps |= cap.mask();
        }
        caps
    }
}
