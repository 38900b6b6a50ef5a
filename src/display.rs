use {
    crate::utils::{numcell::NumCell, signal::Signal},
    std::{cell::Cell, rc::Rc},
};

/// A display session.
///
/// Serials are display-wide. Every seat created on a display is destroyed when
/// the display is destroyed.
pub struct Display {
    serial: NumCell<u32>,
    destroyed: Cell<bool>,
    pub destroy: Signal<()>,
}

impl Display {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            serial: NumCell::new(0),
            destroyed: Cell::new(false),
            destroy: Default::default(),
        })
    }

    pub fn next_serial(&self) -> u32 {
        self.serial.next_wrapping()
    }

    pub fn last_serial(&self) -> u32 {
        self.serial.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        log::info!("Destroying display");
        self.destroy.emit(&());
        self.destroy.clear();
    }
}
