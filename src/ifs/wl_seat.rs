mod capabilities;
mod focus;
mod grab;
mod kb_grab;
mod pointer_grab;
mod touch_grab;
pub mod wl_keyboard;
pub mod wl_pointer;
pub mod wl_touch;

pub use {
    capabilities::{Capability, SeatCapabilities},
    focus::{FocusState, FocusTarget, TouchPoint},
    grab::GrabHandle,
    kb_grab::{DefaultKeyboardGrab, KeyboardGrab},
    pointer_grab::{DefaultPointerGrab, PointerGrab},
    touch_grab::{DefaultTouchGrab, TouchGrab},
};
use {
    crate::{
        client::{Client, ClientError, ClientId},
        config::SeatConfig,
        display::Display,
        ifs::{
            ipc::{Drag, DynDataDevice, DynDataSource},
            wl_seat::{
                grab::GrabHolder, wl_keyboard::WlKeyboard, wl_pointer::SetCursorRequest,
                wl_pointer::WlPointer, wl_touch::WlTouch,
            },
        },
        object::{Interface, ObjectId, Version, WL_KEYBOARD, WL_POINTER, WL_SEAT, WL_TOUCH},
        utils::{
            clonecell::CloneCell,
            copyhashmap::CopyHashMap,
            errorfmt::ErrorFmt,
            numcell::NumCell,
            rc_eq::rc_eq,
            signal::{Signal, SignalListener},
        },
        wire::{ButtonState, Event, KeyState, Modifiers, ScrollAxis},
    },
    indexmap::IndexMap,
    smallvec::SmallVec,
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
    thiserror::Error,
};

pub const SEAT_VERSION: Version = Version(6);
pub const SEAT_NAME_SINCE: Version = Version(2);

linear_ids!(BindingIds, BindingId, u64);

type DataSourceSignal = Signal<Option<Rc<dyn DynDataSource>>>;

/// Signals emitted by a seat.
#[derive(Default)]
pub struct SeatEvents {
    pub start_drag: Signal<Rc<Drag>>,
    pub new_drag_icon: Signal<ObjectId>,
    pub request_set_cursor: Signal<SetCursorRequest>,
    pub selection: DataSourceSignal,
    pub primary_selection: DataSourceSignal,
    pub pointer_grab_begin: Signal<Rc<dyn PointerGrab>>,
    pub pointer_grab_end: Signal<Rc<dyn PointerGrab>>,
    pub keyboard_grab_begin: Signal<Rc<dyn KeyboardGrab>>,
    pub keyboard_grab_end: Signal<Rc<dyn KeyboardGrab>>,
    pub touch_grab_begin: Signal<Rc<dyn TouchGrab>>,
    pub touch_grab_end: Signal<Rc<dyn TouchGrab>>,
    pub destroy: Signal<Rc<WlSeatGlobal>>,
}

struct PointerState {
    focus: FocusState,
    grab: GrabHolder<dyn PointerGrab>,
    button_count: NumCell<u32>,
    grab_button: Cell<u32>,
    grab_serial: Cell<Option<u32>>,
}

impl Default for PointerState {
    fn default() -> Self {
        let default: Rc<dyn PointerGrab> = Rc::new(DefaultPointerGrab);
        Self {
            focus: Default::default(),
            grab: GrabHolder::new(default),
            button_count: Default::default(),
            grab_button: Default::default(),
            grab_serial: Default::default(),
        }
    }
}

struct KeyboardState {
    focus: FocusState,
    grab: GrabHolder<dyn KeyboardGrab>,
}

impl Default for KeyboardState {
    fn default() -> Self {
        let default: Rc<dyn KeyboardGrab> = Rc::new(DefaultKeyboardGrab);
        Self {
            focus: Default::default(),
            grab: GrabHolder::new(default),
        }
    }
}

struct TouchState {
    points: CopyHashMap<i32, Rc<TouchPoint>>,
    grab: GrabHolder<dyn TouchGrab>,
    grab_serial: Cell<Option<u32>>,
}

impl Default for TouchState {
    fn default() -> Self {
        let default: Rc<dyn TouchGrab> = Rc::new(DefaultTouchGrab);
        Self {
            points: Default::default(),
            grab: GrabHolder::new(default),
            grab_serial: Default::default(),
        }
    }
}

pub struct WlSeatGlobal {
    display: Rc<Display>,
    seat_name: RefCell<String>,
    capabilities: Cell<SeatCapabilities>,
    max_version: Version,
    binding_ids: BindingIds,
    bindings: RefCell<IndexMap<BindingId, Rc<WlSeat>, ahash::RandomState>>,
    pointer: PointerState,
    keyboard: KeyboardState,
    touch: TouchState,
    selection: CloneCell<Option<Rc<dyn DynDataSource>>>,
    selection_serial: Cell<Option<u32>>,
    primary_selection: CloneCell<Option<Rc<dyn DynDataSource>>>,
    primary_selection_serial: Cell<Option<u32>>,
    display_destroy: RefCell<Option<SignalListener<()>>>,
    destroyed: Cell<bool>,
    pub events: SeatEvents,
}

impl WlSeatGlobal {
    pub fn new(display: &Rc<Display>, seat_name: &str) -> Rc<Self> {
        Self::create(display, seat_name, SeatCapabilities::none(), SEAT_VERSION)
    }

    pub fn with_config(display: &Rc<Display>, config: &SeatConfig) -> Rc<Self> {
        let version = Version(config.max_version.clamp(1, SEAT_VERSION.0));
        Self::create(display, &config.name, config.seat_capabilities(), version)
    }

    fn create(
        display: &Rc<Display>,
        seat_name: &str,
        capabilities: SeatCapabilities,
        max_version: Version,
    ) -> Rc<Self> {
        let slf = Rc::new(Self {
            display: display.clone(),
            seat_name: RefCell::new(seat_name.to_string()),
            capabilities: Cell::new(capabilities),
            max_version,
            binding_ids: Default::default(),
            bindings: Default::default(),
            pointer: Default::default(),
            keyboard: Default::default(),
            touch: Default::default(),
            selection: Default::default(),
            selection_serial: Default::default(),
            primary_selection: Default::default(),
            primary_selection_serial: Default::default(),
            display_destroy: Default::default(),
            destroyed: Cell::new(false),
            events: Default::default(),
        });
        if display.is_destroyed() {
            log::warn!("Seat {} was created on a display that has been destroyed", seat_name);
        }
        let seat = Rc::downgrade(&slf);
        let listener = display.destroy.subscribe(move |_| {
            if let Some(seat) = seat.upgrade() {
                seat.destroy();
            }
        });
        *slf.display_destroy.borrow_mut() = Some(listener);
        log::info!("Created seat {} ({:?})", seat_name, capabilities);
        slf
    }

    pub fn seat_name(&self) -> String {
        self.seat_name.borrow().clone()
    }

    pub fn capabilities(&self) -> SeatCapabilities {
        self.capabilities.get()
    }

    pub fn max_version(&self) -> Version {
        self.max_version
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn set_capabilities(&self, capabilities: SeatCapabilities) {
        let old = self.capabilities.replace(capabilities);
        if old != capabilities {
            log::info!(
                "Capabilities of seat {} changed from {:?} to {:?}",
                self.seat_name.borrow(),
                old,
                capabilities,
            );
        }
        for binding in self.bindings() {
            binding.send_capabilities();
        }
    }

    pub fn set_name(&self, name: &str) {
        let old = self.seat_name.replace(name.to_string());
        log::info!("Renaming seat {} to {}", old, name);
        for binding in self.bindings() {
            if binding.version >= SEAT_NAME_SINCE {
                binding.send_name(name);
            }
        }
    }

    /// Handles a client binding the seat global.
    pub fn bind(
        self: &Rc<Self>,
        client: &Rc<dyn Client>,
        id: ObjectId,
        version: Version,
    ) -> Result<Rc<WlSeat>, WlSeatError> {
        if self.destroyed.get() {
            return Err(WlSeatError::SeatDestroyed);
        }
        if version.0 == 0 || version > self.max_version {
            return Err(WlSeatError::UnsupportedVersion {
                requested: version,
                supported: self.max_version,
            });
        }
        if self.bindings.borrow_mut().try_reserve(1).is_err() {
            log::warn!("Could not allocate a seat binding for client {}", client.id());
            client.post_no_memory();
            return Err(WlSeatError::NoMemory);
        }
        if let Err(e) = client.add_object(id, WL_SEAT, version) {
            return Err(handle_client_error(&**client, e));
        }
        let obj = Rc::new(WlSeat {
            id: self.binding_ids.next(),
            object_id: id,
            client: client.clone(),
            global: self.clone(),
            version,
            pointers: Default::default(),
            keyboards: Default::default(),
            touches: Default::default(),
            data_devices: Default::default(),
            primary_selection_devices: Default::default(),
            destroyed: Cell::new(false),
            on_destroy: Default::default(),
        });
        self.bindings.borrow_mut().insert(obj.id, obj.clone());
        log::debug!(
            "Client {} bound seat {} with version {} as binding {}",
            client.id(),
            self.seat_name.borrow(),
            version,
            obj.id,
        );
        if version >= SEAT_NAME_SINCE {
            obj.send_name(&self.seat_name());
        }
        obj.send_capabilities();
        Ok(obj)
    }

    /// Returns the live bindings in the order in which they were created.
    pub fn bindings(&self) -> Vec<Rc<WlSeat>> {
        self.bindings
            .borrow()
            .values()
            .filter(|b| b.is_alive())
            .cloned()
            .collect()
    }

    pub fn num_bindings(&self) -> usize {
        self.bindings.borrow().values().filter(|b| b.is_alive()).count()
    }

    pub fn binding(&self, id: BindingId) -> Option<Rc<WlSeat>> {
        self.bindings
            .borrow()
            .get(&id)
            .filter(|b| b.is_alive())
            .cloned()
    }

    /// Returns the most recent live binding created by `client`.
    pub fn client_for_id(&self, client: ClientId) -> Option<Rc<WlSeat>> {
        self.bindings
            .borrow()
            .values()
            .rev()
            .find(|b| b.is_alive() && b.client.id() == client)
            .cloned()
    }

    fn focused_binding(&self, focus: &FocusState) -> Option<Rc<WlSeat>> {
        focus.binding().and_then(|id| self.binding(id))
    }

    pub fn pointer_focus(&self) -> &FocusState {
        &self.pointer.focus
    }

    pub fn keyboard_focus(&self) -> &FocusState {
        &self.keyboard.focus
    }

    /// Returns the binding that has focus for `capability`.
    ///
    /// Touch focus is tracked per touch point and always returns `None` here.
    /// See [`Self::touch_point`].
    pub fn focused_client(&self, capability: Capability) -> Option<BindingId> {
        match capability {
            Capability::Pointer => self.pointer.focus.binding(),
            Capability::Keyboard => self.keyboard.focus.binding(),
            Capability::Touch => None,
        }
    }

    fn binding_destroyed(&self, binding: &WlSeat) {
        if self.pointer.focus.clear_binding(binding.id) {
            log::debug!("Binding {} lost pointer focus", binding.id);
        }
        if self.keyboard.focus.clear_binding(binding.id) {
            log::debug!("Binding {} lost keyboard focus", binding.id);
        }
        for point in self.touch.points.values() {
            if point.binding() == Some(binding.id) {
                point.detach();
            }
        }
    }

    /// Clears all references to a surface that has been destroyed.
    ///
    /// No leave events are sent.
    pub fn surface_destroyed(&self, target: FocusTarget) {
        if self.pointer.focus.target() == Some(target) {
            self.pointer.focus.clear();
        }
        if self.keyboard.focus.target() == Some(target) {
            self.keyboard.focus.clear();
        }
        for point in self.touch.points.values() {
            if point.target == target {
                point.detach();
            }
        }
    }

    /// Returns whether `serial` is the serial of the button press or touch down
    /// that started the current implicit grab.
    pub fn validate_grab_serial(&self, serial: u32) -> bool {
        self.pointer.grab_serial.get() == Some(serial)
            || self.touch.grab_serial.get() == Some(serial)
    }

    pub fn pointer_grab_serial(&self) -> Option<u32> {
        self.pointer.grab_serial.get()
    }

    pub fn pointer_grab_button(&self) -> u32 {
        self.pointer.grab_button.get()
    }

    pub fn pointer_button_count(&self) -> u32 {
        self.pointer.button_count.get()
    }

    pub fn touch_grab_serial(&self) -> Option<u32> {
        self.touch.grab_serial.get()
    }

    pub fn pointer_enter(&self, target: FocusTarget, x: f64, y: f64) {
        self.pointer_set_focus(Some(target), x, y);
    }

    pub fn pointer_clear_focus(&self) {
        self.pointer_set_focus(None, 0.0, 0.0);
    }

    fn pointer_set_focus(&self, target: Option<FocusTarget>, x: f64, y: f64) {
        let focus = &self.pointer.focus;
        if focus.target() == target {
            return;
        }
        if let (Some(old), Some(binding)) = (focus.target(), self.focused_binding(focus)) {
            let serial = self.display.next_serial();
            for pointer in binding.pointers() {
                pointer.send_leave(serial, old.surface);
            }
        }
        let mut binding_id = None;
        let mut serial = None;
        if let Some(target) = target
            && let Some(binding) = self.client_for_id(target.client)
        {
            let s = self.display.next_serial();
            for pointer in binding.pointers() {
                pointer.send_enter(s, target.surface, x, y);
            }
            binding_id = Some(binding.id);
            serial = Some(s);
        }
        focus.set(target, binding_id, serial);
    }

    pub fn pointer_send_motion(&self, time: u32, x: f64, y: f64) {
        if let Some(binding) = self.focused_binding(&self.pointer.focus) {
            for pointer in binding.pointers() {
                pointer.send_motion(time, x, y);
            }
        }
    }

    pub fn pointer_send_button(&self, time: u32, button: u32, state: ButtonState) -> u32 {
        let Some(binding) = self.focused_binding(&self.pointer.focus) else {
            return 0;
        };
        let serial = self.display.next_serial();
        for pointer in binding.pointers() {
            pointer.send_button(serial, time, button, state);
        }
        serial
    }

    pub fn pointer_send_axis(&self, time: u32, axis: ScrollAxis, value: f64) {
        if let Some(binding) = self.focused_binding(&self.pointer.focus) {
            for pointer in binding.pointers() {
                pointer.send_axis(time, axis, value);
            }
        }
    }

    pub fn pointer_send_frame(&self) {
        if let Some(binding) = self.focused_binding(&self.pointer.focus) {
            for pointer in binding.pointers() {
                pointer.send_frame();
            }
        }
    }

    pub fn pointer_notify_enter(self: &Rc<Self>, target: FocusTarget, x: f64, y: f64) {
        self.pointer.grab.get().enter(self, target, x, y);
    }

    pub fn pointer_notify_clear_focus(self: &Rc<Self>) {
        self.pointer.grab.get().clear_focus(self);
    }

    pub fn pointer_notify_motion(self: &Rc<Self>, time: u32, x: f64, y: f64) {
        self.pointer.grab.get().motion(self, time, x, y);
    }

    /// Routes a button event through the active pointer grab and returns the
    /// serial of the delivered event or 0.
    pub fn pointer_notify_button(self: &Rc<Self>, time: u32, button: u32, state: ButtonState) -> u32 {
        let pointer = &self.pointer;
        match state {
            ButtonState::Pressed => {
                if pointer.button_count.fetch_add(1) == 0 {
                    pointer.grab_button.set(button);
                }
            }
            ButtonState::Released => {
                if pointer.button_count.get() > 0 {
                    pointer.button_count.fetch_sub(1);
                }
            }
        }
        let serial = pointer.grab.get().button(self, time, button, state);
        if serial != 0 && state == ButtonState::Pressed && pointer.button_count.get() == 1 {
            pointer.grab_serial.set(Some(serial));
        }
        serial
    }

    pub fn pointer_notify_axis(self: &Rc<Self>, time: u32, axis: ScrollAxis, value: f64) {
        self.pointer.grab.get().axis(self, time, axis, value);
    }

    pub fn pointer_notify_frame(self: &Rc<Self>) {
        self.pointer.grab.get().frame(self);
    }

    pub fn keyboard_enter(&self, target: FocusTarget, keys: &[u32], modifiers: Modifiers) {
        self.keyboard_set_focus(Some(target), keys, modifiers);
    }

    pub fn keyboard_clear_focus(&self) {
        self.keyboard_set_focus(None, &[], Modifiers::default());
    }

    fn keyboard_set_focus(&self, target: Option<FocusTarget>, keys: &[u32], modifiers: Modifiers) {
        let focus = &self.keyboard.focus;
        if focus.target() == target {
            return;
        }
        if let (Some(old), Some(binding)) = (focus.target(), self.focused_binding(focus)) {
            let serial = self.display.next_serial();
            for keyboard in binding.keyboards() {
                keyboard.send_leave(serial, old.surface);
            }
        }
        let mut binding_id = None;
        let mut serial = None;
        if let Some(target) = target
            && let Some(binding) = self.client_for_id(target.client)
        {
            let s = self.display.next_serial();
            let keyboards = binding.keyboards();
            for keyboard in &keyboards {
                keyboard.send_enter(s, target.surface, keys);
            }
            let modifiers_serial = self.display.next_serial();
            for keyboard in &keyboards {
                keyboard.send_modifiers(modifiers_serial, modifiers);
            }
            binding_id = Some(binding.id);
            serial = Some(s);
        }
        focus.set(target, binding_id, serial);
    }

    pub fn keyboard_send_key(&self, time: u32, key: u32, state: KeyState) {
        if let Some(binding) = self.focused_binding(&self.keyboard.focus) {
            let serial = self.display.next_serial();
            for keyboard in binding.keyboards() {
                keyboard.send_key(serial, time, key, state);
            }
        }
    }

    pub fn keyboard_send_modifiers(&self, modifiers: Modifiers) {
        if let Some(binding) = self.focused_binding(&self.keyboard.focus) {
            let serial = self.display.next_serial();
            for keyboard in binding.keyboards() {
                keyboard.send_modifiers(serial, modifiers);
            }
        }
    }

    pub fn keyboard_notify_enter(
        self: &Rc<Self>,
        target: FocusTarget,
        keys: &[u32],
        modifiers: Modifiers,
    ) {
        self.keyboard.grab.get().enter(self, target, keys, modifiers);
    }

    pub fn keyboard_notify_clear_focus(self: &Rc<Self>) {
        self.keyboard.grab.get().clear_focus(self);
    }

    pub fn keyboard_notify_key(self: &Rc<Self>, time: u32, key: u32, state: KeyState) {
        self.keyboard.grab.get().key(self, time, key, state);
    }

    pub fn keyboard_notify_modifiers(self: &Rc<Self>, modifiers: Modifiers) {
        self.keyboard.grab.get().modifiers(self, modifiers);
    }

    pub fn touch_point(&self, id: i32) -> Option<Rc<TouchPoint>> {
        self.touch.points.get(&id)
    }

    pub fn touch_num_points(&self) -> usize {
        self.touch.points.len()
    }

    fn touch_point_binding(&self, point: &TouchPoint) -> Option<Rc<WlSeat>> {
        point.binding().and_then(|id| self.binding(id))
    }

    fn touch_bindings(&self) -> SmallVec<[Rc<WlSeat>; 2]> {
        let mut bindings = SmallVec::<[Rc<WlSeat>; 2]>::new();
        for point in self.touch.points.values() {
            if let Some(binding) = self.touch_point_binding(&point)
                && !bindings.iter().any(|b| b.id == binding.id)
            {
                bindings.push(binding);
            }
        }
        bindings
    }

    pub fn touch_send_down(&self, point: &Rc<TouchPoint>, time: u32) -> u32 {
        let Some(binding) = self.touch_point_binding(point) else {
            return 0;
        };
        let serial = self.display.next_serial();
        let (x, y) = point.position();
        for touch in binding.touches() {
            touch.send_down(serial, time, point.target.surface, point.id, x, y);
        }
        serial
    }

    pub fn touch_send_up(&self, point: &Rc<TouchPoint>, time: u32) {
        let Some(binding) = self.touch_point_binding(point) else {
            return;
        };
        let serial = self.display.next_serial();
        for touch in binding.touches() {
            touch.send_up(serial, time, point.id);
        }
    }

    pub fn touch_send_motion(&self, point: &Rc<TouchPoint>, time: u32) {
        let Some(binding) = self.touch_point_binding(point) else {
            return;
        };
        let (x, y) = point.position();
        for touch in binding.touches() {
            touch.send_motion(time, point.id, x, y);
        }
    }

    pub fn touch_send_frame(&self) {
        for binding in self.touch_bindings() {
            for touch in binding.touches() {
                touch.send_frame();
            }
        }
    }

    /// Sends `cancel` to every client with an active touch point and forgets
    /// all touch points.
    pub fn touch_send_cancel(&self) {
        for binding in self.touch_bindings() {
            for touch in binding.touches() {
                touch.send_cancel();
            }
        }
        self.touch.points.clear();
    }

    /// Routes a touch down event through the active touch grab and returns the
    /// serial of the delivered event or 0.
    pub fn touch_notify_down(
        self: &Rc<Self>,
        target: FocusTarget,
        time: u32,
        id: i32,
        x: f64,
        y: f64,
    ) -> u32 {
        if self.touch.points.contains(&id) {
            log::warn!("Touch point {} is already down", id);
            return 0;
        }
        let binding = self.client_for_id(target.client).map(|b| b.id);
        let point = Rc::new(TouchPoint::new(id, target, binding, x, y));
        self.touch.points.set(id, point.clone());
        let serial = self.touch.grab.get().down(self, &point, time);
        if serial != 0 && self.touch.points.len() == 1 {
            self.touch.grab_serial.set(Some(serial));
        }
        serial
    }

    pub fn touch_notify_up(self: &Rc<Self>, time: u32, id: i32) {
        let Some(point) = self.touch.points.get(&id) else {
            log::debug!("Ignoring up event of unknown touch point {}", id);
            return;
        };
        self.touch.grab.get().up(self, &point, time);
        self.touch.points.remove(&id);
    }

    pub fn touch_notify_motion(self: &Rc<Self>, time: u32, id: i32, x: f64, y: f64) {
        let Some(point) = self.touch.points.get(&id) else {
            log::debug!("Ignoring motion event of unknown touch point {}", id);
            return;
        };
        point.set_position(x, y);
        self.touch.grab.get().motion(self, &point, time);
    }

    pub fn touch_notify_frame(self: &Rc<Self>) {
        self.touch.grab.get().frame(self);
    }

    pub fn pointer_grab(&self) -> Rc<dyn PointerGrab> {
        self.pointer.grab.get()
    }

    pub fn pointer_has_grab(&self) -> bool {
        self.pointer.grab.has_grab()
    }

    pub fn pointer_start_grab(&self, grab: Rc<dyn PointerGrab>) -> GrabHandle<dyn PointerGrab> {
        let handle = self.pointer.grab.start(grab.clone());
        log::debug!("Pointer grab {} started", handle.token());
        self.events.pointer_grab_begin.emit(&grab);
        handle
    }

    /// Ends a pointer grab and restores the grab that was active when it was
    /// started.
    ///
    /// Grabs that were cancelled because the seat was destroyed are ignored.
    ///
    /// # Panics
    ///
    /// Panics if a pointer grab that was started later is still active.
    pub fn pointer_end_grab(self: &Rc<Self>, handle: GrabHandle<dyn PointerGrab>) {
        let token = handle.token();
        let Some(grab) = self.pointer.grab.end(handle) else {
            log::debug!("Pointer grab {} was already cancelled", token);
            return;
        };
        log::debug!("Pointer grab {} ended", token);
        self.events.pointer_grab_end.emit(&grab);
        grab.cancel(self);
    }

    pub fn keyboard_grab(&self) -> Rc<dyn KeyboardGrab> {
        self.keyboard.grab.get()
    }

    pub fn keyboard_has_grab(&self) -> bool {
        self.keyboard.grab.has_grab()
    }

    pub fn keyboard_start_grab(
        &self,
        grab: Rc<dyn KeyboardGrab>,
    ) -> GrabHandle<dyn KeyboardGrab> {
        let handle = self.keyboard.grab.start(grab.clone());
        log::debug!("Keyboard grab {} started", handle.token());
        self.events.keyboard_grab_begin.emit(&grab);
        handle
    }

    /// # Panics
    ///
    /// Panics if a keyboard grab that was started later is still active.
    pub fn keyboard_end_grab(self: &Rc<Self>, handle: GrabHandle<dyn KeyboardGrab>) {
        let token = handle.token();
        let Some(grab) = self.keyboard.grab.end(handle) else {
            log::debug!("Keyboard grab {} was already cancelled", token);
            return;
        };
        log::debug!("Keyboard grab {} ended", token);
        self.events.keyboard_grab_end.emit(&grab);
        grab.cancel(self);
    }

    pub fn touch_grab(&self) -> Rc<dyn TouchGrab> {
        self.touch.grab.get()
    }

    pub fn touch_has_grab(&self) -> bool {
        self.touch.grab.has_grab()
    }

    pub fn touch_start_grab(&self, grab: Rc<dyn TouchGrab>) -> GrabHandle<dyn TouchGrab> {
        let handle = self.touch.grab.start(grab.clone());
        log::debug!("Touch grab {} started", handle.token());
        self.events.touch_grab_begin.emit(&grab);
        handle
    }

    /// # Panics
    ///
    /// Panics if a touch grab that was started later is still active.
    pub fn touch_end_grab(self: &Rc<Self>, handle: GrabHandle<dyn TouchGrab>) {
        let token = handle.token();
        let Some(grab) = self.touch.grab.end(handle) else {
            log::debug!("Touch grab {} was already cancelled", token);
            return;
        };
        log::debug!("Touch grab {} ended", token);
        self.events.touch_grab_end.emit(&grab);
        grab.cancel(self);
    }

    pub fn selection(&self) -> Option<Rc<dyn DynDataSource>> {
        self.selection.get()
    }

    pub fn primary_selection(&self) -> Option<Rc<dyn DynDataSource>> {
        self.primary_selection.get()
    }

    pub fn set_selection(self: &Rc<Self>, source: Option<Rc<dyn DynDataSource>>, serial: u32) {
        self.set_selection_(
            &self.selection,
            &self.selection_serial,
            &self.events.selection,
            source,
            serial,
        );
    }

    pub fn set_primary_selection(
        self: &Rc<Self>,
        source: Option<Rc<dyn DynDataSource>>,
        serial: u32,
    ) {
        self.set_selection_(
            &self.primary_selection,
            &self.primary_selection_serial,
            &self.events.primary_selection,
            source,
            serial,
        );
    }

    fn set_selection_(
        self: &Rc<Self>,
        field: &CloneCell<Option<Rc<dyn DynDataSource>>>,
        field_serial: &Cell<Option<u32>>,
        signal: &DataSourceSignal,
        source: Option<Rc<dyn DynDataSource>>,
        serial: u32,
    ) {
        if let Some(current) = field_serial.get()
            && serial_is_older(serial, current)
        {
            log::debug!(
                "Ignoring selection with serial {} older than the current serial {}",
                serial,
                current,
            );
            return;
        }
        let old = field.get();
        let unchanged = match (&old, &source) {
            (Some(old), Some(new)) => rc_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        field.set(source.clone());
        field_serial.set(Some(serial));
        if let Some(old) = old {
            old.send_cancelled(self);
        }
        signal.emit(&source);
    }

    /// Announces a drag that was started by a client.
    ///
    /// `serial` must be the serial of the implicit grab that started the drag.
    pub fn start_drag(&self, drag: Rc<Drag>, serial: u32) -> Result<(), WlSeatError> {
        if self.destroyed.get() {
            return Err(WlSeatError::SeatDestroyed);
        }
        if !self.validate_grab_serial(serial) {
            log::debug!("Rejecting drag with serial {}", serial);
            return Err(WlSeatError::InvalidGrabSerial(serial));
        }
        if let Some(icon) = drag.icon {
            self.events.new_drag_icon.emit(&icon);
        }
        self.events.start_drag.emit(&drag);
        Ok(())
    }

    /// Destroys the seat and every binding.
    ///
    /// Listeners of the destroy signal observe the seat before anything has been
    /// torn down.
    pub fn destroy(self: &Rc<Self>) {
        if self.destroyed.replace(true) {
            return;
        }
        log::info!("Destroying seat {}", self.seat_name.borrow());
        self.events.destroy.emit(self);
        let listener = self.display_destroy.borrow_mut().take();
        drop(listener);
        if let Some(source) = self.selection.take() {
            source.send_cancelled(self);
        }
        if let Some(source) = self.primary_selection.take() {
            source.send_cancelled(self);
        }
        let bindings: Vec<_> = self.bindings.borrow().values().cloned().collect();
        for binding in bindings {
            if binding.is_alive() {
                binding.client.remove_object(binding.object_id);
                binding.destroy();
            }
        }
        for grab in self.pointer.grab.reset() {
            self.events.pointer_grab_end.emit(&grab);
            grab.cancel(self);
        }
        for grab in self.keyboard.grab.reset() {
            self.events.keyboard_grab_end.emit(&grab);
            grab.cancel(self);
        }
        for grab in self.touch.grab.reset() {
            self.events.touch_grab_end.emit(&grab);
            grab.cancel(self);
        }
        self.pointer.focus.clear();
        self.keyboard.focus.clear();
        self.touch.points.clear();
    }
}

fn serial_is_older(serial: u32, current: u32) -> bool {
    (serial.wrapping_sub(current) as i32) < 0
}

fn handle_client_error(client: &dyn Client, e: ClientError) -> WlSeatError {
    log::warn!(
        "Could not create an object for client {}: {}",
        client.id(),
        ErrorFmt(&e),
    );
    if let ClientError::NoMemory = e {
        client.post_no_memory();
        return WlSeatError::NoMemory;
    }
    e.into()
}

/// The binding of a client to a seat.
pub struct WlSeat {
    pub id: BindingId,
    pub object_id: ObjectId,
    pub client: Rc<dyn Client>,
    pub global: Rc<WlSeatGlobal>,
    pub version: Version,
    pointers: CopyHashMap<ObjectId, Rc<WlPointer>>,
    keyboards: CopyHashMap<ObjectId, Rc<WlKeyboard>>,
    touches: CopyHashMap<ObjectId, Rc<WlTouch>>,
    data_devices: CopyHashMap<ObjectId, Rc<dyn DynDataDevice>>,
    primary_selection_devices: CopyHashMap<ObjectId, Rc<dyn DynDataDevice>>,
    destroyed: Cell<bool>,
    pub on_destroy: Signal<Rc<WlSeat>>,
}

impl WlSeat {
    fn send_capabilities(&self) {
        self.client.event(Event::Capabilities {
            self_id: self.object_id,
            capabilities: self.global.capabilities.get(),
        })
    }

    fn send_name(&self, name: &str) {
        self.client.event(Event::Name {
            self_id: self.object_id,
            name,
        })
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed.get()
    }

    fn has_capability(&self, capability: Capability) -> bool {
        if self.global.capabilities.get().contains(capability.mask()) {
            return true;
        }
        log::debug!(
            "Client {} requested a {} but seat {} does not have that capability",
            self.client.id(),
            capability.name(),
            self.global.seat_name.borrow(),
        );
        false
    }

    fn create_object<V: Clone>(
        &self,
        map: &CopyHashMap<ObjectId, V>,
        id: ObjectId,
        interface: Interface,
    ) -> Result<(), WlSeatError> {
        if map.lock().try_reserve(1).is_err() {
            log::warn!("Could not allocate a {} for client {}", interface, self.client.id());
            self.client.post_no_memory();
            return Err(WlSeatError::NoMemory);
        }
        if let Err(e) = self.client.add_object(id, interface, self.version) {
            return Err(handle_client_error(&*self.client, e));
        }
        Ok(())
    }

    /// Handles a `get_pointer` request.
    ///
    /// Returns `None` if the seat does not have the pointer capability.
    pub fn get_pointer(self: &Rc<Self>, id: ObjectId) -> Result<Option<Rc<WlPointer>>, WlSeatError> {
        if !self.is_alive() || !self.has_capability(Capability::Pointer) {
            return Ok(None);
        }
        self.create_object(&self.pointers, id, WL_POINTER)?;
        let p = Rc::new(WlPointer::new(id, self));
        self.pointers.set(id, p.clone());
        Ok(Some(p))
    }

    pub fn get_keyboard(
        self: &Rc<Self>,
        id: ObjectId,
    ) -> Result<Option<Rc<WlKeyboard>>, WlSeatError> {
        if !self.is_alive() || !self.has_capability(Capability::Keyboard) {
            return Ok(None);
        }
        self.create_object(&self.keyboards, id, WL_KEYBOARD)?;
        let k = Rc::new(WlKeyboard::new(id, self));
        self.keyboards.set(id, k.clone());
        Ok(Some(k))
    }

    pub fn get_touch(self: &Rc<Self>, id: ObjectId) -> Result<Option<Rc<WlTouch>>, WlSeatError> {
        if !self.is_alive() || !self.has_capability(Capability::Touch) {
            return Ok(None);
        }
        self.create_object(&self.touches, id, WL_TOUCH)?;
        let t = Rc::new(WlTouch::new(id, self));
        self.touches.set(id, t.clone());
        Ok(Some(t))
    }

    pub fn pointers(&self) -> Vec<Rc<WlPointer>> {
        self.pointers.values()
    }

    pub fn keyboards(&self) -> Vec<Rc<WlKeyboard>> {
        self.keyboards.values()
    }

    pub fn touches(&self) -> Vec<Rc<WlTouch>> {
        self.touches.values()
    }

    pub fn add_data_device(&self, device: Rc<dyn DynDataDevice>) {
        if !self.is_alive() {
            device.destroy();
            return;
        }
        self.data_devices.set(device.id(), device);
    }

    pub fn remove_data_device(&self, id: ObjectId) -> Option<Rc<dyn DynDataDevice>> {
        self.data_devices.remove(&id)
    }

    pub fn data_devices(&self) -> Vec<Rc<dyn DynDataDevice>> {
        self.data_devices.values()
    }

    pub fn add_primary_selection_device(&self, device: Rc<dyn DynDataDevice>) {
        if !self.is_alive() {
            device.destroy();
            return;
        }
        self.primary_selection_devices.set(device.id(), device);
    }

    pub fn remove_primary_selection_device(&self, id: ObjectId) -> Option<Rc<dyn DynDataDevice>> {
        self.primary_selection_devices.remove(&id)
    }

    pub fn primary_selection_devices(&self) -> Vec<Rc<dyn DynDataDevice>> {
        self.primary_selection_devices.values()
    }

    /// Handles a `release` request.
    pub fn release(self: &Rc<Self>) {
        if !self.is_alive() {
            return;
        }
        self.client.remove_object(self.object_id);
        self.destroy();
    }

    /// Tears down the binding after its protocol object has been destroyed.
    ///
    /// The destroy signal is emitted first, then the focus is cleared, then every
    /// owned object is destroyed, and finally the binding is unregistered.
    pub fn destroy(self: &Rc<Self>) {
        if self.destroyed.replace(true) {
            return;
        }
        self.on_destroy.emit(self);
        self.on_destroy.clear();
        self.global.binding_destroyed(self);
        for (_, pointer) in self.pointers.take() {
            pointer.destroy();
        }
        for (_, keyboard) in self.keyboards.take() {
            keyboard.destroy();
        }
        for (_, touch) in self.touches.take() {
            touch.destroy();
        }
        for (_, device) in self.data_devices.take() {
            device.destroy();
        }
        for (_, device) in self.primary_selection_devices.take() {
            device.destroy();
        }
        self.global.bindings.borrow_mut().shift_remove(&self.id);
        log::debug!("Client {} unbound seat binding {}", self.client.id(), self.id);
    }
}

#[derive(Debug, Error)]
pub enum WlSeatError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Could not allocate memory")]
    NoMemory,
    #[error("Version {requested} was requested but the seat supports at most version {supported}")]
    UnsupportedVersion {
        requested: Version,
        supported: Version,
    },
    #[error("The seat has been destroyed")]
    SeatDestroyed,
    #[error("Serial {0} does not belong to the current grab")]
    InvalidGrabSerial(u32),
}
efrom!(WlSeatError, ClientError);
