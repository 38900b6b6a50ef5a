
use {
    crate::utils::{clonecell::CloneCell, numcell::NumCell, rc_eq::rc_eq},
    isnt::std_1::vec::IsntVecExt,
    std::{
        cell::{Cell, RefCell},
        marker::PhantomData,
        mem,
        rc::Rc,
    },
};

const DEFAULT_TOKEN: u64 = 0;

/// The grab slot of one capability.
///
/// Grabs form a stack on top of the default grab. Ending a grab restores the
/// grab that was active when it was started.
pub struct GrabHolder<G: ?Sized> {
    default: Rc<G>,
    active: CloneCell<Rc<G>>,
    token: Cell<u64>,
    saved: RefCell<Vec<(u64, Rc<G>)>>,
    next_token: NumCell<u64>,
    first_live_token: Cell<u64>,
}

/// Proof that a grab is active. Must be passed back to end the grab.
#[must_use = "the grab stays active until the handle is used to end it"]
pub struct GrabHandle<G: ?Sized> {
    token: u64,
    _phantom: PhantomData<Rc<G>>,
}

impl<G: ?Sized> GrabHandle<G> {
    pub fn token(&self) -> u64 {
        self.token
    }
}

impl<G: ?Sized> GrabHolder<G> {
    pub fn new(default: Rc<G>) -> Self {
        Self {
            active: CloneCell::new(default.clone()),
            default,
            token: Cell::new(DEFAULT_TOKEN),
            saved: Default::default(),
            next_token: NumCell::new(DEFAULT_TOKEN + 1),
            first_live_token: Cell::new(DEFAULT_TOKEN + 1),
        }
    }

    pub fn get(&self) -> Rc<G> {
        self.active.get()
    }

    pub fn has_grab(&self) -> bool {
        self.token.get() != DEFAULT_TOKEN
    }

    pub fn depth(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn start(&self, grab: Rc<G>) -> GrabHandle<G> {
        let token = self.next_token.fetch_add(1);
        let prev = self.active.set(grab);
        let prev_token = self.token.replace(token);
        self.saved.borrow_mut().push((prev_token, prev));
        GrabHandle {
            token,
            _phantom: Default::default(),
        }
    }

    /// Restores the grab that was active before `handle`'s grab was started and
    /// returns the ended grab.
    ///
    /// Returns `None` if the grab was already abandoned by [`Self::reset`].
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not belong to the most recently started grab.
    pub fn end(&self, handle: GrabHandle<G>) -> Option<Rc<G>> {
        if handle.token < self.first_live_token.get() {
            return None;
        }
        assert_eq!(
            handle.token,
            self.token.get(),
            "Grab ended out of order. Grabs must be ended in the reverse order in which they were started",
        );
        let (prev_token, prev) = match self.saved.borrow_mut().pop() {
            Some(saved) => saved,
            None => unreachable!("an active grab always has a saved predecessor"),
        };
        self.token.set(prev_token);
        Some(self.active.set(prev))
    }

    /// Reinstalls the default grab and forgets all saved grabs.
    ///
    /// Returns the grabs that were abandoned, most recent first. Ending an
    /// abandoned grab later is a no-op.
    pub fn reset(&self) -> Vec<Rc<G>> {
        let mut abandoned = vec![];
        self.first_live_token.set(self.next_token.get());
        let saved = mem::take(&mut *self.saved.borrow_mut());
        let active = self.active.set(self.default.clone());
        self.token.set(DEFAULT_TOKEN);
        if !rc_eq(&active, &self.default) {
            abandoned.push(active);
        }
        for (_, grab) in saved.into_iter().rev() {
            if !rc_eq(&grab, &self.default) {
                abandoned.push(grab);
            }
        }
        if abandoned.is_not_empty() {
            log::debug!("Abandoned {} grabs", abandoned.len());
        }
        abandoned
    }
}
