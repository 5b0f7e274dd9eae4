//=========================================================================
// Subsystem Slot
//=========================================================================
//
// Exclusive owner of one boxed subsystem. Releasing empties the slot, so
// a second release (or a release of a slot that was never filled) does
// nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== SubsystemSlot =======================================================

pub struct SubsystemSlot<T: ?Sized + Subsystem> {
    inner: Option<Box<T>>,
}

impl<T: ?Sized + Subsystem> SubsystemSlot<T> {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn filled(subsystem: Box<T>) -> Self {
        Self {
            inner: Some(subsystem),
        }
    }

    /// Stores `subsystem`, returning whatever was held before.
    pub fn fill(&mut self, subsystem: Box<T>) -> Option<Box<T>> {
        self.inner.replace(subsystem)
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_deref_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Drops the held subsystem and empties the slot.
    ///
    /// Returns `true` if something was released.
    pub fn release(&mut self) -> bool {
        match self.inner.take() {
            Some(subsystem) => {
                debug!(target: "app", "Released {}", subsystem.name());
                true
            }
            None => false,
        }
    }
}

impl<T: ?Sized + Subsystem> Default for SubsystemSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

//=== LifecycleSlot =======================================================

/// Type-erased view over a slot so heterogeneous slots can be driven in
/// one ordered list.
pub trait LifecycleSlot {
    /// Name of the held subsystem, `None` if empty.
    fn subsystem_name(&self) -> Option<&'static str>;

    /// Runs `f` on the held subsystem. Empty slots are skipped.
    fn with_subsystem(&mut self, f: &mut dyn FnMut(&mut dyn Subsystem));

    fn release(&mut self) -> bool;
}

impl<T: ?Sized + Subsystem> LifecycleSlot for SubsystemSlot<T> {
    fn subsystem_name(&self) -> Option<&'static str> {
        self.get().map(|s| s.name())
    }

    fn with_subsystem(&mut self, f: &mut dyn FnMut(&mut dyn Subsystem)) {
        if let Some(subsystem) = self.inner.as_deref_mut() {
            f(&mut SubsystemRef(subsystem));
        }
    }

    fn release(&mut self) -> bool {
        SubsystemSlot::release(self)
    }
}

/// Forwards the lifecycle calls of an unsized `T` through a sized wrapper,
/// so `&mut T` can be handed out as `&mut dyn Subsystem`.
struct SubsystemRef<'a, T: ?Sized + Subsystem>(&'a mut T);

impl<T: ?Sized + Subsystem> Subsystem for SubsystemRef<'_, T> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn startup(&mut self) -> Result<(), super::SubsystemError> {
        self.0.startup()
    }

    fn begin_frame(&mut self) {
        self.0.begin_frame()
    }

    fn end_frame(&mut self) {
        self.0.end_frame()
    }

    fn shutdown(&mut self) {
        self.0.shutdown()
    }
}

//=========================================================================
// Tests
//=========================================================================
