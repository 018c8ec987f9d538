use std::cell::Cell;

/// Handle of the one pending `setTimeout` for something that must not be
/// scheduled twice. Storing a new handle gives back the one it replaces,
/// which the caller cancels.
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Cell<Option<i32>>,
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self {
            handle: Cell::new(None),
        }
    }

    pub fn replace(&self, handle: i32) -> Option<i32> {
        self.handle.replace(Some(handle))
    }

    /// Forget the pending handle once its timer has fired.
    pub fn take(&self) -> Option<i32> {
        self.handle.take()
    }
}
