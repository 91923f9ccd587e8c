#![forbid(unsafe_code)]

/// Single-slot "ignore next notification" latch.
///
/// The engine arms the guard right before it replays a text change on the
/// surface. The surface then reports that change like any other, and the
/// first notification to reach the engine afterwards takes the guard and is
/// dropped. Arming twice without a notification in between still skips only
/// one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayGuard {
    armed: bool,
}

impl ReplayGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: false }
    }

    /// Suppress the next notification.
    pub fn arm(&mut self) {
        if self.armed {
            tracing::warn!(message = "history.guard.rearmed");
        }
        self.armed = true;
    }

    /// Disarm, returning whether the guard was armed.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}
