use crate::focus::traversal::FocusTarget;

/// Two-frame deferred focus. Moving focus to an element that is still being
/// unmounted or laid out lands on a stale target, so a requested move waits
/// two render frames before firing. A request carries the generation it was
/// made in; bumping the generation (course switch, screen change) turns any
/// in-flight request into a no-op, and a target that no longer exists when
/// the hop completes is silently skipped.
#[derive(Debug, Default)]
pub struct DeferredFocus {
    pending: Option<Pending>,
    generation: u64,
}

#[derive(Debug)]
struct Pending {
    target: FocusTarget,
    frames_left: u8,
    generation: u64,
}

impl DeferredFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule focus onto `target` after the next two frames. A newer
    /// request replaces an older in-flight one.
    pub fn request(&mut self, target: FocusTarget) {
        self.pending = Some(Pending {
            target,
            frames_left: 2,
            generation: self.generation,
        });
    }

    /// Invalidate any in-flight request.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance one render frame. Returns the target to focus when the two
    /// hops have elapsed and the target still exists.
    pub fn on_frame(&mut self, exists: impl Fn(FocusTarget) -> bool) -> Option<FocusTarget> {
        let pending = self.pending.as_mut()?;
        if pending.generation != self.generation {
            self.pending = None;
            return None;
        }
        pending.frames_left -= 1;
        if pending.frames_left > 0 {
            return None;
        }
        let target = pending.target;
        self.pending = None;
        if exists(target) { Some(target) } else { None }
    }
}
