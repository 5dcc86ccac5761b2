use crate::focus::deferred::DeferredFocus;
use crate::focus::traversal::FocusTarget;
use crate::store::kv::KeyValue;

/// Message type that collapses the tray from outside (a programmatic close,
/// not a user action).
pub const SIDEBAR_CLOSE_MESSAGE: &str = "learning.events.sidebar.close";

pub fn tray_status_key(course_id: &str) -> String {
    format!("notificationTrayStatus.{course_id}")
}

pub fn tray_focus_key(course_id: &str) -> String {
    format!("notificationTrayFocus.{course_id}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayStatus {
    Open,
    Closed,
}

/// How a transition was initiated. Keyboard opens move focus into the tray;
/// pointer opens leave focus where it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Pointer,
}

/// The notification tray's open/closed state machine for one course. Status
/// and the focus-pending flag are persisted per course id in the
/// session-scoped store, so switching courses neither leaks nor overwrites
/// another course's state.
pub struct TrayController {
    course_id: String,
    status: TrayStatus,
    focus_pending: bool,
}

impl TrayController {
    /// Initial state is Open unless the session store says otherwise for
    /// this course.
    pub fn load(course_id: &str, session: &dyn KeyValue) -> Self {
        let status = match session.get(&tray_status_key(course_id)).as_deref() {
            Some("closed") => TrayStatus::Closed,
            _ => TrayStatus::Open,
        };
        let focus_pending = matches!(
            session.get(&tray_focus_key(course_id)).as_deref(),
            Some("true")
        );
        Self {
            course_id: course_id.to_string(),
            status,
            focus_pending,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TrayStatus::Open
    }

    pub fn status(&self) -> TrayStatus {
        self.status
    }

    pub fn focus_pending(&self) -> bool {
        self.focus_pending
    }

    pub fn take_focus_pending(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }

    /// User-initiated close. Focus returns to the trigger control via the
    /// two-frame deferred hop so it lands only after the tray is gone.
    /// Idempotent: closing an already-closed tray persists nothing and
    /// schedules no focus move.
    pub fn close(&mut self, session: &mut dyn KeyValue, deferred: &mut DeferredFocus) {
        if self.status == TrayStatus::Closed {
            return;
        }
        self.status = TrayStatus::Closed;
        self.focus_pending = false;
        session.set(&tray_status_key(&self.course_id), "closed");
        session.set(&tray_focus_key(&self.course_id), "false");
        deferred.request(FocusTarget::TrayToggle);
    }

    /// User-initiated open. Keyboard activation raises `focus_pending` and
    /// asks for focus on the tray's close control; pointer activation leaves
    /// focus alone.
    pub fn open(&mut self, source: InputSource, session: &mut dyn KeyValue) -> Option<FocusTarget> {
        self.status = TrayStatus::Open;
        session.set(&tray_status_key(&self.course_id), "open");
        match source {
            InputSource::Keyboard => {
                self.focus_pending = true;
                session.set(&tray_focus_key(&self.course_id), "true");
                Some(FocusTarget::TrayClose)
            }
            InputSource::Pointer => {
                self.focus_pending = false;
                session.set(&tray_focus_key(&self.course_id), "false");
                None
            }
        }
    }

    pub fn toggle(
        &mut self,
        source: InputSource,
        session: &mut dyn KeyValue,
        deferred: &mut DeferredFocus,
    ) -> Option<FocusTarget> {
        if self.is_open() {
            self.close(session, deferred);
            None
        } else {
            self.open(source, session)
        }
    }

    /// External message event: unconditional Open → Closed without moving
    /// focus. Unknown message types are ignored.
    pub fn handle_message(&mut self, message_type: &str, session: &mut dyn KeyValue) {
        if message_type != SIDEBAR_CLOSE_MESSAGE {
            return;
        }
        if self.status == TrayStatus::Closed {
            return;
        }
        self.status = TrayStatus::Closed;
        self.focus_pending = false;
        session.set(&tray_status_key(&self.course_id), "closed");
        session.set(&tray_focus_key(&self.course_id), "false");
    }
}
