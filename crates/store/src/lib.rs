//! Shared client-side session state.
//!
//! [`SessionStore`] is an explicit, cloneable state container rather than a
//! process-wide singleton, so every test (and every embedder) can hold its
//! own isolated instance. It tracks the active session id, the analysis
//! result computed for it, and one transient notification with an auto-hide
//! timer.
//!
//! Timer contract: at most one auto-hide timer is outstanding. Showing a new
//! notification cancels the pending timer before scheduling its own, so a
//! stale timer can never clear a newer notification.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use tubenote_core::session::AnalysisResult;

/// How long a notification stays visible unless replaced or hidden first.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

struct StoreInner {
    session_id: Option<String>,
    analysis_result: Option<AnalysisResult>,
    notification: Option<Notification>,
    /// Pending auto-hide task, replaced atomically on each show.
    timer: Option<JoinHandle<()>>,
    /// Monotonic timer generation. A timer may only clear the notification
    /// if its generation is still current; an aborted task that already
    /// passed its sleep loses the race here instead of clearing a newer
    /// notification.
    timer_generation: u64,
}

/// Cloneable handle to shared session state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                session_id: None,
                analysis_result: None,
                notification: None,
                timer: None,
                timer_generation: 0,
            })),
        }
    }

    /// Currently active session id, if any.
    pub fn session_id(&self) -> Option<String> {
        self.inner.lock().session_id.clone()
    }

    /// Replaces the active session id unconditionally.
    ///
    /// Switching to a different id drops the analysis result, which was
    /// computed for the previous session.
    pub fn set_session_id(&self, id: impl Into<String>) {
        let id = id.into();
        let mut inner = self.inner.lock();
        if inner.session_id.as_deref() != Some(id.as_str()) {
            inner.analysis_result = None;
        }
        debug!(session_id = %id, "session id set");
        inner.session_id = Some(id);
    }

    /// Clears the active session id and the analysis result tied to it.
    /// Idempotent.
    pub fn clear_session_id(&self) {
        let mut inner = self.inner.lock();
        inner.session_id = None;
        inner.analysis_result = None;
        debug!("session id cleared");
    }

    /// Analysis result for the active session, if one has been stored.
    pub fn analysis_result(&self) -> Option<AnalysisResult> {
        self.inner.lock().analysis_result.clone()
    }

    /// Replaces the stored analysis result unconditionally.
    pub fn set_analysis_result(&self, result: AnalysisResult) {
        self.inner.lock().analysis_result = Some(result);
        debug!("analysis result set");
    }

    /// Clears the stored analysis result. Idempotent.
    pub fn clear_analysis_result(&self) {
        self.inner.lock().analysis_result = None;
    }

    /// Currently visible notification, if any.
    pub fn notification(&self) -> Option<Notification> {
        self.inner.lock().notification.clone()
    }

    /// Shows a notification with the default auto-hide delay.
    pub fn notify(&self, notification: Notification) {
        self.show_notification(notification, DEFAULT_NOTIFICATION_TTL);
    }

    /// Shows a notification and schedules a single-shot auto-hide after
    /// `ttl`. Cancels any pending auto-hide first, so the newest
    /// notification always owns the only outstanding timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_notification(&self, notification: Notification, ttl: Duration) {
        let mut inner = self.inner.lock();

        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.timer_generation += 1;
        let generation = inner.timer_generation;

        debug!(kind = ?notification.kind, ttl_ms = ttl.as_millis() as u64, "notification shown");
        inner.notification = Some(notification);

        let store = self.clone();
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            store.expire_notification(generation);
        }));
    }

    /// Hides the notification immediately and cancels any pending auto-hide.
    /// No-op when nothing is visible.
    pub fn hide_notification(&self) {
        let mut inner = self.inner.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.timer_generation += 1;
        inner.notification = None;
    }

    fn expire_notification(&self, generation: u64) {
        let mut inner = self.inner.lock();
        if inner.timer_generation == generation {
            debug!("notification expired");
            inner.notification = None;
            inner.timer = None;
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
