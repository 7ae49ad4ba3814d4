use parking_lot::Mutex;
use pond::errors::ErrorCode;
use pond::services::notifications::{Notice, Notifier};

/// Keeps every notice it receives, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn ids(&self) -> Vec<ErrorCode> {
        self.notices.lock().iter().map(|notice| notice.id).collect()
    }

    pub fn count(&self, id: ErrorCode) -> usize {
        self.notices
            .lock()
            .iter()
            .filter(|notice| notice.id == id)
            .count()
    }

    pub fn messages(&self, id: ErrorCode) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|notice| notice.id == id)
            .map(|notice| notice.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
