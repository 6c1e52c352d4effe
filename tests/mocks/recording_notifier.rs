use contact_desk::services::{Notice, Notifier};
use std::sync::{Arc, Mutex};

/// Notifier that records every notice for assertions.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn successes(&self) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| matches!(n, Notice::Success(_)))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| matches!(n, Notice::Failure(_)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
