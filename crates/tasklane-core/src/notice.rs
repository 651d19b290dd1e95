use std::collections::VecDeque;

/// Cap on retained notices; older ones are dropped first.
const NOTICE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message produced by the controller. The shell decides how
/// to present it (toast, status line, stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Single top-level sink for everything the user should see. Errors land
/// here instead of being swallowed at the call site; none are fatal.
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: VecDeque<Notice>,
}

impl NoticeLog {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        if self.entries.len() == NOTICE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(Notice { level, message });
    }

    /// Hand all pending notices to the shell, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.entries.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
