use slop_types::LogRecord;

/// Level and content filter applied to completed records
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact, case-sensitive level token to keep
    level: Option<String>,

    /// Case-sensitive substring the raw text must contain
    content: Option<String>,
}

impl RecordFilter {
    /// Filter that shows every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Only show records whose level equals `level`. Empty means unset.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = non_empty(level.into());
        self
    }

    /// Only show records whose raw text contains `content`. Empty means unset.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = non_empty(content.into());
        self
    }

    /// Check if a record passes every configured filter
    pub fn matches(&self, record: &LogRecord) -> bool {
        if self.level.as_ref().is_some_and(|level| record.level != *level) {
            return false;
        }

        match &self.content {
            Some(content) => record.raw.contains(content.as_str()),
            None => true,
        }
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Check if filter is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.content.is_none()
    }
}

impl std::fmt::Debug for RecordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFilter")
            .field("level", &self.level)
            .field("content", &self.content)
            .finish()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
