// WHY: standalone text normalization so scoring only ever sees one lowercase copy
// Word counting runs on the original text, matching the draft as the sender typed it

/// Draft text prepared for case-insensitive substring search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDraft {
    /// Full text lowercased
    pub lowered: String,
    /// Non-empty tokens after splitting the original text on whitespace runs
    pub word_count: usize,
}

impl NormalizedDraft {
    /// Normalize a draft with new allocation
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
            word_count: count_words(text),
        }
    }

    /// Substring containment, not word-boundary matching
    pub fn contains(&self, needle: &str) -> bool {
        self.lowered.contains(needle)
    }

    pub fn has_question(&self) -> bool {
        self.lowered.contains('?')
    }
}

/// Count whitespace-separated tokens, ignoring leading/trailing runs
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether text holds anything besides whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
