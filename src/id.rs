use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in an [`ElementTree`](crate::tree::ElementTree).
    pub struct NodeId;
}

/// Owned string for debug/display purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the string content.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for Label {
    fn from(label: &str) -> Self {
        Label::new(label)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self { text }
    }
}
