//! Field descriptors
//!
//! A [`Field`] is the extraction contract for one logical column: where it
//! lives, what to call it in error messages, and whether a blank cell is an
//! error. String fields additionally carry [`TextRules`].

/// Extraction contract for one field
#[derive(Debug, Clone)]
pub struct Field {
    /// Column index (0-based)
    pub column: u16,
    /// Human-readable description, used in error messages
    pub description: String,
    /// Whether a blank cell is an error
    pub required: bool,
}

impl Field {
    /// A field whose cell must not be blank
    pub fn required<S: Into<String>>(column: u16, description: S) -> Self {
        Self {
            column,
            description: description.into(),
            required: true,
        }
    }

    /// A field whose cell may be blank
    pub fn optional<S: Into<String>>(column: u16, description: S) -> Self {
        Self {
            column,
            description: description.into(),
            required: false,
        }
    }
}

/// Constraints applied to string fields
#[derive(Debug, Clone, Default)]
pub struct TextRules {
    /// Maximum character count, if constrained
    pub max_length: Option<usize>,
    /// Exact character count, if constrained
    pub exact_length: Option<usize>,
    /// Trim surrounding whitespace from the returned value
    pub trim: bool,
}

impl TextRules {
    /// No constraints, no trimming
    pub fn none() -> Self {
        Self::default()
    }

    /// Set a maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set an exact length
    pub fn exact_length(mut self, length: usize) -> Self {
        self.exact_length = Some(length);
        self
    }

    /// Trim the returned value
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }
}
