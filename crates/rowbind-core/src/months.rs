//! Locale month-name tables
//!
//! Month-name resolution is an explicit, injected table rather than a read of
//! ambient locale state, so coercion stays deterministic under test.

/// A table of month names for one locale
#[derive(Debug, Clone)]
pub struct MonthNames {
    names: [String; 12],
    abbreviations: Option<[String; 12]>,
}

impl MonthNames {
    /// Build a table from twelve full month names, January first
    pub fn new(names: [String; 12]) -> Self {
        Self {
            names,
            abbreviations: None,
        }
    }

    /// Attach three-letter (or locale-appropriate) abbreviations
    pub fn with_abbreviations(mut self, abbreviations: [String; 12]) -> Self {
        self.abbreviations = Some(abbreviations);
        self
    }

    /// English month names with standard abbreviations
    pub fn english() -> Self {
        fn arr(names: [&str; 12]) -> [String; 12] {
            names.map(String::from)
        }

        Self::new(arr([
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ]))
        .with_abbreviations(arr([
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ]))
    }

    /// Resolve a month name to its 1-based index, case-insensitively
    ///
    /// Abbreviations are consulted after full names, when present.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let position = |table: &[String; 12]| {
            table
                .iter()
                .position(|m| m.eq_ignore_ascii_case(name))
                .map(|i| i as u32 + 1)
        };

        position(&self.names).or_else(|| self.abbreviations.as_ref().and_then(position))
    }

    /// Get the full name for a 1-based month index
    pub fn name(&self, month: u32) -> Option<&str> {
        if (1..=12).contains(&month) {
            Some(self.names[month as usize - 1].as_str())
        } else {
            None
        }
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::english()
    }
}
