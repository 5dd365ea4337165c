use serde::Serialize;

/// Status filter of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    #[default]
    All,
    Current, // till = true
    Past,    // till = false
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Current => "current",
            StatusFilter::Past => "past",
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "" | "all" => Some(StatusFilter::All),
            "current" | "c" => Some(StatusFilter::Current),
            "past" | "p" => Some(StatusFilter::Past),
            _ => None,
        }
    }

    pub fn matches(&self, till: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Current => till,
            StatusFilter::Past => !till,
        }
    }
}
