//! Forms backing the order plan browse actions.

use serde::Deserialize;

use crate::domain::types::PageSize;
use crate::forms::FormError;

/// Search form payload. The similarity filter arrives as free text.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub min_similarity: String,
}

impl SearchForm {
    /// Parses the similarity filter. Empty input means no filter; input that
    /// does not parse as a finite number is dropped silently instead of being
    /// rejected.
    #[must_use]
    pub fn min_similarity(&self) -> Option<f64> {
        let trimmed = self.min_similarity.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Page navigation payload.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    pub page: u32,
}

/// Rows-per-page payload; the raw value is validated against the offered
/// steps before it reaches the controller.
#[derive(Debug, Deserialize)]
pub struct PageSizeForm {
    pub size: u32,
}

impl TryFrom<PageSizeForm> for PageSize {
    type Error = FormError;

    fn try_from(form: PageSizeForm) -> Result<Self, Self::Error> {
        PageSize::new(form.size).map_err(|_| FormError::InvalidPageSize)
    }
}
