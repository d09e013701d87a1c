//! Pairing selection
//!
//! Fixed snack/drink pairings keyed by category.

use serde::Serialize;

use crate::models::SnackLocation;
use crate::weather::SnackCategory;

/// A complementary snack/drink suggestion for a category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PairingSuggestion {
    pub category: SnackCategory,
    pub suggestion: String,
}

/// Derive the pairing suggestion for a category
///
/// The lookup is keyed solely by the category; the top-ranked location is
/// accepted so pairings can later take the venue into account, and does not
/// affect the current output. The match is total over the category set, so
/// there is no failure path.
#[must_use]
pub fn pair(category: SnackCategory, _top_location: Option<&SnackLocation>) -> PairingSuggestion {
    let suggestion = match category {
        SnackCategory::RefreshingCold => "frozen treat + iced drink",
        SnackCategory::WarmComfort => "baked good + hot beverage",
        SnackCategory::HeartyWarm => "savory snack + soup",
        SnackCategory::CrunchyNeutral => "chips + dip",
        SnackCategory::LightSnack => "fruit + water",
    };

    PairingSuggestion {
        category,
        suggestion: suggestion.to_string(),
    }
}
