// SPDX-License-Identifier: MPL-2.0
//! Operator review types: the reviewer's verdict on a prediction and the
//! transient draft composed in the panel.

use std::fmt;

/// The reviewer's verdict on a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Correct,
    Incorrect,
    Irrelevant,
}

impl ReviewStatus {
    /// All verdicts in the order the panel offers them.
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Correct,
        ReviewStatus::Incorrect,
        ReviewStatus::Irrelevant,
    ];

    /// The service's wire name for this verdict.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            ReviewStatus::Correct => "CORRECT",
            ReviewStatus::Incorrect => "INCORRECT",
            ReviewStatus::Irrelevant => "IRRELEVANT",
        }
    }

    /// Human-readable label shown on the verdict buttons.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ReviewStatus::Correct => "Correct",
            ReviewStatus::Incorrect => "Incorrect",
            ReviewStatus::Irrelevant => "Irrelevant",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The review being composed for the current prediction.
///
/// Exists only transiently: reset when a new prediction starts and after a
/// successful submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub status: Option<ReviewStatus>,
    pub comments: String,
}

impl ReviewDraft {
    /// Whether the operator has touched the draft.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        self.status.is_some() || !self.comments.is_empty()
    }

    /// Clears the draft back to its pristine state.
    pub fn reset(&mut self) {
        self.status = None;
        self.comments.clear();
    }
}
