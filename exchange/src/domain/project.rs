//! Project (patent listing) data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::transaction::Amount;
use super::user::UserId;

pub use example_data::PROJECT_DESCRIPTION_MIN;

/// Validation errors raised by project constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The title was blank.
    EmptyTitle,
    /// The description was shorter than the minimum once trimmed.
    DescriptionTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// The category string named no known category.
    UnknownCategory {
        /// The rejected input.
        category: String,
    },
    /// The status string named no known status.
    UnknownStatus {
        /// The rejected input.
        status: String,
    },
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "project id must not be empty"),
            Self::EmptyTitle => write!(f, "project title is required"),
            Self::DescriptionTooShort { min } => {
                write!(f, "project description must be at least {min} characters")
            }
            Self::UnknownCategory { category } => write!(
                f,
                "unknown category '{category}'; expected tech, health, energy, or transport"
            ),
            Self::UnknownStatus { status } => write!(
                f,
                "unknown status '{status}'; expected active, pending, or expired"
            ),
        }
    }
}

impl std::error::Error for ProjectValidationError {}

impl ProjectValidationError {
    /// Input field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "project_id",
            Self::EmptyTitle => "title",
            Self::DescriptionTooShort { .. } => "description",
            Self::UnknownCategory { .. } => "category",
            Self::UnknownStatus { .. } => "status",
        }
    }
}

impl From<ProjectValidationError> for DomainError {
    fn from(value: ProjectValidationError) -> Self {
        Self::invalid_field(value.field(), value.to_string())
    }
}

/// Stable project identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Validate and construct a [`ProjectId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProjectValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ProjectId {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Project category.
///
/// Unrecognised category strings deserialise to [`ProjectCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    /// Technology.
    Tech,
    /// Health and medicine.
    Health,
    /// Energy.
    Energy,
    /// Transport and mobility.
    Transport,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl ProjectCategory {
    /// Categories a new project may be filed under.
    pub const SELECTABLE: [Self; 4] = [Self::Tech, Self::Health, Self::Energy, Self::Transport];

    /// Wire name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Health => "health",
            Self::Energy => "energy",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }

    /// Human readable category name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tech => "Technology",
            Self::Health => "Health",
            Self::Energy => "Energy",
            Self::Transport => "Transport",
            Self::Other => "Other",
        }
    }
}

impl FromStr for ProjectCategory {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| ProjectValidationError::UnknownCategory {
                category: s.to_owned(),
            })
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Open for investment.
    Active,
    /// Awaiting review.
    Pending,
    /// Closed.
    Expired,
}

impl ProjectStatus {
    /// Wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Expired => "expired",
        }
    }

    /// Human readable status name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending review",
            Self::Expired => "Expired",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Active, Self::Pending, Self::Expired]
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ProjectValidationError::UnknownStatus {
                status: s.to_owned(),
            })
    }
}

/// A patent listing on the exchange.
///
/// `creator_name` is copied from the creator when the project is listed and
/// may drift from the user record. `investment` and `investors` are counters
/// maintained by the ledger store, not derived from transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier.
    pub id: ProjectId,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: String,
    /// Category.
    pub category: ProjectCategory,
    /// Identifier of the creating user.
    pub creator_id: UserId,
    /// Creator display name at listing time.
    pub creator_name: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Cumulative invested amount.
    pub investment: Amount,
    /// Number of investments received, duplicates included.
    pub investors: u32,
    /// Number of developers attached.
    pub developers_count: u32,
}

/// Validated input for listing a new project.
///
/// ## Invariants
/// - `title` is non-empty once trimmed.
/// - `description` holds at least [`PROJECT_DESCRIPTION_MIN`] characters once
///   trimmed.
///
/// # Examples
/// ```
/// use exchange::domain::{ProjectCategory, ProjectDraft};
///
/// let draft = ProjectDraft::try_new(
///     "Drone de Livraison Autonome",
///     "Un drone autonome capable de livrer des colis en zone urbaine dense.",
///     ProjectCategory::Transport,
/// )
/// .expect("valid draft");
/// assert_eq!(draft.title(), "Drone de Livraison Autonome");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    title: String,
    description: String,
    category: ProjectCategory,
}

impl ProjectDraft {
    /// Validate the listing fields.
    pub fn try_new(
        title: &str,
        description: &str,
        category: ProjectCategory,
    ) -> Result<Self, ProjectValidationError> {
        let trimmed_title = title.trim();
        if trimmed_title.is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if !example_data::is_valid_project_description(description) {
            return Err(ProjectValidationError::DescriptionTooShort {
                min: PROJECT_DESCRIPTION_MIN,
            });
        }
        Ok(Self {
            title: trimmed_title.to_owned(),
            description: description.trim().to_owned(),
            category,
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Chosen category.
    #[must_use]
    pub fn category(&self) -> ProjectCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const LONG_DESCRIPTION: &str =
        "Un système portable qui purifie l'eau contaminée sans électricité.";

    #[rstest]
    #[case("", LONG_DESCRIPTION, ProjectValidationError::EmptyTitle)]
    #[case("   ", LONG_DESCRIPTION, ProjectValidationError::EmptyTitle)]
    #[case(
        "Drone",
        "Trop court.",
        ProjectValidationError::DescriptionTooShort { min: PROJECT_DESCRIPTION_MIN }
    )]
    fn draft_rejects_invalid_fields(
        #[case] title: &str,
        #[case] description: &str,
        #[case] expected: ProjectValidationError,
    ) {
        let err = ProjectDraft::try_new(title, description, ProjectCategory::Tech)
            .expect_err("invalid draft");
        assert_eq!(err, expected);
    }

    #[test]
    fn draft_trims_fields() {
        let draft = ProjectDraft::try_new(
            "  Drone  ",
            &format!("  {LONG_DESCRIPTION}  "),
            ProjectCategory::Transport,
        )
        .expect("valid draft");
        assert_eq!(draft.title(), "Drone");
        assert_eq!(draft.description(), LONG_DESCRIPTION);
    }

    #[test]
    fn description_length_counts_trimmed_characters() {
        let padded = format!("   {}   ", "a".repeat(PROJECT_DESCRIPTION_MIN - 1));
        assert!(ProjectDraft::try_new("Drone", &padded, ProjectCategory::Tech).is_err());
    }

    #[rstest]
    #[case("tech", ProjectCategory::Tech)]
    #[case("health", ProjectCategory::Health)]
    #[case("energy", ProjectCategory::Energy)]
    #[case("transport", ProjectCategory::Transport)]
    fn category_parses_selectable_names(#[case] raw: &str, #[case] expected: ProjectCategory) {
        assert_eq!(raw.parse::<ProjectCategory>(), Ok(expected));
    }

    #[test]
    fn category_rejects_other_input() {
        assert!("other".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn unknown_categories_deserialise_to_other() {
        let category: ProjectCategory =
            serde_json::from_value(json!("agriculture")).expect("deserialise category");
        assert_eq!(category, ProjectCategory::Other);
        assert_eq!(category.label(), "Other");
    }

    #[test]
    fn project_id_rejects_blank_input() {
        assert_eq!(ProjectId::new("  "), Err(ProjectValidationError::EmptyId));
    }

    #[rstest]
    #[case(ProjectValidationError::EmptyTitle, "title")]
    #[case(ProjectValidationError::DescriptionTooShort { min: 50 }, "description")]
    #[case(ProjectValidationError::EmptyId, "project_id")]
    fn conversions_name_the_rejected_field(
        #[case] failure: ProjectValidationError,
        #[case] field: &str,
    ) {
        let err = DomainError::from(failure);
        assert_eq!(err.field(), Some(field));
        assert_eq!(err.details(), Some(&json!({ "field": field })));
    }
}
