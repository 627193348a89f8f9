//! Searching the user directory and the project catalogue.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::project::{Project, ProjectCategory, ProjectValidationError};
use super::user::{User, UserRole, UserValidationError};

/// Role restriction for directory searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    /// Any role.
    #[default]
    All,
    /// One role only.
    Only(UserRole),
}

impl FromStr for RoleFilter {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Restriction for catalogue searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Any category.
    #[default]
    All,
    /// One category only.
    Only(ProjectCategory),
}

impl FromStr for CategoryFilter {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Users whose name or email contains `term` (case-insensitively) and whose
/// role passes `role`.
///
/// An empty term matches everyone.
#[must_use]
pub fn filter_users<'a>(users: &'a [User], term: &str, role: RoleFilter) -> Vec<&'a User> {
    let needle = term.trim().to_lowercase();
    users
        .iter()
        .filter(|user| match role {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => user.role() == wanted,
        })
        .filter(|user| {
            contains_folded(user.name().as_str(), &needle)
                || contains_folded(user.email().as_ref(), &needle)
        })
        .collect()
}

/// Directory head-count per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    /// Every user, unknown roles included.
    pub total: usize,
    /// Entrepreneurs.
    pub entrepreneurs: usize,
    /// Investors.
    pub investors: usize,
    /// Developers.
    pub developers: usize,
}

impl fmt::Display for RoleCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users ({} entrepreneurs, {} investors, {} developers)",
            self.total, self.entrepreneurs, self.investors, self.developers
        )
    }
}

/// Count users per role.
#[must_use]
pub fn count_roles(users: &[User]) -> RoleCounts {
    users.iter().fold(RoleCounts::default(), |mut counts, user| {
        counts.total += 1;
        match user.role() {
            UserRole::Entrepreneur => counts.entrepreneurs += 1,
            UserRole::Investor => counts.investors += 1,
            UserRole::Developer => counts.developers += 1,
            UserRole::Unknown => {}
        }
        counts
    })
}

/// Projects in `category` whose title or description contains `term`
/// (case-insensitively), in listing order.
#[must_use]
pub fn search_projects<'a>(
    projects: &'a [Project],
    term: &str,
    category: CategoryFilter,
) -> Vec<&'a Project> {
    let needle = term.trim().to_lowercase();
    projects
        .iter()
        .filter(|project| match category {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => project.category == wanted,
        })
        .filter(|project| {
            contains_folded(&project.title, &needle)
                || contains_folded(&project.description, &needle)
        })
        .collect()
}
