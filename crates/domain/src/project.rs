// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

use crate::error::DomainError;

/// A staffing unit with a required headcount.
///
/// Only active projects participate in optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Members needed per staffed slot. Always at least 1.
    pub required_members: u32,
    /// Display color (`#RRGGBB`).
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validates project fields supplied on creation.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or longer than 100 characters
/// - The required headcount is below 1
pub fn validate_project_fields(name: &str, required_members: i64) -> Result<u32, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidProjectName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > 100 {
        return Err(DomainError::InvalidProjectName(String::from(
            "Name cannot exceed 100 characters",
        )));
    }

    u32::try_from(required_members)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or(DomainError::InvalidRequiredMembers {
            count: required_members,
        })
}
