// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Minimum number of characters for names and titles after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length of a normalized group code accepted for joining.
pub const MIN_GROUP_CODE_LENGTH: usize = 4;

/// Inclusive bounds for training intensity.
pub const INTENSITY_RANGE: std::ops::RangeInclusive<i64> = 1..=7;

/// Image content types accepted for avatars.
pub const ALLOWED_AVATAR_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Path segment that precedes the storage path in a public avatar URL.
const AVATAR_URL_MARKER: &str = "/avatars/";

fn trimmed_with_min_length(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    (trimmed.chars().count() >= MIN_NAME_LENGTH).then(|| trimmed.to_string())
}

/// Validates and trims a user's display name.
///
/// # Errors
///
/// Returns an error if the trimmed name has fewer than 2 characters.
pub fn validate_display_name(name: &str) -> Result<String, DomainError> {
    trimmed_with_min_length(name).ok_or_else(|| {
        DomainError::InvalidDisplayName(String::from(
            "Display name must be at least 2 characters",
        ))
    })
}

/// Validates and trims a group name.
///
/// # Errors
///
/// Returns an error if the trimmed name has fewer than 2 characters.
pub fn validate_group_name(name: &str) -> Result<String, DomainError> {
    trimmed_with_min_length(name).ok_or_else(|| {
        DomainError::InvalidGroupName(String::from("Group name must be at least 2 characters"))
    })
}

/// Validates and trims a potato rule title.
///
/// # Errors
///
/// Returns an error if the trimmed title has fewer than 2 characters.
pub fn validate_rule_title(title: &str) -> Result<String, DomainError> {
    trimmed_with_min_length(title).ok_or_else(|| {
        DomainError::InvalidRuleTitle(String::from("Rule title must be at least 2 characters"))
    })
}

/// Validates and trims a sport type name.
///
/// # Errors
///
/// Returns an error if the trimmed name has fewer than 2 characters.
pub fn validate_sport_type_name(name: &str) -> Result<String, DomainError> {
    trimmed_with_min_length(name).ok_or_else(|| {
        DomainError::InvalidSportTypeName(String::from(
            "Sport type name must be at least 2 characters",
        ))
    })
}

/// Validates a body weight in kilograms.
///
/// # Errors
///
/// Returns an error if the weight is not finite or not greater than 0.
pub fn validate_weight(weight_kg: f64) -> Result<f64, DomainError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(DomainError::InvalidWeight { value: weight_kg });
    }
    Ok(weight_kg)
}

/// Validates a goal weight in kilograms.
///
/// # Errors
///
/// Returns an error if the weight is not finite or not greater than 0.
pub fn validate_target_weight(weight_kg: f64) -> Result<f64, DomainError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(DomainError::InvalidTargetWeight { value: weight_kg });
    }
    Ok(weight_kg)
}

/// Normalizes a group join code: trims, uppercases and strips whitespace.
#[must_use]
pub fn normalize_group_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalizes and validates a group join code.
///
/// # Errors
///
/// Returns an error if the normalized code has fewer than 4 characters.
pub fn validate_join_code(code: &str) -> Result<String, DomainError> {
    let normalized: String = normalize_group_code(code);
    if normalized.chars().count() < MIN_GROUP_CODE_LENGTH {
        return Err(DomainError::InvalidGroupCode(format!(
            "Group code must be at least {MIN_GROUP_CODE_LENGTH} characters"
        )));
    }
    Ok(normalized)
}

/// Validated fields of a training session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingFields {
    /// Duration in whole minutes (> 0).
    pub duration_min: i32,
    /// Distance in kilometres, if any.
    pub distance_km: Option<f64>,
    /// Perceived intensity 1..=7, if any.
    pub intensity: Option<i32>,
    /// Trimmed note, `None` when blank.
    pub note: Option<String>,
}

/// Validates the numeric and free-text fields of a training session.
///
/// # Errors
///
/// Returns an error if:
/// - The duration is not greater than 0
/// - The distance is negative or not finite
/// - The intensity is outside 1..=7
pub fn validate_training_fields(
    duration_min: i64,
    distance_km: Option<f64>,
    intensity: Option<i64>,
    note: Option<&str>,
) -> Result<TrainingFields, DomainError> {
    // Rule: duration must be a positive whole number of minutes
    let duration: i32 = i32::try_from(duration_min)
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or(DomainError::InvalidDuration {
            minutes: duration_min,
        })?;

    // Rule: distance is optional, but never negative
    if let Some(value) = distance_km.filter(|km| !km.is_finite() || *km < 0.0) {
        return Err(DomainError::InvalidDistance { value });
    }

    // Rule: intensity is optional, otherwise 1..=7
    let intensity: Option<i32> = match intensity {
        None => None,
        Some(value) if INTENSITY_RANGE.contains(&value) => i32::try_from(value).ok(),
        Some(value) => return Err(DomainError::InvalidIntensity { value }),
    };

    let note: Option<String> = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    Ok(TrainingFields {
        duration_min: duration,
        distance_km,
        intensity,
        note,
    })
}

/// Validates an avatar image content type.
///
/// # Errors
///
/// Returns an error if the type is not JPEG, PNG or WebP.
pub fn validate_avatar_content_type(content_type: &str) -> Result<(), DomainError> {
    let lowered: String = content_type.trim().to_lowercase();
    if ALLOWED_AVATAR_TYPES.contains(&lowered.as_str()) {
        Ok(())
    } else {
        Err(DomainError::InvalidAvatarType(content_type.to_string()))
    }
}

/// Extracts the storage object path from a public avatar URL.
///
/// Returns `None` if the URL does not point into the avatar bucket.
#[must_use]
pub fn avatar_storage_path(public_url: &str) -> Option<&str> {
    public_url
        .find(AVATAR_URL_MARKER)
        .map(|idx| &public_url[idx + AVATAR_URL_MARKER.len()..])
        .filter(|path| !path.is_empty())
}
