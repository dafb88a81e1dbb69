//! Precondition-check library.
//!
//! Each function takes a value plus a human-readable `name` label (used in
//! the error text) and optional constraint parameters, and either returns
//! `Ok(())` or raises a typed [`AppError`] carrying a machine-readable
//! [`ErrorCode`] and a context payload. Checks are pure and independent: no
//! shared state, no ordering requirements beyond what the caller imposes.
//!
//! Value/range checks raise [`ErrorKind::Validation`] errors; path checks
//! raise [`ErrorKind::FileOperation`] errors.
//!
//! [`ErrorKind::Validation`]: crate::error::ErrorKind::Validation
//! [`ErrorKind::FileOperation`]: crate::error::ErrorKind::FileOperation

use crate::error::{AppError, AppResult, ErrorCode};
use camino::Utf8Path;
use regex::Regex;
use serde_json::Value;
use std::fmt::Display;
use std::fs;

/// Types with a measurable length, so one check covers strings and
/// collections alike.
pub trait HasLen {
    fn length(&self) -> usize;

    fn is_len_zero(&self) -> bool {
        self.length() == 0
    }
}

impl HasLen for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLen for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> HasLen for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLen for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// Check that an optional value is present.
pub fn validate_required<T>(value: Option<&T>, name: &str) -> AppResult<()> {
    if value.is_none() {
        return Err(AppError::validation(format!("{name} is missing"))
            .with_code(ErrorCode::NullValue)
            .with_detail("name", name));
    }
    Ok(())
}

/// Check that a string or collection is non-empty.
pub fn validate_not_empty<T: HasLen + ?Sized>(value: &T, name: &str) -> AppResult<()> {
    if value.is_len_zero() {
        return Err(AppError::validation(format!("{name} is empty"))
            .with_code(ErrorCode::EmptyValue)
            .with_detail("name", name));
    }
    Ok(())
}

/// Check that a numeric value lies inside an inclusive range.
///
/// Boundary values pass: `validate_range(0, Some(0), Some(10), ..)` is `Ok`.
pub fn validate_range<T>(value: T, min: Option<T>, max: Option<T>, name: &str) -> AppResult<()>
where
    T: PartialOrd + Display + Copy + Into<Value>,
{
    if let Some(min) = min {
        if value < min {
            return Err(
                AppError::validation(format!("{name} is below the minimum {min}: {value}"))
                    .with_code(ErrorCode::MinValue)
                    .with_detail("value", value)
                    .with_detail("min_val", min),
            );
        }
    }

    if let Some(max) = max {
        if value > max {
            return Err(
                AppError::validation(format!("{name} exceeds the maximum {max}: {value}"))
                    .with_code(ErrorCode::MaxValue)
                    .with_detail("value", value)
                    .with_detail("max_val", max),
            );
        }
    }

    Ok(())
}

/// Check that a string or collection length lies inside an inclusive range.
pub fn validate_length<T: HasLen + ?Sized>(
    value: &T,
    min_length: Option<usize>,
    max_length: Option<usize>,
    name: &str,
) -> AppResult<()> {
    let length = value.length();

    if let Some(min) = min_length {
        if length < min {
            return Err(AppError::validation(format!(
                "{name} is shorter than the minimum length {min}: {length}"
            ))
            .with_code(ErrorCode::MinLength)
            .with_detail("length", length)
            .with_detail("min_length", min));
        }
    }

    if let Some(max) = max_length {
        if length > max {
            return Err(AppError::validation(format!(
                "{name} exceeds the maximum length {max}: {length}"
            ))
            .with_code(ErrorCode::MaxLength)
            .with_detail("length", length)
            .with_detail("max_length", max));
        }
    }

    Ok(())
}

/// Check that a string matches a regex pattern in full.
///
/// The whole value must match, not just a substring. An unparsable pattern
/// is reported as its own validation error rather than a panic.
pub fn validate_pattern(value: &str, pattern: &str, name: &str) -> AppResult<()> {
    let anchored = format!("^(?:{pattern})$");
    let regex = Regex::new(&anchored).map_err(|e| {
        AppError::validation(format!("{name} pattern is not a valid regex: {pattern}"))
            .with_code(ErrorCode::InvalidPattern)
            .with_detail("pattern", pattern)
            .with_source(e)
    })?;

    if !regex.is_match(value) {
        return Err(
            AppError::validation(format!("{name} does not match the expected pattern: {value}"))
                .with_code(ErrorCode::PatternMismatch)
                .with_detail("pattern", pattern)
                .with_detail("value", value),
        );
    }

    Ok(())
}

/// Check that a value is one of the allowed choices.
pub fn validate_choice<T: PartialEq + Display>(
    value: &T,
    choices: &[T],
    name: &str,
) -> AppResult<()> {
    if !choices.contains(value) {
        let listed: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        return Err(AppError::validation(format!(
            "{name} is not a valid choice: {value} (choices: {})",
            listed.join(", ")
        ))
        .with_code(ErrorCode::InvalidChoice)
        .with_detail("value", value.to_string())
        .with_detail("choices", listed));
    }
    Ok(())
}

/// Check that a path exists and is a regular file.
pub fn validate_file_exists(path: impl AsRef<Utf8Path>, name: &str) -> AppResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::file_operation(format!("{name} does not exist: {path}"))
            .with_code(ErrorCode::FileNotFound)
            .with_detail("file_path", path.as_str()));
    }

    if !path.is_file() {
        return Err(AppError::file_operation(format!("{name} is not a file: {path}"))
            .with_code(ErrorCode::NotAFile)
            .with_detail("file_path", path.as_str()));
    }

    Ok(())
}

/// Check that a path exists and is a directory.
pub fn validate_directory_exists(path: impl AsRef<Utf8Path>, name: &str) -> AppResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::file_operation(format!("{name} does not exist: {path}"))
            .with_code(ErrorCode::DirectoryNotFound)
            .with_detail("dir_path", path.as_str()));
    }

    if !path.is_dir() {
        return Err(AppError::file_operation(format!("{name} is not a directory: {path}"))
            .with_code(ErrorCode::NotADirectory)
            .with_detail("dir_path", path.as_str()));
    }

    Ok(())
}

/// Check that a path exists, whatever its kind.
pub fn validate_file_or_directory_exists(path: impl AsRef<Utf8Path>, name: &str) -> AppResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::file_operation(format!("{name} does not exist: {path}"))
            .with_code(ErrorCode::PathNotFound)
            .with_detail("path", path.as_str()));
    }

    Ok(())
}

/// Check that an existing file carries one of the allowed extensions.
///
/// Extensions may be given with or without the leading dot and are compared
/// case-insensitively.
pub fn validate_file_extension(
    path: impl AsRef<Utf8Path>,
    allowed_extensions: &[&str],
    name: &str,
) -> AppResult<()> {
    let path = path.as_ref();
    validate_file_exists(path, name)?;

    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let normalized: Vec<String> = allowed_extensions
        .iter()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            if ext.starts_with('.') { ext } else { format!(".{ext}") }
        })
        .collect();

    if !normalized.contains(&extension) {
        return Err(AppError::validation(format!(
            "{name} has a disallowed extension: {extension} (allowed: {})",
            normalized.join(", ")
        ))
        .with_code(ErrorCode::InvalidFileExtension)
        .with_detail("allowed_extensions", normalized)
        .with_detail("actual_extension", extension));
    }

    Ok(())
}

/// Check that a directory exists (creating it on demand when allowed) and is
/// writable.
///
/// Writability is confirmed by creating and dropping an anonymous probe file
/// in the directory; permission metadata alone is not trustworthy across
/// platforms.
pub fn validate_writable_directory(
    path: impl AsRef<Utf8Path>,
    name: &str,
    create_if_missing: bool,
) -> AppResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        if !create_if_missing {
            return Err(AppError::file_operation(format!("{name} does not exist: {path}"))
                .with_code(ErrorCode::DirectoryNotFound)
                .with_detail("dir_path", path.as_str()));
        }

        fs::create_dir_all(path).map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::PermissionDenied {
                ErrorCode::PermissionDenied
            } else {
                ErrorCode::DirectoryCreation
            };
            AppError::file_operation(format!("failed to create {name}: {path}"))
                .with_code(code)
                .with_detail("dir_path", path.as_str())
                .with_source(e)
        })?;
    }

    if !path.is_dir() {
        return Err(AppError::file_operation(format!("{name} is not a directory: {path}"))
            .with_code(ErrorCode::NotADirectory)
            .with_detail("dir_path", path.as_str()));
    }

    tempfile::tempfile_in(path).map_err(|e| {
        AppError::file_operation(format!("{name} is not writable: {path}"))
            .with_code(ErrorCode::PermissionDenied)
            .with_detail("dir_path", path.as_str())
            .with_source(e)
    })?;

    Ok(())
}

/// Check that at most one of a set of flags is set.
///
/// Raises iff two or more of the supplied flags are truthy.
pub fn validate_mutually_exclusive(flags: &[(bool, &str)]) -> AppResult<()> {
    let specified: Vec<&str> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();

    if specified.len() > 1 {
        return Err(AppError::validation(format!(
            "these arguments cannot be combined: {}",
            specified.join(", ")
        ))
        .with_code(ErrorCode::MutuallyExclusiveArgs)
        .with_detail(
            "specified_args",
            specified.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        ));
    }

    Ok(())
}

/// Check that a value is present whenever a condition holds.
///
/// Never raises when `condition` is false, regardless of `value_present`.
pub fn validate_conditional_required(
    condition: bool,
    value_present: bool,
    condition_name: &str,
    value_name: &str,
) -> AppResult<()> {
    if condition && !value_present {
        return Err(AppError::validation(format!(
            "{value_name} is required when {condition_name} is given"
        ))
        .with_code(ErrorCode::ConditionalRequired)
        .with_detail("condition_name", condition_name)
        .with_detail("value_name", value_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(validate_required(Some(&1), "value").is_ok());
        let err = validate_required::<i32>(None, "value").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NullValue));
    }

    #[test]
    fn test_not_empty_over_str_and_vec() {
        assert!(validate_not_empty("x", "value").is_ok());
        assert!(validate_not_empty(&vec![1], "value").is_ok());
        assert!(validate_not_empty("", "value").is_err());
        assert!(validate_not_empty(&Vec::<i32>::new(), "value").is_err());
    }

    #[test]
    fn test_range_boundaries_inclusive() {
        assert!(validate_range(0, Some(0), Some(10), "n").is_ok());
        assert!(validate_range(10, Some(0), Some(10), "n").is_ok());
        assert_eq!(
            validate_range(-1, Some(0), Some(10), "n").unwrap_err().code(),
            Some(ErrorCode::MinValue)
        );
        assert_eq!(
            validate_range(11, Some(0), Some(10), "n").unwrap_err().code(),
            Some(ErrorCode::MaxValue)
        );
    }

    #[test]
    fn test_range_open_ended() {
        assert!(validate_range(i64::MAX, Some(0), None, "n").is_ok());
        assert!(validate_range(i64::MIN, None, Some(0), "n").is_ok());
    }

    #[test]
    fn test_pattern_full_match_only() {
        assert!(validate_pattern("12345", r"\d{5}", "postal_code").is_ok());
        let err = validate_pattern("12345-ext", r"\d{5}", "postal_code").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::PatternMismatch));
    }

    #[test]
    fn test_pattern_invalid_regex() {
        let err = validate_pattern("x", r"(unclosed", "field").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidPattern));
    }

    #[test]
    fn test_choice() {
        assert!(validate_choice(&"red", &["red", "green"], "color").is_ok());
        let err = validate_choice(&"blue", &["red", "green"], "color").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidChoice));
    }

    #[test]
    fn test_mutually_exclusive_counts() {
        assert!(validate_mutually_exclusive(&[]).is_ok());
        assert!(validate_mutually_exclusive(&[(true, "--quiet")]).is_ok());
        assert!(validate_mutually_exclusive(&[(false, "--quiet"), (false, "--verbose")]).is_ok());
        let err =
            validate_mutually_exclusive(&[(true, "--quiet"), (true, "--verbose")]).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MutuallyExclusiveArgs));
        assert!(err.to_string().contains("--quiet"));
    }

    #[test]
    fn test_conditional_required_truth_table() {
        assert!(validate_conditional_required(false, false, "c", "v").is_ok());
        assert!(validate_conditional_required(false, true, "c", "v").is_ok());
        assert!(validate_conditional_required(true, true, "c", "v").is_ok());
        let err = validate_conditional_required(true, false, "--mode convert", "--output")
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ConditionalRequired));
    }
}
