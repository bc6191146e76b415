//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Earliest accepted graduation year.
pub const MIN_GRADUATION_YEAR: i32 = 1950;

/// Latest accepted graduation year.
pub const MAX_GRADUATION_YEAR: i32 = 2100;

/// Maximum length of a single interest or specialization tag.
pub const MAX_TAG_LENGTH: usize = 64;

/// Maximum number of tags on one record.
pub const MAX_TAGS: usize = 20;

lazy_static! {
    static ref LINKEDIN_URL_REGEX: Regex =
        Regex::new(r"^https?://([a-z]{2,3}\.)?linkedin\.com/[A-Za-z0-9_\-/%.]+$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 ()\-.]{5,24}$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that a graduation year is within a plausible range.
pub fn validate_graduation_year(year: i32) -> Result<(), ValidationError> {
    if (MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(error(
            "graduation_year_range",
            "Graduation year must be between 1950 and 2100",
        ))
    }
}

/// Validates that a GPA is on the 0.0 to 4.0 scale.
pub fn validate_gpa(gpa: f64) -> Result<(), ValidationError> {
    if (0.0..=4.0).contains(&gpa) {
        Ok(())
    } else {
        Err(error("gpa_range", "GPA must be between 0.0 and 4.0"))
    }
}

/// Validates a LinkedIn profile or company URL.
pub fn validate_linkedin_url(url: &str) -> Result<(), ValidationError> {
    if LINKEDIN_URL_REGEX.is_match(url.trim()) {
        Ok(())
    } else {
        Err(error(
            "linkedin_url_format",
            "LinkedIn URL must look like https://www.linkedin.com/in/<handle>",
        ))
    }
}

/// Validates a loosely formatted phone number.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(error("phone_format", "Phone number format is invalid"))
    }
}

/// Validates a list of free-form tags: bounded count, each non-blank and bounded length.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(error("tags_count", "At most 20 tags are allowed"));
    }

    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(error("tag_blank", "Tags must not be blank"));
        }
        if trimmed.chars().count() > MAX_TAG_LENGTH {
            return Err(error("tag_length", "Tags must be at most 64 characters"));
        }
    }

    Ok(())
}

/// Validates a tag list that must contain at least one entry.
pub fn validate_required_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.is_empty() {
        return Err(error("tags_required", "At least one tag is required"));
    }
    validate_tags(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_graduation_year() {
        assert!(validate_graduation_year(2026).is_ok());
        assert!(validate_graduation_year(MIN_GRADUATION_YEAR).is_ok());
        assert!(validate_graduation_year(MAX_GRADUATION_YEAR).is_ok());
        assert!(validate_graduation_year(1949).is_err());
        assert!(validate_graduation_year(2101).is_err());
    }

    #[test]
    fn test_validate_gpa() {
        assert!(validate_gpa(0.0).is_ok());
        assert!(validate_gpa(3.8).is_ok());
        assert!(validate_gpa(4.0).is_ok());
        assert!(validate_gpa(-0.1).is_err());
        assert!(validate_gpa(4.01).is_err());
    }

    #[test]
    fn test_validate_gpa_error_message() {
        let err = validate_gpa(5.0).unwrap_err();
        assert_eq!(err.code, "gpa_range");
        assert_eq!(
            err.message.unwrap().to_string(),
            "GPA must be between 0.0 and 4.0"
        );
    }

    #[test]
    fn test_validate_linkedin_url() {
        assert!(validate_linkedin_url("https://www.linkedin.com/in/jane-doe").is_ok());
        assert!(validate_linkedin_url("https://linkedin.com/company/trea").is_ok());
        assert!(validate_linkedin_url("http://uk.linkedin.com/in/someone_1").is_ok());
        assert!(validate_linkedin_url("https://example.com/in/jane").is_err());
        assert!(validate_linkedin_url("linkedin.com/in/jane").is_err());
        assert!(validate_linkedin_url("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1 (555) 010-2030").is_ok());
        assert!(validate_phone("555.010.2030").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
    }

    #[test]
    fn test_validate_tags() {
        let tags = vec!["Investment/REPE".to_string(), "Development".to_string()];
        assert!(validate_tags(&tags).is_ok());
        assert!(validate_tags(&[]).is_ok());

        assert!(validate_tags(&["   ".to_string()]).is_err());
        assert!(validate_tags(&["x".repeat(MAX_TAG_LENGTH + 1)]).is_err());

        let too_many: Vec<String> = (0..=MAX_TAGS).map(|i| format!("tag{}", i)).collect();
        assert_eq!(validate_tags(&too_many).unwrap_err().code, "tags_count");
    }

    #[test]
    fn test_validate_required_tags() {
        assert_eq!(
            validate_required_tags(&[]).unwrap_err().code,
            "tags_required"
        );
        assert!(validate_required_tags(&["ESG".to_string()]).is_ok());
    }
}
