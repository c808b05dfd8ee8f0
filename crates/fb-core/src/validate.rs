//! Input validation rules shared by registration and profile editing.

use crate::error::{AppError, Result};

pub const USERNAME_MAX: usize = 30;
pub const STATUS_MAX: usize = 100;
pub const ABOUT_MAX: usize = 1000;
pub const CONTACT_MAX: usize = 100;

const PICTURE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "gif", "png"];

/// Usernames are 1-30 ASCII alphanumeric characters.
pub fn username(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > USERNAME_MAX {
        return Err(AppError::Validation(
            "Username must be between 1 and 30 characters.".into(),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(
            "Usernames cannot contain special characters.".into(),
        ));
    }
    Ok(())
}

/// Minimal structural email check: exactly one `@`, non-empty local part,
/// and a domain containing a dot, with no whitespace anywhere.
pub fn email(address: &str) -> Result<()> {
    let valid = match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid email provided.".into()))
    }
}

/// Profile pictures are either empty or a URL ending in an allowed image
/// extension.
pub fn profile_picture(url: &str) -> Result<()> {
    if url.is_empty() {
        return Ok(());
    }
    let ok = url
        .rsplit_once('.')
        .map(|(_, ext)| PICTURE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Invalid image URL (must end in an image extension).".into(),
        ))
    }
}

pub fn max_len(value: &str, max: usize, what: &str) -> Result<()> {
    if value.len() > max {
        Err(AppError::Validation(format!(
            "{what} is longer than {max} characters."
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_bounds_and_charset() {
        assert!(username("alice").is_ok());
        assert!(username("Alice99").is_ok());
        assert!(username("").is_err());
        assert!(username(&"a".repeat(31)).is_err());
        assert!(username("no spaces").is_err());
        assert!(username("tilde~").is_err());
        assert!(username("émile").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(email("a@b.com").is_ok());
        assert!(email("first.last@sub.domain.org").is_ok());
        assert!(email("missingat.com").is_err());
        assert!(email("@nodomain.com").is_err());
        assert!(email("user@nodot").is_err());
        assert!(email("sp ace@b.com").is_err());
        assert!(email("a@b.com ").is_err());
    }

    #[test]
    fn picture_extension_allowlist() {
        assert!(profile_picture("").is_ok());
        assert!(profile_picture("https://x.example/me.png").is_ok());
        assert!(profile_picture("https://x.example/me.JPG").is_ok());
        assert!(profile_picture("https://x.example/me.webp").is_err());
        assert!(profile_picture("https://x.example/me").is_err());
    }

    #[test]
    fn length_bound_reports_field_name() {
        let err = max_len(&"x".repeat(101), 100, "Status").unwrap_err();
        assert!(err.to_string().contains("Status"));
        assert!(max_len("short", 100, "Status").is_ok());
    }
}
