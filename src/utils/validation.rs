use crate::utils::error::{AtlasError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AtlasError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AtlasError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AtlasError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(AtlasError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AtlasError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AtlasError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.endpoint", "https://atlas.ripe.net/api/v2").is_ok());
        assert!(validate_url("api.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("api.endpoint", "").is_err());
        assert!(validate_url("api.endpoint", "invalid-url").is_err());
        assert!(validate_url("api.endpoint", "ftp://atlas.ripe.net").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("probes.area_type", "area", &["area", "country"]).is_ok());

        let err = validate_one_of("probes.area_type", "galaxy", &["area", "country"]).unwrap_err();
        assert!(err.to_string().contains("area, country"));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("target", "example.com").is_ok());
        assert!(validate_non_empty_string("target", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(42);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("probes.default_probe", &present).unwrap(), 42);
        assert!(matches!(
            validate_required_field("probes.default_probe", &missing),
            Err(AtlasError::MissingConfigError { .. })
        ));
    }
}
