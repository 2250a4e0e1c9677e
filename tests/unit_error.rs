//! Unit tests for DiError and ConfigError display output

use scope_probe::{ConfigError, DiError, DiResult, Lifetime};
use std::error::Error;

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("TestService");
    assert_eq!(error.to_string(), "Service not found: TestService");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("std::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: std::string::String");
}

#[test]
fn test_error_display_wrong_lifetime() {
    let error = DiError::WrongLifetime("Cannot resolve scoped service from root provider");
    assert_eq!(
        error.to_string(),
        "Lifetime error: Cannot resolve scoped service from root provider"
    );
}

#[test]
fn test_error_display_factory() {
    let error = DiError::factory("RequestOperation", "identifier source failed: boom");
    assert_eq!(
        error.to_string(),
        "Factory for RequestOperation failed: identifier source failed: boom"
    );
}

#[test]
fn test_error_is_std_error() {
    let error: Box<dyn Error> = Box::new(DiError::NotFound("X"));
    assert!(error.source().is_none());
}

#[test]
fn test_di_result_alias() {
    fn fails() -> DiResult<()> {
        Err(DiError::NotFound("some_service"))
    }
    assert!(fails().is_err());
}

#[test]
fn test_config_error_names_offending_lifetime() {
    let error = ConfigError::CapturedScope(Lifetime::Singleton);
    let display = error.to_string();
    assert!(display.contains("singleton"));
    assert!(display.contains("transient or scoped"));
}
