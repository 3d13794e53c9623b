use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// A variable that is set but blank (only whitespace) counts as missing, since
/// an empty API key is never what the caller meant. The value is trimmed.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VAR: &str = "SHARED_UTILS_ENV_TEST_VAR";

    #[test]
    #[serial]
    fn reads_and_trims_value() {
        unsafe { std::env::set_var(VAR, "  abc123 \n") };
        assert_eq!(get_env_var(VAR).unwrap(), "abc123");
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn blank_value_is_missing() {
        unsafe { std::env::set_var(VAR, "   ") };
        let err = get_env_var(VAR).unwrap_err();
        assert_eq!(err.0, VAR);
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn unset_value_is_missing() {
        unsafe { std::env::remove_var(VAR) };
        assert!(get_env_var(VAR).is_err());
    }
}
