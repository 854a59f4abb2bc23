//! Environment variable helpers

/// Read an environment variable, falling back to a default when unset or empty
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default() {
        unsafe {
            std::env::remove_var("FINRAG_TEST_UNSET");
        }
        assert_eq!(env_or("FINRAG_TEST_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_env_or_set() {
        unsafe {
            std::env::set_var("FINRAG_TEST_SET", "value");
        }
        assert_eq!(env_or("FINRAG_TEST_SET", "fallback"), "value");
        unsafe {
            std::env::remove_var("FINRAG_TEST_SET");
        }
    }
}
