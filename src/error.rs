//! Error types for option validation, entry resolution and composition.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MpaError>;

#[derive(Debug, Error)]
pub enum MpaError {
    /// One or more activation options have the wrong shape.
    #[error("Invalid options applied to component-mpa\n\n{}", numbered(.errors))]
    Validation { errors: Vec<String> },

    /// The project or host is set up in a way MPA mode cannot work with.
    #[error("{0}")]
    Configuration(String),

    /// Directory and file reads, passed through untouched.
    #[error(transparent)]
    FileSystem(#[from] std::io::Error),

    /// Interactive entry selection failed or selected nothing.
    #[error("entry selection failed: {0}")]
    Selection(String),
}

impl MpaError {
    pub fn validation(message: impl Into<String>) -> Self {
        MpaError::Validation {
            errors: vec![message.into()],
        }
    }
}

fn numbered(errors: &[String]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_enumerates_errors() {
        let err = MpaError::Validation {
            errors: vec![
                ".htmlName should NOT be shorter than 1 characters".to_string(),
                ".deepPageEntry should be boolean".to_string(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Invalid options applied to component-mpa\n\n\
             1. .htmlName should NOT be shorter than 1 characters\n\
             2. .deepPageEntry should be boolean"
        );
    }

    #[test]
    fn test_io_errors_pass_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MpaError = io.into();
        assert_eq!(err.to_string(), "denied");
    }
}
