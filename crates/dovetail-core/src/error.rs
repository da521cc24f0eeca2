//! Errors raised while classifying legacy binding sites and binding
//! directives to them.

use thiserror::Error;

/// Failure modes of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The legacy engine handed over a binding site whose shape answers none
    /// of the known probes.
    #[error("unknown part type")]
    UnknownPartType,

    /// A directive was bound to a part it cannot drive.
    #[error("{directive} directive used on an unsupported part: expected {expected}, found {found}")]
    WrongPart {
        /// Name of the directive that refused the part.
        directive: &'static str,
        /// What the directive requires.
        expected: String,
        /// What the site turned out to be.
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_part_type_display() {
        assert_eq!(BindError::UnknownPartType.to_string(), "unknown part type");
    }

    #[test]
    fn test_wrong_part_display_names_the_directive() {
        let err = BindError::WrongPart {
            directive: "class_map",
            expected: "the sole expression of a \"class\" attribute".to_string(),
            found: "attribute \"id\" on <div>".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("class_map directive"));
        assert!(text.contains("expected the sole expression"));
        assert!(text.contains("found attribute \"id\" on <div>"));
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(BindError::UnknownPartType, BindError::UnknownPartType);
        let wrong = BindError::WrongPart {
            directive: "guard",
            expected: "anything".to_string(),
            found: "a child position".to_string(),
        };
        assert_ne!(wrong, BindError::UnknownPartType);
        assert_eq!(wrong.clone(), wrong);
    }
}
