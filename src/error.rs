pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("no documents match '{query}'")]
    NoMatch { query: String },

    #[error("could not launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotFound { .. } | Error::Config(_) => 2,
            Error::Launch { .. } => 3,
            Error::NoMatch { .. } | Error::Io(_) | Error::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind() {
        let err = Error::NotFound {
            kind: "root directory",
            name: "/nope".to_string(),
        };
        assert_eq!(err.to_string(), "root directory not found: /nope");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn every_failure_exits_non_zero() {
        let errors = [
            Error::Config("no root".into()),
            Error::NoMatch {
                query: "knuth".into(),
            },
            Error::Launch {
                program: "zathura".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }
}
