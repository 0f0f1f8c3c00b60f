use std::path::PathBuf;
use thiserror::Error;

/// Why a root path could not be loaded.
#[derive(Error, Debug)]
pub enum RootError {
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = RootError::NotFound {
            path: PathBuf::from("/nowhere"),
        };
        assert_eq!(err.to_string(), "path not found: /nowhere");

        let err = RootError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert_eq!(err.to_string(), "not a directory: /etc/hosts");
    }
}
