use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for tracker operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to access '{path}'")]
    #[diagnostic(code(genfile::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file name '{name}'")]
    #[diagnostic(code(genfile::invalid_name), help("{reason}"))]
    InvalidName { name: String, reason: String },

    #[error("invalid folder '{folder}' for '{name}'")]
    #[diagnostic(code(genfile::invalid_folder), help("{reason}"))]
    InvalidFolder {
        name: String,
        folder: String,
        reason: String,
    },

    #[error("invalid root '{root}' for project '{project}'")]
    #[diagnostic(code(genfile::invalid_project_root), help("{reason}"))]
    InvalidProjectRoot {
        project: String,
        root: String,
        reason: String,
    },

    #[error("unknown project '{project}' for '{name}'")]
    #[diagnostic(
        code(genfile::unknown_project),
        help("register the project root before creating files in it")
    )]
    UnknownProject { name: String, project: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(genfile_manifest::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}

impl From<Box<genfile_manifest::Error>> for Box<Error> {
    fn from(error: Box<genfile_manifest::Error>) -> Self {
        Box::new(Error::Record(*error))
    }
}
