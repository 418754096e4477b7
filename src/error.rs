use thiserror::Error;

/// Errors that can occur while loading a workflow graph or a configuration file.
///
/// The linearization itself never fails; these only cover getting bytes in.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Could not read file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(String),
}

/// Errors that can occur when converting a custom user format into a `WorkflowGraph`.
#[derive(Error, Debug, Clone)]
pub enum WorkflowConversionError {
    #[error("Invalid custom data: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::JsonParse(err.to_string())
    }
}

pub(crate) fn read_file(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })
}
