//! Error types for textflow crate

use textflow_core::CoreError;
use thiserror::Error;

use crate::llm::ModelError;

#[derive(Error, Debug)]
pub enum TextflowError {
    #[error("Core error: {0}")]
    Core(CoreError),

    #[error("Model invocation failed: {0}")]
    Model(#[from] ModelError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Build error: {0}")]
    Build(String),
}

impl From<CoreError> for TextflowError {
    fn from(err: CoreError) -> Self {
        match err {
            // controllers report through CoreError; recover the client error
            CoreError::Invocation(source) => match source.downcast::<ModelError>() {
                Ok(model) => Self::Model(*model),
                Err(source) => Self::Core(CoreError::Invocation(source)),
            },
            other => Self::Core(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_keeps_model_error() {
        let core = CoreError::from(ModelError::Status {
            status: 404,
            body: "model 'phi3' not found".to_string(),
        });
        let err = TextflowError::from(core);

        assert!(matches!(err, TextflowError::Model(ModelError::Status { status: 404, .. })));
    }

    #[test]
    fn other_invocation_sources_stay_core() {
        let core = CoreError::Invocation("socket closed".into());
        assert!(matches!(
            TextflowError::from(core),
            TextflowError::Core(CoreError::Invocation(_))
        ));
        assert!(matches!(
            TextflowError::from(CoreError::UnknownModel("gpt".into())),
            TextflowError::Core(CoreError::UnknownModel(_))
        ));
    }
}
