//! Errors surfaced by the runtime API.

use forge_content::FactoryError;
use forge_core::{DefinitionId, ErrorSeverity, ForgeError, ModifierId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("definition {id} failed to build")]
    Definition {
        id: DefinitionId,
        #[source]
        source: FactoryError,
    },

    #[error("modifier {id} failed to build")]
    Modifier {
        id: ModifierId,
        #[source]
        source: FactoryError,
    },

    #[error("unknown tool definition {0}")]
    UnknownDefinition(DefinitionId),
}

impl ForgeError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Definition { source, .. } | Self::Modifier { source, .. } => source.severity(),
            Self::UnknownDefinition(_) => ErrorSeverity::Resolution,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Definition { source, .. } | Self::Modifier { source, .. } => source.error_code(),
            Self::UnknownDefinition(_) => "RUNTIME_UNKNOWN_DEFINITION",
        }
    }
}
