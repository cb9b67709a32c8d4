use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No SLA configuration for entity type '{entity_type}' and SLA type '{sla_type}'")]
    ConfigurationMissing {
        entity_type: String,
        sla_type: String,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
