use thiserror::Error;

/// Errors a dashboard request can return. Provider failures are not among
/// them: those become "no data" notices inside the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Registry lookup failed: {0}")]
    Registry(#[from] configuration::RegistryError),

    #[error("At least one economy must be selected for a comparison.")]
    NoEconomiesSelected,
}
