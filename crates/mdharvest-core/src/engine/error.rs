use super::oracle::{OracleError, OracleRole};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Oracle answer for {role} candidates is malformed: {reason}")]
    OracleContractViolation { role: OracleRole, reason: String },

    #[error("Oracle for {role} candidates failed: {message}")]
    OracleFailure { role: OracleRole, message: String },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn from_oracle(role: OracleRole, error: OracleError) -> Self {
        match error {
            OracleError::Contract(reason) => EngineError::OracleContractViolation { role, reason },
            OracleError::Transport(message) => EngineError::OracleFailure { role, message },
        }
    }
}
