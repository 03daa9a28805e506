//! Tipos de erro para qbr-entanglement

use thiserror::Error;

/// Resultado customizado para operações do ledger
pub type EntanglementResult<T> = Result<T, EntanglementError>;

/// Erros que podem ocorrer ao registrar pares
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntanglementError {
    #[error("Position {position} out of range (ledger holds {size} positions)")]
    OutOfRange { position: usize, size: usize },

    #[error("Cannot entangle position {0} with itself")]
    SelfPair(usize),
}
