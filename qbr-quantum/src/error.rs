//! Tipos de erro para qbr-quantum

use qbr_entanglement::EntanglementError;
use thiserror::Error;
use crate::gates::GateKind;

/// Resultado customizado para operações quânticas
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros que podem ocorrer em operações do tambor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("Bullet {position} out of range (chamber holds {size})")]
    PositionOutOfRange { position: usize, size: usize },

    #[error("Bullet {0} has already been fired")]
    AlreadyMeasured(usize),

    #[error("{0} needs a second target bullet")]
    MissingSecondTarget(GateKind),

    #[error("{kind} needs two different bullets, got {position} twice")]
    SameTarget { kind: GateKind, position: usize },

    #[error("Invalid chamber size {size}: must be between 1 and {max}")]
    InvalidSize { size: usize, max: usize },

    #[error("Amplitude norm drifted to {0}")]
    NormalizationDrift(f64),

    #[error("Entanglement ledger error: {0}")]
    Ledger(#[from] EntanglementError),
}

impl QuantumError {
    /// Erro causado por um alvo inválido (posição fora do tambor, já disparada ou repetida)
    pub fn is_target_error(&self) -> bool {
        matches!(
            self,
            Self::PositionOutOfRange { .. }
                | Self::AlreadyMeasured(_)
                | Self::MissingSecondTarget(_)
                | Self::SameTarget { .. }
                | Self::Ledger(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuantumError::PositionOutOfRange { position: 7, size: 6 };
        assert!(err.to_string().contains("out of range"));

        let err = QuantumError::MissingSecondTarget(GateKind::Cnot);
        assert_eq!(err.to_string(), "CNOT needs a second target bullet");
    }

    #[test]
    fn test_target_errors() {
        assert!(QuantumError::AlreadyMeasured(1).is_target_error());
        assert!(!QuantumError::NormalizationDrift(0.5).is_target_error());
        assert!(!QuantumError::InvalidSize { size: 0, max: 16 }.is_target_error());
    }
}
