//! Erros do controlador de partida

use qbr_quantum::{GateKind, QuantumError};
use thiserror::Error;
use crate::phase::Phase;
use crate::player::PlayerId;

pub type GameResult<T> = Result<T, GameError>;

/// Classe de falha de um comando
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Comando fora da fase exigida
    PhaseViolation,
    /// Segunda porta no mesmo turno, ou jogador fora da vez
    TurnViolation,
    /// Posição inválida, já disparada ou repetida
    InvalidTarget,
    /// Porta indisponível ou peek já usado
    ResourceUnavailable,
    /// Comando depois do fim da partida
    TerminalState,
    /// Nenhuma bala restante
    ExhaustedQueue,
    /// Argumento ou configuração inválida
    InvalidArgument,
    /// Quebra de invariante numérico
    Internal,
}

/// Erros de comando
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("Cannot {action} during {actual} phase (requires {expected})")]
    WrongPhase {
        action: &'static str,
        expected: Phase,
        actual: Phase,
    },

    #[error("No round in progress")]
    NoRound,

    #[error("Round {0} is still in progress")]
    RoundInProgress(u32),

    #[error("You can only apply one gate per turn")]
    GateAlreadyApplied,

    #[error("Player {expected} is selecting gates, not player {actual}")]
    NotSelectingPlayer { expected: PlayerId, actual: PlayerId },

    #[error("Failed to apply gate: {0}")]
    Quantum(#[from] QuantumError),

    #[error("You don't have {0} available")]
    GateUnavailable(GateKind),

    #[error("Peek already used this round")]
    PeekSpent,

    #[error("Game is over")]
    GameOver,

    #[error("No more bullets to fire")]
    ChamberEmpty,

    #[error("Expected {expected} gates, got {actual}")]
    WrongGateCount { expected: usize, actual: usize },

    #[error("Unknown player id {0}")]
    UnknownPlayer(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongPhase { .. } | Self::NoRound | Self::RoundInProgress(_) => {
                ErrorKind::PhaseViolation
            }
            Self::GateAlreadyApplied | Self::NotSelectingPlayer { .. } => ErrorKind::TurnViolation,
            Self::Quantum(e) if e.is_target_error() => ErrorKind::InvalidTarget,
            Self::Quantum(_) => ErrorKind::Internal,
            Self::GateUnavailable(_) | Self::PeekSpent => ErrorKind::ResourceUnavailable,
            Self::GameOver => ErrorKind::TerminalState,
            Self::ChamberEmpty => ErrorKind::ExhaustedQueue,
            Self::WrongGateCount { .. } | Self::UnknownPlayer(_) | Self::InvalidConfiguration(_) => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::WrongPhase {
            action: "shoot",
            expected: Phase::Playing,
            actual: Phase::GateSelection,
        };
        assert_eq!(err.to_string(), "Cannot shoot during gate_selection phase (requires playing)");
        assert_eq!(GameError::GateUnavailable(GateKind::H).to_string(), "You don't have H available");
    }

    #[test]
    fn test_quantum_error_conversion() {
        let err: GameError = QuantumError::AlreadyMeasured(2).into();
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);

        let err: GameError = QuantumError::NormalizationDrift(0.7).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
