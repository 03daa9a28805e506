//! Fases da partida

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fase atual do controlador
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Jogadores escolhem portas (1 e depois 2)
    #[default]
    GateSelection,
    /// Carga inicial revelada
    ShowBullets,
    /// Turnos de portas e disparos
    Playing,
    /// Partida encerrada
    Terminal,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GateSelection => "gate_selection",
            Self::ShowBullets => "show_bullets",
            Self::Playing => "playing",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
