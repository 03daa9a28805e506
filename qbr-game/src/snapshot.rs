//! Fotografias serializáveis do estado da partida

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use qbr_quantum::{Marginal, Outcome, QuantumChamber};
use crate::phase::Phase;
use crate::player::{Gate, Player, PlayerId};

/// Estado público de um jogador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub lives: u32,
    pub gates: Vec<Gate>,
    pub peek_available: bool,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            lives: player.lives,
            gates: player.gates().to_vec(),
            peek_available: player.peek_available(),
        }
    }
}

/// Resumo do tambor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChamberSnapshot {
    pub total: usize,
    pub initial_live: Vec<usize>,
    pub measured: Vec<bool>,
    pub outcomes: Vec<Option<Outcome>>,
    pub probabilities: Vec<Marginal>,
    pub entanglements: BTreeMap<usize, usize>,
    /// Próxima posição a disparar
    pub cursor: usize,
}

impl From<&QuantumChamber> for ChamberSnapshot {
    fn from(chamber: &QuantumChamber) -> Self {
        Self {
            total: chamber.size(),
            initial_live: chamber.initial_live_positions().to_vec(),
            measured: chamber.measured_flags(),
            outcomes: chamber.outcomes(),
            probabilities: chamber.probabilities(),
            entanglements: chamber.entanglements(),
            cursor: chamber.current_position(),
        }
    }
}

/// Estado completo do controlador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub round: u32,
    pub selecting_player: PlayerId,
    pub current_player: PlayerId,
    pub gate_applied_this_turn: bool,
    pub players: [PlayerSnapshot; 2],
    /// Ausente antes da primeira rodada
    pub chamber: Option<ChamberSnapshot>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
