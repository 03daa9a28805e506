//! Jogadores: vidas, inventário de portas, peek e histórico da rodada

use serde::{Deserialize, Serialize};
use std::fmt;
use qbr_quantum::{GateApplication, GateKind};
use crate::error::{GameError, GameResult};

/// Identificador do jogador (1 ou 2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Índice 0/1 para arrays
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> u8 {
        id.index() as u8 + 1
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = GameError;

    fn try_from(value: u8) -> GameResult<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(GameError::UnknownPlayer(other)),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Porta no inventário de um jogador (uso único)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: GateKind,
    pub used: bool,
}

impl Gate {
    pub fn new(kind: GateKind) -> Self {
        Self { kind, used: false }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.used { "✗" } else { "✓" };
        write!(f, "{}[{}]", self.kind, status)
    }
}

/// Jogador
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Persistem entre rodadas
    pub lives: u32,
    gates: Vec<Gate>,
    peek_available: bool,
    /// Portas que este jogador aplicou nesta rodada
    history: Vec<GateApplication>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, lives: u32) -> Self {
        Self {
            id,
            name: name.into(),
            lives,
            gates: Vec::new(),
            peek_available: true,
            history: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Perde uma vida (mínimo 0). Retorna se ainda está vivo.
    pub fn take_damage(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.is_alive()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Portas ainda não usadas
    pub fn available_gates(&self) -> Vec<GateKind> {
        self.gates.iter().filter(|g| !g.used).map(|g| g.kind).collect()
    }

    pub fn has_gate(&self, kind: GateKind) -> bool {
        self.gates.iter().any(|g| g.kind == kind && !g.used)
    }

    /// Consome a primeira porta livre do tipo
    pub fn use_gate(&mut self, kind: GateKind) -> GameResult<()> {
        let gate = self
            .gates
            .iter_mut()
            .find(|g| g.kind == kind && !g.used)
            .ok_or(GameError::GateUnavailable(kind))?;
        gate.used = true;
        Ok(())
    }

    pub fn set_gates(&mut self, kinds: &[GateKind]) {
        self.gates = kinds.iter().copied().map(Gate::new).collect();
    }

    pub fn peek_available(&self) -> bool {
        self.peek_available
    }

    /// Gasta o peek da rodada
    pub fn spend_peek(&mut self) -> GameResult<()> {
        if !self.peek_available {
            return Err(GameError::PeekSpent);
        }
        self.peek_available = false;
        Ok(())
    }

    pub fn record_application(&mut self, application: GateApplication) {
        self.history.push(application);
    }

    pub fn history(&self) -> &[GateApplication] {
        &self.history
    }

    /// Verifica se este jogador aplicou alguma porta na posição nesta rodada
    pub fn has_touched(&self, position: usize) -> bool {
        self.history.iter().any(|app| app.touches(position))
    }

    /// Limpa o estado da rodada; vidas permanecem
    pub fn reset_for_round(&mut self) {
        self.gates.clear();
        self.peek_available = true;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let mut p = Player::new(PlayerId::One, "Player 1", 3);
        p.set_gates(&[GateKind::X, GateKind::X, GateKind::H]);
        p
    }

    #[test]
    fn test_player_id_conversion() {
        assert_eq!(PlayerId::try_from(2u8), Ok(PlayerId::Two));
        assert_eq!(PlayerId::try_from(0u8), Err(GameError::UnknownPlayer(0)));
        assert_eq!(u8::from(PlayerId::One), 1);
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(serde_json::to_string(&PlayerId::Two).unwrap(), "2");
    }

    #[test]
    fn test_use_gate_consumes_first_unused() {
        let mut p = player();
        assert!(p.use_gate(GateKind::X).is_ok());
        assert!(p.has_gate(GateKind::X));
        assert!(p.use_gate(GateKind::X).is_ok());
        assert!(!p.has_gate(GateKind::X));
        assert_eq!(p.use_gate(GateKind::X), Err(GameError::GateUnavailable(GateKind::X)));
        assert_eq!(p.available_gates(), vec![GateKind::H]);
    }

    #[test]
    fn test_has_gate_does_not_consume() {
        let p = player();
        assert!(p.has_gate(GateKind::H));
        assert!(p.has_gate(GateKind::H));
        assert!(!p.has_gate(GateKind::Cnot));
        assert_eq!(p.available_gates().len(), 3);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut p = Player::new(PlayerId::Two, "P2", 2);
        assert!(p.take_damage());
        assert!(!p.take_damage());
        assert!(!p.take_damage());
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_peek_once_per_round() {
        let mut p = player();
        assert!(p.spend_peek().is_ok());
        assert_eq!(p.spend_peek(), Err(GameError::PeekSpent));
        p.reset_for_round();
        assert!(p.peek_available());
    }

    #[test]
    fn test_reset_keeps_lives() {
        let mut p = player();
        p.take_damage();
        p.use_gate(GateKind::H).unwrap();
        p.record_application(GateApplication::new(GateKind::H, 1, None));

        p.reset_for_round();
        assert_eq!(p.lives, 2);
        assert!(p.gates().is_empty());
        assert!(p.history().is_empty());
        assert!(!p.has_touched(1));
    }

    #[test]
    fn test_gate_display() {
        let mut gate = Gate::new(GateKind::Rx);
        assert_eq!(gate.to_string(), "Rx(π/2)[✓]");
        gate.used = true;
        assert_eq!(gate.to_string(), "Rx(π/2)[✗]");
    }

    #[test]
    fn test_history_tracks_both_targets() {
        let mut p = player();
        p.record_application(GateApplication::new(GateKind::Cnot, 0, Some(4)));
        assert!(p.has_touched(0));
        assert!(p.has_touched(4));
        assert!(!p.has_touched(2));
    }
}
