//! O que cada jogador sabe sobre o tambor
//!
//! Posições disparadas são públicas. Uma posição que o jogador nunca tocou
//! mantém, para ele, o rótulo da carga inicial, mesmo que o oponente a tenha
//! alterado. Depois que o próprio jogador aplica uma porta nela, ele passa a
//! ver a categoria real (probabilística) até o fim da rodada.

use qbr_quantum::{BulletCategory, QuantumChamber, QuantumResult};
use crate::player::Player;

/// Visão de um jogador sobre o tambor atual
#[derive(Debug, Clone, Copy)]
pub struct VisibilityResolver<'a> {
    chamber: &'a QuantumChamber,
    viewer: &'a Player,
}

impl<'a> VisibilityResolver<'a> {
    pub fn new(chamber: &'a QuantumChamber, viewer: &'a Player) -> Self {
        Self { chamber, viewer }
    }

    /// Categoria visível de uma posição
    pub fn resolve(&self, position: usize) -> QuantumResult<BulletCategory> {
        let category = self.chamber.classify(position)?;
        if category.is_fired() || self.viewer.has_touched(position) {
            return Ok(category);
        }
        Ok(self.chamber.initial_label(position))
    }

    /// Categorias visíveis de todas as posições, em ordem
    pub fn visible_states(&self) -> Vec<BulletCategory> {
        (0..self.chamber.size())
            .filter_map(|p| self.resolve(p).ok())
            .collect()
    }
}
