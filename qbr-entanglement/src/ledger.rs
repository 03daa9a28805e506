//! Registro de pares emaranhados

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::{EntanglementError, EntanglementResult};

/// Ledger de emaranhamento: no máximo um parceiro por posição
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntanglementLedger {
    /// Parceiro de cada posição
    partners: Vec<Option<usize>>,
}

impl EntanglementLedger {
    /// Cria ledger vazio para `size` posições
    pub fn new(size: usize) -> Self {
        Self {
            partners: vec![None; size],
        }
    }

    fn check(&self, position: usize) -> EntanglementResult<()> {
        if position >= self.partners.len() {
            return Err(EntanglementError::OutOfRange {
                position,
                size: self.partners.len(),
            });
        }
        Ok(())
    }

    /// Registra `a <-> b`, desfazendo antes qualquer par anterior de `a` ou `b`
    pub fn entangle(&mut self, a: usize, b: usize) -> EntanglementResult<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(EntanglementError::SelfPair(a));
        }

        self.break_pair(a);
        self.break_pair(b);

        self.partners[a] = Some(b);
        self.partners[b] = Some(a);
        Ok(())
    }

    /// Desfaz o par da posição, retornando o antigo parceiro
    pub fn break_pair(&mut self, position: usize) -> Option<usize> {
        let partner = self.partners.get_mut(position)?.take()?;
        if let Some(slot) = self.partners.get_mut(partner) {
            if *slot == Some(position) {
                *slot = None;
            }
        }
        Some(partner)
    }

    /// Parceiro atual da posição
    pub fn partner(&self, position: usize) -> Option<usize> {
        self.partners.get(position).copied().flatten()
    }

    /// Verifica se a posição tem parceiro
    pub fn is_entangled(&self, position: usize) -> bool {
        self.partner(position).is_some()
    }

    /// Mapa posição -> parceiro, com as duas direções de cada par
    pub fn partner_map(&self) -> BTreeMap<usize, usize> {
        self.partners
            .iter()
            .enumerate()
            .filter_map(|(pos, partner)| partner.map(|p| (pos, p)))
            .collect()
    }
}
