//! Tambor quântico: posições, medição destrutiva e colapso adiado

use std::collections::BTreeMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use qbr_entanglement::EntanglementLedger;
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{GateApplication, GateKind};
use crate::outcome::{BulletCategory, Marginal, Outcome};
use crate::state::AmplitudeVector;

/// Número máximo de posições simuladas (2^16 amplitudes)
pub const MAX_POSITIONS: usize = 16;

/// Estado clássico de uma posição do tambor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ChamberSlot {
    /// Resultado, depois de disparada
    outcome: Option<Outcome>,
    /// Resultado forçado pelo parceiro emaranhado já medido
    deferred: Option<Outcome>,
}

impl ChamberSlot {
    fn is_measured(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Tambor com N balas em estado quântico conjunto
#[derive(Debug, Clone)]
pub struct QuantumChamber {
    state: AmplitudeVector,
    slots: Vec<ChamberSlot>,
    ledger: EntanglementLedger,
    /// Posições live na carga inicial (ordenadas)
    initial_live: Vec<usize>,
    /// Próxima posição a disparar
    cursor: usize,
    rng: StdRng,
}

impl QuantumChamber {
    /// Cria tambor com `size` balas blank e RNG do sistema
    pub fn new(size: usize) -> QuantumResult<Self> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Cria tambor com RNG determinístico
    pub fn with_seed(size: usize, seed: u64) -> QuantumResult<Self> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: StdRng) -> QuantumResult<Self> {
        let mut chamber = Self {
            state: AmplitudeVector::new(0),
            slots: Vec::new(),
            ledger: EntanglementLedger::new(0),
            initial_live: Vec::new(),
            cursor: 0,
            rng,
        };
        chamber.initialize(size, &[])?;
        Ok(chamber)
    }

    /// Reinicia todo o estado e carrega o estado base com as posições live.
    ///
    /// Posições fora do tambor são ignoradas.
    pub fn initialize(&mut self, size: usize, live_positions: &[usize]) -> QuantumResult<()> {
        if size == 0 || size > MAX_POSITIONS {
            return Err(QuantumError::InvalidSize { size, max: MAX_POSITIONS });
        }

        let mut live: Vec<usize> = live_positions.iter().copied().filter(|&p| p < size).collect();
        live.sort_unstable();
        live.dedup();

        let index = live.iter().fold(0usize, |acc, &p| acc | (1 << p));

        self.state = AmplitudeVector::basis(size, index);
        self.slots = vec![ChamberSlot::default(); size];
        self.ledger = EntanglementLedger::new(size);
        self.initial_live = live;
        self.cursor = 0;
        Ok(())
    }

    /// Número de posições
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    fn check_position(&self, position: usize) -> QuantumResult<()> {
        if position >= self.slots.len() {
            return Err(QuantumError::PositionOutOfRange {
                position,
                size: self.slots.len(),
            });
        }
        Ok(())
    }

    fn check_target(&self, position: usize) -> QuantumResult<()> {
        self.check_position(position)?;
        if self.slots[position].is_measured() {
            return Err(QuantumError::AlreadyMeasured(position));
        }
        Ok(())
    }

    /// Aplica uma porta. Em caso de erro o estado não muda.
    pub fn apply_gate(
        &mut self,
        kind: GateKind,
        target: usize,
        second: Option<usize>,
    ) -> QuantumResult<GateApplication> {
        self.check_target(target)?;

        let control = if kind.is_two_position() {
            let second = second.ok_or(QuantumError::MissingSecondTarget(kind))?;
            self.check_target(second)?;
            if second == target {
                return Err(QuantumError::SameTarget { kind, position: target });
            }
            Some(second)
        } else {
            None
        };

        let application = GateApplication::new(kind, target, control);
        match control {
            // CNOT: primeiro alvo é o controle, segundo recebe o X
            Some(second) => {
                self.ledger.entangle(target, second)?;
                self.state.apply(kind.operation(), second, Some(target));
            }
            None => self.state.apply(kind.operation(), target, None),
        }

        debug_assert!(self.state.is_normalized());
        Ok(application)
    }

    /// Mede (dispara) uma posição. Idempotente para posições já medidas.
    pub fn measure(&mut self, position: usize) -> QuantumResult<Outcome> {
        self.check_position(position)?;
        Ok(self.measure_slot(position))
    }

    fn measure_slot(&mut self, position: usize) -> Outcome {
        if let Some(outcome) = self.slots[position].outcome {
            return outcome;
        }

        let outcome = match self.slots[position].deferred.take() {
            Some(forced) => {
                // Valor já decidido pelo parceiro: sem amostragem, sem propagação
                self.state.project(position, forced.bit());
                self.ledger.break_pair(position);
                forced
            }
            None => {
                let p_live = self.state.probability_one(position);
                let outcome = Outcome::from_bit(self.rng.gen_range(0.0..1.0) < p_live);
                self.state.project(position, outcome.bit());

                if let Some(partner) = self.ledger.break_pair(position) {
                    let slot = &mut self.slots[partner];
                    if !slot.is_measured() {
                        slot.deferred = Some(outcome);
                    }
                }
                outcome
            }
        };

        self.slots[position].outcome = Some(outcome);
        self.advance_cursor();
        debug_assert!(self.state.is_normalized());
        outcome
    }

    fn advance_cursor(&mut self) {
        while self.cursor < self.slots.len() && self.slots[self.cursor].is_measured() {
            self.cursor += 1;
        }
    }

    /// Dispara a próxima bala da fila: `(posição, resultado)`, ou `None` se acabou
    pub fn fire_next(&mut self) -> Option<(usize, Outcome)> {
        self.advance_cursor();
        let position = self.cursor;
        if position >= self.slots.len() {
            return None;
        }
        Some((position, self.measure_slot(position)))
    }

    /// Marginal de uma posição
    pub fn marginal(&self, position: usize) -> QuantumResult<Marginal> {
        self.check_position(position)?;
        let slot = &self.slots[position];
        Ok(match slot.outcome.or(slot.deferred) {
            Some(outcome) => Marginal::certain(outcome),
            None => Marginal::from_live(self.state.probability_one(position)),
        })
    }

    /// (P(blank), P(live)) de todas as posições
    pub fn probabilities(&self) -> Vec<Marginal> {
        (0..self.slots.len())
            .filter_map(|p| self.marginal(p).ok())
            .collect()
    }

    /// Categoria real de uma posição
    pub fn classify(&self, position: usize) -> QuantumResult<BulletCategory> {
        let marginal = self.marginal(position)?;
        if let Some(outcome) = self.slots[position].outcome {
            return Ok(BulletCategory::fired(outcome));
        }
        if self.ledger.is_entangled(position) {
            return Ok(BulletCategory::Entangled);
        }
        Ok(match marginal.definite() {
            Some(outcome) => BulletCategory::loaded(outcome),
            None => BulletCategory::Superposition,
        })
    }

    /// Rótulo da carga inicial (live/blank)
    pub fn initial_label(&self, position: usize) -> BulletCategory {
        if self.initial_live.binary_search(&position).is_ok() {
            BulletCategory::Live
        } else {
            BulletCategory::Blank
        }
    }

    pub fn initial_live_positions(&self) -> &[usize] {
        &self.initial_live
    }

    pub fn is_measured(&self, position: usize) -> bool {
        self.slots.get(position).is_some_and(ChamberSlot::is_measured)
    }

    pub fn outcome(&self, position: usize) -> Option<Outcome> {
        self.slots.get(position).and_then(|s| s.outcome)
    }

    pub fn measured_flags(&self) -> Vec<bool> {
        self.slots.iter().map(ChamberSlot::is_measured).collect()
    }

    pub fn outcomes(&self) -> Vec<Option<Outcome>> {
        self.slots.iter().map(|s| s.outcome).collect()
    }

    /// Posição apontada pela fila
    pub fn current_position(&self) -> usize {
        self.cursor
    }

    pub fn unmeasured_positions(&self) -> Vec<usize> {
        (0..self.slots.len()).filter(|&p| !self.slots[p].is_measured()).collect()
    }

    pub fn all_measured(&self) -> bool {
        self.slots.iter().all(ChamberSlot::is_measured)
    }

    /// Mapa de emaranhamentos atuais (as duas direções)
    pub fn entanglements(&self) -> BTreeMap<usize, usize> {
        self.ledger.partner_map()
    }

    pub fn state(&self) -> &AmplitudeVector {
        &self.state
    }

    /// Verifica o invariante de norma do vetor
    pub fn check_normalization(&self) -> QuantumResult<()> {
        if self.state.is_normalized() {
            Ok(())
        } else {
            Err(QuantumError::NormalizationDrift(self.state.norm_sqr()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chamber_all_blank() {
        let chamber = QuantumChamber::with_seed(4, 1).unwrap();
        assert_eq!(chamber.size(), 4);
        assert!(chamber.initial_live_positions().is_empty());
        for p in 0..4 {
            assert_eq!(chamber.classify(p).unwrap(), BulletCategory::Blank);
        }
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            QuantumChamber::new(0),
            Err(QuantumError::InvalidSize { size: 0, .. })
        ));
        assert!(QuantumChamber::new(MAX_POSITIONS + 1).is_err());
    }

    #[test]
    fn test_cursor_skips_directly_measured() {
        let mut chamber = QuantumChamber::with_seed(3, 9).unwrap();
        chamber.measure(0).unwrap();
        chamber.measure(1).unwrap();

        assert_eq!(chamber.current_position(), 2);
        assert_eq!(chamber.fire_next().map(|(p, _)| p), Some(2));
        assert_eq!(chamber.fire_next(), None);
    }

    #[test]
    fn test_measured_slot_rejects_gate_without_change() {
        let mut chamber = QuantumChamber::with_seed(3, 2).unwrap();
        chamber.initialize(3, &[1]).unwrap();
        chamber.measure(1).unwrap();
        let before = chamber.state().clone();

        let err = chamber.apply_gate(GateKind::X, 1, None).unwrap_err();
        assert_eq!(err, QuantumError::AlreadyMeasured(1));
        assert_eq!(chamber.state(), &before);
        assert!(chamber.entanglements().is_empty());
    }
}
