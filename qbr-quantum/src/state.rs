//! Vetor de amplitudes conjunto do tambor
//!
//! Índice do estado base `i`: o bit `p` de `i` é o valor da posição `p`
//! (0 = blank, 1 = live).

use crate::gates::{Complex, GateOperation, Matrix2x2};

/// Tolerância para a norma do vetor
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Massa abaixo da qual uma projeção é considerada impossível
const PROJECTION_EPSILON: f64 = 1e-12;

/// Amplitudes dos 2^N estados base
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeVector {
    qubits: usize,
    amplitudes: Vec<Complex>,
}

impl AmplitudeVector {
    /// Cria |0...0⟩
    pub fn new(qubits: usize) -> Self {
        Self::basis(qubits, 0)
    }

    /// Cria o estado base `index`
    pub fn basis(qubits: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex::new(0.0, 0.0); 1 << qubits];
        amplitudes[index] = Complex::new(1.0, 0.0);
        Self { qubits, amplitudes }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    /// Aplica a operação de uma porta
    pub fn apply(&mut self, operation: GateOperation, target: usize, control: Option<usize>) {
        match (operation, control) {
            (GateOperation::Single(m), _) => self.apply_single(target, &m),
            (GateOperation::Controlled(m), Some(control)) => self.apply_controlled(control, target, &m),
            (GateOperation::Controlled(_), None) => {}
        }
    }

    /// Aplica matriz a uma posição
    pub fn apply_single(&mut self, target: usize, matrix: &Matrix2x2) {
        let bit = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & bit == 0 {
                let j = i | bit;
                let [a0, a1] = matrix.apply([self.amplitudes[i], self.amplitudes[j]]);
                self.amplitudes[i] = a0;
                self.amplitudes[j] = a1;
            }
        }
    }

    /// Aplica matriz ao alvo nos estados em que o controle vale 1
    pub fn apply_controlled(&mut self, control: usize, target: usize, matrix: &Matrix2x2) {
        let control_bit = 1 << control;
        let target_bit = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & control_bit != 0 && i & target_bit == 0 {
                let j = i | target_bit;
                let [a0, a1] = matrix.apply([self.amplitudes[i], self.amplitudes[j]]);
                self.amplitudes[i] = a0;
                self.amplitudes[j] = a1;
            }
        }
    }

    /// P(posição = 1): soma de |a_i|² com o bit ligado
    pub fn probability_one(&self, position: usize) -> f64 {
        let bit = 1 << position;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Projeta a posição no valor dado e renormaliza.
    ///
    /// Retorna a massa do ramo mantido. Se ela for ~0 o vetor não é alterado.
    pub fn project(&mut self, position: usize, value: bool) -> f64 {
        let bit = 1 << position;
        let keep = |i: usize| (i & bit != 0) == value;

        let mass: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, a)| a.norm_sqr())
            .sum();

        if mass <= PROJECTION_EPSILON {
            return mass;
        }

        let scale = 1.0 / mass.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if keep(i) {
                *amp *= scale;
            } else {
                *amp = Complex::new(0.0, 0.0);
            }
        }
        mass
    }

    /// Σ|a_i|²
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Norma dentro da tolerância
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < NORM_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::GateKind;

    #[test]
    fn test_basis_state() {
        let state = AmplitudeVector::basis(3, 0b101);
        assert_eq!(state.len(), 8);
        assert_eq!(state.probability_one(0), 1.0);
        assert_eq!(state.probability_one(1), 0.0);
        assert_eq!(state.probability_one(2), 1.0);
        assert!(state.is_normalized());
    }

    #[test]
    fn test_cnot_flips_target_when_control_set() {
        let mut state = AmplitudeVector::basis(2, 0b01);
        state.apply(GateKind::Cnot.operation(), 1, Some(0));
        assert_eq!(state.probability_one(1), 1.0);

        let mut state = AmplitudeVector::basis(2, 0b00);
        state.apply(GateKind::Cnot.operation(), 1, Some(0));
        assert_eq!(state.probability_one(1), 0.0);
    }

    #[test]
    fn test_project_renormalizes() {
        let mut state = AmplitudeVector::new(2);
        state.apply_single(0, &GateKind::H.matrix());

        let mass = state.project(0, true);
        assert!((mass - 0.5).abs() < 1e-12);
        assert!(state.is_normalized());
        assert!((state.probability_one(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_project_impossible_branch_is_noop() {
        let mut state = AmplitudeVector::basis(2, 0b10);
        let before = state.clone();

        let mass = state.project(1, false);
        assert_eq!(mass, 0.0);
        assert_eq!(state, before);
    }
}
