//! # Quantum Gates: Portas do Tambor
//!
//! Cada porta que um jogador pode escolher é uma variante de [`GateKind`],
//! com aridade explícita e a operação unitária que representa.
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: X, Y, Z (Pauli), H (Hadamard)
//! - **Rotation**: Rx(π/2), Ry(π/2), Rz(π/2)
//! - **Two-qubit**: CNOT (controle = primeiro alvo)

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
use std::fmt;
use std::str::FromStr;

/// Número complexo usado nas amplitudes
pub type Complex = Complex64;

const ZERO: Complex = Complex::new(0.0, 0.0);
const ONE: Complex = Complex::new(1.0, 0.0);

/// Matriz 2x2 complexa para gates single-qubit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2x2 {
    /// Elementos: [[a, b], [c, d]]
    pub elements: [[Complex; 2]; 2],
}

impl Matrix2x2 {
    /// Cria matriz a partir dos elementos
    pub const fn new(elements: [[Complex; 2]; 2]) -> Self {
        Self { elements }
    }

    /// Aplica a um par de amplitudes [alpha, beta]
    pub fn apply(&self, state: [Complex; 2]) -> [Complex; 2] {
        let [alpha, beta] = state;
        let [[a, b], [c, d]] = self.elements;

        [a * alpha + b * beta, c * alpha + d * beta]
    }

    /// Multiplicação de matrizes
    pub fn mul(&self, other: &Matrix2x2) -> Matrix2x2 {
        let [[a, b], [c, d]] = self.elements;
        let [[e, f], [g, h]] = other.elements;

        Matrix2x2::new([
            [a * e + b * g, a * f + b * h],
            [c * e + d * g, c * f + d * h],
        ])
    }

    /// Transposta conjugada (dagger)
    pub fn dagger(&self) -> Matrix2x2 {
        let [[a, b], [c, d]] = self.elements;
        Matrix2x2::new([[a.conj(), c.conj()], [b.conj(), d.conj()]])
    }

    /// Verifica se U·U† = I
    pub fn is_unitary(&self) -> bool {
        let [[a, b], [c, d]] = self.mul(&self.dagger()).elements;
        (a - ONE).norm_sqr() < 1e-20
            && b.norm_sqr() < 1e-20
            && c.norm_sqr() < 1e-20
            && (d - ONE).norm_sqr() < 1e-20
    }
}

/// Número de posições que uma porta toca
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    One,
    Two,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Operação que uma porta aplica ao vetor de amplitudes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateOperation {
    /// Matriz aplicada a uma posição
    Single(Matrix2x2),
    /// Matriz aplicada ao alvo quando o controle está em |1⟩
    Controlled(Matrix2x2),
}

/// Portas disponíveis no jogo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "Y")]
    Y,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "H")]
    H,
    #[serde(rename = "Rx(π/2)")]
    Rx,
    #[serde(rename = "Ry(π/2)")]
    Ry,
    #[serde(rename = "Rz(π/2)")]
    Rz,
    #[serde(rename = "CNOT")]
    Cnot,
}

impl GateKind {
    /// Todas as portas selecionáveis, na ordem do catálogo
    pub const ALL: [GateKind; 8] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::H,
        Self::Rx,
        Self::Ry,
        Self::Rz,
        Self::Cnot,
    ];

    /// Nome exibido
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::Rx => "Rx(π/2)",
            Self::Ry => "Ry(π/2)",
            Self::Rz => "Rz(π/2)",
            Self::Cnot => "CNOT",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::X | Self::Y | Self::Z | Self::H | Self::Rx | Self::Ry | Self::Rz => Arity::One,
            Self::Cnot => Arity::Two,
        }
    }

    /// Porta de duas posições (cria emaranhamento)
    pub fn is_two_position(&self) -> bool {
        self.arity() == Arity::Two
    }

    /// Operação unitária da porta
    pub fn operation(&self) -> GateOperation {
        let h = FRAC_1_SQRT_2;
        match self {
            Self::X => GateOperation::Single(pauli_x()),
            Self::Y => GateOperation::Single(Matrix2x2::new([
                [ZERO, Complex::new(0.0, -1.0)],
                [Complex::new(0.0, 1.0), ZERO],
            ])),
            Self::Z => GateOperation::Single(Matrix2x2::new([
                [ONE, ZERO],
                [ZERO, Complex::new(-1.0, 0.0)],
            ])),
            Self::H => GateOperation::Single(Matrix2x2::new([
                [Complex::new(h, 0.0), Complex::new(h, 0.0)],
                [Complex::new(h, 0.0), Complex::new(-h, 0.0)],
            ])),
            Self::Rx => GateOperation::Single(rotation_x(FRAC_PI_2)),
            Self::Ry => GateOperation::Single(rotation_y(FRAC_PI_2)),
            Self::Rz => GateOperation::Single(rotation_z(FRAC_PI_2)),
            Self::Cnot => GateOperation::Controlled(pauli_x()),
        }
    }

    /// Matriz 2x2 (no CNOT, a matriz aplicada ao alvo)
    pub fn matrix(&self) -> Matrix2x2 {
        match self.operation() {
            GateOperation::Single(m) | GateOperation::Controlled(m) => m,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            "h" => Ok(Self::H),
            "rx" | "rx2" => Ok(Self::Rx),
            "ry" | "ry2" => Ok(Self::Ry),
            "rz" | "rz2" => Ok(Self::Rz),
            "cnot" | "cx" => Ok(Self::Cnot),
            _ => Err(format!("unknown gate '{}'", s.trim())),
        }
    }
}

fn pauli_x() -> Matrix2x2 {
    Matrix2x2::new([[ZERO, ONE], [ONE, ZERO]])
}

fn rotation_x(theta: f64) -> Matrix2x2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    Matrix2x2::new([
        [Complex::new(c, 0.0), Complex::new(0.0, -s)],
        [Complex::new(0.0, -s), Complex::new(c, 0.0)],
    ])
}

fn rotation_y(theta: f64) -> Matrix2x2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    Matrix2x2::new([
        [Complex::new(c, 0.0), Complex::new(-s, 0.0)],
        [Complex::new(s, 0.0), Complex::new(c, 0.0)],
    ])
}

fn rotation_z(theta: f64) -> Matrix2x2 {
    let half = theta / 2.0;
    Matrix2x2::new([
        [Complex::from_polar(1.0, -half), ZERO],
        [ZERO, Complex::from_polar(1.0, half)],
    ])
}

/// Registro de uma porta aplicada: (tipo, alvo1, alvo2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateApplication {
    pub kind: GateKind,
    pub target: usize,
    /// Segundo alvo (somente portas de duas posições)
    pub second: Option<usize>,
}

impl GateApplication {
    pub fn new(kind: GateKind, target: usize, second: Option<usize>) -> Self {
        let second = if kind.is_two_position() { second } else { None };
        Self { kind, target, second }
    }

    /// Verifica se a aplicação tocou a posição
    pub fn touches(&self, position: usize) -> bool {
        self.target == position || self.second == Some(position)
    }
}

impl fmt::Display for GateApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.second {
            Some(second) => write!(f, "Applied {} to bullets {} and {}", self.kind, self.target, second),
            None => write!(f, "Applied {} to bullet {}", self.kind, self.target),
        }
    }
}

// =============================================================================
// Testes
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_gates_unitary() {
        for kind in GateKind::ALL {
            assert!(kind.matrix().is_unitary(), "{} is not unitary", kind);
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(GateKind::Cnot.arity(), Arity::Two);
        assert_eq!(GateKind::Rz.arity().count(), 1);
        assert!(!GateKind::H.is_two_position());
        assert!(matches!(GateKind::Cnot.operation(), GateOperation::Controlled(_)));
    }

    #[test]
    fn test_pauli_x_flips() {
        let zero = [ONE, ZERO];
        let result = GateKind::X.matrix().apply(zero);

        // X|0⟩ = |1⟩
        assert!(result[0].norm_sqr() < 1e-10);
        assert!((result[1].re - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_hadamard_creates_superposition() {
        let result = GateKind::H.matrix().apply([ONE, ZERO]);

        // |+⟩ = (|0⟩ + |1⟩)/√2
        assert!((result[0].re - FRAC_1_SQRT_2).abs() < 1e-10);
        assert!((result[1].re - FRAC_1_SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_hadamard_self_inverse() {
        let h = GateKind::H.matrix();
        let product = h.mul(&h);
        let [[a, b], [c, d]] = product.elements;

        assert!((a - ONE).norm_sqr() < 1e-20);
        assert!((d - ONE).norm_sqr() < 1e-20);
        assert!(b.norm_sqr() < 1e-20 && c.norm_sqr() < 1e-20);
    }

    #[test]
    fn test_rotations_split_evenly() {
        // Rx(π/2) e Ry(π/2) levam |0⟩ a 50/50
        for kind in [GateKind::Rx, GateKind::Ry] {
            let [a, b] = kind.matrix().apply([ONE, ZERO]);
            assert!((a.norm_sqr() - 0.5).abs() < 1e-10);
            assert!((b.norm_sqr() - 0.5).abs() < 1e-10);
        }

        // Rz(π/2) só altera fase
        let [a, b] = GateKind::Rz.matrix().apply([ZERO, ONE]);
        assert!(a.norm_sqr() < 1e-20);
        assert!((b.norm_sqr() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_gate_names() {
        assert_eq!("x".parse::<GateKind>(), Ok(GateKind::X));
        assert_eq!("Rx(π/2)".parse::<GateKind>(), Ok(GateKind::Rx));
        assert_eq!(" CX ".parse::<GateKind>(), Ok(GateKind::Cnot));
        assert_eq!("cnot".parse::<GateKind>(), Ok(GateKind::Cnot));
        assert!("swap".parse::<GateKind>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in GateKind::ALL {
            assert_eq!(kind.to_string().parse::<GateKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_application_drops_second_for_single() {
        let app = GateApplication::new(GateKind::H, 2, Some(4));
        assert_eq!(app.second, None);
        assert!(app.touches(2));
        assert!(!app.touches(4));
        assert_eq!(app.to_string(), "Applied H to bullet 2");

        let cnot = GateApplication::new(GateKind::Cnot, 0, Some(3));
        assert!(cnot.touches(3));
        assert_eq!(cnot.to_string(), "Applied CNOT to bullets 0 and 3");
    }
}
