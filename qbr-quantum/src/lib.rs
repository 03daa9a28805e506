//! # ⚛️ qbr-quantum: Tambor Quântico
//!
//! Simula o tambor de N balas como um registrador de N qubits: carga inicial
//! em estado base, portas unitárias escolhidas pelos jogadores, disparo como
//! medição destrutiva com amostragem pela regra de Born e colapso adiado do
//! parceiro emaranhado.
//!
//! ## Computational Complexity
//!
//! **Gate O(2^N):** uma passada sobre o vetor de amplitudes
//!
//! **Measure O(2^N):** marginal + projeção + renormalização
//!
//! **Probabilities O(N × 2^N):** uma marginal por posição
//!
//! **Scalability:** N ≤ 16 ([`MAX_POSITIONS`]); rodadas reais usam 4 a 10 balas.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          QuantumChamber                         │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  AmplitudeVector (2^N amplitudes)         │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  ChamberSlot[N]: outcome + deferred       │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  EntanglementLedger                       │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Colapso adiado
//!
//! Quando uma posição emaranhada é medida por amostragem, o parceiro ainda não
//! medido recebe o mesmo resultado e o par sai do ledger. Isso só é exato para
//! estados base seguidos de CNOT; para outros estados é uma aproximação, e é a
//! regra do jogo.
//!
//! ## Exemplo
//!
//! ```
//! use qbr_quantum::{QuantumChamber, GateKind, Outcome, BulletCategory};
//!
//! let mut chamber = QuantumChamber::with_seed(6, 42).unwrap();
//! chamber.initialize(6, &[1, 3, 5]).unwrap();
//!
//! assert_eq!(chamber.measure(1).unwrap(), Outcome::Live);
//! assert_eq!(chamber.classify(0).unwrap(), BulletCategory::Blank);
//!
//! chamber.apply_gate(GateKind::Cnot, 0, Some(2)).unwrap();
//! let v = chamber.measure(0).unwrap();
//! assert_eq!(chamber.measure(2).unwrap(), v);
//! ```

pub mod chamber;
pub mod error;
pub mod gates;
pub mod outcome;
pub mod state;

pub use chamber::{QuantumChamber, MAX_POSITIONS};
pub use error::{QuantumError, QuantumResult};
pub use gates::{Arity, Complex, GateApplication, GateKind, GateOperation, Matrix2x2};
pub use outcome::{BulletCategory, Marginal, Outcome, CERTAINTY_THRESHOLD};
pub use state::{AmplitudeVector, NORM_TOLERANCE};
