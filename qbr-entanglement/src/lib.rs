//! # 🔗 qbr-entanglement: Ledger de Emaranhamento
//!
//! Registra quais posições do tambor estão emaranhadas entre si. Cada posição
//! tem no máximo um parceiro; um novo par sempre desfaz os pares anteriores
//! das duas pontas.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │         EntanglementLedger                      │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  partners[pos] -> Option<pos>             │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  entangle / break_pair / partner          │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qbr_entanglement::EntanglementLedger;
//!
//! let mut ledger = EntanglementLedger::new(6);
//! ledger.entangle(0, 2).unwrap();
//! assert_eq!(ledger.partner(2), Some(0));
//!
//! // Novo par para 2 desfaz 0 <-> 2
//! ledger.entangle(2, 4).unwrap();
//! assert_eq!(ledger.partner(0), None);
//! ```

pub mod error;
pub mod ledger;

pub use error::{EntanglementError, EntanglementResult};
pub use ledger::EntanglementLedger;
