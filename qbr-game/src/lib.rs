//! # 🎲 qbr-game: Controlador da Partida
//!
//! Máquina de estados de uma partida de roleta quântica: seleção de portas,
//! revelação da carga, turnos de porta e disparo, rodadas e fim de jogo.
//! Cada jogador enxerga o tambor através do próprio histórico de portas.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    GameController                           │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  Phase: GateSelection → ShowBullets → Playing         │  │
//! │  │         → (nova rodada) | Terminal                    │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌──────────────────────┐  ┌─────────────────────────────┐  │
//! │  │  Player × 2          │  │  QuantumChamber (por rodada)│  │
//! │  │  vidas | portas |    │  │  VisibilityResolver         │  │
//! │  │  peek | histórico    │  │                             │  │
//! │  └──────────────────────┘  └─────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  EventBus: StateChanged | ShotResolved | RoundEnded   │  │
//! │  │            | GameEnded                                │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qbr_game::{GameConfig, GameController, PlayerId, Phase};
//! use qbr_quantum::GateKind;
//!
//! let mut game = GameController::new(GameConfig::default().with_seed(7)).unwrap();
//! game.start_new_round().unwrap();
//!
//! game.submit_gate_selection(PlayerId::One, &[GateKind::X, GateKind::X, GateKind::H]).unwrap();
//! game.submit_gate_selection(PlayerId::Two, &[GateKind::Cnot, GateKind::Z, GateKind::H]).unwrap();
//! assert_eq!(game.phase(), Phase::ShowBullets);
//!
//! game.start_playing_phase().unwrap();
//! game.apply_gate(GateKind::H, 0, None).unwrap();
//! let shot = game.shoot(false).unwrap();
//! assert_eq!(shot.bullet_index, 0);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod phase;
pub mod player;
pub mod snapshot;
pub mod visibility;

pub use config::GameConfig;
pub use controller::GameController;
pub use error::{ErrorKind, GameError, GameResult};
pub use events::{EventBus, EventFilter, EventHandler, GameEvent, ShotResult};
pub use phase::Phase;
pub use player::{Gate, Player, PlayerId};
pub use snapshot::{ChamberSnapshot, GameSnapshot, PlayerSnapshot};
pub use visibility::VisibilityResolver;
