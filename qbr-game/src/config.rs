//! Configuração da partida
//!
//! Valores vêm de `.env` ou de variáveis de ambiente (`QBR_*`); o binário
//! sobrescreve com flags de linha de comando.

use std::env;
use std::str::FromStr;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use qbr_quantum::MAX_POSITIONS;
use crate::error::{GameError, GameResult};

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Parâmetros de uma partida
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Balas por rodada
    pub num_bullets: usize,
    /// Portas escolhidas por jogador em cada rodada
    pub num_gates: usize,
    /// Vidas iniciais
    pub num_lives: u32,
    pub player_names: [String; 2],
    /// Semente do RNG (None = entropia do sistema)
    pub seed: Option<u64>,
    /// Eventos mantidos no histórico do bus
    pub event_history_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_bullets: 6,
            num_gates: 3,
            num_lives: 3,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            seed: None,
            event_history_size: 100,
        }
    }
}

impl GameConfig {
    /// Carrega de `.env`/ambiente, com defaults para o que faltar ou não parsear
    pub fn from_env() -> Self {
        ensure_loaded();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma fonte de chaves `QBR_*`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|v| v.trim().parse().ok())
        }

        let defaults = Self::default();
        let [name1, name2] = defaults.player_names;
        Self {
            num_bullets: parse(lookup("QBR_BULLETS")).unwrap_or(defaults.num_bullets),
            num_gates: parse(lookup("QBR_GATES")).unwrap_or(defaults.num_gates),
            num_lives: parse(lookup("QBR_LIVES")).unwrap_or(defaults.num_lives),
            player_names: [
                lookup("QBR_PLAYER1").unwrap_or(name1),
                lookup("QBR_PLAYER2").unwrap_or(name2),
            ],
            seed: parse(lookup("QBR_SEED")),
            event_history_size: defaults.event_history_size,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(2..=MAX_POSITIONS).contains(&self.num_bullets) {
            return Err(GameError::InvalidConfiguration(format!(
                "bullet count must be in 2..={}, got {}",
                MAX_POSITIONS, self.num_bullets
            )));
        }
        if self.num_gates == 0 {
            return Err(GameError::InvalidConfiguration("gate count must be positive".into()));
        }
        if self.num_lives == 0 {
            return Err(GameError::InvalidConfiguration("life count must be positive".into()));
        }
        Ok(())
    }

    /// Faixa (min, max) de balas vivas por rodada: [max(1, ⌊0.3·N⌋), N−1]
    pub fn live_range(&self) -> (usize, usize) {
        let n = self.num_bullets;
        let min = ((n as f64 * 0.3).floor() as usize).max(1);
        let max = n.saturating_sub(1).max(1);
        (min.min(max), max)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_names[1], "Player 2");
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            GameConfig { num_bullets: 1, ..Default::default() },
            GameConfig { num_bullets: MAX_POSITIONS + 1, ..Default::default() },
            GameConfig { num_gates: 0, ..Default::default() },
            GameConfig { num_lives: 0, ..Default::default() },
        ];
        for config in bad {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, GameError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_live_range() {
        let range = |n| GameConfig { num_bullets: n, ..Default::default() }.live_range();
        assert_eq!(range(6), (1, 5));
        assert_eq!(range(10), (3, 9));
        assert_eq!(range(4), (1, 3));
        assert_eq!(range(2), (1, 1));
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QBR_PLAYER2", "Schrödinger"),
            ("QBR_SEED", "42"),
            ("QBR_BULLETS", " 8 "),
            ("QBR_LIVES", "muitas"),
        ]
        .into_iter()
        .collect();

        let config = GameConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.player_names, ["Player 1".to_string(), "Schrödinger".to_string()]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.num_bullets, 8);
        // Valor inválido cai no default
        assert_eq!(config.num_lives, 3);
        assert_eq!(config.num_gates, 3);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        assert_eq!(GameConfig::from_lookup(|_| None), GameConfig::default());
    }
}
