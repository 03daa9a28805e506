//! Resultados de disparo e categorias de bala

use serde::{Deserialize, Serialize};
use std::fmt;

/// Limite para considerar uma posição definida (P > 0.99 ou P < 0.01)
pub const CERTAINTY_THRESHOLD: f64 = 0.99;

/// Resultado de uma medição
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// 0
    Blank,
    /// 1
    Live,
}

impl Outcome {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::Live } else { Self::Blank }
    }

    pub fn bit(self) -> bool {
        self == Self::Live
    }

    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.bit() as u8
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Probabilidades marginais de uma posição
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marginal {
    pub blank: f64,
    pub live: f64,
}

impl Marginal {
    /// Marginal certa para um resultado
    pub fn certain(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Blank => Self { blank: 1.0, live: 0.0 },
            Outcome::Live => Self { blank: 0.0, live: 1.0 },
        }
    }

    /// Marginal a partir de P(live)
    pub fn from_live(live: f64) -> Self {
        Self { blank: 1.0 - live, live }
    }

    /// Resultado praticamente certo, se houver
    pub fn definite(&self) -> Option<Outcome> {
        if self.live > CERTAINTY_THRESHOLD {
            Some(Outcome::Live)
        } else if self.live < 1.0 - CERTAINTY_THRESHOLD {
            Some(Outcome::Blank)
        } else {
            None
        }
    }
}

/// Categoria visível de uma posição
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletCategory {
    Live,
    Blank,
    Superposition,
    Entangled,
    FiredLive,
    FiredBlank,
}

impl BulletCategory {
    /// Rótulo de uma posição não disparada com resultado conhecido
    pub fn loaded(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Live => Self::Live,
            Outcome::Blank => Self::Blank,
        }
    }

    /// Rótulo de uma posição já disparada
    pub fn fired(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Live => Self::FiredLive,
            Outcome::Blank => Self::FiredBlank,
        }
    }

    pub fn is_fired(&self) -> bool {
        matches!(self, Self::FiredLive | Self::FiredBlank)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Blank => "blank",
            Self::Superposition => "superposition",
            Self::Entangled => "entangled",
            Self::FiredLive => "fired_live",
            Self::FiredBlank => "fired_blank",
        }
    }
}

impl fmt::Display for BulletCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
