//! Sistema de eventos do controlador

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use qbr_quantum::Outcome;
use crate::player::PlayerId;

/// Resultado de um disparo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub success: bool,
    pub shooter_id: PlayerId,
    pub shooter: String,
    pub target_id: PlayerId,
    pub target: String,
    /// Posição disparada
    pub bullet_index: usize,
    pub outcome: Outcome,
    pub is_live: bool,
    pub shot_self: bool,
    pub extra_turn: bool,
    pub damage_dealt: bool,
    pub target_lives_remaining: u32,
    pub round_over: bool,
    pub game_over: bool,
    pub winner: Option<String>,
}

/// Eventos emitidos pelo controlador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Qualquer mutação de estado
    StateChanged,
    ShotResolved(ShotResult),
    RoundEnded { round: u32 },
    GameEnded { winner: PlayerId, name: String },
}

/// Handler de eventos (callback)
pub type EventHandler = Box<dyn Fn(&GameEvent) + Send + Sync>;

/// Filtro de eventos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFilter {
    All,
    StateChange,
    ShotResult,
    RoundEnd,
    GameEnd,
}

impl EventFilter {
    /// Verifica se um evento passa pelo filtro
    pub fn matches(&self, event: &GameEvent) -> bool {
        matches!(
            (self, event),
            (EventFilter::All, _)
                | (EventFilter::StateChange, GameEvent::StateChanged)
                | (EventFilter::ShotResult, GameEvent::ShotResolved(_))
                | (EventFilter::RoundEnd, GameEvent::RoundEnded { .. })
                | (EventFilter::GameEnd, GameEvent::GameEnded { .. })
        )
    }
}

/// Bus de eventos. Handlers são chamados na ordem de registro.
pub struct EventBus {
    handlers: Vec<(EventFilter, EventHandler)>,
    /// Histórico limitado
    history: VecDeque<GameEvent>,
    max_history: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history(100)
    }

    /// Cria com tamanho de histórico customizado
    pub fn with_history(max_history: usize) -> Self {
        Self {
            handlers: Vec::new(),
            history: VecDeque::new(),
            max_history,
        }
    }

    /// Registra handler para um filtro
    pub fn subscribe<F>(&mut self, filter: EventFilter, handler: F)
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.handlers.push((filter, Box::new(handler)));
    }

    /// Emite um evento
    pub fn emit(&mut self, event: GameEvent) {
        for (filter, handler) in &self.handlers {
            if filter.matches(&event) {
                handler(&event);
            }
        }

        if self.max_history > 0 {
            if self.history.len() == self.max_history {
                self.history.pop_front();
            }
            self.history.push_back(event);
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &GameEvent> {
        self.history.iter()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .field("max_history", &self.max_history)
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(bus: &mut EventBus, filter: EventFilter) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let clone = count.clone();
        bus.subscribe(filter, move |_| {
            clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_emit_respects_filter() {
        let mut bus = EventBus::new();
        let all = counter(&mut bus, EventFilter::All);
        let rounds = counter(&mut bus, EventFilter::RoundEnd);

        bus.emit(GameEvent::StateChanged);
        bus.emit(GameEvent::RoundEnded { round: 1 });

        assert_eq!(all.load(Ordering::SeqCst), 2);
        assert_eq!(rounds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_filter_matches() {
        let end = GameEvent::GameEnded { winner: PlayerId::One, name: "P1".into() };
        assert!(EventFilter::GameEnd.matches(&end));
        assert!(!EventFilter::StateChange.matches(&end));
        assert!(EventFilter::All.matches(&end));
    }

    #[test]
    fn test_history_limit() {
        let mut bus = EventBus::with_history(2);
        for round in 0..5 {
            bus.emit(GameEvent::RoundEnded { round });
        }
        let rounds: Vec<_> = bus.history().cloned().collect();
        assert_eq!(
            rounds,
            vec![GameEvent::RoundEnded { round: 3 }, GameEvent::RoundEnded { round: 4 }]
        );
    }

    #[test]
    fn test_history_disabled() {
        let mut bus = EventBus::with_history(0);
        bus.emit(GameEvent::StateChanged);
        assert_eq!(bus.history().count(), 0);
    }

    #[test]
    fn test_event_json_tag() {
        let json = serde_json::to_string(&GameEvent::RoundEnded { round: 2 }).unwrap();
        assert_eq!(json, r#"{"event":"round_ended","round":2}"#);
    }
}
