//! Controlador da partida: fases, turnos, rodadas

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, RngCore, SeedableRng};
use qbr_quantum::{BulletCategory, GateApplication, GateKind, QuantumChamber};
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::events::{EventBus, EventFilter, GameEvent, ShotResult};
use crate::phase::Phase;
use crate::player::{Player, PlayerId};
use crate::snapshot::{ChamberSnapshot, GameSnapshot, PlayerSnapshot};
use crate::visibility::VisibilityResolver;

/// Máquina de estados de uma partida
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    players: [Player; 2],
    /// Tambor da rodada atual (None antes da primeira rodada)
    chamber: Option<QuantumChamber>,
    phase: Phase,
    round: u32,
    /// Quem está escolhendo portas em `GateSelection`
    selecting: PlayerId,
    current: PlayerId,
    gate_applied_this_turn: bool,
    game_over: bool,
    winner: Option<PlayerId>,
    rng: StdRng,
    events: EventBus,
}

impl GameController {
    /// Cria controlador. A primeira rodada começa com `start_new_round`.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let [name1, name2] = config.player_names.clone();
        let players = [
            Player::new(PlayerId::One, name1, config.num_lives),
            Player::new(PlayerId::Two, name2, config.num_lives),
        ];
        let events = EventBus::with_history(config.event_history_size);

        Ok(Self {
            config,
            players,
            chamber: None,
            phase: Phase::GateSelection,
            round: 0,
            selecting: PlayerId::One,
            current: PlayerId::One,
            gate_applied_this_turn: false,
            game_over: false,
            winner: None,
            rng,
            events,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Comandos
    // ═══════════════════════════════════════════════════════════════════

    /// Inicia uma nova rodada: jogadores zerados, tambor novo.
    ///
    /// Só é aceito antes da primeira rodada ou com o tambor esgotado.
    pub fn start_new_round(&mut self) -> GameResult<()> {
        self.require_round_complete()
            .inspect_err(|e| rejected("start_new_round", e))?;

        self.round += 1;
        self.phase = Phase::GateSelection;
        self.selecting = PlayerId::One;
        self.current = PlayerId::One;
        self.gate_applied_this_turn = false;
        for player in &mut self.players {
            player.reset_for_round();
        }

        let size = self.config.num_bullets;
        let (min, max) = self.config.live_range();
        let live_count = self.rng.gen_range(min..=max);
        let mut live = index::sample(&mut self.rng, size, live_count).into_vec();
        live.sort_unstable();

        let mut chamber = QuantumChamber::with_seed(size, self.rng.next_u64())?;
        chamber.initialize(size, &live)?;
        self.chamber = Some(chamber);

        tracing::info!(round = self.round, bullets = size, live = ?live, "round started");
        self.events.emit(GameEvent::StateChanged);
        Ok(())
    }

    /// Registra as portas escolhidas por um jogador
    pub fn submit_gate_selection(&mut self, player: PlayerId, kinds: &[GateKind]) -> GameResult<()> {
        self.try_submit_gate_selection(player, kinds)
            .inspect_err(|e| rejected("submit_gate_selection", e))
    }

    fn try_submit_gate_selection(&mut self, player: PlayerId, kinds: &[GateKind]) -> GameResult<()> {
        self.require_phase("submit gates", Phase::GateSelection)?;
        if player != self.selecting {
            return Err(GameError::NotSelectingPlayer {
                expected: self.selecting,
                actual: player,
            });
        }
        if kinds.len() != self.config.num_gates {
            return Err(GameError::WrongGateCount {
                expected: self.config.num_gates,
                actual: kinds.len(),
            });
        }

        self.players[player.index()].set_gates(kinds);
        tracing::debug!(player = %player, gates = ?kinds, "gates selected");

        match player {
            PlayerId::One => self.selecting = PlayerId::Two,
            PlayerId::Two => self.phase = Phase::ShowBullets,
        }
        self.events.emit(GameEvent::StateChanged);
        Ok(())
    }

    /// Sai da revelação da carga e começa os turnos (jogador 1 primeiro)
    pub fn start_playing_phase(&mut self) -> GameResult<()> {
        self.require_phase("start playing", Phase::ShowBullets)
            .inspect_err(|e| rejected("start_playing_phase", e))?;

        self.phase = Phase::Playing;
        self.current = PlayerId::One;
        self.gate_applied_this_turn = false;
        self.events.emit(GameEvent::StateChanged);
        Ok(())
    }

    /// Aplica uma porta do inventário do jogador atual
    pub fn apply_gate(
        &mut self,
        kind: GateKind,
        target: usize,
        second: Option<usize>,
    ) -> GameResult<GateApplication> {
        self.try_apply_gate(kind, target, second)
            .inspect_err(|e| rejected("apply_gate", e))
    }

    fn try_apply_gate(
        &mut self,
        kind: GateKind,
        target: usize,
        second: Option<usize>,
    ) -> GameResult<GateApplication> {
        self.require_bullets_left("apply gate")?;
        if self.gate_applied_this_turn {
            return Err(GameError::GateAlreadyApplied);
        }
        let index = self.current.index();
        if !self.players[index].has_gate(kind) {
            return Err(GameError::GateUnavailable(kind));
        }

        let chamber = self.chamber.as_mut().ok_or(GameError::NoRound)?;
        let application = chamber.apply_gate(kind, target, second)?;
        if let Err(e) = chamber.check_normalization() {
            tracing::error!(error = %e, "amplitude norm drift after gate");
        }

        let player = &mut self.players[index];
        player.use_gate(kind)?;
        player.record_application(application);
        self.gate_applied_this_turn = true;

        tracing::info!(player = %player.name, "{}", application);
        self.events.emit(GameEvent::StateChanged);
        Ok(application)
    }

    /// Dispara a próxima bala em si mesmo ou no oponente
    pub fn shoot(&mut self, shoot_self: bool) -> GameResult<ShotResult> {
        self.try_shoot(shoot_self).inspect_err(|e| rejected("shoot", e))
    }

    fn try_shoot(&mut self, shoot_self: bool) -> GameResult<ShotResult> {
        self.require_bullets_left("shoot")?;
        let chamber = self.chamber.as_mut().ok_or(GameError::NoRound)?;
        let (position, outcome) = chamber.fire_next().ok_or(GameError::ChamberEmpty)?;
        let chamber_exhausted = chamber.all_measured();

        let shooter = self.current;
        let target = if shoot_self { shooter } else { shooter.opponent() };

        let mut damage_dealt = false;
        let mut extra_turn = false;
        if outcome.is_live() {
            damage_dealt = true;
            if self.players[target.index()].take_damage() {
                self.pass_turn();
            } else {
                self.game_over = true;
                self.winner = Some(target.opponent());
                self.phase = Phase::Terminal;
            }
        } else if shoot_self {
            extra_turn = true;
            self.gate_applied_this_turn = false;
        } else {
            self.pass_turn();
        }

        let round_over = chamber_exhausted && !self.game_over;
        let winner_name = self.winner.map(|w| self.players[w.index()].name.clone());
        let result = ShotResult {
            success: true,
            shooter_id: shooter,
            shooter: self.players[shooter.index()].name.clone(),
            target_id: target,
            target: self.players[target.index()].name.clone(),
            bullet_index: position,
            outcome,
            is_live: outcome.is_live(),
            shot_self: shoot_self,
            extra_turn,
            damage_dealt,
            target_lives_remaining: self.players[target.index()].lives,
            round_over,
            game_over: self.game_over,
            winner: winner_name.clone(),
        };

        tracing::info!(
            shooter = %result.shooter,
            target = %result.target,
            position,
            outcome = %outcome,
            lives = result.target_lives_remaining,
            "shot fired"
        );

        if let (Some(winner), Some(name)) = (self.winner, winner_name) {
            tracing::info!(winner = %name, round = self.round, "game over");
            self.events.emit(GameEvent::GameEnded { winner, name });
        }
        if round_over {
            tracing::info!(round = self.round, "round over");
            self.events.emit(GameEvent::RoundEnded { round: self.round });
        }
        self.events.emit(GameEvent::ShotResolved(result.clone()));
        self.events.emit(GameEvent::StateChanged);
        Ok(result)
    }

    /// Revela as portas não usadas do oponente. Não consome o turno.
    pub fn use_peek(&mut self) -> GameResult<Vec<GateKind>> {
        self.try_use_peek().inspect_err(|e| rejected("use_peek", e))
    }

    fn try_use_peek(&mut self) -> GameResult<Vec<GateKind>> {
        self.require_bullets_left("peek")?;
        self.players[self.current.index()].spend_peek()?;
        let gates = self.players[self.current.opponent().index()].available_gates();

        tracing::debug!(player = %self.current, ?gates, "peek used");
        self.events.emit(GameEvent::StateChanged);
        Ok(gates)
    }

    fn require_round_complete(&self) -> GameResult<()> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.round > 0 && !self.is_round_over() {
            return Err(GameError::RoundInProgress(self.round));
        }
        Ok(())
    }

    /// Fase `Playing` com balas restantes
    fn require_bullets_left(&self, action: &'static str) -> GameResult<()> {
        self.require_phase(action, Phase::Playing)?;
        if self.is_round_over() {
            return Err(GameError::ChamberEmpty);
        }
        Ok(())
    }

    fn pass_turn(&mut self) {
        self.current = self.current.opponent();
        self.gate_applied_this_turn = false;
    }

    /// Ordem: fim de jogo, rodada existente, fase
    fn require_phase(&self, action: &'static str, expected: Phase) -> GameResult<()> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.chamber.is_none() {
            return Err(GameError::NoRound);
        }
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                action,
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Consultas
    // ═══════════════════════════════════════════════════════════════════

    /// Snapshot completo do estado
    pub fn game_state(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            round: self.round,
            selecting_player: self.selecting,
            current_player: self.current,
            gate_applied_this_turn: self.gate_applied_this_turn,
            players: [
                PlayerSnapshot::from(&self.players[0]),
                PlayerSnapshot::from(&self.players[1]),
            ],
            chamber: self.chamber.as_ref().map(ChamberSnapshot::from),
            game_over: self.game_over,
            winner: self.winner,
        }
    }

    /// O que `viewer` enxerga de cada posição
    pub fn visible_bullet_states(&self, viewer: PlayerId) -> GameResult<Vec<BulletCategory>> {
        let chamber = self.chamber.as_ref().ok_or(GameError::NoRound)?;
        Ok(VisibilityResolver::new(chamber, &self.players[viewer.index()]).visible_states())
    }

    /// (total, posições live da carga inicial)
    pub fn initial_bullet_config(&self) -> Option<(usize, Vec<usize>)> {
        self.chamber
            .as_ref()
            .map(|c| (c.size(), c.initial_live_positions().to_vec()))
    }

    /// Tipos de porta selecionáveis
    pub fn available_gate_types(&self) -> &'static [GateKind] {
        &GateKind::ALL
    }

    /// Todas as balas da rodada foram disparadas
    pub fn is_round_over(&self) -> bool {
        self.chamber.as_ref().is_some_and(QuantumChamber::all_measured)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn selecting_player(&self) -> PlayerId {
        self.selecting
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn gate_applied_this_turn(&self) -> bool {
        self.gate_applied_this_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn chamber(&self) -> Option<&QuantumChamber> {
        self.chamber.as_ref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ═══════════════════════════════════════════════════════════════════
    // Hooks
    // ═══════════════════════════════════════════════════════════════════

    pub fn on_state_change<F>(&mut self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.subscribe(EventFilter::StateChange, move |_| handler());
    }

    pub fn on_shot_result<F>(&mut self, handler: F)
    where
        F: Fn(&ShotResult) + Send + Sync + 'static,
    {
        self.events.subscribe(EventFilter::ShotResult, move |event| {
            if let GameEvent::ShotResolved(result) = event {
                handler(result);
            }
        });
    }

    pub fn on_round_end<F>(&mut self, handler: F)
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.events.subscribe(EventFilter::RoundEnd, move |event| {
            if let GameEvent::RoundEnded { round } = event {
                handler(*round);
            }
        });
    }

    pub fn on_game_end<F>(&mut self, handler: F)
    where
        F: Fn(PlayerId, &str) + Send + Sync + 'static,
    {
        self.events.subscribe(EventFilter::GameEnd, move |event| {
            if let GameEvent::GameEnded { winner, name } = event {
                handler(*winner, name);
            }
        });
    }

    /// Registro direto no bus
    pub fn subscribe<F>(&mut self, filter: EventFilter, handler: F)
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(filter, handler);
    }
}

fn rejected(command: &str, error: &GameError) {
    tracing::debug!(command, kind = ?error.kind(), "rejected: {}", error);
}
