//! Agente aleatório usado pelas simulações

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use qbr_game::{GameController, GameResult, ShotResult};
use qbr_quantum::{BulletCategory, GateKind};

/// Probabilidade de tentar uma porta no turno
const GATE_CHANCE: f64 = 0.5;
/// Probabilidade de usar o peek quando disponível
const PEEK_CHANCE: f64 = 0.2;

/// Jogador automático: portas aleatórias, disparo guiado pelo que enxerga
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn choose_gates(&mut self, count: usize) -> Vec<GateKind> {
        (0..count)
            .map(|_| GateKind::ALL[self.rng.gen_range(0..GateKind::ALL.len())])
            .collect()
    }

    /// Joga um turno do jogador atual: peek e porta opcionais, depois dispara
    pub fn take_turn(&mut self, game: &mut GameController) -> GameResult<ShotResult> {
        let me = game.current_player();

        if game.player(me).peek_available() && self.rng.gen_bool(PEEK_CHANCE) {
            game.use_peek()?;
        }

        if self.rng.gen_bool(GATE_CHANCE) {
            self.try_gate(game)?;
        }

        let cursor = game.chamber().map_or(0, |c| c.current_position());
        let seen = game.visible_bullet_states(me)?;
        let shoot_self = match seen.get(cursor) {
            Some(BulletCategory::Blank) => true,
            Some(BulletCategory::Live) => false,
            _ => self.rng.gen_bool(0.5),
        };
        game.shoot(shoot_self)
    }

    fn try_gate(&mut self, game: &mut GameController) -> GameResult<()> {
        let me = game.current_player();
        let Some(kind) = game.player(me).available_gates().choose(&mut self.rng).copied() else {
            return Ok(());
        };
        let mut targets = match game.chamber() {
            Some(chamber) => chamber.unmeasured_positions(),
            None => return Ok(()),
        };
        targets.shuffle(&mut self.rng);

        match (kind.is_two_position(), targets.as_slice()) {
            (true, [first, second, ..]) => game.apply_gate(kind, *first, Some(*second)).map(|_| ()),
            (false, [first, ..]) => game.apply_gate(kind, *first, None).map(|_| ()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbr_game::{GameConfig, PlayerId};

    #[test]
    fn test_agents_finish_a_match() {
        let config = GameConfig::default().with_seed(11);
        let mut game = GameController::new(config).unwrap();
        let mut agents = [RandomAgent::new(1), RandomAgent::new(2)];

        while !game.is_game_over() {
            game.start_new_round().unwrap();
            for id in [PlayerId::One, PlayerId::Two] {
                let gates = agents[id.index()].choose_gates(3);
                game.submit_gate_selection(id, &gates).unwrap();
            }
            game.start_playing_phase().unwrap();
            while !game.is_round_over() && !game.is_game_over() {
                let current = game.current_player();
                agents[current.index()].take_turn(&mut game).unwrap();
            }
            assert!(game.round() < 200);
        }
        assert!(game.winner().is_some());
    }

    #[test]
    fn test_choose_gates_count() {
        let mut agent = RandomAgent::new(5);
        assert_eq!(agent.choose_gates(4).len(), 4);
    }
}
