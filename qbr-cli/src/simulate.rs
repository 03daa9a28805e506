//! Partidas entre agentes aleatórios

use anyhow::{Context, ensure};
use colored::*;
use serde::Serialize;
use qbr_game::{GameConfig, GameController, PlayerId, ShotResult};
use crate::agent::RandomAgent;

/// Rodadas máximas antes de desistir de uma partida
const MAX_ROUNDS: u32 = 1000;

/// Estatísticas agregadas
#[derive(Debug, Default, Clone, Serialize)]
pub struct SimulationStats {
    pub matches: u32,
    pub wins: [u32; 2],
    pub rounds: u64,
    pub shots: u64,
    pub live_shots: u64,
    pub self_shots: u64,
    pub extra_turns: u64,
}

impl SimulationStats {
    fn record_shot(&mut self, shot: &ShotResult) {
        self.shots += 1;
        if shot.is_live {
            self.live_shots += 1;
        }
        if shot.shot_self {
            self.self_shots += 1;
        }
        if shot.extra_turn {
            self.extra_turns += 1;
        }
    }

    fn record_match(&mut self, winner: PlayerId, rounds: u32) {
        self.matches += 1;
        self.wins[winner.index()] += 1;
        self.rounds += rounds as u64;
    }

    pub fn average_rounds(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.rounds as f64 / self.matches as f64
        }
    }

    pub fn live_ratio(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.live_shots as f64 / self.shots as f64
        }
    }
}

/// Joga uma partida completa e devolve (vencedor, rodadas)
pub fn play_match(
    config: GameConfig,
    agents: &mut [RandomAgent; 2],
    stats: &mut SimulationStats,
) -> anyhow::Result<(PlayerId, u32)> {
    let gates = config.num_gates;
    let mut game = GameController::new(config)?;

    while !game.is_game_over() {
        ensure!(game.round() < MAX_ROUNDS, "match did not finish after {} rounds", MAX_ROUNDS);
        game.start_new_round()?;
        for id in [PlayerId::One, PlayerId::Two] {
            let kinds = agents[id.index()].choose_gates(gates);
            game.submit_gate_selection(id, &kinds)?;
        }
        game.start_playing_phase()?;

        while !game.is_round_over() && !game.is_game_over() {
            let current = game.current_player();
            let shot = agents[current.index()].take_turn(&mut game)?;
            stats.record_shot(&shot);
        }
    }

    let winner = game.winner().context("finished match has no winner")?;
    Ok((winner, game.round()))
}

pub fn simulate(config: &GameConfig, matches: u32) -> anyhow::Result<SimulationStats> {
    let base = config.seed.unwrap_or_else(rand::random);
    let mut stats = SimulationStats::default();

    for i in 0..matches {
        let seed = base.wrapping_add(i as u64);
        let mut agents = [
            RandomAgent::new(seed.wrapping_mul(2)),
            RandomAgent::new(seed.wrapping_mul(2).wrapping_add(1)),
        ];
        let (winner, rounds) = play_match(config.clone().with_seed(seed), &mut agents, &mut stats)
            .with_context(|| format!("match {} (seed {})", i + 1, seed))?;
        stats.record_match(winner, rounds);
        tracing::debug!(match_index = i + 1, seed, winner = %winner, rounds, "match finished");
    }
    Ok(stats)
}

pub fn run(config: GameConfig, matches: u32, json: bool) -> anyhow::Result<()> {
    config.validate()?;
    let stats = simulate(&config, matches)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Simulation".bold());
    println!(
        "  {} bullets, {} gates, {} lives, {} matches",
        config.num_bullets, config.num_gates, config.num_lives, stats.matches
    );
    println!();
    for id in [PlayerId::One, PlayerId::Two] {
        let wins = stats.wins[id.index()];
        let share = if stats.matches == 0 { 0.0 } else { 100.0 * wins as f64 / stats.matches as f64 };
        println!(
            "  {:<12} {:>6} wins ({:.1}%)",
            config.player_names[id.index()].bold(),
            wins.to_string().green(),
            share
        );
    }
    println!();
    println!("  {:<16} {:.2}", "rounds/match", stats.average_rounds());
    println!("  {:<16} {}", "shots", stats.shots);
    println!("  {:<16} {:.1}%", "live", 100.0 * stats.live_ratio());
    println!("  {:<16} {}", "self shots", stats.self_shots);
    println!("  {:<16} {}", "extra turns", stats.extra_turns);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_is_reproducible() {
        let config = GameConfig::default().with_seed(314);
        let a = simulate(&config, 5).unwrap();
        let b = simulate(&config, 5).unwrap();
        assert_eq!(a.matches, 5);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.shots, b.shots);
        assert_eq!(a.wins[0] + a.wins[1], 5);
        assert!(a.live_shots > 0);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SimulationStats::default();
        assert_eq!(stats.average_rounds(), 0.0);
        assert_eq!(stats.live_ratio(), 0.0);
    }
}
