//! Saída colorida do estado da partida

use colored::*;
use qbr_game::{GameController, Player, PlayerId, ShotResult};
use qbr_quantum::{BulletCategory, GateKind};

pub fn bullet(category: BulletCategory) -> ColoredString {
    match category {
        BulletCategory::Live => "●".red().bold(),
        BulletCategory::Blank => "○".white(),
        BulletCategory::Superposition => "◐".magenta().bold(),
        BulletCategory::Entangled => "∞".cyan().bold(),
        BulletCategory::FiredLive => "✗".red().dimmed(),
        BulletCategory::FiredBlank => "·".dimmed(),
    }
}

pub fn chamber_line(states: &[BulletCategory], cursor: usize) -> String {
    states
        .iter()
        .enumerate()
        .map(|(i, &state)| {
            if i == cursor {
                format!("[{}]", bullet(state))
            } else {
                format!(" {} ", bullet(state))
            }
        })
        .collect()
}

pub fn player_line(player: &Player, current: bool) -> String {
    let marker = if current { "▶".green().bold() } else { " ".normal() };
    let hearts = "♥".repeat(player.lives as usize);
    let gates: Vec<String> = player.gates().iter().map(ToString::to_string).collect();
    let peek = if player.peek_available() { "peek" } else { "" };
    format!(
        "{} {:<12} {:<6} {} {}",
        marker,
        player.name.bold(),
        hearts.red(),
        gates.join(" "),
        peek.yellow()
    )
}

pub fn gate_catalogue() -> String {
    GateKind::ALL
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_table(game: &GameController, viewer: PlayerId) {
    println!();
    println!("{} {}", "Round".bold(), game.round());
    for id in [PlayerId::One, PlayerId::Two] {
        println!("{}", player_line(game.player(id), id == game.current_player()));
    }
    if let (Some(chamber), Ok(states)) = (game.chamber(), game.visible_bullet_states(viewer)) {
        let indices: String = (0..states.len()).map(|i| format!(" {} ", i)).collect();
        println!("  {}", indices.dimmed());
        println!("  {}", chamber_line(&states, chamber.current_position()));
    }
}

pub fn shot(result: &ShotResult) {
    let outcome = if result.is_live { "BANG".red().bold() } else { "click".white().bold() };
    println!(
        "{} shoots {} with bullet {}: {}",
        result.shooter.bold(),
        if result.shot_self { "themselves".to_string() } else { result.target.clone() },
        result.bullet_index,
        outcome
    );
    if result.damage_dealt {
        println!("  {} has {} lives left", result.target, result.target_lives_remaining);
    }
    if result.extra_turn {
        println!("  {}", "Extra turn!".green());
    }
    if result.round_over {
        println!("  {}", "Chamber empty, round over".yellow());
    }
    if let Some(winner) = &result.winner {
        println!();
        println!("{} {}", "Winner:".green().bold(), winner.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chamber_line_marks_cursor() {
        colored::control::set_override(false);
        let line = chamber_line(&[BulletCategory::FiredBlank, BulletCategory::Live], 1);
        assert_eq!(line, " · [●]");
    }

    #[test]
    fn test_gate_catalogue_lists_all() {
        let catalogue = gate_catalogue();
        assert!(catalogue.starts_with("X, Y, Z, H"));
        assert!(catalogue.ends_with("CNOT"));
    }
}
