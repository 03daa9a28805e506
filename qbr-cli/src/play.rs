//! Partida hot-seat no terminal

use std::io::{self, BufRead, Write};
use anyhow::{Context, bail};
use colored::*;
use qbr_game::{GameConfig, GameController, Phase, PlayerId};
use qbr_quantum::GateKind;
use crate::render;

/// Comando digitado durante o turno
#[derive(Debug, Clone, PartialEq)]
enum TurnCommand {
    Gate { kind: GateKind, target: usize, second: Option<usize> },
    Shoot { shoot_self: bool },
    Peek,
    State,
    Help,
    Quit,
}

fn parse_position(token: Option<&str>) -> anyhow::Result<usize> {
    let token = token.context("missing bullet position")?;
    token
        .parse()
        .with_context(|| format!("'{}' is not a bullet position", token))
}

fn parse_command(line: &str) -> anyhow::Result<TurnCommand> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(TurnCommand::Help);
    };

    Ok(match verb.to_ascii_lowercase().as_str() {
        "gate" | "g" => {
            let kind: GateKind = words
                .next()
                .context("missing gate name")?
                .parse()
                .map_err(anyhow::Error::msg)?;
            let target = parse_position(words.next())?;
            let second = if kind.is_two_position() {
                Some(parse_position(words.next())?)
            } else {
                None
            };
            TurnCommand::Gate { kind, target, second }
        }
        "shoot" | "s" => match words.next() {
            Some("self" | "me") => TurnCommand::Shoot { shoot_self: true },
            Some("opp" | "opponent" | "them") => TurnCommand::Shoot { shoot_self: false },
            _ => bail!("shoot needs 'self' or 'opp'"),
        },
        "peek" | "p" => TurnCommand::Peek,
        "state" => TurnCommand::State,
        "help" | "?" => TurnCommand::Help,
        "quit" | "exit" | "q" => TurnCommand::Quit,
        other => bail!("unknown command '{}'", other),
    })
}

fn parse_gates(line: &str) -> anyhow::Result<Vec<GateKind>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| w.parse().map_err(anyhow::Error::msg))
        .collect()
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  gate <kind> <bullet> [bullet2]   apply a gate (CNOT needs control and target)");
    println!("  shoot self|opp                   fire the next bullet");
    println!("  peek                             see the opponent's unused gates (once per round)");
    println!("  state                            print the full game state as JSON");
    println!("  quit                             leave the match");
    println!();
    println!("  {} {}  {} {}  {} {}  {} {}",
        render::bullet(qbr_quantum::BulletCategory::Live), "live",
        render::bullet(qbr_quantum::BulletCategory::Blank), "blank",
        render::bullet(qbr_quantum::BulletCategory::Superposition), "superposition",
        render::bullet(qbr_quantum::BulletCategory::Entangled), "entangled",
    );
}

struct Session<R> {
    input: R,
}

impl<R: BufRead> Session<R> {
    /// Lê uma linha; None no fim da entrada
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        print!("{} ", text.cyan().bold());
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn select_gates(&mut self, game: &mut GameController) -> anyhow::Result<bool> {
        while game.phase() == Phase::GateSelection {
            let id = game.selecting_player();
            let name = game.player(id).name.clone();
            println!();
            println!("Available gates: {}", render::gate_catalogue());
            let text = format!("{}, pick {} gates:", name, game.config().num_gates);
            let Some(line) = self.prompt(&text)? else {
                return Ok(false);
            };
            match parse_gates(&line).and_then(|kinds| Ok(game.submit_gate_selection(id, &kinds)?)) {
                Ok(()) => {}
                Err(e) => println!("{} {:#}", "error:".red().bold(), e),
            }
        }
        Ok(true)
    }

    fn show_bullets(&mut self, game: &mut GameController) -> anyhow::Result<bool> {
        let Some((total, live)) = game.initial_bullet_config() else {
            bail!("no round in progress");
        };
        println!();
        println!(
            "{} {} bullets, {} live: {:?}",
            "Loading chamber:".bold(),
            total,
            live.len().to_string().red().bold(),
            live
        );
        render::print_table(game, PlayerId::One);
        if self.prompt("Press enter to start")?.is_none() {
            return Ok(false);
        }
        game.start_playing_phase()?;
        Ok(true)
    }

    /// Joga uma rodada. Retorna false se o jogador saiu.
    fn play_round(&mut self, game: &mut GameController) -> anyhow::Result<bool> {
        if !self.select_gates(game)? || !self.show_bullets(game)? {
            return Ok(false);
        }

        while !game.is_round_over() && !game.is_game_over() {
            let current = game.current_player();
            render::print_table(game, current);
            let text = format!("{} >", game.player(current).name);
            let Some(line) = self.prompt(&text)? else {
                return Ok(false);
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{} {:#}", "error:".red().bold(), e);
                    continue;
                }
            };

            let outcome = match command {
                TurnCommand::Gate { kind, target, second } => {
                    game.apply_gate(kind, target, second).map(|app| println!("{}", app.to_string().cyan()))
                }
                TurnCommand::Shoot { shoot_self } => game.shoot(shoot_self).map(|shot| render::shot(&shot)),
                TurnCommand::Peek => game.use_peek().map(|gates| {
                    let names: Vec<String> = gates.iter().map(ToString::to_string).collect();
                    println!("Opponent holds: {}", names.join(", ").yellow());
                }),
                TurnCommand::State => {
                    println!("{}", game.game_state().to_json()?);
                    Ok(())
                }
                TurnCommand::Help => {
                    print_help();
                    Ok(())
                }
                TurnCommand::Quit => return Ok(false),
            };
            if let Err(e) = outcome {
                println!("{} {}", "error:".red().bold(), e);
            }
        }
        Ok(true)
    }
}

pub fn run(config: GameConfig) -> anyhow::Result<()> {
    let mut game = GameController::new(config)?;
    let stdin = io::stdin();
    let mut session = Session { input: stdin.lock() };

    println!("{}", "QBR - Quantum Buckshot Roulette".bold());
    print_help();

    while !game.is_game_over() {
        game.start_new_round()?;
        if !session.play_round(&mut game)? {
            println!("{}", "Match abandoned".yellow());
            return Ok(());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gate_command() {
        assert_eq!(
            parse_command("gate cnot 0 3").unwrap(),
            TurnCommand::Gate { kind: GateKind::Cnot, target: 0, second: Some(3) }
        );
        assert_eq!(
            parse_command("g rx 2 5").unwrap(),
            TurnCommand::Gate { kind: GateKind::Rx, target: 2, second: None }
        );
        assert!(parse_command("gate cnot 0").is_err());
        assert!(parse_command("gate foo 1").is_err());
    }

    #[test]
    fn test_parse_turn_commands() {
        assert_eq!(parse_command("shoot self").unwrap(), TurnCommand::Shoot { shoot_self: true });
        assert_eq!(parse_command("s opp").unwrap(), TurnCommand::Shoot { shoot_self: false });
        assert_eq!(parse_command("PEEK").unwrap(), TurnCommand::Peek);
        assert_eq!(parse_command("").unwrap(), TurnCommand::Help);
        assert!(parse_command("shoot").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_parse_gates() {
        assert_eq!(
            parse_gates("x, h  cnot").unwrap(),
            vec![GateKind::X, GateKind::H, GateKind::Cnot]
        );
        assert!(parse_gates("x q").is_err());
    }

    #[test]
    fn test_scripted_session_plays_to_the_end() {
        let config = GameConfig { num_lives: 1, ..GameConfig::default() }.with_seed(9);
        let mut game = GameController::new(config).unwrap();
        game.start_new_round().unwrap();

        let mut script = String::from("x x h\nz z y\n\n");
        script.push_str(&"shoot opp\n".repeat(12));
        let mut session = Session { input: script.as_bytes() };

        assert!(session.play_round(&mut game).unwrap());
        assert!(game.is_round_over() || game.is_game_over());
    }
}
