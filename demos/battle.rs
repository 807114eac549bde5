//! Pits computer strategies against each other.
//!
//! ```text
//! cargo run --example battle -- --strategies greedy,nop --games 50 --seed 7
//! ```
//!
//! Set `RUST_LOG=rummy500=debug` to watch every move.

use std::collections::BTreeMap;
use std::process::ExitCode;

use rummy500::{ComputerPlayer, Game, GameOptions, play_game, strategy};
use tracing_subscriber::EnvFilter;

struct Args {
    strategies: Vec<String>,
    games: u32,
    seed: u64,
    max_turns: u32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            strategies: vec![String::from("greedy"), String::from("nop")],
            games: 20,
            seed: 1,
            max_turns: 500,
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut argv = std::env::args().skip(1);
    while let Some(flag) = argv.next() {
        let value = argv
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--strategies" => {
                args.strategies = value.split(',').map(str::to_owned).collect();
            }
            "--games" => args.games = value.parse().map_err(|err| format!("--games: {err}"))?,
            "--seed" => args.seed = value.parse().map_err(|err| format!("--seed: {err}"))?,
            "--max-turns" => {
                args.max_turns = value.parse().map_err(|err| format!("--max-turns: {err}"))?;
            }
            _ => return Err(format!("unknown flag {flag}")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: battle [--strategies a,b] [--games N] [--seed S] [--max-turns T]");
            return ExitCode::FAILURE;
        }
    };

    let mut factories = Vec::new();
    for name in &args.strategies {
        let Some(factory) = strategy::by_name(name) else {
            let known: Vec<_> = strategy::registered().iter().map(|f| f.name).collect();
            eprintln!("unknown strategy {name}; known: {}", known.join(", "));
            return ExitCode::FAILURE;
        };
        factories.push(factory);
    }

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0;
    for round in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(round));
        let mut game = Game::new(GameOptions::default(), seed);

        let mut players = Vec::with_capacity(factories.len());
        for (seat, factory) in factories.iter().enumerate() {
            let name = format!("{}#{seat}", factory.name);
            let strategy = (factory.make)(seed.rotate_left(8) ^ seat as u64);
            match ComputerPlayer::join(&mut game, &name, strategy) {
                Ok(player) => players.push(player),
                Err(err) => {
                    eprintln!("join failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }

        if let Err(err) = game.deal() {
            eprintln!("deal failed: {err}");
            return ExitCode::FAILURE;
        }

        match play_game(&mut game, &mut players, args.max_turns) {
            Ok(true) => {}
            Ok(false) => unfinished += 1,
            Err(err) => {
                eprintln!("game {round} failed: {err}");
                return ExitCode::FAILURE;
            }
        }

        let snapshot = game.snapshot();
        if let Some(leader) = snapshot.leader() {
            println!(
                "game {round}: {} leads with {} after {} turns",
                leader.name, leader.score, snapshot.turn
            );
            *wins.entry(leader.name.clone()).or_default() += 1;
        }
    }

    println!();
    for (name, count) in &wins {
        println!("{name:>12}: {count} wins");
    }
    if unfinished > 0 {
        println!("{unfinished} games hit the turn limit");
    }
    ExitCode::SUCCESS
}
