use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};
use log::info;

use quoridor::enums::{Move, PlayerSpec};
use quoridor::game::Quoridor;
use quoridor::players::{play_turn, BotPlayer, GreedyPlayer, WeightedRandomPlayer};

const BOT_NAME: &str = "Robot";
const MAX_AUTO_TURNS: u32 = 1000;

/// Play Quoridor against the built-in opponent
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Display name for the human player
    #[arg(short, long, default_value = "Player 1")]
    name: String,

    /// Decision policy used by the built-in opponent
    #[arg(short, long, value_enum, default_value = "greedy")]
    policy: Policy,

    /// Let the opponent policy play both sides
    #[arg(short, long)]
    auto: bool,

    /// Print the final state as JSON when the match ends
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Greedy,
    Weighted,
}

impl Policy {
    fn build(self) -> Box<dyn BotPlayer> {
        match self {
            Policy::Greedy => Box::new(GreedyPlayer::new()),
            Policy::Weighted => Box::new(WeightedRandomPlayer::new()),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let specs = [
        PlayerSpec::Name(args.name.clone()),
        PlayerSpec::Name(BOT_NAME.to_string()),
    ];
    let mut game = match Quoridor::new(specs, None) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("could not start the match: {err}");
            process::exit(1);
        }
    };
    let policy = args.policy.build();
    info!("starting match with the {} policy", policy.name());

    let winner = if args.auto {
        run_auto(&mut game, policy.as_ref())
    } else {
        run_interactive(&mut game, policy.as_ref())
    };

    match winner {
        Some(name) => println!("\n{game}\n{name} wins the match!"),
        None => println!("match aborted"),
    }

    if args.json {
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("could not serialize the final state: {err}"),
        }
    }
}

fn run_interactive(game: &mut Quoridor, policy: &dyn BotPlayer) -> Option<String> {
    loop {
        if let Some(name) = game.winner() {
            return Some(name.to_string());
        }
        println!("\n{game}");

        match prompt_move() {
            None => return None,
            Some(mv) => {
                if let Err(err) = game.apply(1, mv) {
                    println!("rejected: {err}");
                    continue;
                }
            }
        }
        if let Some(name) = game.winner() {
            return Some(name.to_string());
        }

        match play_turn(game, 2, policy) {
            Ok(mv) => println!("{BOT_NAME} plays {mv}"),
            Err(err) => {
                eprintln!("{BOT_NAME} failed to move: {err}");
                return None;
            }
        }
    }
}

fn run_auto(game: &mut Quoridor, policy: &dyn BotPlayer) -> Option<String> {
    for turn in 0..MAX_AUTO_TURNS {
        if let Some(name) = game.winner() {
            return Some(name.to_string());
        }
        let player = (turn % 2) as u8 + 1;
        match play_turn(game, player, policy) {
            Ok(mv) => println!("turn {}: player {} plays {}", turn + 1, player, mv),
            Err(err) => {
                eprintln!("player {player} failed to move: {err}");
                return None;
            }
        }
    }
    println!("no winner after {MAX_AUTO_TURNS} turns");
    None
}

fn prompt_move() -> Option<Move> {
    loop {
        print!("your move, (D|MH|MV) x y, or q to quit: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return None;
        }
        match line.parse::<Move>() {
            Ok(mv) => return Some(mv),
            Err(err) => println!("{err}"),
        }
    }
}
