//! Console front end: seat a table, play it out, print the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use xeno::{Game, GameBuilder, GameConfig, GameOutcome, GameResult, PlayerConfig, TurnRecord};

#[derive(Parser)]
#[command(name = "xeno")]
#[command(about = "Play or simulate a game of Xeno", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed; a random one is picked when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Add an automated seat (repeatable)
    #[arg(long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Add a console seat (repeatable); console seats move first
    #[arg(long = "human", value_name = "NAME")]
    humans: Vec<String>,

    /// Load seats and seed from a JSON table description
    #[arg(long, value_name = "FILE", conflicts_with_all = ["players", "humans"])]
    config: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => {
                let humans = self.humans.iter().map(PlayerConfig::interactive);
                let bots = self.players.iter().map(PlayerConfig::automated);
                let mut players: Vec<PlayerConfig> = humans.chain(bots).collect();
                if players.is_empty() {
                    players = vec![PlayerConfig::automated(""), PlayerConfig::automated("")];
                }
                GameConfig { seed: 0, players }
            }
        };

        // A seed on the command line wins over the file.
        if let Some(seed) = self.seed {
            config.seed = seed;
        } else if self.config.is_none() {
            config.seed = rand::random();
        }
        Ok(config)
    }
}

fn print_table(game: &Game, record: &TurnRecord) {
    let reveal_all = game.players().all(|p| !p.is_interactive());

    println!("-- turn {} --", record.turn);
    match &record.event {
        Some(event) => println!("{}: {}", game.player(record.player).name(), event),
        None => println!("{}: no discard", game.player(record.player).name()),
    }
    println!("   {:?}", record.resolution);

    for player in game.players() {
        let hand = if player.is_dropped() {
            "out".to_string()
        } else if reveal_all || player.is_interactive() {
            player.hand().to_string()
        } else {
            "[?]".repeat(player.hand().count())
        };
        let discards: String = player.discarded().iter().map(ToString::to_string).collect();
        println!("   {:<12} {:<8} discards: {}", player.name(), hand, discards);
    }
    println!("   deck: {} cards", game.deck().count());
}

fn print_outcome(game: &Game, outcome: &GameOutcome) {
    println!("== game over after {} turns ({:?}) ==", outcome.turns, outcome.reason);
    match &outcome.result {
        GameResult::Draw => println!("draw, nobody is left standing"),
        result => {
            for id in result.winners() {
                let player = game.player(id);
                println!("winner: {} holding {}", player.name(), player.hand());
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    tracing::info!("seed {}", config.seed);

    let mut game = GameBuilder::from_config(&config).build()?;
    let outcome = loop {
        if let Some(outcome) = game.conclude() {
            break outcome;
        }
        let record = game.process_turn();
        print_table(&game, &record);
    };
    print_outcome(&game, &outcome);
    Ok(())
}
