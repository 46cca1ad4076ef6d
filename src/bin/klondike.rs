//! Headless Klondike driver.
//!
//! ```text
//! klondike autoplay --seed 7 --draw 3
//! klondike hint --seed 7
//! klondike generate --target 25 --corpus-dir decks/
//! klondike sample --draw 1
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use log::info;

use klondike_engine::{
    auto_play, hints, sample_deal, AutoPlay, Deal, DealStore, DrawMode, EngineConfig, FileCorpus, GameRng, GameState,
    KeyCommand, KlondikeBuilder, PileId,
};

#[derive(Parser, Debug)]
#[command(name = "klondike", about = "Klondike solitaire engine")]
struct Cli {
    /// Cards per stock draw (1 or 3)
    #[arg(short = 'd', long = "draw", default_value_t = 1, value_parser = parse_draw, global = true)]
    draw: usize,

    /// RNG seed; random when omitted
    #[arg(short = 's', long, global = true)]
    seed: Option<u64>,

    /// Directory holding the winning-deal corpus
    #[arg(long, default_value = ".", global = true)]
    corpus_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Auto-play one random deal and report the outcome
    Autoplay,
    /// Print the hint candidates for a fresh deal
    Hint,
    /// Auto-play random deals until enough winning deals are recorded
    Generate {
        /// Winning deals to collect
        #[arg(short = 't', long, default_value_t = 100)]
        target: u32,
    },
    /// Print the layout of a deal sampled from the corpus
    Sample,
}

fn parse_draw(value: &str) -> Result<usize, String> {
    let count: usize = value.parse().map_err(|_| format!("`{}` is not a number", value))?;
    DrawMode::from_count(count)
        .map(DrawMode::count)
        .ok_or_else(|| "draw count must be 1 or 3".to_string())
}

fn print_layout(state: &GameState) {
    for (pile, cards) in state.piles().iter() {
        let tokens: Vec<String> = cards
            .iter()
            .map(|p| if p.is_face_up() { p.card.token() } else { format!("[{}]", p.card.token()) })
            .collect();
        println!("{:>12}: {}", pile.to_string(), tokens.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let draw_mode = DrawMode::from_count(cli.draw).unwrap_or_default();
    let mut config = EngineConfig::default()
        .with_draw_mode(draw_mode)
        .with_corpus_dir(cli.corpus_dir);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

    match cli.command {
        Command::Autoplay => {
            let mut state = GameState::new(Deal::random(&mut rng), draw_mode);
            let steps = auto_play(&mut state);

            let status = state.status();
            println!(
                "{} after {} steps, {} card(s) on foundations",
                if status.won { "Won" } else { "No more moves" },
                steps,
                state.foundation_count()
            );
            println!("{}", state.deal().encoding());
        }
        Command::Hint => {
            let state = GameState::new(Deal::random(&mut rng), draw_mode);
            print_layout(&state);
            for hint in hints(&state) {
                println!("{} from {} to {}", hint.card, hint.from, hint.to);
            }
        }
        Command::Generate { target } => {
            let mut game = KlondikeBuilder::new()
                .config(config.with_corpus_target(target))
                .build();
            game.key(KeyCommand::GenerateCorpus);
            while game.auto() != AutoPlay::Off {
                game.tick();
            }

            let stats = game.stats();
            info!(
                "Recorded {} winning deal(s) in {} game(s)",
                stats.corpus_deals_found, stats.games_played
            );
        }
        Command::Sample => {
            let store = FileCorpus::new(config.corpus_dir.clone());
            let total = store.load(draw_mode)?.len();
            let deal = sample_deal(&store, draw_mode, &mut rng)?;
            let state = GameState::new(deal, draw_mode);

            println!("Sampled one of {} {} deal(s)", total, draw_mode);
            print_layout(&state);
            if let Some(top) = state.piles().top(PileId::Stock) {
                println!("Stock top: {}", top.card);
            }
        }
    }

    Ok(())
}
