/// Play uncontested bidding sessions with a random bidder and report the
/// scores.
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uncontested::{
    Game, GameParams, GameState, Player, Subgame, UncontestedBiddingGame, UncontestedBiddingState,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Simulate uncontested bidding with a random bidder"
)]
struct Args {
    /// Number of sessions to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Starting seed for the session counter and the bidder
    #[arg(long)]
    seed: Option<u64>,

    /// "any" or "2NT"
    #[arg(long)]
    subgame: Option<Subgame>,

    /// Score player 1 against the best reachable contract
    #[arg(long)]
    relative: bool,

    /// YAML file with game parameters; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON line per session
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct SessionReport {
    record: String,
    contract: Option<String>,
    returns: Vec<f64>,
}

fn load_params(args: &Args) -> Result<GameParams, Box<dyn std::error::Error>> {
    let mut params = match &args.config {
        Some(path) => GameParams::from_yaml_file(path)?,
        None => GameParams::default(),
    };
    if let Some(seed) = args.seed {
        params.rng_seed = seed;
    }
    if let Some(subgame) = args.subgame {
        params.subgame = subgame;
    }
    if args.relative {
        params.relative_scoring = true;
    }
    Ok(params)
}

fn play_session(
    game: &UncontestedBiddingGame,
    rng: &mut StdRng,
) -> Result<UncontestedBiddingState, Box<dyn std::error::Error>> {
    let mut state = game.new_initial_state();
    while !state.is_terminal() {
        let legal = state.legal_actions();
        let action = match state.current_player() {
            Player::Chance => state.chance_outcomes()[0].0,
            _ => *legal.choose(rng).ok_or("no legal actions")?,
        };
        state.apply_action(action)?;
    }
    Ok(state)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let params = load_params(&args)?;
    info!(?params, games = args.games, "starting simulation");
    let game = UncontestedBiddingGame::new(&params)?;
    let mut rng = StdRng::seed_from_u64(params.rng_seed);

    let mut totals = [0.0; 2];
    let mut passed_out = 0;
    for _ in 0..args.games {
        let state = play_session(&game, &mut rng)?;
        let returns = state.returns();
        let contract = state.outcome().and_then(|o| o.contract);
        if contract.is_none() {
            passed_out += 1;
        }
        for (total, value) in totals.iter_mut().zip(&returns) {
            *total += value;
        }

        if args.json {
            let report = SessionReport {
                record: game.serialize_state(&state),
                contract: contract.map(|c| c.to_string()),
                returns,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    if !args.json {
        let n = args.games.max(1) as f64;
        println!("Sessions:   {}", args.games);
        println!("Subgame:    {}", params.subgame);
        println!("Passed out: {}", passed_out);
        println!("Mean score: {:.1}", totals[0] / n);
        if params.relative_scoring {
            println!("Mean relative score: {:.1}", totals[1] / n);
        }
    }
    Ok(())
}
