mod api;
mod catalogue;
mod collect;
mod config;
mod display;
mod draft;
mod error;
mod lookup;
mod riot;
mod session;

use anyhow::Context;
use api::client::{RecommendQuery, ServiceClient};
use api::models::{PredictRequest, PredictResponse};
use api::parse_riot_id;
use catalogue::{Catalogue, Role};
use clap::{Parser, Subcommand};
use config::{Config, RiotConfig};
use display::output::{
    display_board, display_error, display_info, display_masteries, display_recommendations,
    display_success, display_warn, display_win_rates,
};
use draft::evaluator::estimate_win_rate;
use draft::{DraftBoard, Sequencer, Side, StepKind, Target};
use lookup::{LookupDispatcher, LookupOutcome, SlotToken};
use session::StoredSession;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Roles by roster slot index, top to support.
const SLOT_ROLES: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

#[derive(Parser, Debug)]
#[command(name = "draftlab")]
#[command(about = "Draft companion: sequenced pick/ban simulation, win-rate estimates, mastery lookups", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive draft following the competitive pick/ban order
    Draft {
        /// Champion catalogue JSON (defaults to the bundled one)
        #[arg(long)]
        catalogue: Option<PathBuf>,

        /// Ask the prediction service to refine win rates after each commit
        #[arg(long)]
        predict: bool,
    },

    /// Look up a player's champion masteries
    Lookup {
        /// Riot game name
        game_name: String,

        /// Riot tag (tag line)
        tag_line: String,

        /// Number of masteries to display
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Get champion recommendations for a registered player
    Recommend {
        /// Riot ID (GameName#TagLine); defaults to the logged-in player
        riot_id: Option<String>,

        /// Role to recommend for (top, jng, mid, bot, sup)
        #[arg(short, long)]
        role: Option<String>,

        /// Number of recommendations
        #[arg(long, default_value = "5")]
        top_n: usize,

        /// Minimum pick rate in percent
        #[arg(long, default_value = "1.0")]
        min_pickrate: f64,

        /// Recommendation mode: balanced, counter, blind, comfort
        #[arg(long, default_value = "balanced")]
        mode: String,

        /// Enemy champions, comma separated
        #[arg(long, value_delimiter = ',')]
        enemy: Vec<String>,

        /// Ally champions, comma separated
        #[arg(long, value_delimiter = ',')]
        ally: Vec<String>,

        /// Banned champions, comma separated
        #[arg(long, value_delimiter = ',')]
        banned: Vec<String>,
    },

    /// Log in to the companion service and persist the session
    Login {
        /// Riot ID (GameName#TagLine)
        riot_id: String,
    },

    /// Register a new account on the companion service
    Register {
        /// Riot ID (GameName#TagLine)
        riot_id: String,
    },

    /// Forget the persisted session
    Logout,

    /// Collect ranked drafts from the Riot API into a JSON file
    Collect {
        /// Riot IDs to pull match history from (GameName#TagLine)
        riot_ids: Vec<String>,

        /// Games per player
        #[arg(long, default_value = "50")]
        games: usize,

        /// Output file
        #[arg(short, long, default_value = "drafts_data.json")]
        output: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env();

    match args.command {
        Command::Draft { catalogue, predict } => run_draft(config, catalogue, predict),
        Command::Lookup {
            game_name,
            tag_line,
            limit,
        } => run_lookup(config, &game_name, &tag_line, limit),
        Command::Recommend {
            riot_id,
            role,
            top_n,
            min_pickrate,
            mode,
            enemy,
            ally,
            banned,
        } => {
            let query = RecommendQuery {
                role,
                top_n,
                min_pickrate,
                mode,
                enemy_champions: enemy,
                ally_champions: ally,
                banned_champions: banned,
            };
            let Some(riot_id) = session::resolve_riot_id(riot_id, StoredSession::load()) else {
                display_warn("No Riot ID given and no stored session. Run `draftlab login` first");
                return Ok(());
            };
            run_recommend(config, &riot_id, query)
        }
        Command::Login { riot_id } => run_auth(config, &riot_id, false),
        Command::Register { riot_id } => run_auth(config, &riot_id, true),
        Command::Logout => {
            StoredSession::clear();
            display_success("Logged out");
            Ok(())
        }
        Command::Collect {
            riot_ids,
            games,
            output,
        } => run_collect(&riot_ids, games, &output),
    }
}

fn run_lookup(config: Config, game_name: &str, tag_line: &str, limit: usize) -> anyhow::Result<()> {
    if game_name.is_empty() || tag_line.is_empty() {
        display_warn("Invalid Riot ID, lookup not attempted");
        return Ok(());
    }

    let client = ServiceClient::new(config);
    let response = client.lookup_masteries(game_name, tag_line, limit)?;
    display_masteries(&format!("{}#{}", game_name, tag_line), &response.masteries);
    Ok(())
}

fn run_recommend(config: Config, riot_id: &str, query: RecommendQuery) -> anyhow::Result<()> {
    if parse_riot_id(riot_id).is_none() {
        display_warn("Invalid Riot ID, lookup not attempted");
        return Ok(());
    }

    let client = ServiceClient::new(config);
    let response = client.recommend(riot_id, &query)?;

    let mut roles: Vec<&String> = response.recommendations.keys().collect();
    roles.sort();
    for role in roles {
        display_recommendations(riot_id, role, &response.recommendations[role]);
    }
    Ok(())
}

fn run_auth(config: Config, riot_id: &str, register: bool) -> anyhow::Result<()> {
    if parse_riot_id(riot_id).is_none() {
        return Err(error::AppError::InvalidRiotId.into());
    }

    print!("Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end();

    let client = ServiceClient::new(config);
    let user = if register {
        client.register(riot_id, password)?
    } else {
        client.login(riot_id, password)?
    };

    StoredSession::new(user.clone()).save()?;
    display_success(&format!(
        "Logged in as {} (region {})",
        user.riot_id, user.region
    ));
    Ok(())
}

fn run_collect(riot_ids: &[String], games: usize, output: &std::path::Path) -> anyhow::Result<()> {
    let mut players = Vec::new();
    for riot_id in riot_ids {
        match parse_riot_id(riot_id) {
            Some((game_name, tag_line)) => {
                players.push((game_name.to_string(), tag_line.to_string()));
            }
            None => display_warn(&format!("Skipping invalid Riot ID: {}", riot_id)),
        }
    }
    if players.is_empty() {
        display_warn("No valid Riot IDs given");
        return Ok(());
    }

    let riot_config = RiotConfig::from_env()?;
    let client = riot::RiotApiClient::new(riot_config);
    collect::collect_drafts(&client, &players, games, output)?;
    Ok(())
}

struct DraftSession {
    board: DraftBoard,
    sequencer: Sequencer,
    dispatcher: LookupDispatcher,
    predict: bool,
    prediction: Option<PredictResponse>,
    prediction_pending: bool,
}

fn run_draft(config: Config, catalogue_path: Option<PathBuf>, predict: bool) -> anyhow::Result<()> {
    let catalogue = match catalogue_path {
        Some(path) => Catalogue::load(&path)
            .with_context(|| format!("loading catalogue {}", path.display()))?,
        None => Catalogue::builtin(),
    };
    if catalogue.is_empty() {
        anyhow::bail!("champion catalogue is empty");
    }

    let client = Arc::new(ServiceClient::new(config));
    let mut session = DraftSession {
        board: DraftBoard::new(),
        sequencer: Sequencer::new(),
        dispatcher: LookupDispatcher::new(client),
        predict,
        prediction: None,
        prediction_pending: false,
    };

    if let Some(stored) = StoredSession::load() {
        display_info(&format!("Logged in as {}", stored.user.riot_id));
    }
    display_info(&format!(
        "Draft started with {} champions. Type `help` for commands.",
        catalogue.len()
    ));
    display_board(&session.board, &session.sequencer);

    let stdin = io::stdin();
    loop {
        apply_completed_lookups(&mut session);

        print!("\n> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "board" => display_board(&session.board, &session.sequencer),
            "rates" => show_rates(&session),
            "reset" => {
                session.sequencer.reset();
                session.board.reset();
                session.dispatcher.invalidate_predictions();
                session.prediction = None;
                session.prediction_pending = false;
                display_success("Draft reset");
                display_board(&session.board, &session.sequencer);
            }
            "select" => {
                let args: Vec<&str> = parts.collect();
                handle_select(&mut session, &args);
            }
            "player" => {
                let args: Vec<&str> = parts.collect();
                handle_player(&mut session, &args);
            }
            "clear" => {
                let args: Vec<&str> = parts.collect();
                match parse_target(&args) {
                    Some(target) => {
                        session.board.clear(target);
                        after_board_change(&mut session);
                        display_board(&session.board, &session.sequencer);
                    }
                    None => display_warn("Usage: clear <ban|pick> <blue|red> <1-5>"),
                }
            }
            _ => handle_commit(&mut session, &catalogue, line),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <champion>                     commit the champion to the active slot");
    println!("  select <ban|pick> <side> <n>   aim the next commit at a specific slot");
    println!("  clear <ban|pick> <side> <n>    empty a slot");
    println!("  player <side> <n> <Name#TAG>   assign a player and fetch masteries");
    println!("  board | rates | reset | quit");
}

fn parse_side(token: &str) -> Option<Side> {
    match token {
        "blue" | "b" => Some(Side::Blue),
        "red" | "r" => Some(Side::Red),
        _ => None,
    }
}

fn parse_target(args: &[&str]) -> Option<Target> {
    if args.len() != 3 {
        return None;
    }
    let kind = match args[0] {
        "ban" => StepKind::Ban,
        "pick" => StepKind::Pick,
        _ => return None,
    };
    let side = parse_side(args[1])?;
    let slot = args[2].parse::<usize>().ok()?.checked_sub(1)?;
    if slot >= 5 {
        return None;
    }
    Some(Target { kind, side, slot })
}

fn handle_select(session: &mut DraftSession, args: &[&str]) {
    match parse_target(args) {
        Some(target) => {
            session
                .sequencer
                .jump_to(target.kind, target.side, target.slot);
            display_info(&format!(
                "Next commit goes to {} {} slot {}",
                target.side,
                match target.kind {
                    StepKind::Ban => "ban",
                    StepKind::Pick => "pick",
                },
                target.slot + 1
            ));
        }
        None => display_warn("Usage: select <ban|pick> <blue|red> <1-5>"),
    }
}

fn handle_player(session: &mut DraftSession, args: &[&str]) {
    if args.len() < 3 {
        display_warn("Usage: player <blue|red> <1-5> <Name#TAG>");
        return;
    }
    let Some(side) = parse_side(args[0]) else {
        display_warn("Side must be blue or red");
        return;
    };
    let Some(slot) = args[1]
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&n| n < 5)
    else {
        display_warn("Slot must be 1-5");
        return;
    };
    let riot_id = args[2..].join(" ");

    let Some((game_name, tag_line)) = parse_riot_id(&riot_id) else {
        // Missing #tag: validation no-op, the lookup is not attempted.
        display_warn("Invalid Riot ID (missing #tag), lookup not attempted");
        return;
    };

    session.board.set_player_handle(side, slot, &riot_id);
    let token = SlotToken {
        side,
        slot,
        epoch: session.board.slot_epoch(side, slot),
    };
    session
        .dispatcher
        .dispatch_masteries(token, game_name, tag_line, 20);

    let enemies: Vec<String> = session
        .board
        .roster(side.opponent())
        .iter()
        .flatten()
        .map(|c| c.name.clone())
        .collect();
    let allies: Vec<String> = session
        .board
        .roster(side)
        .iter()
        .flatten()
        .map(|c| c.name.clone())
        .collect();
    let banned: Vec<String> = session
        .board
        .bans(Side::Blue)
        .iter()
        .chain(session.board.bans(Side::Red).iter())
        .flatten()
        .map(|c| c.name.clone())
        .collect();

    let query = RecommendQuery {
        role: Some(SLOT_ROLES[slot].position_code().to_string()),
        top_n: 5,
        min_pickrate: 1.0,
        mode: if enemies.is_empty() {
            "balanced".to_string()
        } else {
            "counter".to_string()
        },
        enemy_champions: enemies,
        ally_champions: allies,
        banned_champions: banned,
    };
    session
        .dispatcher
        .dispatch_recommendations(token, &riot_id, query);

    display_info(&format!(
        "Looking up {} for {} slot {}…",
        riot_id,
        side,
        slot + 1
    ));
}

fn handle_commit(session: &mut DraftSession, catalogue: &Catalogue, name: &str) {
    let Some(target) = session.sequencer.target() else {
        display_info("Draft is complete. Use `select` to adjust a slot or `reset` to start over.");
        return;
    };

    let Some(champion) = catalogue.find_by_name(name) else {
        display_warn(&format!("Unknown champion: {}", name));
        return;
    };

    if !session.board.commit(target, champion) {
        // Already picked or banned somewhere: idempotent no-op.
        display_info(&format!("{} is not available", champion.name));
        return;
    }

    if session.sequencer.has_manual_target() {
        session.sequencer.clear_manual_target();
    } else {
        session.sequencer.advance();
    }

    after_board_change(session);
    display_board(&session.board, &session.sequencer);
    show_rates(session);
}

/// Recompute the heuristic and, when enabled, fire a best-effort model
/// prediction for the new board state.
fn after_board_change(session: &mut DraftSession) {
    session.prediction = None;
    if session.predict {
        let request = build_predict_request(&session.board);
        session.dispatcher.dispatch_prediction(request);
        session.prediction_pending = true;
    }
}

fn build_predict_request(board: &DraftBoard) -> PredictRequest {
    let bans = |side: Side| -> Vec<String> {
        board
            .bans(side)
            .iter()
            .flatten()
            .map(|c| c.name.clone())
            .collect()
    };
    let picks = |side: Side| -> Vec<String> {
        board
            .roster(side)
            .iter()
            .flatten()
            .map(|c| format!("{}.{}", c.name, c.role.position_code()))
            .collect()
    };

    PredictRequest {
        blue_bans: bans(Side::Blue),
        red_bans: bans(Side::Red),
        blue_picks: picks(Side::Blue),
        red_picks: picks(Side::Red),
    }
}

fn show_rates(session: &DraftSession) {
    let blue_roster = session.board.roster(Side::Blue);
    let red_roster = session.board.roster(Side::Red);
    let blue = estimate_win_rate(&blue_roster, &red_roster);
    let red = estimate_win_rate(&red_roster, &blue_roster);
    display_win_rates(
        blue,
        red,
        session.prediction.as_ref(),
        session.prediction_pending,
    );
}

fn apply_completed_lookups(session: &mut DraftSession) {
    for outcome in session.dispatcher.drain() {
        match outcome {
            LookupOutcome::Masteries { token, masteries } => {
                let applied = session.board.apply_masteries(
                    token.side,
                    token.slot,
                    token.epoch,
                    masteries,
                );
                if applied {
                    let slot = session.board.roster_slot(token.side, token.slot);
                    if !slot.masteries.is_empty() {
                        display_masteries(&slot.player_handle, &slot.masteries);
                    }
                }
            }
            LookupOutcome::Recommendations { token, items } => {
                let applied = session.board.apply_recommendations(
                    token.side,
                    token.slot,
                    token.epoch,
                    items,
                );
                if applied {
                    let slot = session.board.roster_slot(token.side, token.slot);
                    if !slot.recommendations.is_empty() {
                        display_recommendations(
                            &slot.player_handle,
                            SLOT_ROLES[token.slot].position_code(),
                            &slot.recommendations,
                        );
                    }
                }
            }
            LookupOutcome::Prediction { seq, response } => {
                if session.dispatcher.is_current_prediction(seq) {
                    session.prediction_pending = false;
                    // On failure the heuristic stays authoritative.
                    session.prediction = response;
                }
            }
        }
    }
}
