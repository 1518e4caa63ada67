use crate::api::models::{MasteryDto, PredictResponse, RecommendationDto};
use crate::draft::{DraftBoard, Sequencer, Side, StepKind};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "#")]
    slot: String,
    #[tabled(rename = "Blue Ban")]
    blue_ban: String,
    #[tabled(rename = "Blue Pick")]
    blue_pick: String,
    #[tabled(rename = "Red Pick")]
    red_pick: String,
    #[tabled(rename = "Red Ban")]
    red_ban: String,
}

#[derive(Tabled)]
struct MasteryRow {
    rank: String,
    champion: String,
    level: String,
    points: String,
}

#[derive(Tabled)]
struct RecommendationRow {
    rank: String,
    champion: String,
    tier: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    score: String,
    reason: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warn(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn slot_name(board: &DraftBoard, side: Side, kind: StepKind, index: usize) -> String {
    let champion = match kind {
        StepKind::Ban => board.ban_slot(side, index).champion.as_ref(),
        StepKind::Pick => board.roster_slot(side, index).champion.as_ref(),
    };
    champion.map(|c| c.name.clone()).unwrap_or_else(|| "—".to_string())
}

pub fn display_board(board: &DraftBoard, sequencer: &Sequencer) {
    println!("\n{}", "🗺️  DRAFT BOARD".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<BoardRow> = (0..5)
        .map(|i| BoardRow {
            slot: format!("{}", i + 1),
            blue_ban: slot_name(board, Side::Blue, StepKind::Ban, i),
            blue_pick: slot_name(board, Side::Blue, StepKind::Pick, i),
            red_pick: slot_name(board, Side::Red, StepKind::Pick, i),
            red_ban: slot_name(board, Side::Red, StepKind::Ban, i),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    match sequencer.current_step() {
        Some(step) => {
            let phase = match step.kind {
                StepKind::Ban => "ban",
                StepKind::Pick => "pick",
            };
            let side = match step.side {
                Side::Blue => "blue".blue().bold(),
                Side::Red => "red".red().bold(),
            };
            println!(
                "\nStep {}/20: {} {} slot {}",
                sequencer.cursor() + 1,
                side,
                phase,
                step.slot + 1
            );
        }
        None => println!("\n{}", "Draft complete".green().bold()),
    }

    if sequencer.has_manual_target() {
        if let Some(target) = sequencer.target() {
            let kind = match target.kind {
                StepKind::Ban => "ban",
                StepKind::Pick => "pick",
            };
            println!(
                "{} manual target: {} {} slot {}",
                "➤".yellow(),
                target.side,
                kind,
                target.slot + 1
            );
        }
    }
}

pub fn display_win_rates(
    blue: u8,
    red: u8,
    prediction: Option<&PredictResponse>,
    prediction_pending: bool,
) {
    match prediction {
        Some(p) => {
            println!(
                "\n{} {} {:.1}%  {} {:.1}%  ({}, confidence: {})",
                "📈 Model:".bold(),
                "blue".blue().bold(),
                p.blue_winrate,
                "red".red().bold(),
                p.red_winrate,
                if p.model_loaded { "model" } else { "fallback" },
                if p.confidence.is_empty() { "n/a" } else { p.confidence.as_str() },
            );
        }
        None => {
            println!(
                "\n{} {} {}%  {} {}%",
                "📈 Estimate:".bold(),
                "blue".blue().bold(),
                blue,
                "red".red().bold(),
                red
            );
        }
    }
    if prediction_pending {
        println!("   {}", "… model prediction in flight".dimmed());
    }
}

pub fn display_masteries(riot_id: &str, masteries: &[MasteryDto]) {
    println!(
        "\n{}",
        format!("🏆 Masteries for {}", riot_id).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if masteries.is_empty() {
        println!("{}", "No masteries available".yellow());
        return;
    }

    let rows: Vec<MasteryRow> = masteries
        .iter()
        .enumerate()
        .map(|(idx, m)| MasteryRow {
            rank: format!("#{}", idx + 1),
            champion: m.champion_name.clone(),
            level: format!("M{}", m.champion_level),
            points: format!("{}", m.champion_points),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_recommendations(riot_id: &str, role: &str, items: &[RecommendationDto]) {
    println!(
        "\n{}",
        format!("🎯 Recommendations for {} ({})", riot_id, role)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if items.is_empty() {
        println!(
            "{}",
            "No recommendations available (not enough data)".yellow()
        );
        return;
    }

    let rows: Vec<RecommendationRow> = items
        .iter()
        .enumerate()
        .map(|(idx, rec)| RecommendationRow {
            rank: format!("#{}", idx + 1),
            champion: rec.champion.clone(),
            tier: rec.tier.clone(),
            win_rate: format!("{:.1}%", rec.winrate),
            score: format!("{:.2}", rec.score),
            reason: rec.reason.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}
