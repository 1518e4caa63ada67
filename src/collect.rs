use crate::display::output::{display_info, display_success, display_warn};
use crate::error::AppError;
use crate::riot::{MatchDto, RiotApiClient};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftParticipant {
    pub champion_id: i32,
    pub champion_name: String,
    pub team_position: String,
    pub win: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftBans {
    pub team_100: Vec<i32>,
    pub team_200: Vec<i32>,
}

/// One collected match, in the shape the model-training pipeline eats.
#[derive(Debug, Serialize, Deserialize)]
pub struct DraftRecord {
    pub match_id: String,
    pub game_version: String,
    pub queue_id: i32,
    pub game_duration: i64,
    pub team_100_win: bool,
    pub team_100_champions: Vec<DraftParticipant>,
    pub team_200_champions: Vec<DraftParticipant>,
    pub bans: DraftBans,
}

/// Pull the draft-relevant fields out of a full match payload.
pub fn extract_draft_record(match_data: &MatchDto) -> DraftRecord {
    let mut team_100 = Vec::new();
    let mut team_200 = Vec::new();

    for participant in &match_data.info.participants {
        let entry = DraftParticipant {
            champion_id: participant.champion_id,
            champion_name: participant.champion_name.clone(),
            team_position: participant.team_position.clone(),
            win: participant.win,
        };
        if participant.team_id == 100 {
            team_100.push(entry);
        } else {
            team_200.push(entry);
        }
    }

    let mut bans = DraftBans {
        team_100: Vec::new(),
        team_200: Vec::new(),
    };
    for team in &match_data.info.teams {
        let ids = team.bans.iter().map(|b| b.champion_id).collect();
        if team.team_id == 100 {
            bans.team_100 = ids;
        } else {
            bans.team_200 = ids;
        }
    }

    let team_100_win = match_data
        .info
        .teams
        .iter()
        .find(|t| t.team_id == 100)
        .map(|t| t.win)
        .unwrap_or(false);

    DraftRecord {
        match_id: match_data.metadata.match_id.clone(),
        game_version: match_data.info.game_version.clone(),
        queue_id: match_data.info.queue_id,
        game_duration: match_data.info.game_duration,
        team_100_win,
        team_100_champions: team_100,
        team_200_champions: team_200,
        bans,
    }
}

/// Collect ranked drafts for a list of players, de-duplicated across shared
/// games, and write them to a JSON file.
pub fn collect_drafts(
    client: &RiotApiClient,
    riot_ids: &[(String, String)],
    games_per_player: usize,
    output: &Path,
) -> Result<usize, AppError> {
    let mut records: Vec<DraftRecord> = Vec::new();
    let mut seen_matches: HashSet<String> = HashSet::new();

    for (game_name, tag_line) in riot_ids {
        display_info(&format!("Fetching games for {}#{}", game_name, tag_line));

        let account = match client.get_account(game_name, tag_line) {
            Ok(account) => account,
            Err(e) => {
                display_warn(&format!("Skipping {}#{}: {}", game_name, tag_line, e));
                continue;
            }
        };

        let match_ids = client.get_match_ids(&account.puuid, games_per_player)?;
        if match_ids.is_empty() {
            display_warn(&format!("No ranked games for {}#{}", game_name, tag_line));
            continue;
        }

        let pb = ProgressBar::new(match_ids.len() as u64);
        pb.set_message("Fetching match details");

        for match_id in &match_ids {
            pb.inc(1);
            if !seen_matches.insert(match_id.clone()) {
                continue;
            }

            match client.get_match(match_id) {
                Ok(match_data) => records.push(extract_draft_record(&match_data)),
                Err(e) => display_warn(&format!("Error fetching {}: {}", match_id, e)),
            }
        }

        pb.finish_with_message("✓ Match data fetched");
    }

    if records.is_empty() {
        return Err(AppError::NoRankedGames);
    }

    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| AppError::JsonError(format!("Failed to serialize drafts: {}", e)))?;
    fs::write(output, json)
        .map_err(|e| AppError::JsonError(format!("Failed to write {}: {}", output.display(), e)))?;

    display_success(&format!(
        "{} drafts collected into {}",
        records.len(),
        output.display()
    ));
    Ok(records.len())
}
