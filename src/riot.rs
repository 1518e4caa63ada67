use crate::config::RiotConfig;
use crate::error::AppError;
use serde::Deserialize;
use std::thread;
use std::time::Duration;

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

// Match V5 response, trimmed to the draft-relevant fields
#[derive(Debug, Deserialize)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_duration: i64,
    #[serde(default)]
    pub game_version: String,
    #[serde(default)]
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
    pub teams: Vec<TeamDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub champion_id: i32,
    pub champion_name: String,
    pub team_id: i32,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    pub win: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub team_id: i32,
    pub win: bool,
    #[serde(default)]
    pub bans: Vec<BanDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanDto {
    pub champion_id: i32,
}

pub struct RiotApiClient {
    config: RiotConfig,
}

impl RiotApiClient {
    pub fn new(config: RiotConfig) -> Self {
        RiotApiClient { config }
    }

    fn get_regional_routing(&self) -> &str {
        match self.config.region.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
            _ => "europe", // default
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        // Development keys allow 20 req/sec, 100 req/2min. Stay well under.
        thread::sleep(Duration::from_millis(150));

        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            let response = ureq::get(url)
                .set("User-Agent", "draftlab/0.1.0")
                .set("X-Riot-Token", &self.config.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.get_regional_routing(),
            crate::api::endpoints::encode_segment(game_name),
            crate::api::endpoints::encode_segment(tag_line),
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body)
            .map_err(|_| AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line)))
    }

    /// Ranked Solo/Duo match ids (queue 420), most recent first.
    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?queue=420&type=ranked&count={}",
            self.get_regional_routing(),
            puuid,
            count,
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
            self.get_regional_routing(),
            match_id,
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}
