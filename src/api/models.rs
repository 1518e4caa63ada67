use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Mastery lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryDto {
    pub champion_id: u32,
    pub champion_name: String,
    pub champion_level: u32,
    pub champion_points: u64,
}

#[derive(Debug, Deserialize)]
pub struct MasteryLookupResponse {
    #[serde(default)]
    pub riot_id: String,
    #[serde(default)]
    pub puuid: String,
    pub masteries: Vec<MasteryDto>,
}

// Recommendation response, grouped by role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDto {
    pub champion: String,
    #[serde(default)]
    pub mastery_level: u32,
    #[serde(default)]
    pub winrate: f64,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub counter_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub riot_id: String,
    #[serde(default)]
    pub mode: String,
    pub recommendations: HashMap<String, Vec<RecommendationDto>>,
    #[serde(default)]
    pub total_masteries: usize,
}

// Draft prediction request/response
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictRequest {
    pub blue_bans: Vec<String>,
    pub red_bans: Vec<String>,
    /// "Champion.position" entries, e.g. "Varus.bot".
    pub blue_picks: Vec<String>,
    pub red_picks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub blue_winrate: f64,
    pub red_winrate: f64,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub confidence: String,
}

// Auth
#[derive(Debug, Serialize)]
pub struct AuthRequest {
    pub riot_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub riot_id: String,
    #[serde(default)]
    pub puuid: Option<String>,
    #[serde(default)]
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mastery_lookup_response_parses() {
        let body = r#"{
            "riot_id": "Player#EUW",
            "puuid": "abc123",
            "masteries": [
                {"champion_id": 103, "champion_name": "Ahri", "champion_level": 7, "champion_points": 245321}
            ]
        }"#;
        let parsed: MasteryLookupResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.masteries.len(), 1);
        assert_eq!(parsed.masteries[0].champion_name, "Ahri");
    }

    #[test]
    fn recommend_response_groups_by_role() {
        let body = r#"{
            "riot_id": "Player#EUW",
            "mode": "counter",
            "recommendations": {
                "mid": [
                    {"champion": "Syndra", "mastery_level": 6, "winrate": 51.2,
                     "tier": "A", "score": 0.81, "reason": "Tier A", "counter_score": 63.0}
                ]
            },
            "total_masteries": 42
        }"#;
        let parsed: RecommendResponse = serde_json::from_str(body).unwrap();
        let mids = &parsed.recommendations["mid"];
        assert_eq!(mids[0].champion, "Syndra");
        assert_eq!(parsed.total_masteries, 42);
    }

    #[test]
    fn predict_request_serializes_pick_positions() {
        let request = PredictRequest {
            blue_bans: vec!["Zed".to_string()],
            red_bans: vec![],
            blue_picks: vec!["Varus.bot".to_string()],
            red_picks: vec!["Yone.mid".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["blue_picks"][0], "Varus.bot");
        assert_eq!(json["red_bans"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn predict_response_tolerates_missing_optionals() {
        let body = r#"{"blue_winrate": 54.2, "red_winrate": 45.8}"#;
        let parsed: PredictResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.model_loaded);
        assert!(parsed.confidence.is_empty());
    }
}
