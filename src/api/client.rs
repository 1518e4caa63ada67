use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::DefaultClock};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;

/// Blocking client for the companion service (masteries, recommendations,
/// draft predictions, auth).
pub struct ServiceClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl ServiceClient {
    pub fn new(config: Config) -> Self {
        // 10 requests per second towards our own service
        let rate_limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::new(10).unwrap()));
        ServiceClient {
            config,
            rate_limiter,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.service_url
    }

    fn wait_for_slot(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }

    fn execute_get(&self, url: &str, query: &[(&str, String)]) -> Result<String, AppError> {
        self.wait_for_slot();

        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            let mut request = ureq::get(url).set("User-Agent", "draftlab/0.1.0");
            for (key, value) in query {
                request = request.query(key, value);
            }

            match request.call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 1000 * (retry_count + 1) as u64;
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let detail = resp.into_string().unwrap_or_default();
                    return Err(AppError::ServiceError(format!("{}: {}", code, detail)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn execute_post<T: serde::Serialize>(&self, url: &str, body: &T) -> Result<String, AppError> {
        self.wait_for_slot();

        match ureq::post(url)
            .set("User-Agent", "draftlab/0.1.0")
            .send_json(body)
        {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| AppError::HttpError(e.to_string())),
            Err(ureq::Error::Status(429, _)) => Err(AppError::RateLimited),
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                Err(AppError::ServiceError(format!("{}: {}", code, detail)))
            }
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }

    pub fn lookup_masteries(
        &self,
        game_name: &str,
        tag_line: &str,
        limit: usize,
    ) -> Result<MasteryLookupResponse, AppError> {
        let url = endpoints::masteries_lookup_url(self.base_url(), game_name, tag_line, limit);
        let body = self.execute_get(&url, &[])?;
        serde_json::from_str(&body)
            .map_err(|_| AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line)))
    }

    pub fn recommend(
        &self,
        riot_id: &str,
        query: &RecommendQuery,
    ) -> Result<RecommendResponse, AppError> {
        let url = endpoints::recommend_url(self.base_url(), riot_id);
        let body = self.execute_get(&url, &query.as_pairs())?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, AppError> {
        let url = endpoints::predict_url(self.base_url());
        let body = self.execute_post(&url, request)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn login(&self, riot_id: &str, password: &str) -> Result<UserResponse, AppError> {
        self.auth("login", riot_id, password)
    }

    pub fn register(&self, riot_id: &str, password: &str) -> Result<UserResponse, AppError> {
        self.auth("register", riot_id, password)
    }

    fn auth(&self, action: &str, riot_id: &str, password: &str) -> Result<UserResponse, AppError> {
        let url = endpoints::auth_url(self.base_url(), action);
        let request = AuthRequest {
            riot_id: riot_id.to_string(),
            password: password.to_string(),
        };
        let body = self.execute_post(&url, &request)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}

/// Query parameters for `GET /recommend/{riot_id}`.
#[derive(Debug, Clone, Default)]
pub struct RecommendQuery {
    pub role: Option<String>,
    pub top_n: usize,
    pub min_pickrate: f64,
    pub mode: String,
    pub enemy_champions: Vec<String>,
    pub ally_champions: Vec<String>,
    pub banned_champions: Vec<String>,
}

impl RecommendQuery {
    fn as_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("top_n", self.top_n.to_string()),
            ("min_pickrate", self.min_pickrate.to_string()),
            ("mode", self.mode.clone()),
        ];
        if let Some(role) = &self.role {
            pairs.push(("role", role.clone()));
        }
        if !self.enemy_champions.is_empty() {
            pairs.push(("enemy_champions", self.enemy_champions.join(",")));
        }
        if !self.ally_champions.is_empty() {
            pairs.push(("ally_champions", self.ally_champions.join(",")));
        }
        if !self.banned_champions.is_empty() {
            pairs.push(("banned_champions", self.banned_champions.join(",")));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_query_omits_empty_lists() {
        let query = RecommendQuery {
            role: Some("mid".to_string()),
            top_n: 5,
            min_pickrate: 1.0,
            mode: "counter".to_string(),
            enemy_champions: vec!["Yone".to_string(), "Jinx".to_string()],
            ally_champions: Vec::new(),
            banned_champions: Vec::new(),
        };

        let pairs = query.as_pairs();
        assert!(pairs.iter().any(|(k, v)| *k == "enemy_champions" && v == "Yone,Jinx"));
        assert!(!pairs.iter().any(|(k, _)| *k == "ally_champions"));
        assert!(pairs.iter().any(|(k, v)| *k == "role" && v == "mid"));
    }
}
