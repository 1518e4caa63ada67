use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub type ChampionId = u32;

/// Bundled reference data so the draft simulator works offline.
const BUILTIN_CATALOGUE: &str = include_str!("../assets/champions.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    /// Short position code used by the prediction service ("Champion.position").
    pub fn position_code(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jng",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "sup",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub image_ref: String,
    /// Small integer ranking, lower is stronger. Drives the counter heuristic.
    pub tier: u8,
    pub base_win_rate: f64,
}

/// Immutable champion reference data, loaded once per session.
pub struct Catalogue {
    champions: Vec<Champion>,
    by_id: HashMap<ChampionId, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalogue {
    fn from_champions(champions: Vec<Champion>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for (idx, champion) in champions.iter().enumerate() {
            by_id.insert(champion.id, idx);
            by_name.insert(champion.name.to_lowercase(), idx);
        }
        Catalogue {
            champions,
            by_id,
            by_name,
        }
    }

    pub fn builtin() -> Self {
        // The bundled asset is validated by tests, parsing cannot fail at runtime.
        let champions: Vec<Champion> =
            serde_json::from_str(BUILTIN_CATALOGUE).unwrap_or_default();
        Self::from_champions(champions)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read catalogue {}: {}", path.display(), e))
        })?;
        let champions: Vec<Champion> = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse catalogue: {}", e)))?;
        Ok(Self::from_champions(champions))
    }

    pub fn get(&self, id: ChampionId) -> Option<&Champion> {
        self.by_id.get(&id).map(|&idx| &self.champions[idx])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Champion> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.champions[idx])
    }

    pub fn all(&self) -> &[Champion] {
        &self.champions
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}
