// Companion-service URL builders.

/// Percent-encode a path segment. Riot game names routinely contain spaces
/// and tags can carry reserved characters.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

pub fn masteries_lookup_url(base: &str, game_name: &str, tag_line: &str, limit: usize) -> String {
    format!(
        "{}/masteries/lookup/{}/{}?limit={}",
        base,
        encode_segment(game_name),
        encode_segment(tag_line),
        limit
    )
}

pub fn recommend_url(base: &str, riot_id: &str) -> String {
    format!("{}/recommend/{}", base, encode_segment(riot_id))
}

pub fn predict_url(base: &str) -> String {
    format!("{}/draft/predict", base)
}

pub fn auth_url(base: &str, action: &str) -> String {
    format!("{}/auth/{}", base, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_hashes_are_encoded() {
        assert_eq!(encode_segment("KKC Sulfy"), "KKC%20Sulfy");
        assert_eq!(encode_segment("Player#EUW"), "Player%23EUW");
    }

    #[test]
    fn lookup_url_shape() {
        let url = masteries_lookup_url("http://localhost:8000", "KKC Sulfy", "SuS", 20);
        assert_eq!(
            url,
            "http://localhost:8000/masteries/lookup/KKC%20Sulfy/SuS?limit=20"
        );
    }
}
