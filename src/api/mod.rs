pub mod client;
pub mod endpoints;
pub mod models;

/// Split "GameName#TagLine" into its two parts. Returns None when the tag is
/// missing, in which case lookups are simply not attempted.
pub fn parse_riot_id(riot_id: &str) -> Option<(&str, &str)> {
    let (game_name, tag_line) = riot_id.rsplit_once('#')?;
    if game_name.is_empty() || tag_line.is_empty() {
        return None;
    }
    Some((game_name, tag_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_riot_ids() {
        assert_eq!(parse_riot_id("KKC Sulfy#SuS"), Some(("KKC Sulfy", "SuS")));
        // Hash in the game name: split on the last one.
        assert_eq!(parse_riot_id("a#b#EUW"), Some(("a#b", "EUW")));
    }

    #[test]
    fn rejects_ids_without_a_tag() {
        assert_eq!(parse_riot_id("NoTagHere"), None);
        assert_eq!(parse_riot_id("#EUW"), None);
        assert_eq!(parse_riot_id("Name#"), None);
    }
}
