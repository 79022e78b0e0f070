//! Content niches offered to users.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known content niches.
///
/// Records store the niche as free text; this enum only describes the
/// options a client can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    #[default]
    Mystery,
    Lifehacks,
    Motivational,
    Tech,
    History,
    Science,
    Top10,
    Truecrime,
}

impl Niche {
    /// All niches, in presentation order.
    pub const ALL: [Niche; 8] = [
        Niche::Mystery,
        Niche::Lifehacks,
        Niche::Motivational,
        Niche::Tech,
        Niche::History,
        Niche::Science,
        Niche::Top10,
        Niche::Truecrime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Niche::Mystery => "mystery",
            Niche::Lifehacks => "lifehacks",
            Niche::Motivational => "motivational",
            Niche::Tech => "tech",
            Niche::History => "history",
            Niche::Science => "science",
            Niche::Top10 => "top10",
            Niche::Truecrime => "truecrime",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Niche::Mystery => "Mystery & Facts",
            Niche::Lifehacks => "Life Hacks",
            Niche::Motivational => "Motivational",
            Niche::Tech => "Tech Reviews",
            Niche::History => "History Stories",
            Niche::Science => "Science Facts",
            Niche::Top10 => "Top 10 Lists",
            Niche::Truecrime => "True Crime",
        }
    }

    /// Look up a niche by its value, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Niche> {
        let value = value.trim();
        Niche::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_niches() {
        for niche in Niche::ALL {
            assert_eq!(Niche::parse(niche.as_str()), Some(niche));
        }
        assert_eq!(Niche::parse(" TrueCrime "), Some(Niche::Truecrime));
        assert_eq!(Niche::parse("cooking"), None);
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&Niche::Top10).unwrap();
        assert_eq!(json, "\"top10\"");
    }
}
