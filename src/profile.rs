//! DISC 4Colors behavioral profiles.
//!
//! The four profiles drive everything downstream: classification, retrieval
//! scoping, and the tone of generated responses. Persisted records and
//! prompts use the French labels (`rouge`, `jaune`, `vert`, `bleu`) that the
//! knowledge base is tagged with.

use serde::{Deserialize, Serialize};

/// One of the four DISC 4Colors behavioral profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    #[serde(rename = "rouge")]
    Red,
    #[serde(rename = "jaune")]
    Yellow,
    #[serde(rename = "vert")]
    Green,
    #[serde(rename = "bleu")]
    Blue,
}

impl Profile {
    /// Canonical enumeration order. Ties in classification are broken by the
    /// first profile encountered in this order, so a transcript with no
    /// keyword match always resolves to `Red`.
    pub const ALL: [Profile; 4] = [Profile::Red, Profile::Yellow, Profile::Green, Profile::Blue];

    /// Index of this profile in the canonical order.
    pub fn index(self) -> usize {
        match self {
            Profile::Red => 0,
            Profile::Yellow => 1,
            Profile::Green => 2,
            Profile::Blue => 3,
        }
    }

    /// French label used in persisted records and prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Red => "rouge",
            Profile::Yellow => "jaune",
            Profile::Green => "vert",
            Profile::Blue => "bleu",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rouge" | "red" => Ok(Profile::Red),
            "jaune" | "yellow" => Ok(Profile::Yellow),
            "vert" | "green" => Ok(Profile::Green),
            "bleu" | "blue" => Ok(Profile::Blue),
            _ => Err(format!("Unknown profile: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        for (i, p) in Profile::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
        assert_eq!(Profile::ALL[0], Profile::Red);
    }

    #[test]
    fn test_parse_accepts_both_languages() {
        assert_eq!("vert".parse::<Profile>().unwrap(), Profile::Green);
        assert_eq!("Blue".parse::<Profile>().unwrap(), Profile::Blue);
        assert!("violet".parse::<Profile>().is_err());
    }

    #[test]
    fn test_serde_uses_french_labels() {
        let json = serde_json::to_string(&Profile::Yellow).unwrap();
        assert_eq!(json, "\"jaune\"");
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Profile::Yellow);
    }
}
