//! Weighted keyword lexicons for profile classification.
//!
//! Each profile carries an ordered list of (term, weight) pairs. The lexicon
//! is static configuration data: loaded once at startup and never mutated.

use crate::profile::Profile;
use serde::{Deserialize, Serialize};

/// A single weighted keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconTerm {
    /// Keyword matched as a lowercase substring of the transcript.
    pub term: String,
    /// Positive weight added per occurrence.
    pub weight: u32,
}

impl LexiconTerm {
    pub fn new(term: &str, weight: u32) -> Self {
        Self {
            term: term.to_string(),
            weight,
        }
    }
}

/// Per-profile weighted keyword table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    rouge: Vec<LexiconTerm>,
    jaune: Vec<LexiconTerm>,
    vert: Vec<LexiconTerm>,
    bleu: Vec<LexiconTerm>,
}

impl Lexicon {
    /// Terms for a given profile, in configured order.
    pub fn terms(&self, profile: Profile) -> &[LexiconTerm] {
        match profile {
            Profile::Red => &self.rouge,
            Profile::Yellow => &self.jaune,
            Profile::Green => &self.vert,
            Profile::Blue => &self.bleu,
        }
    }

    /// Build a lexicon from explicit per-profile term lists.
    pub fn new(
        rouge: Vec<LexiconTerm>,
        jaune: Vec<LexiconTerm>,
        vert: Vec<LexiconTerm>,
        bleu: Vec<LexiconTerm>,
    ) -> Self {
        Self {
            rouge,
            jaune,
            vert,
            bleu,
        }
    }
}

impl Default for Lexicon {
    /// French coaching vocabulary of the DISC 4Colors model.
    fn default() -> Self {
        Self {
            rouge: vec![
                LexiconTerm::new("décision", 3),
                LexiconTerm::new("résultat", 2),
                LexiconTerm::new("efficacité", 2),
            ],
            jaune: vec![
                LexiconTerm::new("créativité", 3),
                LexiconTerm::new("inspiration", 2),
                LexiconTerm::new("vision", 2),
            ],
            vert: vec![
                LexiconTerm::new("harmonie", 3),
                LexiconTerm::new("équipe", 2),
                LexiconTerm::new("collaboration", 2),
            ],
            bleu: vec![
                LexiconTerm::new("analyse", 3),
                LexiconTerm::new("méthode", 2),
                LexiconTerm::new("logique", 2),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_covers_all_profiles() {
        let lexicon = Lexicon::default();
        for profile in Profile::ALL {
            assert!(!lexicon.terms(profile).is_empty());
            assert!(lexicon.terms(profile).iter().all(|t| t.weight > 0));
        }
    }

    #[test]
    fn test_lexicon_round_trips_through_toml() {
        let lexicon = Lexicon::default();
        let text = toml::to_string(&lexicon).unwrap();
        let back: Lexicon = toml::from_str(&text).unwrap();
        assert_eq!(back.terms(Profile::Green).len(), 3);
        assert_eq!(back.terms(Profile::Green)[0].term, "harmonie");
    }
}
