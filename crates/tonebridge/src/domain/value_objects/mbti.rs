//! Mbti - Myers-Briggs personality code
//!
//! Four independent binary dimensions. The canonical form is the four
//! symbols in dimension order, e.g. `ESTJ`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::DomainError;

/// Energy orientation (E/I)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Energy {
    Extraversion,
    Introversion,
}

/// Information style (S/N)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Information {
    Sensing,
    Intuition,
}

/// Decision style (T/F)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Thinking,
    Feeling,
}

/// Lifestyle / structure style (J/P)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifestyle {
    Judging,
    Perceiving,
}

impl Energy {
    pub fn symbol(self) -> char {
        match self {
            Energy::Extraversion => 'E',
            Energy::Introversion => 'I',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'E' => Some(Energy::Extraversion),
            'I' => Some(Energy::Introversion),
            _ => None,
        }
    }
}

impl Information {
    pub fn symbol(self) -> char {
        match self {
            Information::Sensing => 'S',
            Information::Intuition => 'N',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'S' => Some(Information::Sensing),
            'N' => Some(Information::Intuition),
            _ => None,
        }
    }
}

impl Decision {
    pub fn symbol(self) -> char {
        match self {
            Decision::Thinking => 'T',
            Decision::Feeling => 'F',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'T' => Some(Decision::Thinking),
            'F' => Some(Decision::Feeling),
            _ => None,
        }
    }
}

impl Lifestyle {
    pub fn symbol(self) -> char {
        match self {
            Lifestyle::Judging => 'J',
            Lifestyle::Perceiving => 'P',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'J' => Some(Lifestyle::Judging),
            'P' => Some(Lifestyle::Perceiving),
            _ => None,
        }
    }
}

/// MBTI personality code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mbti {
    pub energy: Energy,
    pub information: Information,
    pub decision: Decision,
    pub lifestyle: Lifestyle,
}

impl Mbti {
    pub fn new(
        energy: Energy,
        information: Information,
        decision: Decision,
        lifestyle: Lifestyle,
    ) -> Self {
        Self {
            energy,
            information,
            decision,
            lifestyle,
        }
    }

    /// Canonical four-letter code, e.g. "INFP"
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// All sixteen types, in E/I, S/N, T/F, J/P nesting order
    pub fn all() -> Vec<Mbti> {
        let mut types = Vec::with_capacity(16);
        for energy in [Energy::Extraversion, Energy::Introversion] {
            for information in [Information::Sensing, Information::Intuition] {
                for decision in [Decision::Thinking, Decision::Feeling] {
                    for lifestyle in [Lifestyle::Judging, Lifestyle::Perceiving] {
                        types.push(Mbti::new(energy, information, decision, lifestyle));
                    }
                }
            }
        }
        types
    }
}

impl std::fmt::Display for Mbti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.energy.symbol(),
            self.information.symbol(),
            self.decision.symbol(),
            self.lifestyle.symbol()
        )
    }
}

impl std::str::FromStr for Mbti {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let letters: Vec<char> = normalized.chars().collect();

        let &[e, i, d, l] = letters.as_slice() else {
            return Err(DomainError::Validation(format!(
                "MBTI code must have exactly 4 letters: '{}'",
                s
            )));
        };

        let invalid = |position: &str, c: char| {
            DomainError::Validation(format!(
                "Invalid {} letter '{}' in MBTI code '{}'",
                position, c, s
            ))
        };

        Ok(Mbti {
            energy: Energy::from_symbol(e).ok_or_else(|| invalid("energy (E/I)", e))?,
            information: Information::from_symbol(i)
                .ok_or_else(|| invalid("information (S/N)", i))?,
            decision: Decision::from_symbol(d).ok_or_else(|| invalid("decision (T/F)", d))?,
            lifestyle: Lifestyle::from_symbol(l).ok_or_else(|| invalid("lifestyle (J/P)", l))?,
        })
    }
}

impl Serialize for Mbti {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Mbti {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_code() {
        let mbti: Mbti = "ESTJ".parse().unwrap();
        assert_eq!(mbti.energy, Energy::Extraversion);
        assert_eq!(mbti.information, Information::Sensing);
        assert_eq!(mbti.decision, Decision::Thinking);
        assert_eq!(mbti.lifestyle, Lifestyle::Judging);
        assert_eq!(mbti.code(), "ESTJ");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let mbti: Mbti = "  infp\n".parse().unwrap();
        assert_eq!(mbti.to_string(), "INFP");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            "INF".parse::<Mbti>(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            "INFPX".parse::<Mbti>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_rejects_letter_in_wrong_position() {
        let err = "NIFP".parse::<Mbti>().unwrap_err();
        assert!(err.to_string().contains("energy"));
    }

    #[test]
    fn test_all_types_are_distinct() {
        let all = Mbti::all();
        assert_eq!(all.len(), 16);
        let codes: std::collections::HashSet<String> = all.iter().map(Mbti::code).collect();
        assert_eq!(codes.len(), 16);
        assert!(codes.contains("ENFJ"));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let mbti: Mbti = "ENTP".parse().unwrap();
        let json = serde_json::to_string(&mbti).unwrap();
        assert_eq!(json, "\"ENTP\"");

        let back: Mbti = serde_json::from_str("\"entp\"").unwrap();
        assert_eq!(back, mbti);
        assert!(serde_json::from_str::<Mbti>("\"EXTP\"").is_err());
    }
}
