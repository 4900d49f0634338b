use chrono::{DateTime, Utc};
use rand::Rng;

use crate::content::{BondPattern, BOND_PATTERNS};

pub const NAME_MAX_LEN: usize = 20;

/// A content randomizer, not a scoring algorithm: everything except
/// the names comes verbatim from the chosen pattern row.
#[derive(Debug, Clone)]
pub struct BondRoastResult {
    pub id: i64,
    pub name1: String,
    pub name2: String,
    pub archetype1: &'static str,
    pub archetype2: &'static str,
    pub roast: &'static str,
    pub compatibility: u8,
}

impl BondRoastResult {
    /// Display band for the percentage. Same thresholds the app has
    /// always shown.
    pub fn verdict(&self) -> &'static str {
        match self.compatibility {
            0..=29 => "💀 Toxic territory",
            30..=49 => "⚠️ Proceed with caution",
            50..=69 => "✨ Potential exists",
            _ => "🔥 Strong connection",
        }
    }
}

fn clean_name(raw: &str, placeholder: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.chars().take(NAME_MAX_LEN).collect()
    }
}

/// Pick one row uniformly, optionally swap which archetype attaches to
/// which name. Blank names fall back to "You" and "Them".
pub fn roast_bond<R: Rng>(
    rng: &mut R,
    name1: &str,
    name2: &str,
    now: DateTime<Utc>,
) -> BondRoastResult {
    let pattern: &BondPattern = &BOND_PATTERNS[rng.gen_range(0..BOND_PATTERNS.len())];
    let swap = rng.gen_bool(0.5);

    let (archetype1, archetype2) = if swap {
        (pattern.them, pattern.you)
    } else {
        (pattern.you, pattern.them)
    };

    BondRoastResult {
        id: now.timestamp_millis(),
        name1: clean_name(name1, "You"),
        name2: clean_name(name2, "Them"),
        archetype1,
        archetype2,
        roast: pattern.roast,
        compatibility: pattern.compatibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_blank_names_use_placeholders() {
        let mut rng = StdRng::seed_from_u64(4);
        let result = roast_bond(&mut rng, "", "Sam", Utc::now());
        assert_eq!(result.name1, "You");
        assert_eq!(result.name2, "Sam");
    }

    #[test]
    fn test_names_are_trimmed_and_capped() {
        let mut rng = StdRng::seed_from_u64(4);
        let long = "a".repeat(40);
        let result = roast_bond(&mut rng, "  Alex  ", &long, Utc::now());
        assert_eq!(result.name1, "Alex");
        assert_eq!(result.name2.chars().count(), NAME_MAX_LEN);
    }

    #[test]
    fn test_result_matches_a_single_table_row() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let result = roast_bond(&mut rng, "A", "B", Utc::now());
            let row = BOND_PATTERNS
                .iter()
                .find(|p| p.roast == result.roast)
                .expect("roast text not from the table");
            assert_eq!(result.compatibility, row.compatibility);
            // The archetype pair is the row's pair, possibly swapped.
            let pair = (result.archetype1, result.archetype2);
            assert!(pair == (row.you, row.them) || pair == (row.them, row.you));
        }
    }

    #[test]
    fn test_compatibility_is_never_synthesized_from_names() {
        let table: Vec<u8> = BOND_PATTERNS.iter().map(|p| p.compatibility).collect();
        let mut rng = StdRng::seed_from_u64(123);
        for name in ["x", "a very long name indeed", "诶", ""] {
            let result = roast_bond(&mut rng, name, name, Utc::now());
            assert!(table.contains(&result.compatibility));
        }
    }

    #[test]
    fn test_verdict_bands() {
        let mut result = {
            let mut rng = StdRng::seed_from_u64(0);
            roast_bond(&mut rng, "", "", Utc::now())
        };
        result.compatibility = 19;
        assert_eq!(result.verdict(), "💀 Toxic territory");
        result.compatibility = 45;
        assert_eq!(result.verdict(), "⚠️ Proceed with caution");
        result.compatibility = 67;
        assert_eq!(result.verdict(), "✨ Potential exists");
        result.compatibility = 80;
        assert_eq!(result.verdict(), "🔥 Strong connection");
    }
}
