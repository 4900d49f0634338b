use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::{self, MoodId, TarotCard, TAROT_CARDS};

/// Which of a card's two texts a reading shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretationVariant {
    /// The confrontational read.
    Roast,
    /// The supportive read.
    Mystic,
}

impl InterpretationVariant {
    pub fn label(&self) -> &'static str {
        match self {
            InterpretationVariant::Roast => "SHADOW ROAST",
            InterpretationVariant::Mystic => "MYSTIC GUIDANCE",
        }
    }
}

/// Color and layout parameters rendered behind a card. Everything here
/// derives from one seed in [0,1); saturation and lightness are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuraVisual {
    pub hue1: f64,
    pub hue2: f64,
    pub hue3: f64,
    pub position: f64,
    pub rotation: f64,
}

pub const AURA_SATURATION: u8 = 70;
pub const AURA_LIGHTNESS: u8 = 50;

impl AuraVisual {
    /// Deterministic derivation: base hue seed*360, rotated by an even
    /// color-wheel split of 120 degrees for the second and third hue.
    pub fn from_seed(seed: f64) -> Self {
        let base = seed * 360.0;
        AuraVisual {
            hue1: base % 360.0,
            hue2: (base + 120.0) % 360.0,
            hue3: (base + 240.0) % 360.0,
            position: seed * 100.0,
            rotation: seed * 360.0,
        }
    }

    pub fn gradients(&self) -> [String; 3] {
        [
            hsl(self.hue1),
            hsl(self.hue2),
            hsl(self.hue3),
        ]
    }
}

fn hsl(hue: f64) -> String {
    format!("hsl({:.0}, {}%, {}%)", hue, AURA_SATURATION, AURA_LIGHTNESS)
}

/// One generated reading. Immutable once created; the profile owns its
/// history of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Creation timestamp in milliseconds, doubles as the unique key.
    pub id: i64,
    /// Name of the drawn card in the static deck.
    pub card: String,
    pub variant: InterpretationVariant,
    pub aura_seed: f64,
    pub aura: AuraVisual,
    pub mood: MoodId,
    pub created_at: DateTime<Utc>,
}

impl Reading {
    pub fn card(&self) -> &'static TarotCard {
        content::card_by_name(&self.card).unwrap_or(&TAROT_CARDS[0])
    }

    pub fn interpretation(&self) -> &'static str {
        let card = self.card();
        match self.variant {
            InterpretationVariant::Roast => card.roast,
            InterpretationVariant::Mystic => card.light,
        }
    }
}

/// Draw a reading: uniform card pick, independent coin flip for the
/// variant, one aura seed for the whole visual. The mood defaults to
/// void when none is selected.
pub fn generate_reading<R: Rng>(
    rng: &mut R,
    mood: Option<MoodId>,
    now: DateTime<Utc>,
) -> Reading {
    let card = &TAROT_CARDS[rng.gen_range(0..TAROT_CARDS.len())];
    let variant = if rng.gen_bool(0.5) {
        InterpretationVariant::Roast
    } else {
        InterpretationVariant::Mystic
    };
    let aura_seed: f64 = rng.gen();

    Reading {
        id: now.timestamp_millis(),
        card: card.name.to_string(),
        variant,
        aura_seed,
        aura: AuraVisual::from_seed(aura_seed),
        mood: mood.unwrap_or(MoodId::Void),
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_aura_hues_are_an_even_wheel_split() {
        for i in 0..1000 {
            let seed = i as f64 / 1000.0;
            let aura = AuraVisual::from_seed(seed);
            assert!((hue_distance(aura.hue1, aura.hue2) - 120.0).abs() < 1.0);
            assert!((hue_distance(aura.hue2, aura.hue3) - 120.0).abs() < 1.0);
            assert!((hue_distance(aura.hue1, aura.hue3) - 120.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_aura_is_deterministic_per_seed() {
        let a = AuraVisual::from_seed(0.42);
        let b = AuraVisual::from_seed(0.42);
        assert_eq!(a.hue1, b.hue1);
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
        assert!((a.position - 42.0).abs() < 1e-9);
        assert!((a.rotation - 151.2).abs() < 1e-9);
    }

    #[test]
    fn test_aura_hues_stay_in_range() {
        for seed in [0.0, 0.33333, 0.5, 0.999999] {
            let aura = AuraVisual::from_seed(seed);
            for hue in [aura.hue1, aura.hue2, aura.hue3] {
                assert!((0.0..360.0).contains(&hue), "hue {} out of range", hue);
            }
        }
    }

    #[test]
    fn test_gradient_format_uses_fixed_saturation_and_lightness() {
        let aura = AuraVisual::from_seed(0.0);
        assert_eq!(aura.gradients()[0], "hsl(0, 70%, 50%)");
        assert_eq!(aura.gradients()[1], "hsl(120, 70%, 50%)");
    }

    #[test]
    fn test_generated_reading_references_a_real_card() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reading = generate_reading(&mut rng, Some(MoodId::Chaos), Utc::now());
            assert!(content::card_by_name(&reading.card).is_some());
            assert_eq!(reading.mood, MoodId::Chaos);
            assert!(!reading.interpretation().is_empty());
        }
    }

    #[test]
    fn test_missing_mood_defaults_to_void() {
        let mut rng = StdRng::seed_from_u64(1);
        let reading = generate_reading(&mut rng, None, Utc::now());
        assert_eq!(reading.mood, MoodId::Void);
    }
}
