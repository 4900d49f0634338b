use serde::{Deserialize, Serialize};

/// Content schema version. Bump when a table row is added, removed or
/// reworded so stored readings can be told apart from future decks.
pub const CONTENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodId {
    Chaos,
    Void,
    Electric,
    Tender,
    Toxic,
    Divine,
}

impl MoodId {
    pub const ALL: [MoodId; 6] = [
        MoodId::Chaos,
        MoodId::Void,
        MoodId::Electric,
        MoodId::Tender,
        MoodId::Toxic,
        MoodId::Divine,
    ];

    pub fn parse(s: &str) -> Option<MoodId> {
        match s {
            "chaos" => Some(MoodId::Chaos),
            "void" => Some(MoodId::Void),
            "electric" => Some(MoodId::Electric),
            "tender" => Some(MoodId::Tender),
            "toxic" => Some(MoodId::Toxic),
            "divine" => Some(MoodId::Divine),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodId::Chaos => "chaos",
            MoodId::Void => "void",
            MoodId::Electric => "electric",
            MoodId::Tender => "tender",
            MoodId::Toxic => "toxic",
            MoodId::Divine => "divine",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mood {
    pub id: MoodId,
    pub label: &'static str,
    pub description: &'static str,
}

pub const MOODS: [Mood; 6] = [
    Mood {
        id: MoodId::Chaos,
        label: "Chaos",
        description: "You're manifesting chaos. We support that.",
    },
    Mood {
        id: MoodId::Void,
        label: "Void",
        description: "Embrace the emptiness. Something waits.",
    },
    Mood {
        id: MoodId::Electric,
        label: "Electric",
        description: "Your energy is charged. Channel it.",
    },
    Mood {
        id: MoodId::Tender,
        label: "Tender",
        description: "Softness is strength. Honor it.",
    },
    Mood {
        id: MoodId::Toxic,
        label: "Toxic",
        description: "Your aura just screamed. Want to know why?",
    },
    Mood {
        id: MoodId::Divine,
        label: "Divine",
        description: "The sacred calls. Answer.",
    },
];

pub fn mood(id: MoodId) -> &'static Mood {
    MOODS.iter().find(|m| m.id == id).unwrap_or(&MOODS[1])
}

/// One tarot card: a name, an archetype and the two interpretation
/// texts a reading picks between.
#[derive(Debug, Clone)]
pub struct TarotCard {
    pub name: &'static str,
    pub archetype: &'static str,
    pub roast: &'static str,
    pub light: &'static str,
}

pub const TAROT_CARDS: [TarotCard; 10] = [
    TarotCard {
        name: "The Fool",
        archetype: "New Beginnings",
        roast: "You're walking off a cliff and calling it 'manifesting'.",
        light: "Trust the unknown. Leap.",
    },
    TarotCard {
        name: "The Tower",
        archetype: "Sudden Change",
        roast: "Your foundation was trash anyway. Let it burn.",
        light: "Liberation through destruction.",
    },
    TarotCard {
        name: "The High Priestess",
        archetype: "Intuition",
        roast: "Stop texting them. You already know the answer.",
        light: "Listen to the silence.",
    },
    TarotCard {
        name: "Death",
        archetype: "Transformation",
        roast: "That version of you is expired. Bury it.",
        light: "Endings are just fertilizer.",
    },
    TarotCard {
        name: "The Devil",
        archetype: "Addiction",
        roast: "You are your own toxicity. Cute chains though.",
        light: "Reclaim your power from desire.",
    },
    TarotCard {
        name: "The Star",
        archetype: "Hope",
        roast: "Stop wishing, start doing, space cadet.",
        light: "Healing is available now.",
    },
    TarotCard {
        name: "The Moon",
        archetype: "Illusion",
        roast: "You're lost in your own delusion. Classic.",
        light: "Trust your intuition over fear.",
    },
    TarotCard {
        name: "The Sun",
        archetype: "Joy",
        roast: "Your optimism is showing. Cringe but valid.",
        light: "Radiate your authentic light.",
    },
    TarotCard {
        name: "The Hermit",
        archetype: "Solitude",
        roast: "You ghost everyone and call it 'self-care'.",
        light: "Wisdom comes from within.",
    },
    TarotCard {
        name: "The Lovers",
        archetype: "Choice",
        roast: "You're choosing chaos again. We see you.",
        light: "Align with your highest values.",
    },
];

pub fn card_by_name(name: &str) -> Option<&'static TarotCard> {
    TAROT_CARDS.iter().find(|c| c.name == name)
}

/// One bond-roast row. The compatibility percentage is a property of
/// the row, never derived from the names fed in.
#[derive(Debug, Clone)]
pub struct BondPattern {
    pub you: &'static str,
    pub them: &'static str,
    pub roast: &'static str,
    pub compatibility: u8,
}

pub const BOND_PATTERNS: [BondPattern; 20] = [
    BondPattern { you: "Ghost", them: "Clinger", roast: "You're already gone, they're already attached. Classic avoidant-anxious dance.", compatibility: 23 },
    BondPattern { you: "Manifestor", them: "Realist", roast: "You believe in vibrations, they believe in math. Both are wrong.", compatibility: 45 },
    BondPattern { you: "Healer", them: "Vampire", roast: "You give energy, they take it. At least someone's winning.", compatibility: 31 },
    BondPattern { you: "Chaos", them: "Chaos", roast: "Two disasters don't make a party. They make a war zone.", compatibility: 67 },
    BondPattern { you: "Flirt", them: "Serious", roast: "You're playing games, they want marriage. Someone's getting hurt.", compatibility: 28 },
    BondPattern { you: "Independent", them: "Clingy", roast: "You need space, they need a hug. Find a middle ground (or don't).", compatibility: 34 },
    BondPattern { you: "Mystic", them: "Skeptic", roast: "You read tarot, they read receipts. This ends in therapy.", compatibility: 42 },
    BondPattern { you: "Empath", them: "Narcissist", roast: "You feel everything, they feel nothing. Perfect match (said no one ever).", compatibility: 19 },
    BondPattern { you: "Wild", them: "Stable", roast: "You're chaos, they're a rock. One of you will break.", compatibility: 51 },
    BondPattern { you: "Healing", them: "Healing", roast: "Two broken people trying to fix each other. Cute but doomed.", compatibility: 38 },
    BondPattern { you: "Alchemist", them: "Planner", roast: "You manifest, they strategize. Both think you're right.", compatibility: 56 },
    BondPattern { you: "Free", them: "Possessive", roast: "You want freedom, they want ownership. Red flag parade.", compatibility: 15 },
    BondPattern { you: "Giver", them: "Taker", roast: "You pour into an empty cup. They never fill back.", compatibility: 22 },
    BondPattern { you: "Dreamer", them: "Achiever", roast: "You dream, they do. One of you will resent the other.", compatibility: 47 },
    BondPattern { you: "Twin Flame", them: "Karmic", roast: "You think it's destiny, it's just trauma. Classic.", compatibility: 29 },
    BondPattern { you: "Light", them: "Shadow", roast: "You're all love and light, they're all darkness. Yin and yang, but toxic.", compatibility: 44 },
    BondPattern { you: "Wanderer", them: "Homebody", roast: "You want to explore, they want to nest. Someone's compromising too much.", compatibility: 48 },
    BondPattern { you: "Fire", them: "Water", roast: "Steam or extinguish? Either way, someone's getting burned or drowned.", compatibility: 53 },
    BondPattern { you: "Evolved", them: "Stuck", roast: "You've done the work, they haven't started. Good luck with that.", compatibility: 37 },
    BondPattern { you: "Boundaries", them: "None", roast: "You say no, they don't listen. Fun.", compatibility: 26 },
];

/// Names for the fabricated sanctuary points of interest. Display
/// only; none of these places exist.
pub const SANCTUARY_SITES: [&str; 8] = [
    "The Veiled Spring",
    "Moonlit Grove",
    "Ashen Obelisk",
    "The Whisper Market",
    "Candle Hollow",
    "Saint Static's Gate",
    "The Inverted Garden",
    "Ninth Circle Cafe",
];

/// Paywall copy shown when the overlay opens. Display only, nothing is
/// ever charged.
pub const PAYWALL_FEATURES: [&str; 3] = [
    "Vedic & Deep Astrology",
    "See Who Manifested You",
    "Unlimited SOS Readings",
];

pub const PAYWALL_PRICE_LINE: &str = "$9.99 / Month";
pub const PAYWALL_TAGLINE: &str = "Planets don't align for free.";
