use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    General,
    Nutrition,
    Exercise,
    Sleep,
    Mental,
}

impl TipCategory {
    pub const ALL: [TipCategory; 5] = [
        TipCategory::General,
        TipCategory::Nutrition,
        TipCategory::Exercise,
        TipCategory::Sleep,
        TipCategory::Mental,
    ];

    /// The categories shown as cards on the tips panel.
    pub const FEATURED: [TipCategory; 4] = [
        TipCategory::Nutrition,
        TipCategory::Exercise,
        TipCategory::Sleep,
        TipCategory::Mental,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Nutrition => "nutrition",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Mental => "mental",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            Self::General => GENERAL,
            Self::Nutrition => NUTRITION,
            Self::Exercise => EXERCISE,
            Self::Sleep => SLEEP,
            Self::Mental => MENTAL,
        }
    }
}

const GENERAL: &[&str] = &[
    "Start your day with a glass of water to boost your metabolism.",
    "Take a 5-minute break every hour to stretch and move around.",
    "Practice deep breathing for 2-3 minutes to reduce stress.",
    "Get some sunlight exposure in the morning to regulate your sleep cycle.",
    "Keep healthy snacks like nuts or fruits within reach.",
    "Stand up and walk while taking phone calls.",
    "Do some light stretching before bedtime to improve sleep quality.",
    "Stay hydrated by keeping a water bottle with you at all times.",
];

const NUTRITION: &[&str] = &[
    "Eat colorful fruits and vegetables to get a variety of nutrients.",
    "Include protein in every meal to maintain stable blood sugar.",
    "Choose whole grains over refined grains for better nutrition.",
    "Limit processed foods and cook more meals at home.",
    "Eat mindfully and chew your food slowly for better digestion.",
];

const EXERCISE: &[&str] = &[
    "Take the stairs instead of the elevator for extra daily movement.",
    "Do bodyweight exercises like push-ups during TV commercial breaks.",
    "Try high-intensity interval training (HIIT) for time-efficient workouts.",
    "Find a physical activity you enjoy to make exercise sustainable.",
    "Start with just 10 minutes of exercise if you're a beginner.",
];

const SLEEP: &[&str] = &[
    "Keep your bedroom cool and dark for better sleep quality.",
    "Avoid screens for at least 1 hour before bedtime.",
    "Create a consistent bedtime routine to signal your body it's time to sleep.",
    "Limit caffeine intake after 2 PM to avoid sleep disruption.",
    "Keep a sleep diary to track patterns and identify issues.",
];

const MENTAL: &[&str] = &[
    "Practice gratitude by writing down 3 things you're thankful for daily.",
    "Meditate for just 5 minutes a day to improve mental clarity.",
    "Connect with friends and family regularly for emotional support.",
    "Set boundaries with work and technology to protect your mental health.",
    "Engage in hobbies that bring you joy and relaxation.",
];

pub fn tip_from<R: Rng + ?Sized>(category: TipCategory, rng: &mut R) -> &'static str {
    category.tips().choose(rng).copied().unwrap_or(GENERAL[0])
}

/// Any tip from any category, each tip equally likely.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> (TipCategory, &'static str) {
    let total: usize = TipCategory::ALL.iter().map(|category| category.tips().len()).sum();
    let mut pick = rng.gen_range(0..total);
    for category in TipCategory::ALL {
        let tips = category.tips();
        if pick < tips.len() {
            return (category, tips[pick]);
        }
        pick -= tips.len();
    }
    (TipCategory::General, GENERAL[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_category_has_tips() {
        for category in TipCategory::ALL {
            assert!(!category.tips().is_empty());
            assert_eq!(TipCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(TipCategory::parse("Sleep"), Some(TipCategory::Sleep));
        assert_eq!(TipCategory::parse("finance"), None);
    }

    #[test]
    fn category_tip_comes_from_that_category() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let tip = tip_from(TipCategory::Mental, &mut rng);
            assert!(MENTAL.contains(&tip));
        }
    }

    #[test]
    fn random_tip_matches_its_category() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (category, tip) = random_tip(&mut rng);
            assert!(category.tips().contains(&tip));
        }
    }
}
