use crate::models::HealthState;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    HydrationHero,
    FitnessFanatic,
    StepMaster,
    SleepChampion,
}

pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: fn(&HealthState) -> bool,
}

pub static ACHIEVEMENTS: [AchievementDef; 4] = [
    AchievementDef {
        id: AchievementId::HydrationHero,
        name: "Hydration Hero",
        description: "7-day water goal streak",
        icon: "fas fa-medal",
        condition: |state| state.water.streak >= 7,
    },
    AchievementDef {
        id: AchievementId::FitnessFanatic,
        name: "Fitness Fanatic",
        description: "30-day exercise streak",
        icon: "fas fa-dumbbell",
        condition: |state| state.exercise.streak >= 30,
    },
    AchievementDef {
        id: AchievementId::StepMaster,
        name: "Step Master",
        description: "Reach daily step goal",
        icon: "fas fa-walking",
        condition: |state| state.steps.daily >= state.steps.goal,
    },
    AchievementDef {
        id: AchievementId::SleepChampion,
        name: "Sleep Champion",
        description: "7-day sleep goal streak",
        icon: "fas fa-bed",
        condition: |state| state.sleep.streak >= 7,
    },
];

impl AchievementId {
    pub fn definition(self) -> &'static AchievementDef {
        match self {
            Self::HydrationHero => &ACHIEVEMENTS[0],
            Self::FitnessFanatic => &ACHIEVEMENTS[1],
            Self::StepMaster => &ACHIEVEMENTS[2],
            Self::SleepChampion => &ACHIEVEMENTS[3],
        }
    }

    pub fn is_satisfied(self, state: &HealthState) -> bool {
        (self.definition().condition)(state)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HydrationHero => "hydration-hero",
            Self::FitnessFanatic => "fitness-fanatic",
            Self::StepMaster => "step-master",
            Self::SleepChampion => "sleep-champion",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAchievement(pub String);

impl fmt::Display for UnknownAchievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown achievement '{}'", self.0)
    }
}

impl FromStr for AchievementId {
    type Err = UnknownAchievement;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ACHIEVEMENTS
            .iter()
            .map(|def| def.id)
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| UnknownAchievement(raw.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementView {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

/// Every achievement in display order with its unlocked flag.
pub fn achievement_views(state: &HealthState) -> Vec<AchievementView> {
    ACHIEVEMENTS
        .iter()
        .map(|def| AchievementView {
            id: def.id,
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked: state.achievements.contains(&def.id),
        })
        .collect()
}
