//! Static catalog of difficulty tiers, editor sections and health fields
//!
//! Everything in here is fixed data: the three tiers in order, which
//! condition rows each tier shows, the order editor sections render in, and
//! the health/mana/chicken threshold fields a config override can carry.

mod health;

pub use health::*;

use crate::error::SequenceError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tiers
// ============================================================================

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Normal,
    Nightmare,
    Hell,
}

/// All tiers, lowest first
pub const TIERS: [Tier; 3] = [Tier::Normal, Tier::Nightmare, Tier::Hell];

impl Tier {
    /// Name used on the wire and by the view layer
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Nightmare => "nightmare",
            Tier::Hell => "hell",
        }
    }

    /// Display title, e.g. for auto-sync hints
    pub const fn title(self) -> &'static str {
        match self {
            Tier::Normal => "Normal",
            Tier::Nightmare => "Nightmare",
            Tier::Hell => "Hell",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tier above this one, if any
    pub const fn above(self) -> Option<Tier> {
        match self {
            Tier::Normal => Some(Tier::Nightmare),
            Tier::Nightmare => Some(Tier::Hell),
            Tier::Hell => None,
        }
    }

    /// Tier below this one, if any
    pub const fn below(self) -> Option<Tier> {
        match self {
            Tier::Normal => None,
            Tier::Nightmare => Some(Tier::Normal),
            Tier::Hell => Some(Tier::Nightmare),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TIERS
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| SequenceError::UnknownTier(s.to_string()))
    }
}

// ============================================================================
// Condition keys and boundaries
// ============================================================================

/// Which gate of a tier a condition entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKey {
    /// Gate for advancing past the tier
    Next,
    /// Gate for staying on the tier
    Stay,
}

impl ConditionKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConditionKey::Next => "nextDifficultyConditions",
            ConditionKey::Stay => "stayDifficultyConditions",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ConditionKey::Next => "Next Difficulty Conditions",
            ConditionKey::Stay => "Stay Difficulty Conditions",
        }
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionKey {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nextDifficultyConditions" => Ok(ConditionKey::Next),
            "stayDifficultyConditions" => Ok(ConditionKey::Stay),
            _ => Err(SequenceError::UnknownConditionKey(s.to_string())),
        }
    }
}

/// Seam between two adjacent tiers.
///
/// The lower tier's `next` condition and the upper tier's `stay` condition
/// describe the same gate and must always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub lower: Tier,
    pub upper: Tier,
}

/// Both boundaries, lowest first
pub const BOUNDARIES: [Boundary; 2] = [
    Boundary {
        lower: Tier::Normal,
        upper: Tier::Nightmare,
    },
    Boundary {
        lower: Tier::Nightmare,
        upper: Tier::Hell,
    },
];

impl Boundary {
    /// Boundary a `(tier, key)` condition sits on.
    ///
    /// `normal.stay` and `hell.next` have no neighbour and return `None`.
    pub fn of(tier: Tier, key: ConditionKey) -> Option<Boundary> {
        match key {
            ConditionKey::Next => tier.above().map(|upper| Boundary { lower: tier, upper }),
            ConditionKey::Stay => tier.below().map(|lower| Boundary { lower, upper: tier }),
        }
    }

    /// Boundaries touching a tier (one for normal and hell, two for nightmare)
    pub fn touching(tier: Tier) -> SmallVec<[Boundary; 2]> {
        BOUNDARIES
            .into_iter()
            .filter(|b| b.lower == tier || b.upper == tier)
            .collect()
    }

    /// The condition on the other side of the boundary from `(tier, key)`
    pub fn mirror(tier: Tier, key: ConditionKey) -> Option<(Tier, ConditionKey)> {
        let boundary = Self::of(tier, key)?;
        Some(match key {
            ConditionKey::Next => (boundary.upper, ConditionKey::Stay),
            ConditionKey::Stay => (boundary.lower, ConditionKey::Next),
        })
    }
}

// ============================================================================
// Condition sections
// ============================================================================

/// One condition row shown for a tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSection {
    pub key: ConditionKey,
    pub title: &'static str,
    /// Hint telling the user which other row mirrors this one
    pub auto_sync_info: Option<String>,
}

/// Condition rows a tier exposes, in display order (stay before next)
pub fn condition_sections(tier: Tier) -> SmallVec<[ConditionSection; 2]> {
    Boundary::touching(tier)
        .into_iter()
        .map(|boundary| {
            let key = if boundary.upper == tier {
                ConditionKey::Stay
            } else {
                ConditionKey::Next
            };
            let auto_sync_info = Boundary::mirror(tier, key).map(|(other, other_key)| {
                format!(
                    "Auto-synced with {}'s {}",
                    other.title(),
                    other_key.title()
                )
            });
            ConditionSection {
                key,
                title: key.title(),
                auto_sync_info,
            }
        })
        .collect()
}

/// Whether the view exposes `(tier, key)` as an editable condition row
pub fn is_condition_editable(tier: Tier, key: ConditionKey) -> bool {
    Boundary::of(tier, key).is_some()
}

// ============================================================================
// Run sections and render pipeline
// ============================================================================

/// Run list of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunSection {
    BeforeQuests,
    Quests,
    AfterQuests,
}

pub const RUN_SECTIONS: [RunSection; 3] = [
    RunSection::BeforeQuests,
    RunSection::Quests,
    RunSection::AfterQuests,
];

impl RunSection {
    pub const fn as_str(self) -> &'static str {
        match self {
            RunSection::BeforeQuests => "beforeQuests",
            RunSection::Quests => "quests",
            RunSection::AfterQuests => "afterQuests",
        }
    }
}

impl fmt::Display for RunSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunSection {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RUN_SECTIONS
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| SequenceError::UnknownRunSection(s.to_string()))
    }
}

/// Editor section kinds, in the order they render for each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Run(RunSection),
    Quest,
    Condition,
    Config,
}

pub const RENDER_PIPELINE: [RenderStage; 5] = [
    RenderStage::Run(RunSection::BeforeQuests),
    RenderStage::Quest,
    RenderStage::Run(RunSection::AfterQuests),
    RenderStage::Condition,
    RenderStage::Config,
];

impl RenderStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            RenderStage::Run(_) => "run",
            RenderStage::Quest => "quest",
            RenderStage::Condition => "condition",
            RenderStage::Config => "config",
        }
    }

    /// Run list backing this stage, if it renders one
    pub const fn run_section(self) -> Option<RunSection> {
        match self {
            RenderStage::Run(section) => Some(section),
            RenderStage::Quest => Some(RunSection::Quests),
            RenderStage::Condition | RenderStage::Config => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_and_names() {
        let names: Vec<_> = TIERS.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["normal", "nightmare", "hell"]);
        assert_eq!("hell".parse::<Tier>().unwrap(), Tier::Hell);
        assert!("Hell".parse::<Tier>().is_err());
    }

    #[test]
    fn test_boundary_mirror() {
        assert_eq!(
            Boundary::mirror(Tier::Normal, ConditionKey::Next),
            Some((Tier::Nightmare, ConditionKey::Stay))
        );
        assert_eq!(
            Boundary::mirror(Tier::Nightmare, ConditionKey::Stay),
            Some((Tier::Normal, ConditionKey::Next))
        );
        assert_eq!(
            Boundary::mirror(Tier::Nightmare, ConditionKey::Next),
            Some((Tier::Hell, ConditionKey::Stay))
        );
        assert_eq!(
            Boundary::mirror(Tier::Hell, ConditionKey::Stay),
            Some((Tier::Nightmare, ConditionKey::Next))
        );
        assert_eq!(Boundary::mirror(Tier::Normal, ConditionKey::Stay), None);
        assert_eq!(Boundary::mirror(Tier::Hell, ConditionKey::Next), None);
    }

    #[test]
    fn test_condition_sections_per_tier() {
        let normal = condition_sections(Tier::Normal);
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].key, ConditionKey::Next);
        assert_eq!(
            normal[0].auto_sync_info.as_deref(),
            Some("Auto-synced with Nightmare's Stay Difficulty Conditions")
        );

        let nightmare = condition_sections(Tier::Nightmare);
        let keys: Vec<_> = nightmare.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![ConditionKey::Stay, ConditionKey::Next]);
        assert_eq!(
            nightmare[1].auto_sync_info.as_deref(),
            Some("Auto-synced with Hell's Stay Difficulty Conditions")
        );

        let hell = condition_sections(Tier::Hell);
        assert_eq!(hell.len(), 1);
        assert_eq!(hell[0].title, "Stay Difficulty Conditions");
        assert_eq!(
            hell[0].auto_sync_info.as_deref(),
            Some("Auto-synced with Nightmare's Next Difficulty Conditions")
        );
    }

    #[test]
    fn test_render_pipeline_order() {
        let kinds: Vec<_> = RENDER_PIPELINE.iter().map(|s| s.as_str()).collect();
        assert_eq!(kinds, vec!["run", "quest", "run", "condition", "config"]);
        assert_eq!(
            RENDER_PIPELINE[0].run_section(),
            Some(RunSection::BeforeQuests)
        );
        assert_eq!(RENDER_PIPELINE[1].run_section(), Some(RunSection::Quests));
        assert_eq!(RENDER_PIPELINE[4].run_section(), None);
    }
}
