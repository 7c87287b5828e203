//! Risk re-evaluation
//!
//! A risk is rated on two 1–5 scales; its score is probability × impact and
//! its level comes from configurable score thresholds.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Probability and impact of one risk, each in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRating")]
pub struct RiskRating {
    probability: u8,
    impact: u8,
}

#[derive(Deserialize)]
struct RawRating {
    probability: u8,
    impact: u8,
}

impl TryFrom<RawRating> for RiskRating {
    type Error = AuditError;

    fn try_from(raw: RawRating) -> Result<Self, Self::Error> {
        Self::new(raw.probability, raw.impact)
    }
}

impl RiskRating {
    /// Lowest value on either scale
    pub const MIN: u8 = 1;

    /// Highest value on either scale
    pub const MAX: u8 = 5;

    /// Create rating
    ///
    /// # Errors
    /// Returns [`AuditError::InvalidRisk`] if either value is outside `1..=5`
    pub fn new(probability: u8, impact: u8) -> Result<Self, AuditError> {
        for (label, value) in [("probability", probability), ("impact", impact)] {
            if !(Self::MIN..=Self::MAX).contains(&value) {
                return Err(AuditError::InvalidRisk(format!(
                    "{label} {value} outside {}..={}",
                    Self::MIN,
                    Self::MAX
                )));
            }
        }
        Ok(Self {
            probability,
            impact,
        })
    }

    /// Probability on the 1–5 scale
    #[inline]
    #[must_use]
    pub fn probability(self) -> u8 {
        self.probability
    }

    /// Impact on the 1–5 scale
    #[inline]
    #[must_use]
    pub fn impact(self) -> u8 {
        self.impact
    }

    /// Probability × impact, in `1..=25`
    #[inline]
    #[must_use]
    pub fn score(self) -> u8 {
        self.probability * self.impact
    }

    /// Level of this rating under `thresholds`
    #[inline]
    #[must_use]
    pub fn level(self, thresholds: &RiskThresholds) -> RiskLevel {
        thresholds.classify(self.score())
    }
}

/// Risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score up to `low_max`
    Low,
    /// Score up to `medium_max`
    Medium,
    /// Score up to `high_max`
    High,
    /// Anything above `high_max`
    Critical,
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        })
    }
}

/// Inclusive upper score bounds of each level below critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Highest low score
    pub low_max: u8,
    /// Highest medium score
    pub medium_max: u8,
    /// Highest high score
    pub high_max: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 4,
            medium_max: 9,
            high_max: 16,
        }
    }
}

impl RiskThresholds {
    /// Check bounds are strictly increasing and inside `1..=25`
    ///
    /// # Errors
    /// Returns [`AuditError::Config`] describing the first violated bound
    pub fn validate(&self) -> Result<(), AuditError> {
        let max_score = RiskRating::MAX * RiskRating::MAX;
        if self.low_max < 1 {
            return Err(AuditError::Config("risk.low_max must be at least 1".into()));
        }
        if self.medium_max <= self.low_max || self.high_max <= self.medium_max {
            return Err(AuditError::Config(format!(
                "risk thresholds must increase: low_max {} < medium_max {} < high_max {}",
                self.low_max, self.medium_max, self.high_max
            )));
        }
        if self.high_max > max_score {
            return Err(AuditError::Config(format!(
                "risk.high_max {} exceeds maximum score {max_score}",
                self.high_max
            )));
        }
        Ok(())
    }

    /// Level of a raw score
    #[must_use]
    pub fn classify(&self, score: u8) -> RiskLevel {
        if score <= self.low_max {
            RiskLevel::Low
        } else if score <= self.medium_max {
            RiskLevel::Medium
        } else if score <= self.high_max {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// Inherent rating next to the rating after controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReevaluation {
    /// Rating before controls
    pub inherent: RiskRating,
    /// Rating after controls
    pub residual: RiskRating,
}

/// Scores and levels of a [`RiskReevaluation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Inherent score
    pub inherent_score: u8,
    /// Inherent level
    pub inherent_level: RiskLevel,
    /// Residual score
    pub residual_score: u8,
    /// Residual level
    pub residual_level: RiskLevel,
    /// Residual minus inherent score; negative when controls help
    pub score_delta: i16,
}

impl RiskReevaluation {
    /// Pair inherent and residual ratings
    #[inline]
    #[must_use]
    pub fn new(inherent: RiskRating, residual: RiskRating) -> Self {
        Self { inherent, residual }
    }

    /// Residual minus inherent score
    #[inline]
    #[must_use]
    pub fn score_delta(&self) -> i16 {
        i16::from(self.residual.score()) - i16::from(self.inherent.score())
    }

    /// Check if the residual level is lower than the inherent one
    #[must_use]
    pub fn improved(&self, thresholds: &RiskThresholds) -> bool {
        self.residual.level(thresholds) < self.inherent.level(thresholds)
    }

    /// Scores and levels under `thresholds`
    #[must_use]
    pub fn assess(&self, thresholds: &RiskThresholds) -> RiskAssessment {
        RiskAssessment {
            inherent_score: self.inherent.score(),
            inherent_level: self.inherent.level(thresholds),
            residual_score: self.residual.score(),
            residual_level: self.residual.level(thresholds),
            score_delta: self.score_delta(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(p: u8, i: u8) -> RiskRating {
        RiskRating::new(p, i).unwrap()
    }

    #[test]
    fn score_is_probability_times_impact() {
        assert_eq!(rating(3, 4).score(), 12);
        assert_eq!(rating(5, 5).score(), 25);
        assert_eq!(rating(1, 1).score(), 1);
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(matches!(RiskRating::new(0, 3), Err(AuditError::InvalidRisk(_))));
        assert!(matches!(RiskRating::new(3, 6), Err(AuditError::InvalidRisk(_))));
    }

    #[test]
    fn default_levels() {
        let t = RiskThresholds::default();

        assert_eq!(rating(2, 2).level(&t), RiskLevel::Low);
        assert_eq!(rating(3, 3).level(&t), RiskLevel::Medium);
        assert_eq!(rating(4, 4).level(&t), RiskLevel::High);
        assert_eq!(rating(5, 4).level(&t), RiskLevel::Critical);
    }

    #[test]
    fn thresholds_validate() {
        assert!(RiskThresholds::default().validate().is_ok());

        let flat = RiskThresholds {
            low_max: 5,
            medium_max: 5,
            high_max: 10,
        };
        assert!(matches!(flat.validate(), Err(AuditError::Config(_))));

        let too_high = RiskThresholds {
            high_max: 30,
            ..RiskThresholds::default()
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn reevaluation_reports_improvement() {
        let t = RiskThresholds::default();
        let reevaluation = RiskReevaluation::new(rating(5, 4), rating(2, 3));

        assert_eq!(reevaluation.score_delta(), -14);
        assert!(reevaluation.improved(&t));

        let assessment = reevaluation.assess(&t);
        assert_eq!(assessment.inherent_level, RiskLevel::Critical);
        assert_eq!(assessment.residual_level, RiskLevel::Medium);
    }

    #[test]
    fn deserialize_validates() {
        let ok: RiskRating = serde_json::from_str(r#"{"probability": 2, "impact": 5}"#).unwrap();
        assert_eq!(ok.score(), 10);

        assert!(serde_json::from_str::<RiskRating>(r#"{"probability": 9, "impact": 5}"#).is_err());
    }
}
