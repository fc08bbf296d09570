//! # Deal Scorer
//!
//! Combines margin, demand confidence, inventory volume risk and data
//! reliability into the weighted 0-100 deal quality score, then maps the
//! score and the best margin through the decision table.
//!
//! Subscore weights: margin 0.35, demand confidence 0.25, volume risk
//! 0.25, data reliability 0.15.

use crate::domain::entities::deal_evaluation::DealScore;
use crate::domain::value_objects::decision::DealDecision;

const MARGIN_WEIGHT: f64 = 0.35;
const DEMAND_WEIGHT: f64 = 0.25;
const VOLUME_WEIGHT: f64 = 0.25;
const RELIABILITY_WEIGHT: f64 = 0.15;

/// Inputs to one scoring pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput {
    /// Best sellable channel's margin percentage.
    pub best_margin_percent: f64,
    /// Best channel's demand confidence score, carried through unchanged.
    pub demand_confidence: f64,
    /// Months to sell the full quantity across sellable channels. `None`
    /// means capacity is zero or unknown, treated as more than a year.
    pub months_to_sell: Option<f64>,
    /// Number of channels that produced a usable evaluation.
    pub channels_found: usize,
    /// True when the sourcing reference table knows a cheaper origin.
    pub cheaper_origin_exists: bool,
}

/// Pure deal scorer.
#[derive(Debug, Clone, Default)]
pub struct DealScorer;

impl DealScorer {
    /// Creates a new scorer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the weighted deal score.
    #[must_use]
    pub fn score(&self, input: &ScoreInput) -> DealScore {
        let margin = margin_score(input.best_margin_percent);
        let demand_confidence = input.demand_confidence.clamp(0.0, 100.0);
        let volume_risk = volume_risk_score(input.months_to_sell);
        let data_reliability = reliability_score(input.channels_found);

        let weighted = margin * MARGIN_WEIGHT
            + demand_confidence * DEMAND_WEIGHT
            + volume_risk * VOLUME_WEIGHT
            + data_reliability * RELIABILITY_WEIGHT;
        // Subscores are capped at 100, so the weighted sum fits in u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let overall = weighted.round().clamp(0.0, 100.0) as u8;

        DealScore {
            overall,
            margin,
            demand_confidence,
            volume_risk,
            data_reliability,
        }
    }

    /// Applies the decision table, evaluated top to bottom.
    #[must_use]
    pub fn decide(&self, score: &DealScore, input: &ScoreInput) -> DealDecision {
        let overall = f64::from(score.overall);
        let margin = input.best_margin_percent;

        if overall >= 75.0 && margin >= 25.0 {
            DealDecision::Buy
        } else if (50.0..75.0).contains(&overall) && margin >= 15.0 {
            DealDecision::Renegotiate
        } else if overall >= 50.0 && margin >= 15.0 && input.cheaper_origin_exists {
            DealDecision::SourceElsewhere
        } else {
            DealDecision::Pass
        }
    }
}

/// Piecewise-linear margin subscore.
#[must_use]
pub fn margin_score(margin_percent: f64) -> f64 {
    if margin_percent >= 40.0 {
        100.0
    } else if margin_percent >= 25.0 {
        75.0 + ((margin_percent - 25.0) / 15.0) * 25.0
    } else if margin_percent >= 15.0 {
        50.0 + ((margin_percent - 15.0) / 10.0) * 25.0
    } else if margin_percent >= 0.0 {
        (margin_percent / 15.0) * 50.0
    } else {
        0.0
    }
}

/// Step-function volume risk subscore; higher is safer.
#[must_use]
pub fn volume_risk_score(months_to_sell: Option<f64>) -> f64 {
    let Some(months) = months_to_sell else {
        return 0.0;
    };
    if !months.is_finite() || months > 12.0 {
        0.0
    } else if months <= 1.0 {
        100.0
    } else if months <= 2.0 {
        80.0
    } else if months <= 3.0 {
        60.0
    } else if months <= 6.0 {
        40.0
    } else {
        20.0
    }
}

/// Data reliability subscore: 20 points per channel found, capped at 100.
#[must_use]
pub fn reliability_score(channels_found: usize) -> f64 {
    (channels_found as f64 * 20.0).min(100.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(margin: f64, overallish: f64) -> ScoreInput {
        ScoreInput {
            best_margin_percent: margin,
            demand_confidence: overallish,
            months_to_sell: Some(2.0),
            channels_found: 5,
            cheaper_origin_exists: false,
        }
    }

    mod subscores {
        use super::*;

        #[test]
        fn margin_piecewise_anchors() {
            assert!((margin_score(40.0) - 100.0).abs() < f64::EPSILON);
            assert!((margin_score(50.0) - 100.0).abs() < f64::EPSILON);
            assert!((margin_score(25.0) - 75.0).abs() < f64::EPSILON);
            assert!((margin_score(32.5) - 87.5).abs() < f64::EPSILON);
            assert!((margin_score(15.0) - 50.0).abs() < f64::EPSILON);
            assert!((margin_score(20.0) - 62.5).abs() < f64::EPSILON);
            assert!((margin_score(7.5) - 25.0).abs() < f64::EPSILON);
            assert!((margin_score(0.0)).abs() < f64::EPSILON);
            assert!((margin_score(-10.0)).abs() < f64::EPSILON);
        }

        #[test]
        fn volume_risk_steps() {
            assert!((volume_risk_score(Some(0.5)) - 100.0).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(1.5)) - 80.0).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(2.5)) - 60.0).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(5.0)) - 40.0).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(10.0)) - 20.0).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(14.0))).abs() < f64::EPSILON);
        }

        #[test]
        fn zero_capacity_is_maximum_risk_not_a_crash() {
            assert!((volume_risk_score(None)).abs() < f64::EPSILON);
            assert!((volume_risk_score(Some(f64::INFINITY))).abs() < f64::EPSILON);
        }

        #[test]
        fn reliability_caps_at_five_channels() {
            assert!((reliability_score(0)).abs() < f64::EPSILON);
            assert!((reliability_score(3) - 60.0).abs() < f64::EPSILON);
            assert!((reliability_score(5) - 100.0).abs() < f64::EPSILON);
            assert!((reliability_score(9) - 100.0).abs() < f64::EPSILON);
        }
    }

    mod decisions {
        use super::*;

        #[test]
        fn strong_deal_buys() {
            // Documented example: overall 80, margin 30 -> Buy.
            let scorer = DealScorer::new();
            let input = ScoreInput {
                best_margin_percent: 30.0,
                demand_confidence: 80.0,
                months_to_sell: Some(1.0),
                channels_found: 4,
                cheaper_origin_exists: false,
            };
            let score = scorer.score(&input);
            assert!(score.overall >= 75);
            assert_eq!(scorer.decide(&score, &input), DealDecision::Buy);
        }

        #[test]
        fn middling_deal_renegotiates() {
            // Documented example: overall 55, margin 18 -> Renegotiate.
            let scorer = DealScorer::new();
            let input = ScoreInput {
                best_margin_percent: 18.0,
                demand_confidence: 45.0,
                months_to_sell: Some(4.0),
                channels_found: 3,
                cheaper_origin_exists: true,
            };
            let score = scorer.score(&input);
            assert!((50..75).contains(&score.overall));
            assert_eq!(scorer.decide(&score, &input), DealDecision::Renegotiate);
        }

        #[test]
        fn weak_score_passes_regardless_of_margin() {
            // Documented example: overall 40 -> Pass.
            let scorer = DealScorer::new();
            let input = ScoreInput {
                best_margin_percent: 35.0,
                demand_confidence: 10.0,
                months_to_sell: None,
                channels_found: 1,
                cheaper_origin_exists: true,
            };
            let score = scorer.score(&input);
            assert!(score.overall < 50);
            assert_eq!(scorer.decide(&score, &input), DealDecision::Pass);
        }

        #[test]
        fn source_elsewhere_needs_high_score_and_thin_margin() {
            let scorer = DealScorer::new();
            let input = ScoreInput {
                best_margin_percent: 18.0,
                demand_confidence: 95.0,
                months_to_sell: Some(0.8),
                channels_found: 5,
                cheaper_origin_exists: true,
            };
            let score = scorer.score(&input);
            assert!(score.overall >= 75);
            assert_eq!(scorer.decide(&score, &input), DealDecision::SourceElsewhere);
        }

        #[test]
        fn no_cheaper_origin_falls_through_to_pass() {
            let scorer = DealScorer::new();
            let input = ScoreInput {
                best_margin_percent: 18.0,
                demand_confidence: 95.0,
                months_to_sell: Some(0.8),
                channels_found: 5,
                cheaper_origin_exists: false,
            };
            let score = scorer.score(&input);
            assert!(score.overall >= 75);
            assert_eq!(scorer.decide(&score, &input), DealDecision::Pass);
        }
    }

    proptest! {
        // With demand, risk and reliability fixed, a higher margin never
        // lowers the margin subscore or the overall score.
        #[test]
        fn score_monotone_in_margin(
            margin_a in -20.0f64..60.0,
            bump in 0.0f64..40.0,
        ) {
            let scorer = DealScorer::new();
            let low = scorer.score(&input(margin_a, 50.0));
            let high = scorer.score(&input(margin_a + bump, 50.0));
            prop_assert!(high.margin >= low.margin);
            prop_assert!(high.overall >= low.overall);
        }
    }
}
