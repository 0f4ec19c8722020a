//! Insight generation
//!
//! Derives human-readable observations and recommendations from a score
//! snapshot. Two insights are unconditional (peak productivity and the
//! sweet-spot work range); the correlation-based ones only appear when their
//! signal is strong enough, and a weak or undefined correlation produces no
//! insight at all rather than a neutral filler.

use tracing::debug;

use crate::stats::{mean, median, pearson, quantile};
use crate::types::{Insight, InsightTopic, JoinedRecord, ScoreResult, WorkloadBand};

/// Threshold for a correlation to count as a work-wellbeing link
const CORRELATION_LINK_THRESHOLD: f64 = 0.3;
/// Threshold for the sleep/mood correlation to qualify as sleep impact
const SLEEP_IMPACT_THRESHOLD: f64 = 0.4;
/// High-mood cutoff for the sweet-spot rule
const HIGH_MOOD_CUTOFF: f64 = 7.0;

/// Insight generator over a read-only score snapshot
pub struct InsightGenerator;

impl InsightGenerator {
    /// Generate insights; always at least two.
    pub fn generate(result: &ScoreResult) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(insight) = peak_productivity(&result.days) {
            insights.push(insight);
        }
        if let Some(insight) = work_wellbeing_link(result.correlation) {
            insights.push(insight);
        }
        if let Some(insight) = sleep_impact(&result.days) {
            insights.push(insight);
        }
        insights.push(sweet_spot(&result.days));

        debug!(count = insights.len(), "insights generated");
        insights
    }
}

/// Mean mood per work-hour band; reports the band with the highest mean.
/// Empty bands are excluded from the comparison.
fn peak_productivity(days: &[JoinedRecord]) -> Option<Insight> {
    let bands = [WorkloadBand::Low, WorkloadBand::Optimal, WorkloadBand::High];

    let mut best: Option<(WorkloadBand, f64)> = None;
    for band in bands {
        let moods: Vec<f64> = days
            .iter()
            .filter(|r| WorkloadBand::classify(r.work_hours) == band)
            .map(|r| r.mood_score)
            .collect();
        if let Some(band_mean) = mean(&moods) {
            // First band wins ties
            if best.map_or(true, |(_, m)| band_mean > m) {
                best = Some((band, band_mean));
            }
        }
    }

    let (band, band_mean) = best?;
    Some(Insight {
        topic: InsightTopic::Machine,
        icon: "📈".to_string(),
        title: "Peak Productivity Pattern".to_string(),
        description: format!(
            "Your mood is highest during {} work hour days (avg mood: {:.1})",
            band.as_str(),
            band_mean
        ),
        recommendation: "Structure your week to maintain optimal work duration. \
                         Quality over quantity leads to better outcomes."
            .to_string(),
    })
}

/// Strong positive or negative work/mood correlation. `None` correlation
/// means no signal, so no insight.
fn work_wellbeing_link(correlation: Option<f64>) -> Option<Insight> {
    let correlation = correlation?;

    if correlation < -CORRELATION_LINK_THRESHOLD {
        Some(Insight {
            topic: InsightTopic::Human,
            icon: "💔".to_string(),
            title: "Negative Work-Wellbeing Link".to_string(),
            description: format!(
                "Strong negative correlation detected ({correlation}). \
                 More work hours consistently lower your mood."
            ),
            recommendation: "Implement strict work boundaries. Consider delegating \
                             tasks or requesting workload adjustment."
                .to_string(),
        })
    } else if correlation > CORRELATION_LINK_THRESHOLD {
        Some(Insight {
            topic: InsightTopic::Balance,
            icon: "💚".to_string(),
            title: "Positive Work-Wellbeing Link".to_string(),
            description: format!(
                "Positive correlation detected ({correlation}). \
                 Your work energizes you when properly balanced."
            ),
            recommendation: "You thrive on productivity! Maintain current balance \
                             and protect against future overwork."
                .to_string(),
        })
    } else {
        None
    }
}

/// Sleep/mood correlation above the impact threshold recommends sleeping at
/// or above the 75th percentile of observed sleep hours.
fn sleep_impact(days: &[JoinedRecord]) -> Option<Insight> {
    let sleep: Vec<f64> = days.iter().map(|r| r.sleep_hours).collect();
    let moods: Vec<f64> = days.iter().map(|r| r.mood_score).collect();

    let correlation = pearson(&sleep, &moods)?;
    if correlation <= SLEEP_IMPACT_THRESHOLD {
        return None;
    }

    let target = quantile(&sleep, 0.75)?;
    Some(Insight {
        topic: InsightTopic::Human,
        icon: "😴".to_string(),
        title: "Sleep is Your Superpower".to_string(),
        description: format!("Strong link between sleep and mood (correlation: {correlation:.2})"),
        recommendation: format!("Prioritize {target:.1}+ hours of sleep for optimal wellbeing."),
    })
}

/// Median work hours over high-mood days, plus how often the whole period
/// stayed within an hour of it. An undefined median (no high-mood days) is
/// stated outright, never replaced with a number.
fn sweet_spot(days: &[JoinedRecord]) -> Insight {
    let high_mood_hours: Vec<f64> = days
        .iter()
        .filter(|r| r.mood_score >= HIGH_MOOD_CUTOFF)
        .map(|r| r.work_hours)
        .collect();

    match median(&high_mood_hours) {
        Some(sweet_spot_hours) => {
            let adherent = days
                .iter()
                .filter(|r| (r.work_hours - sweet_spot_hours).abs() < 1.0)
                .count();
            let adherence_pct = adherent as f64 / days.len() as f64 * 100.0;

            Insight {
                topic: InsightTopic::Balance,
                icon: "🎯".to_string(),
                title: "Your Sweet Spot Identified".to_string(),
                description: format!(
                    "You maintain high mood (7+) with around {sweet_spot_hours:.1} \
                     work hours per day"
                ),
                recommendation: format!(
                    "Target {sweet_spot_hours:.1} hours as your baseline. \
                     Current adherence: {adherence_pct:.0}%"
                ),
            }
        }
        None => Insight {
            topic: InsightTopic::Balance,
            icon: "🎯".to_string(),
            title: "Your Sweet Spot Identified".to_string(),
            description: "No days reached mood 7+ in this period, so a sweet-spot \
                          work range is undefined."
                .to_string(),
            recommendation: "Log more days, or address the conditions keeping mood \
                             low, before tuning work hours around a target."
                .to_string(),
        },
    }
}
