//! Score presentation
//!
//! Maps a [`ScoreSet`] to what the display layer shows for it: the formatted
//! value, a color tier with its strain label, and a recommendation.
//! Bands are half-open intervals `(lo, hi]`, except that the first strain band
//! starts at 4 inclusive. The bands of one score never overlap and together cover
//! the real line.

use serde::{Deserialize, Serialize};

use crate::types::{ColorTier, ScoreSet};

/// Whether a score can be shown as a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Valid,
    /// NaN or infinite: missing input or a degenerate denominator
    Invalid,
}

impl ScoreKind {
    pub fn of(value: f64) -> Self {
        if value.is_finite() {
            ScoreKind::Valid
        } else {
            ScoreKind::Invalid
        }
    }
}

/// Two decimals, or `"NaN"` for anything that is not a finite number
pub fn format_score(value: f64) -> String {
    match ScoreKind::of(value) {
        ScoreKind::Valid => format!("{value:.2}"),
        ScoreKind::Invalid => "NaN".to_string(),
    }
}

/// mPSI strain band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainBand {
    /// Below 4
    Low,
    /// [4, 5]
    Tired,
    /// (5, 6]
    VeryTired,
    /// (6, 7.5]
    NearRisk,
    /// (7.5, 8.5]
    AtRisk,
    /// Above 8.5
    ExtremeRisk,
}

impl StrainBand {
    pub fn classify(mpsi: f64) -> Option<Self> {
        if mpsi.is_nan() {
            return None;
        }
        Some(if mpsi < STRAIN_REVEAL_THRESHOLD {
            StrainBand::Low
        } else if mpsi <= 5.0 {
            StrainBand::Tired
        } else if mpsi <= 6.0 {
            StrainBand::VeryTired
        } else if mpsi <= 7.5 {
            StrainBand::NearRisk
        } else if mpsi <= 8.5 {
            StrainBand::AtRisk
        } else {
            StrainBand::ExtremeRisk
        })
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            StrainBand::Low => None,
            StrainBand::Tired => Some("tired but not at risk of heat related injury."),
            StrainBand::VeryTired => Some("very tired but not at risk of heat related injury."),
            StrainBand::NearRisk => Some("very tired, nearly at risk of heat related injury."),
            StrainBand::AtRisk => Some("exhausted, at risk of heat related injury."),
            StrainBand::ExtremeRisk => {
                Some("exhausted, at extreme risk of heat related injury.")
            }
        }
    }
}

/// Strain recommendations are revealed from this mPSI up
const STRAIN_REVEAL_THRESHOLD: f64 = 4.0;

/// Weather advisory for a heat risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherAdvisory {
    Normal,
    Caution,
    ExtremeCaution,
    Danger,
    ExtremeDanger,
}

impl WeatherAdvisory {
    pub fn for_level(level: Option<u8>) -> Self {
        match level {
            Some(2) => WeatherAdvisory::Caution,
            Some(3) => WeatherAdvisory::ExtremeCaution,
            Some(4) => WeatherAdvisory::Danger,
            Some(l) if l >= 5 => WeatherAdvisory::ExtremeDanger,
            _ => WeatherAdvisory::Normal,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WeatherAdvisory::Normal => "Normal",
            WeatherAdvisory::Caution => "Caution",
            WeatherAdvisory::ExtremeCaution => "Extreme Caution",
            WeatherAdvisory::Danger => "Danger",
            WeatherAdvisory::ExtremeDanger => "Extreme Danger",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WeatherAdvisory::Normal => "no special action needed",
            WeatherAdvisory::Caution => "fatigue possible with prolonged exposure.",
            WeatherAdvisory::ExtremeCaution => "muscle cramps and heat exhaustion possible.",
            WeatherAdvisory::Danger => "heat exhaustion likely; heat stroke possible.",
            WeatherAdvisory::ExtremeDanger => "heat stroke likely.",
        }
    }
}

/// Personal vulnerability band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityBand {
    /// At or below 1
    Minimal,
    /// (1, 2]
    Slight,
    /// (2, 3]
    Moderate,
    /// (3, 4]
    High,
    /// Above 4
    Extreme,
}

impl VulnerabilityBand {
    pub fn classify(score: f64) -> Option<Self> {
        if score.is_nan() {
            return None;
        }
        Some(if score <= 1.0 {
            VulnerabilityBand::Minimal
        } else if score <= 2.0 {
            VulnerabilityBand::Slight
        } else if score <= 3.0 {
            VulnerabilityBand::Moderate
        } else if score <= 4.0 {
            VulnerabilityBand::High
        } else {
            VulnerabilityBand::Extreme
        })
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            VulnerabilityBand::Minimal => None,
            VulnerabilityBand::Slight => Some("slightly increased risk"),
            VulnerabilityBand::Moderate => Some("moderately increased risk"),
            VulnerabilityBand::High => Some("highly increased risk"),
            VulnerabilityBand::Extreme => Some("extremely increased risk"),
        }
    }
}

/// How one score is displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    /// Formatted value, empty while idle
    pub display: String,
    pub kind: ScoreKind,
    pub tier: ColorTier,
    pub label: Option<String>,
}

impl ScoreView {
    fn idle() -> Self {
        Self {
            display: String::new(),
            kind: ScoreKind::Invalid,
            tier: ColorTier::Grey,
            label: None,
        }
    }

    fn tiered(value: f64, green_max: f64, yellow_max: f64, labels: [&str; 3]) -> Self {
        let kind = ScoreKind::of(value);
        let (tier, label) = match kind {
            ScoreKind::Invalid => (ColorTier::Grey, None),
            ScoreKind::Valid if value <= green_max => (ColorTier::Green, Some(labels[0])),
            ScoreKind::Valid if value <= yellow_max => (ColorTier::Yellow, Some(labels[1])),
            ScoreKind::Valid => (ColorTier::Red, Some(labels[2])),
        };

        Self {
            display: format_score(value),
            kind,
            tier,
            label: label.map(str::to_string),
        }
    }
}

/// Recommendation text for one score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Advisory title, heat index only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    /// Whether the display layer should reveal it
    pub visible: bool,
}

impl Recommendation {
    fn strain(mpsi: f64) -> Option<Self> {
        let band = StrainBand::classify(mpsi)?;
        band.message().map(|message| Recommendation {
            title: None,
            message: message.to_string(),
            visible: true,
        })
    }

    fn weather(level: u8) -> Self {
        let advisory = WeatherAdvisory::for_level(Some(level));
        Recommendation {
            title: Some(advisory.title().to_string()),
            message: advisory.message().to_string(),
            visible: advisory != WeatherAdvisory::Normal,
        }
    }

    fn vulnerability(score: f64) -> Option<Self> {
        let band = VulnerabilityBand::classify(score)?;
        band.message().map(|message| Recommendation {
            title: None,
            message: message.to_string(),
            visible: score >= PERSONAL_REVEAL_THRESHOLD,
        })
    }
}

/// Personal recommendations are revealed from this score up
const PERSONAL_REVEAL_THRESHOLD: f64 = 2.0;

const MPSI_LABELS: [&str; 3] = ["Little to No Strain", "Moderate Strain", "Extreme Strain"];
const WEATHER_LABELS: [&str; 3] = ["Normal Weather", "Moderate Weather", "Extreme Weather"];
const PERSONAL_LABELS: [&str; 3] = [
    "No Additional Heat Risk",
    "Moderate Additional Heat Risk",
    "Serious Additional Heat Risk",
];

/// Everything the display layer needs for one result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub mpsi: ScoreView,
    /// Colored by heat risk level, which is also the displayed value
    pub heat_index: ScoreView,
    pub personal: ScoreView,
    pub final_score: String,
    pub mpsi_recommendation: Option<Recommendation>,
    pub heat_index_recommendation: Option<Recommendation>,
    pub personal_recommendation: Option<Recommendation>,
}

impl Assessment {
    /// Display state before any result is computed
    pub fn idle() -> Self {
        Self {
            mpsi: ScoreView::idle(),
            heat_index: ScoreView::idle(),
            personal: ScoreView::idle(),
            final_score: String::new(),
            mpsi_recommendation: None,
            heat_index_recommendation: None,
            personal_recommendation: None,
        }
    }

    pub fn from_scores(scores: &ScoreSet) -> Self {
        let level = scores.heat_risk_level.map(f64::from).unwrap_or(f64::NAN);

        Self {
            mpsi: ScoreView::tiered(scores.mpsi, 3.0, 6.0, MPSI_LABELS),
            heat_index: ScoreView::tiered(level, 2.0, 4.0, WEATHER_LABELS),
            personal: ScoreView::tiered(scores.personal_score, 2.0, 4.0, PERSONAL_LABELS),
            final_score: format_score(scores.final_score),
            mpsi_recommendation: Recommendation::strain(scores.mpsi),
            heat_index_recommendation: scores.heat_risk_level.map(Recommendation::weather),
            personal_recommendation: Recommendation::vulnerability(scores.personal_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scores(mpsi: f64, level: Option<u8>, personal: f64) -> ScoreSet {
        ScoreSet {
            mpsi,
            heat_index_f: 95.0,
            heat_risk_level: level,
            personal_score: personal,
            final_score: 0.5,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(4.3591), "4.36");
        assert_eq!(format_score(f64::NAN), "NaN");
        assert_eq!(format_score(f64::INFINITY), "NaN");
        assert_eq!(format_score(-0.5), "-0.50");
    }

    #[test]
    fn test_mpsi_tiers() {
        let view = |v| ScoreView::tiered(v, 3.0, 6.0, MPSI_LABELS);

        assert_eq!(view(3.0).tier, ColorTier::Green);
        assert_eq!(view(3.0).label.as_deref(), Some("Little to No Strain"));
        assert_eq!(view(3.01).tier, ColorTier::Yellow);
        assert_eq!(view(6.0).label.as_deref(), Some("Moderate Strain"));
        assert_eq!(view(6.01).tier, ColorTier::Red);
        assert_eq!(view(-2.0).tier, ColorTier::Green);
        assert_eq!(view(f64::NAN).tier, ColorTier::Grey);
        assert_eq!(view(f64::NAN).kind, ScoreKind::Invalid);
    }

    #[test]
    fn test_strain_bands_partition_the_line() {
        let cases = [
            (-100.0, StrainBand::Low),
            (3.9999, StrainBand::Low),
            (4.0, StrainBand::Tired),
            (4.0001, StrainBand::Tired),
            (5.0, StrainBand::Tired),
            (5.5, StrainBand::VeryTired),
            (6.0, StrainBand::VeryTired),
            (7.5, StrainBand::NearRisk),
            (8.5, StrainBand::AtRisk),
            (8.5001, StrainBand::ExtremeRisk),
            (f64::INFINITY, StrainBand::ExtremeRisk),
            (f64::NEG_INFINITY, StrainBand::Low),
        ];
        for (value, band) in cases {
            assert_eq!(StrainBand::classify(value), Some(band), "mpsi {value}");
        }
        assert_eq!(StrainBand::classify(f64::NAN), None);
    }

    #[test]
    fn test_vulnerability_bands_partition_the_line() {
        let cases = [
            (0.645, VulnerabilityBand::Minimal),
            (1.0, VulnerabilityBand::Minimal),
            (1.5, VulnerabilityBand::Slight),
            (2.0, VulnerabilityBand::Slight),
            (3.0, VulnerabilityBand::Moderate),
            (3.5, VulnerabilityBand::High),
            (4.2, VulnerabilityBand::Extreme),
            (9.0, VulnerabilityBand::Extreme),
        ];
        for (value, band) in cases {
            assert_eq!(VulnerabilityBand::classify(value), Some(band), "score {value}");
        }
    }

    #[test]
    fn test_weather_advisories() {
        assert_eq!(WeatherAdvisory::for_level(Some(1)), WeatherAdvisory::Normal);
        assert_eq!(WeatherAdvisory::for_level(None), WeatherAdvisory::Normal);
        assert_eq!(WeatherAdvisory::for_level(Some(3)).title(), "Extreme Caution");
        assert_eq!(
            WeatherAdvisory::for_level(Some(5)).message(),
            "heat stroke likely."
        );
    }

    #[test]
    fn test_assessment_from_scores() {
        let assessment = Assessment::from_scores(&scores(5.5, Some(3), 2.5));

        assert_eq!(assessment.mpsi.display, "5.50");
        assert_eq!(assessment.mpsi.tier, ColorTier::Yellow);
        assert_eq!(assessment.heat_index.display, "3.00");
        assert_eq!(assessment.heat_index.tier, ColorTier::Yellow);
        assert_eq!(assessment.heat_index.label.as_deref(), Some("Moderate Weather"));
        assert_eq!(assessment.personal.tier, ColorTier::Yellow);
        assert_eq!(assessment.final_score, "0.50");

        assert_eq!(
            assessment.mpsi_recommendation,
            Some(Recommendation {
                title: None,
                message: "very tired but not at risk of heat related injury.".to_string(),
                visible: true,
            })
        );
        assert_eq!(
            assessment.heat_index_recommendation,
            Some(Recommendation {
                title: Some("Extreme Caution".to_string()),
                message: "muscle cramps and heat exhaustion possible.".to_string(),
                visible: true,
            })
        );
        assert_eq!(
            assessment.personal_recommendation.map(|r| r.message),
            Some("moderately increased risk".to_string())
        );
    }

    #[test]
    fn test_low_scores_hide_recommendations() {
        let assessment = Assessment::from_scores(&scores(2.0, Some(1), 1.5));

        assert_eq!(assessment.mpsi_recommendation, None);
        let weather = assessment.heat_index_recommendation.unwrap();
        assert_eq!(weather.title.as_deref(), Some("Normal"));
        assert!(!weather.visible);
        let personal = assessment.personal_recommendation.unwrap();
        assert_eq!(personal.message, "slightly increased risk");
        assert!(!personal.visible);
    }

    #[test]
    fn test_strain_recommendation_shown_from_four() {
        let at_edge = Assessment::from_scores(&scores(4.0, Some(1), 0.5));
        assert_eq!(
            at_edge.mpsi_recommendation,
            Some(Recommendation {
                title: None,
                message: "tired but not at risk of heat related injury.".to_string(),
                visible: true,
            })
        );

        let below = Assessment::from_scores(&scores(3.99, Some(1), 0.5));
        assert_eq!(below.mpsi_recommendation, None);
    }

    #[test]
    fn test_invalid_scores_render_nan() {
        let assessment = Assessment::from_scores(&ScoreSet {
            mpsi: f64::NAN,
            heat_index_f: f64::NAN,
            heat_risk_level: None,
            personal_score: f64::NAN,
            final_score: f64::NAN,
        });

        assert_eq!(assessment.mpsi.display, "NaN");
        assert_eq!(assessment.heat_index.display, "NaN");
        assert_eq!(assessment.heat_index.tier, ColorTier::Grey);
        assert_eq!(assessment.personal.tier, ColorTier::Grey);
        assert_eq!(assessment.final_score, "NaN");
        assert_eq!(assessment.mpsi_recommendation, None);
        assert_eq!(assessment.heat_index_recommendation, None);
        assert_eq!(assessment.personal_recommendation, None);
    }

    #[test]
    fn test_idle_is_grey() {
        let idle = Assessment::idle();
        assert_eq!(idle.mpsi.tier, ColorTier::Grey);
        assert!(idle.mpsi.display.is_empty());
        assert!(idle.final_score.is_empty());
    }
}
