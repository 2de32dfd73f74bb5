//! Prediction validation against fixed and generated business descriptions.
//!
//! Real-world scenarios carry a hand-assigned expected rating. Mock scenarios
//! are filled from templates and get their expected rating from the keyword
//! counts adjusted by the template's bias, so they check that the classifier
//! agrees with a perturbed version of itself rather than with ground truth.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::esg::classifier::{classify, score_and_classify};
use crate::esg::keywords::KeywordIndex;
use crate::esg::scorer::score;
use crate::models::{Rating, ScoreVector};

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Mock,
    RealWorld,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Mock => write!(f, "Mock"),
            DataType::RealWorld => write!(f, "Real World"),
        }
    }
}

/// How a mock template skews the expected keyword profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EsgBias {
    Balanced,
    HighEsg,
    LowEsg,
    EnvFocused,
    SocialFocused,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub id: String,
    pub business_idea: String,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<EsgBias>,
    pub expected_rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedProfile {
    pub scores: ScoreVector,
    pub total: u64,
    pub expected_rating: Rating,
}

const TEMPLATES: [(&str, EsgBias); 5] = [
    (
        "A {industry} company that focuses on {env_aspect} using {technology} to serve {market} while ensuring {social_aspect} and maintaining {gov_aspect}.",
        EsgBias::Balanced,
    ),
    (
        "Revolutionary {industry} startup leveraging {technology} for {env_aspect} with strong commitment to {social_aspect} and {gov_aspect} practices.",
        EsgBias::HighEsg,
    ),
    (
        "{industry} business offering {service} to maximize profits through {strategy} with minimal operational costs.",
        EsgBias::LowEsg,
    ),
    (
        "Sustainable {industry} enterprise combining {env_aspect} innovation with {social_aspect} programs and {gov_aspect} standards.",
        EsgBias::EnvFocused,
    ),
    (
        "Community-centered {industry} organization prioritizing {social_aspect} while incorporating {env_aspect} and {gov_aspect}.",
        EsgBias::SocialFocused,
    ),
];

const INDUSTRIES: &[&str] = &[
    "technology", "agriculture", "manufacturing", "retail", "energy",
    "transportation", "healthcare", "food", "construction", "finance",
];
const ENV_ASPECTS: &[&str] = &[
    "renewable energy", "carbon reduction", "waste management",
    "sustainable materials", "clean technology", "circular economy",
];
const SOCIAL_ASPECTS: &[&str] = &[
    "job creation", "community development", "employee welfare",
    "diversity programs", "education initiatives", "health services",
];
const GOV_ASPECTS: &[&str] = &[
    "transparent reporting", "ethical sourcing", "compliance frameworks",
    "stakeholder engagement", "board diversity", "risk management",
];
const TECHNOLOGIES: &[&str] = &[
    "AI and machine learning", "blockchain", "IoT sensors",
    "automation", "mobile platforms", "cloud computing",
];
const MARKETS: &[&str] = &[
    "underserved communities", "urban areas", "rural regions",
    "developing markets", "corporate clients", "government sectors",
];
const SERVICES: &[&str] = &[
    "cost-effective products", "premium services", "mass market solutions",
    "niche offerings", "customized solutions",
];
const STRATEGIES: &[&str] = &[
    "aggressive pricing", "rapid expansion", "market domination",
    "cost cutting", "efficiency maximization",
];

/// Keyword profile a mock scenario is expected to produce.
///
/// High-ESG templates scale every count by 1.5, low-ESG ones by 0.3, and the
/// focused templates double their own category. Scaled counts truncate.
pub fn expected_profile(index: &KeywordIndex, text: &str, bias: EsgBias) -> ExpectedProfile {
    let mut v = score(index, text);
    let multiplier = match bias {
        EsgBias::HighEsg => 1.5,
        EsgBias::LowEsg => 0.3,
        EsgBias::EnvFocused => {
            v.environment *= 2;
            1.0
        }
        EsgBias::SocialFocused => {
            v.social *= 2;
            1.0
        }
        EsgBias::Balanced => 1.0,
    };
    let scale = |count: u64| (count as f64 * multiplier) as u64;
    let scores = ScoreVector {
        environment: scale(v.environment),
        social: scale(v.social),
        governance: scale(v.governance),
    };
    ExpectedProfile {
        scores,
        total: scores.total(),
        expected_rating: classify(scores.total()),
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Fill `count` random templates.
pub fn generate_mock_scenarios<R: Rng + ?Sized>(
    index: &KeywordIndex,
    count: usize,
    rng: &mut R,
) -> Vec<Scenario> {
    (0..count)
        .map(|i| {
            let (template, bias) = TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
            let business_idea = template
                .replace("{industry}", pick(rng, INDUSTRIES))
                .replace("{env_aspect}", pick(rng, ENV_ASPECTS))
                .replace("{social_aspect}", pick(rng, SOCIAL_ASPECTS))
                .replace("{gov_aspect}", pick(rng, GOV_ASPECTS))
                .replace("{technology}", pick(rng, TECHNOLOGIES))
                .replace("{market}", pick(rng, MARKETS))
                .replace("{service}", pick(rng, SERVICES))
                .replace("{strategy}", pick(rng, STRATEGIES));
            let profile = expected_profile(index, &business_idea, bias);
            Scenario {
                id: format!("mock_{}", i + 1),
                business_idea,
                data_type: DataType::Mock,
                bias: Some(bias),
                expected_rating: profile.expected_rating,
            }
        })
        .collect()
}

/// Five hand-written descriptions with the ratings a reviewer assigned them.
pub fn real_world_scenarios() -> Vec<Scenario> {
    let scenario = |id: &str, text: &str, expected| Scenario {
        id: id.to_string(),
        business_idea: text.to_string(),
        data_type: DataType::RealWorld,
        bias: None,
        expected_rating: expected,
    };
    vec![
        scenario(
            "real_1",
            "EcoTech Solar Solutions: A renewable energy company that designs and installs solar panel systems \
             for residential and commercial properties. We use recycled materials in our installations, \
             create local employment opportunities through comprehensive training programs, and maintain \
             transparent pricing with detailed environmental impact reporting. Our governance includes \
             third-party audits and community stakeholder meetings.",
            Rating::High,
        ),
        scenario(
            "real_2",
            "FastFashion Express: An online clothing retailer offering trendy apparel at competitive prices. \
             Our business model focuses on rapid inventory turnover, global sourcing for cost optimization, \
             and efficient delivery systems. We aim to provide affordable fashion to price-conscious consumers \
             through streamlined operations and minimal overhead costs.",
            Rating::Low,
        ),
        scenario(
            "real_3",
            "GreenAgri Vertical Farms: Urban agriculture startup using hydroponic vertical farming to grow \
             organic vegetables in city centers. Powered by renewable energy, creating jobs for veterans \
             and underemployed populations, providing fresh produce to food deserts. Implements transparent \
             supply chain tracking, fair wage policies, and regular community impact assessments.",
            Rating::High,
        ),
        scenario(
            "real_4",
            "CommunityBank Plus: A digital community bank focused on serving underbanked populations with \
             fair lending practices, financial literacy programs, and transparent fee structures. \
             Uses clean energy for operations, promotes diversity in hiring and leadership, and maintains \
             ethical investment policies while supporting local small business development.",
            Rating::Medium,
        ),
        scenario(
            "real_5",
            "TechGiant Corp: Global technology conglomerate focused on maximizing shareholder returns through \
             aggressive market expansion, cost reduction initiatives, and premium pricing strategies. \
             Operates across multiple continents with emphasis on operational efficiency and competitive positioning.",
            Rating::Low,
        ),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_id: String,
    pub data_type: DataType,
    pub business_idea: String,
    pub expected: Rating,
    pub predicted: Rating,
    pub correct: bool,
    pub confidence: f64,
    pub esg_scores: ScoreVector,
    pub total_score: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeAccuracy {
    pub correct: usize,
    pub total: usize,
}

impl TypeAccuracy {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Dominance values bucketed the way the summary reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceBuckets {
    /// Above 0.7.
    pub high: usize,
    /// 0.3 to 0.7 inclusive.
    pub medium: usize,
    /// Below 0.3.
    pub low: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Performance {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl Performance {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 0.8 {
            Performance::Excellent
        } else if accuracy >= 0.6 {
            Performance::Good
        } else if accuracy >= 0.4 {
            Performance::Moderate
        } else {
            Performance::Poor
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Performance::Excellent => "Model performs very well across different scenarios",
            Performance::Good => "Model shows good performance, minor improvements needed",
            Performance::Moderate => "Model needs significant improvements",
            Performance::Poor => "Model requires major reconstruction",
        }
    }
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Performance::Excellent => write!(f, "EXCELLENT"),
            Performance::Good => write!(f, "GOOD"),
            Performance::Moderate => write!(f, "MODERATE"),
            Performance::Poor => write!(f, "POOR"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub total_scenarios: usize,
    pub correct_predictions: usize,
    pub overall_accuracy: f64,
    pub average_confidence: f64,
    pub accuracy_by_type: BTreeMap<DataType, TypeAccuracy>,
    pub confidence_buckets: ConfidenceBuckets,
    pub performance: Performance,
    pub results: Vec<ScenarioResult>,
}

/// Run every scenario through the classifier and tally agreement.
pub fn validate(index: &KeywordIndex, scenarios: &[Scenario]) -> ValidationReport {
    let mut results = Vec::with_capacity(scenarios.len());
    let mut accuracy_by_type: BTreeMap<DataType, TypeAccuracy> = BTreeMap::new();
    let mut buckets = ConfidenceBuckets::default();

    for scenario in scenarios {
        let assessment = score_and_classify(index, &scenario.business_idea);
        let correct = assessment.rating == scenario.expected_rating;

        let entry = accuracy_by_type.entry(scenario.data_type).or_default();
        entry.total += 1;
        if correct {
            entry.correct += 1;
        }

        let c = assessment.confidence;
        if c > 0.7 {
            buckets.high += 1;
        } else if c >= 0.3 {
            buckets.medium += 1;
        } else {
            buckets.low += 1;
        }

        tracing::debug!(
            id = %scenario.id,
            expected = %scenario.expected_rating,
            predicted = %assessment.rating,
            "scenario scored"
        );

        results.push(ScenarioResult {
            scenario_id: scenario.id.clone(),
            data_type: scenario.data_type,
            business_idea: preview(&scenario.business_idea, PREVIEW_CHARS),
            expected: scenario.expected_rating,
            predicted: assessment.rating,
            correct,
            confidence: c,
            esg_scores: assessment.scores,
            total_score: assessment.total,
        });
    }

    let total = results.len();
    let correct = results.iter().filter(|r| r.correct).count();
    let (overall_accuracy, average_confidence) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            correct as f64 / total as f64,
            results.iter().map(|r| r.confidence).sum::<f64>() / total as f64,
        )
    };

    ValidationReport {
        total_scenarios: total,
        correct_predictions: correct,
        overall_accuracy,
        average_confidence,
        accuracy_by_type,
        confidence_buckets: buckets,
        performance: Performance::from_accuracy(overall_accuracy),
        results,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeCaseResult {
    pub name: &'static str,
    pub input: &'static str,
    pub expected_behavior: &'static str,
    pub prediction: Rating,
    pub confidence: f64,
    pub total_score: u64,
}

const EDGE_CASES: [(&str, &str, &str); 5] = [
    ("Empty Input", "", "Low rating with low confidence"),
    ("Very Short Text", "Green tech startup.", "Should still provide prediction"),
    (
        "ESG Keyword Spam",
        "renewable renewable sustainable sustainable green green community community ethics ethics governance governance",
        "High rating but should handle redundancy",
    ),
    (
        "Mixed Signals",
        "Sustainable coal mining company with renewable energy and transparent reporting but cost-cutting labor practices",
        "Medium rating due to conflicting signals",
    ),
    (
        "No ESG Content",
        "Technology platform for optimizing database queries and improving server performance metrics",
        "Low rating due to lack of ESG indicators",
    ),
];

pub fn run_edge_cases(index: &KeywordIndex) -> Vec<EdgeCaseResult> {
    EDGE_CASES
        .iter()
        .map(|&(name, input, expected_behavior)| {
            let a = score_and_classify(index, input);
            EdgeCaseResult {
                name,
                input,
                expected_behavior,
                prediction: a.rating,
                confidence: a.confidence,
                total_score: a.total,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ValidationExport<'a> {
    pub test_timestamp: DateTime<Local>,
    pub test_results: &'a ValidationReport,
    pub edge_cases: &'a [EdgeCaseResult],
    pub mock_scenarios: Vec<&'a Scenario>,
    pub real_world_scenarios: Vec<&'a Scenario>,
}

impl<'a> ValidationExport<'a> {
    pub fn new(
        now: DateTime<Local>,
        report: &'a ValidationReport,
        edge_cases: &'a [EdgeCaseResult],
        scenarios: &'a [Scenario],
    ) -> Self {
        let of_type = |t: DataType| -> Vec<&'a Scenario> {
            scenarios.iter().filter(|s| s.data_type == t).collect()
        };
        Self {
            test_timestamp: now,
            test_results: report,
            edge_cases,
            mock_scenarios: of_type(DataType::Mock),
            real_world_scenarios: of_type(DataType::RealWorld),
        }
    }
}

/// `esg_prediction_validation_<YYYYMMDD_HHMMSS>.json`
pub fn default_export_name(now: &DateTime<Local>) -> String {
    format!("esg_prediction_validation_{}.json", now.format("%Y%m%d_%H%M%S"))
}

pub fn export(path: &Path, data: &ValidationExport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write validation results to {}", path.display()))?;
    tracing::info!(path = %path.display(), "validation results exported");
    Ok(())
}

fn preview(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_expected_profile_bias() {
        let index = KeywordIndex::default();
        let text = "carbon carbon carbon job job audit";

        let balanced = expected_profile(&index, text, EsgBias::Balanced);
        assert_eq!(balanced.total, 6);

        let high = expected_profile(&index, text, EsgBias::HighEsg);
        // 3*1.5=4, 2*1.5=3, 1*1.5=1
        assert_eq!(high.scores, ScoreVector { environment: 4, social: 3, governance: 1 });

        let low = expected_profile(&index, text, EsgBias::LowEsg);
        assert_eq!(low.total, 0);

        let env = expected_profile(&index, text, EsgBias::EnvFocused);
        assert_eq!(env.scores.environment, 6);

        let soc = expected_profile(&index, text, EsgBias::SocialFocused);
        assert_eq!(soc.scores.social, 4);
    }

    #[test]
    fn test_expected_profile_can_cross_threshold() {
        let index = KeywordIndex::default();
        let text = vec!["carbon"; 150].join(" ");
        let p = expected_profile(&index, &text, EsgBias::HighEsg);
        assert_eq!(p.total, 225);
        assert_eq!(p.expected_rating, Rating::Medium);
    }

    #[test]
    fn test_mock_generation_is_seeded() {
        let index = KeywordIndex::default();
        let a = generate_mock_scenarios(&index, 10, &mut StdRng::seed_from_u64(7));
        let b = generate_mock_scenarios(&index, 10, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.len(), 10);
        let texts_a: Vec<_> = a.iter().map(|s| &s.business_idea).collect();
        let texts_b: Vec<_> = b.iter().map(|s| &s.business_idea).collect();
        assert_eq!(texts_a, texts_b);
        assert!(a.iter().all(|s| !s.business_idea.contains('{')));
        assert_eq!(a[0].id, "mock_1");
    }

    #[test]
    fn test_validate_counts() {
        let index = KeywordIndex::default();
        let report = validate(&index, &real_world_scenarios());
        assert_eq!(report.total_scenarios, 5);
        // Short descriptions never reach 200 keyword hits, so only the Low
        // expectations are met.
        assert_eq!(report.correct_predictions, 2);
        assert!((report.overall_accuracy - 0.4).abs() < 1e-9);
        assert_eq!(report.performance, Performance::Moderate);
        assert_eq!(
            report.accuracy_by_type.get(&DataType::RealWorld),
            Some(&TypeAccuracy { correct: 2, total: 5 })
        );
        let buckets = report.confidence_buckets;
        assert_eq!(buckets.high + buckets.medium + buckets.low, 5);
    }

    #[test]
    fn test_validate_mock_agrees_for_unbiased() {
        let index = KeywordIndex::default();
        let scenarios: Vec<_> = generate_mock_scenarios(&index, 30, &mut StdRng::seed_from_u64(1))
            .into_iter()
            .filter(|s| s.bias == Some(EsgBias::Balanced))
            .collect();
        let report = validate(&index, &scenarios);
        assert_eq!(report.correct_predictions, report.total_scenarios);
    }

    #[test]
    fn test_validate_empty() {
        let report = validate(&KeywordIndex::default(), &[]);
        assert_eq!(report.total_scenarios, 0);
        assert_eq!(report.overall_accuracy, 0.0);
        assert_eq!(report.performance, Performance::Poor);
    }

    #[test]
    fn test_edge_cases() {
        let results = run_edge_cases(&KeywordIndex::default());
        assert_eq!(results.len(), 5);
        let empty = &results[0];
        assert_eq!(empty.prediction, Rating::Low);
        assert_eq!(empty.confidence, 0.1);
        assert_eq!(empty.total_score, 0);
        // renewable x2, community x2, ethics x2
        assert_eq!(results[2].total_score, 6);
    }

    #[test]
    fn test_export_round_trip_shape() {
        let index = KeywordIndex::default();
        let scenarios = real_world_scenarios();
        let report = validate(&index, &scenarios);
        let edges = run_edge_cases(&index);
        let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();

        assert_eq!(
            default_export_name(&now),
            "esg_prediction_validation_20250304_050607.json"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export(&path, &ValidationExport::new(now, &report, &edges, &scenarios)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["real_world_scenarios"].as_array().unwrap().len(), 5);
        assert_eq!(value["mock_scenarios"].as_array().unwrap().len(), 0);
        assert_eq!(value["test_results"]["total_scenarios"], 5);
        assert_eq!(value["test_results"]["accuracy_by_type"]["real_world"]["total"], 5);
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("a  b\n c", 10), "a b c");
        assert_eq!(preview("ééééé", 3), "ééé...");
    }
}
