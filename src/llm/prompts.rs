use anyhow::Result;
use regex::Regex;

use crate::models::{Category, Rating, ScoreVector};

/// System context sent with every request.
pub const ESG_CONTEXT: &str = "\
You are an ESG (Environmental, Social, Governance) expert helping evaluate business ideas.

ENVIRONMENTAL criteria include: carbon emissions, renewable energy, waste management, \
resource efficiency, biodiversity impact, circular economy principles, climate action.

SOCIAL criteria include: job creation, community impact, health & safety, diversity & inclusion, \
fair labor practices, stakeholder engagement, social equity, human rights.

GOVERNANCE criteria include: transparency, ethics, accountability, compliance, risk management, \
board diversity, anti-corruption, stakeholder rights.

UN SDGs focus areas: No poverty, Zero hunger, Good health, Quality education, Gender equality, \
Clean water, Affordable clean energy, Decent work, Industry innovation, Reduced inequalities, \
Sustainable cities, Responsible consumption, Climate action, Life below water, Life on land, \
Peace & justice, Partnerships.";

const IDEA_SEPARATOR: &str = "---";
const IDEA_MARKER: &str = "IDEA #";

pub fn ideas_prompt(industry: Option<&str>, focus: Option<&str>, count: usize) -> String {
    format!(
        "Generate {count} innovative and sustainable business ideas that strongly align with ESG principles.

Industry focus: {industry}
Special focus: {focus}

For each business idea, provide:
1. Business Name & Concept (2-3 sentences)
2. Environmental Impact (how it helps the environment)
3. Social Impact (how it benefits society)
4. Governance Approach (ethical business practices)
5. UN SDG Alignment (which SDGs it addresses)

Make the ideas specific, actionable, and commercially viable.

Format each idea as:
IDEA #: [Business Name]
CONCEPT: [Brief description]
ENVIRONMENTAL: [Environmental benefits]
SOCIAL: [Social benefits]
GOVERNANCE: [Governance practices]
SDGS: [Relevant SDG numbers and names]
---",
        count = count,
        industry = industry.filter(|s| !s.is_empty()).unwrap_or("Any industry"),
        focus = focus.filter(|s| !s.is_empty()).unwrap_or("General sustainability"),
    )
}

pub fn explain_prompt(idea: &str, scores: &ScoreVector, rating: Rating) -> String {
    format!(
        "Explain in simple, clear language why this business idea received the following ESG evaluation:

BUSINESS IDEA: {idea}

ESG SCORES:
- Environmental Score: {env}
- Social Score: {soc}
- Governance Score: {gov}

SUSTAINABILITY RATING: {rating}

Provide:
1. Overall assessment (2-3 sentences)
2. Strengths in each ESG dimension
3. Areas for improvement
4. Specific recommendations to enhance sustainability

Write in a helpful, constructive tone suitable for entrepreneurs and business students.",
        idea = idea.trim(),
        env = scores.environment,
        soc = scores.social,
        gov = scores.governance,
        rating = rating,
    )
}

pub fn question_prompt(question: &str) -> String {
    format!(
        "Answer this question about ESG (Environmental, Social, Governance) and sustainability:

QUESTION: {}

Provide a clear, accurate, and educational response. Include practical examples where helpful.
If the question relates to business sustainability, connect it to real-world applications.",
        question.trim()
    )
}

pub fn improve_prompt(idea: &str, weak_areas: &[Category]) -> String {
    let areas: Vec<&str> = weak_areas.iter().map(|c| c.as_str()).collect();
    format!(
        "Improve this business idea to address the identified weak ESG areas:

ORIGINAL IDEA: {}

WEAK AREAS TO ADDRESS: {}

Provide:
1. Enhanced business concept that addresses the weak areas
2. Specific improvements for each weak ESG dimension
3. New value propositions that emerge from these improvements
4. Implementation suggestions

Keep the core business concept but make it more sustainable and socially responsible.",
        idea.trim(),
        areas.join(", ")
    )
}

pub fn plan_prompt(idea: &str) -> String {
    format!(
        "Create a comprehensive business plan outline focused on ESG principles for this idea:

BUSINESS IDEA: {}

Provide a detailed outline covering:
1. Executive Summary (ESG-focused)
2. Market Analysis (sustainability trends)
3. ESG Impact Strategy
   - Environmental initiatives
   - Social impact programs
   - Governance framework
4. Financial Projections (including ESG ROI)
5. Risk Management (ESG risks)
6. Implementation Timeline
7. Success Metrics (ESG KPIs)

Make it practical and actionable for entrepreneurs.",
        idea.trim()
    )
}

/// Categories to focus an improvement request on: every category with no
/// hits, or the lowest-scoring ones when all have some.
pub fn weak_areas(scores: &ScoreVector) -> Vec<Category> {
    let zero: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|c| scores.get(*c) == 0)
        .collect();
    if !zero.is_empty() {
        return zero;
    }

    let min = Category::ALL
        .iter()
        .map(|c| scores.get(*c))
        .min()
        .unwrap_or(0);
    Category::ALL
        .into_iter()
        .filter(|c| scores.get(*c) == min)
        .collect()
}

/// One business idea pulled out of a structured LLM reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessIdea {
    pub title: String,
    pub concept: String,
    pub environmental: String,
    pub social: String,
    pub governance: String,
    pub sdgs: String,
    pub raw_text: String,
}

impl BusinessIdea {
    /// Text handed to the keyword scorer.
    pub fn scoring_text(&self) -> &str {
        &self.raw_text
    }
}

/// Split a reply into `---`-separated sections and keep those marked `IDEA #`.
pub fn parse_ideas(response: &str) -> Result<Vec<BusinessIdea>> {
    let title_re = Regex::new(r"IDEA\s*#\s*\d*\s*:?\s*(.*)")?;
    Ok(response
        .split(IDEA_SEPARATOR)
        .filter(|section| section.contains(IDEA_MARKER))
        .map(|section| parse_idea(section, &title_re))
        .collect())
}

fn parse_idea(section: &str, title_re: &Regex) -> BusinessIdea {
    let mut idea = BusinessIdea {
        raw_text: section.trim().to_string(),
        ..Default::default()
    };

    for line in section.lines() {
        if let Some(caps) = title_re.captures(line) {
            if idea.title.is_empty() {
                idea.title = caps
                    .get(1)
                    .map(|m| {
                        m.as_str()
                            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '*'))
                            .to_string()
                    })
                    .unwrap_or_default();
            }
        } else if let Some(value) = field_value(line, "CONCEPT:") {
            idea.concept = value;
        } else if let Some(value) = field_value(line, "ENVIRONMENTAL:") {
            idea.environmental = value;
        } else if let Some(value) = field_value(line, "SOCIAL:") {
            idea.social = value;
        } else if let Some(value) = field_value(line, "GOVERNANCE:") {
            idea.governance = value;
        } else if let Some(value) = field_value(line, "SDGS:") {
            idea.sdgs = value;
        }
    }

    idea
}

fn field_value(line: &str, label: &str) -> Option<String> {
    line.split_once(label).map(|(_, rest)| rest.trim().to_string())
}
