//! @acp:module "Slide Classifier"
//! @acp:summary "Keyword heuristics deriving slide type, depth, concepts and services from text"
//! @acp:domain timing
//! @acp:layer service
//!
//! Used when a deck entry carries raw slide text instead of an upstream
//! analysis. Patterns are matched against lowercased text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::allocation::SlideType;

/// A type pattern, optionally restricted to certain slide positions
struct TypeRule {
    slide_type: SlideType,
    pattern: Regex,
    position: Position,
}

#[derive(Clone, Copy)]
enum Position {
    Anywhere,
    /// Slide numbers up to and including N
    First(u32),
    /// Last N slides
    Last(u32),
}

impl TypeRule {
    fn new(slide_type: SlideType, pattern: &str, position: Position) -> Self {
        Self {
            slide_type,
            pattern: Regex::new(pattern).unwrap(),
            position,
        }
    }
}

/// Checked in order; the first matching rule wins
static TYPE_RULES: LazyLock<Vec<TypeRule>> = LazyLock::new(|| {
    vec![
        TypeRule::new(
            SlideType::Title,
            r"^\s*(title|overview|introduction)",
            Position::First(1),
        ),
        TypeRule::new(
            SlideType::Agenda,
            r"^\s*(agenda|outline|topics)",
            Position::First(3),
        ),
        TypeRule::new(
            SlideType::Qa,
            r"(q\s*&\s*a|\bquestions\b)",
            Position::Last(2),
        ),
        TypeRule::new(
            SlideType::Demo,
            r"(\bdemo\b|demonstration|walkthrough)",
            Position::Anywhere,
        ),
        TypeRule::new(
            SlideType::Summary,
            r"^\s*(summary|conclusion|wrap.?up|key takeaways)",
            Position::Last(2),
        ),
        TypeRule::new(
            SlideType::Comparison,
            r"(\bvs\.?\b|\bversus\b|comparison)",
            Position::Anywhere,
        ),
        TypeRule::new(
            SlideType::Technical,
            r"(architecture|implementation|configuration)",
            Position::Anywhere,
        ),
    ]
});

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(```.*```|<code>.*</code>)").unwrap());

/// Technical term vocabulary by category
const TECHNICAL_TERMS: &[(&str, &[&str])] = &[
    (
        "architecture",
        &[
            "high availability",
            "fault tolerance",
            "scalability",
            "reliability",
            "disaster recovery",
            "redundancy",
            "failover",
            "load balancing",
        ],
    ),
    (
        "development",
        &[
            "api",
            "sdk",
            "cli",
            "git",
            "ci/cd",
            "pipeline",
            "deployment",
            "containerization",
            "microservices",
            "serverless",
        ],
    ),
    (
        "security",
        &[
            "encryption",
            "authentication",
            "authorization",
            "iam",
            "compliance",
            "audit",
            "security group",
            "certificate",
        ],
    ),
    (
        "database",
        &[
            "acid",
            "nosql",
            "sharding",
            "replication",
            "indexing",
            "partitioning",
            "consistency",
            "transaction",
            "backup",
        ],
    ),
    (
        "networking",
        &[
            "vpc", "subnet", "routing", "gateway", "endpoint", "dns", "cdn", "firewall", "proxy",
            "latency",
        ],
    ),
];

/// Service names recognized as named-entity mentions
const KNOWN_SERVICES: &[&str] = &[
    "EC2",
    "Lambda",
    "ECS",
    "EKS",
    "Fargate",
    "S3",
    "EBS",
    "EFS",
    "Glacier",
    "RDS",
    "DynamoDB",
    "Aurora",
    "Redshift",
    "CloudFront",
    "Route 53",
    "API Gateway",
    "IAM",
    "KMS",
    "WAF",
    "GuardDuty",
    "Athena",
    "EMR",
    "Kinesis",
    "Glue",
    "SageMaker",
    "Bedrock",
    "Comprehend",
    "Rekognition",
    "Textract",
    "CloudFormation",
    "CloudWatch",
    "CodePipeline",
    "CodeBuild",
];

const DEEP_CONCEPTS: &[&str] = &["latency", "throughput", "consistency", "durability", "encryption"];

/// Classify a slide from its text and position in the deck
pub fn classify_slide_type(text: &str, slide_number: u32, total_slides: u32) -> SlideType {
    let lower = text.to_lowercase();

    TYPE_RULES
        .iter()
        .find(|rule| {
            position_matches(rule.position, slide_number, total_slides)
                && rule.pattern.is_match(&lower)
        })
        .map(|rule| rule.slide_type)
        .unwrap_or_default()
}

fn position_matches(position: Position, slide_number: u32, total_slides: u32) -> bool {
    match position {
        Position::Anywhere => true,
        Position::First(n) => slide_number <= n,
        Position::Last(n) => slide_number + n > total_slides,
    }
}

/// Count technical terms per category
pub fn count_technical_terms(text: &str) -> Vec<(&'static str, usize)> {
    let lower = text.to_lowercase();
    TECHNICAL_TERMS
        .iter()
        .filter_map(|(category, terms)| {
            let count = terms.iter().filter(|term| contains_term(&lower, term)).count();
            (count > 0).then_some((*category, count))
        })
        .collect()
}

/// Depth score in [1, 5] from term density and content cues
pub fn assess_technical_depth(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let total_terms: usize = count_technical_terms(text).iter().map(|(_, n)| n).sum();

    let mut score = (1.0 + total_terms as f64 / 3.0).min(5.0);
    if CODE_PATTERN.is_match(text) {
        score += 1.0;
    }
    if lower.contains("architecture") || lower.contains("diagram") {
        score += 0.5;
    }
    if DEEP_CONCEPTS.iter().any(|c| lower.contains(c)) {
        score += 0.5;
    }

    score.clamp(1.0, 5.0).round()
}

/// Technical term categories mentioned in the text
pub fn detect_key_concepts(text: &str) -> Vec<String> {
    count_technical_terms(text)
        .into_iter()
        .map(|(category, _)| category.to_string())
        .collect()
}

/// Known service names mentioned in the text
pub fn detect_services(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    KNOWN_SERVICES
        .iter()
        .filter(|service| contains_term(&lower, &service.to_lowercase()))
        .map(|service| service.to_string())
        .collect()
}

/// Word-boundary containment for short terms like "api" or "s3"
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only_on_first_slide() {
        assert_eq!(
            classify_slide_type("Introduction to Serverless", 1, 10),
            SlideType::Title
        );
        assert_eq!(
            classify_slide_type("Introduction to Serverless", 5, 10),
            SlideType::Content
        );
    }

    #[test]
    fn test_closing_slides() {
        assert_eq!(
            classify_slide_type("Summary and next steps", 9, 10),
            SlideType::Summary
        );
        assert_eq!(classify_slide_type("Q&A", 10, 10), SlideType::Qa);
        assert_eq!(
            classify_slide_type("Questions from the field", 4, 10),
            SlideType::Content
        );
    }

    #[test]
    fn test_anywhere_patterns() {
        assert_eq!(
            classify_slide_type("Live demo: deploying the pipeline", 6, 10),
            SlideType::Demo
        );
        assert_eq!(
            classify_slide_type("Reference architecture for ingestion", 4, 10),
            SlideType::Technical
        );
        assert_eq!(
            classify_slide_type("Aurora vs DynamoDB", 5, 10),
            SlideType::Comparison
        );
    }

    #[test]
    fn test_depth_from_terms() {
        assert_eq!(assess_technical_depth("Welcome everyone"), 1.0);
        // 6 terms -> 3.0, + architecture 0.5, + latency 0.5
        let text = "Architecture: load balancing, failover, VPC subnet routing, low latency";
        assert_eq!(count_technical_terms(text).iter().map(|(_, n)| n).sum::<usize>(), 6);
        assert_eq!(assess_technical_depth(text), 4.0);
    }

    #[test]
    fn test_code_blocks_raise_depth() {
        let plain = assess_technical_depth("Deploy the api");
        let with_code = assess_technical_depth("Deploy the api\n```\nsam deploy\n```");
        assert!(with_code > plain);
    }

    #[test]
    fn test_services_use_word_boundaries() {
        let services = detect_services("Store objects in S3, process with Lambda. Also S3x.");
        assert_eq!(
            services.into_iter().collect::<Vec<_>>(),
            vec!["Lambda".to_string(), "S3".to_string()]
        );
        assert!(detect_services("elastic sessions").is_empty());
    }

    #[test]
    fn test_key_concepts_are_categories() {
        let concepts = detect_key_concepts("Encryption at rest and sharding for scale");
        assert_eq!(concepts, vec!["security".to_string(), "database".to_string()]);
    }
}
