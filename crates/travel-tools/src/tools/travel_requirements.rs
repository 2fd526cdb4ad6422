//! Visa and safety advisory tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use travel_providers::{
    SafetyAdvisory, SafetyProvider, SafetyQuery, VisaProvider, VisaQuery, VisaRequirement,
    VisaStatus,
};

use crate::error::ToolError;
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const MAPPINGS: &[ArgMapping] = &[
    ArgMapping::to::<VisaQuery>(&[
        ("origin_country", "origin_country"),
        ("destination_country", "destination_country"),
    ]),
    ArgMapping::to::<SafetyQuery>(&[("destination_country", "country")]),
];

/// Visa requirements and safety advisories for one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequirements {
    pub visa_requirements: VisaRequirement,
    pub safety_advisories: SafetyAdvisory,
}

/// Visa requirements and travel safety advisories for a destination.
///
/// Asks the visa collaborator about the passport/destination pair, then
/// the safety collaborator about the destination.
pub struct TravelRequirements {
    visa: Arc<dyn VisaProvider>,
    safety: Arc<dyn SafetyProvider>,
    spec: ToolSpec,
}

impl TravelRequirements {
    /// Create a new travel requirements tool.
    pub fn new(visa: Arc<dyn VisaProvider>, safety: Arc<dyn SafetyProvider>) -> Self {
        let spec = ToolSpec::new(
            "check_travel_requirements",
            "Check visa requirements and travel safety advisories for international destinations.",
        )
        .param(
            ParamSpec::string("origin_country")
                .required()
                .description("Traveler's home (passport) country"),
        )
        .param(
            ParamSpec::string("destination_country")
                .required()
                .description("Destination country"),
        );

        Self { visa, safety, spec }
    }
}

#[async_trait]
impl Tool for TravelRequirements {
    type Output = TripRequirements;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<TripRequirements, ToolError> {
        let visa_query: VisaQuery = MAPPINGS[0].query(args)?;
        let safety_query: SafetyQuery = MAPPINGS[1].query(args)?;

        let visa_requirements = self.visa.check_visa_requirements(visa_query).await?;
        let safety_advisories = self.safety.get_safety_advisories(safety_query).await?;

        Ok(TripRequirements {
            visa_requirements,
            safety_advisories,
        })
    }

    fn format(&self, args: &ToolArgs, result: &TripRequirements) -> Result<String, ToolError> {
        let origin = args.get_string("origin_country")?;
        let destination = args.get_string("destination_country")?;

        let mut response = format!("**Travel Requirements: {} → {}**\n\n", origin, destination);
        response.push_str(&format_visa(&origin, &result.visa_requirements));
        response.push('\n');
        response.push_str(&format_safety(&result.safety_advisories));
        response.push_str(
            "\n**Note:** Always verify current requirements with official embassy sources before travel.",
        );

        Ok(response)
    }
}

fn format_visa(origin: &str, visa: &VisaRequirement) -> String {
    let mut out = String::from("**Visa Requirements:**\n");

    match &visa.visa_required {
        VisaStatus::NotRequired => out.push_str(&format!(
            "No visa required for {} passport holders\n",
            origin
        )),
        VisaStatus::Required => {
            out.push_str(&format!("Visa required for {} passport holders\n", origin));
            out.push_str(&format!(
                "Visa type: {}\n",
                visa.visa_type.as_deref().unwrap_or("Tourist visa")
            ));
        }
        VisaStatus::Other(status) => out.push_str(&format!("Visa status: {}\n", status)),
    }

    if let Some(max_stay) = &visa.max_stay {
        out.push_str(&format!("Maximum stay: {}\n", max_stay));
    }
    if let Some(processing) = &visa.processing_time {
        out.push_str(&format!("Processing time: {}\n", processing));
    }
    if let Some(fee) = &visa.fee {
        out.push_str(&format!("Fee: {}\n", fee));
    }
    if !visa.requirements.is_empty() {
        out.push_str(&format!("Requirements: {}\n", visa.requirements.join(", ")));
    }

    out
}

fn format_safety(safety: &SafetyAdvisory) -> String {
    let mut out = String::from("**Safety Information:**\n");

    if let Some(level) = &safety.advisory_level {
        out.push_str(&format!("{} Safety Level: {}\n", level_marker(level), level));
    }
    if let Some(summary) = &safety.summary {
        out.push_str(&format!("{}\n", summary));
    }
    for advisory in safety.advisories.iter().take(3) {
        out.push_str(&format!("- {}\n", advisory));
    }
    if !safety.recommended_vaccines.is_empty() {
        out.push_str(&format!(
            "Recommended vaccines: {}\n",
            safety.recommended_vaccines.join(", ")
        ));
    }
    if let Some(updated) = &safety.last_updated {
        out.push_str(&format!("Last updated: {}\n", updated));
    }

    out
}

/// Traffic-light marker for an advisory level.
fn level_marker(level: &str) -> &'static str {
    let level = level.to_lowercase();
    if level.contains("low") {
        "🟢"
    } else if level.contains("medium") || level.contains("moderate") {
        "🟡"
    } else if level.contains("high") {
        "🔴"
    } else {
        "⚪"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::FixedProviders;
    use serde_json::json;

    fn tool(stub: FixedProviders) -> TravelRequirements {
        let stub = Arc::new(stub);
        TravelRequirements::new(stub.clone(), stub)
    }

    #[tokio::test]
    async fn test_queries_both_collaborators() {
        let stub = FixedProviders::sample();
        let calls = stub.calls();
        let tool = tool(stub);

        let args = test_args(
            tool.spec(),
            json!({"origin_country": "United States", "destination_country": "Japan"}),
        );
        tool.call(&args).await.unwrap();

        assert_eq!(
            calls.sequence(),
            vec!["check_visa_requirements", "get_safety_advisories"]
        );
        assert_eq!(
            calls.last_query("get_safety_advisories").unwrap(),
            json!({"country": "Japan"})
        );
    }

    #[tokio::test]
    async fn test_format_required_visa() {
        let stub = FixedProviders::sample().with_visa(VisaRequirement {
            visa_required: VisaStatus::Required,
            visa_type: Some("e-Visa".to_string()),
            max_stay: None,
            processing_time: Some("5 business days".to_string()),
            fee: Some("$50".to_string()),
            requirements: Vec::new(),
        });
        let tool = tool(stub);
        let args = test_args(
            tool.spec(),
            json!({"origin_country": "India", "destination_country": "Japan"}),
        );
        let result = tool.call(&args).await.unwrap();
        let text = tool.format(&args, &result).unwrap();

        assert!(text.contains("Visa required for India passport holders"));
        assert!(text.contains("Visa type: e-Visa"));
        assert!(text.contains("Processing time: 5 business days"));
        assert!(text.contains("Fee: $50"));
        assert!(!text.contains("Maximum stay"));
    }

    #[test]
    fn test_level_marker() {
        assert_eq!(level_marker("Level 1: Low risk"), "🟢");
        assert_eq!(level_marker("MEDIUM"), "🟡");
        assert_eq!(level_marker("High - reconsider travel"), "🔴");
        assert_eq!(level_marker("Unknown"), "⚪");
    }

    #[test]
    fn test_at_most_three_advisories() {
        let safety = SafetyAdvisory {
            advisories: (1..=5).map(|i| format!("advisory {}", i)).collect(),
            ..Default::default()
        };
        let text = format_safety(&safety);
        assert!(text.contains("advisory 3"));
        assert!(!text.contains("advisory 4"));
    }
}
