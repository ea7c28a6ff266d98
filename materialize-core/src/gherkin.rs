// Gherkin test case stubs from classified threats

use crate::graph::Zone;
use crate::threat::{StrideCategory, Threat, ThreatMap};
use tracing::debug;

const EMPTY_RULE_NOTE: &str = "# No threats enumerated for this category";

/// One scenario stub for one threat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GherkinScenario {
    pub category: StrideCategory,
    pub process: String,
    pub source: String,
    pub source_zone: Zone,
    pub destination: String,
    pub destination_zone: Zone,
}

impl GherkinScenario {
    pub fn from_threat(category: StrideCategory, threat: &Threat) -> Self {
        Self {
            category,
            process: threat.process.clone(),
            source: threat.source.clone(),
            source_zone: threat.source_zone,
            destination: threat.destination.clone(),
            destination_zone: threat.destination_zone,
        }
    }

    pub fn name(&self) -> String {
        format!(
            "{} from {} to {} via {}",
            self.category.title(),
            inline(&self.source),
            inline(&self.destination),
            inline(&self.process)
        )
    }

    pub fn steps(&self) -> Vec<String> {
        vec![
            format!(
                "Given a data flow from \"{}\" in trust zone {}",
                quoted(&self.source),
                self.source_zone
            ),
            format!(
                "And the flow is handled by the process \"{}\"",
                quoted(&self.process)
            ),
            format!(
                "When data crosses into \"{}\" in trust zone {}",
                quoted(&self.destination),
                self.destination_zone
            ),
            format!("Then the flow is examined for {}", self.category.title()),
        ]
    }

    /// Scenario block indented to sit under a `Rule:`.
    pub fn render(&self) -> String {
        let mut block = format!("    Scenario: {}\n", self.name());
        for step in self.steps() {
            block.push_str("      ");
            block.push_str(&step);
            block.push('\n');
        }
        block
    }
}

// Diagram labels can span several lines; Gherkin names and steps cannot.
fn inline(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn quoted(label: &str) -> String {
    inline(label).replace('"', "\\\"")
}

/// One scenario per threat, grouped by category in STRIDE order.
pub fn create_gherkins_from_threats(threats: &ThreatMap) -> Vec<GherkinScenario> {
    threats
        .iter()
        .flat_map(|(category, found)| {
            found
                .iter()
                .map(move |threat| GherkinScenario::from_threat(category, threat))
        })
        .collect()
}

/// Serialize scenarios into a feature file. Every category gets a `Rule:`
/// group, including ones with no scenarios.
pub fn create_feature_file(diagram_name: &str, scenarios: &[GherkinScenario]) -> String {
    let mut feature = String::new();
    feature.push_str(&format!("Feature: STRIDE threats for {}\n", diagram_name));
    feature.push_str(&format!(
        "  Test case stubs generated from the data flow diagram {}.\n",
        diagram_name
    ));
    feature.push_str("  Each scenario examines one data flow for one threat category.\n");

    for category in StrideCategory::ALL {
        feature.push_str(&format!("\n  Rule: {}\n", category.title()));

        let mut grouped = scenarios.iter().filter(|s| s.category == category).peekable();
        if grouped.peek().is_none() {
            feature.push_str("    ");
            feature.push_str(EMPTY_RULE_NOTE);
            feature.push('\n');
            continue;
        }
        for scenario in grouped {
            feature.push('\n');
            feature.push_str(&scenario.render());
        }
    }

    debug!(
        diagram = diagram_name,
        scenarios = scenarios.len(),
        "generated feature file"
    );
    feature
}
