// Tests for Gherkin scenario generation

use materialize_core::graph::DataFlowGraph;
use materialize_core::{
    StrideCategory, classify, create_feature_file, create_gherkins_from_threats,
};

fn three_flow_graph() -> DataFlowGraph {
    let mut graph = DataFlowGraph::new();
    graph.add_node("browser", "Browser", 0).unwrap();
    graph.add_node("api", "API", 1).unwrap();
    graph.add_node("db", "Database", 2).unwrap();
    graph.add_flow("request", "browser", "api", "api").unwrap();
    graph.add_flow("query", "api", "db", "api").unwrap();
    graph.add_flow("response", "api", "browser", "api").unwrap();
    graph
}

fn scenario_lines(feature: &str) -> usize {
    feature
        .lines()
        .filter(|line| line.trim_start().starts_with("Scenario:"))
        .count()
}

// ============================================================================
// Scenario Candidate Tests
// ============================================================================

#[test]
fn test_one_scenario_per_threat() {
    let threats = classify(&three_flow_graph());
    let scenarios = create_gherkins_from_threats(&threats);

    assert_eq!(scenarios.len(), threats.total());
    // request: 5, query: 2, response: 1
    assert_eq!(scenarios.len(), 8);
}

#[test]
fn test_scenarios_grouped_in_stride_order() {
    let threats = classify(&three_flow_graph());
    let scenarios = create_gherkins_from_threats(&threats);

    let categories: Vec<StrideCategory> = scenarios.iter().map(|s| s.category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
}

#[test]
fn test_scenario_carries_flow_details() {
    let threats = classify(&three_flow_graph());
    let scenarios = create_gherkins_from_threats(&threats);
    let disclosure = scenarios
        .iter()
        .find(|s| s.category == StrideCategory::InformationDisclosure)
        .unwrap();

    assert_eq!(disclosure.source, "API");
    assert_eq!(disclosure.source_zone, 1);
    assert_eq!(disclosure.destination, "Browser");
    assert_eq!(disclosure.destination_zone, 0);
    assert_eq!(disclosure.process, "API");
}

#[test]
fn test_no_scenarios_for_empty_map() {
    let threats = classify(&DataFlowGraph::new());
    assert!(create_gherkins_from_threats(&threats).is_empty());
}

// ============================================================================
// Feature File Tests
// ============================================================================

#[test]
fn test_feature_file_scenario_count_matches_threat_map() {
    let threats = classify(&three_flow_graph());
    let scenarios = create_gherkins_from_threats(&threats);
    let feature = create_feature_file("shop.json", &scenarios);

    assert_eq!(scenario_lines(&feature), threats.total());
}

#[test]
fn test_feature_file_records_diagram_name() {
    let feature = create_feature_file("diagrams/shop.json", &[]);
    assert!(feature.starts_with("Feature: STRIDE threats for diagrams/shop.json\n"));
}

#[test]
fn test_feature_file_rules_in_fixed_order() {
    let threats = classify(&three_flow_graph());
    let feature = create_feature_file("shop.json", &create_gherkins_from_threats(&threats));

    let rules: Vec<&str> = feature
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("Rule: "))
        .collect();
    assert_eq!(
        rules,
        vec![
            "Spoofing",
            "Tampering",
            "Repudiation",
            "Information Disclosure",
            "Denial of Service",
            "Elevation of Privilege",
        ]
    );
}

#[test]
fn test_empty_categories_still_emit_rule() {
    let mut graph = DataFlowGraph::new();
    graph.add_node("a", "A", 0).unwrap();
    graph.add_node("b", "B", 0).unwrap();
    graph.add_flow("a-b", "a", "b", "a").unwrap();

    let threats = classify(&graph);
    let feature = create_feature_file("flat.json", &create_gherkins_from_threats(&threats));

    assert_eq!(scenario_lines(&feature), 0);
    assert_eq!(feature.matches("  Rule: ").count(), 6);
    assert_eq!(
        feature
            .matches("# No threats enumerated for this category")
            .count(),
        6
    );
}

#[test]
fn test_populated_category_has_no_empty_marker() {
    let mut graph = DataFlowGraph::new();
    graph.add_node("a", "A", 1).unwrap();
    graph.add_node("b", "B", 0).unwrap();
    graph.add_flow("a-b", "a", "b", "a").unwrap();

    let threats = classify(&graph);
    let feature = create_feature_file("leak.json", &create_gherkins_from_threats(&threats));

    let disclosure = feature
        .split("  Rule: ")
        .find(|section| section.starts_with("Information Disclosure"))
        .unwrap();
    assert!(disclosure.contains("Scenario: Information Disclosure from A to B via A"));
    assert!(!disclosure.contains("No threats enumerated"));
    // the other five are empty
    assert_eq!(feature.matches("No threats enumerated").count(), 5);
}

#[test]
fn test_scenario_steps_describe_flow() {
    let threats = classify(&three_flow_graph());
    let feature = create_feature_file("shop.json", &create_gherkins_from_threats(&threats));

    assert!(feature.contains("    Scenario: Spoofing from Browser to API via API\n"));
    assert!(feature.contains("      Given a data flow from \"Browser\" in trust zone 0\n"));
    assert!(feature.contains("      And the flow is handled by the process \"API\"\n"));
    assert!(feature.contains("      When data crosses into \"API\" in trust zone 1\n"));
    assert!(feature.contains("      Then the flow is examined for Spoofing\n"));
}

#[test]
fn test_category_scenarios_are_contiguous() {
    let threats = classify(&three_flow_graph());
    let feature = create_feature_file("shop.json", &create_gherkins_from_threats(&threats));

    let tampering = feature
        .split("  Rule: ")
        .find(|section| section.starts_with("Tampering"))
        .unwrap();
    assert_eq!(tampering.matches("Scenario: Tampering").count(), 2);
    assert_eq!(scenario_lines(tampering), 2);
}
