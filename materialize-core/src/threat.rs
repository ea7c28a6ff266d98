use crate::graph::{FlowRef, Zone};
use serde::Serialize;
use std::fmt;

/// The six STRIDE categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrideCategory {
    Spoofing,
    Tampering,
    Repudiation,
    InformationDisclosure,
    DenialOfService,
    ElevationOfPrivilege,
}

impl StrideCategory {
    pub const ALL: [StrideCategory; 6] = [
        StrideCategory::Spoofing,
        StrideCategory::Tampering,
        StrideCategory::Repudiation,
        StrideCategory::InformationDisclosure,
        StrideCategory::DenialOfService,
        StrideCategory::ElevationOfPrivilege,
    ];

    /// Key used in the JSON threat map.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrideCategory::Spoofing => "spoofing",
            StrideCategory::Tampering => "tampering",
            StrideCategory::Repudiation => "repudiation",
            StrideCategory::InformationDisclosure => "informationDisclosure",
            StrideCategory::DenialOfService => "denialOfService",
            StrideCategory::ElevationOfPrivilege => "elevationOfPrivilege",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StrideCategory::Spoofing => "Spoofing",
            StrideCategory::Tampering => "Tampering",
            StrideCategory::Repudiation => "Repudiation",
            StrideCategory::InformationDisclosure => "Information Disclosure",
            StrideCategory::DenialOfService => "Denial of Service",
            StrideCategory::ElevationOfPrivilege => "Elevation of Privilege",
        }
    }
}

impl fmt::Display for StrideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One flow matching one category, with the node details copied out so
/// consumers never go back to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    #[serde(skip)]
    pub flow_id: String,
    pub source: String,
    pub source_zone: Zone,
    pub destination: String,
    pub destination_zone: Zone,
    pub process: String,
}

impl Threat {
    pub fn from_flow(flow: &FlowRef<'_>) -> Self {
        Self {
            flow_id: flow.id.to_string(),
            source: flow.source.label.clone(),
            source_zone: flow.source.zone,
            destination: flow.destination.label.clone(),
            destination_zone: flow.destination.zone,
            process: flow.process.label.clone(),
        }
    }
}

/// Threats per category. Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMap {
    pub spoofing: Vec<Threat>,
    pub tampering: Vec<Threat>,
    pub repudiation: Vec<Threat>,
    pub information_disclosure: Vec<Threat>,
    pub denial_of_service: Vec<Threat>,
    pub elevation_of_privilege: Vec<Threat>,
}

impl ThreatMap {
    pub fn get(&self, category: StrideCategory) -> &[Threat] {
        match category {
            StrideCategory::Spoofing => &self.spoofing,
            StrideCategory::Tampering => &self.tampering,
            StrideCategory::Repudiation => &self.repudiation,
            StrideCategory::InformationDisclosure => &self.information_disclosure,
            StrideCategory::DenialOfService => &self.denial_of_service,
            StrideCategory::ElevationOfPrivilege => &self.elevation_of_privilege,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrideCategory, &[Threat])> {
        StrideCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Number of threats across all categories.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, threats)| threats.len()).sum()
    }
}
