//! STRIDE threat enumeration over trust-zoned data flow graphs, and Gherkin
//! test case stubs generated from the threats found.

pub mod classify;
pub mod diagram;
pub mod error;
pub mod gherkin;
pub mod graph;
pub mod output;
pub mod threat;

pub use classify::classify;
pub use diagram::{Diagram, load_graph};
pub use error::{MaterializeError, Result};
pub use gherkin::{GherkinScenario, create_feature_file, create_gherkins_from_threats};
pub use graph::{DataFlowGraph, Node, Zone};
pub use threat::{StrideCategory, Threat, ThreatMap};
