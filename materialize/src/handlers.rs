use clap::ArgMatches;
use colored::Colorize;
use materialize_core::output::{default_feature_path, render_threat_map, write_feature_file};
use materialize_core::{
    Result, ThreatMap, classify, create_feature_file, create_gherkins_from_threats, load_graph,
};
use std::path::PathBuf;
use tracing::info;

/// Where to read the diagram from and where to write the feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub diagram: PathBuf,
    pub feature_file: PathBuf,
}

#[derive(Debug)]
pub struct MaterializeOutcome {
    pub threats: ThreatMap,
    pub scenario_count: usize,
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expand `~` in both paths and derive the feature file name from the
/// diagram when none is given.
pub fn resolve_options(diagram: &str, feature_file: Option<&str>) -> MaterializeOptions {
    let diagram = expand_path(diagram);
    let feature_file = match feature_file {
        Some(path) => expand_path(path),
        None => default_feature_path(&diagram),
    };
    MaterializeOptions {
        diagram,
        feature_file,
    }
}

/// Ingest, classify, generate and write. Any failure stops the pipeline
/// before the feature file is touched.
pub fn run(options: &MaterializeOptions) -> Result<MaterializeOutcome> {
    let graph = load_graph(&options.diagram)?;
    let threats = classify(&graph);

    let scenarios = create_gherkins_from_threats(&threats);
    let feature = create_feature_file(&options.diagram.display().to_string(), &scenarios);
    write_feature_file(&options.feature_file, &feature)?;

    Ok(MaterializeOutcome {
        threats,
        scenario_count: scenarios.len(),
    })
}

pub fn handle_materialize(args: &ArgMatches) {
    let diagram = args
        .get_one::<String>("diagram")
        .map(String::as_str)
        .unwrap_or(crate::DEFAULT_DIAGRAM);
    let feature_file = args.get_one::<String>("featurefile").map(String::as_str);
    let options = resolve_options(diagram, feature_file);

    info!(diagram = %options.diagram.display(), "enumerating STRIDE threats");

    let outcome = run(&options).and_then(|outcome| {
        let rendered = render_threat_map(&outcome.threats)?;
        Ok((outcome, rendered))
    });

    match outcome {
        Ok((outcome, rendered)) => {
            eprintln!(
                "{} {} scenarios written to {}",
                "✓".green().bold(),
                outcome.scenario_count.to_string().cyan(),
                options.feature_file.display().to_string().bright_white()
            );
            println!("{}", rendered);
        }
        Err(e) => {
            eprintln!("{} {} failed: {}", "✗".red().bold(), e.stage(), e);
            std::process::exit(1);
        }
    }
}
