//! Model-store inspection tool.
//!
//! Loads a JSON array of model documents through the regular loader and
//! prints a per-class summary, so a template store can be smoke-checked for
//! alignment problems without a live sensor.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use modalmatch::{
    load_documents, FrameSources, Match, ModelDocument, MultiModalTemplate, PoseTable,
    TemplateEngine,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate a modalmatch model store file")]
struct Cli {
    /// Path to a JSON file holding an array of model documents.
    #[arg(value_name = "FILE")]
    model: PathBuf,
    /// Emit the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

/// Engine stand-in that only records registrations; matching is never
/// invoked during validation.
#[derive(Default)]
struct TallyEngine {
    classes: HashMap<String, Vec<MultiModalTemplate>>,
}

impl TemplateEngine for TallyEngine {
    fn register_template(&mut self, class_id: &str, template: MultiModalTemplate) -> usize {
        let templates = self.classes.entry(class_id.to_string()).or_default();
        templates.push(template);
        templates.len() - 1
    }

    fn find_matches(&self, _sources: FrameSources<'_>, _threshold_percent: f32) -> Vec<Match> {
        Vec::new()
    }

    fn class_count(&self) -> usize {
        self.classes.len()
    }

    fn template_count(&self, class_id: &str) -> usize {
        self.classes.get(class_id).map_or(0, Vec::len)
    }

    fn templates(&self, class_id: &str, template_index: usize) -> Option<&MultiModalTemplate> {
        self.classes.get(class_id)?.get(template_index)
    }

    fn modality_count(&self) -> usize {
        2
    }

    fn sampling_step(&self) -> i32 {
        0
    }
}

#[derive(Serialize)]
struct ClassSummary {
    object_id: String,
    templates: usize,
    rotations: usize,
    translations: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let raw = match fs::read_to_string(&cli.model) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {}: {err}", cli.model.display());
            return ExitCode::FAILURE;
        }
    };
    let documents: Vec<ModelDocument> = match serde_json::from_str(&raw) {
        Ok(documents) => documents,
        Err(err) => {
            eprintln!("failed to parse {}: {err}", cli.model.display());
            return ExitCode::FAILURE;
        }
    };

    let mut engine = TallyEngine::default();
    let mut table = PoseTable::default();
    if let Err(err) = load_documents(&documents, &mut engine, &mut table) {
        eprintln!("model load failed: {err}");
        return ExitCode::FAILURE;
    }

    let mut summaries: Vec<ClassSummary> = table
        .classes()
        .map(|(object_id, refs)| ClassSummary {
            object_id: object_id.to_string(),
            templates: engine.template_count(object_id),
            rotations: refs.rotations.len(),
            translations: refs.translations.len(),
        })
        .collect();
    summaries.sort_by(|a, b| a.object_id.cmp(&b.object_id));

    if cli.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("failed to serialize summary: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "{} document(s), {} class(es)",
            documents.len(),
            engine.class_count()
        );
        for summary in &summaries {
            println!(
                "  {}: {} template(s), {} rotation(s), {} translation(s)",
                summary.object_id, summary.templates, summary.rotations, summary.translations
            );
        }
    }

    ExitCode::SUCCESS
}
