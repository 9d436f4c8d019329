use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use plastic_core::{FrameSpec, Rect, Scene};
use plastic_layout::{build_scene, NodeId, ViewsContainer};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Json,
}

#[derive(Parser)]
#[command(name = "plastic-inspect")]
#[command(about = "Resolves a layout scene and prints the frame of every node")]
struct Args {
    /// Path to the scene file (JSON)
    scene: String,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Override the scene multiplier
    #[arg(long)]
    multiplier: Option<f32>,

    /// Show absolute frames next to parent-relative ones
    #[arg(long)]
    show_absolute: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct NodeReport {
    id: usize,
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<usize>,
    children: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<FrameSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    absolute: Option<FrameSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !Path::new(&args.scene).exists() {
        anyhow::bail!("Scene file not found: {}", args.scene);
    }

    info!("Loading scene: {}", args.scene);
    let scene = Scene::load(&args.scene).context("Failed to load scene")?;
    let container = build_scene(&scene, args.multiplier).context("Failed to build layout")?;

    let reports = collect_reports(&container);
    let failures = reports.iter().filter(|r| r.error.is_some()).count();
    if failures > 0 {
        warn!("{} of {} nodes could not be resolved", failures, reports.len());
    }

    let output_text = match args.format {
        Format::Tree => render_tree(&reports, args.show_absolute),
        Format::Json => serde_json::to_string_pretty(&reports).context("Failed to serialize report")? + "\n",
    };

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file))?;
        info!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn collect_reports(container: &ViewsContainer<String>) -> Vec<NodeReport> {
    container
        .iter()
        .map(|node| {
            let (frame, absolute, error) = match (container.frame(node.id()), container.absolute_frame(node.id())) {
                (Ok(frame), Ok(absolute)) => (Some(frame.into()), Some(absolute.into()), None),
                (Err(err), _) | (_, Err(err)) => (None, None, Some(err.to_string())),
            };
            NodeReport {
                id: node.id().index(),
                tag: node.tag().to_string(),
                key: node.key().cloned(),
                parent: node.parent().map(NodeId::index),
                children: node.children().iter().map(|c| c.index()).collect(),
                frame,
                absolute,
                error,
            }
        })
        .collect()
}

fn format_rect(rect: &FrameSpec) -> String {
    let rect = Rect::from(*rect);
    format!(
        "({:.1}, {:.1}, {:.1}, {:.1})",
        rect.origin.x, rect.origin.y, rect.size.x, rect.size.y
    )
}

fn render_tree(reports: &[NodeReport], show_absolute: bool) -> String {
    let mut output = String::new();
    if !reports.is_empty() {
        render_node(&mut output, reports, 0, "", true, show_absolute);
    }
    output
}

fn render_node(output: &mut String, reports: &[NodeReport], index: usize, prefix: &str, is_last: bool, show_absolute: bool) {
    let Some(report) = reports.get(index) else {
        return;
    };

    let (branch, child_prefix) = if report.parent.is_none() {
        (String::new(), String::new())
    } else if is_last {
        (format!("{}└── ", prefix), format!("{}    ", prefix))
    } else {
        (format!("{}├── ", prefix), format!("{}│   ", prefix))
    };

    output.push_str(&branch);
    output.push_str(&report.tag);
    if let Some(key) = &report.key {
        output.push_str(&format!(" \"{}\"", key));
    }

    match (&report.frame, &report.error) {
        (Some(frame), _) => {
            output.push_str(&format!(" frame:{}", format_rect(frame)));
            if let (true, Some(absolute)) = (show_absolute, &report.absolute) {
                output.push_str(&format!(" absolute:{}", format_rect(absolute)));
            }
        }
        (None, Some(error)) => output.push_str(&format!(" error: {}", error)),
        (None, None) => {}
    }
    output.push('\n');

    let child_count = report.children.len();
    for (i, child) in report.children.iter().enumerate() {
        render_node(output, reports, *child, &child_prefix, i + 1 == child_count, show_absolute);
    }
}
