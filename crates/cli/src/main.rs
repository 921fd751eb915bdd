//! CLI tool for normalizing raw presentation trees into editor slides.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{ConvertOptions, DeckConverter, Theme, ViewportMode};
use deck_import::{
    ImportOptions, Importer, InputVariant, JsonTreeParser, MemoryStore, MergeStrategy,
    NoTranscoder,
};
use std::path::{Path, PathBuf};

/// Convert raw slide deck JSON into normalized editor slides.
#[derive(Parser, Debug)]
#[command(name = "deck-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Shape of the input documents
    #[arg(long, value_enum, default_value_t = Variant::Raw)]
    variant: Variant,

    /// Scale slides to a 1000px wide viewport instead of converting points to pixels
    #[arg(long)]
    fixed_viewport: bool,

    /// Default font name for text without an explicit font
    #[arg(long)]
    font_name: Option<String>,

    /// Default text colour
    #[arg(long)]
    font_color: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    /// Raw tree dumped by the presentation parser
    Raw,
    /// Previously exported slide array
    Slides,
}

impl From<Variant> for InputVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Raw => InputVariant::RawTree,
            Variant::Slides => InputVariant::Slides,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let importer = Importer::new(JsonTreeParser, NoTranscoder, converter_for(&args))
        .with_options(ImportOptions::new().with_merge_strategy(MergeStrategy::Replace));

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &importer).await {
            Ok(output) => {
                if args.print {
                    println!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref())?;
                    tokio::fs::write(&output_path, output)
                        .await
                        .with_context(|| format!("Failed to write to {}", output_path.display()))?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

fn converter_for(args: &Args) -> DeckConverter {
    let mut theme = Theme::default();
    if let Some(name) = &args.font_name {
        theme.font_name = name.clone();
    }
    if let Some(color) = &args.font_color {
        theme.font_color = color.clone();
    }

    let mode = if args.fixed_viewport {
        ViewportMode::Fixed
    } else {
        ViewportMode::Dpi
    };

    DeckConverter::new(
        ConvertOptions::new()
            .with_viewport_mode(mode)
            .with_theme(theme),
    )
}

/// Import a single file and render the resulting slides as JSON.
async fn process_file(
    input_path: &Path,
    args: &Args,
    importer: &Importer<JsonTreeParser, NoTranscoder>,
) -> Result<String> {
    log::debug!("Importing {} as {:?}", input_path.display(), args.variant);

    let mut store = MemoryStore::new();
    let report = importer
        .import_file(input_path, args.variant.into(), &mut store)
        .await
        .with_context(|| format!("Failed to import {}", input_path.display()))?;

    if args.verbose {
        eprintln!("  Converted {} slides", report.slide_count);
        if let Some(size) = report.viewport_size {
            eprintln!("  Viewport width: {}", size);
        }
    }
    for diagnostic in &report.diagnostics {
        eprintln!("  {}", diagnostic);
    }
    for notice in &report.notices {
        eprintln!("  {}", notice);
    }

    serde_json::to_string_pretty(&store.into_slides()).context("Failed to serialize slides")
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.slides.json", stem);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}
