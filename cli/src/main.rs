//! docsift CLI - PDF outlines and persona-driven section ranking

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::{
    discover_inputs, run_collection_batch, run_outline_batch, BatchOptions, BatchReport,
    CollectionOptions, CollectionPipeline, Error, HeadingClassifier, InputKind, JsonFormat,
    OutlinePipeline, PersonaResolver,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(
    about = "Extract PDF outlines and rank document sections for a persona",
    long_about = None
)]
struct Cli {
    /// Write compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    /// Process inputs one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Skip output shape validation
    #[arg(long, global = true)]
    no_validate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a title and heading outline from every PDF in a directory
    Outline {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT")]
        input: Option<PathBuf>,

        /// Directory for <name>.json outputs
        #[arg(value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Rank sections for every collection input in a directory
    #[command(alias = "collection")]
    Collections {
        /// Directory containing collection JSON files and their PDFs/ folder
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT")]
        input: Option<PathBuf>,

        /// Directory for <name>_output.json outputs
        #[arg(value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT")]
        output: Option<PathBuf>,

        /// Maximum number of ranked sections per collection
        #[arg(long, default_value = "10")]
        max_sections: usize,
    },

    /// Print the heading level assigned to each line
    Classify {
        /// Lines of text to classify
        #[arg(value_name = "LINE", required = true)]
        lines: Vec<String>,
    },

    /// Print the persona category for a role and task
    Persona {
        /// Persona role, e.g. "Travel Planner"
        #[arg(long)]
        role: String,

        /// Job to be done
        #[arg(long, default_value = "")]
        task: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let options = BatchOptions::new()
        .with_json_format(if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        })
        .with_validate(!cli.no_validate);
    let options = if cli.sequential {
        options.sequential()
    } else {
        options
    };
    log::debug!("Batch options: {:?}", options);

    let result = match cli.command {
        Some(Commands::Outline { input, output }) => {
            cmd_outline(&resolve_dir(input, "input"), &resolve_dir(output, "output"), &options)
        }
        Some(Commands::Collections {
            input,
            output,
            max_sections,
        }) => cmd_collections(
            &resolve_dir(input, "input"),
            &resolve_dir(output, "output"),
            max_sections,
            &options,
        ),
        Some(Commands::Classify { lines }) => {
            cmd_classify(&lines);
            Ok(())
        }
        Some(Commands::Persona { role, task }) => {
            cmd_persona(&role, &task);
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: docsift <outline|collections> [INPUT_DIR] [OUTPUT_DIR]".yellow()
            );
            println!("       docsift --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Use the given directory, else `/app/<name>` when present, else `./<name>`.
fn resolve_dir(dir: Option<PathBuf>, name: &str) -> PathBuf {
    dir.unwrap_or_else(|| {
        let container = Path::new("/app").join(name);
        if container.is_dir() {
            container
        } else {
            Path::new(".").join(name)
        }
    })
}

fn progress_bar(input: &Path, kind: InputKind) -> Option<ProgressBar> {
    let count = match discover_inputs(input, kind) {
        Ok(files) => files.len(),
        Err(_) => return None,
    };

    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    Some(pb)
}

fn tick(pb: Option<&ProgressBar>, path: &Path) {
    if let Some(pb) = pb {
        pb.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.inc(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "Outlining PDFs in".cyan(), input.display());

    let pb = progress_bar(input, InputKind::Pdf);
    let result = run_outline_batch(&OutlinePipeline::new(), input, output, options, |path| {
        tick(pb.as_ref(), path)
    });
    finish(pb, result, output)
}

fn cmd_collections(
    input: &Path,
    output: &Path,
    max_sections: usize,
    options: &BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "Ranking collections in".cyan(), input.display());

    let pipeline =
        CollectionPipeline::with_options(CollectionOptions::new().with_max_sections(max_sections));
    let pb = progress_bar(input, InputKind::CollectionJson);
    let result = run_collection_batch(&pipeline, input, output, options, |path| {
        tick(pb.as_ref(), path)
    });
    finish(pb, result, output)
}

fn finish(
    pb: Option<ProgressBar>,
    result: docsift::Result<BatchReport>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(pb) = &pb {
        pb.finish_with_message("Done!");
    }

    let report = match result {
        Ok(report) => report,
        Err(Error::NoInputs(dir)) => {
            println!("{} {}", "No input files found in".yellow(), dir.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "\n{} {} of {} written to {}",
        "Done!".green().bold(),
        report.outputs.len(),
        report.processed,
        output.display()
    );
    if report.degraded > 0 {
        println!(
            "  {} {} written from fallback records",
            "!".yellow().bold(),
            report.degraded
        );
    }
    for (i, path) in report.outputs.iter().enumerate() {
        let branch = if i + 1 == report.outputs.len() {
            "└─"
        } else {
            "├─"
        };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_classify(lines: &[String]) {
    let classifier = HeadingClassifier::new();
    for line in lines {
        match classifier.classify(line) {
            Some(level) => println!("{}  {}", level.to_string().green().bold(), line),
            None => println!("{}  {}", "--".dimmed(), line),
        }
    }
}

fn cmd_persona(role: &str, task: &str) {
    let category = PersonaResolver::new().resolve(role, task);
    println!("{}", category.to_string().cyan().bold());
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dir_prefers_explicit() {
        let dir = PathBuf::from("/data/pdfs");
        assert_eq!(resolve_dir(Some(dir.clone()), "input"), dir);
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "docsift",
            "collections",
            "in",
            "out",
            "--max-sections",
            "5",
            "--compact",
        ])
        .unwrap();
        assert!(cli.compact);
        assert!(!cli.sequential);
        assert!(matches!(
            cli.command,
            Some(Commands::Collections { max_sections: 5, .. })
        ));
    }

    #[test]
    fn test_classify_requires_lines() {
        assert!(Cli::try_parse_from(["docsift", "classify"]).is_err());
    }
}
