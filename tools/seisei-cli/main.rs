use clap::{Parser, ValueEnum};
use seisei::prelude::*;
use std::fs;
use std::process;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectCli {
    Dezyne,
    Rozyne,
}

/// A flow-graph code generation engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the project save file (.json or binary .save)
    save_path: String,

    /// The target dialect to generate
    #[arg(short, long, value_enum, default_value_t = DialectCli::Dezyne)]
    dialect: DialectCli,

    /// Working directory under which generated/ is created
    #[arg(short, long, default_value = ".")]
    out: String,

    /// Validate the graph and list dangling references before generating
    #[arg(long)]
    check: bool,
}

fn main() {
    tracing_init();
    let cli = Cli::parse();

    let total_start = Instant::now();

    // --- 1. Save loading ---
    let save = if cli.save_path.ends_with(".json") {
        let text = fs::read_to_string(&cli.save_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read save file '{}': {}", cli.save_path, e))
        });
        serde_json::from_str::<SaveInfo>(&text).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to parse save JSON: {}", e))
        })
    } else {
        let bytes = fs::read(&cli.save_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read save file '{}': {}", cli.save_path, e))
        });
        decode_save(&bytes)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode save: {}", e)))
    };

    // --- 2. Optional validation pass ---
    if cli.check {
        let problems = save.validate();
        if problems.is_empty() {
            println!("Graph is fully resolvable.");
        } else {
            println!("Found {} unresolvable reference(s):", problems.len());
            for problem in &problems {
                println!("  - {}", problem);
            }
        }
    }

    // --- 3. Generation ---
    let generator = match cli.dialect {
        DialectCli::Dezyne => DialectGenerator::dezyne(),
        DialectCli::Rozyne => DialectGenerator::rozyne(),
    }
    .with_output_root(&cli.out);

    println!(
        "Generating {} code for {} top-level node(s)...",
        generator.language_name(),
        save.structural_nodes.len()
    );
    let generate_start = Instant::now();
    let fragment = generator
        .generate_code(&save)
        .unwrap_or_else(|e| exit_with_error(&format!("Generation failed: {}", e)));
    let generate_duration = generate_start.elapsed();

    println!(
        "Generation successful in {:?} (total {:?}).",
        generate_duration,
        total_start.elapsed()
    );
    if !fragment.is_empty() {
        println!("\n--- last emitted file ---\n{}", fragment);
    }
}

/// Stderr logging; generation warnings (skipped edges, missing callees)
/// surface here. `RUST_LOG` overrides the default warn level.
fn tracing_init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}
