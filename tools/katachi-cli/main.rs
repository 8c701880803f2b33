use ahash::AHashMap;
use clap::Parser;
use katachi::prelude::*;
use std::fs;

/// Form-schema inspection tool: loads a persisted schema, optionally
/// hydrates it with captured form data, recomputes formulas, and prints the
/// designer outline or the survey field list.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the persisted schema JSON file
    schema_path: String,

    /// Optional path to a captured form-data JSON file to hydrate from
    form_data_path: Option<String>,

    /// Print the flattened survey field list instead of the outline
    #[arg(short, long)]
    survey: bool,

    /// Print the captured form data after recomputing formulas
    #[arg(short, long)]
    capture: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let schema_json = fs::read_to_string(&cli.schema_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read schema file '{}': {}",
            &cli.schema_path, e
        ))
    });
    let mut schema = Schema::from_json(&schema_json);
    if schema.is_empty() {
        println!("Schema is empty (or degraded from malformed input).");
    }

    if let Some(data_path) = &cli.form_data_path {
        let data_json = fs::read_to_string(data_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read form data '{}': {}", data_path, e))
        });
        let data: AHashMap<String, serde_json::Value> = serde_json::from_str(&data_json)
            .unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse form data '{}': {}", data_path, e))
            });
        let matched = hydrate(&mut schema, &data);
        println!("Hydrated {} field(s) from {}", matched, data_path);
    }

    let recomputed = recompute(&mut schema);
    if recomputed > 0 {
        println!("Recomputed {} formula value(s)", recomputed);
    }

    if cli.survey {
        println!("\n--- Survey fields ---");
        for entry in survey_entries(&schema) {
            let label = entry.label.as_deref().unwrap_or("(unlabeled)");
            print!("{:<14} {} [{}]", entry.kind.palette_label(), label, entry.key);
            if !entry.options.is_empty() {
                print!("  options: {}", entry.options.join(", "));
            }
            if let Some(value) = &entry.value {
                print!("  value: {}", value);
            }
            println!();
        }
    } else {
        println!("\n{}", SchemaOutline { schema: &schema });
    }

    if cli.capture {
        let data = capture(&schema);
        let as_map: serde_json::Map<String, serde_json::Value> = data.into_iter().collect();
        match serde_json::to_string_pretty(&serde_json::Value::Object(as_map)) {
            Ok(rendered) => println!("--- Captured form data ---\n{}", rendered),
            Err(e) => exit_with_error(&format!("Failed to serialize form data: {}", e)),
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
