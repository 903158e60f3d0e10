use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use knowledge::KnowledgeBase;
use lra_core::config::resolve_knowledge_dir;
use lra_core::{prepare_analysis_response, CoreConfig};

#[derive(Parser)]
#[command(name = "lra")]
#[command(about = "LRA lab result analyser CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a message file and print patient and raw observations
    Parse {
        /// Path to the message file
        file: PathBuf,
    },
    /// Analyse a message file against the knowledge base
    Analyze {
        /// Path to the message file
        file: PathBuf,
        /// Knowledge-base directory (defaults to knowledge_data)
        #[arg(long)]
        knowledge_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse { file }) => {
            let content = fs::read_to_string(&file)?;
            let parsed = hl7::parse(&hl7::normalize_line_endings(&content))?;

            println!(
                "Patient: {} (ID: {}), DOB: {}, Gender: {}",
                parsed.patient.patient_name,
                parsed.patient.patient_id,
                parsed.patient.date_of_birth,
                parsed.patient.gender
            );
            if parsed.results.is_empty() {
                println!("No observations found.");
            } else {
                for record in &parsed.results {
                    println!(
                        "{}: {} {} [range: {}, flag: {}]",
                        record.test_name,
                        record.value,
                        record.units.as_deref().unwrap_or("-"),
                        record.reference_range.as_deref().unwrap_or("-"),
                        record.abnormal_flag.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        Some(Commands::Analyze {
            file,
            knowledge_dir,
        }) => {
            let content = fs::read_to_string(&file)?;
            let parsed = hl7::parse(&hl7::normalize_line_endings(&content))?;

            let cfg = CoreConfig::new(resolve_knowledge_dir(knowledge_dir))?;
            let kb = KnowledgeBase::load_dir(cfg.knowledge_dir());
            let response = prepare_analysis_response(&parsed, &kb);

            println!(
                "Patient: {} (ID: {})",
                parsed.patient.patient_name, parsed.patient.patient_id
            );
            println!(
                "Results: {} total, {} critical, {} abnormal, {} normal",
                response.summary.total_results,
                response.summary.critical_count,
                response.summary.abnormal_count,
                response.summary.normal_count
            );
            for result in &response.results {
                println!(
                    "[{}] {}: {} {}",
                    result.severity,
                    result.test_name,
                    result.value,
                    result.units.as_deref().unwrap_or("")
                );
                if let Some(risk) = result.risk_level {
                    println!("  risk: {risk}");
                }
                for note in result.interpretations.iter().flatten() {
                    println!("  note: {note}");
                }
                if !result.related_conditions.is_empty() {
                    println!("  conditions: {}", result.related_conditions.join(", "));
                }
            }
        }
        None => {
            println!("lra: no command given, try --help");
        }
    }

    Ok(())
}
