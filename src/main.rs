//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library.

use std::fs::File;
use std::io::BufReader;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatpulse::analysis::{AnalysisReport, Analyzer};
use chatpulse::cli::Args;
use chatpulse::core::{OutputConfig, apply_filters, write_report};
use chatpulse::format::write_to_format;
use chatpulse::parser::TranscriptParser;
use chatpulse::ChatpulseError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` replaces the verbosity-derived default.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatpulseError> {
    let total_start = Instant::now();
    let analysis_config = args.analysis_config()?;
    let filter_config = args.filter_config()?;

    println!("💓 chatpulse v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Report:  {}", args.output);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    println!(
        "🪟 Windows: {} days, step {}, threshold {}",
        analysis_config.window_days,
        analysis_config.effective_step(),
        analysis_config.shift_threshold
    );
    println!();

    // Step 1: Parse
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser = TranscriptParser::with_config(args.transcript_config());
    let parsed = parser.parse_reader(BufReader::new(File::open(&args.input)?))?;
    let original_count = parsed.messages.len();
    println!(
        "   Found {} messages ({:.2}s)",
        original_count,
        parse_start.elapsed().as_secs_f64()
    );
    if !parsed.warnings.is_empty() {
        println!(
            "   ⚠️  Skipped {} line(s) outside any message",
            parsed.warnings.len()
        );
    }

    // Step 2: Filter
    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(parsed.messages, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        parsed.messages
    };

    // Step 3: Optional message export
    if let (Some(path), Some(format)) = (args.messages.as_deref(), args.messages_output_format()) {
        println!("📝 Exporting messages as {}...", format);
        write_to_format(&messages, path, format, &OutputConfig::all())?;
        println!("   Saved to {}", path);
    }

    // Step 4: Analyze
    println!("🧮 Analyzing...");
    let analysis_start = Instant::now();
    let report = Analyzer::with_config(analysis_config).analyze(&messages)?;
    println!("   Done in {:.2}s", analysis_start.elapsed().as_secs_f64());

    // Step 5: Write report
    write_report(&report, &args.output, !args.compact)?;

    println!();
    println!("✅ Done! Report saved to {}", args.output);
    print_summary(&report, original_count);

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

fn print_summary(report: &AnalysisReport, original_count: usize) {
    let stats = &report.basic_stats;
    let relationship = &report.relationship_analysis;

    println!();
    println!("📊 Summary:");
    println!("   Parsed:       {} messages", original_count);
    println!("   Analyzed:     {} messages", stats.total_messages);
    println!("   Participants: {}", stats.participants.join(", "));
    println!(
        "   Span:         {} → {}",
        stats.first_message_date, stats.last_message_date
    );
    if let Some(days) = stats.duration_days {
        println!("   Duration:     {:.1} days", days);
    }
    println!("   Windows:      {}", relationship.window_metrics.len());
    println!("   Shifts:       {}", relationship.pattern_shifts.len());

    for shift in &relationship.pattern_shifts {
        let pct = |change: Option<f64>| {
            change.map_or_else(|| "n/a".to_string(), |c| format!("{:+.0}%", c * 100.0))
        };
        println!(
            "   ↪ {}  frequency {}, responses {}",
            shift.date,
            pct(shift.frequency_change),
            pct(shift.response_change)
        );
    }
}
