//! OnayScan command line — analyze a procurement document from the
//! terminal.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use onayscan_approval::ApprovalLadder;
use onayscan_core::format_number_tr;
use onayscan_pipeline::AnalysisPipeline;
use onayscan_risk::RiskLexicon;

#[derive(Debug, Parser)]
#[command(name = "onayscan", version, about = "Satınalma süreci analiz asistanı")]
struct Cli {
    /// Analiz edilecek belge (PDF veya düz metin)
    input: PathBuf,

    /// Raporu belirtilen dosyaya kaydet
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON formatında çıktı
    #[arg(long)]
    json: bool,

    /// Sadece risk tespitlerini göster
    #[arg(long)]
    only_risks: bool,

    /// Sadece özeti göster
    #[arg(long)]
    only_summary: bool,

    /// Detaylı çıktı
    #[arg(short, long)]
    verbose: bool,

    /// Risk sözlüğü dosyası
    #[arg(long, env = "ONAYSCAN_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Onay mercii tablosu dosyası
    #[arg(long, env = "ONAYSCAN_TIERS")]
    tiers: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let lexicon = RiskLexicon::load(cli.lexicon.as_deref());
    let ladder = ApprovalLadder::load(cli.tiers.as_deref());
    let pipeline = AnalysisPipeline::new(lexicon, ladder);

    let result = pipeline.analyze_file(&cli.input)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if cli.only_risks {
        if result.findings.is_empty() {
            println!("Risk tespit edilmedi.");
        }
        for (i, finding) in result.findings.iter().enumerate() {
            println!("{}. [{}] {}", i + 1, finding.category_label(), finding.sentence);
            println!(
                "   Satır {}: {}",
                finding.line_number,
                finding.matched_phrases.join(", ")
            );
        }
    } else if cli.only_summary {
        println!("{}", result.decision_summary);
    } else {
        println!("{}", result.report);
        println!();
        println!(
            "Toplam Alım Değeri: {} {}",
            format_number_tr(result.total_value.amount),
            result.total_value.currency
        );
        println!("Onay Mercii: {}", result.approval.authority);
    }

    if let Some(output) = &cli.output {
        std::fs::write(output, &result.report)?;
        eprintln!("Rapor kaydedildi: {}", output.display());
    }

    Ok(())
}
