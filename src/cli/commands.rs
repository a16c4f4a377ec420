//! Command implementation for the termweight CLI.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::tokenizer::{
    LexiconTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer,
};
use crate::cli::args::{SegmenterKind, TermWeightArgs};
use crate::cli::output::{RunSummary, output_result};
use crate::error::{Result, TermWeightError};
use crate::weight::pipeline::{PipelineStats, TermWeightPipeline};

/// Execute a weighting run described by the arguments.
pub fn execute_command(args: TermWeightArgs) -> Result<()> {
    let start_time = Instant::now();
    let tokenizer = build_tokenizer(args.segmenter, &args.lexicon)?;
    let segmenter = tokenizer.name().to_string();

    let stats = run_files(&args, tokenizer)?;

    output_result(
        "Term weighting finished",
        &RunSummary {
            input: args.input.to_string_lossy().to_string(),
            output: args.output.to_string_lossy().to_string(),
            segmenter,
            duration_ms: start_time.elapsed().as_millis() as u64,
            stats,
        },
        &args,
    )?;

    Ok(())
}

/// Build the segmenter selected on the command line.
pub fn build_tokenizer(kind: SegmenterKind, lexicon: &Path) -> Result<Arc<dyn Tokenizer>> {
    let tokenizer: Arc<dyn Tokenizer> = match kind {
        SegmenterKind::Lexicon => Arc::new(LexiconTokenizer::from_file(lexicon)?),
        SegmenterKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        SegmenterKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
    };
    if kind != SegmenterKind::Lexicon {
        log::debug!("Segmenter '{}' ignores {}", tokenizer.name(), lexicon.display());
    }
    Ok(tokenizer)
}

/// Run the pipeline over the files named in the arguments.
///
/// Failing to open any of the input, output or diagnostic log files aborts the
/// run before any record is read.
pub fn run_files(args: &TermWeightArgs, tokenizer: Arc<dyn Tokenizer>) -> Result<PipelineStats> {
    let reader = BufReader::new(open_file(&args.input, "input")?);
    let mut writer = BufWriter::new(create_file(&args.output, "output")?);
    let mut diagnostics = BufWriter::new(create_file(&args.inconsistency_log, "log")?);

    log::info!("Start to process {}", args.input.display());
    let pipeline = TermWeightPipeline::new(args.stat_config(), tokenizer);
    pipeline.run(reader, &mut writer, &mut diagnostics)
}

fn open_file(path: &Path, role: &str) -> Result<File> {
    File::open(path).map_err(|e| {
        TermWeightError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {} file {}: {}", role, path.display(), e),
        ))
    })
}

fn create_file(path: &Path, role: &str) -> Result<File> {
    File::create(path).map_err(|e| {
        TermWeightError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot create {} file {}: {}", role, path.display(), e),
        ))
    })
}
