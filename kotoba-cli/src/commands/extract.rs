//! Extract command implementation

use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use kotoba_core::{
    Config, Extraction, Input, InputFormat, LessonBuilder, LessonBundle, VocabularyExtractor,
};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "KOTOBA_CONFIG")]
    pub config: Option<PathBuf>,

    /// How to read input files
    #[arg(long, value_enum, default_value = "auto")]
    pub input_format: SourceFormat,

    /// Entries per lesson
    #[arg(long, value_name = "N")]
    pub lesson_size: Option<usize>,

    /// Drop repeated (kanji, hiragana, meaning) entries
    #[arg(long)]
    pub dedupe: bool,

    /// Put the most complete entries first
    #[arg(long)]
    pub sort_by_completeness: bool,

    /// Attach an example sentence to every entry
    #[arg(long)]
    pub examples: bool,

    /// Do not read a following hiragana line as the missing reading
    #[arg(long)]
    pub no_lookahead: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Input interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceFormat {
    /// JSON arrays are detected, anything else is read as lines
    Auto,
    /// One candidate line per text line, or a JSON array of strings
    Lines,
    /// JSON array of positioned PDF fragments
    Fragments,
}

impl From<SourceFormat> for InputFormat {
    fn from(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Auto => InputFormat::Auto,
            SourceFormat::Lines => InputFormat::Lines,
            SourceFormat::Fragments => InputFormat::Fragments,
        }
    }
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting vocabulary extraction");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to process", files.len());

        let bundle = self.run(config, &files)?;
        self.write_output(&bundle)?;

        if !self.quiet {
            let mut stderr = io::stderr().lock();
            write_summary(&mut stderr, &bundle, files.len())?;
        }

        Ok(())
    }

    /// Extract every file in parallel, then batch the combined entries
    pub fn run(&self, config: Config, files: &[PathBuf]) -> Result<LessonBundle> {
        let extractor = VocabularyExtractor::new(config.clone()).map_err(CliError::config)?;
        let format = InputFormat::from(self.input_format);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let results: Vec<Result<Extraction>> = files
            .par_iter()
            .map(|path| {
                let result = extract_file(&extractor, path, format);
                progress.file_completed(&FileReader::display_name(path));
                result
            })
            .collect();
        progress.finish();

        let mut combined = Extraction::default();
        for result in results {
            combined.merge(result?);
        }

        Ok(LessonBuilder::new(config.lessons).build(combined))
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Config::from_file(path).map_err(CliError::config)?
            }
            None => Config::default(),
        };

        let mut builder = Config::builder().base(base);
        if let Some(size) = self.lesson_size {
            builder = builder.lesson_size(size);
        }
        if self.dedupe {
            builder = builder.dedupe(true);
        }
        if self.sort_by_completeness {
            builder = builder.sort_by_completeness(true);
        }
        if self.examples {
            builder = builder.generate_examples(true);
        }
        if self.no_lookahead {
            builder = builder.lookahead_reading(false);
        }

        Ok(builder.build().map_err(CliError::config)?)
    }

    fn write_output(&self, bundle: &LessonBundle) -> Result<()> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        let mut formatter = self.format.formatter(writer);
        formatter.format_bundle(bundle)?;
        formatter.finish()
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            if let Err(err) =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                    .try_init()
            {
                log::debug!("Keeping the existing logger: {err}");
            }
        }

        Ok(())
    }
}

fn extract_file(
    extractor: &VocabularyExtractor,
    path: &Path,
    format: InputFormat,
) -> Result<Extraction> {
    let text = FileReader::read_text(path)?;
    let extraction = extractor
        .extract_as(Input::from_text(text), format)
        .map_err(|e| CliError::ExtractionError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    log::debug!(
        "{}: {} valid of {} candidate lines",
        path.display(),
        extraction.stats.valid_entries,
        extraction.stats.candidate_lines
    );
    Ok(extraction)
}

/// Console report: counts and success rate
pub fn write_summary(writer: &mut impl Write, bundle: &LessonBundle, files: usize) -> Result<()> {
    let stats = &bundle.statistics;
    writeln!(writer, "Extraction summary ({files} file(s))")?;
    writeln!(writer, "  Extracted entries: {}", stats.extracted_entries)?;
    writeln!(writer, "  Valid entries:     {}", stats.valid_entries)?;
    writeln!(writer, "  Success rate:      {}", stats.success_rate)?;
    writeln!(writer, "  Unparsable lines:  {}", stats.unparsable_lines)?;
    writeln!(writer, "  Lessons:           {}", bundle.total_lessons)?;
    Ok(())
}
