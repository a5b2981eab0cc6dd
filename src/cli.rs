// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    batch,
    config::{
        consts::{DEFAULT_OUT_DIR, EXAMPLES_PER_CODE},
        OutputOptions, PipelineOptions, SecondSpinRule, SegmentationGrammar, TableFormat,
    },
    progress::Progress,
    report, store, Result,
};

#[derive(Parser, Debug)]
#[command(name = "showdown", version, about = "Showcase Showdown transcript extractor and parser")]
pub struct Cli {
    /// Debug-level logging (RUST_LOG wins when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Slice saved episode pages (files or directories) into raw showdown blocks
    Extract {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (trailing '/' means directory)
        #[arg(short, long, default_value = "")]
        out: String,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Parse an episodes file into kept, error and per-scenario outputs
    Parse(ParseArgs),

    /// Frequency report over an error file written by `parse`
    Errors {
        input: PathBuf,

        /// Examples shown per code
        #[arg(long, default_value_t = EXAMPLES_PER_CODE)]
        examples: usize,
    },
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Episodes JSON (as written by `extract`)
    pub input: PathBuf,

    /// TOML with `workers` and a `[policy]` table; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub grammar: Option<SegmentationGrammar>,

    #[arg(long, value_enum)]
    pub second_spin: Option<SecondSpinRule>,

    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Also write a flat one-row-per-contestant table
    #[arg(long, value_enum)]
    pub table: Option<TableFormat>,

    #[arg(long)]
    pub compact: bool,
}

impl ParseArgs {
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        let mut opts = match &self.config {
            Some(path) => PipelineOptions::load(path)?,
            None => PipelineOptions::default(),
        };
        if let Some(g) = self.grammar { opts.policy.segmentation = g; }
        if let Some(r) = self.second_spin { opts.policy.second_spin = r; }
        if let Some(w) = self.workers { opts.workers = w; }
        opts.validate()?;
        Ok(opts)
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            out_dir: self.out_dir.clone(),
            table: self.table,
            pretty: !self.compact,
        }
    }
}

/// Logs failures and a closing tally.
#[derive(Default)]
struct LogProgress {
    total: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logd!("Starting {total} items");
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_failed(&mut self, index: usize, label: &str) {
        self.failed += 1;
        logd!("#{index} {label:?}: routed to errors");
    }
    fn finish(&mut self) {
        logd!("Finished: {} of {} routed to errors", self.failed, self.total);
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { inputs, out, compact } => {
            let paths = batch::page_paths(&inputs)?;
            let mut prog = LogProgress::default();
            let episodes = batch::extract_pages(&paths, Some(&mut prog));
            let blocks: usize = episodes.iter().map(|e| e.showcase_showdowns.len()).sum();
            let path = store::save_episodes(&out, &episodes, !compact)?;
            println!("Episodes written to: {}", path.display());
            println!("Pages read: {} of {}", episodes.len(), paths.len());
            println!("Showdown blocks found: {blocks}");
        }
        Command::Parse(args) => {
            let opts = args.pipeline_options()?;
            let out_opts = args.output_options();
            let episodes = store::load_episodes(&args.input)?;
            logf!("Parsing with {:?}, {} workers", opts.policy, opts.workers);

            let mut prog = LogProgress::default();
            let out = batch::run(&episodes, &opts, None, Some(&mut prog));
            for path in out.write(&out_opts)? {
                println!("Wrote: {}", path.display());
            }
            println!("{}", out.summary.render());
        }
        Command::Errors { input, examples } => {
            let records = store::load_error_records(&input)?;
            print!("{}", report::summarize(&records, examples).render());
        }
    }
    Ok(())
}
