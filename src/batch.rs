// src/batch.rs
use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    sync::{ mpsc, Arc, atomic::{ AtomicBool, AtomicUsize, Ordering }},
};

use serde::{Deserialize, Serialize};

use crate::{
    config::{OutputOptions, PipelineOptions},
    csv::contestant_table,
    file::{ensure_directory, write_json, write_table},
    progress::Progress,
    report::ErrorRecord,
    showdown::{warnings::NON_TEXT_INPUT, Pipeline, Round, Scenario},
    specs::episode::{parse_episode, EpisodeRecord},
    store::{read_block, BlockInput, EpisodeInput},
    Result,
};

/// An input episode plus the rounds that survived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructuredEpisode {
    #[serde(flatten)]
    pub episode: EpisodeInput,
    pub parsed_showdowns: Vec<Round>,
}

/// A kept round tagged with its episode, as written to the scenario files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRound {
    pub episode_title: Option<String>,
    pub iso_date: Option<String>,
    #[serde(flatten)]
    pub round: Round,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub kept: usize,
    pub errors: usize,
    /// Error rounds whose parse failed or raised a structural warning.
    pub structural_errors: usize,
    /// Error rounds with at least one `val_*` code.
    pub validation_errors: usize,
    /// Kept rounds per scenario 1..=3.
    pub scenarios: [usize; 3],
    pub episodes_with_kept: usize,
    /// Rounds never started because the batch was cancelled.
    pub skipped: usize,
    /// Rounds a worker picked up but never returned (the worker panicked).
    pub lost: usize,
}

impl BatchSummary {
    pub fn render(&self) -> String {
        format!(
            "Total showdowns seen: {}\n\
             Showdowns kept (good): {}\n\
             Showdowns with structural issues: {}\n\
             Showdowns with validation issues: {}\n\
             Scenario 1: {}\nScenario 2: {}\nScenario 3: {}\n\
             Episodes with at least one valid showdown: {}{}{}",
            self.total,
            self.kept,
            self.structural_errors,
            self.validation_errors,
            self.scenarios[0],
            self.scenarios[1],
            self.scenarios[2],
            self.episodes_with_kept,
            if self.skipped > 0 { format!("\nSkipped (cancelled): {}", self.skipped) } else { s!() },
            if self.lost > 0 { format!("\nLost (worker panicked): {}", self.lost) } else { s!() },
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchOutput {
    pub structured: Vec<StructuredEpisode>,
    pub errors: Vec<ErrorRecord>,
    pub scenarios: [Vec<ScenarioRound>; 3],
    pub summary: BatchSummary,
}

struct Job {
    episode: usize,
    block: BlockInput,
}

impl Job {
    fn label(&self) -> &str {
        match &self.block {
            BlockInput::Text(b) => &b.label,
            BlockInput::NonText { label } => label,
        }
    }
}

/// Parse + validate one block. Never fails.
pub fn process_block(pipeline: &Pipeline, block: &BlockInput) -> Round {
    match block {
        BlockInput::Text(raw) => pipeline.process(raw),
        BlockInput::NonText { label } => {
            logw!("Block {label:?}: no text, routed to errors");
            Round::failed(label.as_str(), NON_TEXT_INPUT)
        }
    }
}

/* ---------------- Driver ---------------- */

/// Run every block of every episode through the pipeline.
///
/// With `workers > 1` rounds are spread over a thread pool; results come back in
/// input order either way. Setting `cancel` stops workers between rounds; whatever
/// had not started is counted as skipped.
pub fn run(
    episodes: &[EpisodeInput],
    opts: &PipelineOptions,
    cancel: Option<Arc<AtomicBool>>,
    mut progress: Option<&mut dyn Progress>,
) -> BatchOutput {
    let pipeline = Pipeline::new(opts.policy);

    let jobs: Vec<Job> = episodes
        .iter()
        .enumerate()
        .flat_map(|(e, ep)| {
            ep.showcase_showdowns
                .iter()
                .map(move |v| Job { episode: e, block: read_block(v) })
        })
        .collect();
    let n = jobs.len();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(n);
    }

    let cancel = cancel.unwrap_or_default();
    let jobs = Arc::new(jobs);
    let workers = opts.workers.min(n).max(1);
    let mut results: Vec<Option<Round>> = vec![None; n];
    // rounds handed to a worker; anything past this was never started
    let claimed;

    if workers == 1 {
        let mut started = 0;
        for (i, job) in jobs.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            started += 1;
            let round = process_block(&pipeline, &job.block);
            if let Some(p) = progress.as_deref_mut() {
                report(p, i, job.label(), &round);
            }
            results[i] = Some(round);
        }
        claimed = started;
    } else {
        let counter = Arc::new(AtomicUsize::new(0));
        let (res_tx, res_rx) = mpsc::channel::<(usize, Round)>();

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let jobs = Arc::clone(&jobs);
            let idx = Arc::clone(&counter);
            let stop = Arc::clone(&cancel);
            let tx = res_tx.clone();

            handles.push(thread::spawn(move || {
                loop {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= jobs.len() {
                        break;
                    }
                    let round = process_block(&pipeline, &jobs[i].block);
                    if tx.send((i, round)).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(res_tx); // main thread is sole receiver now

        for _ in 0..n {
            match res_rx.recv() {
                Ok((i, round)) => {
                    if let Some(p) = progress.as_deref_mut() {
                        report(p, i, jobs[i].label(), &round);
                    }
                    results[i] = Some(round);
                }
                Err(_) => break, // every worker has exited
            }
        }

        for (w, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.join() {
                loge!("Worker {w} panicked: {e:?}");
            }
        }
        claimed = counter.load(Ordering::Relaxed).min(n);
    }

    let out = collect(episodes, &jobs, results, claimed);
    logf!(
        "Batch: {} rounds, {} kept, {} errors, {} skipped, {} lost",
        out.summary.total, out.summary.kept, out.summary.errors, out.summary.skipped, out.summary.lost
    );
    if let Some(p) = progress.as_deref_mut() {
        if out.summary.skipped > 0 {
            p.log(&format!("Cancelled: {} rounds not started", out.summary.skipped));
        }
        p.finish();
    }
    out
}

fn report(p: &mut dyn Progress, i: usize, label: &str, round: &Round) {
    if round.is_kept() {
        p.item_done(i, label);
    } else {
        p.item_failed(i, label);
    }
}

/// Partition finished rounds, in input order, into kept / error / scenario sets.
/// A missing result below `claimed` was started and lost; above it, never started.
fn collect(
    episodes: &[EpisodeInput],
    jobs: &[Job],
    results: Vec<Option<Round>>,
    claimed: usize,
) -> BatchOutput {
    let mut out = BatchOutput::default();
    let mut kept_per_episode: Vec<Vec<Round>> = vec![Vec::new(); episodes.len()];

    for (i, (job, slot)) in jobs.iter().zip(results).enumerate() {
        let Some(round) = slot else {
            if i < claimed {
                out.summary.lost += 1;
            } else {
                out.summary.skipped += 1;
            }
            continue;
        };
        let ep = &episodes[job.episode];
        out.summary.total += 1;

        if round.is_kept() {
            out.summary.kept += 1;
            if let Some(sc) = round.scenario {
                let k = usize::from(sc.number() - 1);
                out.summary.scenarios[k] += 1;
                out.scenarios[k].push(ScenarioRound {
                    episode_title: ep.title().map(str::to_string),
                    iso_date: ep.iso_date().map(str::to_string),
                    round: round.clone(),
                });
            }
            kept_per_episode[job.episode].push(round);
        } else {
            out.summary.errors += 1;
            if round.parse_status == crate::showdown::ParseStatus::Error
                || round.has_structural_warning()
            {
                out.summary.structural_errors += 1;
            }
            if !round.validation_errors.is_empty() {
                out.summary.validation_errors += 1;
            }
            out.errors.push(ErrorRecord::new(ep, &round));
        }
    }

    out.structured = episodes
        .iter()
        .zip(kept_per_episode)
        .filter(|(_, kept)| !kept.is_empty())
        .map(|(ep, kept)| StructuredEpisode { episode: ep.clone(), parsed_showdowns: kept })
        .collect();
    out.summary.episodes_with_kept = out.structured.len();
    out
}

/* ---------------- Pages ---------------- */

const PAGE_EXTS: &[&str] = &["html", "htm"];

/// Expand directories (one level, sorted) into their `.html`/`.htm` files.
pub fn page_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for p in inputs {
        if p.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(p)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|f| {
                    f.extension()
                        .and_then(|x| x.to_str())
                        .is_some_and(|x| PAGE_EXTS.contains(&x.to_ascii_lowercase().as_str()))
                })
                .collect();
            found.sort();
            out.extend(found);
        } else {
            out.push(p.clone());
        }
    }
    Ok(out)
}

fn read_page(path: &Path) -> Result<EpisodeRecord> {
    let bytes = fs::read(path)?;
    let doc = String::from_utf8_lossy(&bytes);
    Ok(parse_episode(&doc, None))
}

/// Read saved episode pages in order. A page that can't be read is logged and skipped.
pub fn extract_pages(paths: &[PathBuf], mut progress: Option<&mut dyn Progress>) -> Vec<EpisodeRecord> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(paths.len());
    }

    let mut episodes = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let name = path.display().to_string();
        match read_page(path) {
            Ok(ep) => {
                logd!("{name}: {} showdowns", ep.showcase_showdowns.len());
                if let Some(p) = progress.as_deref_mut() {
                    if ep.showcase_showdowns.is_empty() {
                        p.log(&format!("{name}: no Showcase Showdowns found"));
                    }
                    p.item_done(i, &name);
                }
                episodes.push(ep);
            }
            Err(e) => {
                loge!("{name}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, &name);
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    episodes
}

/* ---------------- Output ---------------- */

impl BatchOutput {
    /// Write every output file into `opts.out_dir`. Returns the paths written.
    pub fn write(&self, opts: &OutputOptions) -> Result<Vec<PathBuf>> {
        ensure_directory(&opts.out_dir)?;
        let mut written = Vec::new();

        let path = opts.structured_path();
        write_json(&path, &self.structured, opts.pretty)?;
        written.push(path);

        let path = opts.errors_path();
        write_json(&path, &self.errors, opts.pretty)?;
        written.push(path);

        for sc in Scenario::ALL {
            let path = opts.scenario_path(sc.number());
            write_json(&path, &self.scenarios[usize::from(sc.number() - 1)], opts.pretty)?;
            written.push(path);
        }

        if let (Some(fmt), Some(path)) = (opts.table, opts.table_path()) {
            let (headers, rows) = contestant_table(&self.structured);
            write_table(&path, &headers, &rows, fmt.delim())?;
            written.push(path);
        }

        for p in &written {
            logd!("Wrote {}", p.display());
        }
        Ok(written)
    }
}
