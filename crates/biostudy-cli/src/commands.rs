use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use biostudy_cli::export::write_report;
use biostudy_cli::recognizer::recognizer_from_settings;
use biostudy_cli::render::{hit_records, hits_table, render_page, stats_table, topics_table};
use biostudy_cli::settings::Settings;
use biostudy_cli::shell::StudyShell;
use biostudy_core::{
    Corpus, ImagePolicy, ImageTextCache, MasteryTracker, SearchIndex, SearchOutcome, StudySession,
};
use biostudy_ingest::{KnowledgeStore, SourceDescriptor};
use biostudy_lab::{Sequence, reverse_complement, stats, translate};

use crate::cli::{DnaCommand, OutputFormatArg, ReportArgs, SearchArgs, ShowArgs};

/// Settings and knowledge base location shared by every command.
pub struct AppContext {
    pub settings: Settings,
    pub source: SourceDescriptor,
}

impl AppContext {
    /// `--source` wins over the environment and the settings file.
    pub fn new(config: Option<&Path>, source: Option<PathBuf>) -> Self {
        let settings = Settings::load(config);
        let path = source.unwrap_or_else(|| settings.knowledge_base_path());
        Self {
            settings,
            source: SourceDescriptor::from_path(path),
        }
    }

    /// One-shot commands fail on an unusable source instead of showing a placeholder.
    fn load_corpus(&self) -> Result<Arc<Corpus>> {
        let mut store = KnowledgeStore::new();
        store
            .try_load(&self.source)
            .with_context(|| format!("load knowledge base {}", self.source.describe()))
    }

    fn image_cache(&self) -> ImageTextCache {
        ImageTextCache::new(recognizer_from_settings(&self.settings.ocr))
    }
}

pub fn run_topics(ctx: &AppContext) -> Result<()> {
    let corpus = ctx.load_corpus()?;
    if corpus.is_empty() {
        println!("No topics yet in {}.", ctx.source.describe());
        return Ok(());
    }
    println!("{}", topics_table(&corpus, &MasteryTracker::new()));
    Ok(())
}

pub fn run_show(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let corpus = ctx.load_corpus()?;
    let mut session = StudySession::new(corpus);
    session.jump_to_page(args.page)?;
    let label = session.page_label();
    print!("{}", render_page(&label, session.current(), false));
    Ok(())
}

pub fn run_search(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let span = info_span!("search", query = %args.query);
    let _guard = span.enter();

    let corpus = ctx.load_corpus()?;
    let mut options = ctx.settings.search.clone();
    if args.images {
        options.image_policy = ImagePolicy::Exhaustive;
    }
    let index = SearchIndex::new(options);
    let cache = ctx.image_cache();
    let outcome = index.run(&corpus, &args.query, &cache);
    info!(hits = outcome.hits().len(), diagrams = cache.len(), "search complete");

    match args.format {
        OutputFormatArg::Json => {
            let records = hit_records(&corpus, outcome.hits());
            println!(
                "{}",
                serde_json::to_string_pretty(&records).context("serialize search results")?
            );
        }
        OutputFormatArg::Table => match outcome {
            SearchOutcome::NoQuery => println!("Enter a search term."),
            SearchOutcome::NoMatches => println!("No matches for '{}'.", args.query.trim()),
            SearchOutcome::Matches(hits) => println!("{}", hits_table(&corpus, &hits)),
        },
    }
    Ok(())
}

pub fn run_report(ctx: &AppContext, args: &ReportArgs) -> Result<()> {
    let corpus = ctx.load_corpus()?;
    let mut session = StudySession::with_report(corpus, ctx.settings.report_collector());
    for &page in &args.pages {
        session.jump_to_page(page).context("build report")?;
        session.add_current_to_report();
    }

    match &args.output {
        Some(path) => {
            write_report(session.report(), path)?;
            println!(
                "Wrote {} entries to {}.",
                session.report().len(),
                path.display()
            );
        }
        None => print!("{}", session.report().export()),
    }
    Ok(())
}

pub fn run_dna(command: &DnaCommand) -> Result<()> {
    match command {
        DnaCommand::Stats { sequence, format } => {
            let sequence = Sequence::parse(sequence).context("parse sequence")?;
            let counts = stats(&sequence);
            match format {
                OutputFormatArg::Table => println!("{}", stats_table(&counts)),
                OutputFormatArg::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&counts).context("serialize statistics")?
                ),
            }
        }
        DnaCommand::Revcomp { sequence } => {
            let sequence = Sequence::parse(sequence).context("parse sequence")?;
            println!("{}", reverse_complement(&sequence));
        }
        DnaCommand::Translate { sequence } => {
            let sequence = Sequence::parse(sequence).context("parse sequence")?;
            println!("{}", translate(&sequence));
        }
    }
    Ok(())
}

pub fn run_study(ctx: AppContext) -> Result<()> {
    let span = info_span!("study", source = %ctx.source.describe());
    let _guard = span.enter();

    let cache = ctx.image_cache();
    let AppContext { settings, source } = ctx;
    let mut shell = StudyShell::new(
        KnowledgeStore::new(),
        source,
        settings.report_collector(),
        SearchIndex::new(settings.search.clone()),
        cache,
        settings.export_dir(),
    );

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout().lock());
    shell.run(stdin.lock(), &mut stdout)?;
    stdout.flush().context("flush output")?;
    info!(
        entries = shell.session().report().len(),
        mastered = shell.session().mastery().count(),
        "study session ended"
    );
    Ok(())
}
