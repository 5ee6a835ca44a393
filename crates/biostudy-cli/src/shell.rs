//! Interactive study shell.
//!
//! Reads one command per line and applies it to a [`StudySession`]. All
//! session state is mutated here, one action at a time.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use biostudy_core::{
    ImageTextCache, ReportCollector, SearchHit, SearchIndex, SearchOutcome, StudySession,
};
use biostudy_ingest::{KnowledgeStore, SourceDescriptor};

use crate::export::{default_export_path, write_report};
use crate::render::{hits_table, render_page, topics_table};

pub const PROMPT: &str = "biostudy> ";

pub const HELP: &str = "\
Commands:
  show | l            show the current page
  next | n            next page
  prev | p            previous page
  goto N | g N        jump to page N
  topics | t          list all pages
  search Q | s Q      search topics (and diagram text)
  open N | o N        open result N of the last search
  add | a             add the current page to the report
  master | m          toggle mastery of the current page
  report | r         show the report
  export [FILE]       write the report (default: dated file)
  clear               empty the report
  reload              re-read the knowledge base
  help | h            this text
  quit | q            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    Next,
    Previous,
    Goto(usize),
    Topics,
    Search(String),
    Open(usize),
    Add,
    Master,
    Report,
    Export(Option<PathBuf>),
    Clear,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_action(line: &str) -> Result<Option<Action>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "show" | "l" => Action::Show,
        "next" | "n" => Action::Next,
        "prev" | "previous" | "p" => Action::Previous,
        "goto" | "g" => Action::Goto(parse_number(command, rest)?),
        "topics" | "t" => Action::Topics,
        "search" | "s" | "/" => Action::Search(rest.to_string()),
        "open" | "o" => Action::Open(parse_number(command, rest)?),
        "add" | "a" => Action::Add,
        "master" | "m" => Action::Master,
        "report" | "r" => Action::Report,
        "export" | "e" => Action::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "clear" => Action::Clear,
        "reload" => Action::Reload,
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    };
    Ok(Some(action))
}

fn parse_number(command: &str, rest: &str) -> Result<usize> {
    if rest.is_empty() {
        bail!("'{command}' needs a number");
    }
    match rest.parse() {
        Ok(number) => Ok(number),
        Err(_) => bail!("'{rest}' is not a number"),
    }
}

/// Session plus the collaborators its actions need.
pub struct StudyShell {
    session: StudySession,
    store: KnowledgeStore,
    source: SourceDescriptor,
    index: SearchIndex,
    cache: ImageTextCache,
    last_hits: Vec<SearchHit>,
    export_dir: PathBuf,
}

impl StudyShell {
    /// Loads the knowledge base and starts on page 1.
    pub fn new(
        mut store: KnowledgeStore,
        source: SourceDescriptor,
        report: ReportCollector,
        index: SearchIndex,
        cache: ImageTextCache,
        export_dir: PathBuf,
    ) -> Self {
        let corpus = store.load(&source);
        Self {
            session: StudySession::with_report(corpus, report),
            store,
            source,
            index,
            cache,
            last_hits: Vec::new(),
            export_dir,
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn last_hits(&self) -> &[SearchHit] {
        &self.last_hits
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Type 'help' for commands.")?;
        self.show(out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            match parse_action(&line) {
                Ok(Some(action)) => {
                    if self.execute(action, out)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Ok(None) => {}
                Err(error) => writeln!(out, "{error}")?,
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Applies one action. Only output failures are returned as errors.
    pub fn execute<W: Write>(&mut self, action: Action, out: &mut W) -> Result<Flow> {
        tracing::trace!(?action, "shell action");
        match action {
            Action::Show => self.show(out)?,
            Action::Next => {
                if self.session.next() {
                    self.show(out)?;
                } else {
                    writeln!(out, "Already on the last page.")?;
                }
            }
            Action::Previous => {
                if self.session.previous() {
                    self.show(out)?;
                } else {
                    writeln!(out, "Already on the first page.")?;
                }
            }
            Action::Goto(page) => match self.session.jump_to_page(page) {
                Ok(()) => self.show(out)?,
                Err(error) => writeln!(out, "error: {error}")?,
            },
            Action::Topics => {
                let session = &self.session;
                writeln!(out, "{}", topics_table(session.corpus(), session.mastery()))?;
            }
            Action::Search(query) => self.search(&query, out)?,
            Action::Open(number) => self.open(number, out)?,
            Action::Add => {
                if self.has_topics() {
                    let entry = self.session.add_current_to_report();
                    writeln!(
                        out,
                        "Added '{}' to the report ({} entries).",
                        entry.topic,
                        self.session.report().len()
                    )?;
                } else {
                    writeln!(out, "Nothing to add yet.")?;
                }
            }
            Action::Master => {
                if self.has_topics() {
                    let mastered = self.session.toggle_current_mastery();
                    let verb = if mastered { "Mastered" } else { "Unmarked" };
                    let topic = self.session.current().topic.clone();
                    writeln!(
                        out,
                        "{verb} '{topic}'. Progress: {}%",
                        self.session.mastery_percent()
                    )?;
                } else {
                    writeln!(out, "Nothing to master yet.")?;
                }
            }
            Action::Report => {
                if self.session.report().is_empty() {
                    writeln!(out, "The report is empty. Use 'add' on a page first.")?;
                } else {
                    write!(out, "{}", self.session.report().export())?;
                }
            }
            Action::Export(path) => {
                let path = path.unwrap_or_else(|| default_export_path(&self.export_dir));
                match write_report(self.session.report(), &path) {
                    Ok(()) => writeln!(
                        out,
                        "Wrote {} entries to {}.",
                        self.session.report().len(),
                        path.display()
                    )?,
                    Err(error) => writeln!(out, "error: {error:#}")?,
                }
            }
            Action::Clear => {
                self.session.report_mut().clear();
                writeln!(out, "Report cleared.")?;
            }
            Action::Reload => self.reload(out)?,
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn has_topics(&self) -> bool {
        let corpus = self.session.corpus();
        !corpus.is_empty() && !corpus.is_placeholder()
    }

    fn show<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let label = self.session.page_label();
        let index = self.session.navigator().current_index();
        let mastered = self.session.mastery().is_mastered(index);
        let row = self.session.current();
        write!(out, "{}", render_page(&label, row, mastered))?;
        Ok(())
    }

    fn search<W: Write>(&mut self, query: &str, out: &mut W) -> Result<()> {
        let corpus = self.session.corpus();
        match self.index.run(corpus, query, &self.cache) {
            SearchOutcome::NoQuery => writeln!(out, "Enter a search term, e.g. 'search pcr'.")?,
            SearchOutcome::NoMatches => {
                self.last_hits.clear();
                writeln!(out, "No matches for '{}'.", query.trim())?;
            }
            SearchOutcome::Matches(hits) => {
                writeln!(out, "{}", hits_table(corpus, &hits))?;
                writeln!(out, "Use 'open N' to jump to a result.")?;
                self.last_hits = hits;
            }
        }
        Ok(())
    }

    fn open<W: Write>(&mut self, number: usize, out: &mut W) -> Result<()> {
        let Some(hit) = number.checked_sub(1).and_then(|i| self.last_hits.get(i)).copied() else {
            if self.last_hits.is_empty() {
                writeln!(out, "No search results to open.")?;
            } else {
                writeln!(
                    out,
                    "Pick a result between 1 and {}.",
                    self.last_hits.len()
                )?;
            }
            return Ok(());
        };
        match self.session.select_hit(&hit) {
            Ok(()) => self.show(out)?,
            Err(error) => {
                tracing::debug!(%error, "stale search hit");
                writeln!(
                    out,
                    "error: result {number} points at page {}, which no longer exists (search again after a reload)",
                    hit.page()
                )?;
            }
        }
        Ok(())
    }

    /// Re-reads the source; image text recognized so far is discarded too.
    fn reload<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.store.force_reload();
        let corpus = self.store.load(&self.source);
        self.session.replace_corpus(corpus);
        self.cache.clear();
        writeln!(
            out,
            "Reloaded {} ({} topics).",
            self.source.describe(),
            self.session.corpus().len()
        )?;
        self.show(out)
    }
}
