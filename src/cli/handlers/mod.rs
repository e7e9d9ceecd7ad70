use std::io::{IsTerminal, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{ChecklistError, Loaded, load_checklist, save_checklist};
use crate::ops::report::{self, ReportError};
use crate::ops::select::{SelectionOutcome, Selector, SelectorError, run_selection};
use crate::parse::ScanOptions;
use crate::tui::{TerminalSelector, Theme};

/// Error type for command handlers; `main` maps every variant to exit status 1
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Checklist(#[from] ChecklistError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("interaction failed, file left untouched: {0}")]
    InteractionFailure(#[from] SelectorError),
    #[error("no checklist file given (try `tick --help`)")]
    MissingFile,
    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings shared by every command
pub struct Context {
    pub json: bool,
    pub scan: ScanOptions,
    pub painter: Painter,
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> Self {
        let color = !args.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Context {
            json: args.json,
            scan: ScanOptions {
                strict: args.strict,
            },
            painter: Painter::new(Theme::default(), color),
            now: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CommandError> {
    let ctx = Context::from_args(&cli.global);
    let mut stdout = std::io::stdout();

    match cli.command {
        Some(Commands::Rate(args)) => cmd_rate(&args.file, &ctx, &mut stdout),
        Some(Commands::List(args)) => cmd_list(&args.file, &ctx, &mut stdout),
        None => {
            let file = cli.file.ok_or(CommandError::MissingFile)?;
            let mut selector = TerminalSelector::new(ctx.painter.theme.clone());
            cmd_toggle(&file, &ctx, &mut selector, &mut stdout).map(|_| ())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the checklist and report scan warnings on stderr
fn load(path: &Path, ctx: &Context) -> Result<Loaded, CommandError> {
    let loaded = load_checklist(path, ctx.scan)?;
    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Print overdue tasks and the completion report; never prompts or writes
pub fn cmd_rate(path: &Path, ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let checklist = load(path, ctx)?.checklist;
    let report = report::build_report(&checklist.entries, ctx.now)?;

    if ctx.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    write!(out, "{}", format_overdue(&report.overdue, &ctx.painter))?;
    write!(out, "{}", format_completion(&report.completion, &ctx.painter))?;
    Ok(())
}

pub fn cmd_list(path: &Path, ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let checklist = load(path, ctx)?.checklist;

    if ctx.json {
        let json = list_to_json(&checklist, ctx.now);
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    write!(out, "{}", format_list(&checklist, ctx.now, &ctx.painter))?;
    Ok(())
}

/// Show overdue tasks, prompt through `selector`, and write the file back.
///
/// Nothing is written on cancel, on selector failure, or when the selection
/// matches the file's current state.
pub fn cmd_toggle<S: Selector + ?Sized>(
    path: &Path,
    ctx: &Context,
    selector: &mut S,
    out: &mut impl Write,
) -> Result<SelectionOutcome, CommandError> {
    let mut checklist = load(path, ctx)?.checklist;

    let overdue = report::overdue_tasks(&checklist.entries, ctx.now);
    if !overdue.is_empty() {
        write!(out, "{}", format_overdue(&overdue, &ctx.painter))?;
        out.flush()?;
    }

    let outcome = match run_selection(&mut checklist, selector, ctx.now) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "selection failed");
            return Err(e.into());
        }
    };

    match outcome {
        SelectionOutcome::Cancelled => {
            writeln!(out, "Cancelled, file left untouched.")?;
        }
        SelectionOutcome::Applied { .. } => {
            if save_checklist(&checklist)? {
                writeln!(out, "File updated successfully.")?;
            } else {
                writeln!(out, "No changes.")?;
            }
        }
    }
    Ok(outcome)
}
