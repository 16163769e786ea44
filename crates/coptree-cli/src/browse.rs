//! Interactive browsing of a loaded document.
//!
//! Commands are read one per line; the view of the current sentence is
//! printed after every move. Command mistakes and navigation failures are
//! reported and browsing continues.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use log::debug;

use coptree::{CoptreeError, DocumentViewer, Navigation, ViewMode};

const HELP: &str = "\
commands:
  n, next        show the next sentence
  p, prev        show the previous sentence
  j, jump N      show sentence N (starting at 1)
  v, view MODE   switch view (text, graph, table, svg, conllu)
  lint           check the current sentence
  info           show document statistics
  h, help        show this help
  q, quit        stop browsing";

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    /// One-based sentence number.
    Jump(usize),
    View(ViewMode),
    Lint,
    Info,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err("empty command".to_string());
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments for `{name}`"));
        }

        let command = match (name, argument) {
            ("n" | "next", None) => Command::Next,
            ("p" | "prev" | "previous", None) => Command::Previous,
            ("j" | "jump", Some(number)) => match number.parse::<usize>() {
                Ok(number) if number > 0 => Command::Jump(number),
                _ => return Err(format!("`{number}` is not a sentence number")),
            },
            ("v" | "view", Some(mode)) => Command::View(
                mode.parse()
                    .map_err(|err: &'static str| format!("{err}: {mode}"))?,
            ),
            ("lint", None) => Command::Lint,
            ("info", None) => Command::Info,
            ("h" | "help", None) => Command::Help,
            ("q" | "quit" | "exit", None) => Command::Quit,
            ("j" | "jump" | "v" | "view", None) => {
                return Err(format!("`{name}` needs an argument"));
            }
            _ => return Err(format!("unknown command `{s}`, type `help`")),
        };
        Ok(command)
    }
}

/// Runs the browsing loop until `quit` or the end of `input`.
///
/// # Errors
///
/// Returns [`CoptreeError::Io`] if reading commands or writing output
/// fails, and [`CoptreeError::Export`] if a view cannot be rendered.
pub fn browse<R: BufRead, W: Write>(
    viewer: &mut DocumentViewer,
    mut mode: ViewMode,
    input: R,
    mut output: W,
) -> Result<(), CoptreeError> {
    show(viewer, mode, &mut output)?;
    prompt(viewer, &mut output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(viewer, &mut output)?;
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                prompt(viewer, &mut output)?;
                continue;
            }
        };
        debug!(command:? = command; "Browsing command");

        match command {
            Command::Quit => return Ok(()),
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Info => info(viewer, &mut output)?,
            Command::Lint => lint(viewer, &mut output)?,
            Command::View(new_mode) => {
                mode = new_mode;
                show(viewer, mode, &mut output)?;
            }
            Command::Next => step(viewer, Navigation::Next, mode, &mut output)?,
            Command::Previous => step(viewer, Navigation::Previous, mode, &mut output)?,
            Command::Jump(number) => {
                step(viewer, Navigation::Jump(number - 1), mode, &mut output)?;
            }
        }
        prompt(viewer, &mut output)?;
    }
    Ok(())
}

fn step(
    viewer: &mut DocumentViewer,
    navigation: Navigation,
    mode: ViewMode,
    output: &mut impl Write,
) -> Result<(), CoptreeError> {
    match viewer.navigate(navigation).map(|_| ()) {
        Ok(()) => show(viewer, mode, output),
        Err(err) => {
            writeln!(output, "{err}")?;
            Ok(())
        }
    }
}

fn prompt(viewer: &DocumentViewer, output: &mut impl Write) -> Result<(), CoptreeError> {
    write!(output, "{}> ", viewer.navigator().position_label())?;
    output.flush()?;
    Ok(())
}

fn show(
    viewer: &DocumentViewer,
    mode: ViewMode,
    output: &mut impl Write,
) -> Result<(), CoptreeError> {
    let view = viewer.current_view(mode)?.render()?;
    writeln!(output, "\n{}", viewer.navigator().position_label())?;
    writeln!(output, "{}", view.trim_end())?;
    Ok(())
}

fn info(viewer: &DocumentViewer, output: &mut impl Write) -> Result<(), CoptreeError> {
    let navigator = viewer.navigator();
    let stats = navigator.stats();
    writeln!(output, "{}", navigator.position_label())?;
    if let Some(id) = navigator.current().and_then(|entry| entry.id()) {
        writeln!(output, "sent_id: {id}")?;
    }
    writeln!(
        output,
        "Sentences: {} | Tokens: {} | Unparseable: {} | Empty: {}",
        stats.sentences, stats.tokens, stats.unparseable, stats.empty
    )?;
    Ok(())
}

fn lint(viewer: &DocumentViewer, output: &mut impl Write) -> Result<(), CoptreeError> {
    let report = viewer.lint(viewer.navigator().current_index())?;
    if report.diagnostics.is_empty() && report.patterns.is_empty() {
        writeln!(output, "no findings")?;
    }
    for diagnostic in &report.diagnostics {
        match diagnostic.code() {
            Some(code) => writeln!(output, "[{code}] {}", diagnostic.message())?,
            None => writeln!(output, "{}", diagnostic.message())?,
        }
        if let Some(help) = diagnostic.help() {
            writeln!(output, "  help: {help}")?;
        }
    }
    for pattern in &report.patterns {
        writeln!(output, "note: {}", pattern.describe())?;
    }
    Ok(())
}
