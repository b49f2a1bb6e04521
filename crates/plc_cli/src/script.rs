//! Runs a checker script against a session.

use crate::command::Command;
use crate::session::Session;
use plc_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use plc_source::FileId;
use std::io::{self, Write};
use std::time::Instant;

/// Title line printed before the first command.
pub const BANNER: &str = "Track-8 Checker V0.2";

/// Output switches for [`run_script`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Suppress the banner and command echo.
    pub quiet: bool,
    /// Print the elapsed time of every command.
    pub verbose: bool,
    /// Colored diagnostics.
    pub color: bool,
}

/// Renders and clears every pending diagnostic.
fn flush_diagnostics(session: &Session, renderer: &TerminalRenderer, err: &mut dyn Write) -> io::Result<()> {
    for diag in session.sink.take_all() {
        writeln!(err, "{}", renderer.render(&diag, &session.source_db))?;
    }
    Ok(())
}

/// Executes the script loaded as `script`, one command at a time.
///
/// Reports go to `out`, diagnostics to `err`. The script stops at the first
/// failing command or at `exit`. Returns `true` if no command failed; the
/// result is also printed as the final line of `out`.
pub fn run_script(
    session: &mut Session,
    script: FileId,
    options: ScriptOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    let renderer = TerminalRenderer::new(options.color);
    let lines: Vec<(String, Result<Command, Diagnostic>)> = session
        .source_db
        .get_file(script)
        .records()
        .map(|record| {
            let text: Vec<&str> = record.tokens.iter().map(|t| t.text).collect();
            (text.join(" "), Command::parse(&record))
        })
        .collect();

    if !options.quiet {
        writeln!(out, "{BANNER}")?;
        writeln!(out)?;
    }

    let mut passed = true;
    for (index, (text, parsed)) in lines.iter().enumerate() {
        if index > 0 && !options.quiet {
            writeln!(out)?;
        }
        if !options.quiet {
            writeln!(out, "{text}")?;
        }
        let command = match parsed {
            Ok(command) => command,
            Err(diag) => {
                session.sink.emit(diag.clone());
                flush_diagnostics(session, &renderer, err)?;
                passed = false;
                break;
            }
        };
        if *command == Command::Exit {
            break;
        }

        let started = Instant::now();
        let ok = match session.execute(command, out) {
            Ok(ok) => ok,
            Err(e) => {
                writeln!(err, "error: {e}")?;
                false
            }
        };
        flush_diagnostics(session, &renderer, err)?;
        if options.verbose {
            writeln!(err, "`{text}` finished in {:.3}s", started.elapsed().as_secs_f64())?;
        }
        if !ok {
            passed = false;
            break;
        }
    }

    writeln!(out, "Main program result: {passed}")?;
    Ok(passed)
}
