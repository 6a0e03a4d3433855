//! Interactive front end for an [`AppContext`].
//!
//! Plays the role of the main window and tray menu: numbered quick-entry
//! buttons, a custom trip dialog, data file selection, hide/show and quit.

use crate::core::session::{AppCommand, AppContext, Outcome};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, trip_recorded, warning};
use std::io::{BufRead, Lines, Write};

/// Drive `ctx` from `input` until the user quits or input ends.
pub fn run_menu<R: BufRead, W: Write>(ctx: &mut AppContext, input: R, out: &mut W) -> AppResult<()> {
    let mut lines = input.lines();

    loop {
        if ctx.is_visible() {
            render(ctx, out)?;
        }
        let Some(choice) = prompt(&mut lines, out, "> ")? else {
            // End of input behaves like the quit command.
            ctx.handle(AppCommand::Quit)?;
            return Ok(());
        };

        let cmd = match read_command(ctx, choice.trim(), &mut lines, out)? {
            Some(cmd) => cmd,
            None => continue,
        };

        match ctx.handle(cmd) {
            Ok(Outcome::Exit) => return Ok(()),
            Ok(outcome) => report(&outcome),
            Err(e) => {
                error(&e);
                if !ctx.writes_enabled() && e.is_data_file_error() {
                    warning("Trip logging disabled. Select a data file with 'f' to continue.");
                }
            }
        }
    }
}

fn render<W: Write>(ctx: &AppContext, out: &mut W) -> AppResult<()> {
    writeln!(out)?;
    writeln!(out, "==== Trip Logger ====")?;
    match ctx.data_file() {
        Some(path) if ctx.writes_enabled() => writeln!(out, "Data file: {}", path)?,
        Some(path) => writeln!(out, "Data file: {} (writing disabled)", path)?,
        None => writeln!(out, "Data file: (none selected)")?,
    }
    for (i, entry) in ctx.catalog().entries().iter().enumerate() {
        writeln!(out, "  {}) {} ({} mi)", i + 1, entry.name, entry.miles)?;
    }
    writeln!(out, "  c) Custom trip")?;
    writeln!(out, "  f) Select data file")?;
    writeln!(out, "  h) Hide window")?;
    writeln!(out, "  q) Quit")?;
    Ok(())
}

/// Turn a menu choice into a command, running any follow-up prompts.
/// `None` means the choice was cancelled or not understood.
fn read_command<R: BufRead, W: Write>(
    ctx: &AppContext,
    choice: &str,
    lines: &mut Lines<R>,
    out: &mut W,
) -> AppResult<Option<AppCommand>> {
    let with_reason = ctx.store().schema().has_reason();

    if let Ok(n) = choice.parse::<usize>() {
        let Some(entry) = n.checked_sub(1).and_then(|i| ctx.catalog().entries().get(i)) else {
            warning(format!("No location number {}", n));
            return Ok(None);
        };
        let location = entry.name.clone();
        let reason = if with_reason {
            match prompt(lines, out, "Trip reason (optional): ")? {
                Some(r) => Some(r.trim().to_string()),
                None => return Ok(None),
            }
        } else {
            None
        };
        return Ok(Some(AppCommand::QuickTrip { location, reason }));
    }

    let cmd = match choice.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "c" => return custom_trip(lines, out, with_reason),
        "f" => match prompt(lines, out, "Data file path: ")? {
            Some(p) if !p.trim().is_empty() => AppCommand::SelectDataFile(p),
            _ => {
                info("Data file selection cancelled.");
                return Ok(None);
            }
        },
        "h" => AppCommand::HideWindow,
        "s" => AppCommand::ShowWindow,
        "q" => AppCommand::Quit,
        other => {
            warning(format!("Unknown choice '{}'", other));
            return Ok(None);
        }
    };
    Ok(Some(cmd))
}

fn custom_trip<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    out: &mut W,
    with_reason: bool,
) -> AppResult<Option<AppCommand>> {
    let location = match prompt(lines, out, "Enter Location Name: ")? {
        Some(l) if !l.trim().is_empty() => l.trim().to_string(),
        Some(_) => {
            warning("Location name cannot be empty. Cancelled.");
            return Ok(None);
        }
        None => return Ok(None),
    };

    let miles = match prompt(lines, out, &format!("Enter Miles for '{}': ", location))? {
        Some(m) if !m.trim().is_empty() => m.trim().to_string(),
        Some(_) => {
            warning("Custom trip miles cannot be empty. Cancelled.");
            return Ok(None);
        }
        None => return Ok(None),
    };

    let reason = if with_reason {
        match prompt(lines, out, "Trip reason (optional): ")? {
            Some(r) => Some(r.trim().to_string()),
            None => return Ok(None),
        }
    } else {
        None
    };

    Ok(Some(AppCommand::CustomTrip {
        location,
        miles,
        reason,
    }))
}

fn prompt<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    out: &mut W,
    label: &str,
) -> AppResult<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Recorded(trip) => trip_recorded(trip),
        Outcome::DataFileSelected(path, status) => {
            success(format!("Data file {} ({})", path, status.as_str()))
        }
        Outcome::DataFileCleared => info("Data file cleared."),
        Outcome::Visibility(true) => {}
        Outcome::Visibility(false) => {
            info("Window hidden. Enter 's' to show it again or 'q' to quit.")
        }
        Outcome::Exit => {}
    }
}
