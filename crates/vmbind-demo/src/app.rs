#![forbid(unsafe_code)]

//! The demo's presentation shell.
//!
//! Renders a [`PersonView`] as plain text and maps input lines onto the
//! view's interaction hook. Everything reactive lives in the library crates;
//! this module only reads [`TextElement`]s and forwards presses.

use std::io::{BufRead, Write};
use std::rc::Rc;

use vmbind_mvvm::{DataProvider, PersonView, PersonViewModel, TextElement};

use crate::cli::Opts;
use crate::dataset;
use crate::error::Result;

/// Revisions of the two bound elements at the last render.
type Rendered = (u64, u64);

fn revisions(view: &PersonView) -> Rendered {
    (view.name().revision(), view.address().revision())
}

fn write_element(out: &mut impl Write, element: &TextElement) -> Result<()> {
    for line in element.text().lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

/// Draw the whole card.
pub fn render(view: &PersonView, out: &mut impl Write) -> Result<Rendered> {
    let title = view.title().text();
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    write_element(out, view.name())?;
    writeln!(out)?;
    write_element(out, view.address())?;
    writeln!(out)?;
    Ok(revisions(view))
}

/// Press "next" and redraw if the bound elements changed.
fn press(view: &PersonView, last: &mut Rendered, out: &mut impl Write) -> Result<()> {
    view.on_next_pressed()?;
    if revisions(view) != *last {
        *last = render(view, out)?;
    }
    Ok(())
}

/// Run the demo. Returns the number of presses handled.
pub fn run(opts: &Opts, input: impl BufRead, out: &mut impl Write) -> Result<usize> {
    let people = dataset::load(opts.data.as_deref())?;
    let provider = Rc::new(DataProvider::with_start(people, opts.start)?);
    let view = PersonView::new(PersonViewModel::from_provider(&provider));
    let mut last = render(&view, out)?;
    let mut presses = 0;

    if let Some(count) = opts.presses {
        for _ in 0..count {
            press(&view, &mut last, out)?;
            presses += 1;
        }
        return Ok(presses);
    }

    write!(out, "[n]ext / [q]uit> ")?;
    out.flush()?;
    for line in input.lines() {
        match line?.trim() {
            "" | "n" | "next" => {
                press(&view, &mut last, out)?;
                presses += 1;
            }
            "q" | "quit" => break,
            other => writeln!(out, "unknown command: {other}")?,
        }
        write!(out, "[n]ext / [q]uit> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    tracing::info!(message = "demo.exit", presses);
    Ok(presses)
}
