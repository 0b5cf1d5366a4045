use std::io::stdout;

use anyhow::bail;
use clap::Parser;
use cli::clipboard::{copy_or_fallback, SystemClipboard, CopyOutcome};
use crossbeam_channel::unbounded;
use quote_app::{item_line, Event, ItemLineStyle, QuoteView};
use tracing::trace;

use crate::core::{Core, ShellRequest};
use crate::opts::Opts;

mod core;
mod opts;
mod output;
mod prompt;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let data_dir = opts.data_dir.clone();
    let confirmed = opts.command.confirmed();
    let mut shell = Shell {
        copy: opts.command.copy(),
        clipboard: SystemClipboard::default(),
    };

    let event = Event::try_from(opts)?;

    let core = core::new();
    run_loop(&core, Event::Initialize {
        data_dir,
    }, &mut shell)?;

    let event = match event {
        Event::ClearQuote if !confirmed => {
            if !prompt::confirm("Clear the quote and build case?")? {
                println!("Nothing was cleared");
                return Ok(());
            }
            Event::ClearQuote
        }
        Event::PurchaseOrderEmails {
            job,
            store: None,
        } => {
            let suppliers = core.view().stores_required_for;
            let store = match suppliers.is_empty() {
                true => None,
                false => prompt::ask_store(&suppliers)?,
            };
            Event::PurchaseOrderEmails {
                job,
                store,
            }
        }
        event => event,
    };

    run_loop(&core, event, &mut shell)?;

    if let Some(pending) = core.view().pending_removal {
        let confirmed = confirmed
            || prompt::confirm(&format!(
                "Remove line {}: {}?",
                pending.index + 1,
                item_line(&pending.line, ItemLineStyle::SupplierPrice)
            ))?;

        let event = match confirmed {
            true => Event::ConfirmRemoval,
            false => Event::CancelRemoval,
        };
        run_loop(&core, event, &mut shell)?;
    }

    Ok(())
}

struct Shell {
    /// Copy text outputs to the clipboard.
    copy: bool,
    clipboard: SystemClipboard,
}

impl Shell {
    fn show(&mut self, view: &QuoteView) -> anyhow::Result<()> {
        let text = output::format_view(view);
        if !text.is_empty() {
            println!("{}", text);
        }

        if !self.copy {
            return Ok(());
        }

        if let Some(text) = output::clipboard_text(view) {
            let outcome = copy_or_fallback(&mut self.clipboard, &text, &mut stdout())?;
            if outcome == CopyOutcome::Copied {
                println!("Copied to clipboard");
            }
        }

        Ok(())
    }
}

fn run_loop(core: &Core, event: Event, shell: &mut Shell) -> Result<(), anyhow::Error> {
    let (tx, rx) = unbounded::<ShellRequest>();

    core::update(core, event, &tx)?;
    drop(tx);

    while let Ok(request) = rx.recv() {
        trace!("run_loop. request: {:?}", request);
        match request {
            ShellRequest::Refresh => {
                let view = core.view();

                if let Some((_, message)) = view.error {
                    bail!(message)
                }

                for notice in view.notices.iter() {
                    println!("{}", notice);
                }

                // Saving after any operation is implicit for the CLI.
                if view.modified {
                    run_loop(core, Event::Save, shell)?
                }
            }
            ShellRequest::Show(view) => shell.show(&view)?,
        }
    }

    Ok(())
}
