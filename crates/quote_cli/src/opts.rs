#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::args::{ItemLineStyleArg, RoutineVisitArg, StepDirectionArg};
use cli::parsers::sort_spec_parser;
use quote_app::{BuildCaseChanges, Event, LabourChanges, ManualLine, SearchQuery, SortSpec};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "quote_cli")]
#[command(bin_name = "quote_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    /// Directory holding the cached parts list, quote, build case and settings
    #[arg(long, env = "QUOTE_DATA_DIR", default_value = ".", value_name = "DIRECTORY")]
    pub(crate) data_dir: PathBuf,

    #[command(subcommand)]
    pub(crate) command: ModeCommand,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ModeCommand {
    /// Load a parts list from a CSV file, replacing the cached one
    Load {
        /// The parts list, e.g. 'parts.csv'
        #[arg(long, value_name = "CSV_FILE")]
        file: PathBuf,
    },
    /// Remove the cached parts list
    ClearCache,
    /// Search the parts list, lists all parts when no query is given
    Search {
        /// Search terms, matched against every column
        query: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Quote mode
    Quote {
        #[command(subcommand)]
        command: QuoteCommand,
    },
    /// Purchase order mode
    Po {
        #[command(subcommand)]
        command: PurchaseOrderCommand,
    },
    /// Email mode
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Build case mode
    BuildCase {
        #[command(subcommand)]
        command: BuildCaseCommand,
    },
    /// Config mode
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Args)]
pub(crate) struct FilterArgs {
    /// Only parts whose supplier contains this text
    #[arg(long)]
    pub(crate) supplier: Option<String>,

    /// Only parts whose type contains this text
    #[arg(long = "type", value_name = "TYPE")]
    pub(crate) kind: Option<String>,

    /// Sort, e.g. 'PRICE:DESC', defaults to the configured sort
    #[arg(long, value_name = "KEY[:ORDER]", value_parser = sort_spec_parser)]
    pub(crate) sort: Option<SortSpec>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum QuoteCommand {
    /// Add a part from the parts list, adding it again increases the quantity
    Add {
        /// Search terms identifying the part
        #[arg(long)]
        query: String,

        /// Row of the search results to add, required when several parts match. 1-based.
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        row: Option<u16>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Add a line that is not in the parts list
    AddManual {
        /// Supplier name
        #[arg(long)]
        supplier: String,

        /// Description
        #[arg(long)]
        description: String,

        /// Part number
        #[arg(long)]
        part_number: String,

        /// Unit price, e.g. '12.50' or '$12.50'
        #[arg(long)]
        price: String,

        /// Quantity, values below 1 are treated as 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// List the quote lines
    List,
    /// Change the quantity of a line
    SetQty {
        /// Line number. 1-based.
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,

        /// Quantity, values below 1 are treated as 1
        #[arg(long, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a line
    Remove {
        /// Line number. 1-based.
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,

        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Clear the quote and the build case
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Output the quote as text
    Text {
        /// Item line style
        #[arg(long, value_enum, default_value_t = ItemLineStyleArg::Plain)]
        style: ItemLineStyleArg,

        /// Copy the text to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum PurchaseOrderCommand {
    /// Output purchase order requests, one per supplier
    Text {
        /// Job number, defaults to the configured job
        #[arg(long)]
        job: Option<String>,

        /// Copy the text to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Output purchase order request emails, one per supplier
    Email {
        /// Job number, defaults to the configured job
        #[arg(long)]
        job: Option<String>,

        /// Store, required for suppliers that supply from several stores, prompted for when missing
        #[arg(long)]
        store: Option<String>,

        /// Copy the emails to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum EmailCommand {
    /// Output a quote email for the customer
    Quote {
        /// Job number, defaults to the configured job
        #[arg(long)]
        job: Option<String>,

        /// Copy the email to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum BuildCaseCommand {
    /// Update the build case, only the given fields change
    Set {
        /// Customer notes
        #[arg(long)]
        customer_notes: Option<String>,

        /// Estimator notes, replaces the generated notes
        #[arg(long)]
        estimator_notes: Option<String>,

        /// Routine visit
        #[arg(long, value_enum)]
        routine: Option<RoutineVisitArg>,

        /// Nights of accommodation
        #[arg(long)]
        nights: Option<u32>,

        /// Normal time hours
        #[arg(long, allow_negative_numbers = true)]
        nt_hours: Option<Decimal>,

        /// Normal time technicians
        #[arg(long)]
        nt_techs: Option<u32>,

        /// Normal time travel hours
        #[arg(long, allow_negative_numbers = true)]
        nt_travel: Option<Decimal>,

        /// After hours hours
        #[arg(long, allow_negative_numbers = true)]
        ah_hours: Option<Decimal>,

        /// After hours technicians
        #[arg(long)]
        ah_techs: Option<u32>,

        /// After hours travel hours
        #[arg(long, allow_negative_numbers = true)]
        ah_travel: Option<Decimal>,
    },
    /// Move the build case wizard to the next or previous step
    Step {
        /// Direction
        #[arg(value_enum)]
        direction: StepDirectionArg,
    },
    /// Output the estimator notes
    Notes {
        /// Regenerate the notes from the quote and build case, discarding edits
        #[arg(long)]
        refresh: bool,

        /// Copy the notes to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum ConfigCommand {
    /// Update the settings, shows them when nothing is given
    Set {
        /// Default job number, an empty value clears it
        #[arg(long)]
        job: Option<String>,

        /// Default sort, e.g. 'SUPPLIER:ASC'
        #[arg(long, value_name = "KEY[:ORDER]", value_parser = sort_spec_parser)]
        sort: Option<SortSpec>,
    },
}

impl ModeCommand {
    /// Whether the text output of the command should be copied to the clipboard.
    pub(crate) fn copy(&self) -> bool {
        match self {
            ModeCommand::Quote {
                command: QuoteCommand::Text {
                    copy, ..
                },
            }
            | ModeCommand::Po {
                command: PurchaseOrderCommand::Text {
                    copy, ..
                },
            }
            | ModeCommand::Po {
                command: PurchaseOrderCommand::Email {
                    copy, ..
                },
            }
            | ModeCommand::Email {
                command: EmailCommand::Quote {
                    copy, ..
                },
            }
            | ModeCommand::BuildCase {
                command: BuildCaseCommand::Notes {
                    copy, ..
                },
            } => *copy,
            _ => false,
        }
    }

    /// Whether confirmations should be skipped.
    pub(crate) fn confirmed(&self) -> bool {
        match self {
            ModeCommand::Quote {
                command: QuoteCommand::Remove {
                    yes, ..
                },
            }
            | ModeCommand::Quote {
                command: QuoteCommand::Clear {
                    yes,
                },
            } => *yes,
            _ => false,
        }
    }
}

impl FilterArgs {
    fn into_query(self, text: String) -> (SearchQuery, Option<SortSpec>) {
        let query = SearchQuery {
            text,
            supplier: self.supplier.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
        };
        (query, self.sort)
    }
}

/// Errors for arguments clap cannot check.
#[derive(Error, Debug)]
pub(crate) enum EventError {
    /// The query to add a part with is blank.
    #[error("A query is required to add a part")]
    EmptyQuery,
}

impl TryFrom<Opts> for Event {
    type Error = EventError;

    fn try_from(opts: Opts) -> Result<Self, Self::Error> {
        match opts.command {
            ModeCommand::Load {
                file,
            } => Ok(Event::LoadParts {
                path: file,
            }),
            ModeCommand::ClearCache => Ok(Event::ClearPartsCache),
            ModeCommand::Search {
                query,
                filters,
            } => {
                let (query, sort) = filters.into_query(query.join(" "));
                Ok(Event::Search {
                    query,
                    sort,
                })
            }
            ModeCommand::Quote {
                command,
            } => match command {
                QuoteCommand::Add {
                    query,
                    row,
                    filters,
                } => {
                    if query.trim().is_empty() {
                        return Err(EventError::EmptyQuery);
                    }
                    let (query, sort) = filters.into_query(query);
                    Ok(Event::AddPart {
                        query,
                        row: row.map(|row| usize::from(row - 1)),
                        sort,
                    })
                }
                QuoteCommand::AddManual {
                    supplier,
                    description,
                    part_number,
                    price,
                    qty,
                } => Ok(Event::AddManualLine {
                    line: ManualLine {
                        supplier,
                        description,
                        part_number,
                        price,
                        qty,
                    },
                }),
                QuoteCommand::List => Ok(Event::ListQuote),
                QuoteCommand::SetQty {
                    index,
                    qty,
                } => Ok(Event::SetQuantity {
                    index: usize::from(index - 1),
                    qty,
                }),
                QuoteCommand::Remove {
                    index, ..
                } => Ok(Event::PrepareRemoval {
                    index: usize::from(index - 1),
                }),
                QuoteCommand::Clear {
                    ..
                } => Ok(Event::ClearQuote),
                QuoteCommand::Text {
                    style, ..
                } => Ok(Event::QuoteText {
                    style: style.into(),
                }),
            },
            ModeCommand::Po {
                command,
            } => match command {
                PurchaseOrderCommand::Text {
                    job, ..
                } => Ok(Event::PurchaseOrderText {
                    job,
                }),
                PurchaseOrderCommand::Email {
                    job,
                    store,
                    ..
                } => Ok(Event::PurchaseOrderEmails {
                    job,
                    store,
                }),
            },
            ModeCommand::Email {
                command: EmailCommand::Quote {
                    job, ..
                },
            } => Ok(Event::QuoteEmail {
                job,
            }),
            ModeCommand::BuildCase {
                command,
            } => match command {
                BuildCaseCommand::Set {
                    customer_notes,
                    estimator_notes,
                    routine,
                    nights,
                    nt_hours,
                    nt_techs,
                    nt_travel,
                    ah_hours,
                    ah_techs,
                    ah_travel,
                } => Ok(Event::UpdateBuildCase {
                    changes: BuildCaseChanges {
                        customer_notes,
                        estimator_notes,
                        routine_visit: routine.map(Into::into),
                        accommodation_nights: nights,
                        normal_time: LabourChanges {
                            hours: nt_hours,
                            techs: nt_techs,
                            travel_hours: nt_travel,
                        },
                        after_hours: LabourChanges {
                            hours: ah_hours,
                            techs: ah_techs,
                            travel_hours: ah_travel,
                        },
                    },
                }),
                BuildCaseCommand::Step {
                    direction,
                } => match direction {
                    StepDirectionArg::Next => Ok(Event::NextStep),
                    StepDirectionArg::Previous => Ok(Event::PreviousStep),
                },
                BuildCaseCommand::Notes {
                    refresh, ..
                } => Ok(Event::EstimatorNotes {
                    refresh,
                }),
            },
            ModeCommand::Config {
                command: ConfigCommand::Set {
                    job,
                    sort,
                },
            } => Ok(Event::UpdateConfig {
                default_job: job,
                default_sort: sort,
            }),
        }
    }
}
