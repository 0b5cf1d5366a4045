use std::path::PathBuf;
use std::time::SystemTime;

pub use catalog::part::Part;
pub use catalog::price::format_money;
use chrono::Utc;
use crux_core::macros::effect;
use crux_core::render::RenderOperation;
pub use crux_core::Core;
use crux_core::{render, App, Command};
pub use lookup::search::{MatchMode, SearchQuery};
use lookup::search::search;
use lookup::sort::sort_parts;
pub use lookup::sort::{SortKey, SortSpec};
use quoting::build_case::BuildCaseError;
pub use quoting::build_case::{BuildCase, BuildCaseChanges, LabourBlock, LabourChanges, RoutineVisit, WizardStep};
use quoting::group::group_by_supplier;
pub use quoting::line::{ManualLine, QuoteLine};
use quoting::notes::synthesize_estimator_notes;
use quoting::quote::{AddOutcome, Quote, QuoteError};
pub use quoting::quote::PendingRemoval;
use quoting::text::{purchase_order_email, purchase_order_text, quote_email, quote_text, QuoteTextError};
pub use quoting::text::{item_line, EmailDraft, ItemLineStyle};
use rust_decimal::Decimal;
use stores::kv::FileKeyValueStore;
use stores::parts::{parse_parts, read_parts_csv, PartsParseError};
pub use stores::session::CsvSourceMetadata;
use stores::session::{SessionStore, SETTINGS_KEY};
use thiserror::Error;
use tracing::{info, trace, warn};

use crate::config::Config;
use crate::effects::quote_view_renderer;
use crate::effects::quote_view_renderer::QuoteViewRendererOperation;

pub mod config;
pub mod effects;

#[derive(Default)]
pub struct Quoter;

#[derive(Default)]
pub struct Model {
    session: Option<SessionStore>,

    parts: Vec<Part>,
    csv_metadata: Option<CsvSourceMetadata>,

    quote: Quote,
    build_case: BuildCase,
    config: Config,

    pending_removal: Option<PendingRemoval>,

    /// True when the quote, build case or config need saving.
    modified: bool,
    notices: Vec<String>,
    error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

impl Model {
    fn session_mut(&mut self) -> Result<&mut SessionStore, AppError> {
        self.session
            .as_mut()
            .ok_or(AppError::OperationRequiresSession)
    }

    fn sort_or_default(&self, sort: Option<SortSpec>) -> SortSpec {
        sort.unwrap_or(self.config.default_sort)
    }

    fn quote_overview(&self) -> QuoteView {
        QuoteView::Quote(QuoteOverview {
            lines: self.quote.lines().to_vec(),
            total: self.quote.total(),
        })
    }

    /// Stored estimator notes, or a preview built from the quote when there are none yet.
    fn build_case_overview(&self) -> QuoteView {
        let estimator_notes = self
            .build_case
            .estimator_notes
            .clone()
            .unwrap_or_else(|| synthesize_estimator_notes(self.quote.lines(), &self.build_case));

        QuoteView::BuildCase(BuildCaseOverview {
            build_case: self.build_case.clone(),
            estimator_notes,
        })
    }

    fn notice(&mut self, notice: String) {
        info!("{}", notice);
        self.notices.push(notice);
    }
}

#[effect]
pub enum Effect {
    Render(RenderOperation),
    QuoteView(QuoteViewRendererOperation),
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum QuoteView {
    Parts(PartsOverview),
    Quote(QuoteOverview),
    Text(String),
    Emails(Vec<EmailDraft>),
    BuildCase(BuildCaseOverview),
    Config(Config),
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct PartsOverview {
    /// Matching parts, in display order.
    pub parts: Vec<Part>,
    pub total_parts: usize,
    pub mode: MatchMode,
    pub tokens: Vec<String>,
    pub sort: SortSpec,
    pub source: Option<CsvSourceMetadata>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct QuoteOverview {
    pub lines: Vec<QuoteLine>,
    pub total: Decimal,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct BuildCaseOverview {
    pub build_case: BuildCase,
    pub estimator_notes: String,
}

#[derive(serde::Serialize, serde::Deserialize, Default, PartialEq, Debug)]
pub struct QuoteOperationViewModel {
    pub modified: bool,
    pub error: Option<(chrono::DateTime<chrono::Utc>, String)>,
    /// Messages for the user about the last operation.
    pub notices: Vec<String>,
    /// A removal waiting for confirmation.
    pub pending_removal: Option<PendingRemoval>,
    /// Labels of the supplier groups in the quote that need a store for purchase order emails.
    pub stores_required_for: Vec<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub enum Event {
    None,
    /// Opens the data directory and restores the cached parts list, quote, build case and config.
    Initialize {
        data_dir: PathBuf,
    },
    Save,

    //
    // Parts
    //
    LoadParts {
        path: PathBuf,
    },
    ClearPartsCache,
    Search {
        query: SearchQuery,
        sort: Option<SortSpec>,
    },

    //
    // Quote
    //
    /// Adds the part matching the query, `row` (0-based) chooses between several matches.
    AddPart {
        query: SearchQuery,
        row: Option<usize>,
        sort: Option<SortSpec>,
    },
    AddManualLine {
        line: ManualLine,
    },
    ListQuote,
    SetQuantity {
        index: usize,
        qty: i64,
    },
    PrepareRemoval {
        index: usize,
    },
    ConfirmRemoval,
    CancelRemoval,
    /// Clears the quote and the build case.
    ClearQuote,

    //
    // Text outputs
    //
    QuoteText {
        style: ItemLineStyle,
    },
    PurchaseOrderText {
        job: Option<String>,
    },
    PurchaseOrderEmails {
        job: Option<String>,
        store: Option<String>,
    },
    QuoteEmail {
        job: Option<String>,
    },

    //
    // Build case
    //
    UpdateBuildCase {
        changes: BuildCaseChanges,
    },
    NextStep,
    PreviousStep,
    EstimatorNotes {
        refresh: bool,
    },

    //
    // Config
    //
    UpdateConfig {
        /// A blank job clears the default.
        default_job: Option<String>,
        default_sort: Option<SortSpec>,
    },
}

fn render_with_view(view: QuoteView) -> Command<Effect, Event> {
    Command::all([render::render(), quote_view_renderer::view(view)])
}

impl Quoter {
    fn update_inner(
        &self,
        event: <Quoter as App>::Event,
    ) -> Box<
        dyn FnOnce(
            &mut <Quoter as App>::Model,
        ) -> Result<Command<<Quoter as App>::Effect, <Quoter as App>::Event>, AppError>,
    > {
        match event {
            Event::None => Box::new(|_model: &mut Model| Ok(render::render())),
            Event::Initialize {
                data_dir,
            } => Box::new(move |model: &mut Model| {
                info!("Initializing. data_dir: {:?}", data_dir);

                let session = SessionStore::new(Box::new(FileKeyValueStore::new(data_dir)));
                Self::restore_session(model, session)?;

                Ok(render::render())
            }),
            Event::Save => Box::new(|model: &mut Model| {
                let quote = model.quote.clone();
                let build_case = model.build_case.clone();
                let config = model.config.clone();

                let session = model.session_mut()?;
                session
                    .save_quote(&quote)
                    .map_err(AppError::PersistenceError)?;
                session
                    .save_build_case(&build_case)
                    .map_err(AppError::PersistenceError)?;
                session
                    .save_json(SETTINGS_KEY, &config)
                    .map_err(AppError::PersistenceError)?;

                info!("Saved session");
                model.modified = false;

                Ok(render::render())
            }),
            Event::LoadParts {
                path,
            } => Box::new(move |model: &mut Model| {
                let text = read_parts_csv(&path).map_err(AppError::OperationError)?;
                // a failed parse leaves the current parts list untouched
                let parsed = parse_parts(&text).map_err(AppError::PartsParseError)?;

                let metadata = CsvSourceMetadata {
                    source: path.display().to_string(),
                    loaded_at: Utc::now(),
                    part_count: parsed.row_count,
                };

                model
                    .session_mut()?
                    .save_parts_csv(&text, &metadata)
                    .map_err(AppError::PersistenceError)?;

                model.parts = parsed.parts;
                model.csv_metadata = Some(metadata);

                let notice = match parsed.row_count {
                    0 => "CSV loaded but contained 0 rows.".to_string(),
                    count => format!("Loaded {} parts. source: {}", count, path.display()),
                };
                model.notice(notice);

                Ok(render::render())
            }),
            Event::ClearPartsCache => Box::new(|model: &mut Model| {
                model
                    .session_mut()?
                    .clear_parts_cache()
                    .map_err(AppError::PersistenceError)?;

                model.parts.clear();
                model.csv_metadata = None;
                model.notice("Cleared the cached parts list".to_string());

                Ok(render::render())
            }),
            Event::Search {
                query,
                sort,
            } => Box::new(move |model: &mut Model| {
                if model.parts.is_empty() {
                    model.notice("No parts loaded".to_string());
                }

                let sort = model.sort_or_default(sort);
                let result = search(&model.parts, &query);
                let mut parts = result.parts;
                sort_parts(&mut parts, &sort);

                let overview = PartsOverview {
                    parts: parts.into_iter().cloned().collect(),
                    total_parts: model.parts.len(),
                    mode: result.mode,
                    tokens: result.tokens,
                    sort,
                    source: model.csv_metadata.clone(),
                };

                Ok(render_with_view(QuoteView::Parts(overview)))
            }),
            Event::AddPart {
                query,
                row,
                sort,
            } => Box::new(move |model: &mut Model| {
                if model.parts.is_empty() {
                    return Err(AppError::NoPartsLoaded);
                }

                let sort = model.sort_or_default(sort);
                let mut matches = search(&model.parts, &query).parts;
                sort_parts(&mut matches, &sort);

                let part = match (row, matches.as_slice()) {
                    (_, []) => return Err(AppError::NoMatchingPart(query.text)),
                    (Some(row), matches) => matches
                        .get(row)
                        .ok_or(AppError::InvalidRow {
                            row: row + 1,
                            count: matches.len(),
                        })?,
                    (None, [part]) => part,
                    (None, matches) => {
                        return Err(AppError::AmbiguousPart {
                            query: query.text,
                            count: matches.len(),
                        })
                    }
                };
                let part = Part::clone(part);

                let outcome = model
                    .quote
                    .add_from_part(&part)
                    .map_err(AppError::QuoteError)?;
                let notice = match outcome {
                    AddOutcome::Appended(_) => format!("Added to quote: {}", part.copy_text()),
                    AddOutcome::Merged(index) => format!(
                        "Quantity increased to {}: {}",
                        model.quote.lines()[index].qty,
                        part.copy_text()
                    ),
                };
                model.notice(notice);
                model.modified = true;

                Ok(render_with_view(model.quote_overview()))
            }),
            Event::AddManualLine {
                line,
            } => Box::new(move |model: &mut Model| {
                let index = model
                    .quote
                    .add_manual(line)
                    .map_err(AppError::QuoteError)?;
                let description = model.quote.lines()[index]
                    .description
                    .clone();

                model.notice(format!("Added manual line to quote: {}", description));
                model.modified = true;

                Ok(render_with_view(model.quote_overview()))
            }),
            Event::ListQuote => Box::new(|model: &mut Model| Ok(render_with_view(model.quote_overview()))),
            Event::SetQuantity {
                index,
                qty,
            } => Box::new(move |model: &mut Model| {
                model
                    .quote
                    .set_qty(index, qty)
                    .map_err(AppError::QuoteError)?;
                model.modified = true;

                Ok(render_with_view(model.quote_overview()))
            }),
            Event::PrepareRemoval {
                index,
            } => Box::new(move |model: &mut Model| {
                let pending = model
                    .quote
                    .prepare_removal(index)
                    .map_err(AppError::QuoteError)?;
                model.pending_removal.replace(pending);

                Ok(render::render())
            }),
            Event::ConfirmRemoval => Box::new(|model: &mut Model| {
                let pending = model
                    .pending_removal
                    .take()
                    .ok_or(AppError::NoPendingRemoval)?;
                let removed = model
                    .quote
                    .confirm_removal(pending)
                    .map_err(AppError::QuoteError)?;

                model.notice(format!("Removed from quote: {}", removed.description));
                model.modified = true;

                Ok(render_with_view(model.quote_overview()))
            }),
            Event::CancelRemoval => Box::new(|model: &mut Model| {
                if model.pending_removal.take().is_some() {
                    model.notice("Removal cancelled".to_string());
                }
                Ok(render::render())
            }),
            Event::ClearQuote => Box::new(|model: &mut Model| {
                model
                    .session_mut()?
                    .clear_quote()
                    .map_err(AppError::PersistenceError)?;

                model.quote.clear();
                model.build_case = BuildCase::default();
                model.pending_removal = None;

                model.notice("Cleared the quote and build case".to_string());
                model.modified = true;

                Ok(render::render())
            }),
            Event::QuoteText {
                style,
            } => Box::new(move |model: &mut Model| {
                if model.quote.is_empty() {
                    model.notice("The quote is empty".to_string());
                }

                let text = quote_text(model.quote.lines(), style);
                Ok(render_with_view(QuoteView::Text(text)))
            }),
            Event::PurchaseOrderText {
                job,
            } => Box::new(move |model: &mut Model| {
                if model.quote.is_empty() {
                    model.notice("The quote is empty".to_string());
                }

                let job = model.config.job_or_default(job);
                let text = purchase_order_text(model.quote.lines(), job.as_deref());
                Ok(render_with_view(QuoteView::Text(text)))
            }),
            Event::PurchaseOrderEmails {
                job,
                store,
            } => Box::new(move |model: &mut Model| {
                if model.quote.is_empty() {
                    return Err(AppError::QuoteTextError(QuoteTextError::EmptyQuote));
                }

                let job = model.config.job_or_default(job);

                // every draft or none of them
                let drafts = group_by_supplier(model.quote.lines())
                    .iter()
                    .map(|group| purchase_order_email(group, job.as_deref(), store.as_deref()))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(AppError::QuoteTextError)?;

                Ok(render_with_view(QuoteView::Emails(drafts)))
            }),
            Event::QuoteEmail {
                job,
            } => Box::new(move |model: &mut Model| {
                let job = model.config.job_or_default(job);
                let draft = quote_email(model.quote.lines(), job.as_deref()).map_err(AppError::QuoteTextError)?;

                Ok(render_with_view(QuoteView::Emails(vec![draft])))
            }),
            Event::UpdateBuildCase {
                changes,
            } => Box::new(move |model: &mut Model| {
                if changes.is_empty() {
                    warn!("No build case changes");
                } else {
                    model
                        .build_case
                        .apply(changes)
                        .map_err(AppError::BuildCaseError)?;
                    model.modified = true;
                }

                Ok(render_with_view(model.build_case_overview()))
            }),
            Event::NextStep => Box::new(|model: &mut Model| {
                model.build_case.step = model.build_case.step.next();
                model.modified = true;

                Ok(render_with_view(model.build_case_overview()))
            }),
            Event::PreviousStep => Box::new(|model: &mut Model| {
                model.build_case.step = model.build_case.step.previous();
                model.modified = true;

                Ok(render_with_view(model.build_case_overview()))
            }),
            Event::EstimatorNotes {
                refresh,
            } => Box::new(move |model: &mut Model| {
                if refresh || model.build_case.estimator_notes.is_none() {
                    let notes = synthesize_estimator_notes(model.quote.lines(), &model.build_case);
                    model.build_case.estimator_notes = Some(notes);
                    model.modified = true;
                }

                Ok(render_with_view(model.build_case_overview()))
            }),
            Event::UpdateConfig {
                default_job,
                default_sort,
            } => Box::new(move |model: &mut Model| {
                if let Some(job) = default_job {
                    model.config.set_default_job(&job);
                }
                if let Some(sort) = default_sort {
                    model.config.default_sort = sort;
                }
                model.modified = true;

                Ok(render_with_view(QuoteView::Config(model.config.clone())))
            }),
        }
    }

    fn restore_session(model: &mut Model, session: SessionStore) -> Result<(), AppError> {
        if let Some(text) = session
            .load_parts_csv()
            .map_err(AppError::PersistenceError)?
        {
            let parsed = parse_parts(&text).map_err(AppError::PartsParseError)?;
            info!("Restored cached parts. parts: {}", parsed.row_count);
            model.parts = parsed.parts;
        }
        model.csv_metadata = session
            .load_csv_metadata()
            .map_err(AppError::PersistenceError)?;

        model.quote = session
            .load_quote()
            .map_err(AppError::PersistenceError)?;
        model.build_case = session
            .load_build_case()
            .map_err(AppError::PersistenceError)?;
        model.config = session
            .load_json(SETTINGS_KEY)
            .map_err(AppError::PersistenceError)?
            .unwrap_or_default();

        model.session.replace(session);
        model.modified = false;

        Ok(())
    }
}

impl App for Quoter {
    type Event = Event;
    type Model = Model;
    type ViewModel = QuoteOperationViewModel;
    type Capabilities = ();
    type Effect = Effect;

    fn update(
        &self,
        event: Self::Event,
        model: &mut Self::Model,
        _caps: &Self::Capabilities,
    ) -> Command<Self::Effect, Self::Event> {
        model.notices.clear();

        let try_fn = self.update_inner(event);

        match try_fn(model) {
            Err(e) => {
                model
                    .error
                    .replace((chrono::DateTime::from(SystemTime::now()), e.to_string()));
                render::render()
            }
            Ok(command) => {
                model.error.take();
                command
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let stores_required_for = group_by_supplier(model.quote.lines())
            .into_iter()
            .filter(|group| group.key.requires_store())
            .map(|group| group.label().to_string())
            .collect();

        let view_model = QuoteOperationViewModel {
            modified: model.modified,
            error: model.error.clone(),
            notices: model.notices.clone(),
            pending_removal: model.pending_removal.clone(),
            stores_required_for,
        };

        trace!("view model: {:?}", view_model);

        view_model
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Operation requires a data directory")]
    OperationRequiresSession,
    #[error("Operation error, cause: {0}")]
    OperationError(anyhow::Error),
    #[error("Persistence error, cause: {0:#}")]
    PersistenceError(anyhow::Error),
    #[error("{0}")]
    PartsParseError(PartsParseError),
    #[error("{0}")]
    QuoteError(QuoteError),
    #[error("{0}")]
    BuildCaseError(BuildCaseError),
    #[error("{0}")]
    QuoteTextError(QuoteTextError),
    #[error("No parts loaded")]
    NoPartsLoaded,
    #[error("No matching part. query: '{0}'")]
    NoMatchingPart(String),
    #[error("Multiple matching parts, use a row number to choose one. query: '{query}', matches: {count}")]
    AmbiguousPart { query: String, count: usize },
    #[error("Invalid row. row: {row}, matches: {count}")]
    InvalidRow { row: usize, count: usize },
    #[error("No removal is pending")]
    NoPendingRemoval,
}

#[cfg(test)]
impl Model {
    fn with_session(session: SessionStore) -> Self {
        Self {
            session: Some(session),
            ..Self::default()
        }
    }
}
