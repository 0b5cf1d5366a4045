use std::sync::Arc;

use anyhow::anyhow;
use crossbeam_channel::Sender;
use quote_app::effects::quote_view_renderer::QuoteViewRendererOperation;
use quote_app::{Effect, Event, QuoteView, Quoter};
use tracing::trace;

pub type Core = Arc<crux_core::Core<Quoter>>;

/// What the shell has to do in response to an event.
#[derive(Debug)]
pub enum ShellRequest {
    /// The view model changed, errors, notices and saving are handled from it.
    Refresh,
    Show(Box<QuoteView>),
}

pub fn new() -> Core {
    Arc::new(crux_core::Core::new())
}

pub fn update(core: &Core, event: Event, tx: &Sender<ShellRequest>) -> anyhow::Result<()> {
    trace!("event: {:?}", event);

    for effect in core.process_event(event) {
        let request = shell_request(effect);
        trace!("shell request: {:?}", request);

        tx.send(request)
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Neither effect expects a response, so the requests are not resolved.
fn shell_request(effect: Effect) -> ShellRequest {
    match effect {
        Effect::Render(_) => ShellRequest::Refresh,
        Effect::QuoteView(request) => {
            let QuoteViewRendererOperation::View {
                view,
            } = request.operation;

            ShellRequest::Show(Box::new(view))
        }
    }
}
