use std::future::Future;

use crux_core::capability::Operation;
use crux_core::command::NotificationBuilder;
use crux_core::{Command, Request};

use crate::QuoteView;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum QuoteViewRendererOperation {
    View { view: QuoteView },
}

impl Operation for QuoteViewRendererOperation {
    type Output = ();
}

pub fn view_builder<Effect, Event>(view: QuoteView) -> NotificationBuilder<Effect, Event, impl Future<Output = ()>>
where
    Effect: From<Request<QuoteViewRendererOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(QuoteViewRendererOperation::View {
        view,
    })
}

pub fn view<Effect, Event>(view: QuoteView) -> Command<Effect, Event>
where
    Effect: From<Request<QuoteViewRendererOperation>> + Send + 'static,
    Event: Send + 'static,
{
    view_builder(view).into()
}
