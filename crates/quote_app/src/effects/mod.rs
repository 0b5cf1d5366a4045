pub mod quote_view_renderer;
