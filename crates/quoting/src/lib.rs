pub mod build_case;
pub mod group;
pub mod line;
pub mod notes;
pub mod quote;
pub mod text;
