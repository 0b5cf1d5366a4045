pub mod part;
pub mod price;
pub mod supplier;
