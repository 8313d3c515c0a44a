pub mod catalog;
pub mod convert;
pub mod setup;
pub mod ui;
