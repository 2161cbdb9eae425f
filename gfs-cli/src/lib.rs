pub mod command;
pub mod delete;
