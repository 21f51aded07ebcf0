pub mod commands;
pub mod source;
