pub mod check;
pub mod format;
mod output;
mod source;
