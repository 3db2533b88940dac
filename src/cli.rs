pub mod command;
pub mod run;
