#[macro_use]
extern crate prettytable;

pub mod cli;
pub mod error;
pub mod interface;
pub mod model;
pub mod priority;
pub mod transfer;
