//! Survey and visualization front end for the longevity metric workbench.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod session;
