pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod countdown;
pub mod directory;
pub mod domain;
pub mod error;
pub mod flows;
pub mod logging;
pub mod wizard;

pub use crate::core::flow;
pub use crate::core::step;
pub use crate::core::validation;
pub use crate::core::validators;
pub use wizard::{NextOutcome, SubmitAction, WizardSession};
