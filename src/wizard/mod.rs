pub mod session;
pub mod submit;

pub use session::{NextOutcome, WizardSession};
pub use submit::SubmitAction;
