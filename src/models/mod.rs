mod question;
mod state;

pub use question::{NUM_OPTIONS, OptionLabel, QuestionEdit, QuestionRecord, RecordError};
pub use state::AppState;
