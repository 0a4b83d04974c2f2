pub mod cli;
pub mod elapsed;
pub mod errors;
pub mod format;
pub mod record;

pub use elapsed::{ElapsedTime, State};
pub use errors::{ElapsedTimeError, Field};
