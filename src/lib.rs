// Library surface for headless/integration tests and reuse.
// Terminal rendering and key bindings stay in the binary.
pub mod answer;
pub mod app_dirs;
pub mod backdrop;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod timers;

pub use dataset::{CharacterEntry, Dataset};
pub use error::QuizError;
pub use quiz::Quiz;
pub use session::{Feedback, Mode, SessionConfig, SessionSnapshot, Status, SubmitReason, TimeLimit};
pub use summary::{SessionSummary, Verdict};
