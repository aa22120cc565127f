//! Core modules for RepQuest

pub mod geometry;
pub mod classifier;
pub mod counter;
pub mod sets;
pub mod session;
pub mod streak;
pub mod store;
pub mod recorder;
pub mod report;
pub mod api;

pub use geometry::joint_angle;
pub use classifier::{classify, classify_signal, ExerciseClassifier, Rule};
pub use counter::RepCounter;
pub use sets::{set_progress, SetTracker};
pub use session::SessionContext;
pub use streak::update_streak;
pub use store::{KeyValueStore, MemoryStore, FileStore, ProgressStore};
pub use recorder::{SessionRecorder, session_duration_secs};
pub use report::{ProgressReport, format_duration};
pub use api::{create_router, create_router_with_grace, run_server};
