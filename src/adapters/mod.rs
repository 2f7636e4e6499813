// Adapters layer: translate key=value requests into calls on the legacy back ends.

pub mod attendance;
pub mod grading;
pub mod library;

pub use attendance::{AttendanceAdapter, ATTENDANCE_SYSTEM};
pub use grading::{GradingAdapter, GRADING_SYSTEM};
pub use library::{LibraryAction, LibraryAdapter, LIBRARY_SYSTEM};
