//! taskdeck-core: pure task model, filters, and board view projection

pub mod filter;
pub mod task;
pub mod time;
pub mod view;

pub use filter::TaskFilter;
pub use task::{NewTask, Priority, Task, TaskDraft};
pub use time::{parse_tz, relative_label};
pub use view::{BoardView, TaskRow, project};
