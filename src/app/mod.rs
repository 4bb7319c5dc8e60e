pub mod batch;
pub mod interactive;
pub mod terminal;

pub use batch::{run_batch, BatchRequest};
pub use interactive::run_interactive;
pub use terminal::Terminal;
