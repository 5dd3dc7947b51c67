//! Database access: the async connection pool used by request handlers and
//! the blocking migration runner used at startup and by `migrate`.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
