//! Command implementations.

pub mod configure;
pub mod history;
pub mod show;
pub mod simplify;
pub mod usage;
pub mod verify;

pub use self::configure::execute_config;
pub use self::history::execute_history;
pub use self::show::execute_show;
pub use self::simplify::execute_simplify;
pub use self::usage::execute_usage;
pub use self::verify::execute_verify;
