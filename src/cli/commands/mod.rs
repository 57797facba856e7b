//! One module per subcommand.

pub mod open;
pub mod seal;
