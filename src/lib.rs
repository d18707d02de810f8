pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use codec::{CodecError, Encoding, HexJsonCodec, JsonCodec};
pub use commands::{run, CommandError};
pub use config::{Config, ConfigError};
