//! C1: fixed-width primitives, the byte-channel abstraction, environment
//! configuration, and the plugin-loader trait. This is concept-level —
//! the hash table/tree/list utilities such a layer would otherwise need
//! are represented by `std::collections` and a plain `Vec`-backed
//! descriptor frame stack instead (see `tre::engine`).

pub mod byte_channel;
pub mod config;
pub mod plugin_loader;

pub use byte_channel::{ByteChannel, ChannelIo, FileChannel, MemoryChannel, Whence};
pub use config::Config;
pub use plugin_loader::{PluginLoader, StaticRegistry};
