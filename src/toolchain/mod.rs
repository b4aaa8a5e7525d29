//! Invocation of the external module toolchain and decoding of its output.

pub mod go;
pub mod stream;

pub use go::{find_go_tool, GoToolchain};
pub use stream::ModuleStream;
