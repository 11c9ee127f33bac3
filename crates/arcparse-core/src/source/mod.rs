mod bytes;
mod reader;

pub use bytes::{ByteBuffer, decode_utf8, split_nul_strings};
pub use reader::LogSource;
