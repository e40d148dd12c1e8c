//! # Primitive Codec
//!
//! Fixed-width big-endian integers and floats, one-byte booleans, and
//! length-prefixed UTF-8 strings, read from and written to a byte cursor.
//!
//! ## Wire conventions
//!
//! | Primitive | Width | Encoding |
//! |-----------|-------|----------|
//! | `i16`     | 2     | big-endian two's complement |
//! | `i32`     | 4     | big-endian two's complement |
//! | `i64`     | 8     | big-endian two's complement |
//! | `f32`     | 4     | big-endian IEEE-754 |
//! | `f64`     | 8     | big-endian IEEE-754 |
//! | `bool`    | 1     | `0` = false, anything else = true |
//! | string    | 4 + n | `i32` byte length, then `n` UTF-8 bytes |
//!
//! Counts use the same 4-byte prefix as strings. The codec is stateless
//! apart from the cursor position and performs no buffering of its own.

mod error;
mod reader;
mod writer;


pub use error::CodecError;
pub use reader::ByteReader;
pub use writer::ByteWriter;
