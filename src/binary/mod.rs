//! Byte-layout primitives shared by every metric decoder.
//!
//! InterOp files are little-endian throughout. The layers here know nothing
//! about metric semantics:
//!
//! 1. [`unsigned`] widens raw 2- and 4-byte unsigned values
//! 2. [`RecordCursor`] pulls fixed-width scalars out of one record, bounds-checked
//! 3. [`FileHeader`] parses and validates the 2-byte file preamble

pub mod cursor;
pub mod header;
pub mod unsigned;

pub use cursor::RecordCursor;
pub use header::{FileHeader, HEADER_SIZE, parse_header};
pub use unsigned::{u16_from_le, u32_from_le};
