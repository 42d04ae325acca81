//! Delta extraction and syntactic validation
//!
//! Only fenced blocks tagged `delta` are read. Anything that merely looks
//! structured outside such a block is prose and is ignored. The parser never
//! allocates ids or checks that targets exist; both belong to the merge.

pub mod fence;
pub mod parser;

pub use fence::{extract_delta_blocks, DeltaBlock};
pub use parser::{parse_block, parse_message, ParseOutcome};
