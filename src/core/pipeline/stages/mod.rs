//! The five pipeline stages plus the non-pipelined fallback.
//!
//! Each stage is a free function over the pipeline state. They are invoked
//! in reverse order (Writeback first, Fetch last) so that within one call to
//! `execute_cycle` every stage reads the latch contents its upstream
//! neighbor produced on the previous cycle, emulating one synchronous clock
//! edge.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod single_cycle;
pub mod write_back;
