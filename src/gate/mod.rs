mod reader_writer_gate;
pub use reader_writer_gate::*;
