// Reference corpus — context indexes that answer "which contexts contain this word".

pub mod builder;
pub mod memory;
pub mod traits;

pub use builder::IndexBuilder;
pub use memory::MemoryIndex;
pub use traits::{ContextIds, ContextMode, CorpusAdapter};
