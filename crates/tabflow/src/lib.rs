//! A streaming tabular-record transformer: a pipeline of stateful `Verb`s
//! applied to a stream of named-field `Record`s, plus a small embedded DSL
//! runtime (`dsl`) for user-defined functions and subroutines.

// modules
pub mod dsl;          // the DSL runtime: ast, bind stack, control flow, statements, functions
pub mod mv;           // mv, the DSL's tagged-value type
pub mod record;       // Record, the ordered name->value map flowing through the pipeline
mod record_streamer;  // STDIN/STDOUT Record I/O
pub mod verbs;        // the verb pipeline and the two illustrated verbs
pub mod workflow;     // Config/Counters/Log ambient plumbing, following mdi's workflow module

// re-exports
pub use mv::Mv;
pub use record::Record;
pub use record_streamer::{RecordReader, RecordWriter};
pub use verbs::{Context, Pipeline, Verb};
pub use workflow::file::{InputFile, OutputFile};
