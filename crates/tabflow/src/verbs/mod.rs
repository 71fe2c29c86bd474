//! The verb pipeline: per-record transformation stages with private state,
//! threaded together by a `Pipeline` (SPEC_FULL.md §2, §4.2, §5).

pub mod having_fields;
pub mod sec2gmt;

pub use having_fields::HavingFields;
pub use sec2gmt::Sec2Gmt;

use crate::record::Record;
use crate::workflow::Log;

/// Per-record context passed to every verb's `process` call. Carries only
/// what the two illustrated verbs need today (a logger, following `mdi`'s
/// `workflow::Log`); extend here as further verbs are added, rather than
/// widening individual verbs' signatures.
pub struct Context<'a> {
    pub log: &'a Log,
}

/// A per-record transformation stage with private state (SPEC_FULL.md
/// §4.2). `process` is called once per input record (`Some`) and exactly
/// once more with `None` to signal end-of-stream; the `free` hook from the
/// distilled spec is modeled as `Drop`, implemented automatically for
/// verbs with no teardown action and explicitly where one is needed.
///
/// - Feeding `Some(record)`: the verb returns zero or more output records,
///   in order. Returning the input record passes it through; an empty
///   `Vec` drops it; a verb may also synthesize new records.
/// - Feeding `None`: the verb must return a list whose final element is
///   `None`, preceded optionally by any records it was holding onto
///   (flushed). No verb in this crate buffers, so today that list is
///   always `vec![None]`, but the contract is general.
pub trait Verb {
    fn process(&mut self, record: Option<Record>, ctx: &Context) -> Vec<Option<Record>>;
}

/// An ordered sequence of verbs. Feeds each record through every verb in
/// turn, composing by feeding each verb's *entire* output list (including
/// the terminal `None` sentinel, when present) into the next verb, one
/// element at a time, preserving order (SPEC_FULL.md §4.2, §5
/// "Ordering").
#[derive(Default)]
pub struct Pipeline {
    verbs: Vec<Box<dyn Verb>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a verb to the end of the pipeline.
    pub fn push(&mut self, verb: Box<dyn Verb>) {
        self.verbs.push(verb);
    }

    /// Feed one record (or `None` for end-of-stream) through every verb in
    /// order, returning the final list of outputs (and, on end-of-stream,
    /// the terminal `None`).
    pub fn feed(&mut self, record: Option<Record>, ctx: &Context) -> Vec<Option<Record>> {
        let mut stream = vec![record];
        for verb in self.verbs.iter_mut() {
            let mut next_stream = Vec::with_capacity(stream.len());
            for item in stream {
                next_stream.extend(verb.process(item, ctx));
            }
            stream = next_stream;
        }
        stream
    }
}

/// Parse a literal-comma-separated field-name list (SPEC_FULL.md §6: "CSV
/// list is parsed with literal commas as separators; empty fields in the
/// list are permitted but undefined"). Used by both verbs' CLI parsers.
pub fn parse_csv_list(s: &str) -> Vec<String> {
    s.split(',').map(str::to_string).collect()
}
