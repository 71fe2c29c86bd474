//! Build a two-verb pipeline in code and drive it over a handful of
//! records, the way `tabflow`'s CLI dispatcher drives one over STDIN/STDOUT
//! (SPEC_FULL.md §8 scenario 7).

use tabflow::verbs::having_fields::Criterion;
use tabflow::verbs::{having_fields::HavingFields, sec2gmt::Sec2Gmt};
use tabflow::workflow::Log;
use tabflow::{Context, Pipeline, Record};

fn main() {
    let log = Log::new("pipeline_basics");
    let ctx = Context { log: &log };

    let mut pipeline = Pipeline::new();
    pipeline.push(Box::new(HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::AtLeast)));
    pipeline.push(Box::new(Sec2Gmt::new(vec!["a".to_string()])));

    let mut rec1 = Record::new();
    rec1.put("a", "1700000000");
    rec1.put("b", "2");
    rec1.put("c", "3");

    let mut rec2 = Record::new();
    rec2.put("a", "1700000000"); // missing "b", dropped by having-fields

    for rec in [Some(rec1), Some(rec2), None] {
        for out in pipeline.feed(rec, &ctx) {
            match out {
                Some(rec) => println!("{:?}", rec.iter().collect::<Vec<_>>()),
                None => println!("-- end of stream --"),
            }
        }
    }
}
