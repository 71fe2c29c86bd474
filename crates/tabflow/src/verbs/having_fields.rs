//! The `having-fields` verb: a record-shape filter over field *names*
//! (never field values), with three criteria (SPEC_FULL.md §4.3).

use std::collections::HashSet;

use crate::record::Record;
use crate::verbs::{parse_csv_list, Context, Verb};

/// Which set relationship between a record's field names and the
/// configured name set `S` passes the record through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Pass iff every name in `S` appears in the record: `S ⊆ fields(r)`.
    AtLeast,
    /// Pass iff the record's field names equal `S` exactly (as sets, same
    /// cardinality).
    WhichAre,
    /// Pass iff every field name is in `S`: `fields(r) ⊆ S`.
    AtMost,
}

/// A record-shape filter keyed on field names (SPEC_FULL.md §4.3). The
/// field-name set `S` (materialized from the ordered list `L` the CLI
/// parses) is immutable after construction.
pub struct HavingFields {
    set: HashSet<String>,
    criterion: Criterion,
}

impl HavingFields {
    /// `names` is the ordered field-name list `L`; duplicates collapse when
    /// materializing the set, matching the spec's "also materialized as a
    /// set S with cardinality |S|".
    pub fn new(names: Vec<String>, criterion: Criterion) -> Self {
        Self {
            set: names.into_iter().collect(),
            criterion,
        }
    }

    fn passes(&self, rec: &Record) -> bool {
        match self.criterion {
            // Early exit as soon as matches == |S|; drop otherwise.
            Criterion::AtLeast => {
                let mut matches = 0;
                for name in &self.set {
                    if rec.get(name).is_some() {
                        matches += 1;
                        if matches == self.set.len() {
                            return true;
                        }
                    }
                }
                self.set.is_empty()
            }
            Criterion::WhichAre => {
                rec.field_count() == self.set.len() && rec.field_names().all(|n| self.set.contains(n))
            }
            Criterion::AtMost => rec.field_names().all(|n| self.set.contains(n)),
        }
    }
}

impl Verb for HavingFields {
    fn process(&mut self, record: Option<Record>, _ctx: &Context) -> Vec<Option<Record>> {
        match record {
            None => vec![None],
            Some(rec) => {
                if self.passes(&rec) {
                    vec![Some(rec)]
                } else {
                    Vec::new() // dropped (freed): the record goes out of scope here
                }
            }
        }
    }
}

/// Parse `having-fields` CLI flags (SPEC_FULL.md §6): exactly one of
/// `--at-least <csv>`, `--which-are <csv>`, `--at-most <csv>` is required.
/// A duplicate criterion flag, a missing field list, or any unrecognized
/// flag is a parse error (spec.md §7.1: reported to stderr by the caller,
/// pipeline build aborted). Per the Redesign Flags, a second criterion
/// flag is rejected outright rather than "later wins".
pub fn parse_cli(args: &[String]) -> Result<HavingFields, String> {
    let mut criterion: Option<(Criterion, Vec<String>)> = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let wanted = match flag {
            "--at-least" => Some(Criterion::AtLeast),
            "--which-are" => Some(Criterion::WhichAre),
            "--at-most" => Some(Criterion::AtMost),
            _ => None,
        };
        let Some(this_criterion) = wanted else {
            return Err(format!("having-fields: unrecognized flag \"{flag}\"\n{}", usage()));
        };
        let Some(csv) = args.get(i + 1) else {
            return Err(format!("having-fields: {flag} requires a field-name list\n{}", usage()));
        };
        if criterion.is_some() {
            return Err(format!(
                "having-fields: multiple criterion flags given; exactly one is required\n{}",
                usage()
            ));
        }
        criterion = Some((this_criterion, parse_csv_list(csv)));
        i += 2;
    }
    let Some((criterion, names)) = criterion else {
        return Err(format!("having-fields: a criterion flag is required\n{}", usage()));
    };
    Ok(HavingFields::new(names, criterion))
}

fn usage() -> &'static str {
    "usage: having-fields (--at-least|--which-are|--at-most) <field,name,csv>"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Log;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        let mut rec = Record::new();
        for (k, v) in pairs {
            rec.put(*k, *v);
        }
        rec
    }

    fn ctx(log: &Log) -> Context<'_> {
        Context { log }
    }

    #[test]
    fn at_least_passes_superset() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::AtLeast);
        let out = verb.process(Some(rec(&[("a", "1"), ("b", "2"), ("c", "3")])), &ctx(&log));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn at_least_passes_exact_match() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::AtLeast);
        let out = verb.process(Some(rec(&[("a", "1"), ("b", "2")])), &ctx(&log));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn at_least_drops_missing_name() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::AtLeast);
        let out = verb.process(Some(rec(&[("a", "1")])), &ctx(&log));
        assert!(out.is_empty());
    }

    #[test]
    fn which_are_passes_only_exact_set() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::WhichAre);
        assert_eq!(verb.process(Some(rec(&[("a", "1"), ("b", "2"), ("c", "3")])), &ctx(&log)).len(), 0);
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string()], Criterion::WhichAre);
        assert_eq!(verb.process(Some(rec(&[("a", "1"), ("b", "2")])), &ctx(&log)).len(), 1);
    }

    #[test]
    fn at_most_drops_record_with_extra_field() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string(), "c".to_string()], Criterion::AtMost);
        let out = verb.process(Some(rec(&[("a", "1"), ("x", "9")])), &ctx(&log));
        assert!(out.is_empty());
    }

    #[test]
    fn at_most_passes_subset() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string(), "b".to_string(), "c".to_string()], Criterion::AtMost);
        let out = verb.process(Some(rec(&[("a", "1")])), &ctx(&log));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn end_of_stream_yields_single_none() {
        let log = Log::new("test");
        let mut verb = HavingFields::new(vec!["a".to_string()], Criterion::AtLeast);
        assert_eq!(verb.process(None, &ctx(&log)), vec![None]);
    }

    #[test]
    fn parse_cli_requires_exactly_one_criterion() {
        assert!(parse_cli(&[]).is_err());
        assert!(parse_cli(&["--at-least".to_string(), "a,b".to_string(), "--at-most".to_string(), "c".to_string()]).is_err());
    }

    #[test]
    fn parse_cli_rejects_unrecognized_flag() {
        assert!(parse_cli(&["--bogus".to_string(), "a".to_string()]).is_err());
    }

    #[test]
    fn parse_cli_rejects_missing_field_list() {
        assert!(parse_cli(&["--at-least".to_string()]).is_err());
    }

    #[test]
    fn parse_cli_accepts_single_criterion() {
        let verb = parse_cli(&["--which-are".to_string(), "a,b,c".to_string()]);
        assert!(verb.is_ok());
    }
}
