//! The `sec2gmt` verb: rewrite numeric-seconds field values in place as
//! ISO-8601 GMT timestamps (SPEC_FULL.md §4.4).

use crate::mv::Mv;
use crate::record::Record;
use crate::verbs::{parse_csv_list, Context, Verb};

/// Rewrites each field named in `L`, when present, from seconds-since-epoch
/// to `YYYY-MM-DDTHH:MM:SSZ`. Fields not present are left untouched; an
/// empty value is overwritten with the empty string (a semantic no-op that
/// still exercises the write path, per spec.md §4.4).
pub struct Sec2Gmt {
    names: Vec<String>,
}

impl Sec2Gmt {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl Verb for Sec2Gmt {
    fn process(&mut self, record: Option<Record>, _ctx: &Context) -> Vec<Option<Record>> {
        match record {
            None => vec![None],
            Some(mut rec) => {
                for name in &self.names {
                    let Some(value) = rec.get(name) else { continue };
                    if value.is_empty() {
                        rec.put(name.clone(), String::new());
                        continue;
                    }
                    // scan_number_or_die: a non-numeric value is a fatal
                    // verb runtime type error, not a recoverable Mv::Error
                    // (spec.md §7.4).
                    let formatted = Mv::scan_number_or_die(value).format_iso8601_gmt();
                    let Mv::String(stamp) = formatted else {
                        panic!("sec2gmt: could not format field \"{name}\" as an ISO-8601 GMT timestamp");
                    };
                    rec.put(name.clone(), stamp);
                }
                vec![Some(rec)]
            }
        }
    }
}

/// Parse `sec2gmt`'s one positional argument: a CSV list of field names
/// (SPEC_FULL.md §6). Missing argument is a parse error.
pub fn parse_cli(args: &[String]) -> Result<Sec2Gmt, String> {
    match args.first() {
        Some(csv) if args.len() == 1 => Ok(Sec2Gmt::new(parse_csv_list(csv))),
        Some(_) => Err(format!("sec2gmt: too many arguments\n{}", usage())),
        None => Err(format!("sec2gmt: missing field-name list\n{}", usage())),
    }
}

fn usage() -> &'static str {
    "usage: sec2gmt <field,name,csv>"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Log;

    fn ctx(log: &Log) -> Context<'_> {
        Context { log }
    }

    #[test]
    fn rewrites_known_epoch() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["t".to_string()]);
        let mut rec = Record::new();
        rec.put("t", "1700000000");
        rec.put("x", "foo");
        let out = verb.process(Some(rec), &ctx(&log));
        let rec = out[0].as_ref().unwrap();
        assert_eq!(rec.get("t"), Some("2023-11-14T22:13:20Z"));
        assert_eq!(rec.get("x"), Some("foo"));
    }

    #[test]
    fn leaves_absent_name_untouched() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["missing".to_string()]);
        let mut rec = Record::new();
        rec.put("t", "1700000000");
        let out = verb.process(Some(rec), &ctx(&log));
        let rec = out[0].as_ref().unwrap();
        assert_eq!(rec.get("t"), Some("1700000000"));
    }

    #[test]
    fn empty_value_stays_empty() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["t".to_string()]);
        let mut rec = Record::new();
        rec.put("t", "");
        let out = verb.process(Some(rec), &ctx(&log));
        let rec = out[0].as_ref().unwrap();
        assert_eq!(rec.get("t"), Some(""));
    }

    #[test]
    fn preserves_field_order() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["b".to_string()]);
        let mut rec = Record::new();
        rec.put("a", "1");
        rec.put("b", "1700000000");
        rec.put("c", "3");
        let out = verb.process(Some(rec), &ctx(&log));
        let rec = out[0].as_ref().unwrap();
        let names: Vec<&str> = rec.field_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    #[should_panic]
    fn non_numeric_value_is_fatal() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["t".to_string()]);
        let mut rec = Record::new();
        rec.put("t", "not-a-number");
        verb.process(Some(rec), &ctx(&log));
    }

    #[test]
    fn end_of_stream_yields_single_none() {
        let log = Log::new("test");
        let mut verb = Sec2Gmt::new(vec!["t".to_string()]);
        assert_eq!(verb.process(None, &ctx(&log)), vec![None]);
    }

    #[test]
    fn parse_cli_requires_positional_argument() {
        assert!(parse_cli(&[]).is_err());
        assert!(parse_cli(&["t".to_string()]).is_ok());
        assert!(parse_cli(&["t".to_string(), "extra".to_string()]).is_err());
    }
}
