//! Command-line tool dispatcher for the tabular-record verb pipeline,
//! following `mdi`'s `tools_dispatch_main.rs` template (SPEC_FULL.md §6):
//! the first argument names a verb, remaining arguments (up to a `--then`
//! separator, Miller-convention verb chaining) are that verb's own flags;
//! records flow from STDIN to STDOUT.

// dependencies
use std::env;
use std::process::ExitCode;

use tabflow::verbs::{having_fields, sec2gmt, Context, Pipeline};
use tabflow::workflow::{Config, Counters, Log};
use tabflow::{RecordReader, RecordWriter};

const TOOL_NAME: &str = "tabflow";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{TOOL_NAME}: missing verb\n{}", usage());
        return ExitCode::FAILURE;
    }

    let pipeline = match build_pipeline(&args) {
        Ok(pipeline) => pipeline,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    run(pipeline);
    ExitCode::SUCCESS
}

/// Build a `Pipeline` from `--then`-separated verb groups (SPEC_FULL.md
/// §6). A parse failure in any verb group aborts the whole build; the
/// driver never partially constructs a pipeline.
fn build_pipeline(args: &[String]) -> Result<Pipeline, String> {
    let mut pipeline = Pipeline::new();
    for group in args.split(|a| a == "--then") {
        let Some((verb_name, verb_args)) = group.split_first() else {
            return Err(format!("{TOOL_NAME}: empty verb group between `--then` separators\n{}", usage()));
        };
        match verb_name.as_str() {
            "having-fields" => {
                let verb = having_fields::parse_cli(verb_args).map_err(|e| format!("{TOOL_NAME}: {e}"))?;
                pipeline.push(Box::new(verb));
            }
            "sec2gmt" => {
                let verb = sec2gmt::parse_cli(verb_args).map_err(|e| format!("{TOOL_NAME}: {e}"))?;
                pipeline.push(Box::new(verb));
            }
            other => return Err(format!("{TOOL_NAME}: unknown verb \"{other}\"\n{}", usage())),
        }
    }
    Ok(pipeline)
}

fn usage() -> &'static str {
    "usage: tabflow <verb> [verb-args...] [--then <verb> [verb-args...]]...\n\
     verbs:\n  \
     having-fields (--at-least|--which-are|--at-most) <field,name,csv>\n  \
     sec2gmt <field,name,csv>"
}

/// Drive the pipeline over STDIN/STDOUT, one record at a time, then the
/// single end-of-stream signal (SPEC_FULL.md §5, §6).
fn run(mut pipeline: Pipeline) {
    let mut cfg = Config::new();
    cfg.set_bool("use_header", false); // no --implicit-csv-header toggle yet; always implicit
    let mut ctrs = Counters::new(
        TOOL_NAME,
        &[("records_in", "records read from input"), ("records_out", "records written to output")],
    );
    let log = Log::new(TOOL_NAME);
    log.initializing();
    let ctx = Context { log: &log };

    let mut reader = RecordReader::new(cfg.get_bool("use_header"));
    let mut writer = RecordWriter::new();

    loop {
        let record = reader.next_record();
        let is_eos = record.is_none();
        if record.is_some() {
            ctrs.increment("records_in");
        }
        for output in pipeline.feed(record, &ctx) {
            if let Some(rec) = output {
                writer.write_record(&rec);
                ctrs.increment("records_out");
            }
        }
        if is_eos {
            break;
        }
    }
    writer.flush();
    ctrs.print_all();
}
