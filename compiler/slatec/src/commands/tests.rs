#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::io::Write as _;

use pretty_assertions::assert_eq;

use slate_diagnostic::ErrorCode;
use slate_eval::{buffer_sink, ExecMode, InputSource, RunOutcome};
use slate_parse::ParseConfig;
use slate_store::Role;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

const BRANCHY: &str = "\
REG NUM x 5
IF GREATER $x 3
    SPEAK \"big\"
ELIF EQUAL $x 3
    SPEAK \"three\"
ELSE
    SPEAK \"small\"
ENDIF
SPEAK \".\"
";

// Option parsing

#[test]
fn run_options_default_to_sequential_teacher() {
    let options = parse_run_options(&[]).unwrap();
    assert_eq!(options, RunOptions::default());
    assert_eq!(options.mode, ExecMode::Sequential);
    assert_eq!(options.role, Role::Teacher);
    assert_eq!(options.user, "admin");
}

#[test]
fn run_options_parse_every_flag() {
    let flags = args(&["-b", "--student", "--user=alice", "--capacity=12", "--dump"]);
    let options = parse_run_options(&flags).unwrap();
    assert_eq!(
        options,
        RunOptions {
            mode: ExecMode::Branching,
            role: Role::Student,
            user: "alice".to_string(),
            parse_config: ParseConfig { capacity: 12 },
            dump: true,
        }
    );
}

#[test]
fn run_options_reject_bad_flags() {
    assert!(parse_run_options(&args(&["--fast"])).is_err());
    assert!(parse_run_options(&args(&["--user="])).is_err());
    assert!(parse_run_options(&args(&["--capacity=0"])).is_err());
    assert!(parse_run_options(&args(&["--capacity=many"])).is_err());
}

#[test]
fn capacity_flag_list() {
    assert_eq!(parse_capacity_arg(&[]).unwrap(), ParseConfig::default());
    assert_eq!(
        parse_capacity_arg(&args(&["--capacity=5"])).unwrap(),
        ParseConfig { capacity: 5 }
    );
    assert!(parse_capacity_arg(&args(&["--json"])).is_err());
}

// run

#[test]
fn run_source_speaks_and_dumps_bindings() {
    let output = buffer_sink();
    let options = RunOptions::default();
    let report = run_source(
        "REG STRING name \"Alice\"\nSPEAK \"Hello\" $name\n",
        &options,
        output.clone(),
        InputSource::Deferred,
    )
    .unwrap();
    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(output.get_output(), "HelloAlice");
    assert_eq!(report.bindings, "  name = \"Alice\"\n");
    assert_eq!(report.error_count(), 0);
}

#[test]
fn run_source_branching_mode() {
    let output = buffer_sink();
    let options = RunOptions {
        mode: ExecMode::Branching,
        ..RunOptions::default()
    };
    let report = run_source(BRANCHY, &options, output.clone(), InputSource::Deferred).unwrap();
    assert_eq!(output.get_output(), "big.");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn run_source_sequential_mode_reports_block_keywords() {
    let output = buffer_sink();
    let report =
        run_source(BRANCHY, &RunOptions::default(), output.clone(), InputSource::Deferred).unwrap();
    assert_eq!(output.get_output(), "bigthreesmall.");
    assert_eq!(report.error_count(), 4);
}

#[test]
fn run_source_counts_warnings_separately() {
    let options = RunOptions {
        mode: ExecMode::Branching,
        ..RunOptions::default()
    };
    let report = run_source("IF True\n", &options, buffer_sink(), InputSource::Deferred).unwrap();
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.error_count(), 0);
}

#[test]
fn run_source_rejects_bad_structure() {
    let options = RunOptions {
        mode: ExecMode::Branching,
        ..RunOptions::default()
    };
    let result = run_source("ENDIF\n", &options, buffer_sink(), InputSource::Deferred);
    assert!(matches!(result, Err(CommandError::Structure(_))));
}

#[test]
fn run_source_teacher_can_open_course() {
    let report = run_source(
        "OPEN_COURSE \"Rust\" 3\n",
        &RunOptions::default(),
        buffer_sink(),
        InputSource::Deferred,
    )
    .unwrap();
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.bindings, "  result = True\n");
}

#[test]
fn run_source_student_cannot_open_course() {
    let options = RunOptions {
        role: Role::Student,
        ..RunOptions::default()
    };
    let report = run_source(
        "OPEN_COURSE \"Rust\" 3\n",
        &options,
        buffer_sink(),
        InputSource::Deferred,
    )
    .unwrap();
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics[0].code, ErrorCode::E4001);
    assert_eq!(report.bindings, "");
}

#[test]
fn run_source_reads_scripted_input() {
    let output = buffer_sink();
    let report = run_source(
        "REG STRING who \"\"\nINPUT who\nSPEAK \"hi \" $who\n",
        &RunOptions::default(),
        output.clone(),
        InputSource::scripted(["Bob\n"]),
    )
    .unwrap();
    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(output.get_output(), "hi Bob");
}

#[test]
fn run_source_suspends_on_deferred_input() {
    let report = run_source(
        "REG STRING who \"\"\nINPUT who\n",
        &RunOptions::default(),
        buffer_sink(),
        InputSource::Deferred,
    )
    .unwrap();
    assert!(matches!(report.outcome, RunOutcome::Suspended(_)));
}

// graph

#[test]
fn graph_renders_as_text() {
    let source = "SPEAK \"a\"\nSPEAK \"b\"\n";
    let rendered = render_graph(source, ParseConfig::default(), GraphFormat::Text).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[0] SPEAK \"a\""));
    assert!(lines[0].ends_with("-> [1, -]"));
    assert!(lines[1].starts_with("[1] SPEAK \"b\""));
    assert!(lines[1].ends_with("-> [-, -]"));
}

#[test]
fn graph_renders_as_json() {
    let rendered = render_graph(BRANCHY, ParseConfig::default(), GraphFormat::Json).unwrap();
    let nodes: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    let nodes = nodes.as_array().unwrap();
    assert_eq!(nodes.len(), 9);
    assert_eq!(nodes[0]["kind"], serde_json::Value::Null);
    assert_eq!(nodes[1]["id"], 1);
    assert_eq!(nodes[1]["kind"], "IF");
    assert_eq!(nodes[1]["text"], "IF GREATER $x 3");
    assert_eq!(nodes[1]["true_edge"], 2);
    assert_eq!(nodes[1]["false_edge"], 3);
    assert_eq!(nodes[2]["indent"], 4);
    assert_eq!(nodes[2]["line"], 3);
}

#[test]
fn graph_reports_structure_errors() {
    let result = render_graph("ELSE\n", ParseConfig::default(), GraphFormat::Text);
    assert!(matches!(result, Err(CommandError::Structure(_))));
}

// check

#[test]
fn check_source_counts_statements() {
    let (count, diagnostics) = check_source(BRANCHY, ParseConfig::default()).unwrap();
    assert_eq!(count, 9);
    assert!(diagnostics.is_empty());
}

#[test]
fn check_source_flags_unknown_instructions() {
    let source = "# note\nSPEAK \"a\"\nSHOUT \"b\"\n";
    let (_, diagnostics) = check_source(source, ParseConfig::default()).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E3001);
    assert_eq!(diagnostics[0].line, Some(3));
}

#[test]
fn check_source_reports_structure_error() {
    let err = check_source("IF True\nENDIF\nENDIF\n", ParseConfig::default()).unwrap_err();
    assert!(err.is_error());
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.line, Some(3));
}

#[test]
fn check_paths_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.sl");
    let bad = dir.path().join("bad.sl");
    std::fs::File::create(&good).unwrap().write_all(BRANCHY.as_bytes()).unwrap();
    std::fs::File::create(&bad).unwrap().write_all(b"ENDIF\n").unwrap();
    let missing = dir.path().join("missing.sl");

    let paths = vec![
        good.display().to_string(),
        missing.display().to_string(),
        bad.display().to_string(),
    ];
    let reports = check_paths(&paths, ParseConfig::default());

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].path, paths[0]);
    assert!(reports[0].is_ok());
    assert_eq!(reports[0].statements, Ok(9));
    assert_eq!(reports[0].source, BRANCHY);
    assert_eq!(reports[1].source, "");
    assert_eq!(reports[2].source, "ENDIF\n");
    assert!(matches!(
        &reports[1].statements,
        Err(CheckFailure::Read(msg)) if msg.contains("cannot find file")
    ));
    assert!(matches!(
        &reports[2].statements,
        Err(CheckFailure::Structure(d)) if d.code == ErrorCode::E1002
    ));
}

#[test]
fn check_source_keeps_unclosed_block_as_warning() {
    let (_, diagnostics) =
        check_source("IF True\n    SHOUT \"a\"\n", ParseConfig::default()).unwrap();
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::W1001, ErrorCode::E3001]);
    assert!(!diagnostics[0].is_error());
}

// explain

#[test]
fn explain_accepts_any_case() {
    let text = explanation_for("e1002").unwrap();
    assert!(text.starts_with("E1002: "));
    assert!(text.contains("ENDIF"));
    assert_eq!(explanation_for("E9999"), None);
    assert_eq!(explanation_for("hello"), None);
}
