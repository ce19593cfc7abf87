//! Slate CLI

use slatec::commands::{
    check_files, explain_error, graph_file, parse_capacity_arg, parse_run_options, run_file,
    GraphFormat,
};

fn main() {
    slatec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: slate run <file.sl> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --branching, -b     Honor IF/ELIF/ELSE/ENDIF blocks");
                eprintln!("  --student           Run as a student (default: teacher)");
                eprintln!("  --user=<name>       Session user name (default: admin)");
                eprintln!("  --capacity=<n>      Maximum statements in branching mode");
                eprintln!("  --dump              Print variables after the run");
                std::process::exit(1);
            }
            let options = match parse_run_options(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            run_file(&args[2], &options);
        }
        "graph" => {
            if args.len() < 3 {
                eprintln!("Usage: slate graph <file.sl> [--json] [--capacity=<n>]");
                std::process::exit(1);
            }
            let mut format = GraphFormat::Text;
            let mut flags = Vec::new();
            for arg in &args[3..] {
                if arg == "--json" {
                    format = GraphFormat::Json;
                } else {
                    flags.push(arg.clone());
                }
            }
            let config = exit_on_error(parse_capacity_arg(&flags));
            graph_file(&args[2], config, format);
        }
        "check" => {
            let (flags, files): (Vec<String>, Vec<String>) =
                args[2..].iter().cloned().partition(|arg| arg.starts_with("--"));
            if files.is_empty() {
                eprintln!("Usage: slate check <file.sl>... [--capacity=<n>]");
                std::process::exit(1);
            }
            let config = exit_on_error(parse_capacity_arg(&flags));
            check_files(&files, config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Slate {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: slate --explain <ERROR_CODE>");
                eprintln!("Example: slate --explain E2004");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            // A bare script path runs it with default options.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sl"))
            {
                run_file(command, &slatec::commands::RunOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn exit_on_error<T>(result: Result<T, String>) -> T {
    match result {
        Ok(value) => value,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Slate - a small scripting language for course records");
    println!();
    println!("Usage: slate <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.sl>        Run a script");
    println!("  graph <file.sl>      Print the script's control-flow graph");
    println!("  check <file.sl>...   Validate scripts without running them");
    println!("  --explain <code>     Explain an error code (e.g., E2004)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --branching, -b     Honor IF/ELIF/ELSE/ENDIF blocks");
    println!("  --student           Run as a student (default: teacher)");
    println!("  --user=<name>       Session user name (default: admin)");
    println!("  --capacity=<n>      Maximum statements in branching mode (default: 300)");
    println!("  --dump              Print variables after the run");
    println!();
    println!("Graph options:");
    println!("  --json              Emit the graph as JSON");
    println!();
    println!("Debugging:");
    println!("  RUST_LOG=slate_eval=debug   Log each dispatched line");
    println!("  SLATE_LOG_TREE=1            Log as an indented span tree");
}
