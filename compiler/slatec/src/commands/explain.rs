//! The `explain` command: describe a diagnostic code.

use slate_diagnostic::ErrorCode;

/// Documentation for `code_str` (case-insensitive), if it names a code.
pub fn explanation_for(code_str: &str) -> Option<String> {
    let code = code_str.parse::<ErrorCode>().ok()?;
    Some(format!("{code}: {}", code.explanation()))
}

pub fn explain_error(code_str: &str) {
    let Some(text) = explanation_for(code_str) else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.");
        eprintln!("Examples: E0001, E2004, W1001");
        std::process::exit(1);
    };
    println!("{text}");
}
