//! Error codes for all Slate diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1002`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all Slate diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexical errors (`SPEAK` templates)
/// - E1xxx: Structure errors (block nesting, arena capacity)
/// - E2xxx: Name, type and reference errors
/// - E3xxx: Instruction dispatch errors
/// - E4xxx: Authorization errors
/// - E5xxx: Record store errors
///
/// Warnings use the same digits with a `W` prefix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Malformed fragment in a `SPEAK` template
    E0001,

    // Structure Errors (E1xxx)
    /// `ELIF`/`ELSE` without an enclosing `IF`
    E1001,
    /// `ENDIF` without a matching `IF`
    E1002,
    /// Statement arena capacity exceeded
    E1003,

    // Name / Type / Reference Errors (E2xxx)
    /// Illegal variable name
    E2001,
    /// Variable already registered
    E2002,
    /// Type mismatch
    E2003,
    /// Undefined variable
    E2004,
    /// Unparseable literal
    E2005,
    /// Wrong number of builtin arguments
    E2006,
    /// Empty expression
    E2007,

    // Dispatch Errors (E3xxx)
    /// Unknown instruction
    E3001,
    /// Unknown builtin function
    E3002,
    /// Malformed keyword statement
    E3003,
    /// No input available for `INPUT`
    E3004,

    // Authorization Errors (E4xxx)
    /// Operation not permitted for the caller's role
    E4001,

    // Store Errors (E5xxx)
    /// The record store rejected an operation
    E5001,

    // Warnings
    /// `IF` block still open at the end of the script
    W1001,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
        ErrorCode::E5001,
        ErrorCode::W1001,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E5001 => "E5001",
            ErrorCode::W1001 => "W1001",
        }
    }

    /// One-paragraph explanation, shown by `slate explain`.
    pub fn explanation(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => {
                "A SPEAK template may only contain double-quoted literals and \
                 $name references separated by whitespace. Any other fragment \
                 rejects the whole line before anything is printed."
            }
            ErrorCode::E1001 => {
                "An ELIF or ELSE line was found with no open IF block at the \
                 same or lower indentation. The whole script is rejected."
            }
            ErrorCode::E1002 => {
                "An ENDIF line was found with no open IF block. The whole \
                 script is rejected."
            }
            ErrorCode::E1003 => {
                "The script has more statements than the statement arena can \
                 hold. Raise the capacity with --capacity=<n>."
            }
            ErrorCode::E2001 => {
                "Variable names must start with a letter and contain only \
                 letters, digits and underscores."
            }
            ErrorCode::E2002 => {
                "REG declares a new variable; a name can only be declared once \
                 per session. The existing value is left unchanged."
            }
            ErrorCode::E2003 => {
                "A value of one type was used where another was required, such \
                 as `REG NUM x \"text\"` or a non-numeric GREATER operand."
            }
            ErrorCode::E2004 => "A $name reference named a variable that was never registered.",
            ErrorCode::E2005 => {
                "A token is not a $variable, True/False, a double-quoted string \
                 or a number."
            }
            ErrorCode::E2006 => "A builtin was called with the wrong number of arguments.",
            ErrorCode::E2007 => "An expression was expected but the line was empty.",
            ErrorCode::E3001 => {
                "The first word of the line is neither a keyword (REG, SPEAK, \
                 INPUT) nor a builtin function."
            }
            ErrorCode::E3002 => {
                "A multi-token expression must start with a builtin name: \
                 EQUAL, GREATER, GPA or OPEN_COURSE."
            }
            ErrorCode::E3003 => {
                "A keyword line is missing parts. Expected `REG <TYPE> <name> \
                 <expr>` or `INPUT <name>`."
            }
            ErrorCode::E3004 => "INPUT needed a line of input but none was available.",
            ErrorCode::E4001 => {
                "The operation is reserved for instructors and the session \
                 belongs to a student. The record store was not touched."
            }
            ErrorCode::E5001 => {
                "The record store rejected the operation. It is not retried \
                 and nothing is rolled back."
            }
            ErrorCode::W1001 => {
                "An IF block was still open when the script ended. In branching \
                 mode a false condition in that block ends the run, because \
                 there is no ENDIF to join at."
            }
        }
    }

    pub fn is_lexical_error(&self) -> bool {
        matches!(self, ErrorCode::E0001)
    }

    /// Structure errors are fatal to the whole parse.
    pub fn is_structure_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2004"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
