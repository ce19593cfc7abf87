//! Variable naming rule.

/// Check whether `name` is a legal variable name.
///
/// A name must be non-empty, start with a letter, and contain only
/// letters, digits and underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::is_valid_identifier;

    #[test]
    fn accepts_letters_digits_underscore() {
        assert!(is_valid_identifier("x"));
        assert!(is_valid_identifier("ok_1"));
        assert!(is_valid_identifier("Score2024"));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1bad"));
        assert!(!is_valid_identifier("_hidden"));
        assert!(!is_valid_identifier("has-dash"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier("$x"));
    }

    mod proptest_ident {
        use super::is_valid_identifier;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_names_are_valid(name in "[A-Za-z][A-Za-z0-9_]{0,16}") {
                prop_assert!(is_valid_identifier(&name));
            }

            #[test]
            fn leading_digit_is_invalid(name in "[0-9][A-Za-z0-9_]{0,16}") {
                prop_assert!(!is_valid_identifier(&name));
            }
        }
    }
}
