// ABOUTME: Snippet escaping for code inserted from the panel into the editor.
// ABOUTME: Escapes bare `$` so snippet insertion does not read it as a placeholder.

use std::sync::LazyLock;

use regex::Regex;

/// A `$` with a non-backslash character before it and something other than
/// `{` or a digit after it.
static BARE_DOLLAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])(\$)([^{0-9])").expect("bare dollar pattern is valid"));

/// Escape bare `$` characters before handing code to snippet insertion.
///
/// Matches are taken left to right and never overlap, so a `$` that was
/// consumed as the trailing character of one match is not escaped itself
/// (`a$$b` becomes `a\$$b`). A `$` at the very start or end is left alone.
pub fn escape_snippet_dollars(code: &str) -> String {
    BARE_DOLLAR.replace_all(code, r"${1}\$$${3}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_shell_variable() {
        assert_eq!(escape_snippet_dollars("echo $HOME"), r"echo \$HOME");
    }

    #[test]
    fn leaves_placeholder_braces_alone() {
        assert_eq!(escape_snippet_dollars("let x = ${1:name};"), "let x = ${1:name};");
    }

    #[test]
    fn leaves_numbered_tabstop_alone() {
        assert_eq!(escape_snippet_dollars("price $5 and $0"), "price $5 and $0");
    }

    #[test]
    fn leaves_already_escaped_alone() {
        assert_eq!(escape_snippet_dollars(r"cost \$x"), r"cost \$x");
    }

    #[test]
    fn leading_and_trailing_dollar_untouched() {
        assert_eq!(escape_snippet_dollars("$a"), "$a");
        assert_eq!(escape_snippet_dollars("a$"), "a$");
    }

    #[test]
    fn adjacent_dollars_only_first_escaped() {
        assert_eq!(escape_snippet_dollars("a$$b"), r"a\$$b");
    }

    #[test]
    fn escapes_every_non_overlapping_match() {
        assert_eq!(
            escape_snippet_dollars("const a = $x + $y;"),
            r"const a = \$x + \$y;"
        );
    }

    #[test]
    fn dollar_before_newline_is_escaped() {
        assert_eq!(escape_snippet_dollars("x$\ny"), "x\\$\ny");
    }

    #[test]
    fn text_without_dollars_is_unchanged() {
        let code = "fn main() {\n    println!(\"hi\");\n}";
        assert_eq!(escape_snippet_dollars(code), code);
    }
}
