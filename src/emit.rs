use crate::config::Config;
use std::fmt;
use std::io::{Result, Write};

/// Expected outcome of running a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The statement should succeed.
    Ok,
    /// The statement should fail.
    Err,
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Ok => write!(f, "ok"),
            Expect::Err => write!(f, "err"),
        }
    }
}

/// A generated test case, one per input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Case {
    /// An empty input line, kept so output lines match input lines.
    Blank,
    /// A statement and what running it should produce.
    Statement { expect: Expect, text: String },
}

impl Case {
    /// Classify a single input line.
    pub fn classify(line: &str, config: &Config) -> Case {
        if line.is_empty() {
            return Case::Blank;
        }
        let expect = if line.contains(config.marker.as_str()) {
            Expect::Err
        } else {
            Expect::Ok
        };
        Case::Statement {
            expect,
            text: line.to_owned(),
        }
    }

    /// Emit this case in text form, without a line terminator. The statement
    /// text is copied verbatim, quotes included.
    pub fn emit(&self, config: &Config) -> String {
        match self {
            Case::Blank => String::new(),
            Case::Statement { expect, text } => format!(
                "{}!({}, \"{}\");",
                config.macro_for(*expect),
                config.context,
                text
            ),
        }
    }
}

/// The test cases generated from one input file.
pub struct Cases<'a> {
    config: &'a Config,
    cases: Vec<Case>,
}

impl<'a> Cases<'a> {
    /// Classify every line of `source`. A trailing newline does not produce
    /// an extra blank case.
    pub fn from_source(source: &str, config: &'a Config) -> Cases<'a> {
        Cases {
            config,
            cases: split_lines(source)
                .into_iter()
                .map(|line| Case::classify(line, config))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Number of cases expected to fail.
    pub fn errors(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| {
                matches!(c, Case::Statement { expect: Expect::Err, .. })
            })
            .count()
    }

    /// Write these cases to `out`, one line each.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        for c in &self.cases {
            writeln!(out, "{}", c.emit(self.config))?;
        }
        Ok(())
    }
}

/// Line boundaries: `\n`, `\r`, `\r\n`, vertical tab, form feed, the file,
/// group and record separators, NEL, and the Unicode line and paragraph
/// separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split `source` into lines. `\r\n` is a single break, and a break at the
/// very end does not start another line.
fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        let Some(i) = rest.find(is_line_break) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..i]);
        let brk = if rest[i..].starts_with("\r\n") {
            2
        } else {
            rest[i..].chars().next().map_or(1, char::len_utf8)
        };
        rest = &rest[i + brk..];
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(cases: &Cases) -> String {
        let mut buf = Vec::new();
        cases.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render(source: &str) -> String {
        emit(&Cases::from_source(source, &Config::default()))
    }

    #[test]
    fn plain_statement_is_ok() {
        assert_eq!(render("SELECT 1;"), "ok!(e, \"SELECT 1;\");\n");
    }

    #[test]
    fn marker_inside_word_is_err() {
        assert_eq!(
            render("SELECT * FROM t WHERE x = error_code;"),
            "err!(e, \"SELECT * FROM t WHERE x = error_code;\");\n"
        );
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert_eq!(render("ERROR here"), "ok!(e, \"ERROR here\");\n");
        assert_eq!(render("Error here"), "ok!(e, \"Error here\");\n");
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(render("A\n\nB"), "ok!(e, \"A\");\n\nok!(e, \"B\");\n");
    }

    #[test]
    fn trailing_newline_adds_nothing() {
        let config = Config::default();
        assert_eq!(Cases::from_source("A\n", &config).len(), 1);
        assert_eq!(Cases::from_source("A\n\n", &config).len(), 2);
        assert!(Cases::from_source("", &config).is_empty());
    }

    #[test]
    fn crlf_is_stripped() {
        assert_eq!(
            render("insert error;\r\nselect 2;\r\n"),
            "err!(e, \"insert error;\");\nok!(e, \"select 2;\");\n"
        );
    }

    #[test]
    fn quotes_copied_verbatim() {
        assert_eq!(
            render("INSERT INTO t VALUES ('a\"b');"),
            "ok!(e, \"INSERT INTO t VALUES ('a\"b');\");\n"
        );
    }

    #[test]
    fn error_count() {
        let config = Config::default();
        let cases =
            Cases::from_source("a\nb error\n\nerrors\nc\n", &config);
        assert_eq!(cases.len(), 5);
        assert_eq!(cases.errors(), 2);
    }

    #[test]
    fn custom_config() {
        let config = Config {
            marker: "FAIL".into(),
            ok_macro: "pass".into(),
            err_macro: "fail".into(),
            context: "db".into(),
        };
        let cases = Cases::from_source("x FAIL\nerror\n", &config);
        assert_eq!(
            emit(&cases),
            "fail!(db, \"x FAIL\");\npass!(db, \"error\");\n"
        );
    }

    #[test]
    fn lone_carriage_return_splits() {
        assert_eq!(
            render("a\rb error\r"),
            "ok!(e, \"a\");\nerr!(e, \"b error\");\n"
        );
    }

    #[test]
    fn form_feed_splits() {
        assert_eq!(
            render("a\x0cb\x0c\x0cc"),
            "ok!(e, \"a\");\nok!(e, \"b\");\n\nok!(e, \"c\");\n"
        );
    }

    #[test]
    fn other_separators_split() {
        let config = Config::default();
        let cases =
            Cases::from_source("a\rb\x0cc\u{2028}d\n", &config);
        assert_eq!(cases.len(), 4);
        let cases = Cases::from_source(
            "a\x0bb\x1cc\x1dd\x1ee\u{85}f\u{2029}g",
            &config,
        );
        assert_eq!(cases.len(), 7);
        assert_eq!(cases.errors(), 0);
    }

    #[test]
    fn crlf_then_lone_cr() {
        assert_eq!(
            split_lines("a\r\n\rb\n\r\n"),
            ["a", "", "b", ""]
        );
    }

    #[test]
    fn expect_display() {
        assert_eq!(Expect::Ok.to_string(), "ok");
        assert_eq!(Expect::Err.to_string(), "err");
    }
}
