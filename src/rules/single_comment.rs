use super::Context;
use crate::token::{Token, TokenKind};

const MSG: &str = "Single Comment should be use `//`";

/// Flags `/* ... */` comments that start and end on the same line.
///
/// Registered twice, as `single-comment` and `comment`; both report the
/// same dedup key so a file gets one record per comment.
pub fn check(tokens: &[Token], cx: &mut Context<'_>) {
    for token in tokens {
        if token.kind != TokenKind::BlockComment || token.span.start.line != token.span.end.line {
            continue;
        }
        let start = token.span.start;
        cx.report_quoted(start.line, start.column, &token.text, MSG).dedup_key =
            Some(format!("single-comment:{}:{}", start.line, start.column));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, RuleOption};
    use crate::diagnostic::dedup;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::rules::run;
    use crate::rules::testing::{check, lines};

    #[test]
    fn flags_one_line_block_comments() {
        let diags = check(
            "single-comment",
            "/* one */\n/*\n * many\n */\n// fine\na {\n    b: c; /* tail */\n}\n",
        );
        assert_eq!(lines(&diags), [1, 7]);
        assert_eq!(diags[0].message, "`/* one */` Single Comment should be use `//`");
        assert_eq!(diags[1].col, Some(11));
    }

    #[test]
    fn alias_collapses_after_dedup() {
        let source = "/* x */\n";
        let tokens = tokenize(source).expect("should tokenize");
        let sheet = parse(&tokens, source).expect("should parse");
        let config = Config::empty()
            .with_rule("single-comment", RuleOption::Bool(true))
            .with_rule("comment", RuleOption::Bool(true));
        let diags = run(&sheet, &tokens, &config, "a.less");
        assert_eq!(diags.len(), 2);
        let diags = dedup(diags);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "single-comment");
    }
}
