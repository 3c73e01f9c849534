//! Reader for `KEY=VALUE` env files

use envgen_core::EnvironmentVariables;

/// Parse env file text into an ordered mapping
///
/// Blank lines and `#` comments are ignored. A value wrapped in matching
/// single or double quotes is unquoted; inside double quotes `\"` becomes `"`.
/// Lines without `=` are skipped. A repeated key keeps its first position and
/// takes the last value.
pub fn parse(text: &str) -> EnvironmentVariables {
    let mut env = EnvironmentVariables::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!(line = index + 1, "skipping env file line without '='");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            tracing::warn!(line = index + 1, "skipping env file line with an empty key");
            continue;
        }

        env.insert(key, unquote(value.trim()));
    }

    env
}

fn unquote(value: &str) -> String {
    let quoted_with = |quote: char| {
        value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote)
    };

    if quoted_with('"') {
        value[1..value.len() - 1].replace("\\\"", "\"")
    } else if quoted_with('\'') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let env = parse("# header\n\nA=1\n   # indented comment\nB=2\n");
        let pairs: Vec<_> = env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_parse_strips_quotes() {
        let env = parse("A=\"hello world\"\nB='single quoted'\nC=\"a\\\"b\"\nD='keep \\\" as is'\n");
        assert_eq!(env.get("A").unwrap(), "hello world");
        assert_eq!(env.get("B").unwrap(), "single quoted");
        assert_eq!(env.get("C").unwrap(), "a\"b");
        assert_eq!(env.get("D").unwrap(), "keep \\\" as is");
    }

    #[test]
    fn test_parse_keeps_unmatched_quotes() {
        let env = parse("A=\"open\nB=\"\nC=it's\n");
        assert_eq!(env.get("A").unwrap(), "\"open");
        assert_eq!(env.get("B").unwrap(), "\"");
        assert_eq!(env.get("C").unwrap(), "it's");
    }

    #[test]
    fn test_parse_empty_and_equals_in_value() {
        let env = parse("EMPTY=\nURL=postgres://u:p@h/db?sslmode=require\n");
        assert_eq!(env.get("EMPTY").unwrap(), "");
        assert_eq!(env.get("URL").unwrap(), "postgres://u:p@h/db?sslmode=require");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let env = parse("NOT A PAIR\n=novalue\nOK=yes\n");
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("OK").unwrap(), "yes");
    }

    #[test]
    fn test_parse_duplicate_key_keeps_first_position() {
        let env = parse("A=1\nB=2\nA=3\r\n");
        let pairs: Vec<_> = env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }
}
