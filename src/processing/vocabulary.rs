//! Skill vocabulary sources

use crate::config::SkillsConfig;
use crate::error::{MatcherError, Result};
use std::path::Path;

/// Parse a vocabulary file: one skill per line, blank lines are ignored.
/// A `#` opens a comment at the start of a line or after whitespace, so
/// entries like `c#` survive. Order is kept.
pub fn parse_vocabulary(content: &str) -> Vec<String> {
    content
        .lines()
        .map(strip_comment)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    let comment_start = line
        .char_indices()
        .find(|&(i, c)| c == '#' && (i == 0 || line[..i].ends_with(char::is_whitespace)))
        .map(|(i, _)| i);

    match comment_start {
        Some(i) => line[..i].trim_end(),
        None => line,
    }
}

pub fn load_vocabulary_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_vocabulary(&content))
}

/// Comma-separated list as given on the command line
pub fn parse_skill_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick the vocabulary: explicit list, then explicit file, then the
/// configured file, then the configured list.
pub fn resolve_vocabulary(
    cli_list: Option<&str>,
    cli_file: Option<&Path>,
    config: &SkillsConfig,
) -> Result<Vec<String>> {
    let vocabulary = if let Some(list) = cli_list {
        parse_skill_list(list)
    } else if let Some(path) = cli_file {
        load_vocabulary_file(path)?
    } else if let Some(path) = &config.vocabulary_file {
        load_vocabulary_file(path)?
    } else {
        config.vocabulary.clone()
    };

    if vocabulary.is_empty() {
        return Err(MatcherError::InvalidInput(
            "Skill vocabulary is empty".to_string(),
        ));
    }

    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_vocabulary() {
        let content = "# languages\npython\n\n  rust  # systems\nmachine learning\n#sql\n";
        assert_eq!(parse_vocabulary(content), vec!["python", "rust", "machine learning"]);
    }

    #[test]
    fn test_hash_inside_skill_is_not_a_comment() {
        let content = "c#\nf#\n# note\npython  # lang\n";
        assert_eq!(parse_vocabulary(content), vec!["c#", "f#", "python"]);
    }

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(parse_skill_list("python, sql ,,django"), vec!["python", "sql", "django"]);
        assert!(parse_skill_list(" , ").is_empty());
    }

    #[test]
    fn test_resolution_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "kotlin\nswift").unwrap();
        let config = Config::default().skills;

        let from_list = resolve_vocabulary(Some("go"), Some(file.path()), &config).unwrap();
        assert_eq!(from_list, vec!["go"]);

        let from_file = resolve_vocabulary(None, Some(file.path()), &config).unwrap();
        assert_eq!(from_file, vec!["kotlin", "swift"]);

        let from_config = resolve_vocabulary(None, None, &config).unwrap();
        assert_eq!(from_config, config.vocabulary);
    }

    #[test]
    fn test_configured_file_beats_configured_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "elixir").unwrap();
        let mut config = Config::default().skills;
        config.vocabulary_file = Some(file.path().to_path_buf());

        assert_eq!(resolve_vocabulary(None, None, &config).unwrap(), vec!["elixir"]);
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        let config = Config::default().skills;
        assert!(matches!(
            resolve_vocabulary(Some(" , "), None, &config),
            Err(MatcherError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_vocabulary_file(Path::new("does/not/exist.txt"));
        assert!(matches!(result, Err(MatcherError::FileNotFound(_))));
    }
}
