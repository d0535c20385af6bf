//! Line-oriented want-list parsing
//!
//! A single forward pass over input lines: option lines (`#!...`), comments
//! (`#...`), an optional official-names block (`!BEGIN-OFFICIAL-NAMES` /
//! `!END-OFFICIAL-NAMES`), and want-list lines, each tokenized into
//! `[owner?, item, want, want, ...]`.

use crate::error::BuilderError;

use super::options::Options;

/// Everything collected from one parse pass, ready for [`super::build_graph`].
#[derive(Debug, Clone, Default)]
pub struct ParseData {
    pub official_names: Vec<String>,
    pub used_names: Vec<String>,
    pub errors: Vec<String>,
    pub usernames: Vec<String>,
    pub want_lists: Vec<Vec<String>>,

    pub num_items: usize,
    pub num_dummy_items: usize,
    pub max_name_width: usize,
}

/// Parse raw tool input, populating `options` from any `#!` line and
/// returning the resulting [`ParseData`].
///
/// # Errors
/// Returns [`BuilderError::FatalInput`] for a structural problem that
/// makes it unsafe to keep parsing (a malformed option, a misplaced
/// official-names block, a malformed username or colon), and
/// [`BuilderError::NoWantLists`] if the input had no want lists at all.
/// Everything else (unknown items, repeated wants, etc.) is recorded as a
/// string in `ParseData::errors` and parsing continues.
pub fn parse_input(input: &str, options: &mut Options) -> Result<ParseData, BuilderError> {
    let mut parsed = ParseData::default();
    let mut reading_official_names = false;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#!") {
            if !parsed.want_lists.is_empty() {
                return fatal(line_number, "Options (#!...) cannot be declared after first real want list");
            }
            if !parsed.official_names.is_empty() {
                return fatal(line_number, "Options (#!...) cannot be declared after official names");
            }
            for token in rest.to_uppercase().split_whitespace() {
                if let Err(message) = options.apply_token(token) {
                    return fatal(line_number, &message);
                }
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let upper = line.to_uppercase();
        if upper == "!BEGIN-OFFICIAL-NAMES" {
            if !parsed.official_names.is_empty() {
                return fatal(line_number, "Cannot begin official names more than once");
            }
            if !parsed.want_lists.is_empty() {
                return fatal(line_number, "Official names cannot be declared after first real want list");
            }
            reading_official_names = true;
            continue;
        }
        if upper == "!END-OFFICIAL-NAMES" {
            if !reading_official_names {
                return fatal(line_number, "!END-OFFICIAL-NAMES without matching !BEGIN-OFFICIAL-NAMES");
            }
            reading_official_names = false;
            continue;
        }
        if reading_official_names {
            if line.starts_with(':') {
                return fatal(line_number, "Line cannot begin with colon");
            }
            if line.starts_with('%') {
                return fatal(line_number, "Cannot give official names for dummy items");
            }
            let mut name = line.split(|c: char| c == ':' || c.is_whitespace()).next().unwrap_or("").to_string();
            if !options.case_sensitive {
                name = name.to_uppercase();
            }
            if parsed.official_names.contains(&name) {
                return fatal(line_number, &format!("Official name {name} already defined"));
            }
            parsed.official_names.push(name);
            continue;
        }

        parse_want_line(line, line_number, options, &mut parsed)?;
    }

    if parsed.want_lists.is_empty() {
        return Err(BuilderError::NoWantLists);
    }

    Ok(parsed)
}

fn parse_want_line(line: &str, line_number: usize, options: &Options, parsed: &mut ParseData) -> Result<(), BuilderError> {
    let mut line = line.to_string();

    if line.find('(').is_none() && options.require_usernames {
        return fatal(line_number, "Missing username with REQUIRE-USERNAMES selected");
    }

    if line.starts_with('(') {
        let Some(close) = line.find(')') else {
            return fatal(line_number, "Missing ')' in username");
        };
        if line.rfind('(').unwrap() > 0 {
            return fatal(line_number, "Cannot have more than one '(' per line");
        }
        if close == line.len() - 1 {
            return fatal(line_number, "Username cannot appear on a line by itself");
        }
        if line.rfind(')').unwrap() > close {
            return fatal(line_number, "Cannot have more than one ')' per line");
        }
        if close == 1 {
            return fatal(line_number, "Cannot have empty parentheses");
        }
        if line[..close].find(' ').is_some() {
            let (head, tail) = line.split_at(close + 1);
            let head = head.replace(' ', "#");
            line = format!("{head} {tail}");
        }
    } else if line.contains('(') {
        return fatal(line_number, "Username (parentheses) can only be used at the front of a want list");
    } else if line.contains(')') {
        return fatal(line_number, "Bad ')' on a line that does not have a '('");
    }

    line = line.replace(';', " ; ");
    if let Some(semi_pos) = line.find(';') {
        let colon_pos = line.find(':').unwrap_or(usize::MAX);
        if semi_pos < colon_pos {
            return fatal(line_number, "Semicolon cannot appear before colon");
        }
        let before = line[..semi_pos].trim();
        if before.is_empty() || before.ends_with(')') {
            return fatal(line_number, "Semicolon cannot appear before first item on line");
        }
    }

    if let Some(colon_pos) = line.find(':') {
        if line.rfind(':').unwrap() != colon_pos {
            return fatal(line_number, "Cannot have more that one colon on a line");
        }
        let header = line[..colon_pos].trim();
        if header.is_empty() {
            return fatal(line_number, "Must have exactly one item before a colon (:)");
        }
        line.replace_range(colon_pos..colon_pos + 1, " ");
    } else if options.require_colons {
        return fatal(line_number, "Missing colon with REQUIRE-COLONS selected");
    }

    if !options.case_sensitive {
        line = line.to_uppercase();
    }

    let tokens: Vec<String> = line.trim().split_whitespace().map(|s| s.to_string()).collect();
    parsed.want_lists.push(tokens);
    Ok(())
}

fn fatal<T>(line_number: usize, message: &str) -> Result<T, BuilderError> {
    Err(BuilderError::FatalInput { line: line_number, message: message.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_option_lines_after_want_lists_began() {
        let mut opts = Options::default();
        let err = parse_input("A: B\n#! VERBOSE\n", &mut opts).unwrap_err();
        assert!(matches!(err, BuilderError::FatalInput { .. }));
    }

    #[test]
    fn basic_want_list_tokenizes_into_item_then_wants() {
        let mut opts = Options::default();
        let parsed = parse_input("A: B C\n", &mut opts).unwrap();
        assert_eq!(parsed.want_lists, vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]);
    }

    #[test]
    fn username_prefix_is_tokenized_with_spaces_restored_later() {
        let mut opts = Options::default();
        let parsed = parse_input("(ALICE SMITH) A: B\n", &mut opts).unwrap();
        assert_eq!(parsed.want_lists[0][0], "(ALICE#SMITH)");
    }

    #[test]
    fn empty_input_is_a_fatal_no_want_lists_error() {
        let mut opts = Options::default();
        let err = parse_input("#! VERBOSE\n", &mut opts).unwrap_err();
        assert_eq!(err, BuilderError::NoWantLists);
    }

    #[test]
    fn option_line_sets_options_case_insensitively() {
        let mut opts = Options::default();
        parse_input("#! case-sensitive allow-dummies\nA: B\n", &mut opts).unwrap();
        assert!(opts.case_sensitive);
        assert!(opts.allow_dummies);
    }
}
