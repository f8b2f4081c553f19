//! Interactive shell: reads commands line by line until `exit`

use super::profile;
use crate::args::{ShellCommand, ShellLine};
use clap::Parser;
use moddy::core::commands::Command as ModelCommand;
use moddy::core::session::Session;
use moddy::core::storage::ProfileStorage;
use moddy::{debug, error};
use std::io::{self, BufRead, Write};

/// Split a line into words; single or double quotes group words and are removed
///
/// # Errors
/// Returns an error for an unterminated quote.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("unterminated {open} quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Run the read-eval-print loop on stdin
pub fn run<S: ProfileStorage>(session: &mut Session<S>) {
    println!(
        "MODdy {}. Type `help` for commands, `exit` to leave.",
        moddy::core::get_version()
    );
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("moddy> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(session.logger(), "Failed to read input: {e}");
                break;
            }
        }

        let tokens = match tokenize(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("✗ {e}");
                continue;
            }
        };
        debug!(session.logger(), "Shell input: {tokens:?}");

        match ShellLine::try_parse_from(tokens) {
            Ok(ShellLine {
                command: ShellCommand::Exit,
            }) => {
                if let Ok(result) = session.execute(ModelCommand::Exit) {
                    profile::print_result(session, &result);
                }
                break;
            }
            Ok(ShellLine {
                command: ShellCommand::Profile(command),
            }) => match profile::execute(session, command) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => eprintln!("✗ {e}"),
            },
            Err(e) => {
                let _ = e.print();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain_words() {
        assert_eq!(
            tokenize("  add CS1101S   -s 1 \n").unwrap(),
            vec!["add", "CS1101S", "-s", "1"]
        );
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"new "John Tan" -c 'Computer Science' -s 1"#).unwrap(),
            vec!["new", "John Tan", "-c", "Computer Science", "-s", "1"]
        );
        assert_eq!(tokenize(r#"say "it's""#).unwrap(), vec!["say", "it's"]);
        assert_eq!(tokenize(r#"x """#).unwrap(), vec!["x", ""]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert!(tokenize(r#"new "John"#).is_err());
    }
}
