//! Event scripts
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! click              # click the control
//! option v3          # click the option whose value is v3
//! outside            # click outside the widget
//! key down           # enter, space, up, down, esc or a raw key code
//! search ban         # set the search box contents (empty after `search`)
//! clear | reload | enable | disable | destroy
//! add Durian durian  # append an item to the native control (out-of-band)
//! ```

use blinc_select::key_codes;
use thiserror::Error;

/// Errors raised while parsing a script
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },
}

/// A single script command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click,
    Option(String),
    Outside,
    Key(u32),
    Search(String),
    Clear,
    Reload,
    Enable,
    Disable,
    Destroy,
    Add { text: String, value: String },
}

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        commands.push(parse_line(index + 1, line)?);
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command, ScriptError> {
    let (command, rest) = match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (text, ""),
    };

    let missing = |expected| ScriptError::MissingArgument {
        line,
        command: command.to_string(),
        expected,
    };

    match command {
        "click" => Ok(Command::Click),
        "outside" => Ok(Command::Outside),
        "clear" => Ok(Command::Clear),
        "reload" => Ok(Command::Reload),
        "enable" => Ok(Command::Enable),
        "disable" => Ok(Command::Disable),
        "destroy" => Ok(Command::Destroy),
        "search" => Ok(Command::Search(rest.to_string())),
        "option" if rest.is_empty() => Err(missing("an option value")),
        "option" => Ok(Command::Option(rest.to_string())),
        "key" if rest.is_empty() => Err(missing("a key name or code")),
        "key" => parse_key(line, rest).map(Command::Key),
        "add" => match rest.rsplit_once(char::is_whitespace) {
            Some((text, value)) => Ok(Command::Add {
                text: text.trim().to_string(),
                value: value.to_string(),
            }),
            None => Err(missing("a label and a value")),
        },
        _ => Err(ScriptError::UnknownCommand {
            line,
            command: command.to_string(),
        }),
    }
}

fn parse_key(line: usize, key: &str) -> Result<u32, ScriptError> {
    let code = match key.to_ascii_lowercase().as_str() {
        "enter" => key_codes::ENTER,
        "space" => key_codes::SPACE,
        "up" => key_codes::UP,
        "down" => key_codes::DOWN,
        "esc" | "escape" => key_codes::ESCAPE,
        other => other.parse().map_err(|_| ScriptError::UnknownKey {
            line,
            key: key.to_string(),
        })?,
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let commands = parse(
            "# open and pick\nclick\nkey down\nkey 40\n\noption v3  # C\nsearch\nadd Dried Beans beans\n",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::Click,
                Command::Key(key_codes::DOWN),
                Command::Key(40),
                Command::Option("v3".into()),
                Command::Search(String::new()),
                Command::Add {
                    text: "Dried Beans".into(),
                    value: "beans".into()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("click\nfrobnicate"),
            Err(ScriptError::UnknownCommand {
                line: 2,
                command: "frobnicate".into()
            })
        );
    }

    #[test]
    fn test_bad_key() {
        assert!(matches!(
            parse("key tab"),
            Err(ScriptError::UnknownKey { line: 1, .. })
        ));
        assert!(matches!(
            parse("key"),
            Err(ScriptError::MissingArgument { line: 1, .. })
        ));
    }
}
