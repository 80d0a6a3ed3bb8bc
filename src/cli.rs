// File: ./src/cli.rs
//! Command-line arguments and help text.
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub help: bool,
}

/// Parses the arguments after the binary name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg {
            "-h" | "--help" | "help" => parsed.help = true,
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                parsed.root = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }
    Ok(parsed)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Lania v{} - a personal task-tracking assistant",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS (typed at the prompt):");
    println!("    list                                  Show all tasks");
    println!("    find <keyword>                        Show tasks containing <keyword>");
    println!("    todo <description>                    Add a todo");
    println!("    deadline <description> /by <when>     Add a deadline");
    println!("    event <description> /at <when>        Add an event");
    println!("    done <n>                              Mark task <n> as done");
    println!("    delete <n>                            Remove task <n>");
    println!("    bye                                   Exit");
    println!();
    println!("    <when> is dd-MM-yyyy HH:mm, e.g. 24-08-2021 18:00");
    println!();
    println!("EXAMPLES:");
    println!("    todo read book");
    println!("    deadline return book /by 24-08-2021 18:00");
    println!("    event project meeting /at 25-08-2021 14:00");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_and_help() {
        let args = parse_args(&["--root", "/tmp/lania", "-h"]).unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/tmp/lania")));
        assert!(args.help);
        assert_eq!(parse_args::<&str>(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&["--root"]).is_err());
        assert!(parse_args(&["--verbose"]).is_err());
    }
}
