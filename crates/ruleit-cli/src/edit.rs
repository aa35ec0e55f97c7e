//! Interactive token editing loop
//!
//! A line-based stand-in for the original click-and-type editor: each input
//! line is one discrete action against the [`TokenEditor`] state machine.
//! The loop is single-threaded and only returns the final rule text once,
//! so re-submission while a request is pending cannot happen by
//! construction.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use ruleit_core::TokenEditor;

/// One parsed editor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert text at a gap
    Insert { gap: usize, text: String },
    /// Replace the text of an existing token
    Edit { index: usize, text: String },
    /// Delete an existing token
    Delete { index: usize },
    /// Print the tokens with their gap positions
    Tokens,
    /// Print the joined rule text
    Show,
    /// Finish editing and submit
    Submit,
    /// Abandon the edit
    Quit,
    /// Print usage
    Help,
}

/// Parse a single input line. Unknown input is reported, not punished.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "insert" | "i" => {
            let (gap, text) = split_index(rest)?;
            Ok(Command::Insert { gap, text })
        }
        "edit" | "e" => {
            let (index, text) = split_index(rest)?;
            Ok(Command::Edit { index, text })
        }
        "delete" | "d" => {
            let (index, text) = split_index(rest)?;
            if !text.is_empty() {
                return Err("delete takes only a token index".to_string());
            }
            Ok(Command::Delete { index })
        }
        "tokens" | "t" => Ok(Command::Tokens),
        "show" | "s" => Ok(Command::Show),
        "submit" => Ok(Command::Submit),
        "quit" | "q" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        "" => Err("empty input; try 'help'".to_string()),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

fn split_index(rest: &str) -> Result<(usize, String), String> {
    let (number, text) = match rest.split_once(char::is_whitespace) {
        Some((number, text)) => (number, text.trim().to_string()),
        None => (rest, String::new()),
    };
    number
        .parse::<usize>()
        .map(|index| (index, text))
        .map_err(|_| format!("expected a position, got '{number}'"))
}

const USAGE: &str = "\
commands:
  tokens                list tokens with positions (gaps sit between them)
  insert <gap> <text>   insert a token at a gap (0 = front, N = tail)
  edit <index> <text>   replace the token at <index>; empty text removes it
  delete <index>        remove the token at <index>
  show                  print the rule text as it would be submitted
  submit                submit the edited rule
  quit                  abandon the edit";

/// Apply one command to the editor. Returns the submitted rule text once
/// the caller should stop looping, wrapped so `None` means "quit without
/// submitting".
fn step(editor: &mut TokenEditor, command: Command) -> Option<Option<String>> {
    match command {
        Command::Insert { gap, text } => {
            if gap >= editor.gap_count() {
                println!("no gap {gap}; gaps run 0..={}", editor.gap_count() - 1);
            } else {
                editor.gap_input(gap, &text);
                if !editor.commit_gap(gap) {
                    println!("nothing to insert");
                }
            }
        }
        Command::Edit { index, text } => {
            editor.begin_edit(index);
            if editor.state().editing_index() != Some(index) {
                println!("no token {index}");
            } else {
                editor.edit_text(&text);
                if editor.commit() {
                    println!("token removed");
                }
            }
        }
        Command::Delete { index } => {
            editor.begin_edit(index);
            if editor.state().editing_index() != Some(index) {
                println!("no token {index}");
            } else {
                // Backspace on a cleared token is the removal path.
                editor.edit_text("");
                editor.backspace();
                println!("token removed");
            }
        }
        Command::Tokens => print_tokens(editor),
        Command::Show => println!("{}", editor.rule_text()),
        Command::Submit => return Some(Some(editor.rule_text())),
        Command::Quit => return Some(None),
        Command::Help => println!("{USAGE}"),
    }
    None
}

fn print_tokens(editor: &TokenEditor) {
    let tokens = editor.sequence().tokens();
    if tokens.is_empty() {
        println!("(empty rule; 'insert 0 <text>' adds the first token)");
        return;
    }
    for (index, token) in tokens.iter().enumerate() {
        println!("  [{index}] {token}");
    }
}

/// Run the loop until submit or quit. `Ok(Some(text))` is the rule text to
/// send to the edit endpoint; `Ok(None)` means the user abandoned the edit.
pub fn run(editor: &mut TokenEditor) -> Result<Option<String>> {
    println!("editing rule: {}", editor.rule_text());
    println!("type 'help' for commands");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }
        match parse_command(&line) {
            Ok(command) => {
                if let Some(outcome) = step(editor, command) {
                    return Ok(outcome);
                }
            }
            Err(message) => println!("{message}"),
        }
    }
}
