//! Session script parser.
//!
//! Recursive descent parser for the line-oriented command language. Each
//! line is one command; `#` lines and blank lines are skipped. Errors carry
//! the character offset within the line, and script-level parsing wraps them
//! with the line number.

use crate::domain::error::{ParseError, ScriptError};
use crate::domain::script::{Command, ObjectSpec};

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || ch == '-'
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError {
                message: format!("expected '{}', found '{}'", expected, ch),
                position: self.pos,
            }),
            None => Err(ParseError {
                message: format!("expected '{}', found end of line", expected),
                position: self.pos,
            }),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        let remaining = self.remaining();
        remaining.starts_with(keyword)
            && (remaining.len() == keyword.len()
                || !remaining[keyword.len()..]
                    .chars()
                    .next()
                    .map(is_name_char)
                    .unwrap_or(false))
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn peek_word(&self) -> String {
        let mut word = String::new();
        for ch in self.remaining().chars() {
            if is_name_char(ch) {
                word.push(ch);
            } else {
                break;
            }
        }
        if word.is_empty() {
            self.peek()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "end of line".to_string())
        } else {
            word
        }
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ParseError {
                message: format!("expected an instance name, found '{}'", self.peek_word()),
                position: start,
            });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Everything up to end of line, outer whitespace trimmed.
    fn parse_rest(&mut self) -> String {
        self.skip_whitespace();
        let rest = self.remaining().trim_end().to_string();
        self.pos = self.input.len();
        rest
    }

    fn parse_type_name(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ParseError {
                message: format!("expected an object type, found '{}'", self.peek_word()),
                position: start,
            });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_argument(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == ',' || ch == ')' {
                break;
            }
            self.advance();
        }
        let arg = self.input[start..self.pos].trim_end().to_string();
        if arg.is_empty() {
            return Err(ParseError {
                message: "empty argument in object specification".to_string(),
                position: start,
            });
        }
        Ok(arg)
    }

    fn parse_spec(&mut self) -> Result<ObjectSpec, ParseError> {
        let type_name = self.parse_type_name()?;
        self.expect_char('(')?;
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(ObjectSpec { type_name, args });
        }
        loop {
            args.push(self.parse_argument()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(ParseError {
                        message: format!(
                            "expected ',' or ')' in argument list, found '{}'",
                            self.peek_word()
                        ),
                        position: self.pos,
                    });
                }
            }
        }
        Ok(ObjectSpec { type_name, args })
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        self.skip_whitespace();

        if self.consume_keyword("STORE") {
            let name = self.parse_name()?;
            let spec = self.parse_spec()?;
            return Ok(Command::Store { name, spec });
        }
        if self.consume_keyword("FIXINGS") {
            let name = self.parse_name()?;
            let path = self.parse_rest();
            if path.is_empty() {
                return Err(ParseError {
                    message: "expected a file path after the instance name".to_string(),
                    position: self.pos,
                });
            }
            return Ok(Command::Fixings { name, path });
        }
        if self.consume_keyword("RETRIEVE") {
            let name = self.parse_name()?;
            return Ok(Command::Retrieve { name });
        }
        if self.consume_keyword("DELETE_ALL") {
            return Ok(Command::DeleteAll);
        }
        if self.consume_keyword("DELETE") {
            let name = self.parse_name()?;
            return Ok(Command::Delete { name });
        }
        if self.consume_keyword("COUNT") {
            return Ok(Command::Count);
        }
        if self.consume_keyword("LIST") {
            let pattern = self.parse_rest();
            return Ok(Command::List { pattern });
        }
        if self.consume_keyword("DUMP") {
            return Ok(Command::Dump);
        }

        let word = self.peek_word();
        Err(ParseError {
            message: format!("expected a command, found '{}'", word),
            position: self.pos,
        })
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(input: &str) -> Result<Option<Command>, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    if parser.peek().is_none() || parser.peek() == Some('#') {
        return Ok(None);
    }
    let command = parser.parse_command()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(ParseError {
            message: format!("unexpected input after command: '{}'", parser.remaining()),
            position: parser.pos,
        });
    }
    Ok(Some(command))
}

/// Parse a whole script into commands tagged with their 1-based line number.
pub fn parse_script(input: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line_number = idx + 1;
        match parse_line(line) {
            Ok(Some(command)) => commands.push((line_number, command)),
            Ok(None) => {}
            Err(error) => {
                return Err(ScriptError {
                    line_number,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }
    Ok(commands)
}
