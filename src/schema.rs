use crate::error::{Error, Result};
use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub type_name: String,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variant {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Family {
    pub base_name: String,
    pub variants: Vec<Variant>,
}

impl Family {
    /// Parses entry strings of the following shape:
    /// ```text
    /// Name : Type field, Type field, ...
    /// ```
    ///
    /// For example:
    /// ```text
    /// Binary : Expr left, Token operator, Expr right
    /// ```
    ///
    /// Types may carry an angle-bracketed argument list (`List<Expr>`).
    /// Entries are parsed once, up front; a malformed entry is reported
    /// as an error naming the entry rather than producing broken output.
    pub fn parse(base_name: &str, entries: &[&str]) -> Result<Family> {
        let mut variants: Vec<Variant> = Vec::new();
        for entry in entries.iter() {
            let variant = EntryParser::new(entry).parse()?;
            if variants.iter().any(|v| v.name == variant.name) {
                return Err(Error::schema(
                    entry,
                    format!("Duplicate variant name '{}'.", variant.name),
                ));
            }
            variants.push(variant);
        }
        Ok(Family {
            base_name: base_name.to_string(),
            variants,
        })
    }
}

struct EntryParser<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    entry: &'a str,
}

impl<'a> EntryParser<'a> {
    fn new(entry: &'a str) -> Self {
        Self {
            src: entry.chars().peekmore(),
            entry,
        }
    }

    fn parse(mut self) -> Result<Variant> {
        self.skip_whitespace();
        let name = self.extract_identifier("Expected variant name.")?;
        self.skip_whitespace();
        self.expect(':', "Expected ':' after variant name.")?;

        let mut fields: Vec<Field> = Vec::new();
        loop {
            self.skip_whitespace();
            let type_name = self.extract_type()?;
            self.skip_whitespace();
            let field_name = self.extract_identifier("Expected field name after type.")?;
            if fields.iter().any(|f| f.name == field_name) {
                return Err(self.error(format!("Duplicate field name '{}'.", field_name)));
            }
            fields.push(Field {
                type_name,
                name: field_name,
            });

            self.skip_whitespace();
            match self.src.next() {
                None => break,
                Some(',') => continue,
                Some(c) => return Err(self.error(format!("Unexpected character '{}' after field.", c))),
            }
        }

        Ok(Variant { name, fields })
    }

    fn extract_identifier(&mut self, expectation: &str) -> Result<String> {
        match self.src.peek() {
            Some(c) if can_start_identifier(c) => {}
            _ => return Err(self.error(expectation)),
        }

        let mut text = String::new();
        while let Some(c) = self.src.peek() {
            if !is_part_of_valid_identifier(c) {
                break;
            }
            text.push(self.src.next().unwrap());
        }
        Ok(text)
    }

    // A type is an identifier optionally followed by a balanced
    // angle-bracketed argument list, kept verbatim.
    fn extract_type(&mut self) -> Result<String> {
        let mut text = self.extract_identifier("Expected field type.")?;

        if let Some(&'<') = self.src.peek() {
            let mut depth = 0;
            loop {
                match self.src.next() {
                    None => return Err(self.error("Unclosed '<' in field type.")),
                    Some(c) => {
                        text.push(c);
                        if c == '<' {
                            depth += 1;
                        }
                        if c == '>' {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Ok(text)
    }

    fn expect(&mut self, expected: char, message: &str) -> Result<()> {
        match self.src.next() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(message)),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.src.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.src.next();
        }
    }

    fn error<S: Into<String>>(&self, message: S) -> Error {
        Error::schema(self.entry, message)
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_digit(10)
}
