//! Document path string parser.

use super::ast::{is_identifier_char, DocPath, Segment};
use super::error::PathError;

/// Parser for document path strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path string.
    pub fn new(path: &'a str) -> Self {
        Self {
            input: path,
            position: 0,
        }
    }

    /// Parses the path string into a DocPath.
    pub fn parse(path: &str) -> Result<DocPath, PathError> {
        let mut parser = Parser::new(path);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<DocPath, PathError> {
        let mut segments = Vec::new();

        self.skip_whitespace();

        if self.peek() != Some('$') {
            return Err(PathError::InvalidSyntax {
                message: "Path must start with '$'".to_string(),
            });
        }
        self.next();
        segments.push(Segment::Root);

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('.') => {
                    self.next();
                    match self.peek() {
                        Some('.') => {
                            return Err(PathError::InvalidSyntax {
                                message: "Recursive descent is not supported".to_string(),
                            })
                        }
                        Some('*') => {
                            return Err(PathError::InvalidSyntax {
                                message: "Wildcards are not supported".to_string(),
                            })
                        }
                        _ => {
                            let name = self.parse_identifier()?;
                            segments.push(Segment::DotKey(name));
                        }
                    }
                }
                Some('[') => {
                    segments.push(self.parse_bracket_expression()?);
                }
                Some(ch) => {
                    return Err(PathError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'.' or '['".to_string(),
                    })
                }
            }
        }

        Ok(DocPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses an identifier (property name).
    fn parse_identifier(&mut self) -> Result<String, PathError> {
        self.skip_whitespace();
        let start = self.position;
        while let Some(ch) = self.peek() {
            if is_identifier_char(ch) {
                self.next();
            } else {
                break;
            }
        }
        if start == self.position {
            Err(PathError::InvalidSyntax {
                message: "Expected identifier".to_string(),
            })
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }

    /// Parses bracket expression: [index], ['key'], ["key"]
    fn parse_bracket_expression(&mut self) -> Result<Segment, PathError> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some('\'') | Some('"') => {
                let name = self.parse_quoted()?;
                self.skip_whitespace();
                if self.peek() == Some(',') {
                    return Err(PathError::InvalidSyntax {
                        message: "Multiple properties are not supported".to_string(),
                    });
                }
                self.expect(']')?;
                Segment::BracketKey(name)
            }
            Some('0'..='9') => {
                let idx = self.parse_index()?;
                self.expect(']')?;
                Segment::Index(idx)
            }
            Some('-') => {
                return Err(PathError::InvalidSyntax {
                    message: "Negative indices are not supported".to_string(),
                })
            }
            None => {
                return Err(PathError::UnexpectedEnd {
                    expected: "index or quoted property".to_string(),
                })
            }
            Some(_) => {
                return Err(PathError::InvalidSyntax {
                    message: "Invalid bracket expression".to_string(),
                })
            }
        };

        Ok(segment)
    }

    /// Parses a quoted property name, opening quote included.
    fn parse_quoted(&mut self) -> Result<String, PathError> {
        let quote = match self.next() {
            Some(q @ ('\'' | '"')) => q,
            Some(ch) => {
                return Err(PathError::UnexpectedToken {
                    position: self.position - ch.len_utf8(),
                    found: ch.to_string(),
                    expected: "quote".to_string(),
                })
            }
            None => {
                return Err(PathError::UnexpectedEnd {
                    expected: "quote".to_string(),
                })
            }
        };

        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(_) | None => {
                        return Err(PathError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PathError::UnexpectedEnd {
                        expected: format!("closing quote {}", quote),
                    })
                }
            }
        }
        Ok(value)
    }

    fn parse_index(&mut self) -> Result<usize, PathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.next();
            } else {
                break;
            }
        }
        let digits = &self.input[start..self.position];
        digits.parse::<usize>().map_err(|_| PathError::InvalidSyntax {
            message: format!("Invalid index: {}", digits),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let path = Parser::parse("$").unwrap();
        assert_eq!(path.segments, vec![Segment::Root]);
        assert!(path.is_root());
    }

    #[test]
    fn test_parse_child() {
        let path = Parser::parse("$.store").unwrap();
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.segments[1], Segment::DotKey("store".to_string()));
    }

    #[test]
    fn test_parse_nested_child() {
        let path = Parser::parse("$.store.book").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments[2], Segment::DotKey("book".to_string()));
    }

    #[test]
    fn test_parse_array_index() {
        let path = Parser::parse("$.items[0]").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments[1], Segment::DotKey("items".to_string()));
        assert_eq!(path.segments[2], Segment::Index(0));
    }

    #[test]
    fn test_parse_bracket_notation() {
        let path = Parser::parse("$['store'][\"book\"]").unwrap();
        assert_eq!(path.segments[1], Segment::BracketKey("store".to_string()));
        assert_eq!(path.segments[2], Segment::BracketKey("book".to_string()));
    }

    #[test]
    fn test_parse_bracket_escapes() {
        let path = Parser::parse(r"$['it\'s']").unwrap();
        assert_eq!(path.segments[1], Segment::BracketKey("it's".to_string()));
    }

    #[test]
    fn test_parse_root_index() {
        let path = Parser::parse("$[1]").unwrap();
        assert_eq!(path.segments, vec![Segment::Root, Segment::Index(1)]);
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let path = Parser::parse("$ . store [ 0 ]").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments[1], Segment::DotKey("store".to_string()));
        assert_eq!(path.segments[2], Segment::Index(0));
    }

    #[test]
    fn test_parse_unicode_identifier() {
        let path = Parser::parse("$.größe[1]").unwrap();
        assert_eq!(path.segments[1], Segment::DotKey("größe".to_string()));
        assert_eq!(path.segments[2], Segment::Index(1));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(Parser::parse("").is_err());
    }

    #[test]
    fn test_parse_missing_root_fails() {
        assert!(Parser::parse("store.book").is_err());
    }

    #[test]
    fn test_parse_unbalanced_brackets_fail() {
        assert!(matches!(
            Parser::parse("$.foo[0"),
            Err(PathError::UnexpectedEnd { .. })
        ));
        assert!(Parser::parse("$['foo'").is_err());
        assert!(Parser::parse("$.foo]").is_err());
    }

    #[test]
    fn test_parse_unclosed_quote_fails() {
        assert!(matches!(
            Parser::parse("$['foo]"),
            Err(PathError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_parse_non_integer_index_fails() {
        assert!(Parser::parse("$.foo[x]").is_err());
        assert!(Parser::parse("$.foo[1.5]").is_err());
        assert!(Parser::parse("$.foo[-1]").is_err());
    }

    #[test]
    fn test_parse_unsupported_query_syntax_fails() {
        assert!(Parser::parse("$..price").is_err());
        assert!(Parser::parse("$.items.*").is_err());
        assert!(Parser::parse("$.items[*]").is_err());
        assert!(Parser::parse("$['a','b']").is_err());
    }

    #[test]
    fn test_parse_empty_identifier_fails() {
        assert!(Parser::parse("$.").is_err());
        assert!(Parser::parse("$.foo.").is_err());
    }
}
