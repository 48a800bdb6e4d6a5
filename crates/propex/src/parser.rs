//! Recursive descent parser for Propex strings
//!
//! Grammar:
//!
//! ```text
//! propex     := object | array
//! object     := "{" ( field ("," field)* )? "}"
//! array      := "[" propex? "]"
//! field      := identifier ( object | array )?
//! identifier := one or more characters excluding "{", "}", "[", "]", ","
//! ```
//!
//! The grammar is LL(1) at the bracket and comma level, so the parser makes a
//! single left-to-right pass and descends whenever it opens a bracket.

use crate::ast::{FieldSpec, PropexNode};
use crate::error::{PropexError, PropexResult};

/// Default limit on bracket nesting
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parses a Propex string with the default nesting limit.
///
/// # Examples
///
/// ```
/// use propex::parse;
///
/// let node = parse("{name, nested[{something}]}").unwrap();
/// assert_eq!(node.to_string(), "{name,nested[{something}]}");
/// assert!(parse("{name,}").is_err());
/// ```
pub fn parse(input: &str) -> PropexResult<PropexNode> {
    Parser::new(input).parse()
}

/// Parser for converting a Propex string into an AST
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser over `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole input into a single root node
    pub fn parse(mut self) -> PropexResult<PropexNode> {
        self.skip_whitespace();

        let node = match self.current_char() {
            None => return Err(PropexError::Empty),
            Some('{' | '[') => self.parse_node()?,
            Some(found) => {
                return Err(PropexError::UnexpectedRoot {
                    found,
                    offset: self.position,
                });
            }
        };

        self.skip_whitespace();
        if self.current_char().is_some() {
            return Err(PropexError::TrailingInput {
                offset: self.position,
            });
        }

        Ok(node)
    }

    /// Parse an object or array starting at the current bracket
    fn parse_node(&mut self) -> PropexResult<PropexNode> {
        let open = self.position;
        match self.current_char() {
            Some('{') => self.nested(open, Self::parse_object),
            Some('[') => self.nested(open, Self::parse_array),
            Some(found) => Err(PropexError::Unexpected {
                expected: "'{' or '['",
                found,
                offset: open,
            }),
            None => Err(PropexError::Empty),
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested(
        &mut self,
        open: usize,
        parse: fn(&mut Self, usize) -> PropexResult<PropexNode>,
    ) -> PropexResult<PropexNode> {
        if self.depth >= self.max_depth {
            return Err(PropexError::TooDeep {
                limit: self.max_depth,
                offset: open,
            });
        }
        self.depth += 1;
        let node = parse(self, open);
        self.depth -= 1;
        node
    }

    fn parse_object(&mut self, open: usize) -> PropexResult<PropexNode> {
        self.advance();
        self.skip_whitespace();

        let mut fields: Vec<FieldSpec> = Vec::new();
        if self.current_char() == Some('}') {
            self.advance();
            return Ok(PropexNode::Object(fields));
        }

        loop {
            let offset = self.position;
            let field = self.parse_field(open)?;
            if fields.iter().any(|existing| existing.name() == field.name()) {
                return Err(PropexError::DuplicateField {
                    name: field.name().to_owned(),
                    offset,
                });
            }
            fields.push(field);

            self.skip_whitespace();
            match self.current_char() {
                Some(',') => {
                    self.advance();
                    self.skip_whitespace();
                }
                Some('}') => {
                    self.advance();
                    return Ok(PropexNode::Object(fields));
                }
                Some(found) => {
                    return Err(PropexError::Unexpected {
                        expected: "',' or '}'",
                        found,
                        offset: self.position,
                    });
                }
                None => return Err(PropexError::Unclosed { open: '{', offset: open }),
            }
        }
    }

    fn parse_array(&mut self, open: usize) -> PropexResult<PropexNode> {
        self.advance();
        self.skip_whitespace();

        let element = match self.current_char() {
            Some(']') => None,
            Some('{' | '[') => Some(Box::new(self.parse_node()?)),
            Some(found) => {
                return Err(PropexError::Unexpected {
                    expected: "'{', '[' or ']'",
                    found,
                    offset: self.position,
                });
            }
            None => return Err(PropexError::Unclosed { open: '[', offset: open }),
        };

        self.skip_whitespace();
        match self.current_char() {
            Some(']') => {
                self.advance();
                Ok(PropexNode::Array(element))
            }
            Some(found) => Err(PropexError::Unexpected {
                expected: "']'",
                found,
                offset: self.position,
            }),
            None => Err(PropexError::Unclosed { open: '[', offset: open }),
        }
    }

    /// Parse `identifier ( object | array )?` inside the object opened at `open`
    fn parse_field(&mut self, open: usize) -> PropexResult<FieldSpec> {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if is_delimiter(ch) {
                break;
            }
            self.advance();
        }

        let name = self.input[start..self.position].trim();
        if name.is_empty() {
            if self.current_char().is_none() {
                return Err(PropexError::Unclosed { open: '{', offset: open });
            }
            return Err(PropexError::EmptyFieldName { offset: start });
        }

        match self.current_char() {
            Some('{' | '[') => Ok(FieldSpec::nested(name, self.parse_node()?)),
            _ => Ok(FieldSpec::leaf(name)),
        }
    }

    /// Get the current character
    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Advance position by the current character's UTF-8 byte length
    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, '{' | '}' | '[' | ']' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(parse("{}").unwrap(), PropexNode::empty_object());
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(parse("[]").unwrap(), PropexNode::empty_array());
    }

    #[test]
    fn test_parse_fields_in_order() {
        let node = parse("{name,type}").unwrap();
        let names: Vec<&str> = node.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["name", "type"]);
        assert!(node.fields().iter().all(FieldSpec::is_leaf));
    }

    #[test]
    fn test_parse_nested_array_of_objects() {
        let node = parse("{nested[{something}]}").unwrap();
        assert_eq!(
            node,
            PropexNode::Object(vec![FieldSpec::nested(
                "nested",
                PropexNode::array_of(PropexNode::Object(vec![FieldSpec::leaf("something")])),
            )])
        );
    }

    #[test]
    fn test_parse_nested_object() {
        let node = parse("{people{name,phone,role}}").unwrap();
        let people = node.field("people").and_then(FieldSpec::shape).unwrap();
        assert_eq!(people.fields().len(), 3);
    }

    #[test]
    fn test_parse_array_of_arrays() {
        let node = parse("[[{a}]]").unwrap();
        assert_eq!(node.depth(), 3);
        assert_eq!(node.to_string(), "[[{a}]]");
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let spaced = parse("  { name ,\n\ttype [ { a } ] , other { } }  ").unwrap();
        assert_eq!(spaced, parse("{name,type[{a}],other{}}").unwrap());
    }

    #[test]
    fn test_interior_whitespace_kept_in_names() {
        let node = parse("{first name}").unwrap();
        assert_eq!(node.fields()[0].name(), "first name");
    }

    #[test]
    fn test_unicode_names() {
        let node = parse("{имя,名前[{ключ}]}").unwrap();
        assert_eq!(node.to_string(), "{имя,名前[{ключ}]}");
    }

    #[rstest]
    #[case("", "PROPEX:EMPTY")]
    #[case("   ", "PROPEX:EMPTY")]
    #[case("name", "PROPEX:ROOT")]
    #[case("}", "PROPEX:ROOT")]
    #[case("{", "PROPEX:UNCLOSED")]
    #[case("{name", "PROPEX:UNCLOSED")]
    #[case("{name,type", "PROPEX:UNCLOSED")]
    #[case("[", "PROPEX:UNCLOSED")]
    #[case("[{a}", "PROPEX:UNCLOSED")]
    #[case("{a{b}", "PROPEX:UNCLOSED")]
    #[case("{,}", "PROPEX:EMPTY_FIELD")]
    #[case("{a,}", "PROPEX:EMPTY_FIELD")]
    #[case("{a,,b}", "PROPEX:EMPTY_FIELD")]
    #[case("{{a}}", "PROPEX:EMPTY_FIELD")]
    #[case("{a]", "PROPEX:UNEXPECTED")]
    #[case("[a]", "PROPEX:UNEXPECTED")]
    #[case("[{a},{b}]", "PROPEX:UNEXPECTED")]
    #[case("{a{b}c}", "PROPEX:UNEXPECTED")]
    #[case("{}}", "PROPEX:TRAILING")]
    #[case("{}[]", "PROPEX:TRAILING")]
    #[case("{a,a}", "PROPEX:DUPLICATE_FIELD")]
    #[case("{a{x},a}", "PROPEX:DUPLICATE_FIELD")]
    fn test_syntax_errors(#[case] input: &str, #[case] code: &str) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.code(), code, "input {input:?} gave {err}");
    }

    #[test]
    fn test_unclosed_reports_opening_offset() {
        let err = parse("{a,b[{c}").unwrap_err();
        assert_eq!(
            err,
            PropexError::Unclosed {
                open: '[',
                offset: 4
            }
        );
    }

    #[test]
    fn test_empty_field_offset() {
        let err = parse("{a,,b}").unwrap_err();
        assert_eq!(err, PropexError::EmptyFieldName { offset: 3 });
    }

    #[test]
    fn test_duplicate_field_name() {
        let err = parse("{ a , a }").unwrap_err();
        assert!(matches!(err, PropexError::DuplicateField { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(10), "]".repeat(10));
        assert!(Parser::new(&deep).with_max_depth(10).parse().is_ok());

        let err = Parser::new(&deep).with_max_depth(9).parse().unwrap_err();
        assert_eq!(err, PropexError::TooDeep { limit: 9, offset: 9 });
    }

    #[test]
    fn test_default_depth_limit_guards_recursion() {
        let deep = "[".repeat(DEFAULT_MAX_DEPTH + 1);
        let err = parse(&deep).unwrap_err();
        assert_eq!(err.code(), "PROPEX:TOO_DEEP");
    }
}
