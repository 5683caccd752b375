use super::argument::{ArgumentParseResult, ArgumentType};
use super::error::ParseFailure;
use super::value::Value;

pub(super) fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

pub fn consume_token(input: &str) -> Option<(&str, &str)> {
    let input = skip_whitespace(input);
    if input.is_empty() {
        return None;
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());

    Some((&input[..end], &input[end..]))
}

fn expect_token<'a>(input: &'a str, what: &str) -> Result<(&'a str, &'a str), ParseFailure> {
    consume_token(input).ok_or_else(|| ParseFailure::new(format!("Expected {what}"), ""))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Word,
    Quotable,
    Greedy,
}

#[derive(Debug, Clone)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    pub fn new(kind: StringKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }
}

impl ArgumentType for StringArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let input = skip_whitespace(input);
        match self.kind {
            StringKind::Word => parse_word(input),
            StringKind::Quotable if input.starts_with('"') => parse_quoted(input),
            StringKind::Quotable => parse_word(input),
            StringKind::Greedy => parse_greedy_string(input),
        }
    }

    fn is_greedy(&self) -> bool {
        self.kind == StringKind::Greedy
    }

    fn type_name(&self) -> &str {
        match self.kind {
            StringKind::Word => "word",
            StringKind::Quotable => "string",
            StringKind::Greedy => "greedy_string",
        }
    }
}

pub fn parse_word(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = expect_token(input, "a word")?;
    Ok((Value::String(token.to_string()), rest))
}

pub fn parse_greedy_string(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    Ok((Value::String(input.trim_end().to_string()), ""))
}

/// Parses `"..."` with `\"` and `\\` escapes. The closing quote must be
/// followed by whitespace or the end of input.
pub fn parse_quoted(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    let Some(body) = input.strip_prefix('"') else {
        return Err(ParseFailure::new("Expected quote to start a string", input));
    };

    let mut value = String::new();
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            if c != '"' && c != '\\' {
                return Err(ParseFailure::new(
                    format!("Invalid escape sequence '\\{c}' in quoted string"),
                    input,
                ));
            }
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            let rest = &body[i + 1..];
            if rest.starts_with(|c: char| !c.is_whitespace()) {
                return Err(ParseFailure::new(
                    "Expected whitespace to end one argument",
                    input,
                ));
            }
            return Ok((Value::String(value), rest));
        } else {
            value.push(c);
        }
    }

    Err(ParseFailure::new("Unclosed quoted string", input))
}

#[derive(Debug, Clone)]
pub struct IntegerArgument {
    min: i32,
    max: i32,
}

impl IntegerArgument {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

impl ArgumentType for IntegerArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let (token, rest) = expect_token(input, "integer")?;

        let value = token
            .parse::<i32>()
            .map_err(|_| ParseFailure::new("Invalid integer", token))?;

        if !(self.min..=self.max).contains(&value) {
            return Err(ParseFailure::new(
                format!("Integer must be between {} and {}", self.min, self.max),
                token,
            ));
        }

        Ok((Value::Integer(value), rest))
    }

    fn type_name(&self) -> &str {
        "integer"
    }
}

#[derive(Debug, Clone)]
pub struct FloatArgument {
    min: f32,
    max: f32,
}

impl FloatArgument {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl ArgumentType for FloatArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let (token, rest) = expect_token(input, "float")?;

        let value = token
            .parse::<f32>()
            .map_err(|_| ParseFailure::new("Invalid float", token))?;

        if !(self.min..=self.max).contains(&value) {
            return Err(ParseFailure::new(
                format!("Float must be between {} and {}", self.min, self.max),
                token,
            ));
        }

        Ok((Value::Float(value), rest))
    }

    fn type_name(&self) -> &str {
        "float"
    }
}

#[derive(Debug, Clone)]
pub struct BooleanArgument;

impl ArgumentType for BooleanArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let (token, rest) = expect_token(input, "boolean")?;

        let value = match token.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(ParseFailure::new("Invalid boolean", token)),
        };

        Ok((Value::Boolean(value), rest))
    }

    fn suggest(&self, _partial: &str) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }

    fn type_name(&self) -> &str {
        "boolean"
    }
}

#[derive(Debug, Clone)]
pub struct ChoiceArgument {
    choices: Vec<String>,
}

impl ChoiceArgument {
    pub fn new(choices: Vec<String>) -> Self {
        Self { choices }
    }
}

impl ArgumentType for ChoiceArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let (token, rest) = expect_token(input, "one of the listed values")?;

        if !self.choices.iter().any(|choice| choice == token) {
            return Err(ParseFailure::new(
                format!("Expected one of: {}", self.choices.join(", ")),
                token,
            ));
        }

        Ok((Value::String(token.to_string()), rest))
    }

    fn suggest(&self, _partial: &str) -> Vec<String> {
        self.choices.clone()
    }

    fn type_name(&self) -> &str {
        "choice"
    }
}
