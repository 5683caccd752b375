use super::argument_parser::*;
use super::error::ParseFailure;
use super::value::Value;

/// `Ok((value, rest))` where `rest` is the input left after the consumed text.
pub type ArgumentParseResult<'a> = Result<(Value, &'a str), ParseFailure>;

/// A typed argument capability supplied by the host.
///
/// `parse` receives the input starting at the cursor with leading whitespace
/// already skipped, and must return the unconsumed remainder as a suffix of
/// that input. Greedy types always consume the whole remainder.
///
/// Implementations used for interactive completion should not block: the
/// completion engine calls `suggest` inline and applies no timeout.
pub trait ArgumentType: Send + Sync {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a>;

    fn suggest(&self, _partial: &str) -> Vec<String> {
        Vec::new()
    }

    fn is_greedy(&self) -> bool {
        false
    }

    /// Short name used in debug output.
    fn type_name(&self) -> &str;
}

pub fn word() -> StringArgument {
    StringArgument::new(StringKind::Word)
}

pub fn string() -> StringArgument {
    StringArgument::new(StringKind::Quotable)
}

pub fn greedy_string() -> StringArgument {
    StringArgument::new(StringKind::Greedy)
}

pub fn integer() -> IntegerArgument {
    IntegerArgument::new(i32::MIN, i32::MAX)
}

pub fn integer_range(min: i32, max: i32) -> IntegerArgument {
    IntegerArgument::new(min, max)
}

pub fn float() -> FloatArgument {
    FloatArgument::new(f32::MIN, f32::MAX)
}

pub fn float_range(min: f32, max: f32) -> FloatArgument {
    FloatArgument::new(min, max)
}

pub fn boolean() -> BooleanArgument {
    BooleanArgument
}

pub fn choice<I, S>(choices: I) -> ChoiceArgument
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChoiceArgument::new(choices.into_iter().map(Into::into).collect())
}
