#![allow(dead_code)]

use cmdtree::{
    ArgumentParseResult, ArgumentType, CommandGrammar, GrammarNode, ParseFailure, Value, boolean,
    consume_token, greedy_string, integer, string, word,
};
use std::sync::Once;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

static LOGGING: Once = Once::new();

pub fn init_logging() {
    LOGGING.call_once(|| {
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .with_env_var("CMDTREE_LOG")
            .from_env_lossy();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

/// `baba|[<subcommand>] [<bebebaba123>]|1 [<ivancho>]`
pub fn baba_grammar() -> CommandGrammar {
    CommandGrammar::builder()
        .then(
            GrammarNode::literal("baba")
                .then(
                    GrammarNode::required("bebebaba123", integer())
                        .then(GrammarNode::required("ivancho", boolean())),
                )
                .then(GrammarNode::literal("1")),
        )
        .then(GrammarNode::required("subcommand", string()))
        .build()
        .unwrap()
}

/// Literal routing, typed arguments and a trailing greedy message.
pub fn mail_grammar() -> CommandGrammar {
    CommandGrammar::builder()
        .then(
            GrammarNode::literal("send").then(
                GrammarNode::required("recipient", word())
                    .mark_not_executes()
                    .suggests(|_| {
                        vec!["alice".to_string(), "Albert".to_string(), "bob".to_string()]
                    })
                    .then(GrammarNode::required("message", greedy_string())),
            ),
        )
        .then(
            GrammarNode::literal("read").then(
                GrammarNode::required("page", integer())
                    .then(GrammarNode::literal("unread").mark_executes()),
            ),
        )
        .then(GrammarNode::literal("clear").mark_executes())
        .build()
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

/// A host-defined argument type producing a custom value.
pub struct ColorArgument;

impl ArgumentType for ColorArgument {
    fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        let (token, rest) =
            consume_token(input).ok_or_else(|| ParseFailure::new("Expected a color", ""))?;
        let color = match token {
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            _ => return Err(ParseFailure::new("Unknown color", token)),
        };
        Ok((Value::custom(color), rest))
    }

    fn suggest(&self, _partial: &str) -> Vec<String> {
        ["red", "green", "blue"].map(String::from).to_vec()
    }

    fn type_name(&self) -> &str {
        "color"
    }
}
