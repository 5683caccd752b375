mod common;

use cmdtree::{
    BindStatus, CommandError, CommandGrammar, GrammarNode, InternalError, Position, RuntimeError,
    bind, boolean, greedy_string, integer, word,
};
use common::{Color, ColorArgument, baba_grammar, init_logging, mail_grammar};

#[test]
fn subcommand_and_greedy_message() {
    init_logging();
    let grammar = CommandGrammar::builder()
        .then(
            GrammarNode::required("subcommand", word())
                .then(GrammarNode::required("message", greedy_string())),
        )
        .build()
        .unwrap();

    let set = bind(&grammar, "hello this is my message");
    assert_eq!(set.raw_value("subcommand").unwrap(), Some("hello"));
    assert_eq!(
        set.raw_value("message").unwrap(),
        Some("this is my message")
    );
    assert!(set.is_bound("subcommand").unwrap());
    assert!(set.is_bound("message").unwrap());
}

#[test]
fn invalid_integer_leaves_rest_unreached() {
    init_logging();
    let grammar = CommandGrammar::builder()
        .then(
            GrammarNode::required("myint", integer())
                .then(GrammarNode::required("message", greedy_string())),
        )
        .build()
        .unwrap();

    let set = bind(&grammar, "bbc this is my message");
    assert!(set.is_bound("myint").unwrap());
    assert!(set.get_binding("myint").unwrap().failure().is_some());

    let message = set.get_binding("message").unwrap();
    assert!(message.raw_text().is_none());
    assert!(message.value().is_none());
    assert!(message.position().is_none());
    assert!(message.failure().is_none());

    match set.require::<i32>("myint") {
        Err(CommandError::Runtime(RuntimeError::InvalidArgument(failure))) => {
            assert_eq!(failure.raw, "bbc")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn failed_node_keeps_its_raw_text() {
    let grammar = CommandGrammar::builder()
        .then(GrammarNode::required("myint", integer()))
        .build()
        .unwrap();

    let set = bind(&grammar, "bbc");
    assert!(set.is_bound("myint").unwrap());
    assert_eq!(set.raw_value("myint").unwrap(), Some("bbc"));
    assert_eq!(set.typed_value::<i32>("myint").unwrap(), None);
    assert!(matches!(
        set.require::<i32>("myint"),
        Err(CommandError::Runtime(RuntimeError::InvalidArgument(_)))
    ));

    let set = bind(&grammar, "");
    assert_eq!(set.raw_value("myint").unwrap(), None);
}

fn number_or_word() -> CommandGrammar {
    CommandGrammar::builder()
        .then(
            GrammarNode::required("n", integer())
                .mark_not_executes()
                .then(GrammarNode::literal("x").mark_executes()),
        )
        .then(
            GrammarNode::required("w", word())
                .mark_not_executes()
                .then(GrammarNode::literal("y").mark_executes()),
        )
        .build()
        .unwrap()
}

#[test]
fn later_typed_sibling_binds_when_earlier_fails() {
    let grammar = number_or_word();

    let set = bind(&grammar, "abc y");
    assert!(!set.is_bound("n").unwrap());
    assert_eq!(set.raw_value("w").unwrap(), Some("abc"));
    assert_eq!(
        set.get_binding("w").unwrap().position(),
        Some(Position::Index(0))
    );
    assert_eq!(set.terminal_node().map(|node| node.name()), Some("y"));
    assert!(set.should_execute());

    let set = bind(&grammar, "12 x");
    assert_eq!(set.typed_value::<i32>("n").unwrap(), Some(12));
    assert!(!set.is_bound("w").unwrap());
    assert!(set.should_execute());
}

#[test]
fn first_typed_sibling_records_failure_when_all_fail() {
    let grammar = CommandGrammar::builder()
        .then(GrammarNode::required("count", integer()))
        .then(GrammarNode::required("flag", boolean()))
        .build()
        .unwrap();

    let set = bind(&grammar, "maybe");
    assert_eq!(
        set.status(),
        &BindStatus::InvalidArgument {
            name: "count".to_string()
        }
    );
    let count = set.get_binding("count").unwrap();
    assert_eq!(
        count.failure().map(|failure| failure.raw.as_str()),
        Some("maybe")
    );
    assert_eq!(count.position(), Some(Position::Index(0)));
    assert!(!set.is_bound("flag").unwrap());
}

#[test]
fn literal_beats_typed_sibling() {
    let grammar = baba_grammar();

    let set = bind(&grammar, "baba 5 true");
    assert!(!set.is_bound("subcommand").unwrap());
    assert_eq!(set.typed_value::<i32>("bebebaba123").unwrap(), Some(5));
    assert_eq!(set.typed_value::<bool>("ivancho").unwrap(), Some(true));
    assert_eq!(
        set.get_binding("ivancho").unwrap().position(),
        Some(Position::Index(2))
    );
    assert!(set.should_execute());

    let set = bind(&grammar, "baba 1");
    assert!(!set.is_bound("bebebaba123").unwrap());
    assert_eq!(set.terminal_node().map(|node| node.name()), Some("1"));

    let set = bind(&grammar, "other");
    assert_eq!(set.raw_value("subcommand").unwrap(), Some("other"));
    assert!(!set.is_bound("bebebaba123").unwrap());
    assert!(set.should_execute());
}

#[test]
fn greedy_after_literal() {
    let grammar = CommandGrammar::builder()
        .then(GrammarNode::literal("cmd").then(GrammarNode::required("msg", greedy_string())))
        .build()
        .unwrap();

    let set = bind(&grammar, "cmd this is my message");
    assert_eq!(set.raw_value("msg").unwrap(), Some("this is my message"));
    assert_eq!(set.slot("msg").unwrap(), 0);
    assert_eq!(
        set.get_binding("msg").unwrap().position(),
        Some(Position::Range { start: 1, end: 4 })
    );
}

#[test]
fn bound_text_is_ordered_and_exact() {
    let grammar = mail_grammar();
    let input = "send  bob   hi there";
    let set = bind(&grammar, input);

    let bound: Vec<_> = set
        .bindings()
        .iter()
        .filter(|binding| binding.is_attempted())
        .collect();
    assert_eq!(bound.len(), 2);

    let mut last_end = None;
    for binding in &bound {
        let raw = binding.raw_text().unwrap();
        assert!(input.contains(raw));
        let position = binding.position().unwrap();
        if let Some(end) = last_end {
            assert!(position.start() > end);
        }
        last_end = Some(position.end());
    }
    assert_eq!(set.raw_value("recipient").unwrap(), Some("bob"));
    assert_eq!(set.raw_value("message").unwrap(), Some("hi there"));
    assert!(set.should_execute());
}

#[test]
fn literal_terminal_executes() {
    let grammar = mail_grammar();

    let set = bind(&grammar, "read 3 unread");
    assert_eq!(set.typed_value::<i32>("page").unwrap(), Some(3));
    assert_eq!(set.terminal_node().map(|node| node.name()), Some("unread"));
    assert!(set.last_bound_node().is_none());
    assert!(set.should_execute());

    let set = bind(&grammar, "send bob");
    assert_eq!(set.status(), &BindStatus::Partial);
    assert_eq!(set.last_bound_node().map(|b| b.name()), Some("recipient"));
}

#[test]
fn zero_argument_grammar() {
    let grammar = CommandGrammar::builder().mark_executes().build().unwrap();

    let set = bind(&grammar, "");
    assert!(set.is_empty());
    assert!(set.should_execute());

    let set = bind(&grammar, "unexpected");
    assert_eq!(
        set.status(),
        &BindStatus::TooManyArguments {
            remaining: "unexpected".to_string()
        }
    );
}

#[test]
fn unknown_literal_is_unmatched() {
    let grammar = mail_grammar();
    let set = bind(&grammar, "delete everything");
    assert_eq!(
        set.status(),
        &BindStatus::Unmatched {
            remaining: "delete everything".to_string()
        }
    );
}

#[test]
fn host_argument_types() {
    let grammar = CommandGrammar::builder()
        .then(GrammarNode::required("color", ColorArgument))
        .build()
        .unwrap();

    let set = bind(&grammar, "green");
    assert_eq!(
        set.custom_value::<Color>("color").unwrap(),
        Some(&Color::Green)
    );
    assert!(matches!(
        set.typed_value::<i32>("color"),
        Err(CommandError::Internal(InternalError::WrongArgumentType { .. }))
    ));
    assert!(matches!(
        set.raw_value("colour"),
        Err(CommandError::Internal(InternalError::UnknownArgument { .. }))
    ));

    let set = bind(&grammar, "");
    assert!(matches!(
        set.require::<String>("color"),
        Err(CommandError::Runtime(RuntimeError::MissingArgument { .. }))
    ));
}

#[test]
fn shadowed_names_resolve_to_reached_branch() {
    let grammar = CommandGrammar::builder()
        .then(GrammarNode::literal("a").then(GrammarNode::required("x", word())))
        .then(GrammarNode::literal("b").then(GrammarNode::required("x", integer())))
        .build()
        .unwrap();

    let set = bind(&grammar, "b 5");
    assert_eq!(set.typed_value::<i32>("x").unwrap(), Some(5));

    let set = bind(&grammar, "");
    let x = set.get_binding("x").unwrap();
    assert_eq!(
        x.node().argument_type().map(|t| t.type_name()),
        Some("word")
    );
}

#[test]
fn grammars_are_shared_across_threads() {
    let grammar = mail_grammar();
    let grammar = &grammar;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|page| {
                scope.spawn(move || {
                    let set = bind(grammar, &format!("read {page}"));
                    set.typed_value::<i32>("page").unwrap()
                })
            })
            .collect();
        let pages: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(pages, vec![Some(0), Some(1), Some(2), Some(3)]);
    });
}
