use super::binding::BindingSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Info(String),
    Error(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Info(text) | Reply::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

pub struct ExecutionContext<'a> {
    label: &'a str,
    arguments: BindingSet<'a>,
    replies: Vec<Reply>,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(label: &'a str, arguments: BindingSet<'a>) -> Self {
        Self {
            label,
            arguments,
            replies: Vec::new(),
        }
    }

    /// The alias the command was invoked with.
    pub fn label(&self) -> &str {
        self.label
    }

    pub fn args(&self) -> &BindingSet<'a> {
        &self.arguments
    }

    pub fn reply(&mut self, message: impl Into<String>) {
        self.replies.push(Reply::Info(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.replies.push(Reply::Error(message.into()));
    }

    pub(super) fn into_replies(self) -> Vec<Reply> {
        self.replies
    }
}
