use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Action,
    Transition,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Action => "ACTION",
            Operation::Transition => "TRANSITION",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction: `ACTION, name, "", ""` or `TRANSITION, name, event, target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Quadruple {
    pub operation: Operation,
    pub arg1: String,
    pub arg2: String,
    pub arg3: String,
}

impl Quadruple {
    pub fn action(name: impl Into<String>) -> Self {
        Self {
            operation: Operation::Action,
            arg1: name.into(),
            arg2: String::new(),
            arg3: String::new(),
        }
    }

    pub fn transition(
        name: impl Into<String>,
        event: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            operation: Operation::Transition,
            arg1: name.into(),
            arg2: event.into(),
            arg3: target.into(),
        }
    }

    pub fn is_action(&self) -> bool {
        self.operation == Operation::Action
    }

    pub fn is_transition(&self) -> bool {
        self.operation == Operation::Transition
    }
}

impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.operation, self.arg1, self.arg2, self.arg3
        )
    }
}
