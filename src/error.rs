// Error taxonomy for the evaluator (spec.md §7).
//
// Mirrors emdash-udashboard's typechecker.rs TypeError: a bare
// derive-only enum consumed through Result, no Error trait impl.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NameError,
    TypeError,
    FaultError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    pub kind: ErrorKind,
    pub message: String,
}

impl Fault {
    pub fn name(message: impl Into<String>) -> Fault {
        Fault {
            kind: ErrorKind::NameError,
            message: message.into(),
        }
    }

    pub fn type_(message: impl Into<String>) -> Fault {
        Fault {
            kind: ErrorKind::TypeError,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Fault {
        Fault {
            kind: ErrorKind::FaultError,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let kind = match self.kind {
            ErrorKind::NameError => "NAME_ERROR",
            ErrorKind::TypeError => "TYPE_ERROR",
            ErrorKind::FaultError => "FAULT_ERROR",
        };
        write!(f, "{}: {}", kind, self.message)
    }
}
