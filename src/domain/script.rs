//! Session script AST data structures.
//!
//! One [`Command`] per script line. `STORE` carries an [`ObjectSpec`], the
//! type keyword plus positional arguments that an object factory turns into
//! a concrete object.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSpec {
    pub type_name: String,
    pub args: Vec<String>,
}

impl fmt::Display for ObjectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name, self.args.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Store { name: String, spec: ObjectSpec },
    Fixings { name: String, path: String },
    Retrieve { name: String },
    Delete { name: String },
    DeleteAll,
    Count,
    List { pattern: String },
    Dump,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Store { name, spec } => write!(f, "STORE {name} {spec}"),
            Command::Fixings { name, path } => write!(f, "FIXINGS {name} {path}"),
            Command::Retrieve { name } => write!(f, "RETRIEVE {name}"),
            Command::Delete { name } => write!(f, "DELETE {name}"),
            Command::DeleteAll => write!(f, "DELETE_ALL"),
            Command::Count => write!(f, "COUNT"),
            Command::List { pattern } if pattern.is_empty() => write!(f, "LIST"),
            Command::List { pattern } => write!(f, "LIST {pattern}"),
            Command::Dump => write!(f, "DUMP"),
        }
    }
}
