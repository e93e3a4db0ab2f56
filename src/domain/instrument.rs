//! Vanilla option instrument referencing a stored rate index.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::error::ParseError;
use crate::domain::index::RateIndex;
use crate::domain::object::Object;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CALL" => Ok(OptionType::Call),
            "PUT" => Ok(OptionType::Put),
            _ => Err(ParseError {
                message: format!("unknown option type '{s}', expected CALL or PUT"),
                position: 0,
            }),
        }
    }
}

/// A vanilla option on a rate index.
///
/// The underlying is a shared handle resolved from the registry when the
/// option is built, so it stays usable even after the index entry is deleted
/// or overwritten.
pub struct VanillaOption {
    option_type: OptionType,
    strike: f64,
    expiry: NaiveDate,
    underlying: Rc<RateIndex>,
    instance_name: Option<String>,
}

impl VanillaOption {
    pub fn new(
        option_type: OptionType,
        strike: f64,
        expiry: NaiveDate,
        underlying: Rc<RateIndex>,
    ) -> Self {
        VanillaOption {
            option_type,
            strike,
            expiry,
            underlying,
            instance_name: None,
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn underlying(&self) -> &RateIndex {
        &self.underlying
    }
}

impl fmt::Display for VanillaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} option on {} {}, strike {}, expires {}",
            self.option_type,
            self.underlying.family(),
            self.underlying.tenor(),
            self.strike,
            self.expiry
        )
    }
}

impl Object for VanillaOption {
    fn set_instance_name(&mut self, name: &str) {
        self.instance_name = Some(name.to_string());
    }

    fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
