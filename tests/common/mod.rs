#![allow(dead_code)]

use chrono::NaiveDate;
use objreg::domain::error::ObjregError;
use objreg::domain::object::Object;
use objreg::domain::registry::Registry;
use objreg::domain::script::ObjectSpec;
use objreg::ports::factory_port::ObjectFactory;
use objreg::ports::fixing_port::FixingSource;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// Minimal stored object with a fixed description line.
#[derive(Debug)]
pub struct StubObject {
    pub label: String,
    pub instance_name: Option<String>,
}

impl StubObject {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            instance_name: None,
        }
    }
}

impl fmt::Display for StubObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub object {}", self.label)
    }
}

impl Object for StubObject {
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

/// Factory that builds [`StubObject`]s from `STUB(label)` specs.
pub struct MockFactory {
    pub errors: HashMap<String, String>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    pub fn with_error(mut self, type_name: &str, reason: &str) -> Self {
        self.errors.insert(type_name.to_string(), reason.to_string());
        self
    }
}

impl ObjectFactory for MockFactory {
    fn make(
        &self,
        _registry: &Registry,
        spec: &ObjectSpec,
    ) -> Result<Box<dyn Object>, ObjregError> {
        if let Some(reason) = self.errors.get(&spec.type_name) {
            return Err(ObjregError::InvalidSpec {
                type_name: spec.type_name.clone(),
                reason: reason.clone(),
            });
        }
        match spec.type_name.as_str() {
            "STUB" => {
                let label = spec.args.first().map(String::as_str).unwrap_or("anonymous");
                Ok(Box::new(StubObject::new(label)))
            }
            _ => Err(ObjregError::UnknownType {
                type_name: spec.type_name.clone(),
            }),
        }
    }

    fn type_names(&self) -> Vec<&'static str> {
        vec!["STUB(label)"]
    }
}

/// Fixing source answering from canned in-memory series keyed by path.
pub struct MockFixingSource {
    pub fixings: HashMap<String, Vec<(NaiveDate, f64)>>,
}

impl MockFixingSource {
    pub fn new() -> Self {
        Self {
            fixings: HashMap::new(),
        }
    }

    pub fn with_fixings(mut self, path: &str, fixings: Vec<(NaiveDate, f64)>) -> Self {
        self.fixings.insert(path.to_string(), fixings);
        self
    }
}

impl FixingSource for MockFixingSource {
    fn load(&self, path: &Path) -> Result<Vec<(NaiveDate, f64)>, ObjregError> {
        match self.fixings.get(&path.display().to_string()) {
            Some(rows) => Ok(rows.clone()),
            None => Err(ObjregError::FixingData {
                reason: format!("no fixing series registered for {}", path.display()),
            }),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
