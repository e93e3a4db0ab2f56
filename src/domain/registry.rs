//! The object registry: named handles on polymorphic domain objects.
//!
//! A registry is deliberately single threaded. Entries are held behind
//! [`Rc`], so the type is neither `Send` nor `Sync` and the compiler keeps it
//! on one thread; hosts that want concurrency must confine the registry to a
//! single thread and route requests to it. No operation ever leaves the
//! store half mutated.

use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::rc::Rc;

use regex::Regex;

use crate::domain::error::ObjregError;
use crate::domain::object::Object;

/// Maps instance names to shared handles on stored objects.
///
/// Names are unique and case sensitive. Enumeration is always in ascending
/// name order, so a fixed sequence of stores and deletes yields the same
/// listing every time. Handles returned by retrieval stay alive after the
/// entry is deleted or overwritten; the registry only drops its own
/// reference.
pub struct Registry {
    entries: BTreeMap<String, Rc<dyn Object>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            entries: BTreeMap::new(),
        }
    }

    /// Store `object` under `name` and echo the name back.
    ///
    /// The object is told its instance name before it becomes visible. An
    /// existing entry under the same name is silently replaced; holders of
    /// the old handle keep the old object alive.
    pub fn store<O: Object + 'static>(&mut self, name: &str, object: O) -> String {
        self.store_boxed(name, Box::new(object))
    }

    /// [`store`](Self::store) for objects already erased to `Box<dyn Object>`,
    /// the form object factories produce.
    pub fn store_boxed(&mut self, name: &str, mut object: Box<dyn Object>) -> String {
        object.set_instance_name(name);
        self.entries.insert(name.to_string(), Rc::from(object));
        name.to_string()
    }

    /// Look up the handle stored under `name`.
    pub fn retrieve(&self, name: &str) -> Result<Rc<dyn Object>, ObjregError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ObjregError::NotFound {
                name: name.to_string(),
            })
    }

    /// Look up `name` and downcast the handle to its concrete type.
    pub fn retrieve_as<T: Object + 'static>(&self, name: &str) -> Result<Rc<T>, ObjregError> {
        self.retrieve(name)?
            .as_any_rc()
            .downcast::<T>()
            .map_err(|_| ObjregError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove the entry under `name`. Removing an absent name is a no-op.
    pub fn delete(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Remove every entry.
    pub fn delete_all(&mut self) {
        self.entries.clear();
    }

    pub fn object_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of stored objects whose entire text matches `pattern`.
    ///
    /// An empty pattern lists every name. Anything else is a regular
    /// expression; names where the pattern only matches a substring are not
    /// included. Results come back in enumeration order.
    pub fn list_names(&self, pattern: &str) -> Result<Vec<String>, ObjregError> {
        if pattern.is_empty() {
            return Ok(self.entries.keys().cloned().collect());
        }
        // The compiled form is anchored so the pattern must cover the whole
        // name; syntax errors are reported against the caller's pattern.
        let matcher = Regex::new(pattern)
            .and_then(|_| Regex::new(&format!("^(?:{pattern})$")))
            .map_err(|err| ObjregError::PatternSyntax {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })?;
        Ok(self
            .entries
            .keys()
            .filter(|name| matcher.is_match(name))
            .cloned()
            .collect())
    }

    /// Write a diagnostic listing of every entry to `out`.
    ///
    /// One banner, then each object under a header carrying its name, in
    /// enumeration order. Failures are the sink's; the registry contributes
    /// none of its own.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "dump of all objects in the registry:")?;
        writeln!(out)?;
        for (name, object) in &self.entries {
            writeln!(out, "object with instance name = {name}:")?;
            writeln!(out, "{object}")?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
