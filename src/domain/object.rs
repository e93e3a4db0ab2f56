//! The stored-object capability trait and a generic value holder.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Capability required of anything kept in a [`Registry`](crate::domain::registry::Registry).
///
/// An object learns its instance name when it is stored and can describe
/// itself as text for diagnostics. Nothing else about it is visible to the
/// registry. The `Any` accessors exist so callers can recover the concrete
/// type from a shared handle.
pub trait Object: fmt::Display {
    /// Record the name this object is stored under.
    fn set_instance_name(&mut self, name: &str);

    /// The name this object was last stored under, if any.
    fn instance_name(&self) -> Option<&str>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Adapts any displayable value into an [`Object`].
///
/// Lets raw library values (rates, counts, labels) live in the registry
/// without a bespoke wrapper type per value kind.
#[derive(Debug)]
pub struct Holder<T> {
    value: T,
    instance_name: Option<String>,
}

impl<T: fmt::Display> Holder<T> {
    pub fn new(value: T) -> Self {
        Holder {
            value,
            instance_name: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for Holder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: fmt::Display + 'static> Object for Holder<T> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holder_displays_inner_value() {
        let held = Holder::new(0.042);
        assert_eq!(held.to_string(), "0.042");
    }

    #[test]
    fn holder_has_no_name_until_stored() {
        let mut held = Holder::new("flat");
        assert!(held.instance_name().is_none());
        held.set_instance_name("CurveShape");
        assert_eq!(held.instance_name(), Some("CurveShape"));
    }

    #[test]
    fn holder_renames_on_restore() {
        let mut held = Holder::new(7_i64);
        held.set_instance_name("First");
        held.set_instance_name("Second");
        assert_eq!(held.instance_name(), Some("Second"));
    }

    #[test]
    fn dyn_object_debug_renders_like_display() {
        let object: Rc<dyn Object> = Rc::new(Holder::new(42_i64));
        assert_eq!(format!("{object:?}"), format!("{object}"));
    }

    #[test]
    fn as_any_recovers_concrete_type() {
        let held = Holder::new(42_i64);
        let object: &dyn Object = &held;
        let back = object
            .as_any()
            .downcast_ref::<Holder<i64>>()
            .expect("downcast to Holder<i64>");
        assert_eq!(*back.value(), 42);
    }

    #[test]
    fn as_any_rc_recovers_shared_handle() {
        let object: Rc<dyn Object> = Rc::new(Holder::new(1.5));
        let back = object
            .as_any_rc()
            .downcast::<Holder<f64>>()
            .expect("downcast to Holder<f64>");
        assert!((*back.value() - 1.5).abs() < f64::EPSILON);
    }
}
