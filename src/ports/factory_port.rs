//! Object construction port trait.

use crate::domain::error::ObjregError;
use crate::domain::object::Object;
use crate::domain::registry::Registry;
use crate::domain::script::ObjectSpec;

/// Builds concrete objects from a type keyword plus positional arguments.
///
/// The registry is passed in so constructors can resolve collaborators
/// stored earlier in the session, the way an option looks up its underlying
/// index by instance name.
pub trait ObjectFactory {
    fn make(&self, registry: &Registry, spec: &ObjectSpec)
    -> Result<Box<dyn Object>, ObjregError>;

    /// The type keywords this factory accepts, each with its argument
    /// signature, for help output.
    fn type_names(&self) -> Vec<&'static str>;
}
