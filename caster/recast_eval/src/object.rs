//! Class descriptors, instances, and attribute resolution.
//!
//! Resolution is two-tier with a fixed precedence: an instance's own
//! storage always precedes its class's storage for reads, and writes only
//! ever land in the instance's own storage. Once an instance binds a key,
//! that key permanently shadows the class's attribute of the same name
//! for that instance; the class itself is never modified, so other
//! instances are unaffected.
//!
//! The resolver reports *where* it found a value (`AttrOrigin`); the call
//! dispatcher uses that origin to decide receiver binding. Binding policy
//! lives entirely in the dispatcher; nothing here wraps methods.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use recast_ir::Name;

use crate::value::Value;

/// Class-level attribute storage, populated once at class-definition time.
struct ClassData {
    name: Name,
    attrs: FxHashMap<Name, Value>,
}

/// Class descriptor.
///
/// Shared by every instance of the class; immutable after definition.
#[derive(Clone)]
pub struct ClassValue(Rc<ClassData>);

impl ClassValue {
    /// Create a class descriptor with its definition-time attributes.
    pub fn new(name: Name, attrs: FxHashMap<Name, Value>) -> Self {
        ClassValue(Rc::new(ClassData { name, attrs }))
    }

    /// Class name.
    pub fn name(&self) -> Name {
        self.0.name
    }

    /// Look up a class-level attribute.
    pub fn get(&self, name: Name) -> Option<Value> {
        self.0.attrs.get(&name).cloned()
    }

    /// Check whether two descriptors are the same class.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassValue")
            .field("name", &self.0.name)
            .field("attrs", &self.0.attrs.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-instance data: class back-reference plus the instance dict.
struct InstanceData {
    class: ClassValue,
    /// Mutable instance-level attribute storage, initially empty.
    dict: RefCell<FxHashMap<Name, Value>>,
}

/// Object instance.
#[derive(Clone)]
pub struct InstanceValue(Rc<InstanceData>);

impl InstanceValue {
    /// Create an instance of a class with an empty instance dict.
    pub fn new(class: ClassValue) -> Self {
        InstanceValue(Rc::new(InstanceData {
            class,
            dict: RefCell::new(FxHashMap::default()),
        }))
    }

    /// The originating class descriptor.
    pub fn class(&self) -> &ClassValue {
        &self.0.class
    }

    /// Check whether two values are the same instance.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for InstanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Dict values may cycle back to this instance; print keys only.
        f.debug_struct("InstanceValue")
            .field("class", &self.0.class.name())
            .field("dict", &self.0.dict.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Which storage tier satisfied an attribute read.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AttrOrigin {
    /// Found in the instance's own storage (shadowed or plain data).
    Instance,
    /// Fell through to the class's storage.
    Class,
}

/// Read an attribute: instance storage first, then class storage.
///
/// Returns the value and the tier it came from, or `None` if neither tier
/// has the key.
pub fn get_attr(instance: &InstanceValue, name: Name) -> Option<(Value, AttrOrigin)> {
    if let Some(value) = instance.0.dict.borrow().get(&name) {
        return Some((value.clone(), AttrOrigin::Instance));
    }
    instance
        .0
        .class
        .get(name)
        .map(|value| (value, AttrOrigin::Class))
}

/// Write an attribute into the instance's own storage, creating the key
/// if absent. The class is never touched.
pub fn set_attr(instance: &InstanceValue, name: Name, value: Value) {
    instance.0.dict.borrow_mut().insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{LocalScope, Scope};
    use crate::value::FunctionValue;
    use pretty_assertions::assert_eq;
    use recast_ir::{FunctionDef, StringInterner};

    fn function(interner: &StringInterner, name: &str, params: &[&str]) -> FunctionValue {
        let params = params.iter().map(|p| interner.intern(p)).collect();
        let def = FunctionDef::new(interner.intern(name), params, vec![]);
        FunctionValue::new(&def, LocalScope::new(Scope::new()))
    }

    fn class_with_method(interner: &StringInterner) -> (ClassValue, Name) {
        let m = interner.intern("m");
        let method = function(interner, "m", &["self"]);
        let mut attrs = FxHashMap::default();
        attrs.insert(m, Value::Function(method));
        (ClassValue::new(interner.intern("Foo"), attrs), m)
    }

    #[test]
    fn test_unshadowed_read_falls_through_to_class() {
        let interner = StringInterner::new();
        let (class, m) = class_with_method(&interner);
        let instance = InstanceValue::new(class);

        let (_, origin) = get_attr(&instance, m).unwrap_or_else(|| panic!("m must resolve"));
        assert_eq!(origin, AttrOrigin::Class);
    }

    #[test]
    fn test_instance_write_shadows_class_method() {
        let interner = StringInterner::new();
        let (class, m) = class_with_method(&interner);
        let instance = InstanceValue::new(class);

        let replacement = function(&interner, "free", &["a", "b"]);
        set_attr(&instance, m, Value::Function(replacement.clone()));

        // The read returns the instance-level value verbatim.
        let Some((Value::Function(found), origin)) = get_attr(&instance, m) else {
            panic!("m must resolve after the write");
        };
        assert_eq!(origin, AttrOrigin::Instance);
        assert!(FunctionValue::ptr_eq(&found, &replacement));
    }

    #[test]
    fn test_shadowing_write_leaves_class_untouched() {
        let interner = StringInterner::new();
        let (class, m) = class_with_method(&interner);
        let first = InstanceValue::new(class.clone());
        let second = InstanceValue::new(class.clone());

        set_attr(&first, m, Value::int(0));

        // The class still resolves, and the second instance still falls
        // through to it.
        assert!(class.get(m).is_some());
        let (_, origin) = get_attr(&second, m).unwrap_or_else(|| panic!("m must resolve"));
        assert_eq!(origin, AttrOrigin::Class);
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let interner = StringInterner::new();
        let (class, _) = class_with_method(&interner);
        let instance = InstanceValue::new(class);
        assert!(get_attr(&instance, interner.intern("absent")).is_none());
    }

    #[test]
    fn test_set_attr_creates_and_overwrites() {
        let interner = StringInterner::new();
        let (class, _) = class_with_method(&interner);
        let instance = InstanceValue::new(class);
        let base = interner.intern("base");

        set_attr(&instance, base, Value::int(10));
        assert_eq!(get_attr(&instance, base), Some((Value::int(10), AttrOrigin::Instance)));

        set_attr(&instance, base, Value::int(100));
        assert_eq!(get_attr(&instance, base), Some((Value::int(100), AttrOrigin::Instance)));
    }

    #[test]
    fn test_instances_are_identity_distinct() {
        let interner = StringInterner::new();
        let (class, _) = class_with_method(&interner);
        let a = InstanceValue::new(class.clone());
        let b = InstanceValue::new(class);
        assert!(!InstanceValue::ptr_eq(&a, &b));
        assert!(InstanceValue::ptr_eq(&a, &a.clone()));
    }
}
