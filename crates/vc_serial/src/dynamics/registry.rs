use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::OnceLock;

use super::{DynamicClass, DynamicObject};
use crate::hash::{FixedHashMap, FixedHashState};
use crate::{Result, SerialError};

/// Zero-argument constructor of a dynamic class.
pub type Constructor = fn() -> Box<dyn DynamicObject>;

/// Converts a boxed dynamic object to the pointee type `B`.
///
/// Returns `None` if the object is not of the class the caster was
/// registered for.
pub type Caster<B> = fn(Box<dyn DynamicObject>) -> Option<Box<B>>;

// -----------------------------------------------------------------------------
// FactoryRegistry

/// Name-keyed table of constructors for dynamic classes.
///
/// The registry is passed explicitly to decoders. [`FactoryRegistry::global`]
/// provides a process-wide instance that is filled once by automatic
/// registration and is read-only afterwards.
///
/// Besides constructors the registry stores *casters*, one per
/// `(pointee type, concrete class)` pair, which turn a freshly decoded
/// `Box<dyn DynamicObject>` into the `Box<dyn Trait>` a slot expects.
///
/// # Examples
///
/// ```
/// use vc_serial::derive::Serializable;
/// use vc_serial::dynamics::{DynamicObject, FactoryRegistry};
///
/// #[derive(Serializable, Default)]
/// #[serial(dynamic, class_name = "demo::Node")]
/// struct Node {
///     weight: u16,
/// }
///
/// let mut registry = FactoryRegistry::new();
/// assert!(!registry.contains("demo::Node"));
///
/// registry.register::<Node>();
///
/// let object = registry.create("demo::Node").unwrap();
/// assert_eq!(object.class_name(), "demo::Node");
/// assert!(registry.create("demo::Missing").is_err());
/// ```
pub struct FactoryRegistry {
    factories: FixedHashMap<&'static str, Constructor>,
    casters: FixedHashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
    auto_registered: bool,
}

impl Default for FactoryRegistry {
    /// See [`FactoryRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryRegistry {
    /// Creates a registry without any class.
    ///
    /// Every registry can view any class as `dyn DynamicObject`.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: FixedHashMap::with_hasher(FixedHashState),
            casters: FixedHashMap::with_hasher(FixedHashState),
            auto_registered: false,
        };
        let identity: Caster<dyn DynamicObject> = Some;
        registry.insert_caster(
            TypeId::of::<dyn DynamicObject>(),
            TypeId::of::<dyn DynamicObject>(),
            identity,
        );
        registry
    }

    /// The process-wide registry.
    ///
    /// Built on first use from every automatically registered class; it
    /// cannot be modified afterwards.
    pub fn global() -> &'static FactoryRegistry {
        static GLOBAL: OnceLock<FactoryRegistry> = OnceLock::new();

        GLOBAL.get_or_init(|| {
            let mut registry = FactoryRegistry::new();
            registry.auto_register();
            log::debug!("global factory registry initialized with {} classes", registry.len());
            registry
        })
    }

    /// Registers the class `T` under [`DynamicClass::CLASS_NAME`], together
    /// with its casters.
    pub fn register<T: DynamicClass>(&mut self) {
        self.register_factory(T::CLASS_NAME, T::construct);
        T::register_casters(self);
    }

    /// Maps `class_name` to `constructor`.
    ///
    /// Registering a name twice replaces the earlier constructor.
    pub fn register_factory(&mut self, class_name: &'static str, constructor: Constructor) {
        if self.factories.insert(class_name, constructor).is_some() {
            log::debug!("dynamic class `{class_name}` replaced");
        } else {
            log::debug!("dynamic class `{class_name}` registered");
        }
    }

    /// Lets instances of the class `C` be stored in slots of pointee type `B`.
    ///
    /// ```
    /// use vc_serial::derive::Serializable;
    /// use vc_serial::dynamics::{downcast, DynamicObject, FactoryRegistry};
    ///
    /// trait Labeled: DynamicObject {}
    ///
    /// #[derive(Serializable, Default)]
    /// #[serial(dynamic)]
    /// struct Tag {
    ///     label: String,
    /// }
    ///
    /// impl Labeled for Tag {}
    ///
    /// let mut registry = FactoryRegistry::new();
    /// registry.register::<Tag>();
    /// registry.register_caster::<Tag, dyn Labeled>(|object| {
    ///     downcast::<Tag>(object).map(|tag| tag as Box<dyn Labeled>)
    /// });
    ///
    /// let object = registry.create("Tag").unwrap();
    /// assert!(registry.cast::<dyn Labeled>(object).is_ok());
    /// ```
    #[inline]
    pub fn register_caster<C: DynamicObject, B: ?Sized + 'static>(&mut self, caster: Caster<B>) {
        self.insert_caster(TypeId::of::<B>(), TypeId::of::<C>(), caster);
    }

    fn insert_caster<B: ?Sized + 'static>(
        &mut self,
        base: TypeId,
        concrete: TypeId,
        caster: Caster<B>,
    ) {
        self.casters.insert((base, concrete), Box::new(caster));
    }

    fn caster<B: ?Sized + 'static>(&self, concrete: TypeId) -> Option<Caster<B>> {
        let base = TypeId::of::<B>();
        self.casters
            .get(&(base, concrete))
            .or_else(|| self.casters.get(&(base, TypeId::of::<dyn DynamicObject>())))
            .and_then(|caster| caster.downcast_ref::<Caster<B>>())
            .copied()
    }

    /// Registers every class submitted through `#[serial(dynamic)]`.
    ///
    /// Returns `true` if automatic registration works on the current
    /// platform. Repeated calls do nothing.
    ///
    /// Without the `auto_register` feature this does nothing and returns
    /// `false`.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                crate::__macro_exports::auto_register::__register_classes(self);
            }
        }
        self.auto_registered
    }

    #[cfg(feature = "auto_register")]
    pub(crate) fn __mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Whether a factory is registered for `class_name`.
    #[inline]
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// Number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Iterates over the registered class names in unspecified order.
    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Constructs a default instance of `class_name`.
    pub fn create(&self, class_name: &str) -> Result<Box<dyn DynamicObject>> {
        match self.factories.get(class_name) {
            Some(constructor) => Ok(constructor()),
            None => {
                log::debug!("no factory registered for `{class_name}`");
                Err(SerialError::instantiation(
                    alloc::string::String::from(class_name),
                    "no factory is registered under this name",
                ))
            }
        }
    }

    /// Whether `object` can be converted to `B` with [`cast`](Self::cast).
    pub fn can_cast<B: ?Sized + 'static>(&self, object: &dyn DynamicObject) -> bool {
        let object: &dyn Any = object;
        self.caster::<B>(object.type_id()).is_some()
    }

    /// Converts `object` to the pointee type `B`.
    pub fn cast<B: ?Sized + 'static>(&self, object: Box<dyn DynamicObject>) -> Result<Box<B>> {
        let class_name = object.class_name();
        let concrete = {
            let object: &dyn Any = &*object;
            object.type_id()
        };

        self.caster::<B>(concrete)
            .and_then(|caster| caster(object))
            .ok_or_else(|| {
                log::debug!(
                    "no caster registered from `{class_name}` to `{}`",
                    core::any::type_name::<B>()
                );
                SerialError::instantiation(
                    class_name,
                    alloc::format!(
                        "class cannot be viewed as `{}`",
                        core::any::type_name::<B>()
                    ),
                )
            })
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("classes", &self.factories.keys().collect::<alloc::vec::Vec<_>>())
            .field("casters", &self.casters.len())
            .finish()
    }
}
