//! Field-type registry and form-definition introspection.
//!
//! A form definition is a struct whose members are `Option<SomeField>`
//! slots. Instead of runtime reflection, each definition publishes an
//! explicit descriptor table through [`FormSpec::field_specs`]; the
//! [`TypeInfoMap`] derives names, labels, and flags from that table once
//! per definition type and caches the result process-wide.
//!
//! The [`FieldRegistry`] maps a field variant's type identity to a
//! constructor, letting the binder materialize members the caller left
//! unset.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use forma_core::utils::text::split_words;
use forma_core::FormError;

use crate::fields::{
    BoolField, FileField, FormField, Int64ChoiceField, Int64Field, MultiInt64ChoiceField,
    MultiStringChoiceField, StringChoiceField, StringField, TextareaStringField,
};

type Constructor = Box<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

/// Maps field-variant type identities to default constructors.
///
/// Registration normally happens once at startup (or via
/// [`with_defaults`](FieldRegistry::with_defaults)); lookup happens on
/// every materialization. Registering the same type again replaces the
/// earlier constructor.
pub struct FieldRegistry {
    constructors: RwLock<HashMap<TypeId, Constructor>>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with every built-in field variant registered
    /// under its default constructor.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(StringField::new);
        registry.register(TextareaStringField::new);
        registry.register(StringChoiceField::select);
        registry.register(Int64Field::new);
        registry.register(Int64ChoiceField::select);
        registry.register(BoolField::new);
        registry.register(MultiStringChoiceField::new);
        registry.register(MultiInt64ChoiceField::new);
        registry.register(FileField::new);
        registry
    }

    /// Registers a constructor for field type `T`. Last registration wins.
    pub fn register<T, C>(&self, constructor: C)
    where
        T: FormField + 'static,
        C: Fn() -> T + Send + Sync + 'static,
    {
        let constructor: Constructor = Box::new(move || Box::new(constructor()));
        self.constructors
            .write()
            .expect("field registry lock poisoned")
            .insert(TypeId::of::<T>(), constructor);
    }

    /// Constructs a fresh default instance for the given type identity,
    /// or `None` if no constructor is registered.
    pub fn construct(&self, type_id: TypeId) -> Option<Box<dyn Any + Send>> {
        let constructors = self
            .constructors
            .read()
            .expect("field registry lock poisoned");
        constructors.get(&type_id).map(|constructor| constructor())
    }

    /// Whether a constructor is registered for the given type identity.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.constructors
            .read()
            .expect("field registry lock poisoned")
            .contains_key(&type_id)
    }

    /// Removes every registration. Intended for tests.
    pub fn clear(&self) {
        self.constructors
            .write()
            .expect("field registry lock poisoned")
            .clear();
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A form member holding an optional field instance.
///
/// Implemented for `Option<T>` for every field type, giving the binder a
/// uniform way to test, materialize, and access members without knowing
/// their concrete types.
pub trait FieldSlot: Send {
    /// Whether the member currently holds a field instance.
    fn is_set(&self) -> bool;

    /// Ensures the member holds an instance, constructing one through the
    /// registry when unset. Returns whether construction happened, plus
    /// the (now guaranteed) field.
    fn materialize(
        &mut self,
        registry: &FieldRegistry,
    ) -> Result<(bool, &mut dyn FormField), FormError>;

    /// The field instance, if set.
    fn field(&self) -> Option<&dyn FormField>;

    /// Mutable access to the field instance, if set.
    fn field_mut(&mut self) -> Option<&mut dyn FormField>;
}

impl<T: FormField + 'static> FieldSlot for Option<T> {
    fn is_set(&self) -> bool {
        self.is_some()
    }

    fn materialize(
        &mut self,
        registry: &FieldRegistry,
    ) -> Result<(bool, &mut dyn FormField), FormError> {
        let mut fresh = false;
        if self.is_none() {
            let constructed = registry
                .construct(TypeId::of::<T>())
                .ok_or(FormError::UnregisteredFieldType(type_name::<T>()))?;
            let field = constructed
                .downcast::<T>()
                .map_err(|_| FormError::ConstructorMismatch(type_name::<T>()))?;
            *self = Some(*field);
            fresh = true;
        }
        match self {
            Some(field) => Ok((fresh, field as &mut dyn FormField)),
            None => unreachable!(),
        }
    }

    fn field(&self) -> Option<&dyn FormField> {
        self.as_ref().map(|f| f as &dyn FormField)
    }

    fn field_mut(&mut self) -> Option<&mut dyn FormField> {
        self.as_mut().map(|f| f as &mut dyn FormField)
    }
}

/// Returns the slot for one member of a form definition.
pub type SlotAccessor<F> = fn(&mut F) -> &mut dyn FieldSlot;

/// One entry of a form definition's descriptor table: the member
/// identifier, its declarative annotations, and its structural position.
pub struct FieldSpec<F: ?Sized> {
    ident: &'static str,
    name: Option<&'static str>,
    required: bool,
    accessor: SlotAccessor<F>,
}

impl<F> FieldSpec<F> {
    /// Creates a descriptor for the member `ident`, reachable through
    /// `accessor`. Without further annotation the field is not required
    /// and its name defaults to the identifier.
    pub const fn new(ident: &'static str, accessor: SlotAccessor<F>) -> Self {
        Self {
            ident,
            name: None,
            required: false,
            accessor,
        }
    }

    /// Overrides the declared name.
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Marks the member required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The member identifier.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// The declared name override, if any.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Whether the member carries the required annotation.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The member's slot within a form instance.
    pub fn slot<'a>(&self, form: &'a mut F) -> &'a mut dyn FieldSlot {
        (self.accessor)(form)
    }
}

/// A form definition: a struct publishing its ordered field descriptors.
///
/// # Examples
///
/// ```
/// use forma_forms::fields::{Int64Field, StringField};
/// use forma_forms::typeinfo::{FieldSpec, FormSpec};
///
/// #[derive(Default)]
/// struct SignupForm {
///     username: Option<StringField>,
///     age: Option<Int64Field>,
/// }
///
/// impl FormSpec for SignupForm {
///     fn field_specs() -> &'static [FieldSpec<Self>] {
///         static SPECS: &[FieldSpec<SignupForm>] = &[
///             FieldSpec::new("Username", |f| &mut f.username).required(),
///             FieldSpec::new("Age", |f| &mut f.age),
///         ];
///         SPECS
///     }
/// }
/// ```
pub trait FormSpec: Sized + 'static {
    /// The definition's field descriptors, in declaration order.
    fn field_specs() -> &'static [FieldSpec<Self>];
}

/// Derived metadata for one member of a form definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Position in the descriptor table.
    pub index: usize,
    /// The effective name (declared override, else the identifier).
    pub name: String,
    /// The label derived by splitting the name into words.
    pub label: String,
    /// Whether the member carries the required annotation.
    pub required: bool,
}

/// The derived descriptor list for one form-definition type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Per-member metadata, in declaration order.
    pub fields: Vec<FieldInfo>,
}

/// Process-wide cache of [`TypeInfo`] per form-definition type.
///
/// Reads take a shared lock; the first use of a type takes the exclusive
/// lock and re-checks for an entry before computing, so concurrent first
/// uses compute at most once.
#[derive(Default)]
pub struct TypeInfoMap {
    cache: RwLock<HashMap<TypeId, Arc<TypeInfo>>>,
}

impl TypeInfoMap {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the (possibly cached) descriptor list for `F`.
    pub fn type_info<F: FormSpec>(&self) -> Arc<TypeInfo> {
        let type_id = TypeId::of::<F>();
        {
            let cache = self.cache.read().expect("type info lock poisoned");
            if let Some(info) = cache.get(&type_id) {
                return Arc::clone(info);
            }
        }

        let mut cache = self.cache.write().expect("type info lock poisoned");
        if let Some(info) = cache.get(&type_id) {
            return Arc::clone(info);
        }
        let info = Arc::new(Self::compute::<F>());
        cache.insert(type_id, Arc::clone(&info));
        info
    }

    fn compute<F: FormSpec>() -> TypeInfo {
        let fields = F::field_specs()
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let name = spec.name().unwrap_or(spec.ident()).to_string();
                let label = split_words(&name).join(" ");
                FieldInfo {
                    index,
                    name,
                    label,
                    required: spec.is_required(),
                }
            })
            .collect();
        TypeInfo { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ProfileForm {
        first_name: Option<StringField>,
        age: Option<Int64Field>,
        bio: Option<TextareaStringField>,
    }

    impl FormSpec for ProfileForm {
        fn field_specs() -> &'static [FieldSpec<Self>] {
            static SPECS: &[FieldSpec<ProfileForm>] = &[
                FieldSpec::new("FirstName", |f: &mut ProfileForm| &mut f.first_name).required(),
                FieldSpec::new("Age", |f: &mut ProfileForm| &mut f.age),
                FieldSpec::new("Bio", |f: &mut ProfileForm| &mut f.bio).named("about"),
            ];
            SPECS
        }
    }

    #[test]
    fn test_registry_constructs_registered_types() {
        let registry = FieldRegistry::with_defaults();
        let constructed = registry.construct(TypeId::of::<StringField>());
        assert!(constructed.is_some());
        assert!(constructed.unwrap().downcast::<StringField>().is_ok());
    }

    #[test]
    fn test_registry_unknown_type() {
        let registry = FieldRegistry::new();
        assert!(registry.construct(TypeId::of::<StringField>()).is_none());
        assert!(!registry.contains(TypeId::of::<StringField>()));
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let registry = FieldRegistry::with_defaults();
        registry.register(|| {
            let mut f = StringField::new();
            f.base_mut().set_required(false);
            f
        });
        let constructed = registry
            .construct(TypeId::of::<StringField>())
            .and_then(|b| b.downcast::<StringField>().ok());
        assert_eq!(constructed.map(|f| f.is_required()), Some(false));
    }

    #[test]
    fn test_registry_clear() {
        let registry = FieldRegistry::with_defaults();
        registry.clear();
        assert!(!registry.contains(TypeId::of::<StringField>()));
    }

    #[test]
    fn test_slot_materializes_once() {
        let registry = FieldRegistry::with_defaults();
        let mut form = ProfileForm::default();

        let slot: &mut dyn FieldSlot = &mut form.first_name;
        assert!(!slot.is_set());
        let (fresh, _) = slot.materialize(&registry).unwrap();
        assert!(fresh);
        assert!(slot.is_set());
        let (fresh, _) = slot.materialize(&registry).unwrap();
        assert!(!fresh);
    }

    #[test]
    fn test_slot_materialize_unregistered_fails() {
        let registry = FieldRegistry::new();
        let mut slot: Option<StringField> = None;
        let err = FieldSlot::materialize(&mut slot, &registry).err().unwrap();
        assert!(matches!(err, FormError::UnregisteredFieldType(_)));
        assert!(err.to_string().contains("StringField"));
    }

    #[test]
    fn test_type_info_derivation() {
        let tinfo_map = TypeInfoMap::new();
        let info = tinfo_map.type_info::<ProfileForm>();

        assert_eq!(info.fields.len(), 3);
        assert_eq!(info.fields[0].name, "FirstName");
        assert_eq!(info.fields[0].label, "First Name");
        assert!(info.fields[0].required);
        assert_eq!(info.fields[1].name, "Age");
        assert_eq!(info.fields[1].label, "Age");
        assert!(!info.fields[1].required);
        assert_eq!(info.fields[2].name, "about");
        assert_eq!(info.fields[2].label, "about");
    }

    #[test]
    fn test_type_info_is_cached() {
        let tinfo_map = TypeInfoMap::new();
        let first = tinfo_map.type_info::<ProfileForm>();
        let second = tinfo_map.type_info::<ProfileForm>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_type_info_concurrent_first_use() {
        let tinfo_map = Arc::new(TypeInfoMap::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let tinfo_map = Arc::clone(&tinfo_map);
            handles.push(std::thread::spawn(move || {
                tinfo_map.type_info::<ProfileForm>()
            }));
        }
        let infos: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for info in &infos {
            assert!(Arc::ptr_eq(info, &infos[0]));
        }
    }
}
