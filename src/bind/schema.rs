use std::fmt;

use super::{Bindable, ConvertError, FieldDescriptor, Value, ValueKind};

type Assign<T> = Box<dyn Fn(&mut T, Value) -> Result<(), ConvertError> + Send + Sync>;

/// A settings type with a statically declared binding schema.
///
/// The schema is built once, typically in a `OnceLock`:
///
/// ```
/// use std::sync::OnceLock;
///
/// use dragon_bind::bind::{resolve_source, Bind, FieldDescriptor, Schema};
/// use dragon_bind::FlatSource;
///
/// #[derive(Debug, Default)]
/// struct Listener {
///     host: String,
///     port: u16,
/// }
///
/// impl Bind for Listener {
///     fn schema() -> &'static Schema<Self> {
///         static SCHEMA: OnceLock<Schema<Listener>> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             Schema::new()
///                 .field("Host", FieldDescriptor::new(), |l: &mut Listener, v: String| l.host = v)
///                 .field(
///                     "Port",
///                     FieldDescriptor::new().with_default(8080),
///                     |l: &mut Listener, v: u16| l.port = v,
///                 )
///         })
///     }
/// }
///
/// let source: FlatSource = [("Http_Host", "localhost")].into_iter().collect();
/// let listener: Listener = resolve_source(Some("Http"), &source)?;
/// assert_eq!(listener.port, 8080);
/// # Ok::<(), dragon_bind::bind::BindError>(())
/// ```
pub trait Bind: Default + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// One bound field: its name, target kind, descriptor and typed setter.
pub struct Field<T> {
    name: String,
    kind: ValueKind,
    descriptor: FieldDescriptor<T>,
    assign: Assign<T>,
}

impl<T: 'static> Field<T> {
    pub fn new<V: Bindable + 'static>(
        name: impl Into<String>,
        descriptor: FieldDescriptor<T>,
        setter: fn(&mut T, V),
    ) -> Self {
        Self {
            name: name.into(),
            kind: V::kind(),
            descriptor,
            assign: Box::new(move |target: &mut T, value: Value| {
                setter(target, V::from_value(value)?);
                Ok(())
            }),
        }
    }
}

impl<T> Field<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn descriptor(&self) -> &FieldDescriptor<T> {
        &self.descriptor
    }

    /// `<prefix>_<name>`, or the bare name when there is no prefix.
    pub fn key(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}_{}", self.name),
            _ => self.name.clone(),
        }
    }

    pub(crate) fn assign(&self, target: &mut T, value: Value) -> Result<(), ConvertError> {
        (self.assign)(target, value)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Ordered fields of a settings type. Resolution visits them in registration order.
#[derive(Debug)]
pub struct Schema<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Registers a field bound through `setter`.
    ///
    /// # Panics
    ///
    /// If a field with the same name is already registered.
    pub fn field<V: Bindable + 'static>(
        mut self,
        name: impl Into<String>,
        descriptor: FieldDescriptor<T>,
        setter: fn(&mut T, V),
    ) -> Self {
        let field = Field::new(name, descriptor, setter);
        assert!(
            self.fields.iter().all(|f| f.name != field.name),
            "field `{}` registered twice",
            field.name
        );
        self.fields.push(field);
        self
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Schema<T> {
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
