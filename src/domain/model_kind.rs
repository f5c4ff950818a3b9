use crate::domain::petstore_model::Category;
use crate::domain::petstore_model::Order;
use crate::domain::petstore_model::Pet;
use crate::domain::petstore_model::Tag;
use crate::domain::petstore_model::User;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The closed set of kinds a payload can be decoded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Category,
    Order,
    Pet,
    Tag,
    User,
    Untyped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Single,
    List,
}

/// What a payload should be read as: one value or a list, of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub shape: Shape,
    pub kind: ModelKind,
}

/// A decoded value of any kind. Serializes as the inner value, without a tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Model {
    Category(Category),
    Order(Order),
    Pet(Pet),
    Tag(Tag),
    User(User),
    Untyped(Value),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Object(Model),
    List(Vec<Model>),
}

/// Implemented by every type a `ModelKind` decodes into.
pub trait JsonModel: Serialize + DeserializeOwned + Into<Model> {
    const KIND: ModelKind;

    fn from_model(model: Model) -> Option<Self>;
}

type DecodeOne = fn(&str) -> Result<Model, serde_json::Error>;
type DecodeList = fn(&str) -> Result<Vec<Model>, serde_json::Error>;

pub struct KindDecoder {
    pub decode_one: DecodeOne,
    pub decode_list: DecodeList,
}

// Keys are the case-folded simple names
static KIND_TABLE: [(&str, ModelKind); 5] = [
    ("category", ModelKind::Category),
    ("order", ModelKind::Order),
    ("pet", ModelKind::Pet),
    ("tag", ModelKind::Tag),
    ("user", ModelKind::User),
];

// A JSON null decodes to `Model::Untyped(Value::Null)`, a null list to an empty one
fn decode_one<M: JsonModel>(text: &str) -> Result<Model, serde_json::Error> {
    serde_json::from_str::<Option<M>>(text).map(model_or_null)
}

fn decode_list<M: JsonModel>(text: &str) -> Result<Vec<Model>, serde_json::Error> {
    serde_json::from_str::<Option<Vec<Option<M>>>>(text).map(|items| {
        items
            .unwrap_or_default()
            .into_iter()
            .map(model_or_null)
            .collect()
    })
}

fn model_or_null<M: JsonModel>(value: Option<M>) -> Model {
    match value {
        Some(value) => value.into(),
        None => Model::Untyped(Value::Null),
    }
}

impl ModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Category => "Category",
            ModelKind::Order => "Order",
            ModelKind::Pet => "Pet",
            ModelKind::Tag => "Tag",
            ModelKind::User => "User",
            ModelKind::Untyped => "Untyped",
        }
    }

    /// Looks a kind name up, ignoring ASCII case and any leading `.` or `::` path.
    /// Names outside the table resolve to `Untyped`.
    pub fn lookup(kind_name: &str) -> ModelKind {
        let normalized = simple_name(kind_name).to_ascii_lowercase();

        match KIND_TABLE.iter().find(|(key, _)| *key == normalized) {
            Some((_, kind)) => *kind,
            None => {
                debug!("unrecognized kind name {:?}, falling back to untyped", kind_name);
                ModelKind::Untyped
            }
        }
    }

    pub fn decoder(&self) -> KindDecoder {
        match self {
            ModelKind::Category => KindDecoder {
                decode_one: decode_one::<Category>,
                decode_list: decode_list::<Category>,
            },
            ModelKind::Order => KindDecoder {
                decode_one: decode_one::<Order>,
                decode_list: decode_list::<Order>,
            },
            ModelKind::Pet => KindDecoder {
                decode_one: decode_one::<Pet>,
                decode_list: decode_list::<Pet>,
            },
            ModelKind::Tag => KindDecoder {
                decode_one: decode_one::<Tag>,
                decode_list: decode_list::<Tag>,
            },
            ModelKind::User => KindDecoder {
                decode_one: decode_one::<User>,
                decode_list: decode_list::<User>,
            },
            ModelKind::Untyped => KindDecoder {
                decode_one: decode_one::<Value>,
                decode_list: decode_list::<Value>,
            },
        }
    }
}

fn simple_name(kind_name: &str) -> &str {
    kind_name
        .rsplit(|c: char| c == '.' || c == ':')
        .next()
        .unwrap_or(kind_name)
}

pub fn resolve_object_kind(kind_name: &str) -> TypeDescriptor {
    TypeDescriptor {
        shape: Shape::Single,
        kind: ModelKind::lookup(kind_name),
    }
}

pub fn resolve_list_kind(kind_name: &str) -> TypeDescriptor {
    TypeDescriptor {
        shape: Shape::List,
        kind: ModelKind::lookup(kind_name),
    }
}

impl TypeDescriptor {
    pub fn decode(&self, text: &str) -> Result<Decoded, serde_json::Error> {
        let decoder = self.kind.decoder();

        match self.shape {
            Shape::Single => (decoder.decode_one)(text).map(Decoded::Object),
            Shape::List => (decoder.decode_list)(text).map(Decoded::List),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Single => write!(f, "{}", self.kind.name()),
            Shape::List => write!(f, "list of {}", self.kind.name()),
        }
    }
}

impl Model {
    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Category(_) => ModelKind::Category,
            Model::Order(_) => ModelKind::Order,
            Model::Pet(_) => ModelKind::Pet,
            Model::Tag(_) => ModelKind::Tag,
            Model::User(_) => ModelKind::User,
            Model::Untyped(_) => ModelKind::Untyped,
        }
    }

    pub fn into_inner<M: JsonModel>(self) -> Option<M> {
        M::from_model(self)
    }
}

// Conversions between concrete kinds and Model
impl From<Category> for Model {
    fn from(value: Category) -> Self {
        Model::Category(value)
    }
}

impl From<Order> for Model {
    fn from(value: Order) -> Self {
        Model::Order(value)
    }
}

impl From<Pet> for Model {
    fn from(value: Pet) -> Self {
        Model::Pet(value)
    }
}

impl From<Tag> for Model {
    fn from(value: Tag) -> Self {
        Model::Tag(value)
    }
}

impl From<User> for Model {
    fn from(value: User) -> Self {
        Model::User(value)
    }
}

impl From<Value> for Model {
    fn from(value: Value) -> Self {
        Model::Untyped(value)
    }
}

impl JsonModel for Category {
    const KIND: ModelKind = ModelKind::Category;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::Category(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonModel for Order {
    const KIND: ModelKind = ModelKind::Order;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::Order(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonModel for Pet {
    const KIND: ModelKind = ModelKind::Pet;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::Pet(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonModel for Tag {
    const KIND: ModelKind = ModelKind::Tag;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::Tag(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonModel for User {
    const KIND: ModelKind = ModelKind::User;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::User(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonModel for Value {
    const KIND: ModelKind = ModelKind::Untyped;

    fn from_model(model: Model) -> Option<Self> {
        match model {
            Model::Untyped(value) => Some(value),
            _ => None,
        }
    }
}
