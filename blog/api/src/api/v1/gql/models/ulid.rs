use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use ulid::Ulid;
use uuid::Uuid;

/// Ids are stored as UUIDs but surfaced as ULID strings, the two are
/// bit-compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GqlUlid(pub Ulid);

impl GqlUlid {
    pub fn to_ulid(self) -> Ulid {
        self.0
    }

    pub fn to_uuid(self) -> Uuid {
        self.0.into()
    }
}

#[Scalar(name = "ULID")]
impl ScalarType for GqlUlid {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => Ok(GqlUlid(
                Ulid::from_string(s).map_err(|e| InputValueError::custom(e.to_string()))?,
            )),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<Uuid> for GqlUlid {
    fn from(value: Uuid) -> Self {
        Self(value.into())
    }
}

impl From<Ulid> for GqlUlid {
    fn from(value: Ulid) -> Self {
        Self(value)
    }
}
