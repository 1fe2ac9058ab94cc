use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRFC3339(pub DateTime<Utc>);

#[Scalar(name = "DateRFC3339")]
impl ScalarType for DateRFC3339 {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => Ok(DateRFC3339(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|e| InputValueError::custom(e.to_string()))?
                    .with_timezone(&Utc),
            )),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for DateRFC3339 {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}
