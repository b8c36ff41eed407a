use crate::common::{Document, Value};
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use chrono::{DateTime, Utc};

/// Bidirectional conversion between a field type and [Value].
///
/// Entity field types implement `ValueCodec` so that document mapping (manual
/// or derived) can move them in and out of documents. Conversion failures are
/// reported as `ObjectMappingError`.
pub trait ValueCodec: Sized {
    fn to_value(&self) -> DocbaseResult<Value>;

    fn from_value(value: &Value) -> DocbaseResult<Self>;
}

fn mapping_error<T>(expected: &str, found: &Value) -> DocbaseResult<T> {
    log::error!("Value mapping error: expected {}, found {:?}", expected, found);
    Err(DocbaseError::new(
        &format!("Value mapping error: expected {}", expected),
        ErrorKind::ObjectMappingError,
    ))
}

impl ValueCodec for bool {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::Bool(*self))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => mapping_error("bool", other),
        }
    }
}

impl ValueCodec for i32 {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::I32(*self))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::I32(i) => Ok(*i),
            other => mapping_error("i32", other),
        }
    }
}

impl ValueCodec for i64 {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::I64(*self))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        // I32 widens losslessly
        match value.as_i64() {
            Some(i) => Ok(i),
            None => mapping_error("i64", value),
        }
    }
}

impl ValueCodec for f64 {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::F64(*self))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::F64(f) => Ok(*f),
            other => mapping_error("f64", other),
        }
    }
}

impl ValueCodec for String {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => mapping_error("string", other),
        }
    }
}

impl ValueCodec for DateTime<Utc> {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::DateTime(*self))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            other => mapping_error("datetime", other),
        }
    }
}

impl<T: ValueCodec> ValueCodec for Option<T> {
    fn to_value(&self) -> DocbaseResult<Value> {
        match self {
            Some(inner) => inner.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

impl<T: ValueCodec> ValueCodec for Vec<T> {
    fn to_value(&self) -> DocbaseResult<Value> {
        let mut array = Vec::with_capacity(self.len());
        for item in self {
            array.push(item.to_value()?);
        }
        Ok(Value::Array(array))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::Array(array) => {
                let mut items = Vec::with_capacity(array.len());
                for item in array {
                    items.push(T::from_value(item)?);
                }
                Ok(items)
            }
            other => mapping_error("array", other),
        }
    }
}

impl ValueCodec for Document {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(Value::Document(self.clone()))
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        match value {
            Value::Document(document) => Ok(document.clone()),
            other => mapping_error("document", other),
        }
    }
}

impl ValueCodec for Value {
    fn to_value(&self) -> DocbaseResult<Value> {
        Ok(self.clone())
    }

    fn from_value(value: &Value) -> DocbaseResult<Self> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scalar_round_trips() {
        assert!(bool::from_value(&true.to_value().unwrap()).unwrap());
        assert_eq!(i32::from_value(&7i32.to_value().unwrap()).unwrap(), 7);
        assert_eq!(i64::from_value(&7i64.to_value().unwrap()).unwrap(), 7);
        assert_eq!(f64::from_value(&1.5f64.to_value().unwrap()).unwrap(), 1.5);
        assert_eq!(
            String::from_value(&"x".to_string().to_value().unwrap()).unwrap(),
            "x"
        );
    }

    #[test]
    fn i64_accepts_i32_value() {
        assert_eq!(i64::from_value(&Value::I32(9)).unwrap(), 9);
    }

    #[test]
    fn date_time_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let value = dt.to_value().unwrap();
        assert_eq!(DateTime::<Utc>::from_value(&value).unwrap(), dt);
    }

    #[test]
    fn option_maps_null() {
        let none: Option<i32> = None;
        assert_eq!(none.to_value().unwrap(), Value::Null);
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_value(&Value::I32(3)).unwrap(), Some(3));
    }

    #[test]
    fn vec_round_trip() {
        let items = vec![1i32, 2, 3];
        let value = items.to_value().unwrap();
        assert_eq!(Vec::<i32>::from_value(&value).unwrap(), items);
    }

    #[test]
    fn type_mismatch_is_mapping_error() {
        let result = bool::from_value(&Value::I32(1));
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::ObjectMappingError);

        let result = String::from_value(&Value::Null);
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::ObjectMappingError);
    }
}
