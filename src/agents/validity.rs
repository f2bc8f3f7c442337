//! Emptiness checks applied to every attempt's result.
//!
//! A result is invalid when it is absent, a blank string, or an object whose
//! `content` is itself invalid. Provider responses often come back wrapped as
//! `{"content": ...}`, so the check recurses into that field.

use serde_json::Value;

/// Decides whether a value returned by an attempt counts as a real answer.
pub trait ResultValidity {
    fn is_valid_result(&self) -> bool;
}

/// Free-function form of [`ResultValidity::is_valid_result`].
pub fn is_valid_result<T: ResultValidity + ?Sized>(value: &T) -> bool {
    value.is_valid_result()
}

impl ResultValidity for str {
    fn is_valid_result(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl ResultValidity for String {
    fn is_valid_result(&self) -> bool {
        self.as_str().is_valid_result()
    }
}

impl<T: ResultValidity> ResultValidity for Option<T> {
    fn is_valid_result(&self) -> bool {
        self.as_ref().is_some_and(|v| v.is_valid_result())
    }
}

impl<T: ResultValidity + ?Sized> ResultValidity for &T {
    fn is_valid_result(&self) -> bool {
        (**self).is_valid_result()
    }
}

impl<T: ResultValidity + ?Sized> ResultValidity for Box<T> {
    fn is_valid_result(&self) -> bool {
        (**self).is_valid_result()
    }
}

// Arrays are valid even when empty.
impl<T> ResultValidity for Vec<T> {
    fn is_valid_result(&self) -> bool {
        true
    }
}

impl ResultValidity for Value {
    fn is_valid_result(&self) -> bool {
        match self {
            Value::Null => false,
            Value::String(s) => s.is_valid_result(),
            Value::Object(map) => map.get("content").is_none_or(|c| c.is_valid_result()),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => true,
        }
    }
}

macro_rules! always_valid {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResultValidity for $ty {
                fn is_valid_result(&self) -> bool {
                    true
                }
            }
        )*
    };
}

always_valid!(bool, i32, i64, u32, u64, usize, f32, f64, ());
