//! Response Envelope
//!
//! The success counterpart to the failure envelope in
//! [`crate::error::conversions`]. Every successful handler response
//! serializes as `{ "status": "success", "data": ... }`.

use serde::Serialize;

/// 成功レスポンスのエンベロープ
///
/// ## Examples
/// ```rust
/// use kernel::response::Success;
///
/// let body = serde_json::to_value(Success::new(vec![1, 2, 3])).unwrap();
/// assert_eq!(body["status"], "success");
/// assert_eq!(body["data"][0], 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    status: &'static str,
    data: T,
}

impl<T: Serialize> Success<T> {
    #[inline]
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(Success::new("hello")).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"], "hello");
    }
}
