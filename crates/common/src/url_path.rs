//! Query-parameter codec for the current folder's virtual path.
//!
//! The whole path is percent-encoded once, separators included, so the value
//! occupies a single query parameter and decodes to the identical string.

use std::borrow::Cow;

use crate::error::KeyError;

/// Encode a virtual path as a single query parameter value.
///
/// # Arguments
/// * `virtual_path` - Owner-relative path, may contain non-ASCII segments
pub fn encode_path_param(virtual_path: &str) -> String {
    urlencoding::encode(virtual_path).into_owned()
}

/// Decode a query parameter value produced by [`encode_path_param`].
///
/// # Errors
/// `KeyError::InvalidArgument` when the decoded bytes are not valid UTF-8.
pub fn decode_path_param(value: &str) -> Result<String, KeyError> {
    let decoded: Cow<str> = urlencoding::decode(value)
        .map_err(|e| KeyError::invalid_argument(value, e.to_string()))?;
    Ok(decoded.into_owned())
}
