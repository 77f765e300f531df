//! Copying view fields into caller-owned buffers.
//!
//! Every `get_*` accessor on [`Uri`](crate::Uri) and [`Tel`](crate::Tel)
//! copies the field's bytes into the buffer and writes a `0` terminator after
//! them, so the buffer must be strictly longer than the field. A buffer that
//! is too small is reported with the length needed, and retrying with one
//! more byte than that always succeeds.

use crate::error::FieldError;

/// Copies one optional field into `buf`.
pub(crate) fn copy_field<'b>(field: Option<&str>, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
    let field = field.ok_or(FieldError::Absent)?;
    copy_parts([field], buf)
}

/// Copies the concatenation of `parts` into `buf`.
///
/// An empty `parts` counts as an absent field.
pub(crate) fn copy_parts<'b, 'f, I>(parts: I, buf: &'b mut [u8]) -> Result<&'b str, FieldError>
where
    I: IntoIterator<Item = &'f str>,
    I::IntoIter: Clone,
{
    let parts = parts.into_iter();
    let mut present = false;
    let mut required = 0;
    for part in parts.clone() {
        present = true;
        required += part.len();
    }
    if !present {
        return Err(FieldError::Absent);
    }
    if buf.len() <= required {
        return Err(FieldError::BufferTooSmall { required });
    }

    let mut written = 0;
    for part in parts {
        let end = written + part.len();
        buf[written..end].copy_from_slice(part.as_bytes());
        written = end;
    }
    buf[written] = 0;
    // Whole `str` values were copied, so the bytes are valid UTF-8.
    Ok(std::str::from_utf8(&buf[..written]).unwrap_or_default())
}

/// Generates `len_*` / `get_*` pairs that delegate to a view's
/// `len(field)` and `get(field, buf)` methods.
macro_rules! field_accessors {
    ($field:ident { $($len:ident, $get:ident => $variant:ident, $doc:literal;)* }) => {
        $(
            #[doc = concat!("Returns the length in bytes of the ", $doc, ", or 0 if absent.")]
            #[must_use]
            pub fn $len(&self) -> usize {
                self.len($field::$variant)
            }

            #[doc = concat!("Copies the ", $doc, " into `buf` and terminates it with a `0` byte.")]
            ///
            /// # Errors
            ///
            /// Returns [`FieldError::Absent`] if the field is absent and
            /// [`FieldError::BufferTooSmall`] if `buf` is not longer than the field.
            pub fn $get<'b>(&self, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
                self.get($field::$variant, buf)
            }
        )*
    };
}

pub(crate) use field_accessors;
