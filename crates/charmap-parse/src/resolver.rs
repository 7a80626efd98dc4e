//! Object resolution capability consumed by the character-map builder.
//!
//! The builder never walks the PDF object graph directly; it asks an
//! [`ObjectResolver`] to follow indirect references and to decode stream
//! data. [`lopdf::Document`] implements the trait.

use lopdf::{Dictionary, Document, Object, Stream};

use crate::error::BackendError;

/// Longest chain of references followed before giving up.
const MAX_REFERENCE_CHAIN: usize = 32;

/// Narrow view of a PDF object graph.
pub trait ObjectResolver {
    /// Follow indirect references until a direct object is reached.
    ///
    /// Dangling references return [`BackendError::Resolution`].
    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object, BackendError>;

    /// Decoded (filter-free) content of a stream.
    fn stream_data(&self, stream: &Stream) -> Result<Vec<u8>, BackendError>;

    /// Resolve `obj` and require a dictionary (a stream's dictionary counts).
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Result<&'a Dictionary, BackendError> {
        match self.resolve(obj)? {
            Object::Dictionary(dict) => Ok(dict),
            Object::Stream(stream) => Ok(&stream.dict),
            other => Err(BackendError::Resolution(format!(
                "expected dictionary, found {}",
                type_name(other)
            ))),
        }
    }

    /// Look up `key` in `dict` and resolve it. `Ok(None)` when the key is absent.
    fn lookup<'a>(
        &'a self,
        dict: &'a Dictionary,
        key: &[u8],
    ) -> Result<Option<&'a Object>, BackendError> {
        match dict.get(key) {
            Ok(obj) => self.resolve(obj).map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl ObjectResolver for Document {
    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object, BackendError> {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_CHAIN {
            match current {
                Object::Reference(id) => {
                    current = self.get_object(*id).map_err(|e| {
                        BackendError::Resolution(format!("object {} {} R: {e}", id.0, id.1))
                    })?;
                }
                _ => return Ok(current),
            }
        }
        Err(BackendError::Resolution(format!(
            "reference chain longer than {MAX_REFERENCE_CHAIN}"
        )))
    }

    fn stream_data(&self, stream: &Stream) -> Result<Vec<u8>, BackendError> {
        if stream.dict.get(b"Filter").is_ok() {
            stream
                .decompressed_content()
                .map_err(|e| BackendError::Parse(format!("stream decompression failed: {e}")))
        } else {
            Ok(stream.content.clone())
        }
    }
}

/// Short type label used in diagnostics.
pub(crate) fn type_name(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

/// Name object as a string (lossy UTF-8).
pub(crate) fn name_of(obj: &Object) -> Option<String> {
    obj.as_name()
        .ok()
        .map(|name| String::from_utf8_lossy(name).into_owned())
}

/// Convert a lopdf number to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(f64::from(*f)),
        _ => None,
    }
}

/// Convert a non-negative lopdf integer to u32.
pub(crate) fn object_to_u32(obj: &Object) -> Option<u32> {
    match obj {
        Object::Integer(i) => u32::try_from(*i).ok(),
        Object::Real(f) if *f >= 0.0 => Some(*f as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, Stream, dictionary};

    #[test]
    fn resolves_direct_object() {
        let doc = Document::with_version("1.5");
        let obj = Object::Integer(7);
        assert_eq!(doc.resolve(&obj).unwrap(), &Object::Integer(7));
    }

    #[test]
    fn resolves_reference_chain() {
        let mut doc = Document::with_version("1.5");
        let inner = doc.add_object(Object::Integer(42));
        let outer = doc.add_object(Object::Reference(inner));
        let obj = Object::Reference(outer);
        assert_eq!(doc.resolve(&obj).unwrap(), &Object::Integer(42));
    }

    #[test]
    fn dangling_reference_is_an_error() {
        let doc = Document::with_version("1.5");
        let obj = Object::Reference((99_999_999, 0));
        let err = doc.resolve(&obj).unwrap_err();
        assert!(matches!(err, BackendError::Resolution(_)));
        assert!(err.to_string().contains("99999999"));
    }

    #[test]
    fn self_reference_does_not_loop() {
        let mut doc = Document::with_version("1.5");
        let id = doc.new_object_id();
        doc.objects.insert(id, Object::Reference(id));
        assert!(doc.resolve(&Object::Reference(id)).is_err());
    }

    #[test]
    fn resolve_dict_accepts_stream_dict() {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(Stream::new(dictionary! { "Type" => "CMap" }, vec![]));
        let reference = Object::Reference(id);
        let dict = doc.resolve_dict(&reference).unwrap();
        assert_eq!(dict.get(b"Type").unwrap(), &Object::Name(b"CMap".to_vec()));
    }

    #[test]
    fn resolve_dict_rejects_other_types() {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(Object::Integer(3));
        let reference = Object::Reference(id);
        let err = doc.resolve_dict(&reference).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected dictionary, found integer"));
    }

    #[test]
    fn get_missing_key_is_none() {
        let doc = Document::with_version("1.5");
        let dict = dictionary! { "A" => 1 };
        assert!(doc.lookup(&dict, b"B").unwrap().is_none());
        assert_eq!(doc.lookup(&dict, b"A").unwrap(), Some(&Object::Integer(1)));
    }

    #[test]
    fn unfiltered_stream_data_is_raw_content() {
        let doc = Document::with_version("1.5");
        let stream = Stream::new(dictionary! {}, b"beginbfchar".to_vec());
        assert_eq!(doc.stream_data(&stream).unwrap(), b"beginbfchar");
    }

    #[test]
    fn number_conversions() {
        assert_eq!(object_to_f64(&Object::Integer(500)), Some(500.0));
        assert_eq!(object_to_f64(&Object::Real(0.5)), Some(0.5));
        assert_eq!(object_to_u32(&Object::Integer(-1)), None);
        assert_eq!(object_to_u32(&Object::Integer(32)), Some(32));
        let identity = Object::Name(b"Identity-H".to_vec());
        assert_eq!(name_of(&identity).as_deref(), Some("Identity-H"));
        assert_eq!(name_of(&Object::Integer(1)), None);
    }
}
