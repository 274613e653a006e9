//! Ordered request parameters and their wire encodings.

/// Ordered list of field/value pairs sent with a request.
///
/// A field may appear more than once; each occurrence becomes its own
/// query-string pair, form field, or multipart part. Insertion order is
/// preserved on the wire.
///
/// # Example
///
/// ```rust
/// use turbomail::ParamList;
///
/// let params = ParamList::new()
///     .add("from", "sender@mail.example.com")
///     .add_all("to", ["a@example.com", "b@example.com"])
///     .add("subject", "Hello");
///
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    pairs: Vec<(String, String)>,
}

impl ParamList {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single field/value pair.
    pub fn add(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((field.into(), value.to_string()));
        self
    }

    /// Append one pair per element, all sharing the same field name.
    pub fn add_all<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let field = field.into();
        for value in values {
            self.pairs.push((field.clone(), value.to_string()));
        }
        self
    }

    /// Whether the list holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs, counting repeated fields once per occurrence.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as a query string / form-urlencoded body, without the
    /// leading `?`.
    pub fn to_urlencoded(&self) -> String {
        let mut encoder = url::form_urlencoded::Serializer::new(String::new());
        for (field, value) in self.iter() {
            encoder.append_pair(field, value);
        }
        encoder.finish()
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
