//! `Record` is an ordered name->value map representing one row of tabular
//! data flowing through a `Pipeline`. Field names are unique within a
//! record and iteration order always matches insertion order, matching the
//! intrusive-linked-list-plus-side-index design of the C `lrec_t` this
//! module is patterned on (see design notes in SPEC_FULL.md §9): we use
//! `indexmap::IndexMap` rather than a hand-rolled linked list, since it
//! gives the same O(1) lookup / preserved-insertion-order iteration with
//! none of the unsafe bookkeeping.

// dependencies
use indexmap::IndexMap;

/// An ordered mapping from field name to field value, both strings.
///
/// By convention, `Record` instances flowing through a pipeline are named
/// `rec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Create a new, empty record.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Get the value of a field by name, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Put a field value, overwriting any existing value for `name` in
    /// place (preserving its position), or appending a new field at the
    /// end if `name` is not already present. An empty value is a valid,
    /// observable put.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a field by name, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(name)
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The number of fields in the record.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut rec = Record::new();
        rec.put("c", "3");
        rec.put("a", "1");
        rec.put("b", "2");
        let names: Vec<&str> = rec.field_names().collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn put_overwrites_in_place() {
        let mut rec = Record::new();
        rec.put("a", "1");
        rec.put("b", "2");
        rec.put("a", "9");
        let names: Vec<&str> = rec.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(rec.get("a"), Some("9"));
    }

    #[test]
    fn put_empty_value_is_observable() {
        let mut rec = Record::new();
        rec.put("a", "");
        assert_eq!(rec.get("a"), Some(""));
        assert_eq!(rec.field_count(), 1);
    }

    #[test]
    fn remove_drops_field() {
        let mut rec = Record::new();
        rec.put("a", "1");
        rec.put("b", "2");
        assert_eq!(rec.remove("a"), Some("1".to_string()));
        assert_eq!(rec.get("a"), None);
        assert_eq!(rec.field_count(), 1);
    }

    #[test]
    fn get_missing_field_is_none() {
        let rec = Record::new();
        assert_eq!(rec.get("nope"), None);
    }
}
