use linked_hash_map::LinkedHashMap;

use super::{Check, Field};

/// Visible per-field error messages, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    errors: LinkedHashMap<Field, String>,
}

impl Annotations {
    pub fn set(&mut self, field: Field, message: impl ToString) {
        self.errors.insert(field, message.to_string());
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Applies a check result to `field` and reports whether it passed.
    pub fn record(&mut self, field: Field, check: &Check) -> bool {
        match check {
            Ok(()) => {
                self.clear(field);
                true
            }
            Err(e) => {
                self.set(field, &e.message);
                false
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &String)> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Annotations;
    use crate::validate::{validate_name, Field};

    #[test]
    fn test_record_sets_and_clears() {
        let mut annotations = Annotations::default();
        assert!(!annotations.record(Field::Name, &validate_name("J")));
        assert!(annotations.get(Field::Name).is_some());

        assert!(annotations.record(Field::Name, &validate_name("Jo")));
        assert!(annotations.is_empty());
    }
}
