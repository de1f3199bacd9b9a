/// Intern table for names
///
/// Owned by whoever owns the names (normally a project) and passed around
/// explicitly; identical canonical text always yields the same allocation.
use nomina_core::NominaResult;
use std::collections::HashMap;

use super::types::Name;

#[derive(Debug, Default, Clone)]
pub struct NameTable {
    names: HashMap<String, Name>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or create the name for an already-canonical string
    pub fn intern(&mut self, canonical: &str) -> NominaResult<Name> {
        let parsed = Name::from_canonical(canonical)?;
        Ok(self.intern_name(parsed))
    }

    /// Return the table's copy of `name`, adding it if it is new
    pub fn intern_name(&mut self, name: Name) -> Name {
        if let Some(existing) = self.names.get(name.full_name()) {
            return existing.clone();
        }
        tracing::trace!(name = %name, "Interned new name");
        self.names.insert(name.full_name().to_string(), name.clone());
        name
    }

    pub fn intern_all<'a, I>(&mut self, canonical: I) -> NominaResult<Vec<Name>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        canonical.into_iter().map(|s| self.intern(s)).collect()
    }

    pub fn get(&self, canonical: &str) -> Option<&Name> {
        self.names.get(canonical)
    }

    /// Interned binomial reduction of `name`
    pub fn binomial_of(&mut self, name: &Name) -> Option<Name> {
        name.to_binomial().map(|binomial| self.intern_name(binomial))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.names.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_shares_allocation() {
        let mut table = NameTable::new();
        let a = table.intern("Branta canadensis").unwrap();
        let b = table.intern("Branta  canadensis").unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_separate_tables_are_isolated() {
        let mut first = NameTable::new();
        let mut second = NameTable::new();
        let a = first.intern("Buteo jamaicensis").unwrap();
        let b = second.intern("Buteo jamaicensis").unwrap();

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_reductions_are_interned() {
        let mut table = NameTable::new();
        let species = table.intern("Buteo jamaicensis").unwrap();
        let subspecies = table.intern("Buteo jamaicensis harlani").unwrap();

        let binomial = table.binomial_of(&subspecies).unwrap();
        assert!(binomial.ptr_eq(&species));
        assert_eq!(table.len(), 2);

        let trinomial = table.intern("Branta canadensis hutchinsii").unwrap();
        let binomial = table.binomial_of(&trinomial).unwrap();
        assert!(table.get("Branta canadensis").unwrap().ptr_eq(&binomial));
        assert_eq!(table.len(), 4);

        let genus = table.intern("Buteo").unwrap();
        assert!(table.binomial_of(&genus).is_none());
    }

    #[test]
    fn test_intern_all_propagates_errors() {
        let mut table = NameTable::new();
        assert!(table.intern_all(["Buteo harlani", ""]).is_err());
        let names = table.intern_all(["Buteo harlani", "Buteo borealis"]).unwrap();
        assert_eq!(names.len(), 2);
    }
}
