/// Scientific name value type
///
/// Names arrive already normalised by the caller: a genus, an optional
/// specific epithet and zero or more infraspecific epithets. Identity,
/// hashing and ordering all use the canonical space-joined form.
use nomina_core::{NominaError, NominaResult};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct NameData {
    full: String,
    genus: String,
    specific_epithet: Option<String>,
    infraspecific_epithets: Vec<String>,
}

/// An immutable scientific name; cloning shares the underlying allocation
#[derive(Clone)]
pub struct Name(Arc<NameData>);

impl Name {
    /// Build a name from its parts, rejecting empty or multi-word parts
    pub fn from_parts(
        genus: &str,
        specific_epithet: Option<&str>,
        infraspecific_epithets: &[&str],
    ) -> NominaResult<Self> {
        validate_part("genus", genus)?;
        if let Some(epithet) = specific_epithet {
            validate_part("specific epithet", epithet)?;
        } else if !infraspecific_epithets.is_empty() {
            return Err(NominaError::InvalidName(format!(
                "{} has infraspecific epithets but no specific epithet",
                genus
            )));
        }
        for infra in infraspecific_epithets {
            validate_part("infraspecific epithet", infra)?;
        }

        let mut full = genus.to_string();
        if let Some(epithet) = specific_epithet {
            full.push(' ');
            full.push_str(epithet);
        }
        for infra in infraspecific_epithets {
            full.push(' ');
            full.push_str(infra);
        }

        Ok(Self(Arc::new(NameData {
            full,
            genus: genus.to_string(),
            specific_epithet: specific_epithet.map(str::to_string),
            infraspecific_epithets: infraspecific_epithets.iter().map(|s| s.to_string()).collect(),
        })))
    }

    /// Split an already-canonical name ("Buteo jamaicensis harlani") on
    /// whitespace. No authority or rank-marker handling.
    pub fn from_canonical(canonical: &str) -> NominaResult<Self> {
        let parts: Vec<&str> = canonical.split_whitespace().collect();
        match parts.as_slice() {
            [] => Err(NominaError::InvalidName(format!("empty name: {:?}", canonical))),
            [genus] => Self::from_parts(genus, None, &[]),
            [genus, epithet, infra @ ..] => Self::from_parts(genus, Some(*epithet), infra),
        }
    }

    pub fn genus_only(genus: &str) -> NominaResult<Self> {
        Self::from_parts(genus, None, &[])
    }

    pub fn binomial(genus: &str, specific_epithet: &str) -> NominaResult<Self> {
        Self::from_parts(genus, Some(specific_epithet), &[])
    }

    pub fn full_name(&self) -> &str {
        &self.0.full
    }

    pub fn genus(&self) -> &str {
        &self.0.genus
    }

    pub fn specific_epithet(&self) -> Option<&str> {
        self.0.specific_epithet.as_deref()
    }

    pub fn infraspecific_epithets(&self) -> &[String] {
        &self.0.infraspecific_epithets
    }

    pub fn has_infraspecific(&self) -> bool {
        !self.0.infraspecific_epithets.is_empty()
    }

    pub fn is_genus_only(&self) -> bool {
        self.0.specific_epithet.is_none()
    }

    pub fn is_binomial(&self) -> bool {
        self.0.specific_epithet.is_some() && self.0.infraspecific_epithets.is_empty()
    }

    /// Genus plus specific epithet, or `None` for a genus-only name
    pub fn to_binomial(&self) -> Option<Name> {
        if self.is_binomial() {
            return Some(self.clone());
        }
        let epithet = self.0.specific_epithet.as_deref()?;
        Some(Self(Arc::new(NameData {
            full: format!("{} {}", self.0.genus, epithet),
            genus: self.0.genus.clone(),
            specific_epithet: Some(epithet.to_string()),
            infraspecific_epithets: Vec::new(),
        })))
    }

    pub fn to_genus(&self) -> Name {
        if self.is_genus_only() {
            return self.clone();
        }
        Self(Arc::new(NameData {
            full: self.0.genus.clone(),
            genus: self.0.genus.clone(),
            specific_epithet: None,
            infraspecific_epithets: Vec::new(),
        }))
    }

    /// True when both handles share one allocation (same intern table entry)
    pub fn ptr_eq(&self, other: &Name) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn validate_part(label: &str, part: &str) -> NominaResult<()> {
    if part.is_empty() || part.chars().any(char::is_whitespace) {
        return Err(NominaError::InvalidName(format!(
            "{} must be a single non-empty word, got {:?}",
            label, part
        )));
    }
    Ok(())
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.full == other.0.full
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.full.hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.full.cmp(&other.0.full)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.full)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0.full)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.full)
    }
}
