#![crate_name = "heredity"]
use std::collections::BTreeMap;

pub mod prelude;

pub mod distribution;
pub mod error;
pub mod inference;
pub mod joint;
pub mod model;
pub mod observable;
pub mod pedigree;
pub mod powerset;
pub mod report;

use crate::prelude::*;

pub type PersonName = String;
pub type People = BTreeMap<PersonName, Person>;

/// A single record of the population as it was observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: PersonName,
    pub mother: Option<PersonName>,
    pub father: Option<PersonName>,
    /// `None` when the trait was not observed.
    pub observed_trait: Option<bool>,
}

impl Person {
    /// A person without known parents and without an observation.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed_trait: None,
        }
    }

    pub fn with_parents(mut self, mother: &str, father: &str) -> Self {
        self.mother = Some(mother.into());
        self.father = Some(father.into());
        self
    }

    pub fn with_trait(mut self, observed_trait: bool) -> Self {
        self.observed_trait = Some(observed_trait);
        self
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// The record set handed over by a loader, keyed by name.
///
/// A `Population` is not checked for consistency; turn it into a
/// `Pedigree` before running inference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    people: People,
}

impl Population {
    /// Constructs a new empty `Population`
    ///
    /// The `Population` can be filled up iteratively by calling
    /// `insert()` or `observe()`.
    pub fn new() -> Self {
        Self {
            people: People::new(),
        }
    }

    /// Adds a person, refusing a second record with the same name.
    pub fn insert(&mut self, person: Person) -> Result<()> {
        if self.people.contains_key(&person.name) {
            return Err(Error::DuplicatePerson(person.name));
        }
        self.people.insert(person.name.clone(), person);
        Ok(())
    }

    /// Observe all the records in the argument.
    ///
    /// Any iterator of `Result<Person>` works, `observable::Csv` is one.
    pub fn observe<I>(&mut self, observable: I) -> Result<()>
    where
        I: Iterator<Item = Result<Person>>,
    {
        for person in observable {
            self.insert(person?)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    pub fn names(&self) -> Vec<&PersonName> {
        self.people.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl std::iter::FromIterator<Person> for Population {
    /// Later records with a repeated name replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        Self {
            people: iter.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_rejects_duplicates() {
        let mut population = Population::new();
        assert!(population.insert(Person::new("James")).is_ok());
        assert!(matches!(
            population.insert(Person::new("James").with_trait(true)),
            Err(Error::DuplicatePerson(name)) if name == "James"
        ));
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn test_population_iterates_in_name_order() {
        let population: Population = vec![Person::new("Lily"), Person::new("Harry"), Person::new("James")]
            .into_iter()
            .collect();
        assert_eq!(population.names(), vec!["Harry", "James", "Lily"]);
    }
}
