//! Validated, index-resolved view of a `Population`.
//!
//! Every check the enumeration core relies on happens here: parents must
//! exist, come in pairs and never loop back onto their descendants.

use crate::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::convert::TryFrom;

pub type MemberIndex = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: PersonName,
    /// (mother, father)
    pub parents: Option<(MemberIndex, MemberIndex)>,
    pub observed_trait: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pedigree {
    members: Vec<Member>,
}

impl Pedigree {
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, index: MemberIndex) -> &Member {
        &self.members[index]
    }

    pub fn index_of(&self, name: &str) -> Option<MemberIndex> {
        self.members.iter().position(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All member indices, the set the enumerator ranges over.
    pub fn everyone(&self) -> BTreeSet<MemberIndex> {
        (0..self.members.len()).collect()
    }

    /// Same pedigree with the mother and father of every child swapped.
    pub fn with_parents_swapped(&self) -> Self {
        Self {
            members: self
                .members
                .iter()
                .map(|m| Member {
                    parents: m.parents.map(|(mother, father)| (father, mother)),
                    ..m.clone()
                })
                .collect(),
        }
    }

    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.members.len()];
        for start in 0..self.members.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (member, whether its parents were already pushed)
            let mut stack = vec![(start, false)];
            while let Some((idx, expanded)) = stack.pop() {
                if expanded {
                    marks[idx] = Mark::Done;
                    continue;
                }
                match marks[idx] {
                    Mark::Done => continue,
                    Mark::InProgress => return Err(Error::Cycle(self.members[idx].name.clone())),
                    Mark::Unvisited => {}
                }
                marks[idx] = Mark::InProgress;
                stack.push((idx, true));
                if let Some((mother, father)) = self.members[idx].parents {
                    for &parent in [mother, father].iter() {
                        match marks[parent] {
                            Mark::InProgress => {
                                return Err(Error::Cycle(self.members[parent].name.clone()))
                            }
                            Mark::Unvisited => stack.push((parent, false)),
                            Mark::Done => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<&Population> for Pedigree {
    type Error = Error;

    fn try_from(population: &Population) -> Result<Self> {
        if population.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        let indices: HashMap<&str, MemberIndex> = population
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), i))
            .collect();

        let resolve = |person: &Person, parent: &str| -> Result<MemberIndex> {
            if parent == person.name {
                return Err(Error::SelfParent(person.name.clone()));
            }
            indices.get(parent).copied().ok_or_else(|| Error::UnknownParent {
                person: person.name.clone(),
                parent: parent.to_owned(),
            })
        };

        let mut members = Vec::with_capacity(population.len());
        for person in population.iter() {
            let parents = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => {
                    Some((resolve(person, mother)?, resolve(person, father)?))
                }
                _ => return Err(Error::SingleParent(person.name.clone())),
            };
            members.push(Member {
                name: person.name.clone(),
                parents,
                observed_trait: person.observed_trait,
            });
        }

        let pedigree = Self { members };
        pedigree.check_acyclic()?;

        let parents: BTreeSet<MemberIndex> = pedigree
            .members
            .iter()
            .filter_map(|m| m.parents)
            .flat_map(|(mother, father)| vec![mother, father])
            .collect();
        for (idx, member) in pedigree.members.iter().enumerate() {
            if member.parents.is_none() && member.observed_trait.is_none() && !parents.contains(&idx) {
                log::warn!(
                    "'{}' has no parents, no children and no observation; its posterior is the prior",
                    member.name
                );
            }
        }

        Ok(pedigree)
    }
}

impl TryFrom<Population> for Pedigree {
    type Error = Error;

    fn try_from(population: Population) -> Result<Self> {
        Pedigree::try_from(&population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Population {
        vec![
            Person::new("Harry").with_parents("Lily", "James"),
            Person::new("James").with_trait(true),
            Person::new("Lily").with_trait(false),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_parents_are_resolved_to_indices() -> Result<()> {
        let pedigree = Pedigree::try_from(&family())?;
        let harry = pedigree.index_of("Harry").unwrap();
        let lily = pedigree.index_of("Lily").unwrap();
        let james = pedigree.index_of("James").unwrap();
        assert_eq!(pedigree.member(harry).parents, Some((lily, james)));
        assert_eq!(pedigree.member(james).parents, None);
        assert_eq!(pedigree.member(james).observed_trait, Some(true));
        Ok(())
    }

    #[test]
    fn test_swapping_parents() -> Result<()> {
        let pedigree = Pedigree::try_from(&family())?;
        let swapped = pedigree.with_parents_swapped();
        let harry = pedigree.index_of("Harry").unwrap();
        let (mother, father) = pedigree.member(harry).parents.unwrap();
        assert_eq!(swapped.member(harry).parents, Some((father, mother)));
        assert_eq!(swapped.with_parents_swapped(), pedigree);
        Ok(())
    }

    #[test]
    fn test_unknown_parent() {
        let population: Population = vec![Person::new("Harry").with_parents("Lily", "James"), Person::new("Lily")]
            .into_iter()
            .collect();
        assert!(matches!(
            Pedigree::try_from(&population),
            Err(Error::UnknownParent { person, parent }) if person == "Harry" && parent == "James"
        ));
    }

    #[test]
    fn test_single_parent() {
        let mut harry = Person::new("Harry");
        harry.mother = Some("Lily".into());
        let population: Population = vec![harry, Person::new("Lily")].into_iter().collect();
        assert!(matches!(
            Pedigree::try_from(&population),
            Err(Error::SingleParent(name)) if name == "Harry"
        ));
    }

    #[test]
    fn test_self_parent() {
        let population: Population = vec![Person::new("Harry").with_parents("Harry", "James"), Person::new("James")]
            .into_iter()
            .collect();
        assert!(matches!(Pedigree::try_from(&population), Err(Error::SelfParent(_))));
    }

    #[test]
    fn test_cycle() {
        let population: Population = vec![
            Person::new("A").with_parents("B", "C"),
            Person::new("B").with_parents("A", "C"),
            Person::new("C"),
        ]
        .into_iter()
        .collect();
        assert!(matches!(Pedigree::try_from(&population), Err(Error::Cycle(_))));
    }

    #[test]
    fn test_shared_ancestor_is_not_a_cycle() -> Result<()> {
        let population: Population = vec![
            Person::new("Arthur"),
            Person::new("Molly"),
            Person::new("Ron").with_parents("Molly", "Arthur"),
            Person::new("Hermione"),
            Person::new("Rose").with_parents("Ron", "Hermione"),
            Person::new("Ginny").with_parents("Molly", "Arthur"),
        ]
        .into_iter()
        .collect();
        assert_eq!(Pedigree::try_from(&population)?.len(), 6);
        Ok(())
    }

    #[test]
    fn test_empty_population() {
        assert!(matches!(
            Pedigree::try_from(&Population::new()),
            Err(Error::EmptyPopulation)
        ));
    }
}
