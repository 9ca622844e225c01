//! Per-person gene-count and trait distributions.

use crate::joint::{GeneAssignment, Members};
use crate::prelude::*;
use ndarray::{Array2, Axis};
use std::ops::AddAssign;

const GENE_COLUMNS: usize = 3;
const TRAIT_COLUMNS: usize = 2;

fn gene_column(count: GeneCount) -> usize {
    count.copies()
}

fn trait_column(has_trait: bool) -> usize {
    if has_trait {
        1
    } else {
        0
    }
}

/// Probability mass accumulated per member.
///
/// Rows follow the member order of the `Pedigree` the accumulator was made
/// for. `genes` has one column per gene count (0, 1, 2), `traits` one column
/// per trait value (false, true). The mass is unnormalized until
/// `normalize()` is called.
#[derive(Clone, Debug, PartialEq)]
pub struct Distributions {
    names: Vec<PersonName>,
    genes: Array2<f64>,
    traits: Array2<f64>,
}

/// The two distributions of one person.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersonDistribution {
    /// Indexed by number of copies.
    pub gene: [f64; 3],
    /// `[P(no trait), P(trait)]`
    pub trait_: [f64; 2],
}

impl PersonDistribution {
    pub fn gene(&self, count: GeneCount) -> f64 {
        self.gene[gene_column(count)]
    }

    pub fn has_trait(&self, has_trait: bool) -> f64 {
        self.trait_[trait_column(has_trait)]
    }
}

impl Distributions {
    /// Zeroed accumulator for every member of `pedigree`.
    pub fn new(pedigree: &Pedigree) -> Self {
        let n = pedigree.len();
        Self {
            names: pedigree.members().iter().map(|m| m.name.clone()).collect(),
            genes: Array2::zeros((n, GENE_COLUMNS)),
            traits: Array2::zeros((n, TRAIT_COLUMNS)),
        }
    }

    /// Adds the joint probability `p` of one scenario to every member's
    /// gene and trait buckets.
    pub fn update(&mut self, genes: &GeneAssignment, have_trait: &Members, p: f64) {
        for member in 0..self.names.len() {
            self.genes[[member, gene_column(genes.count(member))]] += p;
            self.traits[[member, trait_column(have_trait.contains(&member))]] += p;
        }
    }

    /// Adds another accumulator over the same pedigree.
    pub fn merge(&mut self, other: &Distributions) {
        debug_assert_eq!(self.names, other.names);
        self.genes += &other.genes;
        self.traits += &other.traits;
    }

    /// Rescales every member's distributions so each sums to 1.
    ///
    /// A distribution without any mass is left at zero.
    pub fn normalize(&mut self) {
        for table in [&mut self.genes, &mut self.traits].iter_mut() {
            for mut row in table.axis_iter_mut(Axis(0)) {
                let total = row.sum();
                if total > 0.0 {
                    row.mapv_inplace(|x| x / total);
                }
            }
        }
    }

    /// Name of the first member whose distributions carry no mass.
    pub fn first_without_mass(&self) -> Option<&PersonName> {
        let gene_totals = self.genes.sum_axis(Axis(1));
        let trait_totals = self.traits.sum_axis(Axis(1));
        self.names
            .iter()
            .zip(gene_totals.iter().zip(trait_totals.iter()))
            .find(|(_, (g, t))| **g <= 0.0 || **t <= 0.0)
            .map(|(name, _)| name)
    }

    pub fn names(&self) -> &[PersonName] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<PersonDistribution> {
        self.names.iter().position(|n| n == name).map(|i| self.row(i))
    }

    pub fn row(&self, member: MemberIndex) -> PersonDistribution {
        PersonDistribution {
            gene: [
                self.genes[[member, 0]],
                self.genes[[member, 1]],
                self.genes[[member, 2]],
            ],
            trait_: [self.traits[[member, 0]], self.traits[[member, 1]]],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonName, PersonDistribution)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(move |(i, name)| (name, self.row(i)))
    }
}

impl AddAssign<&Distributions> for Distributions {
    fn add_assign(&mut self, other: &Distributions) {
        self.merge(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::convert::TryFrom;

    fn pedigree() -> Pedigree {
        let population: Population = vec![Person::new("A"), Person::new("B")].into_iter().collect();
        Pedigree::try_from(&population).unwrap()
    }

    fn set(members: &[MemberIndex]) -> Members {
        members.iter().copied().collect()
    }

    #[test]
    fn test_update_fills_matching_buckets() {
        let mut dist = Distributions::new(&pedigree());
        dist.update(&GeneAssignment::new(set(&[0]), set(&[1])), &set(&[1]), 0.25);
        dist.update(&GeneAssignment::default(), &Members::new(), 0.5);

        let a = dist.get("A").unwrap();
        assert_eq!(a.gene, [0.5, 0.25, 0.0]);
        assert_eq!(a.trait_, [0.75, 0.0]);
        let b = dist.get("B").unwrap();
        assert_eq!(b.gene, [0.5, 0.0, 0.25]);
        assert_eq!(b.trait_, [0.5, 0.25]);
    }

    #[test]
    fn test_normalize() {
        let mut dist = Distributions::new(&pedigree());
        dist.update(&GeneAssignment::new(set(&[0]), Members::new()), &set(&[0, 1]), 3.0);
        dist.update(&GeneAssignment::default(), &Members::new(), 1.0);
        dist.normalize();

        let a = dist.get("A").unwrap();
        assert_abs_diff_eq!(a.gene(GeneCount::Zero), 0.25);
        assert_abs_diff_eq!(a.gene(GeneCount::One), 0.75);
        assert_abs_diff_eq!(a.gene(GeneCount::Two), 0.0);
        assert_abs_diff_eq!(a.has_trait(true), 0.75);
        assert_abs_diff_eq!(a.has_trait(false), 0.25);
    }

    #[test]
    fn test_normalize_ignores_uniform_scale() {
        let genes = GeneAssignment::new(set(&[1]), set(&[0]));
        let mut small = Distributions::new(&pedigree());
        let mut large = Distributions::new(&pedigree());
        for (p, have_trait) in [(0.1, set(&[0])), (0.3, set(&[1])), (0.05, Members::new())].iter() {
            small.update(&genes, have_trait, *p);
            large.update(&genes, have_trait, *p * 1.0e6);
        }
        small.normalize();
        large.normalize();
        for ((_, s), (_, l)) in small.iter().zip(large.iter()) {
            for i in 0..3 {
                assert_abs_diff_eq!(s.gene[i], l.gene[i], epsilon = 1e-12);
            }
            for i in 0..2 {
                assert_abs_diff_eq!(s.trait_[i], l.trait_[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_merge_adds_mass() {
        let mut left = Distributions::new(&pedigree());
        let mut right = Distributions::new(&pedigree());
        left.update(&GeneAssignment::default(), &Members::new(), 0.5);
        right.update(&GeneAssignment::default(), &set(&[0]), 0.25);
        left += &right;
        assert_eq!(left.get("A").unwrap().gene, [0.75, 0.0, 0.0]);
        assert_eq!(left.get("A").unwrap().trait_, [0.5, 0.25]);
    }

    #[test]
    fn test_empty_mass_stays_zero() {
        let mut dist = Distributions::new(&pedigree());
        dist.normalize();
        assert_eq!(dist.get("A").unwrap().gene, [0.0, 0.0, 0.0]);
        assert_eq!(dist.first_without_mass().map(String::as_str), Some("A"));
    }
}
