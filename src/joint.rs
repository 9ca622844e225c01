//! Probability of one fully specified possible world.

use crate::prelude::*;
use std::collections::BTreeSet;

pub type Members = BTreeSet<MemberIndex>;

/// Who holds one copy and who holds two; everyone else holds none.
///
/// The two sets are expected to be disjoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneAssignment {
    pub one_gene: Members,
    pub two_genes: Members,
}

impl GeneAssignment {
    pub fn new(one_gene: Members, two_genes: Members) -> Self {
        debug_assert!(one_gene.is_disjoint(&two_genes));
        Self { one_gene, two_genes }
    }

    pub fn count(&self, member: MemberIndex) -> GeneCount {
        if self.two_genes.contains(&member) {
            GeneCount::Two
        } else if self.one_gene.contains(&member) {
            GeneCount::One
        } else {
            GeneCount::Zero
        }
    }
}

/// Probability of `member` holding the gene count `genes` assigns to them,
/// given the counts `genes` assigns to their parents.
pub fn gene_probability(
    pedigree: &Pedigree,
    model: &ProbabilityModel,
    genes: &GeneAssignment,
    member: MemberIndex,
) -> f64 {
    let count = genes.count(member);
    match pedigree.member(member).parents {
        None => model.prior(count),
        Some((mother, father)) => model.inherited(count, genes.count(mother), genes.count(father)),
    }
}

/// Joint probability that
///  * everyone in `genes.one_gene` has one copy of the gene,
///  * everyone in `genes.two_genes` has two copies,
///  * everyone else has none,
///  * everyone in `have_trait` exhibits the trait and nobody else does.
pub fn joint_probability(
    pedigree: &Pedigree,
    model: &ProbabilityModel,
    genes: &GeneAssignment,
    have_trait: &Members,
) -> f64 {
    (0..pedigree.len())
        .map(|member| {
            gene_probability(pedigree, model, genes, member)
                * model.trait_probability(genes.count(member), have_trait.contains(&member))
        })
        .product()
}
