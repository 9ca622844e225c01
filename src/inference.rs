//! Exact inference by enumerating every possible world.
//!
//! For n people there are 2^n trait assignments and 3^n gene assignments, so
//! the work grows as 6^n. The driver refuses pedigrees larger than
//! `InferenceOptions::max_people`.

use crate::distribution::Distributions;
use crate::joint::{joint_probability, GeneAssignment, Members};
use crate::powerset::powerset;
use crate::prelude::*;
use rayon::prelude::*;

pub const DEFAULT_MAX_PEOPLE: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Spread trait assignments over the rayon thread pool.
    pub parallel: bool,
    pub max_people: usize,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            max_people: DEFAULT_MAX_PEOPLE,
        }
    }
}

/// Whether `have_trait` agrees with every observed trait.
pub fn consistent_with_evidence(pedigree: &Pedigree, have_trait: &Members) -> bool {
    pedigree
        .members()
        .iter()
        .enumerate()
        .all(|(idx, member)| match member.observed_trait {
            Some(observed) => observed == have_trait.contains(&idx),
            None => true,
        })
}

/// Every trait assignment that does not contradict an observation.
pub fn trait_assignments(pedigree: &Pedigree) -> impl Iterator<Item = Members> + '_ {
    powerset(pedigree.everyone()).filter(move |have_trait| consistent_with_evidence(pedigree, have_trait))
}

/// Every way to split `people` into zero, one and two gene copies.
pub fn gene_assignments(people: &Members) -> impl Iterator<Item = GeneAssignment> + '_ {
    powerset(people.clone()).flat_map(move |one_gene| {
        let rest: Members = people.difference(&one_gene).copied().collect();
        powerset(rest).map(move |two_genes| GeneAssignment::new(one_gene.clone(), two_genes))
    })
}

/// Adds every gene assignment paired with `have_trait` into `distributions`
/// and returns the number of scenarios evaluated.
fn accumulate_trait_assignment(
    pedigree: &Pedigree,
    model: &ProbabilityModel,
    have_trait: &Members,
    distributions: &mut Distributions,
) -> usize {
    let everyone = pedigree.everyone();
    let mut scenarios = 0;
    for genes in gene_assignments(&everyone) {
        let p = joint_probability(pedigree, model, &genes, have_trait);
        distributions.update(&genes, have_trait, p);
        scenarios += 1;
    }
    scenarios
}

/// Unnormalized mass of every scenario consistent with the evidence.
pub fn accumulate(pedigree: &Pedigree, model: &ProbabilityModel, options: &InferenceOptions) -> Result<Distributions> {
    if pedigree.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    if pedigree.len() > options.max_people {
        return Err(Error::TooLarge {
            people: pedigree.len(),
            limit: options.max_people,
        });
    }

    log::info!(
        "Enumerating {} people ({} trait x {} gene assignments)",
        pedigree.len(),
        2f64.powi(pedigree.len() as i32),
        3f64.powi(pedigree.len() as i32)
    );

    let (distributions, subsets, scenarios) = if options.parallel {
        // Eager: the consistent trait assignments are collected so rayon can split them.
        let assignments: Vec<Members> = trait_assignments(pedigree).collect();
        let subsets = assignments.len();
        let (distributions, scenarios) = assignments
            .par_iter()
            .fold(
                || (Distributions::new(pedigree), 0usize),
                |(mut partial, count), have_trait| {
                    let added = accumulate_trait_assignment(pedigree, model, have_trait, &mut partial);
                    (partial, count + added)
                },
            )
            .reduce(
                || (Distributions::new(pedigree), 0usize),
                |(mut left, left_count), (right, right_count)| {
                    left += &right;
                    (left, left_count + right_count)
                },
            );
        (distributions, subsets, scenarios)
    } else {
        let mut distributions = Distributions::new(pedigree);
        let mut subsets = 0;
        let mut scenarios = 0;
        for have_trait in trait_assignments(pedigree) {
            subsets += 1;
            scenarios += accumulate_trait_assignment(pedigree, model, &have_trait, &mut distributions);
        }
        (distributions, subsets, scenarios)
    };

    log::debug!(
        "{} trait assignments consistent with the evidence, {} scenarios evaluated",
        subsets,
        scenarios
    );
    Ok(distributions)
}

/// Posterior gene-count and trait distributions of every member.
pub fn infer(pedigree: &Pedigree, model: &ProbabilityModel, options: &InferenceOptions) -> Result<Distributions> {
    let mut distributions = accumulate(pedigree, model, options)?;
    if let Some(name) = distributions.first_without_mass() {
        return Err(Error::ImpossibleEvidence(name.clone()));
    }
    distributions.normalize();
    Ok(distributions)
}
