//! Conditional probability tables of the heredity network.
//!
//! A `ProbabilityModel` is plain configuration: it is built once (from the
//! defaults or a TOML file) and handed to the core by reference.

use crate::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Number of copies of the variant allele a person holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    pub fn copies(self) -> usize {
        match self {
            GeneCount::Zero => 0,
            GeneCount::One => 1,
            GeneCount::Two => 2,
        }
    }
}

/// One value per gene-count class.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerGeneCount {
    pub zero: f64,
    pub one: f64,
    pub two: f64,
}

impl PerGeneCount {
    pub fn get(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbabilityModel {
    /// Unconditional gene-count distribution of founders.
    pub gene: PerGeneCount,
    /// P(trait | gene count). P(no trait | gene count) is the complement.
    pub trait_given_gene: PerGeneCount,
    /// Probability that a transmitted allele flips.
    pub mutation: f64,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self {
            gene: PerGeneCount {
                zero: 0.96,
                one: 0.03,
                two: 0.01,
            },
            trait_given_gene: PerGeneCount {
                zero: 0.01,
                one: 0.56,
                two: 0.65,
            },
            mutation: 0.01,
        }
    }
}

impl ProbabilityModel {
    /// Parses a model from TOML. Tables left out keep their default value,
    /// a table that is given must list all three gene counts.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let model: ProbabilityModel = toml::from_str(s)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded probability model from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("gene.zero", self.gene.zero),
            ("gene.one", self.gene.one),
            ("gene.two", self.gene.two),
            ("trait_given_gene.zero", self.trait_given_gene.zero),
            ("trait_given_gene.one", self.trait_given_gene.one),
            ("trait_given_gene.two", self.trait_given_gene.two),
            ("mutation", self.mutation),
        ];
        for (name, value) in entries.iter() {
            if !(0.0..=1.0).contains(value) {
                return Err(Error::InvalidProbability {
                    name: (*name).to_owned(),
                    value: *value,
                });
            }
        }

        let sum = self.gene.zero + self.gene.one + self.gene.two;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(Error::PriorSum(sum));
        }
        Ok(())
    }

    /// Unconditional probability of a founder's gene count.
    pub fn prior(&self, count: GeneCount) -> f64 {
        self.gene.get(count)
    }

    /// Probability of exhibiting (or not) the trait given the gene count.
    pub fn trait_probability(&self, count: GeneCount, has_trait: bool) -> f64 {
        let p = self.trait_given_gene.get(count);
        if has_trait {
            p
        } else {
            1.0 - p
        }
    }

    /// Probability that a parent with `count` copies passes the variant on.
    pub fn transmission(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.mutation,
            GeneCount::One => 0.5,
            GeneCount::Two => 1.0 - self.mutation,
        }
    }

    /// Gene-count probability of a child given both parents' counts.
    pub fn inherited(&self, child: GeneCount, mother: GeneCount, father: GeneCount) -> f64 {
        let m = self.transmission(mother);
        let f = self.transmission(father);
        match child {
            GeneCount::Zero => (1.0 - m) * (1.0 - f),
            GeneCount::One => m * (1.0 - f) + (1.0 - m) * f,
            GeneCount::Two => m * f,
        }
    }
}
