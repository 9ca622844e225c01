use crate::distribution::{Distributions, PersonDistribution};
use crate::prelude::*;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Tsv,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "tsv" => Ok(Format::Tsv),
            other => Err(format!("unknown format '{}', expected 'text' or 'tsv'", other)),
        }
    }
}

/// Indented listing of every person's distributions, four decimals each.
pub struct Text<'a>(pub &'a Distributions);

fn write_person(f: &mut fmt::Formatter<'_>, name: &str, dist: &PersonDistribution) -> fmt::Result {
    writeln!(f, "{}:", name)?;
    writeln!(f, "  Gene:")?;
    for &count in GeneCount::ALL.iter().rev() {
        writeln!(f, "    {}: {:.4}", count.copies(), dist.gene(count))?;
    }
    writeln!(f, "  Trait:")?;
    writeln!(f, "    True: {:.4}", dist.has_trait(true))?;
    writeln!(f, "    False: {:.4}", dist.has_trait(false))
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, dist) in self.0.iter() {
            write_person(f, name, &dist)?;
        }
        Ok(())
    }
}

/// Writes one tab separated row per person.
pub fn write_tsv<W: Write>(distributions: &Distributions, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    wtr.write_record(&["name", "gene_0", "gene_1", "gene_2", "trait_true", "trait_false"])?;
    for (name, dist) in distributions.iter() {
        wtr.write_record(&[
            name.clone(),
            dist.gene(GeneCount::Zero).to_string(),
            dist.gene(GeneCount::One).to_string(),
            dist.gene(GeneCount::Two).to_string(),
            dist.has_trait(true).to_string(),
            dist.has_trait(false).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write<W: Write>(distributions: &Distributions, format: Format, mut writer: W) -> Result<()> {
    match format {
        Format::Text => {
            write!(writer, "{}", Text(distributions))?;
            writer.flush()?;
            Ok(())
        }
        Format::Tsv => write_tsv(distributions, writer),
    }
}
