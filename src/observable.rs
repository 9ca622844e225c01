use crate::prelude::*;
use csv;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions of the four fields of a person record.
#[derive(Clone, Copy, Debug)]
struct Fields {
    name: usize,
    mother: usize,
    father: usize,
    trait_: usize,
}

impl Fields {
    const POSITIONAL: Fields = Fields {
        name: 0,
        mother: 1,
        father: 2,
        trait_: 3,
    };
}

fn optional(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_owned())
    }
}

fn parse_trait(person: &str, field: &str) -> Result<Option<bool>> {
    match field.trim() {
        "1" => Ok(Some(true)),
        "0" => Ok(Some(false)),
        "" => Ok(None),
        other => Err(Error::InvalidTrait {
            person: person.to_owned(),
            value: other.to_owned(),
        }),
    }
}

/// Produces `Person` records from u8 delimited data
///
/// `Csv` implements Iterator so it can be passed
/// directly to `Population::observe()`
pub struct Csv {
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
    fields: Fields,
}

impl Csv {
    fn new(records: csv::StringRecordsIntoIter<Box<dyn Read>>, fields: Fields) -> Self {
        Self { records, fields }
    }

    fn person(&self, row: &csv::StringRecord) -> Result<Person> {
        let field = |idx: usize| row.get(idx).unwrap_or("");
        let name = field(self.fields.name).trim().to_owned();
        Ok(Person {
            observed_trait: parse_trait(&name, field(self.fields.trait_))?,
            mother: optional(field(self.fields.mother)),
            father: optional(field(self.fields.father)),
            name,
        })
    }
}

impl Iterator for Csv {
    type Item = Result<Person>;

    fn next(&mut self) -> Option<Result<Person>> {
        loop {
            match self.records.next()? {
                Ok(row) => {
                    if row.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }
                    return Some(self.person(&row));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

pub struct CsvBuilder {
    headers: bool,
    delimiter: u8,
    name_field: String,
    mother_field: String,
    father_field: String,
    trait_field: String,
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvBuilder {
    /// Construct a new Csv builder
    ///
    /// Defaults to a comma separated file with a `name,mother,father,trait`
    /// header.
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            name_field: "name".to_owned(),
            mother_field: "mother".to_owned(),
            father_field: "father".to_owned(),
            trait_field: "trait".to_owned(),
        }
    }

    /// Without headers the columns are read in the order name, mother,
    /// father, trait.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn name_field(&mut self, name_field: &str) -> &mut Self {
        self.name_field = name_field.to_owned();
        self
    }

    pub fn mother_field(&mut self, mother_field: &str) -> &mut Self {
        self.mother_field = mother_field.to_owned();
        self
    }

    pub fn father_field(&mut self, father_field: &str) -> &mut Self {
        self.father_field = father_field.to_owned();
        self
    }

    pub fn trait_field(&mut self, trait_field: &str) -> &mut Self {
        self.trait_field = trait_field.to_owned();
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Csv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let fields = if self.headers {
            let headers = rdr.headers()?;
            let column = |wanted: &str| -> Result<usize> {
                headers
                    .iter()
                    .position(|h| h.trim() == wanted)
                    .ok_or_else(|| Error::MissingColumn(wanted.to_owned()))
            };
            Fields {
                name: column(&self.name_field)?,
                mother: column(&self.mother_field)?,
                father: column(&self.father_field)?,
                trait_: column(&self.trait_field)?,
            }
        } else {
            Fields::POSITIONAL
        };

        Ok(Csv::new(rdr.into_records(), fields))
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Csv> {
        log::debug!("Reading population from {}", path.as_ref().display());
        self.from_reader(Box::new(File::open(path)?))
    }
}
