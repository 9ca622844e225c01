use thiserror::Error;

/// Everything that can go wrong between reading a population and reporting
/// its posterior distributions.
///
/// The enumeration core itself never fails; these variants come from the
/// loader, the pedigree checks and the model configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read delimited population data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not parse probability model: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("The required column '{0}' was not found in the header")]
    MissingColumn(String),

    #[error("Trait of '{person}' must be '1', '0' or empty, found '{value}'")]
    InvalidTrait { person: String, value: String },

    #[error("Person '{0}' is listed more than once")]
    DuplicatePerson(String),

    #[error("Parent '{parent}' of '{person}' is not part of the population")]
    UnknownParent { person: String, parent: String },

    #[error("'{0}' has exactly one parent; give both parents or neither")]
    SingleParent(String),

    #[error("'{0}' is listed as their own parent")]
    SelfParent(String),

    #[error("The parent relation contains a cycle through '{0}'")]
    Cycle(String),

    #[error("Probability '{name}' must lie in [0, 1], found {value}")]
    InvalidProbability { name: String, value: f64 },

    #[error("Unconditional gene probabilities must sum to 1, found {0}")]
    PriorSum(f64),

    #[error("The population is empty")]
    EmptyPopulation,

    #[error("Refusing to enumerate {people} people, the limit is {limit}")]
    TooLarge { people: usize, limit: usize },

    #[error("No scenario consistent with the evidence has non-zero probability for '{0}'")]
    ImpossibleEvidence(String),
}

pub type Result<T> = std::result::Result<T, Error>;
