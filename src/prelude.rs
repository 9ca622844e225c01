pub use crate::error::{Error, Result};
pub use crate::model::{GeneCount, ProbabilityModel};
pub use crate::pedigree::{Member, MemberIndex, Pedigree};
pub use crate::{Person, PersonName, Population};
