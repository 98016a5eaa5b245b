//! Transform stage: referential cleaning, dimension derivation, and the
//! two-phase surrogate key resolution that feeds fact assembly.

mod clean;
mod dimensions;
mod fact;
mod resolve;

pub(crate) use clean::{clean, CleanReport, CleanedData, SourceSnapshot};
pub(crate) use dimensions::build_dimensions;
pub(crate) use fact::assemble_facts;
pub(crate) use resolve::{Dimension, ResolveAudit, SurrogateKeys};
