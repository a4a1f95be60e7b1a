#![doc = "pollweight public API"]
mod config;
mod io;
mod ipf;
mod populate;
mod reweight;
mod store;
mod survey;
mod targets;
mod topline;

#[doc(inline)]
pub use config::IpfConfig;

#[doc(inline)]
pub use ipf::{rake, IpfReport};

#[doc(inline)]
pub use populate::{generate, CandidateBias, PollProfile};

#[doc(inline)]
pub use reweight::{run_ipf, IpfRequest};

#[doc(inline)]
pub use store::{CsvStore, MemoryStore, ResponseStore};

#[doc(inline)]
pub use survey::{Dimension, ResponseSet, SurveyRecord};

#[doc(inline)]
pub use targets::{TargetError, TargetWeights};

#[doc(inline)]
pub use topline::{Filter, Topline};

#[doc(inline)]
pub use io::csv::{read_records, read_records_str, write_records, write_records_string};
