mod filter;
mod topline;

pub use filter::Filter;
pub use topline::Topline;
