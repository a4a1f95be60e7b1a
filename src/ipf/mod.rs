mod engine;
mod margin;
mod report;

pub use engine::rake;
pub use report::IpfReport;
