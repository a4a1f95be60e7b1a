use std::fs;

use anyhow::{Context, Result};
use pollweight::{run_ipf, CsvStore, IpfConfig, IpfRequest};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RakeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => IpfConfig::read_toml(path)?,
        None => IpfConfig::default(),
    };
    if let Some(tolerance) = args.tolerance { config.tolerance = tolerance }
    if let Some(max_iterations) = args.max_iterations { config.max_iterations = max_iterations }
    config.strict |= args.strict;
    config.validate()?;

    let request = fs::read_to_string(&args.request)
        .with_context(|| format!("[rake] Failed to read request {}", args.request.display()))?;
    let request = IpfRequest::from_json_str(&request)?;
    request.check()?;

    info!("[rake] poll '{}' from {}", request.poll, args.data.display());
    let mut store = CsvStore::new(&args.data);
    let report = run_ipf(&mut store, &request.poll, &request.target_weights, &config)?;

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("[rake] Failed to write report to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
