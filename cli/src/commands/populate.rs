use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use pollweight::{generate, write_records, IpfRequest, PollProfile};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::PopulateArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./survey_results.csv".into());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut records = Vec::new();
    for profile in PollProfile::builtin() {
        info!("[populate] generating {} responses for {}", args.responses, profile.poll);
        let first_id = records.len() as u64 + 1;
        records.extend(generate(&profile, args.responses, first_id, &mut rng)?);

        if let Some(dir) = &args.targets_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("[populate] Failed to create {}", dir.display()))?;
            let slug = profile.poll.replace(' ', "_").to_lowercase();
            let path = dir.join(format!("{slug}.json"));
            let request = IpfRequest::new(profile.poll.as_str(), profile.default_targets());
            fs::write(&path, serde_json::to_string_pretty(&request)?)
                .with_context(|| format!("[populate] Failed to write {}", path.display()))?;
        }
    }

    info!("[populate] writing {} responses to {}", records.len(), out_path.display());
    write_records(&records, &out_path)?;

    Ok(())
}
