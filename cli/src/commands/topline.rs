use anyhow::{anyhow, Context, Result};
use pollweight::{CsvStore, Filter, ResponseStore, Topline};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ToplineArgs) -> Result<()> {
    let filter = args.filter.iter().try_fold(Filter::all(), |filter, clause| {
        filter.parse_clause(clause).ok_or_else(|| anyhow!("[topline] Invalid filter '{clause}', expected dimension=cat1,cat2"))
    })?;

    let records = CsvStore::new(&args.data).responses(&args.poll)?;
    let topline = match &args.scenario {
        Some(scenario) => {
            let (subgroup, candidate, share) = parse_scenario(scenario)?;
            Topline::with_override(&records, &filter, subgroup, candidate, share)?
        }
        None => Topline::compute(&records, &filter),
    };

    println!("{} ({} responses, total weight {:.2})", args.poll, records.len(), topline.total_weight());
    for (candidate, share) in topline.shares() {
        println!("  {candidate:<24} {share:6.2}%");
    }

    Ok(())
}

/// Parse `dimension=category:candidate=share`.
fn parse_scenario(scenario: &str) -> Result<((&str, &str), &str, f64)> {
    let invalid = || anyhow!("[topline] Invalid scenario '{scenario}', expected dimension=category:candidate=share");

    let (subgroup, vote) = scenario.split_once(':').ok_or_else(invalid)?;
    let (dimension, category) = subgroup.split_once('=').ok_or_else(invalid)?;
    let (candidate, share) = vote.rsplit_once('=').ok_or_else(invalid)?;
    let share = share.trim().parse::<f64>()
        .with_context(|| format!("[topline] Invalid share '{share}'"))?;

    Ok(((dimension.trim(), category.trim()), candidate.trim(), share))
}

#[cfg(test)]
mod tests {
    use super::parse_scenario;

    #[test]
    fn parses_scenarios() {
        let ((dim, cat), candidate, share) = parse_scenario("age=18-29:Candidate A=0.6").unwrap();
        assert_eq!((dim, cat, candidate, share), ("age", "18-29", "Candidate A", 0.6));
        assert!(parse_scenario("age=18-29").is_err());
        assert!(parse_scenario("age:Candidate A=lots").is_err());
    }
}
