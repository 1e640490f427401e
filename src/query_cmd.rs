//! Query command: estimate a range count from a saved synopsis.

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use wavesyn_synopsis::load;

use crate::cli::QueryArgs;
use crate::convert;

/// Load a synopsis and print the estimate for `[qmin, qmax]`.
pub fn run(args: QueryArgs) -> Result<()> {
    let _cmd = info_span!("query").entered();
    let policy = convert::parse_range_policy(&args.policy)?;

    let synopsis = load(&args.synopsis)
        .with_context(|| format!("failed to load synopsis: {}", args.synopsis.display()))?;
    debug!(
        n_buckets = synopsis.layout().n_buckets(),
        retained = synopsis.retained(),
        "synopsis loaded"
    );

    let estimate = synopsis
        .estimate(args.qmin, args.qmax, policy)
        .context("range query failed")?;
    println!("{estimate:.2}");
    Ok(())
}
