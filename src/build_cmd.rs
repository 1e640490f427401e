//! Build command: persist a sparse synopsis.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use wavesyn_synopsis::{run_pipeline, save};

use crate::cli::BuildArgs;
use crate::{config, convert, samples};

/// Build a synopsis from samples and write it to disk.
pub fn run(args: BuildArgs) -> Result<()> {
    let _cmd = info_span!("build").entered();
    let config = config::load(&args.config)?;
    let synopsis_cfg = convert::build_synopsis_config(&config, args.k)?;

    let samples = samples::resolve_samples(args.samples.as_deref(), &config.data)?;
    let synopsis = run_pipeline(&samples, &synopsis_cfg)
        .context("synopsis pipeline failed")?
        .into_synopsis();

    save(&synopsis, &args.output)
        .with_context(|| format!("failed to save synopsis: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        retained = synopsis.retained(),
        "synopsis written"
    );
    println!(
        "wrote {} ({} of {} coefficients)",
        args.output.display(),
        synopsis.retained(),
        synopsis.total_coefficients()
    );
    Ok(())
}
