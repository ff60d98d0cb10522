//! Up command implementation
//!
//! The full render-then-reconcile pipeline:
//! 1. Load the target environment (namespace, domain)
//! 2. Parse the appfile into the application model
//! 3. Load component templates
//! 4. Build the resource bundle
//! 5. Write the bundle to .vela/deploy.yaml for inspection
//! 6. Apply components in order, then the application configuration
//! 7. Print the deployment summary
//!
//! Every step is synchronous and blocking; the first failing step aborts
//! the run with its error.

use std::path::Path;

use crate::appfile::AppFile;
use crate::build::build_bundle;
use crate::cli::UpArgs;
use crate::cluster::{FsStore, ObjectStore};
use crate::env::EnvMeta;
use crate::error::Result;
use crate::manifest;
use crate::reconcile::Reconciler;
use crate::template::TemplateStore;
use crate::ui::Reporter;

/// Run the up command
pub fn run(args: UpArgs) -> Result<()> {
    let env = EnvMeta::load()?;
    let store = FsStore::open_default()?;
    let templates = TemplateStore::load()?;
    let mut reporter = Reporter::stdout();

    run_with(
        args.file.as_deref(),
        &env,
        &templates,
        &store,
        Path::new(""),
        &mut reporter,
    )
}

/// Pipeline core, parameterized over the store and output for testing
pub(crate) fn run_with(
    file: Option<&Path>,
    env: &EnvMeta,
    templates: &TemplateStore,
    store: &impl ObjectStore,
    workdir: &Path,
    reporter: &mut Reporter,
) -> Result<()> {
    match file {
        Some(path) => reporter.info(format!("Parsing {} ...", path.display())),
        None => reporter.info("Parsing vela.yaml ..."),
    }
    let app = AppFile::load(file)?;

    reporter.info("Loading templates ...");
    let bundle = build_bundle(&app, templates, &env.namespace, reporter)?;

    reporter.info(format!(
        "Writing deploy config to ({})",
        workdir.join(manifest::DEPLOY_FILE).display()
    ));
    let written = manifest::write(&bundle, workdir)?;
    reporter.info(format!("  digest: {}", written.digest));

    reporter.blank();
    reporter.info("Applying deploy configs ...");
    Reconciler::new(store).apply(&bundle, reporter)?;

    reporter.blank();
    reporter.summary(&app.name, &env.domain);
    Ok(())
}
