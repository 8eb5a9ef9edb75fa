use std::fs;

use anyhow::{Context, Result};
use kgs_hierarchy::translate_to_hierarchy;
use kgs_model::SpecimenHierarchy;
use tracing::{info, info_span, warn};

use kgs_cli::document::{load_options, read_specimens, render_document};
use kgs_cli::summary::{kinds_table, print_summary};

use crate::cli::{HierarchyArgs, KindsArgs};

/// Translate the input file and print or write the document.
pub fn run_hierarchy(args: &HierarchyArgs) -> Result<Option<SpecimenHierarchy>> {
    let span = info_span!("hierarchy", input = %args.input.display());
    let _guard = span.enter();

    let options = load_options(args.options.as_deref(), args.dataset_version.as_deref())?;
    let specimens = read_specimens(&args.input)?;
    let result = translate_to_hierarchy(&specimens, &options);
    if result.is_none() {
        warn!("no studied specimen in input");
    }

    let document = render_document(result.as_ref(), !args.compact)?;
    let summary = result.as_ref().filter(|_| args.summary);
    if let Some(path) = &args.output {
        fs::write(path, &document)
            .with_context(|| format!("write document {}", path.display()))?;
        info!(path = %path.display(), "wrote specimen hierarchy");
    } else if summary.is_none() {
        println!("{document}");
    }
    if let Some(hierarchy) = summary {
        print_summary(hierarchy);
    }
    Ok(result)
}

pub fn run_kinds(args: &KindsArgs) -> Result<()> {
    let options = load_options(args.options.as_deref(), None)?;
    println!("{}", kinds_table(&options.kinds));
    Ok(())
}
