//! View configuration commands.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use vizlink::events::EventBus;
use vizlink::loader::LoaderRegistry;
use vizlink::session::Session;
use vizlink::view_config::ViewConfig;

use crate::error::CliError;

/// Parse, validate and bind every view of a configuration.
pub fn run_validate(path: &Path) -> Result<(), CliError> {
    let config = ViewConfig::load_from(path)?;
    let version = config.schema_version()?;
    let uids: Vec<String> = config.layout.iter().map(|v| v.uid.clone()).collect();

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let registry = Arc::new(LoaderRegistry::from_config(&config, base_dir));
    let session = Session::new(config, Arc::clone(&registry), Arc::new(EventBus::new()))?;

    for uid in &uids {
        let view = session.activate(uid)?;
        println!(
            "  {:<24} {:<12} {} coordination types",
            uid,
            view.kind().as_str(),
            view.binding().types().len()
        );
    }

    info!(path = %path.display(), views = uids.len(), "Validated view config");
    println!();
    println!(
        "OK: version {}, {} view(s) bound, {} local data file(s)",
        version,
        uids.len(),
        registry.len()
    );
    Ok(())
}

/// Print the declared coordination space and each view's scopes.
pub fn run_scopes(path: &Path) -> Result<(), CliError> {
    let config = ViewConfig::load_from(path)?;
    let space = config.coordination_space()?;

    println!("Coordination Space");
    println!("==================");
    for (coordination_type, scopes) in space.to_document() {
        println!("{}", coordination_type.as_str());
        for (scope, value) in scopes {
            println!("  {:<8} {}", scope, value);
        }
    }

    println!();
    println!("View Scopes");
    println!("===========");
    for view in &config.layout {
        println!("{} ({})", view.uid, view.component);
        for (coordination_type, scope) in view.coordination_scopes()?.iter() {
            println!("  {:<20} {}", coordination_type.as_str(), scope);
        }
    }
    Ok(())
}
