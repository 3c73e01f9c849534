use crate::settings::Settings;
use envgen_config::TemplateFile;
use envgen_core::Result;
use envgen_env::refresh_defaults;
use std::path::Path;
use std::process::ExitCode;

pub async fn execute(settings: &Settings, template: &Path) -> Result<ExitCode> {
    let mut file = TemplateFile::load(template)?;
    let updated = refresh_defaults(&settings.generator(), &mut file.template).await;
    file.save()?;
    tracing::info!(template = %template.display(), updated, "refreshed defaults");

    println!(
        "Updated {updated} of {} defaults in {}",
        file.template.len(),
        template.display()
    );
    Ok(ExitCode::SUCCESS)
}
