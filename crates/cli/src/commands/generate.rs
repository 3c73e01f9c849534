use crate::settings::Settings;
use envgen_config::TemplateFile;
use envgen_core::Result;
use envgen_utils::atomic_file::write_atomic_string;
use std::path::Path;
use std::process::ExitCode;

pub async fn execute(
    settings: &Settings,
    template: &Path,
    output: &Path,
    dry_run: bool,
) -> Result<ExitCode> {
    let file = TemplateFile::load(template)?;
    let result = settings.generator().generate(&file.template).await;

    if !result.success {
        tracing::info!(
            template = %template.display(),
            errors = result.errors.len(),
            "generation failed"
        );
        eprintln!(
            "Failed to generate {} from {}:",
            output.display(),
            template.display()
        );
        for error in &result.errors {
            eprintln!("  - {error}");
        }
        return Ok(ExitCode::FAILURE);
    }

    if dry_run {
        println!(
            "Dry run: {} variables resolved, {} not written",
            result.emitted,
            output.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    write_atomic_string(output, &result.content)?;
    tracing::info!(
        template = %template.display(),
        output = %output.display(),
        variables = result.emitted,
        "wrote env file"
    );
    println!("Generated {}", output.display());
    Ok(ExitCode::SUCCESS)
}
