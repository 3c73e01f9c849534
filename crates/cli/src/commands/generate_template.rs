use envgen_config::{TemplateFile, TemplateFormat};
use envgen_core::{Error, Result};
use envgen_env::generate_template;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(source: &Path, output: &Path) -> Result<ExitCode> {
    // Reject an unsupported output format before touching the source
    TemplateFormat::from_path(output)?;

    let text = std::fs::read_to_string(source)
        .map_err(|e| Error::file_system(source, "read env file", e))?;
    let file = TemplateFile::new(output, generate_template(&text))?;
    file.save()?;
    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        format = %file.format,
        "wrote template"
    );

    println!(
        "Generated template {} with {} variables from {}",
        output.display(),
        file.template.len(),
        source.display()
    );
    Ok(ExitCode::SUCCESS)
}
