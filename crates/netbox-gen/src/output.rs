//! Output assembly and file writing for generated services.
//!
//! Rendered tokens are parsed with `syn` before anything touches disk,
//! formatted with `prettyplease`, and written with a temp file + rename so a
//! failed run never leaves a half-written service behind.

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::template::ServiceTemplate;

/// Notice prepended to every generated file
pub const GENERATED_NOTICE: &str = "// Code generated by netbox-gen. DO NOT EDIT.";

/// Validates generated code using syn.
///
/// # Errors
///
/// Returns `GeneratorError::CodeGenError` if the tokens do not parse as a
/// complete Rust file.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease and prepends the generated notice.
pub fn format_code(file: &syn::File) -> String {
    format!("{}\n\n{}", GENERATED_NOTICE, prettyplease::unparse(file))
}

/// Writes content to a file atomically using temp file + rename.
///
/// # Errors
///
/// Returns `GeneratorError::WriteError` if the parent directory cannot be
/// created, the temp file cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Renders, validates and formats a service without writing it.
pub fn generate(template: &ServiceTemplate) -> Result<String, GeneratorError> {
    let tokens = template.render()?;
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Where [`generate_and_write`] puts the service for `template`
pub fn output_path(template: &ServiceTemplate, output_dir: &Path) -> PathBuf {
    output_dir.join(template.file_name())
}

/// Generates the service for `template` and writes it to `output_dir`.
///
/// With `dry_run` the code is printed to stdout instead of written.
///
/// # Returns
///
/// The formatted code.
///
/// # Errors
///
/// Returns an error if rendering fails, the output is not valid Rust, or the
/// file cannot be written.
pub fn generate_and_write(
    template: &ServiceTemplate,
    output_dir: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let code = generate(template)?;
    let path = output_path(template, output_dir);
    debug!("Rendered {} ({} bytes)", template.file_name(), code.len());

    if dry_run {
        println!("=== {} ===\n{}", path.display(), code);
    } else {
        write_atomic(&path, &code)?;
        info!("Wrote {}", path.display());
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use tempfile::TempDir;

    fn contacts() -> ServiceTemplate {
        ServiceTemplate::new("Contact", "ContactsService", "tenancy", "contacts")
    }

    // === validate_code / format_code ===

    #[test]
    fn validate_code_rejects_broken_tokens() {
        let tokens = quote! { pub struct };
        assert!(matches!(validate_code(&tokens), Err(GeneratorError::CodeGenError(_))));
    }

    #[test]
    fn format_code_prepends_notice() {
        let file = validate_code(&quote! { pub struct Empty; }).unwrap();
        let formatted = format_code(&file);
        assert!(formatted.starts_with(GENERATED_NOTICE));
        assert!(formatted.contains("pub struct Empty;"));
    }

    #[test]
    fn generated_service_is_formatted_rust() {
        let code = generate(&contacts()).unwrap();
        assert!(code.contains("//! `tenancy/contacts` service."));
        assert!(code.contains("pub static CONTACTS: ResourceEndpoints"));
        assert!(code.contains("\"tenancy_contacts_partial_update\""));
        assert!(code.contains("HttpMethod::Delete"));
        assert!(code.contains("NO_CONTENT"));
        assert!(code.contains("use netbox_client::models::Contact;"));
        assert!(code.contains("options: Option<&ListOptions>"));
    }

    #[test]
    fn generated_service_without_list_opts() {
        let code = generate(&contacts().with_list_opts(false)).unwrap();
        assert!(code.contains("pub async fn list(&self) -> Result<Page<Contact>, NetBoxError>"));
        assert!(code.contains("self.inner.list(None).await"));
    }

    #[test]
    fn generated_service_imports_update_type() {
        let template = ServiceTemplate::new(
            "WritableCircuitTermination",
            "CircuitTerminationsService",
            "circuits",
            "circuit-terminations",
        )
        .with_update_type_name("CircuitTermination");
        let code = generate(&template).unwrap();
        assert!(code.contains("use netbox_client::models::{WritableCircuitTermination, CircuitTermination};"));
        assert!(code.contains("ResourceService<'c, Tr, WritableCircuitTermination, CircuitTermination>"));
    }

    // === write_atomic ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/deep/service.rs");

        write_atomic(&file_path, "// Nested content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// Nested content");
    }

    #[test]
    fn write_atomic_overwrites_without_leaving_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("existing.rs");
        fs::write(&file_path, "// Old content").unwrap();

        write_atomic(&file_path, "// New content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// New content");
        assert!(!file_path.with_extension("tmp").exists());
    }

    #[test]
    fn write_atomic_reports_path_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic(&blocker.join("service.rs"), "// Content").unwrap_err();
        match err {
            GeneratorError::WriteError { path, .. } => assert!(path.contains("blocker")),
            other => panic!("expected write error, got {:?}", other),
        }
    }

    // === generate_and_write ===

    #[test]
    fn generate_and_write_uses_endpoint_service_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let template = ServiceTemplate::new("TenantGroup", "TenantGroupsService", "tenancy", "tenant-groups");

        let code = generate_and_write(&template, temp_dir.path(), false).unwrap();

        let written = fs::read_to_string(temp_dir.path().join("tenancy_tenant_groups.rs")).unwrap();
        assert_eq!(written, code);
    }

    #[test]
    fn generate_and_write_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();

        let code = generate_and_write(&contacts(), temp_dir.path(), true).unwrap();

        assert!(code.contains("pub struct ContactsService"));
        assert!(!temp_dir.path().join("tenancy_contacts.rs").exists());
    }

    #[test]
    fn generate_and_write_fails_before_writing_on_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let template = ServiceTemplate::new("Not A Type", "ContactsService", "tenancy", "contacts");

        assert!(generate_and_write(&template, temp_dir.path(), false).is_err());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
