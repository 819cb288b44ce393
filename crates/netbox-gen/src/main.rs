//! NetBox service generator
//!
//! Writes `{endpoint}_{service}.rs` containing a resource's endpoint table and
//! a typed service wrapper over it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use netbox_gen::output::generate_and_write;
use netbox_gen::template::{DEFAULT_CRATE_PATH, DEFAULT_MODELS_PATH, ServiceTemplate};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// netbox-gen - generates a typed NetBox resource service
#[derive(Parser, Debug)]
#[command(name = "netbox-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the type to use (e.g. TenantGroup)
    #[arg(long, default_value = "Example")]
    type_name: String,

    /// Name of the service to create (e.g. TenantGroupsService)
    #[arg(long, default_value = "ExampleService")]
    service_name: String,

    /// Name of the endpoint (e.g. dcim, ipam, tenancy)
    #[arg(long, default_value = "tenancy")]
    endpoint: String,

    /// Name of the service below endpoint (e.g. tenant-groups)
    #[arg(long, default_value = "example")]
    service: String,

    /// Type to decode create and update responses into. Defaults to --type-name
    #[arg(long, default_value = "")]
    update_type_name: String,

    /// Disable list options for this endpoint
    #[arg(long)]
    without_list_opts: bool,

    /// Path the generated code imports the client from
    #[arg(long, default_value = DEFAULT_CRATE_PATH)]
    crate_path: String,

    /// Path the generated code imports model types from
    #[arg(long, default_value = DEFAULT_MODELS_PATH)]
    models_path: String,

    /// Output directory for the generated file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn template(&self) -> ServiceTemplate {
        ServiceTemplate::new(&self.type_name, &self.service_name, &self.endpoint, &self.service)
            .with_update_type_name(&self.update_type_name)
            .with_list_opts(!self.without_list_opts)
            .with_crate_path(&self.crate_path)
            .with_models_path(&self.models_path)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let template = cli.template();
    info!(
        "Generating {} for {}/{} ({})",
        template.service_name,
        template.endpoint,
        template.service,
        template.type_name
    );

    generate_and_write(&template, &cli.output_dir, cli.dry_run)
        .with_context(|| format!("failed to generate {}", template.file_name()))?;

    Ok(())
}
