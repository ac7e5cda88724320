use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use aquacred_gateway::api::start_api_server;
use aquacred_gateway::api::server::dashboard_reader;
use aquacred_gateway::config::Settings;
use aquacred_gateway::contract::EthersReader;
use aquacred_gateway::contract::RegistryReader;
use aquacred_gateway::dashboard::{load_dashboard, DashboardState};
use aquacred_gateway::upload::{submit_form, FormStatus, HttpFormTransport, ProjectForm};

#[derive(Parser)]
#[command(name = "aquacred", version, about = "AquaCred blue-carbon registry gateway")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web gateway
    Serve {
        #[command(flatten)]
        config: ConfigArgs,
        /// Address to bind, overrides `server.listen_addr`
        #[arg(long)]
        listen: Option<String>,
    },
    /// Submit a project to a running gateway
    Submit(SubmitArgs),
    /// Print the registered projects
    Projects {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Read the contract's raw storage accessors
    Inspect {
        #[command(flatten)]
        config: ConfigArgs,
        /// Project id to read through `projects(id)`
        #[arg(long)]
        id: Option<u64>,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML config file (defaults to ./aquacred.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<Settings> {
        Settings::load(self.config.as_deref()).context("Failed to load configuration")
    }
}

#[derive(Args)]
struct SubmitArgs {
    /// Gateway root URL
    #[arg(long, default_value = "http://localhost:3000")]
    endpoint: String,
    #[arg(long)]
    project_name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    implementing_body: Option<String>,
    #[arg(long)]
    area_hectares: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    project_type: Option<String>,
    /// Explorer URL template for the success link
    #[arg(long, default_value = aquacred_gateway::config::DEFAULT_EXPLORER_TX_URL)]
    explorer: String,
}

impl SubmitArgs {
    fn form(&self) -> ProjectForm {
        let defaults = ProjectForm::default();
        ProjectForm {
            project_name: self.project_name.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            implementing_body: self.implementing_body.clone().unwrap_or_default(),
            area_hectares: self.area_hectares.clone().unwrap_or_default(),
            start_date: self.start_date.clone().unwrap_or_default(),
            project_type: self.project_type.clone().unwrap_or(defaults.project_type),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve { config, listen } => {
            let mut settings = config.load()?;
            if let Some(listen) = listen {
                settings.server.listen_addr = listen;
            }
            start_api_server(settings).await?;
        }
        Command::Submit(args) => submit(args).await?,
        Command::Projects { config } => {
            let settings = config.load()?;
            let reader = dashboard_reader(&settings);
            print_dashboard(&load_dashboard(reader.as_deref()).await);
        }
        Command::Inspect { config, id } => inspect(config.load()?, id).await?,
    }

    Ok(())
}

async fn submit(args: SubmitArgs) -> Result<()> {
    let form = args.form();
    let missing = form.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!("Please fill out: {}", missing.join(", "));
    }

    let transport = HttpFormTransport::new(&args.endpoint);
    let explorer = aquacred_gateway::explorer::ExplorerLink::new(&args.explorer);

    println!("{}", FormStatus::Submitting.message());
    let status = submit_form(&transport, &form, &explorer).await?;
    println!("{}", status.message());

    if status.is_error() {
        anyhow::bail!("Project was not registered");
    }
    Ok(())
}

fn print_dashboard(state: &DashboardState) {
    let view = state.view();
    if let DashboardState::Empty(reason) = state {
        println!("Dashboard is empty ({:?})", reason);
    }
    println!("Total Projects Registered: {}", view.total_projects);
    println!("Total Hectares: {}", view.total_hectares);
    for project in &view.projects {
        println!(
            "#{} {} - {} - {} Hectares",
            project.id, project.name, project.location, project.hectares
        );
    }
}

async fn inspect(settings: Settings, id: Option<u64>) -> Result<()> {
    let provider_url = settings
        .dashboard
        .provider_url
        .as_deref()
        .or(settings.chain.rpc_url.as_deref())
        .context("No provider URL configured")?;
    let reader = EthersReader::connect(provider_url, settings.chain.contract_address.as_deref())?;

    println!("projectCounter() = {}", reader.project_counter().await?);
    if let Some(id) = id {
        let record = reader.stored_project(id).await?;
        println!("projects({}) = {:#?}", id, record);
    }
    Ok(())
}
