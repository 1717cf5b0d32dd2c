//! Command line front-end for the veterinary clinic API.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;
use thiserror::Error;

use vet_clinic::controller::{
    AppointmentResource, ControllerError, ListController, Mutation, SpeciesResource, UserResource,
};
use vet_clinic::domain::access::Route;
use vet_clinic::domain::appointment::{AppointmentAction, AppointmentFilter, AppointmentStatus};
use vet_clinic::domain::history::RecordKind;
use vet_clinic::domain::types::{
    AppointmentId, PetId, SpeciesId, TypeConstraintError, VeterinarianId,
};
use vet_clinic::domain::{species, user};
use vet_clinic::forms::FormError;
use vet_clinic::forms::appointment::RescheduleForm;
use vet_clinic::forms::auth::LoginForm;
use vet_clinic::forms::history::ObservationForm;
use vet_clinic::forms::species::SpeciesForm;
use vet_clinic::gateway::errors::GatewayError;
use vet_clinic::gateway::{HttpGateway, api::ApiClient};
use vet_clinic::models::config::ClientConfig;
use vet_clinic::pagination::{ListPage, ListQuery};
use vet_clinic::services::{self, ServiceError};
use vet_clinic::session::{FileSessionStore, LogNavigator, Session};

/// Veterinary clinic client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show quick actions and, for administrators, clinic statistics
    Dashboard,
    #[command(subcommand)]
    Species(SpeciesCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Appointments(AppointmentsCommand),
    #[command(subcommand)]
    Pets(PetsCommand),
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page, the configured page size when omitted
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum SpeciesCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Switch a species between active and inactive
    Toggle { id: i32 },
    Delete { id: i32 },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Role id: 1 administrator, 2 veterinarian, 3 client
        #[arg(long)]
        role: Option<i32>,
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AppointmentsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Pendiente, Cancelada or Atendida
        #[arg(long, value_parser = parse_status)]
        status: Option<AppointmentStatus>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        veterinarian: Option<i32>,
        #[arg(long)]
        pet: Option<i32>,
    },
    Cancel {
        id: i32,
        #[arg(long, default_value = "")]
        observation: String,
    },
    Attend {
        id: i32,
        #[arg(long, default_value = "")]
        observation: String,
    },
    Reschedule {
        id: i32,
        /// `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        /// `HH:MM` or `HH:MM:SS`
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
enum PetsCommand {
    /// Pets of the signed-in owner
    List,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Clinic-wide history, or the records of one pet with `--pet`
    List {
        #[arg(long)]
        pet: Option<i32>,
        #[arg(long, requires = "pet", value_parser = parse_record_kind)]
        kind: Option<RecordKind>,
    },
}

fn parse_status(value: &str) -> Result<AppointmentStatus, String> {
    AppointmentStatus::parse(value).ok_or_else(|| format!("unknown status {value}"))
}

fn parse_record_kind(value: &str) -> Result<RecordKind, String> {
    RecordKind::parse(value).ok_or_else(|| format!("unknown record kind {value}"))
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Invalid(#[from] TypeConstraintError),

    #[error("Not allowed to open {0}")]
    Forbidden(Route),

    #[error("Not signed in")]
    SignedOut,
}

impl CliError {
    fn form(&self) -> Option<&FormError> {
        match self {
            CliError::Controller(ControllerError::Form(err))
            | CliError::Service(ServiceError::Form(err)) => Some(err),
            _ => None,
        }
    }
}

type CliResult = Result<(), CliError>;

struct App {
    config: ClientConfig,
    session: Session,
    gateway: HttpGateway,
}

impl App {
    fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let store = FileSessionStore::new(config.session_file.clone());
        let session = Session::new(Arc::new(store), Arc::new(LogNavigator));
        let api = ApiClient::with_reqwest(
            config.api_base_url.clone(),
            config.request_timeout(),
            session.clone(),
        )?;
        Ok(Self {
            config,
            session,
            gateway: HttpGateway::new(api),
        })
    }

    /// Checks the session before a page backed by a list controller.
    fn open(&self, route: Route) -> CliResult {
        if !self.session.guard(route) {
            return Err(CliError::SignedOut);
        }
        if !self.session.capabilities().allows(route) {
            return Err(CliError::Forbidden(route));
        }
        Ok(())
    }

    fn query(&self, args: &PageArgs) -> ListQuery {
        ListQuery::new(args.page_size.unwrap_or(self.config.page_size)).page(args.page)
    }

    async fn run(&self, command: Command) -> CliResult {
        match command {
            Command::Login { email, password } => {
                let form = LoginForm { email, password };
                let user = services::auth::login(&self.gateway, &self.session, form).await?;
                println!("Bienvenido, {}", user.name);
            }
            Command::Logout => services::auth::logout(&self.session)?,
            Command::Whoami => {
                let user = self.session.user().ok_or(CliError::SignedOut)?;
                let role = user.role().map_or("Usuario", |r| r.label());
                println!("{} ({role}, id {})", user.name, user.user_id);
            }
            Command::Dashboard => {
                let data = services::dashboard::dashboard(&self.gateway, &self.session).await?;
                println!("{} · {}", data.user_name, data.role_label);
                for action in &data.quick_actions {
                    let path = action.route.map(|r| r.path()).unwrap_or_default();
                    println!("  {:<22} {path}", action.label);
                }
                if let Some(stats) = data.statistics {
                    println!(
                        "Usuarios: {}  Mascotas: {}  Citas: {}",
                        stats.users, stats.pets, stats.appointments
                    );
                }
            }
            Command::Species(command) => self.species(command).await?,
            Command::Users(command) => self.users(command).await?,
            Command::Appointments(command) => self.appointments(command).await?,
            Command::Pets(PetsCommand::List) => {
                let pets = services::pets::my_pets(&self.gateway, &self.session).await?;
                for pet in pets {
                    println!(
                        "{:>4}  {:<16} {:<10} {:<8} {}",
                        pet.id, pet.name, pet.species.name, pet.sex, pet.age
                    );
                }
            }
            Command::History(HistoryCommand::List { pet, kind }) => match pet {
                Some(pet) => {
                    let pet = PetId::new(pet)?;
                    let entries =
                        services::history::pet_history(&self.gateway, &self.session, pet, kind)
                            .await?;
                    for entry in entries {
                        println!(
                            "{:>4}  {}  {:<12} {}",
                            entry.id, entry.date, entry.kind, entry.description
                        );
                    }
                }
                None => {
                    let rows =
                        services::history::history_overview(&self.gateway, &self.session).await?;
                    for row in rows {
                        println!(
                            "{:>4}  {}  {:<12} {:<12} {}",
                            row.id, row.date, row.pet.name, row.kind, row.description
                        );
                    }
                }
            },
        }
        Ok(())
    }

    async fn species(&self, command: SpeciesCommand) -> CliResult {
        self.open(Route::ManageSpecies)?;
        let controller = ListController::new(
            SpeciesResource::new(self.gateway.clone()),
            self.config.page_size,
        );

        match command {
            SpeciesCommand::List { page, search } => {
                let mut query = self.query(&page);
                if let Some(search) = search {
                    query = query.filter(species::FILTER_SEARCH, search);
                }
                let page = controller.load(query).await?;
                print_page(&page, |s| {
                    format!(
                        "{:>4}  {:<20} {:<9} {}",
                        s.id,
                        s.name,
                        s.status.label(),
                        s.description.as_deref().unwrap_or("")
                    )
                });
            }
            SpeciesCommand::Create { name, description } => {
                controller.create_from(SpeciesForm { name, description }).await?;
                println!("Especie creada");
            }
            SpeciesCommand::Update { id, name, description } => {
                let id = SpeciesId::new(id)?;
                controller
                    .update_from(id, SpeciesForm { name, description })
                    .await?;
                println!("Especie {id} actualizada");
            }
            SpeciesCommand::Toggle { id } => {
                controller.mutate(Mutation::ToggleStatus(SpeciesId::new(id)?)).await?;
                println!("Estado de la especie {id} actualizado");
            }
            SpeciesCommand::Delete { id } => {
                controller.mutate(Mutation::Delete(SpeciesId::new(id)?)).await?;
                println!("Especie {id} eliminada");
            }
        }
        Ok(())
    }

    async fn users(&self, command: UsersCommand) -> CliResult {
        self.open(Route::ManageUsers)?;
        let controller =
            ListController::new(UserResource::new(self.gateway.clone()), self.config.page_size);

        let UsersCommand::List { page, role, search } = command;
        let mut query = self.query(&page);
        if let Some(role) = role {
            query = query.filter(user::FILTER_ROLE, role.to_string());
        }
        if let Some(search) = search {
            query = query.filter(user::FILTER_SEARCH, search);
        }
        let page = controller.load(query).await?;
        print_page(&page, |u| {
            let state = if u.active { "activo" } else { "inactivo" };
            let role = u.role().map_or("Usuario", |r| r.label());
            format!(
                "{:>4}  {:<24} {:<28} {:<14} {state}",
                u.id, u.name, u.email, role
            )
        });
        Ok(())
    }

    async fn appointments(&self, command: AppointmentsCommand) -> CliResult {
        self.open(Route::ManageAppointments)?;
        let controller = ListController::new(
            AppointmentResource::new(self.gateway.clone()),
            self.config.page_size,
        );

        match command {
            AppointmentsCommand::List {
                page,
                date,
                status,
                kind,
                veterinarian,
                pet,
            } => {
                let filter = AppointmentFilter {
                    date,
                    status,
                    kind,
                    veterinarian: veterinarian.map(VeterinarianId::new).transpose()?,
                    pet: pet.map(PetId::new).transpose()?,
                };
                let query = filter
                    .pairs()
                    .into_iter()
                    .fold(self.query(&page), |query, (key, value)| query.filter(key, value));
                let page = controller.load(query).await?;
                print_page(&page, |a| {
                    format!(
                        "{:>4}  {} {}  {:<12} {:<12} {}",
                        a.id, a.date, a.time, a.pet.name, a.kind, a.status.label()
                    )
                });
            }
            AppointmentsCommand::Cancel { id, observation } => {
                let note = ObservationForm { observation }.into();
                let action = AppointmentAction::Cancel(note);
                controller
                    .mutate(Mutation::Action(AppointmentId::new(id)?, action))
                    .await?;
                println!("Cita {id} cancelada");
            }
            AppointmentsCommand::Attend { id, observation } => {
                let note = ObservationForm { observation }.into();
                let action = AppointmentAction::Attend(note);
                controller
                    .mutate(Mutation::Action(AppointmentId::new(id)?, action))
                    .await?;
                println!("Cita {id} atendida");
            }
            AppointmentsCommand::Reschedule {
                id,
                date,
                time,
                reason,
            } => {
                let form = RescheduleForm { date, time, reason };
                controller.update_from(AppointmentId::new(id)?, form).await?;
                println!("Cita {id} reprogramada");
            }
        }
        Ok(())
    }
}

fn print_page<T>(page: &ListPage<T>, row: impl Fn(&T) -> String) {
    for item in &page.items {
        println!("{}", row(item));
    }
    let links: Vec<String> = page
        .page_links()
        .into_iter()
        .map(|link| match link {
            Some(n) if n == page.page => format!("[{n}]"),
            Some(n) => n.to_string(),
            None => "…".to_string(),
        })
        .collect();
    println!(
        "{} registros · página {}/{} · {}",
        page.total_count,
        page.page,
        page.total_pages().max(1),
        links.join(" ")
    );
}

fn report(err: &CliError) {
    if let Some(form) = err.form() {
        for (field, message) in form.field_errors().iter() {
            eprintln!("{field}: {message}");
        }
        return;
    }
    let message = match err {
        CliError::Controller(err) => err.user_message().map(str::to_string),
        CliError::Service(err) => err.user_message().map(str::to_string),
        _ => None,
    };
    eprintln!("{}", message.unwrap_or_else(|| err.to_string()));
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let app = match App::new(client_config) {
        Ok(app) => app,
        Err(err) => {
            log::error!("Error building API client: {err}");
            return ExitCode::FAILURE;
        }
    };

    match app.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
