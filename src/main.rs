use clap::{Parser, Subcommand};
use domain::{ApiResponse, ZoomClient};
use domain::zoom::{http_transport, CreateMeetingRequest, ListRecordingsRequest};
use log::{debug, error};
use meeting_auth::credentials::{Credentials, StaticCredentialStore};
use secrecy::SecretString;
use serde_json::{Map, Value};
use service::config::{self, Config};
use service::logging::Logger;
use std::error::Error as StdError;

type CliResult<T> = Result<T, Box<dyn StdError + Send + Sync>>;

#[derive(Parser)]
#[command(name = "zoom_conference")]
#[command(about = "Command line client for the Zoom REST API")]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Print `true` / body / `false` instead of the tagged outcome
    #[arg(long)]
    legacy: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of users on the account
    ListUsers {
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Filter by status: active, inactive or pending
        #[arg(long)]
        status: Option<String>,
    },
    GetUser { user_id: String },
    DeleteUser { user_id: String },
    /// List the scheduled meetings of a host
    ListMeetings { host_id: String },
    /// Schedule a meeting from a JSON form mapping
    CreateMeeting { input: String },
    GetMeeting { meeting_id: String },
    /// List the ended instances of a meeting
    PastMeetingInstances { meeting_id: String },
    DeleteMeeting { meeting_id: String },
    ListWebinars { user_id: String },
    ListRegistrants { webinar_id: String },
    /// List a host's cloud recordings (defaults to the last 12 months)
    ListRecordings {
        host_id: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    MeetingRecordings { meeting_id: String },
    DailyReport { month: u32, year: i32 },
    AccountReport { from: String, to: String },
    /// Send an arbitrary request; unknown methods are sent as POST
    Raw {
        method: String,
        path: String,
        /// JSON payload (query parameters for GET, body otherwise)
        #[arg(long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    config::load_dotenv();
    let cli = Cli::parse();
    if let Err(e) = Logger::init_logger(&cli.config) {
        eprintln!("Failed to start logger: {e}");
    }

    let client = match build_client(&cli.config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to set up API client: {e}");
            std::process::exit(1);
        }
    };

    let response = match run(&client, cli.command).await {
        Ok(response) => response,
        Err(e) => {
            error!("Request not sent: {e}");
            std::process::exit(1);
        }
    };

    if cli.legacy {
        println!("{}", pretty(&response.to_legacy_value()));
        return;
    }

    match response {
        ApiResponse::Success(body) => println!("{}", pretty(&body)),
        ApiResponse::EmptyOk => println!("OK (no content)"),
        ApiResponse::Failure(reason) => {
            error!("Request failed: {reason:?}");
            std::process::exit(1);
        }
    }
}

async fn build_client(config: &Config) -> CliResult<ZoomClient> {
    let store = match (config.zoom_api_key(), config.zoom_api_secret()) {
        (Some(key), Some(secret)) => StaticCredentialStore::new(Credentials::new(
            key,
            SecretString::new(secret.to_string()),
        )),
        _ => StaticCredentialStore::empty(),
    };

    let transport = http_transport(config.request_timeout())?;

    let mut client = ZoomClient::from_store(&store, transport).await?;
    if let Some(base_url) = config.zoom_base_url() {
        client = client.with_base_url(base_url);
    }
    debug!("Using API base URL {}", client.base_url());
    Ok(client)
}

async fn run(client: &ZoomClient, command: Command) -> CliResult<ApiResponse> {
    let response = match command {
        Command::ListUsers { page, status } => {
            let mut filters = Map::new();
            if let Some(status) = status {
                filters.insert("status".to_string(), Value::String(status));
            }
            client.list_users(page, filters).await?
        }
        Command::GetUser { user_id } => client.get_user_info(&user_id).await?,
        Command::DeleteUser { user_id } => client.delete_user(&user_id).await?,
        Command::ListMeetings { host_id } => client.list_meetings(&host_id).await?,
        Command::CreateMeeting { input } => {
            let request = CreateMeetingRequest::from_value(serde_json::from_str(&input)?)?;
            client.create_meeting(&request).await?
        }
        Command::GetMeeting { meeting_id } => client.get_meeting_info(&meeting_id).await?,
        Command::PastMeetingInstances { meeting_id } => {
            client.get_past_meeting_instances(&meeting_id).await?
        }
        Command::DeleteMeeting { meeting_id } => client.delete_meeting(&meeting_id).await?,
        Command::ListWebinars { user_id } => client.list_webinars(&user_id).await?,
        Command::ListRegistrants { webinar_id } => {
            client.list_webinar_registrants(&webinar_id).await?
        }
        Command::ListRecordings { host_id, from, to } => {
            let request = ListRecordingsRequest {
                from,
                to,
                ..Default::default()
            };
            client.list_recordings(&host_id, &request).await?
        }
        Command::MeetingRecordings { meeting_id } => {
            client.recordings_by_meeting(&meeting_id).await?
        }
        Command::DailyReport { month, year } => client.get_daily_report(month, year).await?,
        Command::AccountReport { from, to } => client.get_account_report(&from, &to).await?,
        Command::Raw {
            method,
            path,
            payload,
        } => {
            let payload = match payload {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Null,
            };
            client.dispatch_verb(&path, &method, payload).await?
        }
    };
    Ok(response)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
