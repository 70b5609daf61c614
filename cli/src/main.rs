use clap::{Args, Parser, Subcommand};
use companions::{CATEGORY_PARAM, Companion, CompanionInput, CompanionQuery, NAME_PARAM, validate_companion};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --session-token or set COMPANION_SESSION_TOKEN")]
    MissingSessionToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid companion: {0}")]
    Invalid(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "companion-cli", about = "Companion API CLI")]
struct Cli {
    #[arg(long, env = "COMPANION_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "COMPANION_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Show the signed-in user.
    Me,
    Companion(CompanionCommand),
    Category(CategoryCommand),
    Billing(BillingCommand),
}

#[derive(Args, Debug)]
struct CompanionCommand {
    #[command(subcommand)]
    command: CompanionSubcommand,
}

#[derive(Subcommand, Debug)]
enum CompanionSubcommand {
    List {
        #[arg(long)]
        category_id: Option<Uuid>,
        #[arg(long)]
        name: Option<String>,
    },
    Read {
        companion_id: Uuid,
    },
    Create(CompanionFields),
    /// Overwrite the given fields of an owned companion, keeping the rest.
    Update {
        companion_id: Uuid,
        #[command(flatten)]
        fields: CompanionFields,
    },
    Delete {
        companion_id: Uuid,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct CompanionFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    src: Option<String>,
    #[arg(long)]
    category_id: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    seed: Option<String>,
}

#[derive(Args, Debug)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
enum CategorySubcommand {
    List,
}

#[derive(Args, Debug)]
struct BillingCommand {
    #[command(subcommand)]
    command: BillingSubcommand,
}

#[derive(Subcommand, Debug)]
enum BillingSubcommand {
    /// Print the checkout or billing-portal URL for the signed-in user.
    Url,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, session_token: cli.session_token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Me => {
            let json = api_request(&ctx, reqwest::Method::GET, "/api/auth/me", None::<&()>).await?;
            print_json(&json)
        }
        Command::Companion(companion) => run_companion(&ctx, companion).await,
        Command::Category(category) => match category.command {
            CategorySubcommand::List => {
                let json = api_request(&ctx, reqwest::Method::GET, "/api/category", None::<&()>).await?;
                print_json(&json)
            }
        },
        Command::Billing(billing) => match billing.command {
            BillingSubcommand::Url => {
                let json = api_request(&ctx, reqwest::Method::GET, "/api/stripe", None::<&()>).await?;
                let url = json.get("url").and_then(Value::as_str).unwrap_or_default();
                println!("{url}");
                Ok(())
            }
        },
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(api_url(&cli.base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_companion(cli: &CliContext, companion: CompanionCommand) -> Result<(), CliError> {
    match companion.command {
        CompanionSubcommand::List { category_id, name } => {
            let params = companion_list_params(&CompanionQuery {
                category_id: category_id.map(|id| id.to_string()),
                name: name.filter(|n| !n.trim().is_empty()),
            });
            let json = api_request_with_query(cli, reqwest::Method::GET, "/api/companion", &params, None::<&()>).await?;
            print_json(&json)
        }
        CompanionSubcommand::Read { companion_id } => {
            let path = format!("/api/companion/{companion_id}");
            let json = api_request(cli, reqwest::Method::GET, &path, None::<&()>).await?;
            print_json(&json)
        }
        CompanionSubcommand::Create(fields) => {
            let input = checked_input(fields.apply(CompanionInput::default()))?;
            let json = api_request(cli, reqwest::Method::POST, "/api/companion", Some(&input)).await?;
            print_json(&json)
        }
        CompanionSubcommand::Update { companion_id, fields } => {
            let path = format!("/api/companion/{companion_id}");
            let current: Companion =
                serde_json::from_value(api_request(cli, reqwest::Method::GET, &path, None::<&()>).await?)?;
            let input = checked_input(fields.apply(current.input()))?;
            let json = api_request(cli, reqwest::Method::PATCH, &path, Some(&input)).await?;
            print_json(&json)
        }
        CompanionSubcommand::Delete { companion_id } => {
            let path = format!("/api/companion/{companion_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None::<&()>).await?;
            println!("deleted {companion_id}");
            Ok(())
        }
    }
}

impl CompanionFields {
    /// Overlay the fields given on the command line onto `base`.
    fn apply(self, mut base: CompanionInput) -> CompanionInput {
        let Self { name, description, src, category_id, instructions, seed } = self;
        for (slot, value) in [
            (&mut base.name, name),
            (&mut base.description, description),
            (&mut base.src, src),
            (&mut base.category_id, category_id),
            (&mut base.instructions, instructions),
            (&mut base.seed, seed),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        base
    }
}

/// Apply the form rules locally so a bad companion never reaches the server.
fn checked_input(input: CompanionInput) -> Result<CompanionInput, CliError> {
    validate_companion(&input).map_err(|errors| {
        let joined = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        CliError::Invalid(joined)
    })?;
    Ok(input)
}

fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Query pairs for `GET /api/companion`. Absent filters are omitted.
fn companion_list_params(query: &CompanionQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(id) = &query.category_id {
        params.push((CATEGORY_PARAM, id.clone()));
    }
    if let Some(name) = &query.name {
        params.push((NAME_PARAM, name.clone()));
    }
    params
}

async fn api_request<B: Serialize + ?Sized>(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<&B>,
) -> Result<Value, CliError> {
    api_request_with_query(cli, method, path, &[], body).await
}

async fn api_request_with_query<B: Serialize + ?Sized>(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    query: &[(&str, String)],
    body: Option<&B>,
) -> Result<Value, CliError> {
    let session_token = cli.session_token.as_deref().ok_or(CliError::MissingSessionToken)?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&format!("session_token={session_token}"))?);

    let client = reqwest::Client::builder().default_headers(headers).build()?;
    let request = client.request(method, api_url(&cli.base_url, path)).query(query);
    let request = if let Some(json) = body { request.json(json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: value.to_string() });
    }

    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
