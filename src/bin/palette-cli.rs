use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "palette-cli")]
#[command(about = "Management CLI for the Palette Picker API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    Projects,
    /// Show one project
    Project { id: String },
    /// Create a project
    CreateProject { name: String },
    /// Rename a project
    RenameProject { id: String, name: String },
    /// Delete a project
    DeleteProject { id: i64 },
    /// List all palettes
    Palettes,
    /// Show one palette
    Palette { id: String },
    /// Find palettes using a color in any slot
    FindColor { color: String },
    /// Create a palette with five colors
    CreatePalette {
        #[arg(short, long)]
        project: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(num_args = 5, required = true)]
        colors: Vec<String>,
    },
    /// Overwrite one color slot (color1..color5) of a palette
    Recolor { id: String, slot: String, color: String },
    /// Delete a palette
    DeletePalette { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", cli.url.trim_end_matches('/'));
    let request = |method: Method, path: String| client.request(method, format!("{api}{path}"));

    let builder: RequestBuilder = match cli.command {
        Commands::Projects => request(Method::GET, "/projects".into()),
        Commands::Project { id } => request(Method::GET, format!("/projects/{id}")),
        Commands::CreateProject { name } => {
            request(Method::POST, "/projects".into()).json(&json!({ "name": name }))
        }
        Commands::RenameProject { id, name } => {
            request(Method::PUT, format!("/projects/{id}")).json(&json!({ "name": name }))
        }
        Commands::DeleteProject { id } => {
            request(Method::DELETE, "/projects".into()).json(&json!({ "id": id }))
        }
        Commands::Palettes => request(Method::GET, "/palettes".into()),
        Commands::Palette { id } => request(Method::GET, format!("/palettes/{id}")),
        Commands::FindColor { color } => request(Method::GET, "/palettes/chooseColors".into())
            .query(&[("chosenColor", color)]),
        Commands::CreatePalette { project, name, colors } => {
            let mut body = json!({ "project_id": project });
            for (i, color) in colors.into_iter().enumerate() {
                body[format!("color{}", i + 1)] = Value::String(color);
            }
            if let Some(name) = name {
                body["name"] = Value::String(name);
            }
            request(Method::POST, "/palettes".into()).json(&body)
        }
        Commands::Recolor { id, slot, color } => request(Method::PATCH, format!("/palettes/{id}"))
            .json(&json!({ "changeColor": slot, "newColor": color })),
        Commands::DeletePalette { id } => {
            request(Method::DELETE, "/palettes".into()).json(&json!({ "id": id }))
        }
    };

    print_response(builder.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => match body.get("error").and_then(Value::as_str) {
                Some(message) => eprintln!("{}", message),
                None => eprintln!("Response: {}", body),
            },
            Err(_) => eprintln!("Response: {}", text),
        }
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
