use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use solace_application::AppContext;
use solace_core::identity::{IdentityService, UserIdentity};
use solace_core::secret::SecretService;
use solace_infrastructure::{
    ConfigService, JsonIdentityRepository, JsonProfileRepository, SecretServiceImpl,
    StillImageCamera,
};
use solace_interaction::{GeminiCompanionAgent, GeminiFacialAnalyzer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Solace - emotional wellbeing companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Register a new account with this display name before signing in
        #[arg(long)]
        name: Option<String>,
        /// JPEG file used as the sensing camera source; sensing stays off
        /// without it
        #[arg(long)]
        camera_image: Option<PathBuf>,
    },
    /// Show the mood insights dashboard
    Insights {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear all stored data for the account (the identity is kept)
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chat {
            email,
            password,
            name,
            camera_image,
        } => chat(email, password, name, camera_image).await,
        Commands::Insights { email, password } => insights(email, password).await,
        Commands::Reset { email, password } => reset(email, password).await,
    }
}

async fn open_repositories() -> Result<(Arc<JsonProfileRepository>, JsonIdentityRepository)> {
    let profiles = Arc::new(
        JsonProfileRepository::default_location()
            .await
            .context("Failed to open profile storage")?,
    );
    let identities = JsonIdentityRepository::default_location(profiles.clone())
        .await
        .context("Failed to open identity storage")?;
    Ok((profiles, identities))
}

async fn resolve_identity(
    identities: &JsonIdentityRepository,
    email: &str,
    password: &str,
    register_name: Option<&str>,
) -> Result<UserIdentity> {
    match register_name {
        Some(name) => match identities.register(name, email, password).await {
            Some(identity) => Ok(identity),
            None => bail!("Email already registered."),
        },
        None => match identities.login(email, password).await {
            Some(identity) => Ok(identity),
            None => bail!("Invalid email or password."),
        },
    }
}

async fn chat(
    email: String,
    password: String,
    name: Option<String>,
    camera_image: Option<PathBuf>,
) -> Result<()> {
    let (profiles, identities) = open_repositories().await?;
    let identity = resolve_identity(&identities, &email, &password, name.as_deref()).await?;

    let config = ConfigService::new().get_config();
    let secret_service =
        SecretServiceImpl::default_location().context("Failed to locate secret file")?;
    secret_service
        .ensure_secret_file()
        .context("Failed to create secret file template")?;

    let responder = Arc::new(
        GeminiCompanionAgent::try_from_secrets(&config.companion)
            .await
            .context("Gemini credentials missing; fill in secret.json")?,
    );

    let mut ctx = AppContext::new(identity, profiles, responder, config);

    if let Some(image_path) = camera_image {
        let secrets = secret_service
            .load_secrets()
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        let api_key = secrets
            .gemini
            .map(|g| g.api_key)
            .unwrap_or_default();
        let camera = Arc::new(StillImageCamera::new(image_path));
        let analyzer = Arc::new(GeminiFacialAnalyzer::with_default_model(api_key));
        if ctx.start_sensing(camera, analyzer).await {
            println!("(sensing active)");
        } else {
            println!("(sensing paused)");
        }
    }

    for message in ctx.conversation().ensure_welcome().await? {
        match message.role {
            solace_core::profile::MessageRole::User => println!("you> {}", message.text),
            solace_core::profile::MessageRole::Companion => println!("solace> {}", message.text),
        }
    }

    let mut editor = rustyline::DefaultEditor::new()?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim() == "/quit" {
            break;
        }

        match ctx.conversation().send_user_message(&line).await? {
            Some(reply) => println!("solace> {}", reply.text),
            // Blank input or a dropped completion: nothing to show.
            None => {}
        }
    }

    ctx.teardown().await;
    Ok(())
}

async fn insights(email: String, password: String) -> Result<()> {
    let (profiles, identities) = open_repositories().await?;
    let identity = resolve_identity(&identities, &email, &password, None).await?;

    let ledger = solace_application::MoodLedger::new(profiles);
    let insights = ledger.insights(&identity.id).await;

    println!(
        "Dominant emotion: {}",
        insights.top_mood.as_deref().unwrap_or("Unknown")
    );
    println!("Based on {} snapshots.", insights.total);

    if !insights.mood_counts.is_empty() {
        println!("\nEmotion breakdown:");
        for (emotion, _count) in &insights.mood_counts {
            if let Some(share) = insights.share(emotion) {
                println!("  {:<12} {:>3.0}%", emotion, share * 100.0);
            }
        }
    }

    if !insights.daily_trend.is_empty() {
        println!("\nDaily trend:");
        for (date, count) in &insights.daily_trend {
            println!("  {}  {}", date, "#".repeat(*count as usize));
        }
    }

    Ok(())
}

async fn reset(email: String, password: String) -> Result<()> {
    use solace_core::profile::ProfileRepository;

    let (profiles, identities) = open_repositories().await?;
    let identity = resolve_identity(&identities, &email, &password, None).await?;

    profiles.reset(&identity.id).await?;
    println!("All stored data cleared for {}.", identity.email);
    Ok(())
}
