use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use farbe::{ColorMode, GeneratorFunction, InterpolationModel};
use farbvelo::api;
use farbvelo::assets::AssetLoader;
use farbvelo::models::{AppConfig, ExportFormat, QuantizationMethod, Settings};
use farbvelo::rendering::Swatch;
use farbvelo::server;
use farbvelo::services::{
    settings_codec, ColorPizzaClient, FileStore, InMemoryHistory, NameCache, PaletteSession,
    SessionOptions, TerminalPreference,
};

const DEFAULT_STATE_FILE: &str = ".farbvelo-state.json";

#[derive(Parser)]
#[command(name = "farbvelo")]
#[command(about = "Farbvelo - seeded color palette generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Generate a palette, continuing from the persisted settings
    Generate {
        /// Seed string (regenerates the palette from it)
        #[arg(short, long)]
        seed: Option<String>,

        /// Settings token from a share link
        #[arg(short, long)]
        token: Option<String>,

        /// Draw a new random seed
        #[arg(short, long)]
        new: bool,

        /// Number of palette colors (3-10)
        #[arg(short, long)]
        amount: Option<i64>,

        /// Interpolation color model (lab, oklab, spectral, rgb, lrgb, hcl, hsl, hsv, hsi, oklch)
        #[arg(short, long)]
        model: Option<InterpolationModel>,

        /// Print an export (list, csvList, jsArray, jsObject, css, cssGradient)
        #[arg(short, long)]
        export: Option<ExportFormat>,

        /// Write the mirrored palette as a PNG swatch
        #[arg(long)]
        png: Option<PathBuf>,

        /// Write the mirrored palette as an SVG swatch
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Skip the color name service
        #[arg(long)]
        offline: bool,
    },
    /// Encode and decode share tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
    /// Write the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Build a token from defaults and the given values
    Encode {
        #[arg(short, long)]
        seed: Option<String>,
        #[arg(short, long)]
        amount: Option<i64>,
        #[arg(long)]
        colors_in_gradient: Option<i64>,
        #[arg(short, long)]
        padding: Option<f64>,
        #[arg(long)]
        min_hue_distance: Option<i64>,
        #[arg(short, long)]
        model: Option<InterpolationModel>,
        #[arg(short, long)]
        generator: Option<GeneratorFunction>,
        #[arg(short, long)]
        color_mode: Option<ColorMode>,
        #[arg(short, long)]
        quantization: Option<QuantizationMethod>,
        #[arg(short, long)]
        random_order: bool,
    },
    /// Show the settings a token carries
    Decode { token: String },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Farbvelo API",
        description = "Seeded color palettes, their mirrored views, contrast and exports",
        version = "0.12.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_palette,
        api::handle_export,
        api::handle_svg,
        api::handle_png,
        api::handle_settings,
        api::handle_create_token,
        api::handle_lists,
    ),
    components(schemas(
        api::PaletteResponse,
        api::PaletteColor,
        api::MirroredPalette,
        api::SettingsResponse,
        api::TokenResponse,
        farbvelo::models::Settings,
        farbvelo::services::NameList,
    )),
    tags(
        (name = "Palette", description = "Palette generation and export"),
        (name = "Settings", description = "Settings tokens"),
        (name = "Names", description = "Color name lists")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            seed,
            token,
            new,
            amount,
            model,
            export,
            png,
            svg,
            offline,
        }) => {
            run_generate_command(GenerateArgs {
                seed,
                token,
                new,
                amount,
                model,
                export,
                png,
                svg,
                offline,
            })
            .await
        }
        Some(Commands::Token { command }) => run_token_command(command),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farbvelo=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_file() -> Option<PathBuf> {
    std::env::var("CONFIG_FILE").ok().map(PathBuf::from)
}

fn state_file() -> PathBuf {
    std::env::var("STATE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE))
}

struct GenerateArgs {
    seed: Option<String>,
    token: Option<String>,
    new: bool,
    amount: Option<i64>,
    model: Option<InterpolationModel>,
    export: Option<ExportFormat>,
    png: Option<PathBuf>,
    svg: Option<PathBuf>,
    offline: bool,
}

/// Generate a palette from the persisted settings and print it
async fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    init_cli_logging();

    let asset_loader = AssetLoader::new(config_file());
    let config = AppConfig::load_from_assets(&asset_loader);
    let store = Arc::new(FileStore::new(state_file()));

    let mut session = PaletteSession::restore(
        store,
        InMemoryHistory::new(args.token),
        &TerminalPreference::from_env(),
        SessionOptions::from_config(&config),
    );

    if args.new {
        session.new_colors(true);
    }
    if let Some(seed) = args.seed {
        session.update(|s| s.current_seed = seed);
        session.new_colors(false);
    }
    session.update(|s| {
        if let Some(amount) = args.amount {
            s.amount = amount;
        }
        if let Some(model) = args.model {
            s.interpolation_color_model = model;
        }
    });

    if session.take_image_request().is_some() {
        eprintln!("Image extraction is not available here; showing the fallback palette.");
    }

    if !args.offline {
        let cache = Arc::new(NameCache::new(Duration::from_secs(
            config.names.cache_ttl_secs,
        )));
        let client = ColorPizzaClient::new(config.names.clone(), cache)?;
        if !session.resolve_names(&client).await {
            eprintln!("Color names unavailable; showing hex values.");
        }
    }

    println!("{}\n", session.title());
    for (color, name) in session.palette().iter().zip(session.names()) {
        println!("  {}  {name}", color.to_hex());
    }
    println!("\nSeed:  {}", session.settings().current_seed);
    println!("Share: {}", session.share_url());

    if let Some(format) = args.export {
        println!("\n{}", session.export(format));
    }

    let colors = session.mirrored().colors;
    if let Some(path) = args.svg {
        std::fs::write(&path, Swatch::default().to_svg(&colors))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = args.png {
        let png = Swatch::default().to_png(&colors)?;
        std::fs::write(&path, png)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn run_token_command(command: TokenCommands) -> anyhow::Result<()> {
    init_cli_logging();
    let config = AppConfig::load_from_assets(&AssetLoader::new(config_file()));

    match command {
        TokenCommands::Encode {
            seed,
            amount,
            colors_in_gradient,
            padding,
            min_hue_distance,
            model,
            generator,
            color_mode,
            quantization,
            random_order,
        } => {
            let mut settings = seed.map(Settings::with_seed).unwrap_or_default();
            if let Some(amount) = amount {
                settings.amount = amount;
            }
            if let Some(colors) = colors_in_gradient {
                settings.colors_in_gradient = colors;
            }
            if let Some(padding) = padding {
                settings.padding = padding;
            }
            if let Some(distance) = min_hue_distance {
                settings.min_hue_distance = distance;
            }
            if let Some(model) = model {
                settings.interpolation_color_model = model;
            }
            if let Some(generator) = generator {
                settings.generator_function = generator;
            }
            if let Some(mode) = color_mode {
                settings.color_mode = mode;
            }
            if let Some(method) = quantization {
                settings.quantization_method = method;
            }
            settings.random_order = random_order;
            settings.normalize();

            let token = settings_codec::encode_url_token(&settings);
            println!("{token}");
            println!("{}", config.share_url(&token));
        }
        TokenCommands::Decode { token } => {
            let decoded = settings_codec::decode_url_token(&token)?;
            println!("{}", serde_json::to_string_pretty(&decoded.patch)?);
            if decoded.background_intro {
                println!("(background intro)");
            }
        }
    }
    Ok(())
}

fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::new(config_file());
    let report = loader.init(force)?;

    for path in &report.written {
        println!("Wrote {path}");
    }
    for path in &report.skipped {
        println!("Skipped {path} (exists, use --force to overwrite)");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file_var = std::env::var("CONFIG_FILE").ok();
    let state_file_var = std::env::var("STATE_FILE").ok();

    println!("Farbvelo v{VERSION}");
    println!("Seeded color palette generator\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file_var.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATE_FILE  = {}",
        state_file_var
            .as_deref()
            .unwrap_or(concat!(".farbvelo-state.json", " (default)"))
    );

    let loader = AssetLoader::new(config_file());
    let config = AppConfig::load_from_assets(&loader);

    println!("\nConfiguration:");
    println!("  Config:      {}", loader.config_source());
    println!("  Name API:    {}", config.names.api_url);
    println!("  Share base:  {}", config.share.base_url);
    println!("  Storage key: {}", config.storage.key);

    println!("\nCommands:");
    println!("  farbvelo serve                  Start the HTTP server");
    println!("  farbvelo generate [--new]       Generate a palette");
    println!("  farbvelo token encode|decode    Work with share tokens");
    println!("  farbvelo init [--force]         Write config.yaml for customization");
    println!("  farbvelo --help                 Show all options");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farbvelo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = config_file();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let asset_loader = Arc::new(AssetLoader::new(config_file));
    tracing::info!(config = %asset_loader.config_source(), "Asset sources configured");

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Farbvelo server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
