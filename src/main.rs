use clap::{Parser, Subcommand};
use std::path::Path;

use phonebook::application::view::TableView;
use phonebook::infrastructure::adapters::ConsoleWindow;
use phonebook::{Config, ContactStore, PhonebookError, Store};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "A phonebook backed by a single contact table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "phonebook.yaml")]
    config: String,

    /// Database file (overrides config)
    #[arg(short, long)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the phonebook window
    Run,
    /// Create the contact table, seeding it if first-init is set
    InitDb,
    /// Print every contact
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print contacts containing a term in any field
    Search {
        term: String,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("phonebook v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        command => {
            let config = load_config(&cli.config, cli.database.as_deref());
            match command {
                Commands::Run => run_window(&config),
                Commands::InitDb => init_db(&config),
                Commands::List { json } => list_contacts(&config, json),
                Commands::Search { term, json } => search_contacts(&config, &term, json),
                Commands::Version | Commands::InitConfig => Ok(()),
            }
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, database: Option<&str>) -> Config {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    if let Err(e) = config.apply_env() {
        tracing::warn!("Ignoring environment override: {}", e);
    }

    if let Some(db) = database {
        config.database.name = db.into();
    }

    config
}

fn run_window(config: &Config) -> Result<(), PhonebookError> {
    let store = ContactStore::from_config(config);

    // A failed initialization leaves the window usable; errors show per action.
    match store.initialize() {
        Ok(0) => {}
        Ok(seeded) => {
            tracing::info!("Seeded {} contacts", seeded);
            tracing::warn!("first-init is still enabled; set it to false or the seed file loads again next start");
        }
        Err(e) => tracing::error!("Failed to initialize database: {}", e),
    }

    let stdin = std::io::stdin();
    let mut window = ConsoleWindow::new(
        config.window.title.clone(),
        store,
        stdin.lock(),
        std::io::stdout(),
    );
    window.run()
}

fn init_db(config: &Config) -> Result<(), PhonebookError> {
    let store = ContactStore::from_config(config);
    let seeded = store.initialize()?;
    println!(
        "Database {} initialized ({} contacts seeded)",
        store.config().describe(),
        seeded
    );
    Ok(())
}

/// Store that only creates the table if missing, never seeds
fn open_store(config: &Config) -> Result<ContactStore, PhonebookError> {
    let store = ContactStore::new(config.database.clone());
    store.initialize()?;
    Ok(store)
}

fn list_contacts(config: &Config, json: bool) -> Result<(), PhonebookError> {
    let store = open_store(config)?;
    let table = TableView::collect(store.list_all()?)?;
    print_table(&table, json)
}

fn search_contacts(config: &Config, term: &str, json: bool) -> Result<(), PhonebookError> {
    let store = open_store(config)?;
    let table = TableView::collect(store.search(term)?)?;
    print_table(&table, json)
}

fn print_table(table: &TableView, json: bool) -> Result<(), PhonebookError> {
    if json {
        println!("{}", table.to_json()?);
    } else {
        print!("{}", table.render());
    }
    Ok(())
}

fn init_config() -> Result<(), PhonebookError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| phonebook::application::errors::ConfigError::Parse(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to phonebook.yaml and adjust as needed.");
    Ok(())
}
