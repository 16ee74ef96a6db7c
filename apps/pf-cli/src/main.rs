use clap::{Parser, Subcommand};
use pf_air::{MoistAirState, Quantity, parse_quantity, pressure_from_altitude};
use pf_app::profile_service::{self, ProfileSummary};
use pf_app::{
    AppError, AppResult, Site, SweepRequest, TextInput, build_chart, chart_to_csv,
    resolve_inputs, run_sweep, summarize, sweep_to_csv,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PsychroFlow CLI - Moist-air property calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Total pressure selection shared by several commands.
#[derive(clap::Args, Debug, Clone)]
struct SiteArgs {
    /// Absolute pressure with unit (e.g. "101.325 kPa", "14.7 psia")
    #[arg(long, conflicts_with = "altitude")]
    pressure: Option<String>,
    /// Altitude for a standard-atmosphere pressure (e.g. "1500 m", "5000 ft")
    #[arg(long)]
    altitude: Option<String>,
}

impl SiteArgs {
    fn site(&self) -> AppResult<Site> {
        Site::from_text(self.pressure.as_deref(), self.altitude.as_deref())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a full state from two known properties
    State {
        /// First input as <kind>=<value>, e.g. db=25C
        #[arg(long)]
        first: String,
        /// Second input as <kind>=<value>, e.g. rh=50%
        #[arg(long)]
        second: String,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Print standard-atmosphere pressure at an altitude
    Altitude {
        /// Altitude with unit (m, km, ft)
        altitude: String,
    },
    /// Resolve states across a range of one input (or of pressure)
    Sweep {
        /// Input to vary (db, wb, rh, dp, w, h) or p for pressure
        #[arg(long)]
        vary: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Held input as <kind>=<value>; give two when sweeping pressure
        #[arg(long, required = true)]
        hold: Vec<String>,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Export psychrometric chart curves as CSV
    Chart {
        /// Lowest dry bulb, e.g. "0 C"
        #[arg(long)]
        from: String,
        /// Highest dry bulb, e.g. "50 C"
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 51)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Manage saved profiles
    Profile {
        /// Profile library file (.yaml or .json)
        #[arg(long, default_value = "profiles.yaml")]
        library: PathBuf,
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List profiles in the library
    List,
    /// Show one profile and its resolved state
    Show { name: String },
    /// Resolve a profile (the current one if no name is given)
    Run { name: Option<String> },
    /// Save a profile and make it current
    Save {
        name: String,
        #[arg(long)]
        first: String,
        #[arg(long)]
        second: String,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Make a profile the current one
    Select { name: String },
    /// Remove a profile
    Remove { name: String },
    /// Export the library as JSON
    Export { path: PathBuf },
    /// Import profiles from a JSON export
    Import { path: PathBuf },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::State {
            first,
            second,
            site,
        } => cmd_state(&first, &second, &site.site()?),
        Commands::Altitude { altitude } => cmd_altitude(&altitude),
        Commands::Sweep {
            vary,
            from,
            to,
            points,
            hold,
            log,
            output,
            site,
        } => {
            let request = SweepRequest {
                vary,
                from,
                to,
                points,
                logarithmic: log,
                hold,
                site: site.site()?,
            };
            cmd_sweep(&request, output.as_deref())
        }
        Commands::Chart {
            from,
            to,
            points,
            output,
            site,
        } => cmd_chart(&site.site()?, &from, &to, points, output.as_deref()),
        Commands::Profile { library, command } => cmd_profile(&library, command),
    }
}

fn print_state(state: &MoistAirState) {
    for row in summarize(state) {
        println!("  {:<20} {:>12} {}", row.label, row.value, row.unit);
    }
}

fn cmd_state(first: &str, second: &str, site: &Site) -> AppResult<()> {
    let first = TextInput::parse(first)?;
    let second = TextInput::parse(second)?;
    let state = resolve_inputs(site, &first, &second)?;
    println!(
        "Moist air at {} from {} = {} and {} = {}:",
        site, first.kind, first.value.raw_text, second.kind, second.value.raw_text
    );
    print_state(&state);
    Ok(())
}

fn cmd_altitude(text: &str) -> AppResult<()> {
    let z = parse_quantity(text, Quantity::Altitude)?;
    let p = pressure_from_altitude(z)?;
    println!("{z:.1} m: {:.3} kPa ({p:.1} Pa)", p / 1e3);
    Ok(())
}

fn write_csv(csv: String, rows: usize, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} data points to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_sweep(request: &SweepRequest, output: Option<&Path>) -> AppResult<()> {
    let result = run_sweep(request)?;
    if result.num_failed > 0 {
        eprintln!(
            "{} of {} points could not be resolved and were skipped",
            result.num_failed,
            result.independent_values.len()
        );
    }
    write_csv(sweep_to_csv(&result), result.num_successful, output)
}

fn cmd_chart(site: &Site, from: &str, to: &str, points: usize, output: Option<&Path>) -> AppResult<()> {
    let data = build_chart(site, from, to, points)?;
    let rows = data.curves.iter().map(|c| c.points.len()).sum();
    write_csv(chart_to_csv(&data), rows, output)
}

fn print_summary(summary: &ProfileSummary) {
    let marker = if summary.is_current { "*" } else { " " };
    println!(
        "{} {:<24} {} = {}, {} = {} ({})",
        marker,
        summary.name,
        summary.first.0.tag(),
        summary.first.1,
        summary.second.0.tag(),
        summary.second.1,
        summary.site
    );
    if let Some(description) = &summary.description {
        println!("    {}", description);
    }
}

fn cmd_profile(library_path: &Path, command: ProfileCommands) -> AppResult<()> {
    let mut library = profile_service::load_library(library_path)?;

    match command {
        ProfileCommands::List => {
            let profiles = profile_service::list_profiles(&library);
            if profiles.is_empty() {
                println!("No profiles in {}", library_path.display());
            }
            for summary in &profiles {
                print_summary(summary);
            }
        }
        ProfileCommands::Show { name } => {
            let profile = profile_service::get_profile(&library, &name)?;
            if let Some(summary) = profile_service::list_profiles(&library)
                .iter()
                .find(|s| s.name == name)
            {
                print_summary(summary);
            }
            if let Some(created) = profile.created {
                println!("    created {}", created.to_rfc3339());
            }
            print_state(&profile_service::run_profile(profile)?);
        }
        ProfileCommands::Run { name } => {
            let profile = match name.as_deref() {
                Some(name) => profile_service::get_profile(&library, name)?,
                None => library.current_profile().ok_or_else(|| {
                    AppError::InvalidInput("no current profile; give a name".to_string())
                })?,
            };
            println!("Profile {}:", profile.name);
            print_state(&profile_service::run_profile(profile)?);
        }
        ProfileCommands::Save {
            name,
            first,
            second,
            description,
            site,
        } => {
            let profile = profile_service::build_profile(
                &name,
                description,
                site.site()?,
                &TextInput::parse(&first)?,
                &TextInput::parse(&second)?,
            )?;
            profile_service::save_profile(&mut library, profile);
            profile_service::save_library(library_path, &library)?;
            println!("✓ Saved profile {} to {}", name, library_path.display());
        }
        ProfileCommands::Select { name } => {
            profile_service::select_profile(&mut library, &name)?;
            profile_service::save_library(library_path, &library)?;
            println!("✓ Current profile is {}", name);
        }
        ProfileCommands::Remove { name } => {
            profile_service::remove_profile(&mut library, &name)?;
            profile_service::save_library(library_path, &library)?;
            println!("✓ Removed profile {}", name);
        }
        ProfileCommands::Export { path } => {
            profile_service::export_json(&library, &path)?;
            println!("✓ Exported {} profiles to {}", library.profiles.len(), path.display());
        }
        ProfileCommands::Import { path } => {
            let count = profile_service::import_json(&mut library, &path)?;
            profile_service::save_library(library_path, &library)?;
            println!("✓ Imported {} profiles from {}", count, path.display());
        }
    }
    Ok(())
}
