use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cvtailor::{
    Config, Customizer, Generator, JobFile, JobRequest, Profile, ProfileStore, Scorer,
    TypstRenderer,
};

#[derive(Parser)]
#[command(name = "cvtailor")]
#[command(about = "Render your résumé to PDF, tailored to a job")]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = "cvtailor.toml")]
    config: PathBuf,

    /// Profile file (.toml or .json), overrides the config
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a CV tailored to one job
    Generate {
        #[command(flatten)]
        job: JobArgs,

        /// Output directory, overrides the config
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Generate one CV per [[job]] entry in a TOML file
    Batch {
        jobs: PathBuf,

        /// Output directory, overrides the config
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the tailored Typst markup instead of compiling a PDF
    Preview {
        #[command(flatten)]
        job: JobArgs,
    },
    /// Write the built-in profile to the profile path for editing
    Init {
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Job title, e.g. "Data Analyst"
    #[arg(short, long)]
    title: String,

    /// Keywords from the job description (repeatable or comma separated)
    #[arg(short, long = "keyword", value_delimiter = ',')]
    keywords: Vec<String>,
}

impl JobArgs {
    fn request(&self) -> JobRequest {
        JobRequest::new(self.title.clone(), &self.keywords)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cvtailor::Result<()> {
    let config = Config::load(&cli.config)?;
    let profile_path = cli.profile.unwrap_or_else(|| config.paths.profile.clone());
    let store = ProfileStore::new(profile_path, Profile::builtin()?);

    match cli.command {
        Command::Init { force } => {
            if store.exists() && !force {
                eprintln!(
                    "{} already exists, pass --force to overwrite",
                    store.path().display()
                );
                return Ok(());
            }
            store.save(&Profile::builtin()?)?;
            println!("Created {}", store.path().display());
        }
        Command::Preview { job } => {
            let customizer = Customizer::new(Scorer::new(config.matching.strategy));
            let customized = customizer.customize(&store.load()?, &job.request());
            let markup = cvtailor::profile_to_typst(&customized, &config);
            io::stdout().write_all(markup.as_bytes())?;
        }
        Command::Generate { job, output_dir } => {
            let generator = generator(&config, &store, output_dir)?;
            let path = generator.generate(&job.request())?;
            println!("Created {}", path.display());
        }
        Command::Batch { jobs, output_dir } => {
            let requests = JobFile::load(&jobs)?.requests();
            let generator = generator(&config, &store, output_dir)?;
            info!(count = requests.len(), "generating CVs");
            for path in generator.generate_all(&requests)? {
                println!("Created {}", path.display());
            }
        }
    }

    Ok(())
}

fn generator(
    config: &Config,
    store: &ProfileStore,
    output_dir: Option<PathBuf>,
) -> cvtailor::Result<Generator<TypstRenderer>> {
    let output_dir = output_dir.unwrap_or_else(|| config.paths.output_dir.clone());
    Ok(Generator::new(
        store.load()?,
        Customizer::new(Scorer::new(config.matching.strategy)),
        TypstRenderer::new(config.clone()),
        output_dir,
    ))
}
