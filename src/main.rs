use std::fmt::Write;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{arg, Parser, ValueEnum};
use spdlog::error;

use pressed::config::read_config;
use pressed::generator::run_generator;
use pressed::logger::configure_logger;
use pressed::text_utils::slugify;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Generate the site from the drafts directory
    Build(BuildArgs),
    /// Scaffold a new draft
    New(NewArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BuildArgs {
    /// Path of the configuration file
    #[arg(short, long, default_value = "pressed.toml")]
    config: PathBuf,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    author: Option<String>,

    /// Draft generation options
    #[arg(short, long, default_value_t = DraftOutput::Stdout)]
    output: DraftOutput,
}

#[derive(Clone, Debug, ValueEnum)]
enum DraftOutput {
    /// Writes the new draft to the stdout
    Stdout,
    /// Writes the new draft to <slug>.md
    File,
}

impl Display for DraftOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftOutput::Stdout => write!(f, "stdout"),
            DraftOutput::File => write!(f, "file"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args {
        Args::Build(args) => build_cmd(args),
        Args::New(args) => new_cmd(args),
    }
}

fn build_cmd(args: BuildArgs) -> ExitCode {
    let config = match read_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = configure_logger(&config) {
        eprintln!("Error configuring logger: {}", e);
        return ExitCode::FAILURE;
    }

    match run_generator(&config) {
        Ok(summary) => {
            if summary.failures.is_empty() {
                return ExitCode::SUCCESS;
            }
            for failure in &summary.failures {
                error!("Draft {} failed: {}", failure.file_name.display(), failure.reason);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Error generating blog pages: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn get_author(args: &NewArgs) -> String {
    if let Some(ref author) = args.author {
        return author.clone();
    }

    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

fn render_draft(title: &str, author: &str, date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: \"{}\"", title);
    let _ = writeln!(&mut buf, "date: {}", date);
    let _ = writeln!(&mut buf, "description:");
    let _ = writeln!(&mut buf, "author: {}", author);
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

fn new_cmd(args: NewArgs) -> ExitCode {
    let author = get_author(&args);
    let date = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let draft = render_draft(&args.title, &author, &date);

    match args.output {
        DraftOutput::Stdout => {
            println!("{}", draft);
            ExitCode::SUCCESS
        }
        DraftOutput::File => {
            let file_name = format!("{}.md", slugify(&args.title));
            match fs::write(&file_name, draft) {
                Ok(()) => {
                    println!("Created draft {}", file_name);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error creating draft {}: {}", file_name, e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
