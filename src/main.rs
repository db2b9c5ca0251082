use std::path::PathBuf;

use clap::Parser;

use pyforge::{console, AppError, BuildOptions, Director};

#[derive(Parser)]
#[command(name = "pyforge")]
#[command(version)]
#[command(about = "Bootstrap Python projects with a virtualenv, pinned dependencies, and a Django skeleton")]
struct Cli {
    /// Project name. Defaults to the target directory's name.
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Target directory. Defaults to the current working directory.
    #[arg(short = 'd', long = "directory")]
    directory: Option<PathBuf>,

    /// Python version written to .python-version.
    #[arg(short = 'v', long = "python-version")]
    python_version: String,

    /// Template to scaffold. Prompted interactively when omitted.
    #[arg(short = 't', long)]
    template: Option<String>,

    /// Install the black formatter and isort into the environment.
    #[arg(short = 'f', long)]
    format: bool,

    /// Install Django REST framework.
    #[arg(long = "with-drf")]
    with_drf: bool,

    /// Write a .env file at the project root.
    #[arg(long = "env-file")]
    env_file: bool,

    /// Write an empty Makefile at the project root.
    #[arg(long)]
    makefile: bool,

    /// Write a Poetry pyproject.toml for the project.
    #[arg(long)]
    poetry: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let project_path = match cli.directory {
        Some(directory) => directory,
        None => std::env::current_dir()?,
    };

    let project_name = match cli.name {
        Some(name) => name,
        None => project_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let template = match cli.template {
        Some(template) => template,
        None => console::ask_template()?,
    };

    let options = BuildOptions {
        project_name: project_name.clone(),
        project_path: project_path.clone(),
        python_version: cli.python_version,
        template,
        format: cli.format,
        with_drf: cli.with_drf,
        env_file: cli.env_file,
        makefile: cli.makefile,
        poetry: cli.poetry,
    };

    let mut director = Director::new(options)?;
    director.run(&mut |message| console::progress_line(message))?;

    console::final_message(&project_path, &project_name)
}
