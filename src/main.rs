use clap::Parser;
use postpage::application::{parse_variable, render_template, BuildOptions, BuildSiteService};
use postpage::cli::{format_filter_list, Cli, Commands};
use postpage::domain::{FilterRegistry, Template};
use postpage::error::SiteError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "build failed");
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), SiteError> {
    match cli.command {
        Some(Commands::Build(args)) => build(args.into()),
        Some(Commands::Render { template, vars }) => {
            let vars = vars
                .iter()
                .map(|v| parse_variable(v))
                .collect::<Result<Vec<_>, _>>()?;

            let output = render_template(&template, &vars)?;
            print!("{}", output);
            Ok(())
        }
        Some(Commands::Filters) => {
            let registry = FilterRegistry::builtin(Template::from_builtin("post.html")?);
            print!("{}", format_filter_list(&registry.names()));
            Ok(())
        }
        // No command: build with the top-level options
        None => build(cli.build.into()),
    }
}

fn build(options: BuildOptions) -> Result<(), SiteError> {
    let path = BuildSiteService::new(options).execute()?;
    println!("Wrote {}", path.display());
    Ok(())
}
