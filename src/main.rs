use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tidemark::generate::{self, Site};
use tidemark::view::{PageView, SimulatedWindow, UiEvent};
use tidemark::{config, output};

#[derive(Parser)]
#[command(name = "tidemark")]
#[command(about = "Static site generator for a web design agency")]
#[command(long_about = "\
Static site generator for a web design agency

Renders the homepage, the /web-design service page, one landing page per
town the agency covers, and markdown content pages. Every page carries the
navigation its first visitor sees; a small script takes over from there.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── towns.toml                   # Town registry (optional, built-in Dorset list otherwise)
  ├── assets/                      # Static assets → copied to output/assets
  └── pages/
      ├── 010-privacy.md           # Page (numbered = listed in the footer)
      ├── 020-github.md            # Link page (URL-only .md → external footer link)
      └── terms.md                 # No number prefix = rendered but unlisted

Run 'tidemark gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config, town registry and pages without building
    Check,
    /// Print the navigation state of a simulated page view
    Nav(NavArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct NavArgs {
    /// Pathname to mount, e.g. /web-design/poole
    path: String,

    /// Window scroll offset in px
    #[arg(long, default_value_t = 0.0)]
    scroll_y: f64,

    /// Viewport width in px (omit for a window that reports none)
    #[arg(long)]
    width: Option<f64>,

    /// Open the mobile menu after mounting
    #[arg(long)]
    open_menu: bool,

    /// Print the state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            output::print_check_output(&site);
            println!("==> Content is valid");
        }
        Command::Nav(args) => {
            let site = Site::load(&cli.source)?;
            let window = SimulatedWindow::new(Some(args.scroll_y), args.width);
            let mut view = PageView::mount(
                &args.path,
                site.registry.clone(),
                &site.config.navigation,
                window,
            );
            view.store_mut().subscribe(|state| {
                log::debug!(
                    "state changed: sticky={} menu_open={}",
                    state.show_sticky_nav,
                    state.is_mobile_menu_open
                );
            });
            if args.open_menu {
                view.handle(UiEvent::ToggleMenu);
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(view.state())?);
            } else {
                output::print_nav_state(view.state());
            }
            view.unmount();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
