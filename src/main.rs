use clap::{Parser, Subcommand};
use htg_docs::components::SiteComponents;
use htg_docs::config;
use htg_docs::generate::{self, site_css};
use htg_docs::menu::MenuCatalog;
use htg_docs::output;
use htg_docs::query::{ContentIndex, PageRef};
use htg_docs::template::DocsTemplate;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "htg-docs")]
#[command(about = "Static renderer for how-to guide documentation")]
#[command(long_about = "\
Static renderer for how-to guide documentation

Every markdown file under content/<version>/<locale>/ becomes one page. Its
URL comes from the `slug` in its YAML frontmatter.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── menus.toml                   # Global and section menus (optional)
  └── v3/
      ├── en/
      │   └── basics/
      │       └── pallet-integration.md
      └── zh-CN/
          └── basics/
              └── pallet-integration.md

Frontmatter:
  slug, title        required
  section, category  shown in breadcrumbs and listings
  difficulty         shows a difficulty tag (with optional duration)
  hideNav: true      hides the previous/next links

Run 'htg-docs gen-config' to generate a documented config.toml.")]
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
    /// Render every guide into the output directory
    Build,
    /// Validate content, config and menus without writing anything
    Check {
        /// Print the page inventory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one guide to stdout
    Render {
        /// Locale of the guide
        #[arg(long)]
        locale: Option<String>,
        /// Frontmatter slug of the guide
        #[arg(long)]
        slug: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let menus = MenuCatalog::load(&cli.source)?;
            println!("==> Scanning {}", cli.source.display());
            let index = ContentIndex::scan(&cli.source)?;
            println!("==> Rendering {} guides → {}", index.len(), cli.output.display());
            let report = generate::generate(&index, &menus, &site_config, &cli.output)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { json } => {
            let site_config = config::load_config(&cli.source)?;
            let menus = MenuCatalog::load(&cli.source)?;
            let index = ContentIndex::scan(&cli.source)?;
            let pages = output::inventory(&index, &menus, &site_config.site.default_locale);
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_check_output(&pages, &menus, &cli.source);
                println!("==> Content is valid");
            }
        }
        Command::Render { locale, slug } => {
            let site_config = config::load_config(&cli.source)?;
            let menus = MenuCatalog::load(&cli.source)?;
            let index = ContentIndex::scan(&cli.source)?;
            let default_locale = site_config.site.default_locale.as_str();
            let locale = locale.as_deref().unwrap_or(default_locale);
            let version = index
                .get(locale, &slug)
                .map(|doc| doc.version.as_str())
                .unwrap_or_else(|| site_config.versions[0].as_str());

            let css = site_css(&site_config);
            let components = SiteComponents::new(&site_config, index.root(), &css).with_locale(locale);
            let template = DocsTemplate::new(&menus, &components);
            let page = PageRef {
                locale,
                version,
                slug: &slug,
            };
            let html = generate::render_page(&index, &template, page, default_locale)?;
            println!("{}", html.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
