use anyhow::{Context as _, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gtmpl::Context;
use std::io::Write;
use std::path::Path;
use trellis::{Config, DirSource, Loader, Templates};

fn main() -> Result<()> {
    env_logger::init();

    let dir_arg = || {
        Arg::with_name("dir")
            .help("The template directory, e.g. `views`")
            .required(true)
            .index(1)
    };
    let matches = App::new("trellis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Composes directory-scoped layouts, includes and pages into templates")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("FILE")
                .help("A trellis.yaml file; by default one is searched for above the template directory")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists every template key with its include and layout chain")
                .arg(dir_arg()),
        )
        .subcommand(
            SubCommand::with_name("render")
                .about("Renders one template to stdout")
                .arg(dir_arg())
                .arg(
                    Arg::with_name("key")
                        .help("The template key, e.g. `admin/index`")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::with_name("data")
                        .long("data")
                        .short("d")
                        .value_name("FILE")
                        .help("A YAML file to render the template against")
                        .takes_value(true),
                ),
        )
        .get_matches();

    let config = matches.value_of("config");
    match matches.subcommand() {
        ("list", Some(sub)) => list(&load_templates(sub, config)?),
        ("render", Some(sub)) => render(&load_templates(sub, config)?, sub),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load_templates(matches: &ArgMatches, config: Option<&str>) -> Result<Templates> {
    let dir = Path::new(matches.value_of("dir").context("Missing template directory")?);
    let config = match config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::from_directory(dir)?,
    };
    let source = DirSource::mounted(dir)
        .with_context(|| format!("Opening template directory `{}`", dir.display()))?;
    Ok(Loader::with_config(config).load(&source)?)
}

fn list(templates: &Templates) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (key, template) in templates {
        writeln!(out, "{}\t{}", key, template.source_path())?;
        for dir in template.include_order() {
            writeln!(out, "\tinclude {}", dir)?;
        }
        for layout in template.layout_order() {
            if layout != template.source_path() {
                writeln!(out, "\tlayout  {}", layout)?;
            }
        }
    }
    Ok(())
}

fn render(templates: &Templates, matches: &ArgMatches) -> Result<()> {
    let key = matches.value_of("key").context("Missing template key")?;
    let data = match matches.value_of("data") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Reading data file `{}`", path))?;
            let yaml: serde_yaml::Value = serde_yaml::from_str(&text)
                .with_context(|| format!("Parsing data file `{}`", path))?;
            Context::from(trellis::value::from_yaml(&yaml))
        }
        None => Context::empty(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    templates.render(key, &mut out, &data)?;
    out.flush()?;
    Ok(())
}
