//! Command line interface

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use crate::clean::{CleanOutcome, clean};
use crate::config::DEFAULT_BUILD_DIR;
use crate::logging::LogFormat;
use crate::registry::diff::diff;
use crate::registry::version::VersionTriple;
use crate::registry::{Module, Preset, Registry};
use crate::release::plan::PlanOutcome;
use crate::release::version_file::VersionFileEditor;
use crate::release::{BumpRequest, bump, current_version, init_version_file};

#[derive(Parser)]
#[command(name = "version-registry")]
#[command(
    version,
    about = "Build configuration registry for SDK levels, module versions and dependency coordinates"
)]
pub struct Cli {
    /// Catalog file (defaults to $VERSION_REGISTRY_CATALOG, then <root>/version-registry.toml)
    #[arg(long, global = true, conflicts_with = "preset")]
    pub catalog: Option<PathBuf>,

    /// Use a built-in catalog revision (api33, api34)
    #[arg(long, global = true)]
    pub preset: Option<Preset>,

    /// Project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text / key=value lines
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every registry value
    Show,
    /// Validate the catalog
    Check,
    /// Print a module's version name
    VersionName {
        #[arg(short, long)]
        module: Module,
    },
    /// Print the SDK levels
    Sdk,
    /// Print a dependency coordinate
    Dependency { name: String },
    /// Print an entry of the versions table
    Version { name: String },
    /// Print a plugin coordinate (by alias or plugin id)
    Plugin { name: String },
    /// Print a module's publish identity
    Publish {
        #[arg(short, long)]
        module: Module,
    },
    /// List changes from another revision to the loaded one
    Diff {
        #[arg(long, conflicts_with = "against", required_unless_present = "against")]
        against_preset: Option<Preset>,
        #[arg(long)]
        against: Option<PathBuf>,
    },
    /// Print the version declared in a module's version file
    Current {
        #[arg(short, long)]
        module: Module,
    },
    /// Create a module's version file from the registry
    InitVersionFile {
        #[arg(short, long)]
        module: Module,
    },
    /// Rewrite a module's version file to a strictly higher version
    Bump {
        #[arg(short, long)]
        module: Module,
        #[arg(long)]
        version: VersionTriple,
        /// Upstream branch, tag or commit the release is built from
        #[arg(short = 'r', long = "ref")]
        upstream_ref: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete the build output directory
    Clean {
        #[arg(long, default_value = DEFAULT_BUILD_DIR)]
        build_dir: PathBuf,
    },
}

impl Cli {
    fn load_registry(&self) -> anyhow::Result<Registry> {
        let registry = match self.preset {
            Some(preset) => Registry::from_preset(preset)?,
            None => Registry::discover(self.catalog.as_deref(), &self.root, Preset::default())?,
        };
        Ok(registry)
    }
}

/// Execute the parsed command, writing results to `out`
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut printer = Printer {
        out,
        format: cli.format,
    };

    match &cli.command {
        Command::Show => {
            let registry = cli.load_registry()?;
            printer.emit(&registry.snapshot(), || registry.to_properties())
        }
        Command::Check => {
            cli.load_registry()?;
            printer.emit(&json!({ "valid": true }), || "ok".to_string())
        }
        Command::VersionName { module } => {
            let registry = cli.load_registry()?;
            let name = registry.resolve_version_name(*module);
            printer.emit(
                &json!({ "module": module, "versionName": name }),
                || name.clone(),
            )
        }
        Command::Sdk => {
            let bounds = cli.load_registry()?.resolve_sdk_bounds();
            printer.emit(&bounds, || {
                format!(
                    "compileSdk={}\ntargetSdk={}\nminSdk={}",
                    bounds.compile_sdk(),
                    bounds.target_sdk(),
                    bounds.min_sdk()
                )
            })
        }
        Command::Dependency { name } => {
            let registry = cli.load_registry()?;
            let coordinate = registry.resolve_dependency_coordinate(name)?;
            printer.emit(coordinate, || coordinate.to_string())
        }
        Command::Version { name } => {
            let registry = cli.load_registry()?;
            let version = registry.resolve_version(name)?;
            printer.emit(&json!({ "name": name, "version": version }), || {
                version.to_string()
            })
        }
        Command::Plugin { name } => {
            let registry = cli.load_registry()?;
            let plugin = registry.resolve_plugin(name)?;
            printer.emit(plugin, || plugin.to_string())
        }
        Command::Publish { module } => {
            let identity = cli.load_registry()?.publish_identity(*module);
            printer.emit(&identity, || identity.to_string())
        }
        Command::Diff {
            against_preset,
            against,
        } => {
            let current = cli.load_registry()?;
            let baseline = match (against_preset, against) {
                (Some(preset), _) => Registry::from_preset(*preset)?,
                (None, Some(path)) => Registry::load(path)?,
                (None, None) => anyhow::bail!("diff needs --against-preset or --against"),
            };
            let changes = diff(&baseline, &current);
            printer.emit(&changes, || {
                if changes.is_empty() {
                    "no changes".to_string()
                } else {
                    changes
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })
        }
        Command::Current { module } => {
            let version = current_version(&VersionFileEditor::new(), &cli.root, *module)?;
            printer.emit(
                &json!({ "module": module, "version": version.version_name() }),
                || version.version_name(),
            )
        }
        Command::InitVersionFile { module } => {
            let registry = cli.load_registry()?;
            let editor = VersionFileEditor::new();
            let version = init_version_file(&editor, &registry, &cli.root, *module)?;
            let path = cli.root.join(module.version_file());
            printer.emit(
                &json!({ "path": path, "version": version.version_name() }),
                || format!("created {} at {}", path.display(), version),
            )
        }
        Command::Bump {
            module,
            version,
            upstream_ref,
            dry_run,
        } => {
            let registry = cli.load_registry()?;
            let request = BumpRequest {
                module: *module,
                version: *version,
                upstream_ref,
                dry_run: *dry_run,
            };
            let editor = VersionFileEditor::new();
            let outcome = bump(&editor, &registry, &cli.root, &request)
                .with_context(|| format!("Failed to bump {} version", module))?;

            match outcome {
                PlanOutcome::Ready(plan) => printer.emit(&plan, || {
                    [
                        format!("module: {}", plan.module),
                        format!("previousVersion: {}", plan.previous_version),
                        format!("version: {}", plan.version),
                        format!("releaseName: {}", plan.release_name),
                        format!("commitMessage: {}", plan.commit_message),
                        format!("releaseNotes: {}", plan.release_notes),
                        format!("assetName: {}", plan.asset_name),
                        format!("assetPath: {}", plan.asset_path.display()),
                        format!("publishTask: {}", plan.publish_task),
                        format!("publishIdentity: {}", plan.publish_identity),
                    ]
                    .join("\n")
                }),
                PlanOutcome::NotHigher { current, requested } => printer.emit(
                    &json!({
                        "status": "notHigher",
                        "current": current.version_name(),
                        "requested": requested.version_name(),
                    }),
                    || {
                        format!(
                            "The provided version ({}) is not higher than the previous version ({}), nothing to do",
                            requested, current
                        )
                    },
                ),
            }
        }
        Command::Clean { build_dir } => {
            let (removed, path) = match clean(&cli.root, build_dir)? {
                CleanOutcome::Removed(path) => (true, path),
                CleanOutcome::NothingToClean(path) => (false, path),
            };
            printer.emit(&json!({ "removed": removed, "path": path }), || {
                if removed {
                    format!("removed {}", path.display())
                } else {
                    format!("nothing to clean at {}", path.display())
                }
            })
        }
    }
}

struct Printer<'a> {
    out: &'a mut dyn Write,
    format: OutputFormat,
}

impl Printer<'_> {
    /// Write `value` as JSON or the text rendering, depending on the format
    fn emit<T, F>(&mut self, value: &T, text: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *self.out, value)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                let text = text();
                write!(self.out, "{}", text)?;
                if !text.ends_with('\n') {
                    writeln!(self.out)?;
                }
            }
        }
        Ok(())
    }
}
