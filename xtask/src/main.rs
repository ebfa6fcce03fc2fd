use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "remediation_lambda";
const LAMBDA_BINARY: &str = "remediation_runtime";
const DEFAULT_TARGET: &str = "x86_64-unknown-linux-gnu";
const ARTIFACT_PATH: &str = "infra/dist/remediation.zip";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Checks and Lambda packaging for the EC2 auto-remediation workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the workspace test suite
    Test,
    /// Run formatting, clippy, and tests
    Ci,
    /// Build the remediation binary and zip it as a custom-runtime `bootstrap`
    ServerlessPackage {
        /// Target triple of the Lambda execution environment
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn output_dir(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

fn cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo");
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci() {
    cargo(&["fmt", "--all", "--", "--check"]);
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"]);
    cargo(&["test", "--workspace"]);
}

fn serverless_package(target: &str, profile: BuildProfile) {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--bin", LAMBDA_BINARY, "--target", target];
    if let BuildProfile::Release = profile {
        args.push("--release");
    }
    cargo(&args);

    let binary: PathBuf = ["target", target, profile.output_dir(), LAMBDA_BINARY]
        .iter()
        .collect();
    let artifact = Path::new(ARTIFACT_PATH);
    write_bootstrap_zip(&binary, artifact);
    eprintln!("packaged {}", artifact.display());
}

/// The provided.al2023 runtime executes the archive's root `bootstrap` file.
fn write_bootstrap_zip(binary: &Path, artifact: &Path) {
    let executable = fs::read(binary)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", binary.display()));
    if let Some(parent) = artifact.parent() {
        fs::create_dir_all(parent).expect("failed to create artifact directory");
    }

    let mut zip = ZipWriter::new(File::create(artifact).expect("failed to create artifact"));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to add bootstrap entry");
    zip.write_all(&executable)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finalize artifact");
}

fn main() {
    match Cli::parse().command {
        Commands::Test => cargo(&["test", "--workspace"]),
        Commands::Ci => ci(),
        Commands::ServerlessPackage { target, profile } => serverless_package(&target, profile),
    }
}
