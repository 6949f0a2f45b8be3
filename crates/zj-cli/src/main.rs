//! Command-line interface for `zjguard`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::EnvFilter;
use zj_guard::native::{self, MethodTable};
use zj_guard::{
    signature_hash, ConcealedKey, Guard, GuardConfig, Identity, StaticContext, DEFAULT_IV,
};

/// Guarded AES string cipher and MD5 signer.
#[derive(Parser)]
#[command(name = "zjguard", version, about = "Guarded AES string cipher and MD5 signer")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// How the calling application describes itself.
#[derive(Args, Debug)]
struct ContextArgs {
    /// Configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    config: PathBuf,
    /// Package name reported by the caller (defaults to the configured one).
    #[arg(long)]
    package: Option<String>,
    /// Certificate hash reported by the caller (defaults to the configured one).
    #[arg(long, value_name = "HASH", allow_hyphen_values = true, conflicts_with = "cert")]
    cert_hash: Option<i32>,
    /// Certificate file whose hash the caller reports.
    #[arg(long, value_name = "FILE")]
    cert: Option<PathBuf>,
    /// Report the caller as running on an emulator.
    #[arg(long, default_value_t = false)]
    emulator: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text to base64, or print UNSIGNATURE if the caller is refused.
    Encode {
        #[command(flatten)]
        ctx: ContextArgs,
        /// Plaintext.
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Decrypt base64 text.
    Decode {
        #[command(flatten)]
        ctx: ContextArgs,
        /// Base64 ciphertext.
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// MD5-sign text with the configured sign key.
    Sign {
        #[command(flatten)]
        ctx: ContextArgs,
        /// Payload to sign.
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Print the check status code (1, -1, -2 or -3).
    Check {
        #[command(flatten)]
        ctx: ContextArgs,
    },
    /// Conceal a 16-character key behind a decoy character.
    Conceal {
        /// AES key, exactly 16 characters.
        #[arg(long)]
        key: String,
        /// Decoy character placed in front of the base64 text.
        #[arg(long)]
        decoy: char,
        /// Print a Rust function rebuilding the text one character at a time.
        #[arg(long, default_value_t = false)]
        rust: bool,
    },
    /// Print the signature hash of a certificate file.
    CertHash {
        /// DER-encoded certificate.
        file: PathBuf,
    },
    /// Validate a configuration and print its binding table.
    Inspect {
        /// Configuration file (JSON).
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },
    /// Generate a throwaway key, encrypt a random message and decrypt it back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Encode { ctx, text } => {
            let (guard, app) = load(&ctx)?;
            println!("{}", native::encode(&guard, &app, &text));
        }
        Commands::Decode { ctx, text } => cmd_decode(&ctx, &text)?,
        Commands::Sign { ctx, text } => {
            let (guard, app) = load(&ctx)?;
            println!("{}", native::sign(&guard, &app, &text));
        }
        Commands::Check { ctx } => {
            let (guard, app) = load(&ctx)?;
            println!("{}", native::check(&guard, &app));
        }
        Commands::Conceal { key, decoy, rust } => cmd_conceal(&key, decoy, rust)?,
        Commands::CertHash { file } => {
            let bytes = read(&file)?;
            println!("{}", signature_hash(&bytes));
        }
        Commands::Inspect { config } => cmd_inspect(&config)?,
        Commands::Demo { seed } => cmd_demo(seed)?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn load(args: &ContextArgs) -> Result<(Guard, StaticContext)> {
    let config = GuardConfig::load(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let guard = Guard::from_config(&config).context("build guard")?;
    let app = caller_context(args, &config)?;
    tracing::debug!(context = ?app, "caller context");
    Ok((guard, app))
}

/// The caller defaults to the configured identity, so the gate passes unless overridden.
fn caller_context(args: &ContextArgs, config: &GuardConfig) -> Result<StaticContext> {
    let package = args
        .package
        .clone()
        .unwrap_or_else(|| config.package_name.clone());
    let hash = match (&args.cert, args.cert_hash) {
        (Some(path), _) => signature_hash(&read(path)?),
        (None, Some(hash)) => hash,
        (None, None) => config.signature_hash,
    };
    Ok(StaticContext::new(package, hash).with_emulator(args.emulator))
}

fn cmd_decode(args: &ContextArgs, text: &str) -> Result<()> {
    let (guard, app) = load(args)?;
    match guard.decode(&app, text) {
        Ok(plain) => println!("{plain}"),
        Err(err) if err.is_rejection() => println!("{}", native::UNSIGNATURE),
        Err(err) => return Err(err).context("decode"),
    }
    Ok(())
}

fn cmd_conceal(key: &str, decoy: char, rust: bool) -> Result<()> {
    let concealed = ConcealedKey::conceal(key, decoy).context("conceal key")?;
    if rust {
        print!("{}", concealed.render_rust_fn("concealed_key"));
    } else {
        println!("{concealed}");
    }
    Ok(())
}

fn cmd_inspect(path: &Path) -> Result<()> {
    let config =
        GuardConfig::load(path).with_context(|| format!("load config {}", path.display()))?;
    let table = MethodTable::from_config(&config);
    println!("package: {}", config.package_name);
    println!("signature hash: {}", config.signature_hash);
    println!("library: {}", config.library_file_name());
    println!("class: {}", table.class_path());
    println!("abi: {}", config.abi_filters.join(", "));
    for method in table.methods() {
        println!(
            "  {} {} -> {:?}",
            method.name,
            method.operation.descriptor(),
            method.operation
        );
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);

    let mut key_bytes = [0u8; 8];
    rng.fill_bytes(&mut key_bytes);
    let key_text = hex::encode(key_bytes);
    let decoy = char::from(rng.gen_range(b'A'..=b'Z'));
    let concealed = ConcealedKey::conceal(&key_text, decoy)?;

    let package = "com.example.demo";
    let hash = rng.gen::<i32>();
    let mut sign_key = [0u8; 8];
    rng.fill_bytes(&mut sign_key);
    let iv: [u8; 16] = DEFAULT_IV
        .as_bytes()
        .try_into()
        .context("default IV is 16 bytes")?;
    let guard = Guard::new(Identity::new(package, hash), &concealed, iv, hex::encode(sign_key))?;
    let app = StaticContext::new(package, hash);

    let mut message = [0u8; 12];
    rng.fill_bytes(&mut message);
    let plaintext = hex::encode(message);

    let ciphertext = guard.encode(&app, &plaintext)?;
    let decrypted = guard.decode(&app, &ciphertext)?;
    let signature = guard.sign(&app, &plaintext)?;

    println!("concealed key: {concealed}");
    println!("plaintext: {plaintext}");
    println!("ciphertext: {ciphertext}");
    println!("decrypted: {decrypted}");
    println!("signature: {signature}");
    println!(
        "stranger gets: {}",
        native::encode(&guard, &StaticContext::new("com.other", hash), &plaintext)
    );
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
