use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use sealkit::config::{Argon2Config, BcryptConfig};
use sealkit::{CbcEncrypter, Config, Encrypter, PasswordHasher, cipher_methods};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

mod auth;
mod logging;

#[derive(Debug, clap::Args)]
struct CipherArgs {
    /// Cipher algorithm (default: from config, AES-256-CBC)
    #[arg(long)]
    algorithm: Option<String>,

    /// File holding the secret key, used byte for byte (default: SEALKIT_KEY)
    #[arg(long = "key-file", value_name = "PATH")]
    key_file: Option<PathBuf>,

    /// Read and write raw envelope bytes instead of base64 text
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Input file (default: stdin)
    #[arg(long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,
}

impl CipherArgs {
    fn encrypter(&self, config: &Config) -> Result<CbcEncrypter> {
        let key = auth::read_key(self.key_file.as_deref())?;

        let mut settings = config.encrypter.clone();
        if let Some(algorithm) = &self.algorithm {
            settings.algorithm.clone_from(algorithm);
        }

        Ok(settings.build(key.to_vec())?)
    }
}

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Argon2 variant: argon2i or argon2id (default: argon2i)
    #[arg(long = "argon-variant")]
    variant: Option<String>,

    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem")]
    memory_cost: Option<u32>,

    /// Argon2 time cost / iterations (default: 4)
    #[arg(long = "argon-time")]
    time_cost: Option<u32>,

    /// Argon2 threads (default: 1)
    #[arg(long = "argon-threads")]
    threads: Option<u32>,
}

impl Argon2Args {
    fn to_config(&self, base: &Argon2Config) -> Argon2Config {
        Argon2Config {
            algorithm: self
                .variant
                .clone()
                .unwrap_or_else(|| base.algorithm.clone()),
            memory_cost: self.memory_cost.unwrap_or(base.memory_cost),
            time_cost: self.time_cost.unwrap_or(base.time_cost),
            threads: self.threads.unwrap_or(base.threads),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sealkit")]
#[command(
    version,
    about = "Password-based authenticated encryption and password hashing."
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, global = true, value_name = "PATH", env = "SEALKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts data into an authenticated envelope
    Encrypt {
        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Verifies and decrypts an envelope
    Decrypt {
        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Hashes a password (Argon2 unless --bcrypt)
    Hash {
        /// Use bcrypt instead of Argon2
        #[arg(long, default_value_t = false)]
        bcrypt: bool,

        /// Bcrypt cost (default: 10)
        #[arg(long)]
        cost: Option<u32>,

        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Lists supported cipher algorithms
    Ciphers,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    logging::init_tracing()?;

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Encrypt { cipher } => {
            let encrypter = cipher.encrypter(&config)?;
            let password = auth::read_password(cipher.input.is_some())?;
            let plaintext = Zeroizing::new(read_input(cipher.input.as_deref())?);

            let envelope = if cipher.raw {
                encrypter.encrypt_raw(&plaintext, password.as_bytes())?
            } else {
                let mut text = encrypter
                    .encrypt(&plaintext, password.as_bytes())?
                    .into_bytes();
                text.push(b'\n');
                text
            };
            write_output(cipher.output.as_deref(), &envelope)?;
        }
        Commands::Decrypt { cipher } => {
            let encrypter = cipher.encrypter(&config)?;
            let password = auth::read_password(cipher.input.is_some())?;
            let data = read_input(cipher.input.as_deref())?;

            let plaintext = if cipher.raw {
                encrypter.decrypt_raw(&data, password.as_bytes())
            } else {
                let text = std::str::from_utf8(&data).context("envelope is not base64 text")?;
                encrypter.decrypt(text, password.as_bytes())
            }
            .context("failed to decrypt envelope")?;
            write_output(cipher.output.as_deref(), &plaintext)?;
        }
        Commands::Hash {
            bcrypt,
            cost,
            argon2,
        } => {
            let hasher: Box<dyn PasswordHasher> = if bcrypt {
                let settings = BcryptConfig {
                    cost: cost.unwrap_or(config.bcrypt.cost),
                };
                Box::new(settings.build()?)
            } else {
                Box::new(argon2.to_config(&config.argon2).build()?)
            };

            let password = auth::read_password(true)?;
            println!("{}", hasher.hash(password.as_bytes())?);
        }
        Commands::Ciphers => {
            for name in cipher_methods() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sealkit").map(|dirs| dirs.config_dir().join("config.json"))
}

/// An explicit path must exist; the platform default may be absent.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = Config::from_json(&json)
        .with_context(|| format!("failed to load config file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
